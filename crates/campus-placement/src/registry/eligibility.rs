use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{JobId, JobPosting, Student, StudentId};

/// Comparison of a student's skills against the skills a job lists as required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapAnalysis {
    pub student_id: StudentId,
    pub job_id: JobId,
    pub required: BTreeSet<String>,
    pub matching: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub match_percentage: f64,
}

impl SkillGapAnalysis {
    pub fn between(student: &Student, job: &JobPosting) -> Self {
        let matching: BTreeSet<String> = job
            .required_skills
            .intersection(&student.skills)
            .cloned()
            .collect();
        let missing: BTreeSet<String> = job
            .required_skills
            .difference(&student.skills)
            .cloned()
            .collect();

        // A job with no listed skills is a full match for everyone.
        let match_percentage = if job.required_skills.is_empty() {
            100.0
        } else {
            matching.len() as f64 * 100.0 / job.required_skills.len() as f64
        };

        Self {
            student_id: student.id.clone(),
            job_id: job.id.clone(),
            required: job.required_skills.clone(),
            matching,
            missing,
            match_percentage,
        }
    }

    pub fn is_complete_match(&self) -> bool {
        self.missing.is_empty()
    }

    /// One training line per missing skill, in skill order.
    pub fn recommended_training(&self) -> Vec<String> {
        self.missing
            .iter()
            .map(|skill| format!("Learn {skill}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::domain::{CompanyId, JobPostingDraft};
    use chrono::NaiveDate;

    fn job(departments: &[&str], skills: &[&str], min_cgpa: f64) -> JobPosting {
        JobPosting::from_draft(
            JobPostingDraft {
                id: JobId::from("J001"),
                title: "Backend Engineer".to_string(),
                description: "Services team".to_string(),
                company_id: CompanyId::from("C001"),
                package_lpa: 12.0,
                location: "Bengaluru".to_string(),
                min_cgpa,
                eligible_departments: departments.iter().map(|d| d.to_string()).collect(),
                required_skills: skills.iter().map(|s| s.to_string()).collect(),
            },
            NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
        )
    }

    fn student(department: &str, cgpa: f64, skills: &[&str]) -> Student {
        Student::new("S001", "Alice Johnson", "alice@college.edu", department, cgpa, 2024)
            .with_skills(skills.iter().copied())
    }

    #[test]
    fn eligibility_requires_cgpa_and_department() {
        let posting = job(&["CS", "IT"], &["Rust"], 8.0);

        assert!(posting.is_eligible(&student("CS", 8.5, &[])));
        assert!(posting.is_eligible(&student("IT", 8.0, &[])));
        assert!(!posting.is_eligible(&student("CS", 7.99, &[])));
        assert!(!posting.is_eligible(&student("ECE", 9.5, &[])));
    }

    #[test]
    fn eligibility_ignores_required_skills() {
        let posting = job(&["CS"], &["Rust", "Kubernetes"], 6.0);
        assert!(posting.is_eligible(&student("CS", 7.0, &["Excel"])));
    }

    #[test]
    fn department_match_is_exact() {
        let posting = job(&["CS"], &[], 6.0);
        assert!(!posting.is_eligible(&student("cs", 9.0, &[])));
    }

    #[test]
    fn splits_required_skills_into_matching_and_missing() {
        let posting = job(&["CS"], &["Java", "SQL", "Docker", "AWS"], 6.0);
        let analysis =
            SkillGapAnalysis::between(&student("CS", 8.5, &["Java", "Python", "SQL"]), &posting);

        assert_eq!(
            analysis.matching.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Java", "SQL"]
        );
        assert_eq!(
            analysis.missing.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["AWS", "Docker"]
        );
        assert!((analysis.match_percentage - 50.0).abs() < f64::EPSILON);
        assert!(!analysis.is_complete_match());
        assert_eq!(
            analysis.recommended_training(),
            vec!["Learn AWS".to_string(), "Learn Docker".to_string()]
        );
    }

    #[test]
    fn empty_requirements_are_a_full_match() {
        let posting = job(&["CS"], &[], 6.0);
        let analysis = SkillGapAnalysis::between(&student("CS", 8.5, &[]), &posting);

        assert_eq!(analysis.match_percentage, 100.0);
        assert!(analysis.is_complete_match());
        assert!(analysis.recommended_training().is_empty());
    }
}
