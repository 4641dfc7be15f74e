use axum::response::Response;
use serde_json::Value;

use crate::registry::domain::{
    ApplicationId, Company, CompanyId, InterviewRequest, JobId, JobPostingDraft, OfferId,
    OfferRequest, Student, StudentId,
};
use crate::registry::store::PlacementRegistry;

pub(super) fn student(id: &str, department: &str, cgpa: f64) -> Student {
    Student::new(
        id,
        format!("Student {id}"),
        format!("{}@college.edu", id.to_ascii_lowercase()),
        department,
        cgpa,
        2024,
    )
}

pub(super) fn company(id: &str, name: &str) -> Company {
    Company::new(id, name, format!("hr@{}.com", id.to_ascii_lowercase()), "Technology")
}

pub(super) fn job_draft(
    id: &str,
    company_id: &str,
    min_cgpa: f64,
    departments: &[&str],
) -> JobPostingDraft {
    JobPostingDraft {
        id: JobId::from(id),
        title: format!("Engineer {id}"),
        description: "Platform engineering".to_string(),
        company_id: CompanyId::from(company_id),
        package_lpa: 10.0,
        location: "Pune".to_string(),
        min_cgpa,
        eligible_departments: departments.iter().map(|d| d.to_string()).collect(),
        required_skills: ["Java", "SQL"].iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn interview_request() -> InterviewRequest {
    InterviewRequest {
        date: "2024-08-12".to_string(),
        time: "10:30".to_string(),
        location: "Seminar Hall 2".to_string(),
        interview_type: "TECHNICAL".to_string(),
    }
}

pub(super) fn offer_request(package_lpa: f64) -> OfferRequest {
    OfferRequest {
        package_lpa,
        joining_date: "2024-07-01".to_string(),
        details: "Graduate engineer trainee".to_string(),
    }
}

/// Registry with one CS student (8.5), one IT student (7.0), TechCorp and a CS/IT job with an
/// 8.0 cutoff.
pub(super) fn registry() -> PlacementRegistry {
    let mut registry = PlacementRegistry::new();
    registry.add_student(student("S001", "CS", 8.5));
    registry.add_student(student("S002", "IT", 7.0));
    registry.add_company(company("C001", "TechCorp"));
    registry
        .add_job_posting(job_draft("J001", "C001", 8.0, &["CS", "IT"]))
        .expect("company registered");
    registry
}

pub(super) fn sid(id: &str) -> StudentId {
    StudentId::from(id)
}

pub(super) fn jid(id: &str) -> JobId {
    JobId::from(id)
}

pub(super) fn apply(
    registry: &mut PlacementRegistry,
    student_id: &str,
    job_id: &str,
) -> ApplicationId {
    registry
        .apply_for_job(&sid(student_id), &jid(job_id))
        .expect("application accepted")
        .id
        .clone()
}

pub(super) fn offer(
    registry: &mut PlacementRegistry,
    application_id: &ApplicationId,
    package_lpa: f64,
) -> OfferId {
    registry
        .make_job_offer(application_id, offer_request(package_lpa))
        .expect("application exists")
        .id
        .clone()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
