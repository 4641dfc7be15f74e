use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::{CompanyId, JobOffer, Student, StudentId};
use super::store::{PlacementRegistry, RegistryError};

/// Campus-wide placement snapshot. Packages only count accepted offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementStatistics {
    pub total_students: usize,
    pub placed_students: usize,
    pub placement_percentage: f64,
    pub average_package: f64,
    pub highest_package: f64,
    pub total_jobs: usize,
    pub total_applications: usize,
    pub total_offers: usize,
    pub accepted_offers: usize,
}

/// Per-company funnel shown on the company dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyHiringSummary {
    pub company_id: CompanyId,
    pub jobs_posted: usize,
    pub applications_received: usize,
    pub offers_made: usize,
    pub offers_accepted: usize,
}

impl PlacementRegistry {
    fn accepted_offers(&self) -> impl Iterator<Item = &JobOffer> + '_ {
        self.offers.values().filter(|offer| offer.is_accepted())
    }

    fn placed_student_ids(&self) -> BTreeSet<&StudentId> {
        self.accepted_offers()
            .filter_map(|offer| self.applications.get(&offer.application_id))
            .map(|application| &application.student_id)
            .collect()
    }

    pub fn placement_statistics(&self) -> PlacementStatistics {
        let total_students = self.students.len();
        let placed_students = self.placed_student_ids().len();
        let placement_percentage = if total_students > 0 {
            placed_students as f64 * 100.0 / total_students as f64
        } else {
            0.0
        };

        let packages: Vec<f64> = self
            .accepted_offers()
            .map(|offer| offer.package_lpa)
            .collect();
        let average_package = if packages.is_empty() {
            0.0
        } else {
            packages.iter().sum::<f64>() / packages.len() as f64
        };
        let highest_package = packages.iter().copied().reduce(f64::max).unwrap_or(0.0);

        PlacementStatistics {
            total_students,
            placed_students,
            placement_percentage,
            average_package,
            highest_package,
            total_jobs: self.jobs.len(),
            total_applications: self.applications.len(),
            total_offers: self.offers.len(),
            accepted_offers: packages.len(),
        }
    }

    /// Accepted offers grouped by the student's department. A student holding two accepted offers
    /// is counted twice.
    pub fn department_wise_placement(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for offer in self.accepted_offers() {
            if let Some(student) = self.student_of_application(&offer.application_id) {
                *counts.entry(student.department.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn unplaced_students(&self) -> Vec<&Student> {
        let placed = self.placed_student_ids();
        self.students
            .values()
            .filter(|student| !placed.contains(&student.id))
            .collect()
    }

    /// Accepted offers grouped by company name.
    pub fn company_wise_hiring(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for offer in self.accepted_offers() {
            if let Some(company) = self.company_of_application(&offer.application_id) {
                *counts.entry(company.name.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn company_hiring_summary(
        &self,
        company_id: &CompanyId,
    ) -> Result<CompanyHiringSummary, RegistryError> {
        if !self.companies.contains_key(company_id) {
            return Err(RegistryError::CompanyNotFound(company_id.clone()));
        }

        let jobs = self.company_jobs(company_id);
        let applications: Vec<_> = jobs
            .iter()
            .flat_map(|job| self.job_applications(&job.id))
            .collect();
        let offers: Vec<&JobOffer> = applications
            .iter()
            .flat_map(|application| self.application_offers(&application.id))
            .collect();

        Ok(CompanyHiringSummary {
            company_id: company_id.clone(),
            jobs_posted: jobs.len(),
            applications_received: applications.len(),
            offers_made: offers.len(),
            offers_accepted: offers.iter().filter(|offer| offer.is_accepted()).count(),
        })
    }
}
