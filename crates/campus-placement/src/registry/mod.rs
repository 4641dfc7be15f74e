//! Placement registry: entity tables, eligibility and skill-gap matching, the application,
//! interview and offer lifecycle, and the reporting queries built on top of them.

pub mod domain;
pub mod eligibility;
pub mod report;
pub mod router;
pub mod sample;
pub(crate) mod sequence;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Admin, AdminId, Application, ApplicationId, ApplicationStatus, Company, CompanyId, Interview,
    InterviewId, InterviewRequest, InterviewStatus, JobId, JobOffer, JobPosting, JobPostingDraft,
    OfferId, OfferRequest, OfferStatus, Student, StudentId,
};
pub use eligibility::SkillGapAnalysis;
pub use report::{CompanyHiringSummary, PlacementStatistics};
pub use router::{placement_router, shared, SharedRegistry};
pub use sample::seed_sample_data;
pub use store::{PlacementRegistry, RegistryError};
