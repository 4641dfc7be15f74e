use std::collections::BTreeSet;
use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

identifier!(
    /// Roll number assigned by the placement cell.
    StudentId
);
identifier!(CompanyId);
identifier!(AdminId);
identifier!(
    /// Identifier chosen by the company when it posts a job.
    JobId
);
identifier!(
    /// Registry-generated `APP####` identifier.
    ApplicationId
);
identifier!(
    /// Registry-generated `INT####` identifier.
    InterviewId
);
identifier!(
    /// Registry-generated `OFF####` identifier.
    OfferId
);

/// Registered student and the profile fields they can edit themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub cgpa: f64,
    pub graduation_year: u16,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub resume: Option<String>,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
        cgpa: f64,
        graduation_year: u16,
    ) -> Self {
        Self {
            id: StudentId(id.into()),
            name: name.into(),
            email: email.into(),
            department: department.into(),
            cgpa,
            graduation_year,
            skills: BTreeSet::new(),
            resume: None,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn add_skill(&mut self, skill: impl Into<String>) {
        self.skills.insert(skill.into());
    }

    pub fn set_resume(&mut self, resume: impl Into<String>) {
        self.resume = Some(resume.into());
    }

    pub fn set_cgpa(&mut self, cgpa: f64) {
        self.cgpa = cgpa;
    }

    pub fn has_resume(&self) -> bool {
        self.resume.is_some()
    }
}

/// Recruiting company. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub email: String,
    pub industry: String,
}

impl Company {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        Self {
            id: CompanyId(id.into()),
            name: name.into(),
            email: email.into(),
            industry: industry.into(),
        }
    }
}

/// Placement cell administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
    pub email: String,
}

impl Admin {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: AdminId(id.into()),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Fields a company supplies when posting a job. The registry stamps the post date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostingDraft {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub company_id: CompanyId,
    pub package_lpa: f64,
    pub location: String,
    pub min_cgpa: f64,
    pub eligible_departments: BTreeSet<String>,
    #[serde(default)]
    pub required_skills: BTreeSet<String>,
}

/// Job posted by a company. Immutable after posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub company_id: CompanyId,
    pub package_lpa: f64,
    pub location: String,
    pub min_cgpa: f64,
    pub eligible_departments: BTreeSet<String>,
    pub required_skills: BTreeSet<String>,
    pub posted_on: NaiveDate,
}

impl JobPosting {
    pub fn from_draft(draft: JobPostingDraft, posted_on: NaiveDate) -> Self {
        let JobPostingDraft {
            id,
            title,
            description,
            company_id,
            package_lpa,
            location,
            min_cgpa,
            eligible_departments,
            required_skills,
        } = draft;

        Self {
            id,
            title,
            description,
            company_id,
            package_lpa,
            location,
            min_cgpa,
            eligible_departments,
            required_skills,
            posted_on,
        }
    }

    /// Eligibility gate: minimum CGPA and department membership. Required skills only feed the
    /// skill-gap analysis.
    pub fn is_eligible(&self, student: &Student) -> bool {
        student.cgpa >= self.min_cgpa && self.eligible_departments.contains(&student.department)
    }
}

/// Lifecycle of an application. Any status may be overwritten by any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
    OnHold,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::OnHold => "ON_HOLD",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub applied_at: NaiveDateTime,
}

impl Application {
    pub fn new(id: ApplicationId, student_id: StudentId, job_id: JobId) -> Self {
        Self {
            id,
            student_id,
            job_id,
            status: ApplicationStatus::Applied,
            applied_at: Local::now().naive_local(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "SCHEDULED",
            InterviewStatus::Completed => "COMPLETED",
            InterviewStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Slot details supplied by the company. Date, time and type are free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRequest {
    pub date: String,
    pub time: String,
    pub location: String,
    pub interview_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub application_id: ApplicationId,
    pub date: String,
    pub time: String,
    pub location: String,
    pub interview_type: String,
    pub status: InterviewStatus,
}

impl Interview {
    pub fn new(id: InterviewId, application_id: ApplicationId, request: InterviewRequest) -> Self {
        Self {
            id,
            application_id,
            date: request.date,
            time: request.time,
            location: request.location,
            interview_type: request.interview_type,
            status: InterviewStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

impl OfferStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OfferStatus::Pending => "PENDING",
            OfferStatus::Accepted => "ACCEPTED",
            OfferStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRequest {
    pub package_lpa: f64,
    pub joining_date: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOffer {
    pub id: OfferId,
    pub application_id: ApplicationId,
    pub package_lpa: f64,
    pub joining_date: String,
    pub details: String,
    pub status: OfferStatus,
}

impl JobOffer {
    pub fn new(id: OfferId, application_id: ApplicationId, request: OfferRequest) -> Self {
        Self {
            id,
            application_id,
            package_lpa: request.package_lpa,
            joining_date: request.joining_date,
            details: request.details,
            status: OfferStatus::Pending,
        }
    }

    // Re-deciding an already decided offer is allowed.
    pub fn accept(&mut self) {
        self.status = OfferStatus::Accepted;
    }

    pub fn reject(&mut self) {
        self.status = OfferStatus::Rejected;
    }

    pub fn is_accepted(&self) -> bool {
        self.status == OfferStatus::Accepted
    }
}
