use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::Local;
use tracing::{debug, info};

use super::domain::{
    Admin, AdminId, Application, ApplicationId, ApplicationStatus, Company, CompanyId, Interview,
    InterviewId, InterviewRequest, JobId, JobOffer, JobPosting, JobPostingDraft, OfferId,
    OfferRequest, Student, StudentId,
};
use super::eligibility::SkillGapAnalysis;
use super::sequence::IdSequence;

/// Failures surfaced by registry operations. None of them are fatal; callers decide how to report
/// them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("company {0} not found")]
    CompanyNotFound(CompanyId),
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error("offer {0} not found")]
    OfferNotFound(OfferId),
    #[error("student {student_id} already applied for job {job_id}")]
    AlreadyApplied { student_id: StudentId, job_id: JobId },
    #[error("student {student_id} does not meet the eligibility criteria for job {job_id}")]
    NotEligible { student_id: StudentId, job_id: JobId },
}

/// Single owner of every placement entity.
///
/// Cross references (application to student and job, interview and offer to application) are
/// stored as ids and resolved against these tables on demand. Every query is a fresh scan; nothing
/// derived is cached.
#[derive(Debug, Clone)]
pub struct PlacementRegistry {
    pub(crate) students: BTreeMap<StudentId, Student>,
    pub(crate) companies: BTreeMap<CompanyId, Company>,
    pub(crate) admins: BTreeMap<AdminId, Admin>,
    pub(crate) jobs: BTreeMap<JobId, JobPosting>,
    pub(crate) applications: BTreeMap<ApplicationId, Application>,
    pub(crate) interviews: BTreeMap<InterviewId, Interview>,
    pub(crate) offers: BTreeMap<OfferId, JobOffer>,
    application_ids: IdSequence,
    interview_ids: IdSequence,
    offer_ids: IdSequence,
}

impl Default for PlacementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self {
            students: BTreeMap::new(),
            companies: BTreeMap::new(),
            admins: BTreeMap::new(),
            jobs: BTreeMap::new(),
            applications: BTreeMap::new(),
            interviews: BTreeMap::new(),
            offers: BTreeMap::new(),
            application_ids: IdSequence::new("APP"),
            interview_ids: IdSequence::new("INT"),
            offer_ids: IdSequence::new("OFF"),
        }
    }

    // Registration. Re-registering an id replaces the previous entry.

    pub fn add_student(&mut self, student: Student) {
        info!(student_id = %student.id, department = %student.department, "student registered");
        self.students.insert(student.id.clone(), student);
    }

    pub fn add_company(&mut self, company: Company) {
        info!(company_id = %company.id, "company registered");
        self.companies.insert(company.id.clone(), company);
    }

    pub fn add_admin(&mut self, admin: Admin) {
        info!(admin_id = %admin.id, "admin registered");
        self.admins.insert(admin.id.clone(), admin);
    }

    /// Posts a job for an already registered company, stamping today's date.
    pub fn add_job_posting(&mut self, draft: JobPostingDraft) -> Result<&JobPosting, RegistryError> {
        if !self.companies.contains_key(&draft.company_id) {
            return Err(RegistryError::CompanyNotFound(draft.company_id));
        }

        let job = JobPosting::from_draft(draft, Local::now().date_naive());
        info!(job_id = %job.id, company_id = %job.company_id, "job posted");

        let posting = match self.jobs.entry(job.id.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(job);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(job),
        };
        Ok(posting)
    }

    // Student self-service.

    pub fn add_student_skill(
        &mut self,
        student_id: &StudentId,
        skill: impl Into<String>,
    ) -> Result<&Student, RegistryError> {
        let student = self.student_mut(student_id)?;
        student.add_skill(skill);
        debug!(%student_id, "student skill added");
        Ok(&*student)
    }

    pub fn set_student_resume(
        &mut self,
        student_id: &StudentId,
        resume: impl Into<String>,
    ) -> Result<&Student, RegistryError> {
        let student = self.student_mut(student_id)?;
        student.set_resume(resume);
        debug!(%student_id, "student resume updated");
        Ok(&*student)
    }

    pub fn set_student_cgpa(
        &mut self,
        student_id: &StudentId,
        cgpa: f64,
    ) -> Result<&Student, RegistryError> {
        let student = self.student_mut(student_id)?;
        student.set_cgpa(cgpa);
        debug!(%student_id, cgpa, "student cgpa updated");
        Ok(&*student)
    }

    fn student_mut(&mut self, student_id: &StudentId) -> Result<&mut Student, RegistryError> {
        self.students
            .get_mut(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.clone()))
    }

    // Lookups.

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn company(&self, id: &CompanyId) -> Option<&Company> {
        self.companies.get(id)
    }

    pub fn admin(&self, id: &AdminId) -> Option<&Admin> {
        self.admins.get(id)
    }

    pub fn job(&self, id: &JobId) -> Option<&JobPosting> {
        self.jobs.get(id)
    }

    pub fn application(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.get(id)
    }

    pub fn interview(&self, id: &InterviewId) -> Option<&Interview> {
        self.interviews.get(id)
    }

    pub fn offer(&self, id: &OfferId) -> Option<&JobOffer> {
        self.offers.get(id)
    }

    pub fn students(&self) -> Vec<&Student> {
        self.students.values().collect()
    }

    pub fn companies(&self) -> Vec<&Company> {
        self.companies.values().collect()
    }

    pub fn jobs(&self) -> Vec<&JobPosting> {
        self.jobs.values().collect()
    }

    pub fn applications(&self) -> Vec<&Application> {
        self.applications.values().collect()
    }

    pub fn interviews(&self) -> Vec<&Interview> {
        self.interviews.values().collect()
    }

    pub fn offers(&self) -> Vec<&JobOffer> {
        self.offers.values().collect()
    }

    // Matching.

    pub fn company_jobs(&self, company_id: &CompanyId) -> Vec<&JobPosting> {
        self.jobs
            .values()
            .filter(|job| &job.company_id == company_id)
            .collect()
    }

    pub fn eligible_jobs(&self, student: &Student) -> Vec<&JobPosting> {
        self.jobs
            .values()
            .filter(|job| job.is_eligible(student))
            .collect()
    }

    pub fn skill_gap(
        &self,
        student_id: &StudentId,
        job_id: &JobId,
    ) -> Result<SkillGapAnalysis, RegistryError> {
        let student = self
            .student(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.clone()))?;
        let job = self
            .job(job_id)
            .ok_or_else(|| RegistryError::JobNotFound(job_id.clone()))?;
        Ok(SkillGapAnalysis::between(student, job))
    }

    // Applications.

    /// Files an application in `APPLIED` status.
    ///
    /// The duplicate check runs before the eligibility check, so a student who already applied
    /// and has since become ineligible still sees `AlreadyApplied`.
    pub fn apply_for_job(
        &mut self,
        student_id: &StudentId,
        job_id: &JobId,
    ) -> Result<&Application, RegistryError> {
        let student = self
            .students
            .get(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.clone()))?;
        let job = self
            .jobs
            .get(job_id)
            .ok_or_else(|| RegistryError::JobNotFound(job_id.clone()))?;

        let duplicate = self
            .applications
            .values()
            .any(|application| &application.student_id == student_id && &application.job_id == job_id);
        if duplicate {
            return Err(RegistryError::AlreadyApplied {
                student_id: student_id.clone(),
                job_id: job_id.clone(),
            });
        }

        if !job.is_eligible(student) {
            return Err(RegistryError::NotEligible {
                student_id: student_id.clone(),
                job_id: job_id.clone(),
            });
        }

        let id = ApplicationId(self.application_ids.next_id());
        let application = Application::new(id.clone(), student_id.clone(), job_id.clone());
        info!(application_id = %id, %student_id, %job_id, "application submitted");

        Ok(self.applications.entry(id).or_insert(application))
    }

    pub fn student_applications(&self, student_id: &StudentId) -> Vec<&Application> {
        self.applications
            .values()
            .filter(|application| &application.student_id == student_id)
            .collect()
    }

    pub fn job_applications(&self, job_id: &JobId) -> Vec<&Application> {
        self.applications
            .values()
            .filter(|application| &application.job_id == job_id)
            .collect()
    }

    /// Overwrites the status unconditionally; backward transitions are allowed.
    pub fn update_application_status(
        &mut self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<&Application, RegistryError> {
        let application = self.application_mut(application_id)?;
        let previous = application.status;
        application.status = status;
        info!(%application_id, from = %previous, to = %status, "application status updated");
        Ok(&*application)
    }

    fn application_mut(
        &mut self,
        application_id: &ApplicationId,
    ) -> Result<&mut Application, RegistryError> {
        self.applications
            .get_mut(application_id)
            .ok_or_else(|| RegistryError::ApplicationNotFound(application_id.clone()))
    }

    // Interviews.

    /// Books an interview and moves the application to `SHORTLISTED`, whatever its prior status.
    /// Slots are not checked for overlaps.
    pub fn schedule_interview(
        &mut self,
        application_id: &ApplicationId,
        request: InterviewRequest,
    ) -> Result<&Interview, RegistryError> {
        let application = self.application_mut(application_id)?;
        application.status = ApplicationStatus::Shortlisted;

        let id = InterviewId(self.interview_ids.next_id());
        let interview = Interview::new(id.clone(), application_id.clone(), request);
        info!(
            interview_id = %id,
            %application_id,
            interview_type = %interview.interview_type,
            "interview scheduled"
        );

        Ok(self.interviews.entry(id).or_insert(interview))
    }

    pub fn student_interviews(&self, student_id: &StudentId) -> Vec<&Interview> {
        self.interviews
            .values()
            .filter(|interview| {
                self.applications
                    .get(&interview.application_id)
                    .is_some_and(|application| &application.student_id == student_id)
            })
            .collect()
    }

    pub fn company_interviews(&self, company_id: &CompanyId) -> Vec<&Interview> {
        self.interviews
            .values()
            .filter(|interview| {
                self.company_of_application(&interview.application_id)
                    .is_some_and(|company| &company.id == company_id)
            })
            .collect()
    }

    // Offers.

    /// Issues a `PENDING` offer. The application may be in any status and may already hold
    /// other offers.
    pub fn make_job_offer(
        &mut self,
        application_id: &ApplicationId,
        request: OfferRequest,
    ) -> Result<&JobOffer, RegistryError> {
        if !self.applications.contains_key(application_id) {
            return Err(RegistryError::ApplicationNotFound(application_id.clone()));
        }

        let id = OfferId(self.offer_ids.next_id());
        let offer = JobOffer::new(id.clone(), application_id.clone(), request);
        info!(offer_id = %id, %application_id, package_lpa = offer.package_lpa, "offer issued");

        Ok(self.offers.entry(id).or_insert(offer))
    }

    pub fn accept_offer(&mut self, offer_id: &OfferId) -> Result<&JobOffer, RegistryError> {
        let offer = self.offer_mut(offer_id)?;
        offer.accept();
        info!(%offer_id, "offer accepted");
        Ok(&*offer)
    }

    pub fn reject_offer(&mut self, offer_id: &OfferId) -> Result<&JobOffer, RegistryError> {
        let offer = self.offer_mut(offer_id)?;
        offer.reject();
        info!(%offer_id, "offer rejected");
        Ok(&*offer)
    }

    fn offer_mut(&mut self, offer_id: &OfferId) -> Result<&mut JobOffer, RegistryError> {
        self.offers
            .get_mut(offer_id)
            .ok_or_else(|| RegistryError::OfferNotFound(offer_id.clone()))
    }

    pub fn student_offers(&self, student_id: &StudentId) -> Vec<&JobOffer> {
        self.offers
            .values()
            .filter(|offer| {
                self.applications
                    .get(&offer.application_id)
                    .is_some_and(|application| &application.student_id == student_id)
            })
            .collect()
    }

    pub fn application_offers(&self, application_id: &ApplicationId) -> Vec<&JobOffer> {
        self.offers
            .values()
            .filter(|offer| &offer.application_id == application_id)
            .collect()
    }

    // Resolution helpers for presentation layers.

    pub fn job_of_application(&self, application_id: &ApplicationId) -> Option<&JobPosting> {
        self.applications
            .get(application_id)
            .and_then(|application| self.jobs.get(&application.job_id))
    }

    pub fn company_of_application(&self, application_id: &ApplicationId) -> Option<&Company> {
        self.job_of_application(application_id)
            .and_then(|job| self.companies.get(&job.company_id))
    }

    pub fn student_of_application(&self, application_id: &ApplicationId) -> Option<&Student> {
        self.applications
            .get(application_id)
            .and_then(|application| self.students.get(&application.student_id))
    }
}
