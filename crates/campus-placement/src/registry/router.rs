use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    Admin, Application, ApplicationId, ApplicationStatus, Company, CompanyId, Interview,
    InterviewRequest, JobId, JobOffer, JobPosting, JobPostingDraft, OfferId, OfferRequest,
    Student, StudentId,
};
use super::eligibility::SkillGapAnalysis;
use super::report::{CompanyHiringSummary, PlacementStatistics};
use super::store::{PlacementRegistry, RegistryError};

/// Registry handle shared by HTTP handlers. Every request holds the lock for the whole
/// operation, so at most one caller touches the registry at a time.
pub type SharedRegistry = Arc<Mutex<PlacementRegistry>>;

pub fn shared(registry: PlacementRegistry) -> SharedRegistry {
    Arc::new(Mutex::new(registry))
}

fn lock(registry: &SharedRegistry) -> MutexGuard<'_, PlacementRegistry> {
    // Operations never leave the registry half-updated, so a poisoned lock is still usable.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

fn owned<T: Clone>(items: Vec<&T>) -> Vec<T> {
    items.into_iter().cloned().collect()
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RegistryError::StudentNotFound(_)
            | RegistryError::CompanyNotFound(_)
            | RegistryError::JobNotFound(_)
            | RegistryError::ApplicationNotFound(_)
            | RegistryError::OfferNotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::AlreadyApplied { .. } => StatusCode::CONFLICT,
            RegistryError::NotEligible { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };

        let payload = json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}

/// Router builder exposing the registry under `/api/v1`.
pub fn placement_router(registry: SharedRegistry) -> Router {
    Router::new()
        .route(
            "/api/v1/students",
            get(list_students).post(register_student),
        )
        .route("/api/v1/students/:student_id", get(student_handler))
        .route("/api/v1/students/:student_id/skills", post(add_skill_handler))
        .route("/api/v1/students/:student_id/resume", put(resume_handler))
        .route("/api/v1/students/:student_id/cgpa", put(cgpa_handler))
        .route(
            "/api/v1/students/:student_id/eligible-jobs",
            get(eligible_jobs_handler),
        )
        .route(
            "/api/v1/students/:student_id/applications",
            get(student_applications_handler),
        )
        .route(
            "/api/v1/students/:student_id/interviews",
            get(student_interviews_handler),
        )
        .route(
            "/api/v1/students/:student_id/offers",
            get(student_offers_handler),
        )
        .route(
            "/api/v1/students/:student_id/skill-gap/:job_id",
            get(skill_gap_handler),
        )
        .route(
            "/api/v1/companies",
            get(list_companies).post(register_company),
        )
        .route("/api/v1/companies/:company_id", get(company_handler))
        .route(
            "/api/v1/companies/:company_id/jobs",
            get(company_jobs_handler),
        )
        .route(
            "/api/v1/companies/:company_id/interviews",
            get(company_interviews_handler),
        )
        .route(
            "/api/v1/companies/:company_id/hiring-summary",
            get(hiring_summary_handler),
        )
        .route("/api/v1/admins", post(register_admin))
        .route("/api/v1/jobs", get(list_jobs).post(post_job_handler))
        .route("/api/v1/jobs/:job_id", get(job_handler))
        .route(
            "/api/v1/jobs/:job_id/applications",
            get(job_applications_handler),
        )
        .route(
            "/api/v1/applications",
            get(list_applications).post(apply_handler),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            put(status_handler),
        )
        .route(
            "/api/v1/applications/:application_id/interviews",
            post(schedule_interview_handler),
        )
        .route(
            "/api/v1/applications/:application_id/offers",
            get(application_offers_handler).post(make_offer_handler),
        )
        .route("/api/v1/offers", get(list_offers))
        .route("/api/v1/offers/:offer_id/accept", post(accept_offer_handler))
        .route("/api/v1/offers/:offer_id/reject", post(reject_offer_handler))
        .route("/api/v1/reports/statistics", get(statistics_handler))
        .route("/api/v1/reports/departments", get(department_report_handler))
        .route("/api/v1/reports/companies", get(company_report_handler))
        .route("/api/v1/reports/unplaced", get(unplaced_handler))
        .with_state(registry)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyRequest {
    pub(crate) student_id: StudentId,
    pub(crate) job_id: JobId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SkillRequest {
    pub(crate) skill: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResumeRequest {
    pub(crate) resume: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CgpaRequest {
    pub(crate) cgpa: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    pub(crate) status: ApplicationStatus,
}

// Students

async fn list_students(State(registry): State<SharedRegistry>) -> Json<Vec<Student>> {
    let registry = lock(&registry);
    Json(owned(registry.students()))
}

pub(crate) async fn register_student(
    State(registry): State<SharedRegistry>,
    Json(student): Json<Student>,
) -> (StatusCode, Json<Student>) {
    lock(&registry).add_student(student.clone());
    (StatusCode::CREATED, Json(student))
}

async fn student_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, RegistryError> {
    let id = StudentId(student_id);
    let registry = lock(&registry);
    registry
        .student(&id)
        .cloned()
        .map(Json)
        .ok_or(RegistryError::StudentNotFound(id))
}

async fn add_skill_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
    Json(request): Json<SkillRequest>,
) -> Result<Json<Student>, RegistryError> {
    let mut registry = lock(&registry);
    let student = registry.add_student_skill(&StudentId(student_id), request.skill)?;
    Ok(Json(student.clone()))
}

async fn resume_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<Student>, RegistryError> {
    let mut registry = lock(&registry);
    let student = registry.set_student_resume(&StudentId(student_id), request.resume)?;
    Ok(Json(student.clone()))
}

async fn cgpa_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
    Json(request): Json<CgpaRequest>,
) -> Result<Json<Student>, RegistryError> {
    let mut registry = lock(&registry);
    let student = registry.set_student_cgpa(&StudentId(student_id), request.cgpa)?;
    Ok(Json(student.clone()))
}

async fn eligible_jobs_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<JobPosting>>, RegistryError> {
    let registry = lock(&registry);
    let id = StudentId(student_id);
    let student = registry
        .student(&id)
        .ok_or_else(|| RegistryError::StudentNotFound(id.clone()))?;
    Ok(Json(owned(registry.eligible_jobs(student))))
}

async fn student_applications_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
) -> Json<Vec<Application>> {
    let registry = lock(&registry);
    Json(owned(registry.student_applications(&StudentId(student_id))))
}

async fn student_interviews_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
) -> Json<Vec<Interview>> {
    let registry = lock(&registry);
    Json(owned(registry.student_interviews(&StudentId(student_id))))
}

async fn student_offers_handler(
    State(registry): State<SharedRegistry>,
    Path(student_id): Path<String>,
) -> Json<Vec<JobOffer>> {
    let registry = lock(&registry);
    Json(owned(registry.student_offers(&StudentId(student_id))))
}

async fn skill_gap_handler(
    State(registry): State<SharedRegistry>,
    Path((student_id, job_id)): Path<(String, String)>,
) -> Result<Json<SkillGapAnalysis>, RegistryError> {
    let analysis = lock(&registry).skill_gap(&StudentId(student_id), &JobId(job_id))?;
    Ok(Json(analysis))
}

// Companies and admins

async fn list_companies(State(registry): State<SharedRegistry>) -> Json<Vec<Company>> {
    let registry = lock(&registry);
    Json(owned(registry.companies()))
}

async fn register_company(
    State(registry): State<SharedRegistry>,
    Json(company): Json<Company>,
) -> (StatusCode, Json<Company>) {
    lock(&registry).add_company(company.clone());
    (StatusCode::CREATED, Json(company))
}

async fn company_handler(
    State(registry): State<SharedRegistry>,
    Path(company_id): Path<String>,
) -> Result<Json<Company>, RegistryError> {
    let id = CompanyId(company_id);
    let registry = lock(&registry);
    registry
        .company(&id)
        .cloned()
        .map(Json)
        .ok_or(RegistryError::CompanyNotFound(id))
}

async fn company_jobs_handler(
    State(registry): State<SharedRegistry>,
    Path(company_id): Path<String>,
) -> Json<Vec<JobPosting>> {
    let registry = lock(&registry);
    Json(owned(registry.company_jobs(&CompanyId(company_id))))
}

async fn company_interviews_handler(
    State(registry): State<SharedRegistry>,
    Path(company_id): Path<String>,
) -> Json<Vec<Interview>> {
    let registry = lock(&registry);
    Json(owned(registry.company_interviews(&CompanyId(company_id))))
}

async fn hiring_summary_handler(
    State(registry): State<SharedRegistry>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyHiringSummary>, RegistryError> {
    let summary = lock(&registry).company_hiring_summary(&CompanyId(company_id))?;
    Ok(Json(summary))
}

async fn register_admin(
    State(registry): State<SharedRegistry>,
    Json(admin): Json<Admin>,
) -> (StatusCode, Json<Admin>) {
    lock(&registry).add_admin(admin.clone());
    (StatusCode::CREATED, Json(admin))
}

// Jobs

async fn list_jobs(State(registry): State<SharedRegistry>) -> Json<Vec<JobPosting>> {
    let registry = lock(&registry);
    Json(owned(registry.jobs()))
}

async fn post_job_handler(
    State(registry): State<SharedRegistry>,
    Json(draft): Json<JobPostingDraft>,
) -> Result<(StatusCode, Json<JobPosting>), RegistryError> {
    let mut registry = lock(&registry);
    let job = registry.add_job_posting(draft)?;
    Ok((StatusCode::CREATED, Json(job.clone())))
}

async fn job_handler(
    State(registry): State<SharedRegistry>,
    Path(job_id): Path<String>,
) -> Result<Json<JobPosting>, RegistryError> {
    let id = JobId(job_id);
    let registry = lock(&registry);
    registry
        .job(&id)
        .cloned()
        .map(Json)
        .ok_or(RegistryError::JobNotFound(id))
}

async fn job_applications_handler(
    State(registry): State<SharedRegistry>,
    Path(job_id): Path<String>,
) -> Json<Vec<Application>> {
    let registry = lock(&registry);
    Json(owned(registry.job_applications(&JobId(job_id))))
}

// Applications, interviews, offers

async fn list_applications(State(registry): State<SharedRegistry>) -> Json<Vec<Application>> {
    let registry = lock(&registry);
    Json(owned(registry.applications()))
}

pub(crate) async fn apply_handler(
    State(registry): State<SharedRegistry>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Application>), RegistryError> {
    let mut registry = lock(&registry);
    let application = registry.apply_for_job(&request.student_id, &request.job_id)?;
    Ok((StatusCode::CREATED, Json(application.clone())))
}

async fn application_handler(
    State(registry): State<SharedRegistry>,
    Path(application_id): Path<String>,
) -> Result<Json<Application>, RegistryError> {
    let id = ApplicationId(application_id);
    let registry = lock(&registry);
    registry
        .application(&id)
        .cloned()
        .map(Json)
        .ok_or(RegistryError::ApplicationNotFound(id))
}

async fn status_handler(
    State(registry): State<SharedRegistry>,
    Path(application_id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Application>, RegistryError> {
    let mut registry = lock(&registry);
    let application =
        registry.update_application_status(&ApplicationId(application_id), request.status)?;
    Ok(Json(application.clone()))
}

async fn schedule_interview_handler(
    State(registry): State<SharedRegistry>,
    Path(application_id): Path<String>,
    Json(request): Json<InterviewRequest>,
) -> Result<(StatusCode, Json<Interview>), RegistryError> {
    let mut registry = lock(&registry);
    let interview = registry.schedule_interview(&ApplicationId(application_id), request)?;
    Ok((StatusCode::CREATED, Json(interview.clone())))
}

async fn application_offers_handler(
    State(registry): State<SharedRegistry>,
    Path(application_id): Path<String>,
) -> Json<Vec<JobOffer>> {
    let registry = lock(&registry);
    Json(owned(registry.application_offers(&ApplicationId(application_id))))
}

async fn make_offer_handler(
    State(registry): State<SharedRegistry>,
    Path(application_id): Path<String>,
    Json(request): Json<OfferRequest>,
) -> Result<(StatusCode, Json<JobOffer>), RegistryError> {
    let mut registry = lock(&registry);
    let offer = registry.make_job_offer(&ApplicationId(application_id), request)?;
    Ok((StatusCode::CREATED, Json(offer.clone())))
}

async fn list_offers(State(registry): State<SharedRegistry>) -> Json<Vec<JobOffer>> {
    let registry = lock(&registry);
    Json(owned(registry.offers()))
}

async fn accept_offer_handler(
    State(registry): State<SharedRegistry>,
    Path(offer_id): Path<String>,
) -> Result<Json<JobOffer>, RegistryError> {
    let mut registry = lock(&registry);
    let offer = registry.accept_offer(&OfferId(offer_id))?;
    Ok(Json(offer.clone()))
}

async fn reject_offer_handler(
    State(registry): State<SharedRegistry>,
    Path(offer_id): Path<String>,
) -> Result<Json<JobOffer>, RegistryError> {
    let mut registry = lock(&registry);
    let offer = registry.reject_offer(&OfferId(offer_id))?;
    Ok(Json(offer.clone()))
}

// Reports

async fn statistics_handler(State(registry): State<SharedRegistry>) -> Json<PlacementStatistics> {
    let registry = lock(&registry);
    Json(registry.placement_statistics())
}

async fn department_report_handler(
    State(registry): State<SharedRegistry>,
) -> Json<BTreeMap<String, usize>> {
    let registry = lock(&registry);
    Json(registry.department_wise_placement())
}

async fn company_report_handler(
    State(registry): State<SharedRegistry>,
) -> Json<BTreeMap<String, usize>> {
    let registry = lock(&registry);
    Json(registry.company_wise_hiring())
}

async fn unplaced_handler(State(registry): State<SharedRegistry>) -> Json<Vec<Student>> {
    let registry = lock(&registry);
    Json(owned(registry.unplaced_students()))
}
