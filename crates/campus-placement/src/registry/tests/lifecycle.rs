use super::common::*;
use crate::registry::domain::{
    ApplicationId, ApplicationStatus, CompanyId, InterviewStatus, OfferId, OfferStatus,
};
use crate::registry::store::{PlacementRegistry, RegistryError};

#[test]
fn apply_creates_applied_application_with_sequential_id() {
    let mut registry = registry();

    let application = registry
        .apply_for_job(&sid("S001"), &jid("J001"))
        .expect("eligible student can apply");

    assert_eq!(application.id, ApplicationId::from("APP0001"));
    assert_eq!(application.status, ApplicationStatus::Applied);
    assert_eq!(application.student_id, sid("S001"));
    assert_eq!(application.job_id, jid("J001"));
}

#[test]
fn second_application_for_same_pair_is_rejected() {
    let mut registry = registry();
    apply(&mut registry, "S001", "J001");

    match registry.apply_for_job(&sid("S001"), &jid("J001")) {
        Err(RegistryError::AlreadyApplied { student_id, job_id }) => {
            assert_eq!(student_id, sid("S001"));
            assert_eq!(job_id, jid("J001"));
        }
        other => panic!("expected duplicate application error, got {other:?}"),
    }
    assert_eq!(registry.applications().len(), 1);
}

#[test]
fn duplicate_check_runs_before_eligibility() {
    let mut registry = registry();
    apply(&mut registry, "S001", "J001");
    registry
        .set_student_cgpa(&sid("S001"), 5.0)
        .expect("student exists");

    assert!(matches!(
        registry.apply_for_job(&sid("S001"), &jid("J001")),
        Err(RegistryError::AlreadyApplied { .. })
    ));
}

#[test]
fn ineligible_student_cannot_apply() {
    let mut registry = registry();

    match registry.apply_for_job(&sid("S002"), &jid("J001")) {
        Err(RegistryError::NotEligible { student_id, .. }) => assert_eq!(student_id, sid("S002")),
        other => panic!("expected eligibility error, got {other:?}"),
    }
    assert!(registry.applications().is_empty());
}

#[test]
fn failed_applications_do_not_consume_ids() {
    let mut registry = registry();
    registry.add_student(student("S003", "CS", 9.1));

    assert!(registry.apply_for_job(&sid("S002"), &jid("J001")).is_err());
    assert_eq!(apply(&mut registry, "S001", "J001"), ApplicationId::from("APP0001"));
    assert!(registry.apply_for_job(&sid("S001"), &jid("J001")).is_err());
    assert_eq!(apply(&mut registry, "S003", "J001"), ApplicationId::from("APP0002"));
}

#[test]
fn apply_reports_unknown_student_and_job() {
    let mut registry = registry();

    assert_eq!(
        registry.apply_for_job(&sid("S404"), &jid("J001")).unwrap_err(),
        RegistryError::StudentNotFound(sid("S404"))
    );
    assert_eq!(
        registry.apply_for_job(&sid("S001"), &jid("J404")).unwrap_err(),
        RegistryError::JobNotFound(jid("J404"))
    );
}

#[test]
fn posting_requires_registered_company() {
    let mut registry = PlacementRegistry::new();

    assert_eq!(
        registry
            .add_job_posting(job_draft("J001", "C404", 6.0, &["CS"]))
            .unwrap_err(),
        RegistryError::CompanyNotFound(CompanyId::from("C404"))
    );
    assert!(registry.jobs().is_empty());
}

#[test]
fn reregistering_replaces_existing_entries() {
    let mut registry = registry();
    registry.add_student(student("S001", "ECE", 6.2));
    registry
        .add_job_posting(job_draft("J001", "C001", 9.5, &["ECE"]))
        .expect("company registered");

    assert_eq!(registry.students().len(), 2);
    assert_eq!(registry.student(&sid("S001")).map(|s| s.department.as_str()), Some("ECE"));
    assert_eq!(registry.jobs().len(), 1);
    assert_eq!(registry.job(&jid("J001")).map(|job| job.min_cgpa), Some(9.5));
}

#[test]
fn student_self_service_updates_profile() {
    let mut registry = registry();

    registry
        .add_student_skill(&sid("S001"), "Rust")
        .expect("student exists");
    registry
        .add_student_skill(&sid("S001"), "Rust")
        .expect("student exists");
    registry
        .set_student_resume(&sid("S001"), "resumes/s001.pdf")
        .expect("student exists");
    let student = registry
        .set_student_cgpa(&sid("S001"), 9.0)
        .expect("student exists");

    assert_eq!(student.skills.len(), 1);
    assert!(student.skills.contains("Rust"));
    assert_eq!(student.resume.as_deref(), Some("resumes/s001.pdf"));
    assert_eq!(student.cgpa, 9.0);

    assert_eq!(
        registry.add_student_skill(&sid("S404"), "Go").unwrap_err(),
        RegistryError::StudentNotFound(sid("S404"))
    );
}

#[test]
fn raising_cgpa_changes_eligible_jobs() {
    let mut registry = registry();
    let before = registry
        .eligible_jobs(registry.student(&sid("S002")).expect("student exists"))
        .len();
    assert_eq!(before, 0);

    registry
        .set_student_cgpa(&sid("S002"), 8.1)
        .expect("student exists");
    let student = registry.student(&sid("S002")).expect("student exists");
    let eligible: Vec<_> = registry
        .eligible_jobs(student)
        .into_iter()
        .map(|job| job.id.clone())
        .collect();
    assert_eq!(eligible, vec![jid("J001")]);
}

#[test]
fn status_updates_are_unrestricted() {
    let mut registry = registry();
    let application_id = apply(&mut registry, "S001", "J001");

    for status in [
        ApplicationStatus::Rejected,
        ApplicationStatus::OnHold,
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
    ] {
        let application = registry
            .update_application_status(&application_id, status)
            .expect("application exists");
        assert_eq!(application.status, status);
    }

    assert_eq!(
        registry
            .update_application_status(&ApplicationId::from("APP9999"), ApplicationStatus::Rejected)
            .unwrap_err(),
        RegistryError::ApplicationNotFound(ApplicationId::from("APP9999"))
    );
}

#[test]
fn scheduling_interview_shortlists_even_rejected_applications() {
    let mut registry = registry();
    let application_id = apply(&mut registry, "S001", "J001");
    registry
        .update_application_status(&application_id, ApplicationStatus::Rejected)
        .expect("application exists");

    let interview = registry
        .schedule_interview(&application_id, interview_request())
        .expect("application exists");
    assert_eq!(interview.id.as_str(), "INT0001");
    assert_eq!(interview.status, InterviewStatus::Scheduled);
    assert_eq!(interview.interview_type, "TECHNICAL");

    let application = registry.application(&application_id).expect("present");
    assert_eq!(application.status, ApplicationStatus::Shortlisted);
}

#[test]
fn multiple_interviews_per_application_are_allowed() {
    let mut registry = registry();
    let application_id = apply(&mut registry, "S001", "J001");

    registry
        .schedule_interview(&application_id, interview_request())
        .expect("first round");
    let mut hr_round = interview_request();
    hr_round.interview_type = "HR".to_string();
    let second = registry
        .schedule_interview(&application_id, hr_round)
        .expect("second round");

    assert_eq!(second.id.as_str(), "INT0002");
    assert_eq!(registry.student_interviews(&sid("S001")).len(), 2);
    assert_eq!(registry.company_interviews(&CompanyId::from("C001")).len(), 2);
    assert!(registry.company_interviews(&CompanyId::from("C002")).is_empty());
}

#[test]
fn scheduling_for_unknown_application_fails_without_consuming_ids() {
    let mut registry = registry();
    assert_eq!(
        registry
            .schedule_interview(&ApplicationId::from("APP0042"), interview_request())
            .unwrap_err(),
        RegistryError::ApplicationNotFound(ApplicationId::from("APP0042"))
    );

    let application_id = apply(&mut registry, "S001", "J001");
    let interview = registry
        .schedule_interview(&application_id, interview_request())
        .expect("application exists");
    assert_eq!(interview.id.as_str(), "INT0001");
}

#[test]
fn offers_ignore_application_status() {
    let mut registry = registry();
    let application_id = apply(&mut registry, "S001", "J001");
    registry
        .update_application_status(&application_id, ApplicationStatus::Rejected)
        .expect("application exists");

    let first = offer(&mut registry, &application_id, 11.0);
    let second = offer(&mut registry, &application_id, 12.5);

    assert_eq!(first, OfferId::from("OFF0001"));
    assert_eq!(second, OfferId::from("OFF0002"));
    let offers = registry.application_offers(&application_id);
    assert_eq!(offers.len(), 2);
    assert!(offers.iter().all(|o| o.status == OfferStatus::Pending));
    assert_eq!(
        registry.application(&application_id).map(|a| a.status),
        Some(ApplicationStatus::Rejected)
    );
}

#[test]
fn offer_for_unknown_application_fails() {
    let mut registry = registry();
    assert_eq!(
        registry
            .make_job_offer(&ApplicationId::from("APP0001"), offer_request(9.0))
            .unwrap_err(),
        RegistryError::ApplicationNotFound(ApplicationId::from("APP0001"))
    );
    assert!(registry.offers().is_empty());
}

#[test]
fn offer_decisions_can_be_revisited() {
    let mut registry = registry();
    let application_id = apply(&mut registry, "S001", "J001");
    let offer_id = offer(&mut registry, &application_id, 12.0);

    assert_eq!(
        registry.accept_offer(&offer_id).expect("offer exists").status,
        OfferStatus::Accepted
    );
    assert_eq!(
        registry.reject_offer(&offer_id).expect("offer exists").status,
        OfferStatus::Rejected
    );
    assert_eq!(
        registry.accept_offer(&offer_id).expect("offer exists").status,
        OfferStatus::Accepted
    );
    assert_eq!(
        registry.reject_offer(&OfferId::from("OFF0404")).unwrap_err(),
        RegistryError::OfferNotFound(OfferId::from("OFF0404"))
    );
}

#[test]
fn per_student_queries_follow_application_links() {
    let mut registry = registry();
    registry.add_student(student("S003", "IT", 9.0));
    let alice = apply(&mut registry, "S001", "J001");
    let carol = apply(&mut registry, "S003", "J001");
    offer(&mut registry, &carol, 14.0);

    assert_eq!(registry.student_applications(&sid("S001")).len(), 1);
    assert_eq!(registry.job_applications(&jid("J001")).len(), 2);
    assert!(registry.student_offers(&sid("S001")).is_empty());
    assert_eq!(registry.student_offers(&sid("S003")).len(), 1);
    assert!(registry.application_offers(&alice).is_empty());
    assert!(registry.student_applications(&sid("S404")).is_empty());
    assert_eq!(
        registry.company_of_application(&carol).map(|c| c.name.as_str()),
        Some("TechCorp")
    );
    assert_eq!(
        registry.student_of_application(&alice).map(|s| s.id.clone()),
        Some(sid("S001"))
    );
}

#[test]
fn skill_gap_resolves_student_and_job() {
    let mut registry = registry();
    registry
        .add_student_skill(&sid("S001"), "Java")
        .expect("student exists");

    let analysis = registry
        .skill_gap(&sid("S001"), &jid("J001"))
        .expect("both exist");
    assert!(analysis.matching.contains("Java"));
    assert!(analysis.missing.contains("SQL"));
    assert!((analysis.match_percentage - 50.0).abs() < f64::EPSILON);

    assert_eq!(
        registry.skill_gap(&sid("S001"), &jid("J404")).unwrap_err(),
        RegistryError::JobNotFound(jid("J404"))
    );
}

#[test]
fn lookups_return_none_for_unknown_ids() {
    let registry = PlacementRegistry::with_sample_data();

    assert!(registry.student(&sid("S001")).is_some());
    assert!(registry.company(&CompanyId::from("C002")).is_some());
    assert!(registry.admin(&"A001".into()).is_some());
    assert!(registry.student(&sid("S999")).is_none());
    assert!(registry.job(&jid("J001")).is_none());
    assert!(registry.application(&ApplicationId::from("APP0001")).is_none());
    assert!(registry.offer(&OfferId::from("OFF0001")).is_none());
    assert!(registry.interview(&"INT0001".into()).is_none());
}
