use campus_placement::error::AppError;
use campus_placement::registry::{
    CompanyId, InterviewRequest, JobId, JobPostingDraft, OfferRequest, PlacementRegistry,
    PlacementStatistics, StudentId,
};

/// Runs one placement drive on the sample roster: Alice applies, is interviewed, accepts an
/// offer, and the report reflects it.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let mut registry = PlacementRegistry::with_sample_data();
    let student_id = StudentId::from("S001");
    let job_id = JobId::from("J001");

    println!("Campus placement demo");

    let job = registry.add_job_posting(JobPostingDraft {
        id: job_id.clone(),
        title: "Software Engineer".to_string(),
        description: "Backend platform team".to_string(),
        company_id: CompanyId::from("C001"),
        package_lpa: 12.0,
        location: "Bengaluru".to_string(),
        min_cgpa: 7.5,
        eligible_departments: ["CS", "IT"].into_iter().map(String::from).collect(),
        required_skills: ["Java", "Spring", "SQL"]
            .into_iter()
            .map(String::from)
            .collect(),
    })?;
    println!(
        "  Posted {} ({}) at {:.1} LPA, min CGPA {:.1}",
        job.id, job.title, job.package_lpa, job.min_cgpa
    );

    let gap = registry.skill_gap(&student_id, &job_id)?;
    println!(
        "  Skill match for {}: {:.1}% (missing: {})",
        student_id,
        gap.match_percentage,
        gap.missing.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    for training in gap.recommended_training() {
        println!("    - {}", training);
    }

    let application_id = registry.apply_for_job(&student_id, &job_id)?.id.clone();
    println!("  Application {} submitted", application_id);

    match registry.apply_for_job(&student_id, &job_id) {
        Ok(_) => println!("  Duplicate application unexpectedly accepted"),
        Err(err) => println!("  Second application refused: {}", err),
    }
    match registry.apply_for_job(&StudentId::from("S002"), &job_id) {
        Ok(application) => println!("  {} applied as {}", application.student_id, application.id),
        Err(err) => println!("  S002 refused: {}", err),
    }

    let interview = registry.schedule_interview(
        &application_id,
        InterviewRequest {
            date: "2025-01-20".to_string(),
            time: "10:00".to_string(),
            location: "Placement Cell".to_string(),
            interview_type: "TECHNICAL".to_string(),
        },
    )?;
    println!(
        "  Interview {} on {} {} ({})",
        interview.id, interview.date, interview.time, interview.interview_type
    );
    if let Some(application) = registry.application(&application_id) {
        println!("  Application status: {}", application.status);
    }

    let offer_id = registry
        .make_job_offer(
            &application_id,
            OfferRequest {
                package_lpa: 12.0,
                joining_date: "2025-07-01".to_string(),
                details: "Joining bonus included".to_string(),
            },
        )?
        .id
        .clone();
    let offer = registry.accept_offer(&offer_id)?;
    println!("  Offer {} {}", offer.id, offer.status);

    render_statistics(&registry.placement_statistics());

    println!("\nDepartment-wise placements");
    for (department, placed) in registry.department_wise_placement() {
        println!("  {}: {}", department, placed);
    }
    println!("\nCompany-wise hiring");
    for (company, hired) in registry.company_wise_hiring() {
        println!("  {}: {}", company, hired);
    }
    println!("\nUnplaced students");
    for student in registry.unplaced_students() {
        println!("  {} {} ({})", student.id, student.name, student.department);
    }

    Ok(())
}

fn render_statistics(stats: &PlacementStatistics) {
    println!("\nPlacement statistics");
    println!(
        "  Placed {}/{} students ({:.2}%)",
        stats.placed_students, stats.total_students, stats.placement_percentage
    );
    println!(
        "  Average package {:.2} LPA, highest {:.2} LPA",
        stats.average_package, stats.highest_package
    );
    println!(
        "  {} job(s), {} application(s), {} offer(s), {} accepted",
        stats.total_jobs, stats.total_applications, stats.total_offers, stats.accepted_offers
    );
}
