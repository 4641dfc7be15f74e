use crate::infra::bootstrap_registry;
use campus_placement::config::AppConfig;
use campus_placement::error::AppError;
use campus_placement::registry::{
    AdminId, ApplicationId, ApplicationStatus, Company, CompanyId, InterviewRequest, JobId,
    JobPostingDraft, OfferId, OfferRequest, OfferStatus, PlacementRegistry, Student, StudentId,
};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info};

pub(crate) fn run_console(config: &AppConfig) -> Result<(), AppError> {
    let mut registry = bootstrap_registry(&config.placement);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&mut registry, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Session {
    Student(StudentId),
    Company(CompanyId),
    Admin(AdminId),
}

/// Menu-driven front end over a registry. Input and output are generic so scripted sessions
/// can drive it.
struct Console<'a, R, W> {
    registry: &'a mut PlacementRegistry,
    input: R,
    output: W,
    session: Option<Session>,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    fn new(registry: &'a mut PlacementRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
            session: None,
        }
    }

    /// Runs until the user exits or input ends.
    fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "=== Campus Placement & Career Services ===")?;
        match self.menu_loop() {
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("console input closed");
                writeln!(self.output)?;
            }
            other => other?,
        }
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    fn menu_loop(&mut self) -> io::Result<()> {
        loop {
            let keep_going = match self.session.clone() {
                None => self.login_menu()?,
                Some(Session::Student(id)) => self.student_menu(&id)?,
                Some(Session::Company(id)) => self.company_menu(&id)?,
                Some(Session::Admin(id)) => self.admin_menu(&id)?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    // Input helpers.

    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "console input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> io::Result<T> {
        loop {
            let raw = self.prompt(label)?;
            match raw.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn choice(&mut self) -> io::Result<u32> {
        self.prompt_parsed("Enter choice: ")
    }

    fn logout(&mut self) -> io::Result<bool> {
        info!(session = ?self.session, "logged out");
        self.session = None;
        writeln!(self.output, "Logged out.")?;
        Ok(true)
    }

    // Login.

    fn login_menu(&mut self) -> io::Result<bool> {
        writeln!(self.output, "\n1. Student Login")?;
        writeln!(self.output, "2. Company Login")?;
        writeln!(self.output, "3. Admin Login")?;
        writeln!(self.output, "4. Exit")?;

        match self.choice()? {
            1 => {
                let id = StudentId::new(self.prompt("Student ID: ")?);
                match self.registry.student(&id) {
                    Some(student) => {
                        writeln!(self.output, "Welcome, {}!", student.name)?;
                        self.session = Some(Session::Student(id));
                    }
                    None => writeln!(self.output, "Student not found.")?,
                }
            }
            2 => {
                let id = CompanyId::new(self.prompt("Company ID: ")?);
                match self.registry.company(&id) {
                    Some(company) => {
                        writeln!(self.output, "Welcome, {}!", company.name)?;
                        self.session = Some(Session::Company(id));
                    }
                    None => writeln!(self.output, "Company not found.")?,
                }
            }
            3 => {
                let id = AdminId::new(self.prompt("Admin ID: ")?);
                match self.registry.admin(&id) {
                    Some(admin) => {
                        writeln!(self.output, "Welcome, {}!", admin.name)?;
                        self.session = Some(Session::Admin(id));
                    }
                    None => writeln!(self.output, "Admin not found.")?,
                }
            }
            4 => return Ok(false),
            _ => writeln!(self.output, "Invalid choice.")?,
        }
        Ok(true)
    }

    // Student menu.

    fn student_menu(&mut self, id: &StudentId) -> io::Result<bool> {
        writeln!(self.output, "\n--- Student Menu ---")?;
        writeln!(self.output, "1. View Profile")?;
        writeln!(self.output, "2. Update Profile")?;
        writeln!(self.output, "3. View Eligible Jobs")?;
        writeln!(self.output, "4. Apply for Job")?;
        writeln!(self.output, "5. View My Applications")?;
        writeln!(self.output, "6. View Interviews")?;
        writeln!(self.output, "7. View Offers")?;
        writeln!(self.output, "8. Skill Gap Analysis")?;
        writeln!(self.output, "9. Logout")?;

        match self.choice()? {
            1 => self.show_student_profile(id)?,
            2 => self.update_student_profile(id)?,
            3 => self.show_eligible_jobs(id)?,
            4 => {
                let job_id = JobId::new(self.prompt("Job ID: ")?);
                match self.registry.apply_for_job(id, &job_id) {
                    Ok(application) => writeln!(
                        self.output,
                        "Application {} submitted.",
                        application.id
                    )?,
                    Err(err) => writeln!(self.output, "Could not apply: {err}")?,
                }
            }
            5 => self.show_student_applications(id)?,
            6 => self.show_student_interviews(id)?,
            7 => self.review_offers(id)?,
            8 => {
                let job_id = JobId::new(self.prompt("Job ID: ")?);
                self.show_skill_gap(id, &job_id)?;
            }
            9 => return self.logout(),
            _ => writeln!(self.output, "Invalid choice.")?,
        }
        Ok(true)
    }

    fn show_student_profile(&mut self, id: &StudentId) -> io::Result<()> {
        let Some(student) = self.registry.student(id) else {
            return writeln!(self.output, "Student not found.");
        };
        writeln!(self.output, "ID: {}", student.id)?;
        writeln!(self.output, "Name: {}", student.name)?;
        writeln!(self.output, "Email: {}", student.email)?;
        writeln!(self.output, "Department: {}", student.department)?;
        writeln!(self.output, "CGPA: {:.2}", student.cgpa)?;
        writeln!(self.output, "Graduation Year: {}", student.graduation_year)?;
        writeln!(self.output, "Skills: {}", join(&student.skills))?;
        writeln!(
            self.output,
            "Resume: {}",
            student.resume.as_deref().unwrap_or("not uploaded")
        )
    }

    fn update_student_profile(&mut self, id: &StudentId) -> io::Result<()> {
        writeln!(self.output, "1. Add Skill")?;
        writeln!(self.output, "2. Update Resume")?;
        writeln!(self.output, "3. Update CGPA")?;

        let result = match self.choice()? {
            1 => {
                let skill = self.prompt("Skill: ")?;
                if skill.is_empty() {
                    return writeln!(self.output, "Skill cannot be empty.");
                }
                self.registry.add_student_skill(id, skill)
            }
            2 => {
                let resume = self.prompt("Resume path: ")?;
                self.registry.set_student_resume(id, resume)
            }
            3 => {
                let cgpa: f64 = self.prompt_parsed("New CGPA: ")?;
                self.registry.set_student_cgpa(id, cgpa)
            }
            _ => return writeln!(self.output, "Invalid choice."),
        };

        match result {
            Ok(_) => writeln!(self.output, "Profile updated."),
            Err(err) => writeln!(self.output, "Could not update profile: {err}"),
        }
    }

    fn show_eligible_jobs(&mut self, id: &StudentId) -> io::Result<()> {
        let Some(student) = self.registry.student(id) else {
            return writeln!(self.output, "Student not found.");
        };
        let jobs = self.registry.eligible_jobs(student);
        if jobs.is_empty() {
            return writeln!(self.output, "No eligible jobs right now.");
        }
        for job in jobs {
            let company = self
                .registry
                .company(&job.company_id)
                .map(|company| company.name.as_str())
                .unwrap_or("unknown company");
            writeln!(
                self.output,
                "{} | {} at {} | {:.1} LPA | {} | min CGPA {:.1}",
                job.id, job.title, company, job.package_lpa, job.location, job.min_cgpa
            )?;
        }
        Ok(())
    }

    fn show_student_applications(&mut self, id: &StudentId) -> io::Result<()> {
        let applications = self.registry.student_applications(id);
        if applications.is_empty() {
            return writeln!(self.output, "No applications yet.");
        }
        for application in applications {
            let title = self
                .registry
                .job(&application.job_id)
                .map(|job| job.title.as_str())
                .unwrap_or("unknown job");
            writeln!(
                self.output,
                "{} | {} ({}) | {} | applied {}",
                application.id,
                title,
                application.job_id,
                application.status,
                application.applied_at.format("%Y-%m-%d %H:%M")
            )?;
        }
        Ok(())
    }

    fn show_student_interviews(&mut self, id: &StudentId) -> io::Result<()> {
        let interviews = self.registry.student_interviews(id);
        if interviews.is_empty() {
            return writeln!(self.output, "No interviews scheduled.");
        }
        for interview in interviews {
            writeln!(
                self.output,
                "{} | {} {} | {} | {} | {}",
                interview.id,
                interview.date,
                interview.time,
                interview.location,
                interview.interview_type,
                interview.status
            )?;
        }
        Ok(())
    }

    fn review_offers(&mut self, id: &StudentId) -> io::Result<()> {
        let offers: Vec<(OfferId, OfferStatus, String)> = self
            .registry
            .student_offers(id)
            .into_iter()
            .map(|offer| {
                let company = self
                    .registry
                    .company_of_application(&offer.application_id)
                    .map(|company| company.name.clone())
                    .unwrap_or_else(|| "unknown company".to_string());
                let line = format!(
                    "{} | {} | {:.1} LPA | joining {} | {}",
                    offer.id, company, offer.package_lpa, offer.joining_date, offer.status
                );
                (offer.id.clone(), offer.status, line)
            })
            .collect();

        if offers.is_empty() {
            return writeln!(self.output, "No offers yet.");
        }

        for (offer_id, status, line) in offers {
            writeln!(self.output, "{line}")?;
            if status != OfferStatus::Pending {
                continue;
            }
            let answer = self.prompt("Accept this offer? (Y/N): ")?;
            let decision = if answer.eq_ignore_ascii_case("y") {
                self.registry.accept_offer(&offer_id)
            } else if answer.eq_ignore_ascii_case("n") {
                self.registry.reject_offer(&offer_id)
            } else {
                writeln!(self.output, "Offer left pending.")?;
                continue;
            };
            match decision {
                Ok(offer) => writeln!(self.output, "Offer {} is now {}.", offer.id, offer.status)?,
                Err(err) => writeln!(self.output, "Could not update offer: {err}")?,
            }
        }
        Ok(())
    }

    fn show_skill_gap(&mut self, id: &StudentId, job_id: &JobId) -> io::Result<()> {
        let analysis = match self.registry.skill_gap(id, job_id) {
            Ok(analysis) => analysis,
            Err(err) => return writeln!(self.output, "Skill gap unavailable: {err}"),
        };
        writeln!(self.output, "Required skills: {}", join(&analysis.required))?;
        writeln!(self.output, "Matching skills: {}", join(&analysis.matching))?;
        writeln!(self.output, "Missing skills: {}", join(&analysis.missing))?;
        writeln!(self.output, "Match: {:.1}%", analysis.match_percentage)?;
        if analysis.is_complete_match() {
            return writeln!(self.output, "You have every required skill.");
        }
        writeln!(self.output, "Recommended training:")?;
        for training in analysis.recommended_training() {
            writeln!(self.output, "  - {training}")?;
        }
        Ok(())
    }

    // Company menu.

    fn company_menu(&mut self, id: &CompanyId) -> io::Result<bool> {
        writeln!(self.output, "\n--- Company Menu ---")?;
        writeln!(self.output, "1. View Profile")?;
        writeln!(self.output, "2. Post Job")?;
        writeln!(self.output, "3. View Posted Jobs")?;
        writeln!(self.output, "4. View Applications for Job")?;
        writeln!(self.output, "5. Schedule Interview")?;
        writeln!(self.output, "6. Update Application Status")?;
        writeln!(self.output, "7. Make Job Offer")?;
        writeln!(self.output, "8. Hiring Summary")?;
        writeln!(self.output, "9. Logout")?;

        match self.choice()? {
            1 => {
                if let Some(company) = self.registry.company(id) {
                    writeln!(self.output, "ID: {}", company.id)?;
                    writeln!(self.output, "Name: {}", company.name)?;
                    writeln!(self.output, "Email: {}", company.email)?;
                    writeln!(self.output, "Industry: {}", company.industry)?;
                }
            }
            2 => self.post_job(id)?,
            3 => self.show_company_jobs(id)?,
            4 => self.show_job_applications(id)?,
            5 => self.schedule_interview(id)?,
            6 => self.update_application_status(id)?,
            7 => self.make_offer(id)?,
            8 => match self.registry.company_hiring_summary(id) {
                Ok(summary) => {
                    writeln!(self.output, "Jobs posted: {}", summary.jobs_posted)?;
                    writeln!(
                        self.output,
                        "Applications received: {}",
                        summary.applications_received
                    )?;
                    writeln!(self.output, "Offers made: {}", summary.offers_made)?;
                    writeln!(self.output, "Offers accepted: {}", summary.offers_accepted)?;
                }
                Err(err) => writeln!(self.output, "Summary unavailable: {err}")?,
            },
            9 => return self.logout(),
            _ => writeln!(self.output, "Invalid choice.")?,
        }
        Ok(true)
    }

    fn post_job(&mut self, company_id: &CompanyId) -> io::Result<()> {
        let id = JobId::new(self.prompt("Job ID: ")?);
        let title = self.prompt("Title: ")?;
        let description = self.prompt("Description: ")?;
        let package_lpa: f64 = self.prompt_parsed("Package (LPA): ")?;
        let location = self.prompt("Location: ")?;
        let min_cgpa: f64 = self.prompt_parsed("Minimum CGPA: ")?;
        let eligible_departments =
            split_list(&self.prompt("Eligible departments (comma separated): ")?);
        let required_skills = split_list(&self.prompt("Required skills (comma separated): ")?);

        let draft = JobPostingDraft {
            id,
            title,
            description,
            company_id: company_id.clone(),
            package_lpa,
            location,
            min_cgpa,
            eligible_departments,
            required_skills,
        };
        match self.registry.add_job_posting(draft) {
            Ok(job) => writeln!(self.output, "Job {} posted.", job.id),
            Err(err) => writeln!(self.output, "Could not post job: {err}"),
        }
    }

    fn show_company_jobs(&mut self, company_id: &CompanyId) -> io::Result<()> {
        let jobs = self.registry.company_jobs(company_id);
        if jobs.is_empty() {
            return writeln!(self.output, "No jobs posted yet.");
        }
        for job in jobs {
            let applicants = self.registry.job_applications(&job.id).len();
            writeln!(
                self.output,
                "{} | {} | {:.1} LPA | {} | {} applicant(s)",
                job.id, job.title, job.package_lpa, job.location, applicants
            )?;
        }
        Ok(())
    }

    fn show_job_applications(&mut self, company_id: &CompanyId) -> io::Result<()> {
        let job_id = JobId::new(self.prompt("Job ID: ")?);
        let owned = self
            .registry
            .job(&job_id)
            .is_some_and(|job| &job.company_id == company_id);
        if !owned {
            return writeln!(self.output, "Job not found for this company.");
        }

        let applications = self.registry.job_applications(&job_id);
        if applications.is_empty() {
            return writeln!(self.output, "No applications for this job.");
        }
        for application in applications {
            let Some(student) = self.registry.student(&application.student_id) else {
                continue;
            };
            writeln!(
                self.output,
                "{} | {} ({}) | {} | CGPA {:.2} | {}",
                application.id,
                student.name,
                student.id,
                student.department,
                student.cgpa,
                application.status
            )?;
        }
        Ok(())
    }

    /// Reads an application id and confirms it targets one of this company's jobs.
    fn owned_application(&mut self, company_id: &CompanyId) -> io::Result<Option<ApplicationId>> {
        let application_id = ApplicationId::new(self.prompt("Application ID: ")?);
        let owned = self
            .registry
            .company_of_application(&application_id)
            .is_some_and(|company| &company.id == company_id);
        if owned {
            Ok(Some(application_id))
        } else {
            writeln!(self.output, "Application not found for this company.")?;
            Ok(None)
        }
    }

    fn schedule_interview(&mut self, company_id: &CompanyId) -> io::Result<()> {
        let Some(application_id) = self.owned_application(company_id)? else {
            return Ok(());
        };
        let request = InterviewRequest {
            date: self.prompt("Date (YYYY-MM-DD): ")?,
            time: self.prompt("Time (HH:MM): ")?,
            location: self.prompt("Location: ")?,
            interview_type: self.prompt("Type (TECHNICAL/HR/...): ")?,
        };
        match self.registry.schedule_interview(&application_id, request) {
            Ok(interview) => writeln!(
                self.output,
                "Interview {} scheduled; application shortlisted.",
                interview.id
            ),
            Err(err) => writeln!(self.output, "Could not schedule interview: {err}"),
        }
    }

    fn update_application_status(&mut self, company_id: &CompanyId) -> io::Result<()> {
        let Some(application_id) = self.owned_application(company_id)? else {
            return Ok(());
        };
        writeln!(self.output, "1. Shortlisted")?;
        writeln!(self.output, "2. Rejected")?;
        writeln!(self.output, "3. On Hold")?;
        let status = match self.choice()? {
            1 => ApplicationStatus::Shortlisted,
            2 => ApplicationStatus::Rejected,
            3 => ApplicationStatus::OnHold,
            _ => return writeln!(self.output, "Invalid choice."),
        };
        match self
            .registry
            .update_application_status(&application_id, status)
        {
            Ok(application) => writeln!(
                self.output,
                "Application {} is now {}.",
                application.id, application.status
            ),
            Err(err) => writeln!(self.output, "Could not update status: {err}"),
        }
    }

    fn make_offer(&mut self, company_id: &CompanyId) -> io::Result<()> {
        let Some(application_id) = self.owned_application(company_id)? else {
            return Ok(());
        };
        let request = OfferRequest {
            package_lpa: self.prompt_parsed("Package (LPA): ")?,
            joining_date: self.prompt("Joining date (YYYY-MM-DD): ")?,
            details: self.prompt("Offer details: ")?,
        };
        match self.registry.make_job_offer(&application_id, request) {
            Ok(offer) => writeln!(self.output, "Offer {} sent.", offer.id),
            Err(err) => writeln!(self.output, "Could not make offer: {err}"),
        }
    }

    // Admin menu.

    fn admin_menu(&mut self, _id: &AdminId) -> io::Result<bool> {
        writeln!(self.output, "\n--- Admin Menu ---")?;
        writeln!(self.output, "1. Register Student")?;
        writeln!(self.output, "2. Register Company")?;
        writeln!(self.output, "3. View All Students")?;
        writeln!(self.output, "4. View All Companies")?;
        writeln!(self.output, "5. View All Jobs")?;
        writeln!(self.output, "6. View All Applications")?;
        writeln!(self.output, "7. Placement Report")?;
        writeln!(self.output, "8. Logout")?;

        match self.choice()? {
            1 => self.register_student()?,
            2 => self.register_company()?,
            3 => {
                for student in self.registry.students() {
                    writeln!(
                        self.output,
                        "{} | {} | {} | CGPA {:.2} | {}",
                        student.id,
                        student.name,
                        student.department,
                        student.cgpa,
                        student.graduation_year
                    )?;
                }
            }
            4 => {
                for company in self.registry.companies() {
                    writeln!(
                        self.output,
                        "{} | {} | {} | {}",
                        company.id, company.name, company.industry, company.email
                    )?;
                }
            }
            5 => {
                for job in self.registry.jobs() {
                    writeln!(
                        self.output,
                        "{} | {} | {} | {:.1} LPA | posted {}",
                        job.id, job.title, job.company_id, job.package_lpa, job.posted_on
                    )?;
                }
            }
            6 => {
                for application in self.registry.applications() {
                    writeln!(
                        self.output,
                        "{} | {} -> {} | {}",
                        application.id,
                        application.student_id,
                        application.job_id,
                        application.status
                    )?;
                }
            }
            7 => self.placement_report()?,
            8 => return self.logout(),
            _ => writeln!(self.output, "Invalid choice.")?,
        }
        Ok(true)
    }

    fn register_student(&mut self) -> io::Result<()> {
        let id = self.prompt("Student ID: ")?;
        let name = self.prompt("Name: ")?;
        let email = self.prompt("Email: ")?;
        let department = self.prompt("Department: ")?;
        let cgpa: f64 = self.prompt_parsed("CGPA: ")?;
        let graduation_year: u16 = self.prompt_parsed("Graduation year: ")?;

        let student = Student::new(id, name, email, department, cgpa, graduation_year);
        let id = student.id.clone();
        self.registry.add_student(student);
        writeln!(self.output, "Student {id} registered.")
    }

    fn register_company(&mut self) -> io::Result<()> {
        let id = self.prompt("Company ID: ")?;
        let name = self.prompt("Name: ")?;
        let email = self.prompt("Email: ")?;
        let industry = self.prompt("Industry: ")?;

        let company = Company::new(id, name, email, industry);
        let id = company.id.clone();
        self.registry.add_company(company);
        writeln!(self.output, "Company {id} registered.")
    }

    fn placement_report(&mut self) -> io::Result<()> {
        let stats = self.registry.placement_statistics();
        writeln!(self.output, "=== Placement Report ===")?;
        writeln!(self.output, "Total Students: {}", stats.total_students)?;
        writeln!(self.output, "Placed Students: {}", stats.placed_students)?;
        writeln!(
            self.output,
            "Placement Percentage: {:.2}%",
            stats.placement_percentage
        )?;
        writeln!(self.output, "Average Package: {:.2} LPA", stats.average_package)?;
        writeln!(self.output, "Highest Package: {:.2} LPA", stats.highest_package)?;
        writeln!(self.output, "Total Jobs: {}", stats.total_jobs)?;
        writeln!(self.output, "Total Applications: {}", stats.total_applications)?;
        writeln!(
            self.output,
            "Offers: {} made, {} accepted",
            stats.total_offers, stats.accepted_offers
        )?;

        writeln!(self.output, "\nDepartment-wise placements:")?;
        for (department, placed) in self.registry.department_wise_placement() {
            writeln!(self.output, "  {department}: {placed}")?;
        }

        writeln!(self.output, "\nCompany-wise hiring:")?;
        for (company, hired) in self.registry.company_wise_hiring() {
            writeln!(self.output, "  {company}: {hired}")?;
        }

        writeln!(self.output, "\nUnplaced students:")?;
        for student in self.registry.unplaced_students() {
            writeln!(
                self.output,
                "  {} | {} | {}",
                student.id, student.name, student.department
            )?;
        }
        Ok(())
    }
}

/// Splits a comma-separated answer, trimming entries and dropping blanks.
fn split_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

fn join(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        return "none".to_string();
    }
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
