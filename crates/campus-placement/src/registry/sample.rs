use super::domain::{Admin, Company, Student};
use super::store::PlacementRegistry;

/// Loads the starter roster the placement cell demos with: two students, two recruiters and the
/// `A001` admin account.
pub fn seed_sample_data(registry: &mut PlacementRegistry) {
    registry.add_student(
        Student::new("S001", "Alice Johnson", "alice@college.edu", "CS", 8.5, 2024)
            .with_skills(["Java", "Python", "SQL"]),
    );
    registry.add_student(
        Student::new("S002", "Bob Smith", "bob@college.edu", "IT", 7.8, 2024)
            .with_skills(["JavaScript", "React", "Node.js"]),
    );

    registry.add_company(Company::new(
        "C001",
        "TechCorp",
        "hr@techcorp.com",
        "Technology",
    ));
    registry.add_company(Company::new(
        "C002",
        "DataSystems Inc",
        "recruit@datasystems.com",
        "IT Services",
    ));

    registry.add_admin(Admin::new("A001", "Admin User", "admin@college.edu"));
}

impl PlacementRegistry {
    pub fn with_sample_data() -> Self {
        let mut registry = Self::new();
        seed_sample_data(&mut registry);
        registry
    }
}
