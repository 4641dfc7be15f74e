//! Campus placement registry: students, companies, job postings, applications, interviews and
//! offers held in memory, with the eligibility, skill-gap and reporting queries the placement
//! cell runs over them.

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
