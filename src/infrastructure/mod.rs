pub mod candidate_service;
pub mod config;

pub use candidate_service::{HttpCandidateService, InMemoryCandidateService};
pub use config::Config;
