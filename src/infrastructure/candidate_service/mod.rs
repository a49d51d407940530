mod http;
mod in_memory;

pub use http::HttpCandidateService;
pub use in_memory::InMemoryCandidateService;
