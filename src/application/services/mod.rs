mod submission;

pub use submission::SubmissionService;
