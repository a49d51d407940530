mod application;
mod candidate;
mod document;
mod listing;
mod tag;

pub use application::{Application, ApplicationDetails, SubmissionInput};
pub use candidate::Candidate;
pub use document::{Document, DocumentKind};
pub use listing::Listing;
pub use tag::{select_application_tags, Tag};
