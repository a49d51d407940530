use async_trait::async_trait;

use crate::domain::{
    errors::DomainError, Application, ApplicationDetails, Candidate, Document, DocumentKind,
    Listing, Tag,
};

/// Operations against the internal candidate API.
///
/// Lookups return `Ok(None)` for absence; `Err` is reserved for transport
/// and remote failures.
#[async_trait]
pub trait CandidateService: Send + Sync {
    async fn find_candidate_by_email(&self, email: &str)
        -> Result<Option<Candidate>, DomainError>;

    async fn create_candidate(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Candidate, DomainError>;

    async fn update_candidate(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Candidate, DomainError>;

    async fn get_listing(&self, listing_id: &str) -> Result<Option<Listing>, DomainError>;

    async fn get_candidate_tags(&self, candidate_id: &str) -> Result<Vec<Tag>, DomainError>;

    /// Fetches the file behind `source_url` and relays it to the document
    /// store. May be slow; the store rejects files over 10 MB.
    async fn upload_document(
        &self,
        source_url: &str,
        kind: DocumentKind,
    ) -> Result<Document, DomainError>;

    async fn create_application(
        &self,
        details: &ApplicationDetails,
    ) -> Result<Application, DomainError>;
}
