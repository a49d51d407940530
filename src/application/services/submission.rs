use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::CandidateService, select_application_tags, Application, ApplicationDetails, Candidate,
    Document, DocumentKind, DomainError, SubmissionInput,
};

pub struct SubmissionService {
    api: Arc<dyn CandidateService>,
}

impl SubmissionService {
    pub fn new(api: Arc<dyn CandidateService>) -> Self {
        Self { api }
    }

    /// Submits an application for a candidate to a listing.
    ///
    /// The candidate is upserted before any validation runs, so the
    /// candidate record exists even when the submission is rejected.
    /// Upsert is idempotent, which keeps the early side effect harmless.
    #[instrument(skip(self, input), fields(listing_id = %input.listing_id))]
    pub async fn submit(&self, input: SubmissionInput) -> Result<Application, DomainError> {
        let listing = self.api.get_listing(&input.listing_id).await?;

        let candidate = self.upsert_candidate(&input).await?;

        if input.email.is_empty() {
            return Err(DomainError::validation("Email is required"));
        }

        let listing = match listing {
            Some(listing) if listing.is_active() => listing,
            _ => return Err(DomainError::validation("Listing is not active")),
        };

        let tags = self.api.get_candidate_tags(&candidate.id).await?;
        let application_tags = select_application_tags(&tags);

        let documents = self.upload_documents(&input).await?;

        let details = ApplicationDetails::new(&candidate, &listing, application_tags, documents);
        self.api.create_application(&details).await
    }

    /// Looks up a candidate by exact email; updates the name fields if one
    /// exists, creates the candidate otherwise.
    #[instrument(skip(self, input))]
    async fn upsert_candidate(&self, input: &SubmissionInput) -> Result<Candidate, DomainError> {
        match self.api.find_candidate_by_email(&input.email).await? {
            Some(existing) => {
                self.api
                    .update_candidate(&existing.id, &input.first_name, &input.last_name)
                    .await
            }
            None => {
                self.api
                    .create_candidate(&input.email, &input.first_name, &input.last_name)
                    .await
            }
        }
    }

    /// Uploads the CV first, then the cover letter, one at a time. Missing
    /// or empty URLs contribute no entry.
    #[instrument(skip(self, input))]
    async fn upload_documents(
        &self,
        input: &SubmissionInput,
    ) -> Result<Vec<Document>, DomainError> {
        let mut documents = Vec::new();

        if let Some(url) = non_empty(&input.cv_url) {
            documents.push(self.api.upload_document(url, DocumentKind::Cv).await?);
        }
        if let Some(url) = non_empty(&input.cover_letter_url) {
            documents.push(
                self.api
                    .upload_document(url, DocumentKind::CoverLetter)
                    .await?,
            );
        }

        Ok(documents)
    }
}

fn non_empty(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|u| !u.is_empty())
}
