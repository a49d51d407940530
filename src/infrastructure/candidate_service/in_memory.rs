use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{
    ports::CandidateService, Application, ApplicationDetails, Candidate, Document, DocumentKind,
    DomainError, Listing, Tag,
};

/// In-memory `CandidateService` used by unit and router tests.
///
/// Records created applications so tests can inspect the payload that
/// would have gone over the wire.
pub struct InMemoryCandidateService {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    candidates: Vec<Candidate>,
    listings: HashMap<String, Listing>,
    tags: HashMap<String, Vec<Tag>>,
    applications: Vec<ApplicationDetails>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

impl InMemoryCandidateService {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    pub fn insert_listing(&self, listing: Listing) {
        let mut state = self.state.write().unwrap();
        state.listings.insert(listing.id.clone(), listing);
    }

    pub fn insert_candidate(&self, email: &str, first_name: &str, last_name: &str) -> Candidate {
        let mut state = self.state.write().unwrap();
        let candidate = Candidate {
            id: state.next_id("candidate"),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        };
        state.candidates.push(candidate.clone());
        candidate
    }

    pub fn insert_tags(&self, candidate_id: &str, tags: Vec<Tag>) {
        let mut state = self.state.write().unwrap();
        state.tags.insert(candidate_id.into(), tags);
    }

    pub fn candidate_count(&self) -> usize {
        self.state.read().unwrap().candidates.len()
    }

    pub fn find_candidate(&self, email: &str) -> Option<Candidate> {
        let state = self.state.read().unwrap();
        state.candidates.iter().find(|c| c.email == email).cloned()
    }

    pub fn created_applications(&self) -> Vec<ApplicationDetails> {
        self.state.read().unwrap().applications.clone()
    }
}

impl Default for InMemoryCandidateService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandidateService for InMemoryCandidateService {
    async fn find_candidate_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Candidate>, DomainError> {
        Ok(self.find_candidate(email))
    }

    async fn create_candidate(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Candidate, DomainError> {
        Ok(self.insert_candidate(email, first_name, last_name))
    }

    async fn update_candidate(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Candidate, DomainError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let candidate = state
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::external(format!("no candidate {id}")))?;
        candidate.first_name = first_name.into();
        candidate.last_name = last_name.into();
        Ok(candidate.clone())
    }

    async fn get_listing(&self, listing_id: &str) -> Result<Option<Listing>, DomainError> {
        let state = self
            .state
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(state.listings.get(listing_id).cloned())
    }

    async fn get_candidate_tags(&self, candidate_id: &str) -> Result<Vec<Tag>, DomainError> {
        let state = self
            .state
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(state.tags.get(candidate_id).cloned().unwrap_or_default())
    }

    async fn upload_document(
        &self,
        _source_url: &str,
        kind: DocumentKind,
    ) -> Result<Document, DomainError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(Document {
            id: state.next_id("document"),
            kind,
        })
    }

    async fn create_application(
        &self,
        details: &ApplicationDetails,
    ) -> Result<Application, DomainError> {
        let mut state = self
            .state
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let id = state.next_id("application");
        state.applications.push(details.clone());
        Ok(Application { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_roundtrip() {
        let api = InMemoryCandidateService::new();

        assert!(api
            .find_candidate_by_email("a@example.com")
            .await
            .unwrap()
            .is_none());

        let created = api.create_candidate("a@example.com", "A", "B").await.unwrap();
        let updated = api.update_candidate(&created.id, "C", "D").await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "C");
        assert_eq!(api.candidate_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_listing_is_absent() {
        let api = InMemoryCandidateService::new();
        assert!(api.get_listing("nope").await.unwrap().is_none());
    }
}
