use serde::{Deserialize, Serialize};

use super::{Candidate, Document, Listing, Tag};

/// The submission form as received from the frontend. Immutable for the
/// duration of the workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    pub listing_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub cv_url: Option<String>,
    #[serde(default)]
    pub cover_letter_url: Option<String>,
}

/// Payload for creating an application record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetails {
    pub candidate_id: String,
    pub listing_id: String,
    pub tags: Vec<Tag>,
    pub documents: Vec<Document>,
}

impl ApplicationDetails {
    /// Assembles the creation payload, sorting tags ascending by `order`.
    /// The sort is stable: equal orders keep their relative position.
    pub fn new(
        candidate: &Candidate,
        listing: &Listing,
        mut tags: Vec<Tag>,
        documents: Vec<Document>,
    ) -> Self {
        tags.sort_by_key(|tag| tag.order);
        Self {
            candidate_id: candidate.id.clone(),
            listing_id: listing.id.clone(),
            tags,
            documents,
        }
    }
}

/// The record linking a candidate to a listing, as created by the
/// internal API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
}
