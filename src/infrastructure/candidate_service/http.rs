use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::domain::{
    ports::CandidateService, Application, ApplicationDetails, Candidate, Document, DocumentKind,
    DomainError, Listing, Tag,
};
use crate::infrastructure::config::InternalApiConfig;

/// Hard ceiling of the internal document store.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const SECRET_TOKEN_HEADER: &str = "X-Secret-Token";

/// `CandidateService` implementation against the internal HTTP API.
///
/// Every request carries the shared secret token header. Absence (404 or
/// an empty search result) maps to `Ok(None)`; everything else that goes
/// wrong maps to `DomainError::ExternalService`. No retries.
pub struct HttpCandidateService {
    client: Client,
    base_url: String,
    secret_token: String,
}

impl HttpCandidateService {
    pub fn new(config: &InternalApiConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_token: config.secret_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DomainError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .header(SECRET_TOKEN_HEADER, &self.secret_token)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("GET {path}: {e}")))?;

        Self::decode(path, response).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, DomainError> {
        let response = self
            .client
            .request(method.clone(), self.url(path))
            .header(SECRET_TOKEN_HEADER, &self.secret_token)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("{method} {path}: {e}")))?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, DomainError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::external(format!(
                "{path} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DomainError::external(format!("malformed response from {path}: {e}")))
    }
}

#[async_trait]
impl CandidateService for HttpCandidateService {
    async fn find_candidate_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Candidate>, DomainError> {
        let query = format!("c.email={email}");
        let candidates: Vec<Candidate> =
            self.get_json("/candidates", &[("query", query.as_str())]).await?;
        Ok(candidates.into_iter().next())
    }

    async fn create_candidate(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Candidate, DomainError> {
        self.send_json(
            reqwest::Method::POST,
            "/candidates",
            &json!({
                "email": email,
                "firstName": first_name,
                "lastName": last_name,
            }),
        )
        .await
    }

    async fn update_candidate(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Candidate, DomainError> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/candidates/{id}"),
            &json!({
                "firstName": first_name,
                "lastName": last_name,
            }),
        )
        .await
    }

    async fn get_listing(&self, listing_id: &str) -> Result<Option<Listing>, DomainError> {
        let path = format!("/listings/{listing_id}");
        let response = self
            .client
            .get(self.url(&path))
            .header(SECRET_TOKEN_HEADER, &self.secret_token)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("GET {path}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Self::decode(&path, response).await.map(Some)
    }

    async fn get_candidate_tags(&self, candidate_id: &str) -> Result<Vec<Tag>, DomainError> {
        self.get_json(&format!("/candidate/{candidate_id}/tags"), &[])
            .await
    }

    async fn upload_document(
        &self,
        source_url: &str,
        kind: DocumentKind,
    ) -> Result<Document, DomainError> {
        // the source is an arbitrary caller-supplied URL, not the internal
        // API, so no secret token here
        let source = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("fetching {source_url}: {e}")))?;

        let status = source.status();
        if !status.is_success() {
            return Err(DomainError::external(format!(
                "fetching {source_url} returned {status}"
            )));
        }

        let bytes = source
            .bytes()
            .await
            .map_err(|e| DomainError::external(format!("reading {source_url}: {e}")))?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(DomainError::external(format!(
                "document from {source_url} exceeds the 10 MB upload limit"
            )));
        }

        let path = format!("/documents/upload/{}", kind.as_str());
        let response = self
            .client
            .post(self.url(&path))
            .header(SECRET_TOKEN_HEADER, &self.secret_token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("POST {path}: {e}")))?;

        Self::decode(&path, response).await
    }

    async fn create_application(
        &self,
        details: &ApplicationDetails,
    ) -> Result<Application, DomainError> {
        self.send_json(reqwest::Method::POST, "/applications", details)
            .await
    }
}
