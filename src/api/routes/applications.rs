use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::domain::{Application, DomainError, SubmissionInput};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
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

impl From<SubmitApplicationRequest> for SubmissionInput {
    fn from(request: SubmitApplicationRequest) -> Self {
        Self {
            listing_id: request.listing_id,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            cv_url: request.cv_url,
            cover_letter_url: request.cover_letter_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: String,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self { id: application.id }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn submit_application(
    State(state): State<AppState>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.submission_service.submit(request.into()).await {
        Ok(application) => Ok((StatusCode::CREATED, Json(application.into()))),
        Err(e) => {
            let status = match &e {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            if status.is_server_error() {
                tracing::error!(error = %e, "Application submission failed");
            }
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
