use std::sync::Arc;

use crate::application::SubmissionService;
use crate::infrastructure::Config;

#[derive(Clone)]
pub struct AppState {
    pub submission_service: Arc<SubmissionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(submission_service: Arc<SubmissionService>, config: Config) -> Self {
        Self {
            submission_service,
            config: Arc::new(config),
        }
    }
}
