use std::sync::Arc;

use crate::config::Config;
use crate::storage::SubmissionStore;

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod storage;
pub mod submission;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub expose_error_details: bool,
    pub source: String,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>, config: &Config) -> Self {
        Self {
            store,
            expose_error_details: config.environment.exposes_error_details(),
            source: config.source.clone(),
        }
    }
}
