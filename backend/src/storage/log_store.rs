use futures::future::BoxFuture;
use shared::constants::EMAIL_LOGGED_MESSAGE;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use super::{SaveOutcome, StoreError, SubmissionRecord, SubmissionStore};

/// Writes each submission to the server log and nothing else.
pub struct LogStore;

impl SubmissionStore for LogStore {
    fn name(&self) -> &'static str {
        "log"
    }

    fn save<'a>(&'a self, record: &'a SubmissionRecord) -> BoxFuture<'a, Result<SaveOutcome, StoreError>> {
        Box::pin(async move {
            let submitted_at = record
                .submitted_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| record.submitted_at.to_string());

            info!(
                "📧 New email submission: {} (ts={}, ip={}, ua=\"{}\")",
                record.email.original(),
                submitted_at,
                record.ip_address,
                record.user_agent
            );

            Ok(SaveOutcome::Accepted {
                message: EMAIL_LOGGED_MESSAGE,
            })
        })
    }
}
