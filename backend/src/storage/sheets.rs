use futures::future::BoxFuture;
use reqwest::Client;
use shared::constants::EMAIL_SAVED_MESSAGE;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use super::{SaveOutcome, StoreError, SubmissionRecord, SubmissionStore};

/// Forwards submissions to a spreadsheet web-app URL as a urlencoded form.
/// Without a URL it only logs.
pub struct SheetsRelay {
    url: Option<String>,
    client: Client,
}

impl SheetsRelay {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }

    fn form_fields(record: &SubmissionRecord) -> Vec<(&'static str, String)> {
        let timestamp = record
            .submitted_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| record.submitted_at.to_string());

        vec![
            ("email", record.email.original().to_string()),
            ("timestamp", timestamp),
            ("userAgent", record.user_agent.clone()),
            ("source", record.source.clone()),
        ]
    }
}

impl SubmissionStore for SheetsRelay {
    fn name(&self) -> &'static str {
        "sheets"
    }

    fn save<'a>(&'a self, record: &'a SubmissionRecord) -> BoxFuture<'a, Result<SaveOutcome, StoreError>> {
        Box::pin(async move {
            if let Some(url) = &self.url {
                self.client
                    .post(url)
                    .form(&Self::form_fields(record))
                    .send()
                    .await?
                    .error_for_status()?;
            }

            info!("📧 Email saved: {}", record.email.original());

            Ok(SaveOutcome::Accepted {
                message: EMAIL_SAVED_MESSAGE,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::validation::validate_and_normalize;
    use time::macros::datetime;

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            email: validate_and_normalize("Fan@Example.com").unwrap(),
            submitted_at: datetime!(2024-05-01 12:30:00 UTC),
            user_agent: "Mozilla".into(),
            ip_address: "10.0.0.1".into(),
            source: "spin-wheel".into(),
            received_at: datetime!(2024-05-01 12:30:01 UTC),
        }
    }

    #[test]
    fn test_form_fields() {
        let fields = SheetsRelay::form_fields(&record());
        assert_eq!(fields[0], ("email", "Fan@Example.com".to_string()));
        assert_eq!(fields[1], ("timestamp", "2024-05-01T12:30:00Z".to_string()));
        assert_eq!(fields[2].0, "userAgent");
        assert_eq!(fields[3], ("source", "spin-wheel".to_string()));
    }

    #[tokio::test]
    async fn test_without_url_accepts_and_never_flags_duplicates() {
        let relay = SheetsRelay::new(None);
        for _ in 0..2 {
            let outcome = relay.save(&record()).await.unwrap();
            assert!(matches!(outcome, SaveOutcome::Accepted { .. }));
        }
    }
}
