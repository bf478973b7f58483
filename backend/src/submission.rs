use axum::http::HeaderMap;
use shared::constants::{DEFAULT_USER_AGENT, UNKNOWN_IP};
use shared::email_capture::SubmitEmailRequest;
use shared::validation::validate_and_normalize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::storage::{SaveOutcome, SubmissionRecord, SubmissionStore};

/// Request context that does not come from the JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let ip_address = header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .or_else(|| header("client-ip"))
            .or_else(|| header("x-real-ip"))
            .unwrap_or(UNKNOWN_IP)
            .to_string();

        Self {
            ip_address,
            user_agent: header("user-agent").map(str::to_string),
        }
    }
}

fn resolve_timestamp(raw: Option<&str>, received_at: OffsetDateTime) -> OffsetDateTime {
    match raw {
        Some(value) => OffsetDateTime::parse(value, &Rfc3339).unwrap_or_else(|e| {
            warn!("Ignoring unparseable client timestamp {:?}: {}", value, e);
            received_at
        }),
        None => received_at,
    }
}

/// Validates one submission and hands it to the configured store.
pub async fn submit(
    store: &dyn SubmissionStore,
    request: SubmitEmailRequest,
    meta: ClientMeta,
    source: &str,
) -> Result<SaveOutcome, ApiError> {
    // Never trust the client's own validation
    let email = validate_and_normalize(request.email.as_deref().unwrap_or_default())?;
    let received_at = OffsetDateTime::now_utc();

    let user_agent = request
        .user_agent
        .filter(|ua| !ua.trim().is_empty())
        .or(meta.user_agent)
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    debug!(
        "Submission context: screen_width={:?} is_mobile={:?}",
        request.screen_width, request.is_mobile
    );

    let record = SubmissionRecord {
        submitted_at: resolve_timestamp(request.timestamp.as_deref(), received_at),
        email,
        user_agent,
        ip_address: meta.ip_address,
        source: source.to_string(),
        received_at,
    };

    let outcome = store.save(&record).await?;
    debug!("Stored {} via {}: {:?}", record.email, store.name(), outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LogStore, MemoryStore};
    use axum::http::HeaderValue;
    use time::macros::datetime;

    fn request(email: &str) -> SubmitEmailRequest {
        SubmitEmailRequest {
            email: Some(email.to_string()),
            ..Default::default()
        }
    }

    fn meta() -> ClientMeta {
        ClientMeta {
            ip_address: "203.0.113.9".into(),
            user_agent: None,
        }
    }

    #[test]
    fn test_client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.1, 10.0.0.2"));
        headers.insert("client-ip", HeaderValue::from_static("10.9.9.9"));
        assert_eq!(ClientMeta::from_headers(&headers).ip_address, "198.51.100.1");

        let mut headers = HeaderMap::new();
        headers.insert("client-ip", HeaderValue::from_static("10.9.9.9"));
        assert_eq!(ClientMeta::from_headers(&headers).ip_address, "10.9.9.9");

        assert_eq!(ClientMeta::from_headers(&HeaderMap::new()).ip_address, "Unknown");
    }

    #[test]
    fn test_timestamp_defaults() {
        let now = datetime!(2024-01-01 00:00:00 UTC);
        assert_eq!(
            resolve_timestamp(Some("2023-12-31T23:59:59.123Z"), now),
            datetime!(2023-12-31 23:59:59.123 UTC)
        );
        assert_eq!(resolve_timestamp(Some("yesterday"), now), now);
        assert_eq!(resolve_timestamp(None, now), now);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_email_are_rejected() {
        let store = MemoryStore::default();

        let missing = submit(&store, SubmitEmailRequest::default(), meta(), "test").await;
        assert!(matches!(missing, Err(ApiError::InvalidEmail(_))));

        let malformed = submit(&store, request("a@b"), meta(), "test").await;
        assert!(matches!(malformed, Err(ApiError::InvalidEmail(_))));

        // The server checks the value exactly as sent
        for padded in [" a@b.co", "a@b.co\n"] {
            let result = submit(&store, request(padded), meta(), "test").await;
            assert!(matches!(result, Err(ApiError::InvalidEmail(_))), "{:?}", padded);
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_record_defaults_are_filled() {
        let store = MemoryStore::default();
        submit(&store, request("Fan@Example.com"), meta(), "spin-wheel-promotion")
            .await
            .unwrap();

        let stored = store.get("fan@example.com").await.unwrap().record;
        assert_eq!(stored.email.original(), "Fan@Example.com");
        assert_eq!(stored.user_agent, "Unknown");
        assert_eq!(stored.ip_address, "203.0.113.9");
        assert_eq!(stored.source, "spin-wheel-promotion");
        assert_eq!(stored.submitted_at, stored.received_at);
    }

    #[tokio::test]
    async fn test_header_user_agent_is_fallback() {
        let store = MemoryStore::default();
        let meta = ClientMeta {
            ip_address: "Unknown".into(),
            user_agent: Some("curl/8.0".into()),
        };
        submit(&store, request("a@b.co"), meta, "test").await.unwrap();
        assert_eq!(store.get("a@b.co").await.unwrap().record.user_agent, "curl/8.0");
    }

    #[tokio::test]
    async fn test_log_store_accepts_repeats() {
        for _ in 0..2 {
            let outcome = submit(&LogStore, request("a@b.co"), meta(), "test").await.unwrap();
            assert!(matches!(outcome, SaveOutcome::Accepted { .. }));
        }
    }
}
