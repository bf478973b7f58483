use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

// === API Types ===

#[derive(Deserialize)]
#[serde(untagged)]
enum EmailField {
    Text(String),
    Other(IgnoredAny),
}

// Numbers, arrays, objects and null all read as "no email"
fn email_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match EmailField::deserialize(deserializer)? {
        EmailField::Text(email) => Some(email),
        EmailField::Other(_) => None,
    })
}

/// Body of `POST /api/save-email`. `email` is optional and tolerant of
/// non-string values so a missing or mistyped address is reported as an
/// invalid email rather than a parse failure.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEmailRequest {
    #[serde(default, deserialize_with = "email_or_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubmitEmailResponse {
    pub success: bool,
    pub message: String,
    pub duplicate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_and_tolerates_extras() {
        let body = r#"{"email":"a@b.co","userAgent":"UA","screenWidth":390,"isMobile":true,"referrer":"x"}"#;
        let req: SubmitEmailRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.co"));
        assert_eq!(req.user_agent.as_deref(), Some("UA"));
        assert_eq!(req.screen_width, Some(390));
        assert_eq!(req.is_mobile, Some(true));
        assert_eq!(req.timestamp, None);
    }

    #[test]
    fn test_missing_email_still_parses() {
        let req: SubmitEmailRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.email, None);
    }

    #[test]
    fn test_non_string_email_reads_as_missing() {
        for body in [r#"{"email":123}"#, r#"{"email":null}"#, r#"{"email":["a@b.co"]}"#, r#"{"email":{"v":1}}"#] {
            let req: SubmitEmailRequest = serde_json::from_str(body).unwrap();
            assert_eq!(req.email, None, "{}", body);
        }
    }

    #[test]
    fn test_response_omits_absent_id() {
        let resp = SubmitEmailResponse {
            success: true,
            message: "ok".into(),
            duplicate: false,
            id: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["duplicate"], false);
    }
}
