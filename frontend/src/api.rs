use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use shared::email_capture::{SubmitEmailRequest, SubmitEmailResponse};
use shared::validation::NormalizedEmail;
use web_sys::window;

use crate::config::{is_file_protocol, submit_email_url};

const MOBILE_MARKERS: [&str; 5] = ["mobile", "android", "iphone", "ipad", "ipod"];
const DEMO_SAVE_DELAY_MS: u32 = 1000;

fn build_request(email: &NormalizedEmail) -> SubmitEmailRequest {
    let window = window();
    let user_agent = window.as_ref().and_then(|w| w.navigator().user_agent().ok());
    let screen_width = window
        .as_ref()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w as u32);
    let is_mobile = user_agent.as_ref().map(|ua| {
        let ua = ua.to_lowercase();
        MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
    });

    SubmitEmailRequest {
        email: Some(email.original().to_string()),
        timestamp: js_sys::Date::new_0().to_iso_string().as_string(),
        user_agent,
        screen_width,
        is_mobile,
    }
}

/// Posts the email to the backend. Any failure comes back as `Err`; the
/// caller decides whether that blocks the visitor (it does not).
pub async fn submit_email(email: &NormalizedEmail) -> Result<SubmitEmailResponse, String> {
    log::info!("📧 Saving email: {}", email);

    if is_file_protocol() {
        log::warn!("⚠️ File protocol detected - email would be saved: {}", email);
        TimeoutFuture::new(DEMO_SAVE_DELAY_MS).await;
        return Ok(SubmitEmailResponse {
            success: true,
            message: "Email saved locally (demo mode)".to_string(),
            duplicate: false,
            id: None,
        });
    }

    let response = Request::post(&submit_email_url())
        .json(&build_request(email))
        .map_err(|e| format!("Failed to build request: {:?}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error! status: {}", response.status()));
    }

    let result = response
        .json::<SubmitEmailResponse>()
        .await
        .map_err(|e| format!("Error parsing response: {:?}", e))?;

    if result.success {
        log::info!("✅ Email saved successfully: {}", email);
        if result.duplicate {
            log::info!("📧 Email was already registered");
        }
    }

    Ok(result)
}
