use shared::constants::SUBMIT_EMAIL_PATH;
use web_sys::window;

/// Opened straight from disk (no server), so there is no API to talk to.
pub fn is_file_protocol() -> bool {
    window()
        .and_then(|w| w.location().protocol().ok())
        .map(|protocol| protocol == "file:")
        .unwrap_or(false)
}

pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            if !host.is_empty() {
                // Same origin as the page, keeping any port
                let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
                return format!("{}//{}", protocol, host);
            }
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}

pub fn submit_email_url() -> String {
    format!("{}{}", get_api_base_url(), SUBMIT_EMAIL_PATH)
}
