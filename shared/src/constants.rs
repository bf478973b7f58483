pub const SUBMIT_EMAIL_PATH: &str = "/api/save-email";
pub const HEALTH_CHECK_PATH: &str = "/api/health_check";

pub const DEFAULT_USER_AGENT: &str = "Unknown";
pub const UNKNOWN_IP: &str = "Unknown";
pub const DEFAULT_SOURCE: &str = "spin-wheel-promotion";

pub const INVALID_EMAIL_ERROR: &str = "Please provide a valid email address";
pub const INVALID_EMAIL_TITLE: &str = "Invalid Email";
pub const METHOD_NOT_ALLOWED_TITLE: &str = "Method Not Allowed";
pub const METHOD_NOT_ALLOWED_ERROR: &str = "Only POST requests are allowed";
pub const BAD_REQUEST_TITLE: &str = "Bad Request";
pub const MALFORMED_BODY_ERROR: &str = "Request body must be a valid JSON object";
pub const INTERNAL_ERROR_TITLE: &str = "Internal Server Error";
pub const SAVE_FAILED_ERROR: &str = "Failed to save email. Please try again later.";

pub const EMAIL_SAVED_MESSAGE: &str = "Email saved successfully";
pub const EMAIL_DUPLICATE_MESSAGE: &str = "Email already registered";
pub const EMAIL_LOGGED_MESSAGE: &str = "Email logged successfully";
