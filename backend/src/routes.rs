use std::path::PathBuf;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use shared::constants::*;
use shared::email_capture::{SubmitEmailRequest, SubmitEmailResponse};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::storage::SaveOutcome;
use crate::submission::{submit, ClientMeta};
use crate::AppState;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Single entry point for the email endpoint so OPTIONS and wrong methods
/// get the same JSON/CORS treatment as POST.
pub async fn save_email(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => match handle_post(&state, &headers, &body).await {
            Ok(response) => response,
            Err(err) => err.render(state.expose_error_details),
        },
        _ => ApiError::MethodNotAllowed.render(state.expose_error_details),
    }
}

async fn handle_post(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<Response, ApiError> {
    let request: SubmitEmailRequest = serde_json::from_slice(body).map_err(ApiError::MalformedPayload)?;
    let meta = ClientMeta::from_headers(headers);

    let outcome = submit(state.store.as_ref(), request, meta, &state.source).await?;

    let (status, body) = match outcome {
        SaveOutcome::Created { id } => {
            info!("✅ New email captured");
            (
                StatusCode::CREATED,
                SubmitEmailResponse {
                    success: true,
                    message: EMAIL_SAVED_MESSAGE.to_string(),
                    duplicate: false,
                    id: Some(id),
                },
            )
        }
        SaveOutcome::Duplicate { id } => {
            info!("📧 Email was already registered");
            (
                StatusCode::OK,
                SubmitEmailResponse {
                    success: true,
                    message: EMAIL_DUPLICATE_MESSAGE.to_string(),
                    duplicate: true,
                    id,
                },
            )
        }
        SaveOutcome::Accepted { message } => (
            StatusCode::OK,
            SubmitEmailResponse {
                success: true,
                message: message.to_string(),
                duplicate: false,
                id: None,
            },
        ),
    };

    Ok((status, Json(body)).into_response())
}

pub fn app(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route(SUBMIT_EMAIL_PATH, any(save_email))
        .route(HEALTH_CHECK_PATH, get(health_check))
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(TraceLayer::new_for_http())
}
