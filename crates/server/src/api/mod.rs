use std::{any::Any, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use shared::{
    error::RelayError,
    protocol::{
        RelayResponse, SubmissionPayload, MSG_BODY_TOO_LARGE, MSG_DELIVERY_FAILED,
        MSG_FIELDS_REQUIRED, MSG_UNEXPECTED, SEND_MESSAGE_ROUTE,
    },
};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir,
};
use tracing::{error, warn};

use crate::{app_state::AppState, config::RuntimeEnvironment};

pub(crate) const PROFILE_PAGE: &str = "profile.html";
pub(crate) const MAX_BODY_BYTES: usize = 64 * 1024;

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
    let environment = state.environment;
    let static_files = ServeDir::new(&state.static_root);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/", any(serve_profile))
        .route("/profile.html", get(serve_profile))
        .route(SEND_MESSAGE_ROUTE, post(send_message))
        .fallback_service(static_files)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn Any + Send + 'static>| panic_response(panic, environment),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn serve_profile(State(state): State<Arc<AppState>>) -> Response {
    let path = state.static_root.join(PROFILE_PAGE);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(error) => {
            error!(path = %path.display(), %error, "failed to serve profile page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error loading page. Check server logs.",
            )
                .into_response()
        }
    }
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmissionPayload>, JsonRejection>,
) -> (StatusCode, Json<RelayResponse>) {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state.relay.relay(payload).await {
        Ok(report) => (StatusCode::OK, Json(RelayResponse::from(&report))),
        Err(err) => error_response(&err, state.environment),
    }
}

/// Oversized bodies keep their 413; every other unreadable body is answered
/// like a submission with missing fields.
pub(crate) fn rejection_response(
    rejection: &JsonRejection,
) -> (StatusCode, Json<RelayResponse>) {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(%rejection, "contact submission body over the size limit");
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(RelayResponse::failure(MSG_BODY_TOO_LARGE)),
        );
    }
    warn!(%rejection, "unreadable contact submission body");
    (
        StatusCode::BAD_REQUEST,
        Json(RelayResponse::failure(MSG_FIELDS_REQUIRED)),
    )
}

pub(crate) fn error_response(
    err: &RelayError,
    environment: RuntimeEnvironment,
) -> (StatusCode, Json<RelayResponse>) {
    let status =
        StatusCode::from_u16(err.code().status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match err {
        RelayError::InvalidRequest { .. } => RelayResponse::failure(MSG_FIELDS_REQUIRED),
        RelayError::DeliveryFailed { .. } => RelayResponse::failure(MSG_DELIVERY_FAILED),
        RelayError::UnexpectedFault(detail) => RelayResponse::failure(MSG_UNEXPECTED)
            .with_error_detail(environment.exposes_error_detail().then(|| detail.clone())),
    };
    (status, Json(body))
}

fn panic_response(
    panic: Box<dyn Any + Send + 'static>,
    environment: RuntimeEnvironment,
) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%detail, "request handler panicked");
    error_response(&RelayError::UnexpectedFault(detail), environment).into_response()
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
