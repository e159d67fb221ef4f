use std::future::Future;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::RoutineBuilder;
use crate::domains::preferences::SavedPreferences;
use crate::error::{Result, RoutineError};
use crate::services::controller::ResultView;

/// Shared state for the local HTTP service. The completion credential stays inside `builder`.
#[derive(Clone)]
pub struct AppState {
    pub builder: RoutineBuilder,
    pub token: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize, Deserialize)]
pub struct RoutineResponse {
    pub html: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/preferences", get(preferences))
        .route("/api/routine", post(generate_routine))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn preferences(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }

    match state.builder.preference_store().load() {
        Ok(saved) => Json(saved).into_response(),
        Err(RoutineError::CorruptPreferences(_)) => {
            Json(Option::<SavedPreferences>::None).into_response()
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn generate_routine(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SavedPreferences>,
) -> Response {
    if let Err(err) = authorize(&headers, &state.token) {
        return err.into_response();
    }

    let mut controller = state.builder.controller();
    controller.form_mut().populate(&payload);
    match controller.submit().await {
        ResultView::Routine { html } => Json(RoutineResponse { html }).into_response(),
        ResultView::Error { message } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
        ResultView::Hidden => StatusCode::NO_CONTENT.into_response(),
    }
}

fn authorize(
    headers: &HeaderMap,
    token: &str,
) -> std::result::Result<(), (StatusCode, Json<ErrorResponse>)> {
    if token.is_empty() {
        return Ok(());
    }
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();

    if bearer == token {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized".to_string(),
            }),
        ))
    }
}

pub async fn run(host: &str, port: u16, state: AppState) -> Result<()> {
    run_with_shutdown(host, port, state, futures::future::pending::<()>()).await
}

pub async fn run_with_shutdown<F>(host: &str, port: u16, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RoutineError::Runtime(e.to_string()))?;
    info!(%addr, "routine service listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| RoutineError::Runtime(e.to_string()))?;
    Ok(())
}
