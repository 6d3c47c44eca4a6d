//! Axum application: routes, request validation, error mapping.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use promo_extraction::{ExtractionRequest, ExtractionResult, Orchestrator, StrategyInfo};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub llm_provider: String,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    llm_provider: String,
    strategy: StrategyInfo,
}

/// Build the application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/extractors/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// POST /api/extractors/extract
///
/// Validates the request shape; the core itself never sees malformed
/// input. Extraction cannot fail once validation passes: the regex
/// fallback is always available.
async fn extract_handler(
    State(state): State<AppState>,
    Json(request): Json<ExtractionRequest>,
) -> Result<Json<ExtractionResult>, (StatusCode, Json<ErrorBody>)> {
    if let Err(message) = validate(&request) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                message: message.to_string(),
            }),
        ));
    }

    let result = state.orchestrator.extract(&request).await;
    Ok(Json(result))
}

fn validate(request: &ExtractionRequest) -> Result<(), &'static str> {
    if request.text.trim().is_empty() {
        return Err("text is required");
    }
    if request.chat.trim().is_empty() {
        return Err("chat is required");
    }
    if request.message_id <= 0 {
        return Err("messageId must be a positive integer");
    }
    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        llm_provider: state.llm_provider.clone(),
        strategy: state.orchestrator.strategy(),
    })
}
