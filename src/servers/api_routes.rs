//! Bingo REST API routes

use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::card::Card;
use crate::services::{BingoService, Statistics};
use crate::BingoError;

/// Shared service handle used by every handler
pub type ApiState = Arc<BingoService>;

/// Create the `/api` router
pub fn api_router(service: ApiState) -> Router {
    Router::new()
        .route("/api", get(get_template))
        .route("/api/view/{id}", get(get_card))
        .route("/api/create", post(create_card))
        .route("/api/search/{query}", get(search_cards))
        .route("/api/stats", get(get_statistics))
        .route("/api/index", get(rebuild_index))
        .with_state(service)
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl BingoError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BingoError::NotFound { .. } => StatusCode::NOT_FOUND,
            BingoError::Validation(_) => StatusCode::BAD_REQUEST,
            BingoError::Decode { .. } | BingoError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BingoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /api - Default card with a shuffled grid
async fn get_template(State(service): State<ApiState>) -> Json<Card> {
    Json(service.get_shuffled_template())
}

/// GET /api/view/{id} - Stored card, shuffled for this response
async fn get_card(
    State(service): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, BingoError> {
    service
        .get_by_id(&id)
        .map(Json)
        .inspect_err(|e| log::error!("bingo not available: id={} error={}", id, e))
}

/// POST /api/create - Store a submitted card, responds with its id
async fn create_card(
    State(service): State<ApiState>,
    payload: Result<Json<Card>, JsonRejection>,
) -> Result<impl IntoResponse, BingoError> {
    let Json(card) = payload.map_err(|rejection| {
        log::warn!("malformed bingo payload: {}", rejection.body_text());
        BingoError::Validation(rejection.body_text())
    })?;

    let title = card.title.clone();
    let id = service
        .create(card)
        .inspect_err(|e| log::error!("bingo not saved: title={:?} error={}", title, e))?;

    Ok((StatusCode::CREATED, id))
}

/// GET /api/search/{query} - Cards containing the query, `[]` when none do
async fn search_cards(
    State(service): State<ApiState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<Card>>, BingoError> {
    service
        .search(&query)
        .map(Json)
        .inspect_err(|e| log::error!("error during bingo search: query={:?} error={}", query, e))
}

/// GET /api/stats
async fn get_statistics(State(service): State<ApiState>) -> Result<Json<Statistics>, BingoError> {
    service
        .statistics()
        .map(Json)
        .inspect_err(|e| log::error!("stats not available: {}", e))
}

/// GET /api/index - Ensure the title index exists
async fn rebuild_index(State(service): State<ApiState>) -> Result<StatusCode, BingoError> {
    service
        .rebuild_title_index()
        .map(|()| StatusCode::OK)
        .inspect_err(|e| log::error!("title index not created: {}", e))
}

/// Logs one line per request with its status and latency
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} {}ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
