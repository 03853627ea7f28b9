use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::record::{RepositoryError, WeighId, WeighRepository};
use super::service::{WeighService, WeighServiceError, WeighSubmission};

/// Router builder exposing weigh evaluation and retrieval.
pub fn weigh_router<R>(service: Arc<WeighService<R>>) -> Router
where
    R: WeighRepository + 'static,
{
    Router::new()
        .route("/api/v1/weighs", post(submit_handler::<R>))
        .route("/api/v1/weighs/evaluate", post(evaluate_handler::<R>))
        .route("/api/v1/weighs/:weigh_id", get(fetch_handler::<R>))
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<WeighService<R>>>,
    axum::Json(submission): axum::Json<WeighSubmission>,
) -> Response
where
    R: WeighRepository + 'static,
{
    match service.evaluate(&submission) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome.result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<WeighService<R>>>,
    axum::Json(submission): axum::Json<WeighSubmission>,
) -> Response
where
    R: WeighRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<WeighService<R>>>,
    Path(weigh_id): Path<String>,
) -> Response
where
    R: WeighRepository + 'static,
{
    let id = WeighId(weigh_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(WeighServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "weigh not found",
                "weigh_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn error_response(error: WeighServiceError) -> Response {
    let status = match &error {
        WeighServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        error if error.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
        other => {
            tracing::error!(error = %other, "weigh request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
