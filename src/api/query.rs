//! JSON query endpoint

use std::time::Instant;

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequest, QueryResponse};
use crate::domain::{DomainError, PipelineResult};
use crate::infrastructure::observability::record_query;

/// POST /api/query
pub async fn create_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    info!(request_id = %request_id, "Processing query request");

    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("Query cannot be empty").with_code("empty_query"));
    }

    let result = answer(&state, &request.query).await?;

    info!(
        request_id = %request_id,
        documents = result.documents.len(),
        "Query request completed"
    );

    Ok(Json(QueryResponse::from(result)))
}

/// Run the pipeline and record the outcome
pub(crate) async fn answer(state: &AppState, query: &str) -> Result<PipelineResult, DomainError> {
    let start = Instant::now();
    let result = state.query_service.answer(query).await;

    record_query(
        result.is_ok(),
        result.as_ref().map(|r| r.documents.len()).unwrap_or(0),
        start.elapsed(),
    );

    result
}
