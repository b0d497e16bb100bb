//! Metric filter endpoints

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::types::ApiError;
use crate::data::filters::{
    AggregateOperator, CompileContext, FilterCompiler, FilterSet, TimeSeriesQuery,
    TimeSeriesTable, check_item_limit, parse_json_body,
};

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct MetricsApiState {
    pub compiler: Arc<FilterCompiler>,
    pub table: Arc<TimeSeriesTable>,
    pub max_filter_items: usize,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CompileFilterRequest {
    pub metric_name: String,
    #[serde(default)]
    pub filter: FilterSet,
    #[serde(default)]
    pub aggregation: AggregateOperator,
    #[serde(default)]
    pub exclude_keys: Vec<String>,
    #[serde(default)]
    pub group_by: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompileFilterResponse {
    pub predicate: String,
    pub query: String,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(state: MetricsApiState) -> Router<()> {
    Router::new()
        .route("/filter/compile", post(compile_filter))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Compile a label filter into a SQL predicate and its time-series sub-query
pub async fn compile_filter(
    State(state): State<MetricsApiState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CompileFilterResponse>, ApiError> {
    let body = body?;
    let req: CompileFilterRequest = parse_json_body(&body)?;
    check_item_limit(&req.filter, state.max_filter_items)?;

    if req.metric_name.trim().is_empty() {
        return Err(ApiError::bad_request(
            "MISSING_METRIC_NAME",
            "metric_name must not be empty",
        ));
    }

    let ctx = CompileContext::new(&req.metric_name)
        .with_exclude_keys(&req.exclude_keys)
        .with_aggregation(req.aggregation);
    let predicate = state.compiler.compile(&req.filter, &ctx)?;
    let query = TimeSeriesQuery::new(&state.compiler, &state.table).render(
        &predicate,
        req.aggregation,
        &req.group_by,
    );

    tracing::debug!(
        metric = %req.metric_name,
        items = req.filter.items.len(),
        "Compiled metric filter"
    );
    Ok(Json(CompileFilterResponse { predicate, query }))
}
