//! Allocation handlers
//!
//! Space allocation and release through the allocation aggregate. The
//! outcome of the motorcycle back-reference sync is logged, not returned.

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::pagination::{Page, PageQuery};
use crate::domain::aggregates::VagaAggregate;
use crate::domain::entities::{MotoId, VagaId};
use crate::domain::ports::SyncOutcome;
use crate::error::AppError;
use crate::ApiState;

#[derive(Debug, Deserialize)]
pub struct AlocarRequest {
    pub moto_id: i64,
}

fn log_partial(vaga_id: i64, outcome: &SyncOutcome) {
    if let SyncOutcome::Partial { failures } = outcome {
        tracing::warn!(vaga_id, ?failures, "Allocation persisted with unsynced motos");
    }
}

/// GET /vaga-aggregate
pub async fn list_aggregates(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<VagaAggregate>>, AppError> {
    query.validate()?;
    let aggregates = state.allocation.list().await?;
    Ok(Json(Page::paginate(aggregates, &query, uri.path())))
}

/// GET /vaga-aggregate/:id
pub async fn get_aggregate(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<VagaAggregate>, AppError> {
    Ok(Json(state.allocation.get(VagaId(id)).await?))
}

/// POST /vaga-aggregate/:id/alocar
pub async fn alocar(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    payload: Result<Json<AlocarRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    let outcome = state
        .allocation
        .allocate(VagaId(id), MotoId(request.moto_id))
        .await?;
    log_partial(id, &outcome);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /vaga-aggregate/:id/liberar
pub async fn liberar(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let outcome = state.allocation.release(VagaId(id)).await?;
    log_partial(id, &outcome);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /vaga-aggregate/:id
pub async fn remove_aggregate(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.allocation.remove(VagaId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
