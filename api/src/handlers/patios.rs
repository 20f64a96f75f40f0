//! Patio handlers

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::pagination::{Page, PageQuery};
use super::{created, Created};
use crate::app::PatioDetalhes;
use crate::domain::entities::{NewPatio, Patio, PatioId};
use crate::error::AppError;
use crate::ApiState;

#[derive(Debug, Deserialize, Validate)]
pub struct PatioRequest {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,
}

impl From<PatioRequest> for NewPatio {
    fn from(request: PatioRequest) -> Self {
        NewPatio {
            nome: request.nome.trim().to_string(),
        }
    }
}

/// GET /patio
pub async fn list_patios(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Patio>>, AppError> {
    query.validate()?;
    let patios = state.patios.list().await?;
    Ok(Json(Page::paginate(patios, &query, uri.path())))
}

/// GET /patio/:id
///
/// The patio with its spaces.
pub async fn get_patio(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<PatioDetalhes>, AppError> {
    Ok(Json(state.patios.get_details(PatioId(id)).await?))
}

/// POST /patio
pub async fn create_patio(
    State(state): State<ApiState>,
    payload: Result<Json<PatioRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Created<Patio>>), AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let patio = state.patios.create(request.into()).await?;
    Ok(created("Pátio cadastrado com sucesso.", patio))
}

/// PUT /patio/:id
pub async fn update_patio(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    payload: Result<Json<PatioRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    state.patios.update(PatioId(id), request.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /patio/:id
pub async fn delete_patio(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.patios.delete(PatioId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
