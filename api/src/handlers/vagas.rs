//! Vaga handlers

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::pagination::{Page, PageQuery};
use super::{created, Created};
use crate::app::VagasLivres;
use crate::domain::entities::{NewVaga, PatioId, StatusVaga, TipoVaga, Vaga, VagaId};
use crate::error::AppError;
use crate::ApiState;

/// Body of `POST /vaga` and `PUT /vaga/:id`. `tipo` and `status` are numeric
/// codes; `status` only echoes occupancy, which alocar/liberar change.
#[derive(Debug, Deserialize, Validate)]
pub struct VagaRequest {
    #[validate(range(min = 1))]
    pub numero: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 4))]
    pub tipo: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 1))]
    pub status: i32,
    #[validate(range(min = 1))]
    pub patio_id: i64,
}

impl VagaRequest {
    fn into_new_vaga(self) -> Result<NewVaga, AppError> {
        let tipo = TipoVaga::from_code(self.tipo)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown tipo {}", self.tipo)))?;
        let status = StatusVaga::from_code(self.status)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown status {}", self.status)))?;

        Ok(NewVaga {
            numero: self.numero,
            tipo,
            status,
            patio_id: PatioId(self.patio_id),
        })
    }
}

/// GET /vaga
pub async fn list_vagas(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Vaga>>, AppError> {
    query.validate()?;
    let vagas = state.vagas.list().await?;
    Ok(Json(Page::paginate(vagas, &query, uri.path())))
}

/// GET /vaga/livres
///
/// Free spaces, split by defect category.
pub async fn vagas_livres(State(state): State<ApiState>) -> Result<Json<VagasLivres>, AppError> {
    Ok(Json(state.vagas.free_summary().await?))
}

/// GET /vaga/:id
pub async fn get_vaga(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Vaga>, AppError> {
    Ok(Json(state.vagas.get(VagaId(id)).await?))
}

/// POST /vaga
pub async fn create_vaga(
    State(state): State<ApiState>,
    payload: Result<Json<VagaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Created<Vaga>>), AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let vaga = state.vagas.create(request.into_new_vaga()?).await?;
    Ok(created("Vaga cadastrada com sucesso.", vaga))
}

/// PUT /vaga/:id
pub async fn update_vaga(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    payload: Result<Json<VagaRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    state
        .vagas
        .update(VagaId(id), request.into_new_vaga()?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /vaga/:id
pub async fn delete_vaga(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.vagas.delete(VagaId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
