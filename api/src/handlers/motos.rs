//! Moto handlers

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::pagination::{Page, PageQuery};
use super::{created, Created};
use crate::domain::entities::{Moto, MotoId, NewMoto, Placa, VagaId};
use crate::error::AppError;
use crate::ApiState;

/// Body of `POST /moto` and `PUT /moto/:id`
#[derive(Debug, Deserialize, Validate)]
pub struct MotoRequest {
    #[validate(length(min = 1, max = 50))]
    pub modelo: String,
    pub placa: String,
    #[validate(length(min = 1, max = 50))]
    pub chassi: String,
    pub problema_identificado: Option<String>,
    #[validate(range(min = 1))]
    pub vaga_id: Option<i64>,
    #[serde(default)]
    pub defeitos: Vec<String>,
}

impl MotoRequest {
    fn into_new_moto(self) -> Result<NewMoto, AppError> {
        Ok(NewMoto {
            modelo: self.modelo.trim().to_string(),
            placa: Placa::parse(&self.placa)?,
            chassi: self.chassi.trim().to_string(),
            problema_identificado: self
                .problema_identificado
                .filter(|p| !p.trim().is_empty()),
            vaga_id: self.vaga_id.map(VagaId),
            defeitos: self.defeitos,
        })
    }
}

/// GET /moto
pub async fn list_motos(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Moto>>, AppError> {
    query.validate()?;
    let motos = state.motos.list().await?;
    Ok(Json(Page::paginate(motos, &query, uri.path())))
}

/// GET /moto/:id
pub async fn get_moto(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Moto>, AppError> {
    Ok(Json(state.motos.get(MotoId(id)).await?))
}

/// POST /moto
pub async fn create_moto(
    State(state): State<ApiState>,
    payload: Result<Json<MotoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Created<Moto>>), AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let moto = state.motos.create(request.into_new_moto()?).await?;
    Ok(created("Moto cadastrada com sucesso.", moto))
}

/// PUT /moto/:id
pub async fn update_moto(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    payload: Result<Json<MotoRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    state
        .motos
        .update(MotoId(id), request.into_new_moto()?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /moto/:id
pub async fn delete_moto(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.motos.delete(MotoId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
