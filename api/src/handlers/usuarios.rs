//! Usuario handlers

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use super::pagination::{Page, PageQuery};
use super::{created, Created};
use crate::app::UsuarioData;
use crate::domain::entities::{Email, TipoUsuario, Usuario, UsuarioId};
use crate::error::AppError;
use crate::ApiState;

/// Body of `POST /usuario` and `PUT /usuario/:id`. `tipo` is 0 (administrador)
/// or 1 (mecânico).
#[derive(Debug, Deserialize, Validate)]
pub struct UsuarioRequest {
    #[validate(length(min = 1, max = 100))]
    pub nome: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 6))]
    pub senha: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 1))]
    pub tipo: i32,
}

impl UsuarioRequest {
    fn into_data(self) -> Result<UsuarioData, AppError> {
        let tipo = TipoUsuario::from_code(self.tipo)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown tipo {}", self.tipo)))?;

        Ok(UsuarioData {
            nome: self.nome.trim().to_string(),
            email: Email::parse(&self.email)?,
            senha: self.senha,
            tipo,
        })
    }
}

/// GET /usuario
pub async fn list_usuarios(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Usuario>>, AppError> {
    query.validate()?;
    let usuarios = state.usuarios.list().await?;
    Ok(Json(Page::paginate(usuarios, &query, uri.path())))
}

/// GET /usuario/:id
pub async fn get_usuario(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<Json<Usuario>, AppError> {
    Ok(Json(state.usuarios.get(UsuarioId(id)).await?))
}

/// GET /usuario/by-email/:email
pub async fn get_usuario_by_email(
    State(state): State<ApiState>,
    Path(email): Path<String>,
) -> Result<Json<Usuario>, AppError> {
    Ok(Json(state.usuarios.find_by_email(&email).await?))
}

/// POST /usuario
pub async fn create_usuario(
    State(state): State<ApiState>,
    payload: Result<Json<UsuarioRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Created<Usuario>>), AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let usuario = state.usuarios.create(request.into_data()?).await?;
    Ok(created("Usuário cadastrado com sucesso.", usuario))
}

/// PUT /usuario/:id
pub async fn update_usuario(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    payload: Result<Json<UsuarioRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    state
        .usuarios
        .update(UsuarioId(id), request.into_data()?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /usuario/:id
pub async fn delete_usuario(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.usuarios.delete(UsuarioId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
