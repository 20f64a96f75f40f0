//! HTTP handlers
//!
//! Axum request handlers for the API endpoints. The same routes are served
//! under `/api/v1` (PostgreSQL) and `/api/v2` (MongoDB); only the state differs.

pub mod dashboard;
pub mod health;
pub mod motos;
pub mod pagination;
pub mod patios;
pub mod usuarios;
pub mod vaga_aggregate;
pub mod vagas;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

pub use health::{health, HealthState};

use crate::ApiState;

/// Body of a `201 Created` response
#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub mensagem: &'static str,
    pub dados: T,
}

pub fn created<T>(mensagem: &'static str, dados: T) -> (StatusCode, Json<Created<T>>) {
    (StatusCode::CREATED, Json(Created { mensagem, dados }))
}

/// Routes of one API version
pub fn api_routes() -> Router<ApiState> {
    Router::new()
        .route("/moto", get(motos::list_motos).post(motos::create_moto))
        .route(
            "/moto/:id",
            get(motos::get_moto)
                .put(motos::update_moto)
                .delete(motos::delete_moto),
        )
        .route("/vaga", get(vagas::list_vagas).post(vagas::create_vaga))
        .route("/vaga/livres", get(vagas::vagas_livres))
        .route(
            "/vaga/:id",
            get(vagas::get_vaga)
                .put(vagas::update_vaga)
                .delete(vagas::delete_vaga),
        )
        .route("/patio", get(patios::list_patios).post(patios::create_patio))
        .route(
            "/patio/:id",
            get(patios::get_patio)
                .put(patios::update_patio)
                .delete(patios::delete_patio),
        )
        .route(
            "/usuario",
            get(usuarios::list_usuarios).post(usuarios::create_usuario),
        )
        .route(
            "/usuario/by-email/:email",
            get(usuarios::get_usuario_by_email),
        )
        .route(
            "/usuario/:id",
            get(usuarios::get_usuario)
                .put(usuarios::update_usuario)
                .delete(usuarios::delete_usuario),
        )
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/vaga-aggregate", get(vaga_aggregate::list_aggregates))
        .route(
            "/vaga-aggregate/:id",
            get(vaga_aggregate::get_aggregate).delete(vaga_aggregate::remove_aggregate),
        )
        .route("/vaga-aggregate/:id/alocar", post(vaga_aggregate::alocar))
        .route("/vaga-aggregate/:id/liberar", post(vaga_aggregate::liberar))
}
