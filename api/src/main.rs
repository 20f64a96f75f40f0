//! GeoSense API Server
//!
//! Tracks motorcycles, parking spaces, patios and users of a repair yard.
//! Uses hexagonal (ports & adapters) architecture: API v1 is backed by
//! PostgreSQL, API v2 by MongoDB, both served by the same handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use sea_orm::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    MongoMotoRepository, MongoPatioRepository, MongoStore, MongoUsuarioRepository,
    MongoVagaRepository, PostgresHealth, PostgresMotoRepository, PostgresPatioRepository,
    PostgresUsuarioRepository, PostgresVagaRepository, SyncingVagaAggregateRepository,
};
use app::{
    AllocationService, DashboardService, MotoService, PatioService, UsuarioService, VagaService,
};
use config::Config;
use domain::ports::{
    MotoRepository, PatioRepository, UsuarioRepository, VagaAggregateRepository, VagaRepository,
};
use handlers::HealthState;

/// Services of one API version, shared across its handlers
#[derive(Clone)]
pub struct ApiState {
    pub motos: Arc<MotoService<dyn MotoRepository, dyn VagaAggregateRepository>>,
    pub vagas: Arc<VagaService<dyn VagaRepository, dyn VagaAggregateRepository>>,
    pub patios: Arc<PatioService<dyn PatioRepository, dyn VagaRepository>>,
    pub usuarios: Arc<UsuarioService<dyn UsuarioRepository>>,
    pub dashboard: Arc<DashboardService<dyn MotoRepository, dyn VagaRepository>>,
    pub allocation: Arc<AllocationService<dyn VagaAggregateRepository>>,
}

impl ApiState {
    /// Wire every service over one set of repositories
    pub fn new(
        motos: Arc<dyn MotoRepository>,
        vagas: Arc<dyn VagaRepository>,
        patios: Arc<dyn PatioRepository>,
        usuarios: Arc<dyn UsuarioRepository>,
    ) -> Self {
        let aggregates: Arc<dyn VagaAggregateRepository> = Arc::new(
            SyncingVagaAggregateRepository::new(vagas.clone(), motos.clone()),
        );

        // One allocation service per version: its per-space locks guard every
        // occupant change, whichever endpoint makes it
        let allocation = Arc::new(AllocationService::new(aggregates));

        Self {
            motos: Arc::new(MotoService::new(motos.clone(), allocation.clone())),
            vagas: Arc::new(VagaService::new(vagas.clone(), allocation.clone())),
            patios: Arc::new(PatioService::new(patios, vagas.clone())),
            usuarios: Arc::new(UsuarioService::new(usuarios)),
            dashboard: Arc::new(DashboardService::new(motos, vagas)),
            allocation,
        }
    }
}

/// Full router: `/health`, `/api/v1` and `/api/v2`
pub fn build_router(v1: ApiState, v2: ApiState, health: HealthState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .with_state(health);

    Router::new()
        .merge(health_routes)
        .nest("/api/v1", handlers::api_routes().with_state(v1))
        .nest("/api/v2", handlers::api_routes().with_state(v2))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,geosense_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GeoSense API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL (v1)
    tracing::info!("Connecting to PostgreSQL...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    tracing::info!("PostgreSQL connected");

    // Connect to MongoDB (v2)
    tracing::info!(database = %config.mongo_database, "Connecting to MongoDB...");
    let mongo = MongoStore::connect(&config.mongo_url, &config.mongo_database)
        .await
        .context("Failed to connect to MongoDB")?;
    tracing::info!("MongoDB client ready");

    let v1 = ApiState::new(
        Arc::new(PostgresMotoRepository::new(db.clone())),
        Arc::new(PostgresVagaRepository::new(db.clone())),
        Arc::new(PostgresPatioRepository::new(db.clone())),
        Arc::new(PostgresUsuarioRepository::new(db.clone())),
    );

    let v2 = ApiState::new(
        Arc::new(MongoMotoRepository::new(mongo.database())),
        Arc::new(MongoVagaRepository::new(mongo.database())),
        Arc::new(MongoPatioRepository::new(mongo.database())),
        Arc::new(MongoUsuarioRepository::new(mongo.database())),
    );

    let health = HealthState::new(vec![
        Arc::new(PostgresHealth::new(db)),
        Arc::new(mongo),
    ]);

    let app = build_router(v1, v2, health);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
