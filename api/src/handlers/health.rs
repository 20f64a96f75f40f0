//! Health check handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::domain::ports::HealthProbe;

/// Stores pinged by `GET /health`
#[derive(Clone)]
pub struct HealthState {
    probes: Arc<Vec<Arc<dyn HealthProbe>>>,
}

impl HealthState {
    pub fn new(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        Self {
            probes: Arc::new(probes),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: Vec<CheckResult>,
}

/// GET /health
///
/// 200 when every store answers, 503 otherwise.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = Vec::with_capacity(state.probes.len());
    for probe in state.probes.iter() {
        let result = probe.ping().await;
        if let Err(e) = &result {
            tracing::warn!(store = probe.name(), error = %e, "Health check failed");
        }
        checks.push(CheckResult {
            name: probe.name(),
            healthy: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
        });
    }

    let healthy = checks.iter().all(|c| c.healthy);
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }),
    )
}
