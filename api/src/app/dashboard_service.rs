//! Dashboard service
//!
//! Yard-wide counters. A space counts as occupied when it records an occupant.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::ports::{MotoRepository, VagaRepository};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_motos: usize,
    pub motos_com_problema: usize,
    pub vagas_livres: usize,
    pub vagas_ocupadas: usize,
    pub total_vagas: usize,
}

pub struct DashboardService<MR, VR>
where
    MR: MotoRepository + ?Sized,
    VR: VagaRepository + ?Sized,
{
    motos: Arc<MR>,
    vagas: Arc<VR>,
}

impl<MR, VR> DashboardService<MR, VR>
where
    MR: MotoRepository + ?Sized,
    VR: VagaRepository + ?Sized,
{
    pub fn new(motos: Arc<MR>, vagas: Arc<VR>) -> Self {
        Self { motos, vagas }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let (motos, vagas) = tokio::try_join!(self.motos.list(), self.vagas.list())?;

        let vagas_ocupadas = vagas.iter().filter(|v| v.moto.is_some()).count();

        Ok(DashboardSummary {
            total_motos: motos.len(),
            motos_com_problema: motos.iter().filter(|m| m.has_problem()).count(),
            vagas_livres: vagas.len() - vagas_ocupadas,
            vagas_ocupadas,
            total_vagas: vagas.len(),
        })
    }
}
