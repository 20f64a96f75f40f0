//! Moto service
//!
//! CRUD over motorcycles. Plate, chassis and space are unique among
//! motorcycles; the stores do not enforce it, so every write scans. The space
//! a motorcycle is parked in changes only through `AllocationService`, so the
//! space's occupant and the motorcycle's `vaga_id` stay in step.

use std::sync::Arc;

use super::AllocationService;
use crate::domain::entities::{Moto, MotoId, NewMoto};
use crate::domain::ports::{MotoRepository, VagaAggregateRepository};
use crate::error::{AppError, DomainError};

/// Service for managing motorcycles
pub struct MotoService<MR, AR>
where
    MR: MotoRepository + ?Sized,
    AR: VagaAggregateRepository + ?Sized,
{
    motos: Arc<MR>,
    allocation: Arc<AllocationService<AR>>,
}

impl<MR, AR> MotoService<MR, AR>
where
    MR: MotoRepository + ?Sized,
    AR: VagaAggregateRepository + ?Sized,
{
    pub fn new(motos: Arc<MR>, allocation: Arc<AllocationService<AR>>) -> Self {
        Self { motos, allocation }
    }

    pub async fn list(&self) -> Result<Vec<Moto>, AppError> {
        Ok(self.motos.list().await?)
    }

    pub async fn get(&self, id: MotoId) -> Result<Moto, AppError> {
        self.motos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Moto {} not found", id)))
    }

    /// Create a motorcycle, parking it when `vaga_id` is given
    ///
    /// The space must exist and be free. If the allocation fails the new
    /// record is removed again.
    pub async fn create(&self, mut data: NewMoto) -> Result<Moto, AppError> {
        self.ensure_unique(&data, None).await?;
        let target = data.vaga_id.take();
        if let Some(vaga_id) = target {
            self.allocation.ensure_free(vaga_id).await?;
        }

        let mut moto = self.motos.create(&data).await?;
        tracing::info!(moto_id = %moto.id, placa = %moto.placa, "Moto created");

        if let Some(vaga_id) = target {
            if let Err(e) = self.allocation.allocate(vaga_id, moto.id).await {
                tracing::warn!(moto_id = %moto.id, vaga_id = %vaga_id, error = %e, "Allocation failed, rolling back moto");
                self.motos.delete(moto.id).await?;
                return Err(e);
            }
            moto.vaga_id = Some(vaga_id);
        }
        Ok(moto)
    }

    /// Replace every field of an existing motorcycle
    ///
    /// A changed `vaga_id` vacates the old space and allocates the new one.
    pub async fn update(&self, id: MotoId, data: NewMoto) -> Result<(), AppError> {
        // 404 before uniqueness
        let current = self.get(id).await?;
        self.ensure_unique(&data, Some(id)).await?;

        let target = data.vaga_id;
        let moves = target != current.vaga_id;
        if moves {
            if let Some(vaga_id) = target {
                self.allocation.ensure_free(vaga_id).await?;
            }
        }

        let mut moto = data.into_moto(id);
        moto.vaga_id = current.vaga_id;
        self.motos.update(&moto).await?;

        if moves {
            if let Some(old) = current.vaga_id {
                self.allocation.vacate(old, id).await?;
            }
            if let Some(new) = target {
                self.allocation.allocate(new, id).await?;
            }
            tracing::info!(moto_id = %id, from = ?current.vaga_id, to = ?target, "Moto moved");
        }
        Ok(())
    }

    /// Delete a motorcycle, freeing the space it is parked in
    pub async fn delete(&self, id: MotoId) -> Result<(), AppError> {
        let moto = self.get(id).await?;
        if let Some(vaga_id) = moto.vaga_id {
            self.allocation.vacate(vaga_id, id).await?;
        }

        self.motos.delete(id).await?;
        tracing::info!(moto_id = %id, "Moto deleted");
        Ok(())
    }

    async fn ensure_unique(&self, data: &NewMoto, ignore: Option<MotoId>) -> Result<(), AppError> {
        let motos = self.motos.list().await?;
        let others = motos.iter().filter(|m| Some(m.id) != ignore);

        for other in others {
            if let Some(vaga_id) = data.vaga_id {
                if other.vaga_id == Some(vaga_id) {
                    return Err(rule(format!(
                        "Vaga {} is already held by moto {}",
                        vaga_id, other.id
                    )));
                }
            }
            if other.placa == data.placa {
                return Err(rule(format!("A moto with placa {} already exists", data.placa)));
            }
            if other.chassi.eq_ignore_ascii_case(&data.chassi) {
                return Err(rule(format!("A moto with chassi {} already exists", data.chassi)));
            }
        }
        Ok(())
    }
}

fn rule(msg: String) -> AppError {
    AppError::Domain(DomainError::RuleViolation(msg))
}
