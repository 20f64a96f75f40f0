//! Store-agnostic adapter for `VagaAggregateRepository`
//!
//! Persists the aggregate through any `VagaRepository` and keeps the
//! `vaga_id` back-reference of the affected motorcycles in step through any
//! `MotoRepository`. There is no transaction spanning the two: the space update
//! is the primary write, motorcycle updates are best-effort and their failures
//! are logged and reported as `SyncOutcome::Partial`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::aggregates::VagaAggregate;
use crate::domain::entities::{AllocatedMoto, MotoId, VagaId};
use crate::domain::ports::{MotoRepository, SyncOutcome, VagaAggregateRepository, VagaRepository};
use crate::error::DomainError;

pub struct SyncingVagaAggregateRepository<VR, MR>
where
    VR: VagaRepository + ?Sized,
    MR: MotoRepository + ?Sized,
{
    vagas: Arc<VR>,
    motos: Arc<MR>,
}

impl<VR, MR> SyncingVagaAggregateRepository<VR, MR>
where
    VR: VagaRepository + ?Sized,
    MR: MotoRepository + ?Sized,
{
    pub fn new(vagas: Arc<VR>, motos: Arc<MR>) -> Self {
        Self { vagas, motos }
    }

    /// Point a motorcycle at a space (or at none)
    ///
    /// A missing motorcycle is not an error: there is nothing to keep in step.
    async fn set_moto_vaga(
        &self,
        moto_id: MotoId,
        vaga_id: Option<VagaId>,
    ) -> Result<Option<AllocatedMoto>, DomainError> {
        let Some(mut moto) = self.motos.find_by_id(moto_id).await? else {
            tracing::debug!(moto_id = %moto_id, "Moto not found during sync, skipping");
            return Ok(None);
        };

        moto.vaga_id = vaga_id;
        self.motos.update(&moto).await?;

        Ok(Some(AllocatedMoto::from_parts(
            moto.id,
            &moto.modelo,
            &moto.placa,
            &moto.chassi,
        )))
    }
}

#[async_trait]
impl<VR, MR> VagaAggregateRepository for SyncingVagaAggregateRepository<VR, MR>
where
    VR: VagaRepository + ?Sized,
    MR: MotoRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<VagaAggregate>, DomainError> {
        self.vagas
            .list()
            .await?
            .iter()
            .map(|v| VagaAggregate::from_persistence(Some(v)))
            .collect()
    }

    async fn find_by_id(&self, id: VagaId) -> Result<Option<VagaAggregate>, DomainError> {
        match self.vagas.find_by_id(id).await? {
            Some(vaga) => Ok(Some(VagaAggregate::from_persistence(Some(&vaga))?)),
            None => Ok(None),
        }
    }

    async fn parked_in(&self, moto_id: MotoId) -> Result<Option<VagaId>, DomainError> {
        Ok(self
            .motos
            .find_by_id(moto_id)
            .await?
            .and_then(|m| m.vaga_id))
    }

    async fn update(&self, aggregate: &VagaAggregate) -> Result<SyncOutcome, DomainError> {
        let mut stored = self
            .vagas
            .find_by_id(aggregate.id())
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Vaga {} not found", aggregate.id())))?;

        let previous_moto_id = stored.moto.as_ref().map(|m| m.id);
        aggregate.apply_to_persistence(&mut stored);
        self.vagas.update(&stored).await?;

        let new_moto_id = aggregate.moto_id();
        if previous_moto_id == new_moto_id {
            return Ok(SyncOutcome::Unchanged);
        }

        let mut failures = Vec::new();

        if let Some(previous) = previous_moto_id {
            if let Err(e) = self.set_moto_vaga(previous, None).await {
                tracing::warn!(
                    error = %e,
                    moto_id = %previous,
                    vaga_id = %aggregate.id(),
                    "Failed to clear vaga reference of previous moto"
                );
                failures.push(format!("clear moto {}: {}", previous, e));
            }
        }

        if let Some(new) = new_moto_id {
            match self.set_moto_vaga(new, Some(aggregate.id())).await {
                Ok(Some(details)) => {
                    // Replace the placeholder with the real descriptive fields
                    stored.moto = Some(details);
                    if let Err(e) = self.vagas.update(&stored).await {
                        tracing::warn!(
                            error = %e,
                            vaga_id = %aggregate.id(),
                            "Failed to record moto details on vaga"
                        );
                        failures.push(format!("record moto {} details: {}", new, e));
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        moto_id = %new,
                        vaga_id = %aggregate.id(),
                        "Failed to set vaga reference of new moto"
                    );
                    failures.push(format!("set moto {}: {}", new, e));
                }
            }
        }

        Ok(SyncOutcome::from_failures(failures))
    }

    async fn remove(&self, aggregate: &VagaAggregate) -> Result<(), DomainError> {
        let stored = self
            .vagas
            .find_by_id(aggregate.id())
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Vaga {} not found", aggregate.id())))?;

        if let Some(moto) = stored.moto.as_ref() {
            self.set_moto_vaga(moto.id, None).await?;
        }

        self.vagas.delete(aggregate.id()).await
    }
}
