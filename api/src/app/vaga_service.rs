//! Vaga service
//!
//! CRUD over parking spaces plus the free-space summary. Occupancy is never
//! written here: updates and deletes go through `AllocationService` so they
//! share its per-space lock.

use std::sync::Arc;

use serde::Serialize;

use super::AllocationService;
use crate::domain::entities::{NewVaga, StatusVaga, Vaga, VagaId};
use crate::domain::ports::{VagaAggregateRepository, VagaRepository};
use crate::error::{AppError, DomainError};

/// Free spaces split by whether they are reserved for a defect category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VagasLivres {
    pub livres_com_problema: usize,
    pub livres_sem_problema: usize,
}

/// Service for managing parking spaces
pub struct VagaService<VR, AR>
where
    VR: VagaRepository + ?Sized,
    AR: VagaAggregateRepository + ?Sized,
{
    vagas: Arc<VR>,
    allocation: Arc<AllocationService<AR>>,
}

impl<VR, AR> VagaService<VR, AR>
where
    VR: VagaRepository + ?Sized,
    AR: VagaAggregateRepository + ?Sized,
{
    pub fn new(vagas: Arc<VR>, allocation: Arc<AllocationService<AR>>) -> Self {
        Self { vagas, allocation }
    }

    pub async fn list(&self) -> Result<Vec<Vaga>, AppError> {
        Ok(self.vagas.list().await?)
    }

    pub async fn get(&self, id: VagaId) -> Result<Vaga, AppError> {
        self.vagas
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vaga {} not found", id)))
    }

    /// Create a free space. Spaces become occupied only through allocation.
    pub async fn create(&self, data: NewVaga) -> Result<Vaga, AppError> {
        if data.numero <= 0 {
            return Err(AppError::Domain(DomainError::Validation(
                "Vaga number must be greater than zero".to_string(),
            )));
        }
        if data.status != StatusVaga::Livre {
            return Err(AppError::Domain(DomainError::RuleViolation(
                "A new vaga must be LIVRE; use alocar to occupy it".to_string(),
            )));
        }
        self.ensure_unique_numero(&data, None).await?;

        let vaga = self.vagas.create(&data).await?;
        tracing::info!(vaga_id = %vaga.id, numero = vaga.numero, patio_id = %vaga.patio_id, "Vaga created");
        Ok(vaga)
    }

    /// Update number, kind and patio
    ///
    /// The occupant is kept. The requested status must match the current one.
    pub async fn update(&self, id: VagaId, data: NewVaga) -> Result<(), AppError> {
        self.get(id).await?;
        self.ensure_unique_numero(&data, Some(id)).await?;

        self.allocation
            .reconfigure(id, data.numero, data.tipo, data.patio_id, data.status)
            .await
    }

    /// Delete a space, clearing its occupant's reference first
    pub async fn delete(&self, id: VagaId) -> Result<(), AppError> {
        self.allocation.remove(id).await
    }

    /// Count free spaces with and without a defect category
    pub async fn free_summary(&self) -> Result<VagasLivres, AppError> {
        let vagas = self.vagas.list().await?;
        let (com_problema, sem_problema): (Vec<&Vaga>, Vec<&Vaga>) = vagas
            .iter()
            .filter(|v| v.is_free())
            .partition(|v| v.tipo.is_problem());

        Ok(VagasLivres {
            livres_com_problema: com_problema.len(),
            livres_sem_problema: sem_problema.len(),
        })
    }

    async fn ensure_unique_numero(
        &self,
        data: &NewVaga,
        ignore: Option<VagaId>,
    ) -> Result<(), AppError> {
        let taken = self
            .vagas
            .find_by_patio(data.patio_id)
            .await?
            .iter()
            .any(|v| v.numero == data.numero && Some(v.id) != ignore);

        if taken {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Vaga {} already exists in patio {}",
                data.numero, data.patio_id
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::aggregate::SyncingVagaAggregateRepository;
    use crate::domain::entities::{MotoId, PatioId, TipoVaga};
    use crate::domain::ports::MotoRepository;
    use crate::test_utils::{test_moto, test_vaga, InMemoryMotoRepository, InMemoryVagaRepository};

    type Aggregates = SyncingVagaAggregateRepository<InMemoryVagaRepository, InMemoryMotoRepository>;

    struct Harness {
        service: VagaService<InMemoryVagaRepository, Aggregates>,
        allocation: Arc<AllocationService<Aggregates>>,
        motos: Arc<InMemoryMotoRepository>,
    }

    fn harness(repo: InMemoryVagaRepository) -> Harness {
        let vagas = Arc::new(repo);
        let motos = Arc::new(
            InMemoryMotoRepository::new().with_moto(test_moto(MotoId(7), "ABC1D23")),
        );
        let allocation = Arc::new(AllocationService::new(Arc::new(
            SyncingVagaAggregateRepository::new(vagas.clone(), motos.clone()),
        )));

        Harness {
            service: VagaService::new(vagas, allocation.clone()),
            allocation,
            motos,
        }
    }

    fn one_vaga() -> Harness {
        harness(InMemoryVagaRepository::new().with_vaga(test_vaga(VagaId(1), 12)))
    }

    #[tokio::test]
    async fn create_rejects_duplicate_numero_in_same_patio() {
        let h = one_vaga();

        let err = h
            .service
            .create(NewVaga::new(12, PatioId(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::AlreadyExists(_))));

        // Same number in another patio is fine
        let vaga = h.service.create(NewVaga::new(12, PatioId(2))).await.unwrap();
        assert_eq!(vaga.patio_id, PatioId(2));
    }

    #[tokio::test]
    async fn create_rejects_non_positive_numero() {
        let h = harness(InMemoryVagaRepository::new());

        let err = h.service.create(NewVaga::new(0, PatioId(1))).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn create_refuses_occupied_status() {
        let h = harness(InMemoryVagaRepository::new());

        let data = NewVaga {
            status: StatusVaga::Ocupada,
            ..NewVaga::new(5, PatioId(1))
        };
        let err = h.service.create(data).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RuleViolation(_))
        ));
        assert!(h.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_attributes() {
        let h = one_vaga();

        let data = NewVaga {
            tipo: TipoVaga::MotorDefeituoso,
            ..NewVaga::new(13, PatioId(1))
        };
        h.service.update(VagaId(1), data).await.unwrap();

        let vaga = h.service.get(VagaId(1)).await.unwrap();
        assert_eq!(vaga.numero, 13);
        assert_eq!(vaga.tipo, TipoVaga::MotorDefeituoso);
    }

    #[tokio::test]
    async fn update_cannot_mark_free_space_occupied() {
        let h = one_vaga();

        let data = NewVaga {
            status: StatusVaga::Ocupada,
            ..NewVaga::new(12, PatioId(1))
        };
        let err = h.service.update(VagaId(1), data).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RuleViolation(_))
        ));

        // The space still accepts an allocation
        h.allocation.allocate(VagaId(1), MotoId(7)).await.unwrap();
    }

    #[tokio::test]
    async fn update_keeps_occupied_space_occupied() {
        let h = one_vaga();
        h.allocation.allocate(VagaId(1), MotoId(7)).await.unwrap();

        let data = NewVaga {
            status: StatusVaga::Ocupada,
            ..NewVaga::new(14, PatioId(1))
        };
        h.service.update(VagaId(1), data).await.unwrap();

        let vaga = h.service.get(VagaId(1)).await.unwrap();
        assert_eq!(vaga.numero, 14);
        assert_eq!(vaga.status, StatusVaga::Ocupada);
        assert_eq!(vaga.moto.map(|m| m.id), Some(MotoId(7)));

        // Freeing it through update is refused
        let err = h
            .service
            .update(VagaId(1), NewVaga::new(14, PatioId(1)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RuleViolation(_))
        ));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let h = harness(InMemoryVagaRepository::new());

        let err = h
            .service
            .update(VagaId(5), NewVaga::new(1, PatioId(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_clears_occupant_reference() {
        let h = one_vaga();
        h.allocation.allocate(VagaId(1), MotoId(7)).await.unwrap();

        h.service.delete(VagaId(1)).await.unwrap();

        let err = h.service.get(VagaId(1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let moto = h.motos.find_by_id(MotoId(7)).await.unwrap().unwrap();
        assert_eq!(moto.vaga_id, None);

        let err = h.service.delete(VagaId(1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn free_summary_counts_only_free_spaces() {
        let problem = Vaga {
            tipo: TipoVaga::ReparoSimples,
            ..test_vaga(VagaId(2), 2)
        };
        let h = harness(
            InMemoryVagaRepository::new()
                .with_vaga(test_vaga(VagaId(1), 1))
                .with_vaga(problem)
                .with_vaga(test_vaga(VagaId(3), 3)),
        );
        h.allocation.allocate(VagaId(3), MotoId(7)).await.unwrap();

        let summary = h.service.free_summary().await.unwrap();
        assert_eq!(
            summary,
            VagasLivres {
                livres_com_problema: 1,
                livres_sem_problema: 1,
            }
        );
    }
}
