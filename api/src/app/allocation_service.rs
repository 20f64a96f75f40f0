//! Allocation service
//!
//! Every change to a space's occupant or attributes goes through here, so the
//! load-mutate-persist sequence runs under a per-space async lock. Allocation
//! also holds a per-motorcycle lock so one motorcycle cannot be parked in two
//! spaces at once. Locks are in-process only; separate processes sharing a
//! store are not coordinated.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

use crate::domain::aggregates::VagaAggregate;
use crate::domain::entities::{MotoId, PatioId, StatusVaga, TipoVaga, VagaId};
use crate::domain::ports::{SyncOutcome, VagaAggregateRepository};
use crate::error::{AppError, DomainError};

/// Async locks keyed by id. An entry lives only while someone holds or waits
/// on it.
struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<tokio::sync::Mutex<()>>>>,
}

impl<K: Eq + Hash + Copy> KeyedLocks<K> {
    fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire(&self, key: K) -> KeyedGuard<'_, K> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(key).or_default().clone()
        };
        let guard = lock.lock_owned().await;

        KeyedGuard {
            owner: self,
            key,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

struct KeyedGuard<'a, K: Eq + Hash + Copy> {
    owner: &'a KeyedLocks<K>,
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K: Eq + Hash + Copy> Drop for KeyedGuard<'_, K> {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Only the map's own reference left: nobody holds or waits on it
        let mut locks = self
            .owner
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.key);
        }
    }
}

/// Service for allocating motorcycles to spaces
pub struct AllocationService<AR>
where
    AR: VagaAggregateRepository + ?Sized,
{
    aggregates: Arc<AR>,
    spaces: KeyedLocks<VagaId>,
    motos: KeyedLocks<MotoId>,
}

impl<AR> AllocationService<AR>
where
    AR: VagaAggregateRepository + ?Sized,
{
    pub fn new(aggregates: Arc<AR>) -> Self {
        Self {
            aggregates,
            spaces: KeyedLocks::new(),
            motos: KeyedLocks::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<VagaAggregate>, AppError> {
        Ok(self.aggregates.list().await?)
    }

    pub async fn get(&self, id: VagaId) -> Result<VagaAggregate, AppError> {
        self.aggregates
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vaga {} not found", id)))
    }

    /// Fail unless the space exists and is free
    ///
    /// A pre-check only: `allocate` checks again under the lock.
    pub async fn ensure_free(&self, id: VagaId) -> Result<(), AppError> {
        if self.get(id).await?.is_occupied() {
            return Err(rule(format!("Vaga {} is already occupied", id)));
        }
        Ok(())
    }

    /// Park a motorcycle in a free space
    ///
    /// A motorcycle already parked in another space must be released from it
    /// first.
    pub async fn allocate(&self, id: VagaId, moto_id: MotoId) -> Result<SyncOutcome, AppError> {
        let _moto = self.motos.acquire(moto_id).await;
        let _space = self.spaces.acquire(id).await;

        let mut aggregate = self.get(id).await?;
        aggregate.allocate_moto(moto_id)?;

        if let Some(other) = self.aggregates.parked_in(moto_id).await? {
            if other != id {
                return Err(rule(format!(
                    "Moto {} is already parked in vaga {}",
                    moto_id, other
                )));
            }
        }

        let outcome = self.aggregates.update(&aggregate).await?;

        tracing::info!(vaga_id = %id, moto_id = %moto_id, ?outcome, "Moto allocated");
        Ok(outcome)
    }

    /// Free a space. Releasing a free space succeeds without changes.
    pub async fn release(&self, id: VagaId) -> Result<SyncOutcome, AppError> {
        let _space = self.spaces.acquire(id).await;

        let mut aggregate = self.get(id).await?;
        aggregate.release_space();
        let outcome = self.aggregates.update(&aggregate).await?;

        tracing::info!(vaga_id = %id, ?outcome, "Vaga released");
        Ok(outcome)
    }

    /// Free a space only if it holds the given motorcycle
    ///
    /// A missing space or a different occupant leave everything untouched.
    pub async fn vacate(&self, id: VagaId, moto_id: MotoId) -> Result<SyncOutcome, AppError> {
        let _moto = self.motos.acquire(moto_id).await;
        let _space = self.spaces.acquire(id).await;

        let Some(mut aggregate) = self.aggregates.find_by_id(id).await? else {
            return Ok(SyncOutcome::Unchanged);
        };
        if aggregate.moto_id() != Some(moto_id) {
            return Ok(SyncOutcome::Unchanged);
        }

        aggregate.release_space();
        let outcome = self.aggregates.update(&aggregate).await?;

        tracing::info!(vaga_id = %id, moto_id = %moto_id, ?outcome, "Vaga vacated");
        Ok(outcome)
    }

    /// Replace number, kind and patio of a space, keeping its occupant
    ///
    /// `status` must match the current occupancy; only allocation changes it.
    pub async fn reconfigure(
        &self,
        id: VagaId,
        numero: i32,
        tipo: TipoVaga,
        patio_id: PatioId,
        status: StatusVaga,
    ) -> Result<(), AppError> {
        let _space = self.spaces.acquire(id).await;

        let mut aggregate = self.get(id).await?;
        if status != aggregate.status() {
            return Err(rule(format!(
                "Vaga {} is {}; status changes only through alocar/liberar",
                id,
                aggregate.status()
            )));
        }
        aggregate.update_attributes(numero, tipo, patio_id)?;
        self.aggregates.update(&aggregate).await?;
        Ok(())
    }

    /// Delete a space, clearing its occupant's reference first
    pub async fn remove(&self, id: VagaId) -> Result<(), AppError> {
        let _space = self.spaces.acquire(id).await;

        let aggregate = self.get(id).await?;
        self.aggregates.remove(&aggregate).await?;

        tracing::info!(vaga_id = %id, "Vaga removed");
        Ok(())
    }
}

fn rule(msg: String) -> AppError {
    AppError::Domain(DomainError::RuleViolation(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::aggregate::SyncingVagaAggregateRepository;
    use crate::domain::ports::{MotoRepository, VagaRepository};
    use crate::test_utils::{test_moto, test_vaga, InMemoryMotoRepository, InMemoryVagaRepository};

    type Repo = SyncingVagaAggregateRepository<InMemoryVagaRepository, InMemoryMotoRepository>;

    struct Harness {
        service: Arc<AllocationService<Repo>>,
        vagas: Arc<InMemoryVagaRepository>,
        motos: Arc<InMemoryMotoRepository>,
    }

    fn harness() -> Harness {
        let vagas = Arc::new(
            InMemoryVagaRepository::new()
                .with_vaga(test_vaga(VagaId(1), 12))
                .with_vaga(test_vaga(VagaId(2), 13)),
        );
        let motos = Arc::new(
            InMemoryMotoRepository::new()
                .with_moto(test_moto(MotoId(7), "ABC1D23"))
                .with_moto(test_moto(MotoId(8), "XYZ9K88")),
        );
        let repo = Arc::new(SyncingVagaAggregateRepository::new(
            vagas.clone(),
            motos.clone(),
        ));

        Harness {
            service: Arc::new(AllocationService::new(repo)),
            vagas,
            motos,
        }
    }

    #[tokio::test]
    async fn allocate_then_release() {
        let h = harness();

        let outcome = h.service.allocate(VagaId(1), MotoId(7)).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Synced);
        let agg = h.service.get(VagaId(1)).await.unwrap();
        assert_eq!(agg.status(), StatusVaga::Ocupada);
        assert_eq!(agg.moto_id(), Some(MotoId(7)));

        let outcome = h.service.release(VagaId(1)).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Synced);
        let agg = h.service.get(VagaId(1)).await.unwrap();
        assert_eq!(agg.status(), StatusVaga::Livre);
        assert_eq!(agg.moto_id(), None);

        let moto = h.motos.find_by_id(MotoId(7)).await.unwrap().unwrap();
        assert_eq!(moto.vaga_id, None);
    }

    #[tokio::test]
    async fn second_allocation_is_rejected_and_state_kept() {
        let h = harness();

        h.service.allocate(VagaId(1), MotoId(7)).await.unwrap();
        let err = h.service.allocate(VagaId(1), MotoId(8)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RuleViolation(_))
        ));

        let agg = h.service.get(VagaId(1)).await.unwrap();
        assert_eq!(agg.moto_id(), Some(MotoId(7)));
        let moto = h.motos.find_by_id(MotoId(8)).await.unwrap().unwrap();
        assert_eq!(moto.vaga_id, None);
    }

    #[tokio::test]
    async fn invalid_moto_id_is_validation_error() {
        let h = harness();

        let err = h.service.allocate(VagaId(1), MotoId(0)).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_space_is_not_found() {
        let h = harness();

        let err = h.service.allocate(VagaId(99), MotoId(7)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = h.service.release(VagaId(99)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn releasing_free_space_is_unchanged() {
        let h = harness();

        let outcome = h.service.release(VagaId(2)).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);
    }

    #[tokio::test]
    async fn concurrent_allocations_admit_exactly_one() {
        let h = harness();

        let (a, b) = tokio::join!(
            {
                let service = h.service.clone();
                async move { service.allocate(VagaId(1), MotoId(7)).await }
            },
            {
                let service = h.service.clone();
                async move { service.allocate(VagaId(1), MotoId(8)).await }
            }
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let vaga = h.vagas.find_by_id(VagaId(1)).await.unwrap().unwrap();
        assert_eq!(vaga.status, StatusVaga::Ocupada);
    }

    #[tokio::test]
    async fn remove_clears_occupant_reference() {
        let h = harness();

        h.service.allocate(VagaId(1), MotoId(7)).await.unwrap();
        h.service.remove(VagaId(1)).await.unwrap();

        assert!(h.vagas.find_by_id(VagaId(1)).await.unwrap().is_none());
        let moto = h.motos.find_by_id(MotoId(7)).await.unwrap().unwrap();
        assert_eq!(moto.vaga_id, None);
    }

    #[tokio::test]
    async fn moto_parked_elsewhere_is_rejected() {
        let h = harness();

        h.service.allocate(VagaId(1), MotoId(7)).await.unwrap();
        let err = h.service.allocate(VagaId(2), MotoId(7)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RuleViolation(_))
        ));

        let vaga = h.vagas.find_by_id(VagaId(2)).await.unwrap().unwrap();
        assert!(vaga.moto.is_none());
        assert_eq!(vaga.status, StatusVaga::Livre);
        let moto = h.motos.find_by_id(MotoId(7)).await.unwrap().unwrap();
        assert_eq!(moto.vaga_id, Some(VagaId(1)));

        // Once released it can move
        h.service.release(VagaId(1)).await.unwrap();
        h.service.allocate(VagaId(2), MotoId(7)).await.unwrap();
        let moto = h.motos.find_by_id(MotoId(7)).await.unwrap().unwrap();
        assert_eq!(moto.vaga_id, Some(VagaId(2)));
    }

    #[tokio::test]
    async fn concurrent_allocations_of_one_moto_admit_exactly_one() {
        let h = harness();

        let (a, b) = tokio::join!(
            {
                let service = h.service.clone();
                async move { service.allocate(VagaId(1), MotoId(7)).await }
            },
            {
                let service = h.service.clone();
                async move { service.allocate(VagaId(2), MotoId(7)).await }
            }
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let occupied = h
            .vagas
            .list()
            .await
            .unwrap()
            .iter()
            .filter(|v| v.moto.is_some())
            .count();
        assert_eq!(occupied, 1);
    }

    #[tokio::test]
    async fn vacate_ignores_other_occupant() {
        let h = harness();

        h.service.allocate(VagaId(1), MotoId(7)).await.unwrap();

        let outcome = h.service.vacate(VagaId(1), MotoId(8)).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert_eq!(
            h.service.get(VagaId(1)).await.unwrap().moto_id(),
            Some(MotoId(7))
        );

        let outcome = h.service.vacate(VagaId(99), MotoId(7)).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);

        let outcome = h.service.vacate(VagaId(1), MotoId(7)).await.unwrap();
        assert_eq!(outcome, SyncOutcome::Synced);
        assert!(!h.service.get(VagaId(1)).await.unwrap().is_occupied());
    }

    #[tokio::test]
    async fn reconfigure_keeps_occupant_and_rejects_status_change() {
        let h = harness();
        h.service.allocate(VagaId(1), MotoId(7)).await.unwrap();

        h.service
            .reconfigure(
                VagaId(1),
                20,
                TipoVaga::SemPlaca,
                PatioId(1),
                StatusVaga::Ocupada,
            )
            .await
            .unwrap();
        let agg = h.service.get(VagaId(1)).await.unwrap();
        assert_eq!(agg.numero(), 20);
        assert_eq!(agg.tipo(), TipoVaga::SemPlaca);
        assert_eq!(agg.moto_id(), Some(MotoId(7)));

        let err = h
            .service
            .reconfigure(VagaId(1), 20, TipoVaga::SemPlaca, PatioId(1), StatusVaga::Livre)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RuleViolation(_))
        ));

        let err = h
            .service
            .reconfigure(VagaId(2), 13, TipoVaga::SemProblema, PatioId(1), StatusVaga::Ocupada)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RuleViolation(_))
        ));
        assert!(!h.service.get(VagaId(2)).await.unwrap().is_occupied());
    }

    #[tokio::test]
    async fn reconfigure_waits_for_allocation_on_same_space() {
        let h = harness();

        let (allocated, reconfigured) = tokio::join!(
            {
                let service = h.service.clone();
                async move { service.allocate(VagaId(1), MotoId(7)).await }
            },
            {
                let service = h.service.clone();
                async move {
                    service
                        .reconfigure(
                            VagaId(1),
                            30,
                            TipoVaga::SemProblema,
                            PatioId(1),
                            StatusVaga::Livre,
                        )
                        .await
                }
            }
        );

        // Whichever ran second, the allocation is never lost
        allocated.unwrap();
        let vaga = h.vagas.find_by_id(VagaId(1)).await.unwrap().unwrap();
        assert_eq!(vaga.moto.map(|m| m.id), Some(MotoId(7)));
        assert_eq!(vaga.status, StatusVaga::Ocupada);
        if reconfigured.is_ok() {
            assert_eq!(vaga.numero, 30);
        }
    }

    #[tokio::test]
    async fn locks_are_dropped_once_released() {
        let h = harness();

        h.service.allocate(VagaId(1), MotoId(7)).await.unwrap();
        h.service.release(VagaId(1)).await.unwrap();
        let _ = h.service.allocate(VagaId(404), MotoId(8)).await;

        assert_eq!(h.service.spaces.len(), 0);
        assert_eq!(h.service.motos.len(), 0);
    }
}
