//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (PostgreSQL for API v1,
//! MongoDB for API v2). All of them behave as key-value-by-id stores.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::aggregates::VagaAggregate;
use crate::domain::entities::{
    Email, Moto, MotoId, NewMoto, NewPatio, NewUsuario, NewVaga, Patio, PatioId, Usuario,
    UsuarioId, Vaga, VagaId,
};
use crate::error::DomainError;

/// Repository for Moto entities
#[async_trait]
pub trait MotoRepository: Send + Sync {
    /// List all motorcycles
    async fn list(&self) -> Result<Vec<Moto>, DomainError>;

    /// Find a motorcycle by ID
    async fn find_by_id(&self, id: MotoId) -> Result<Option<Moto>, DomainError>;

    /// Create a new motorcycle
    async fn create(&self, moto: &NewMoto) -> Result<Moto, DomainError>;

    /// Replace a stored motorcycle
    async fn update(&self, moto: &Moto) -> Result<(), DomainError>;

    /// Delete a motorcycle
    async fn delete(&self, id: MotoId) -> Result<(), DomainError>;
}

/// Repository for Vaga entities
#[async_trait]
pub trait VagaRepository: Send + Sync {
    /// List all spaces
    async fn list(&self) -> Result<Vec<Vaga>, DomainError>;

    /// Find a space by ID, including its current occupant
    async fn find_by_id(&self, id: VagaId) -> Result<Option<Vaga>, DomainError>;

    /// List the spaces of a patio
    async fn find_by_patio(&self, patio_id: PatioId) -> Result<Vec<Vaga>, DomainError>;

    /// Create a new (unoccupied) space
    async fn create(&self, vaga: &NewVaga) -> Result<Vaga, DomainError>;

    /// Replace a stored space, occupant reference included
    async fn update(&self, vaga: &Vaga) -> Result<(), DomainError>;

    /// Delete a space
    async fn delete(&self, id: VagaId) -> Result<(), DomainError>;
}

/// Repository for Patio entities
#[async_trait]
pub trait PatioRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Patio>, DomainError>;

    async fn find_by_id(&self, id: PatioId) -> Result<Option<Patio>, DomainError>;

    async fn create(&self, patio: &NewPatio) -> Result<Patio, DomainError>;

    async fn update(&self, patio: &Patio) -> Result<(), DomainError>;

    async fn delete(&self, id: PatioId) -> Result<(), DomainError>;
}

/// Repository for Usuario entities
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Usuario>, DomainError>;

    async fn find_by_id(&self, id: UsuarioId) -> Result<Option<Usuario>, DomainError>;

    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> Result<Option<Usuario>, DomainError>;

    /// Whether another user already uses this email
    async fn email_exists(
        &self,
        email: &Email,
        ignore_id: Option<UsuarioId>,
    ) -> Result<bool, DomainError>;

    async fn create(&self, usuario: &NewUsuario) -> Result<Usuario, DomainError>;

    async fn update(&self, usuario: &Usuario) -> Result<(), DomainError>;

    async fn delete(&self, id: UsuarioId) -> Result<(), DomainError>;
}

/// Result of the motorcycle back-reference synchronization that follows a
/// space update
///
/// Side updates never fail the primary update. Failures are reported here
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// The occupant did not change, nothing to synchronize
    Unchanged,
    /// Every affected motorcycle record was updated
    Synced,
    /// Some motorcycle records could not be updated
    Partial { failures: Vec<String> },
}

impl SyncOutcome {
    pub fn from_failures(failures: Vec<String>) -> Self {
        if failures.is_empty() {
            SyncOutcome::Synced
        } else {
            SyncOutcome::Partial { failures }
        }
    }
}

/// Repository for the Vaga allocation aggregate
#[async_trait]
pub trait VagaAggregateRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<VagaAggregate>, DomainError>;

    async fn find_by_id(&self, id: VagaId) -> Result<Option<VagaAggregate>, DomainError>;

    /// The space a motorcycle currently points at, `None` when unassigned or
    /// unknown
    async fn parked_in(&self, moto_id: MotoId) -> Result<Option<VagaId>, DomainError>;

    /// Persist the aggregate and synchronize motorcycle back-references
    async fn update(&self, aggregate: &VagaAggregate) -> Result<SyncOutcome, DomainError>;

    /// Delete the space, clearing the occupant's back-reference first
    async fn remove(&self, aggregate: &VagaAggregate) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_outcome_from_failures() {
        assert_eq!(SyncOutcome::from_failures(vec![]), SyncOutcome::Synced);
        assert_eq!(
            SyncOutcome::from_failures(vec!["moto 7".to_string()]),
            SyncOutcome::Partial {
                failures: vec!["moto 7".to_string()]
            }
        );
    }

    #[test]
    fn sync_outcome_serializes_with_tag() {
        let json = serde_json::to_string(&SyncOutcome::Unchanged).unwrap();
        assert_eq!(json, r#"{"outcome":"unchanged"}"#);
    }
}
