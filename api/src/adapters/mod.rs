//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod aggregate;
pub mod mongo;
pub mod postgres;

pub use aggregate::SyncingVagaAggregateRepository;
pub use mongo::{
    MongoMotoRepository, MongoPatioRepository, MongoStore, MongoUsuarioRepository,
    MongoVagaRepository,
};
pub use postgres::{
    PostgresHealth, PostgresMotoRepository, PostgresPatioRepository, PostgresUsuarioRepository,
    PostgresVagaRepository,
};
