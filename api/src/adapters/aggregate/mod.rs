//! Store-agnostic aggregate adapters

pub mod vaga_aggregate_repo;

pub use vaga_aggregate_repo::SyncingVagaAggregateRepository;
