//! Domain aggregates

pub mod vaga_aggregate;

pub use vaga_aggregate::VagaAggregate;
