//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `aggregates`: Rule-bearing projections over stored entities
//! - `ports`: Trait definitions for external dependencies

pub mod aggregates;
pub mod entities;
pub mod ports;
