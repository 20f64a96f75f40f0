//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repositories implement the same ports as the PostgreSQL and
//! MongoDB adapters, so services, the aggregate sync adapter and the router
//! can all be exercised without a running store.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
