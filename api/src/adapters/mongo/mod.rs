//! MongoDB adapters (API v2)
//!
//! Implementations of repository traits using the native `mongodb` driver.
//! Ids are numeric, drawn per collection from an atomic counter document in
//! the `counters` collection.

pub mod client;
pub mod documents;
pub mod ids;
pub mod moto_repo;
pub mod patio_repo;
pub mod usuario_repo;
pub mod vaga_repo;


pub use client::MongoStore;
pub(crate) use ids::IdSequence;
pub use moto_repo::MongoMotoRepository;
pub use patio_repo::MongoPatioRepository;
pub use usuario_repo::MongoUsuarioRepository;
pub use vaga_repo::MongoVagaRepository;
