//! PostgreSQL adapters (API v1)
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod health;
pub mod moto_repo;
pub mod patio_repo;
pub mod usuario_repo;
pub mod vaga_repo;


pub use health::PostgresHealth;
pub use moto_repo::PostgresMotoRepository;
pub use patio_repo::PostgresPatioRepository;
pub use usuario_repo::PostgresUsuarioRepository;
pub use vaga_repo::PostgresVagaRepository;
