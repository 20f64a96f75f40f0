//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module
//! and from the BSON documents in `adapters::mongo`.

pub mod moto;
pub mod patio;
pub mod usuario;
pub mod vaga;

pub use moto::{Moto, MotoId, NewMoto, Placa};
pub use patio::{NewPatio, Patio, PatioId};
pub use usuario::{Email, NewUsuario, TipoUsuario, Usuario, UsuarioId};
pub use vaga::{AllocatedMoto, NewVaga, StatusVaga, TipoVaga, Vaga, VagaId};
