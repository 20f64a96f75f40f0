//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod allocation_service;
pub mod dashboard_service;
pub mod moto_service;
pub mod patio_service;
pub mod usuario_service;
pub mod vaga_service;

pub use allocation_service::AllocationService;
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use moto_service::MotoService;
pub use patio_service::{PatioDetalhes, PatioService};
pub use usuario_service::{UsuarioData, UsuarioService};
pub use vaga_service::{VagaService, VagasLivres};
