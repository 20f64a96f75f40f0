//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use crate::domain::entities::{
    Email, Moto, MotoId, NewVaga, Patio, PatioId, Placa, TipoUsuario, Usuario, UsuarioId, Vaga,
    VagaId,
};

/// Create an unassigned test motorcycle with the given plate
pub fn test_moto(id: MotoId, placa: &str) -> Moto {
    Moto {
        id,
        modelo: "Mottu Sport 110i".to_string(),
        placa: Placa::parse(placa).expect("valid test plate"),
        chassi: format!("9C2KC{:012}", id.0),
        problema_identificado: None,
        vaga_id: None,
        defeitos: vec![],
    }
}

/// Create a free, problem-free space in patio 1
pub fn test_vaga(id: VagaId, numero: i32) -> Vaga {
    NewVaga::new(numero, PatioId(1)).into_vaga(id)
}

/// Create a test patio
pub fn test_patio(id: PatioId, nome: &str) -> Patio {
    Patio {
        id,
        nome: nome.to_string(),
    }
}

/// Create a test administrator
pub fn test_usuario(id: UsuarioId, email: &str) -> Usuario {
    Usuario {
        id,
        nome: "Usuário Teste".to_string(),
        email: Email::parse(email).expect("valid test email"),
        senha_hash: "salt$hash".to_string(),
        tipo: TipoUsuario::Administrador,
    }
}
