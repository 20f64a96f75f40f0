//! Usuario domain entity
//!
//! A system user, either an administrator or a mechanic.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsuarioId(pub i64);

impl From<i64> for UsuarioId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UsuarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoUsuario {
    Administrador,
    Mecanico,
}

impl TipoUsuario {
    pub fn code(self) -> i32 {
        match self {
            TipoUsuario::Administrador => 0,
            TipoUsuario::Mecanico => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TipoUsuario::Administrador),
            1 => Some(TipoUsuario::Mecanico),
            _ => None,
        }
    }
}

impl std::fmt::Display for TipoUsuario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TipoUsuario::Administrador => write!(f, "ADMINISTRADOR"),
            TipoUsuario::Mecanico => write!(f, "MECANICO"),
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// Validated email address, stored lower-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("Email não pode ser vazio".to_string()));
        }
        if !email_regex().is_match(trimmed) {
            return Err(DomainError::Validation(format!(
                "Email em formato inválido: {}",
                raw
            )));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Wrap a value read back from a store without re-validating it
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A system user. The password is only ever held as a salted hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Usuario {
    pub id: UsuarioId,
    pub nome: String,
    pub email: Email,
    #[serde(skip_serializing)]
    pub senha_hash: String,
    pub tipo: TipoUsuario,
}

/// Data needed to create or replace a user
#[derive(Debug, Clone)]
pub struct NewUsuario {
    pub nome: String,
    pub email: Email,
    pub senha_hash: String,
    pub tipo: TipoUsuario,
}

impl NewUsuario {
    pub fn into_usuario(self, id: UsuarioId) -> Usuario {
        Usuario {
            id,
            nome: self.nome,
            email: self.email,
            senha_hash: self.senha_hash,
            tipo: self.tipo,
        }
    }
}
