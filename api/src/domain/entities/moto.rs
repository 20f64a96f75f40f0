//! Moto domain entity
//!
//! A motorcycle tracked in the yard. Plate and chassis are meant to be unique,
//! which is enforced by `MotoService`, not by the stores.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::vaga::VagaId;
use crate::error::DomainError;

/// Unique identifier for a motorcycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotoId(pub i64);

impl From<i64> for MotoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn placa_regex() -> &'static Regex {
    static PLACA: OnceLock<Regex> = OnceLock::new();
    PLACA.get_or_init(|| Regex::new(r"^[A-Z0-9-]{1,10}$").expect("valid plate regex"))
}

/// License plate, trimmed and upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placa(String);

impl Placa {
    /// Parse and normalize a plate (`A-Z`, `0-9` and `-`, up to 10 characters)
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::Validation("Placa não pode ser vazia".to_string()));
        }
        if !placa_regex().is_match(&normalized) {
            return Err(DomainError::Validation(format!(
                "Placa em formato inválido: {}",
                raw
            )));
        }
        Ok(Self(normalized))
    }

    /// Wrap a value read back from a store without re-validating it
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Placa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A motorcycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Moto {
    pub id: MotoId,
    pub modelo: String,
    pub placa: Placa,
    pub chassi: String,
    pub problema_identificado: Option<String>,
    /// Space the motorcycle currently sits in
    pub vaga_id: Option<VagaId>,
    /// Free-text defect descriptions
    pub defeitos: Vec<String>,
}

impl Moto {
    /// Whether a problem has been reported for this motorcycle
    pub fn has_problem(&self) -> bool {
        self.problema_identificado
            .as_deref()
            .is_some_and(|p| !p.trim().is_empty())
    }
}

/// Data needed to create or replace a motorcycle
#[derive(Debug, Clone)]
pub struct NewMoto {
    pub modelo: String,
    pub placa: Placa,
    pub chassi: String,
    pub problema_identificado: Option<String>,
    pub vaga_id: Option<VagaId>,
    pub defeitos: Vec<String>,
}

impl NewMoto {
    pub fn into_moto(self, id: MotoId) -> Moto {
        Moto {
            id,
            modelo: self.modelo,
            placa: self.placa,
            chassi: self.chassi,
            problema_identificado: self.problema_identificado,
            vaga_id: self.vaga_id,
            defeitos: self.defeitos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_moto(problema: Option<&str>) -> Moto {
        Moto {
            id: MotoId(1),
            modelo: "Mottu Sport".to_string(),
            placa: Placa::parse("ABC1D23").unwrap(),
            chassi: "9C2KC1670HR000001".to_string(),
            problema_identificado: problema.map(str::to_string),
            vaga_id: None,
            defeitos: vec![],
        }
    }

    #[test]
    fn placa_is_normalized() {
        let placa = Placa::parse("  abc-1d23 ").unwrap();
        assert_eq!(placa.as_str(), "ABC-1D23");
    }

    #[test]
    fn placa_rejects_empty() {
        assert!(Placa::parse("   ").is_err());
    }

    #[test]
    fn placa_rejects_invalid_characters() {
        assert!(Placa::parse("ABC 1234").is_err());
        assert!(Placa::parse("ABC_1234").is_err());
    }

    #[test]
    fn placa_rejects_too_long() {
        assert!(Placa::parse("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn moto_has_problem_only_with_text() {
        assert!(make_moto(Some("freio")).has_problem());
        assert!(!make_moto(Some("  ")).has_problem());
        assert!(!make_moto(None).has_problem());
    }

    #[test]
    fn moto_id_display() {
        assert_eq!(MotoId(42).to_string(), "42");
    }
}
