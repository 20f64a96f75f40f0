//! Patio domain entity
//!
//! A lot holding a set of parking spaces.

use serde::{Deserialize, Serialize};

/// Unique identifier for a patio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatioId(pub i64);

impl From<i64> for PatioId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PatioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patio {
    pub id: PatioId,
    pub nome: String,
}

/// Data needed to create or rename a patio
#[derive(Debug, Clone)]
pub struct NewPatio {
    pub nome: String,
}
