//! Vaga domain entity
//!
//! A parking/repair space inside a patio, as stored. The current occupant is a
//! single optional reference; allocation rules live in `VagaAggregate`.

use serde::{Deserialize, Serialize};

use super::moto::{MotoId, Placa};
use super::patio::PatioId;

/// Unique identifier for a parking space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VagaId(pub i64);

impl From<i64> for VagaId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for VagaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of space: either no problem or a defect category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoVaga {
    SemProblema,
    ReparoSimples,
    MotorDefeituoso,
    DanosEstruturais,
    SemPlaca,
}

impl TipoVaga {
    /// Numeric code used on the wire and in the stores
    pub fn code(self) -> i32 {
        match self {
            TipoVaga::SemProblema => 0,
            TipoVaga::ReparoSimples => 1,
            TipoVaga::MotorDefeituoso => 2,
            TipoVaga::DanosEstruturais => 3,
            TipoVaga::SemPlaca => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TipoVaga::SemProblema),
            1 => Some(TipoVaga::ReparoSimples),
            2 => Some(TipoVaga::MotorDefeituoso),
            3 => Some(TipoVaga::DanosEstruturais),
            4 => Some(TipoVaga::SemPlaca),
            _ => None,
        }
    }

    pub fn is_problem(self) -> bool {
        self != TipoVaga::SemProblema
    }
}

impl std::fmt::Display for TipoVaga {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TipoVaga::SemProblema => write!(f, "SEM_PROBLEMA"),
            TipoVaga::ReparoSimples => write!(f, "REPARO_SIMPLES"),
            TipoVaga::MotorDefeituoso => write!(f, "MOTOR_DEFEITUOSO"),
            TipoVaga::DanosEstruturais => write!(f, "DANOS_ESTRUTURAIS"),
            TipoVaga::SemPlaca => write!(f, "SEM_PLACA"),
        }
    }
}

/// Occupancy status of a space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusVaga {
    Livre,
    Ocupada,
}

impl StatusVaga {
    pub fn code(self) -> i32 {
        match self {
            StatusVaga::Livre => 0,
            StatusVaga::Ocupada => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(StatusVaga::Livre),
            1 => Some(StatusVaga::Ocupada),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatusVaga {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusVaga::Livre => write!(f, "LIVRE"),
            StatusVaga::Ocupada => write!(f, "OCUPADA"),
        }
    }
}

/// The motorcycle recorded as parked in a space
///
/// When only the id is known (allocation through the aggregate before the moto
/// record is read) the descriptive fields are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatedMoto {
    pub id: MotoId,
    pub modelo: String,
    pub placa: String,
    pub chassi: String,
}

impl AllocatedMoto {
    pub fn placeholder(id: MotoId) -> Self {
        Self {
            id,
            modelo: String::new(),
            placa: String::new(),
            chassi: String::new(),
        }
    }

    pub fn from_parts(id: MotoId, modelo: &str, placa: &Placa, chassi: &str) -> Self {
        Self {
            id,
            modelo: modelo.to_string(),
            placa: placa.to_string(),
            chassi: chassi.to_string(),
        }
    }
}

/// A stored parking space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vaga {
    pub id: VagaId,
    /// Space number, unique within a patio
    pub numero: i32,
    pub tipo: TipoVaga,
    pub status: StatusVaga,
    pub patio_id: PatioId,
    pub moto: Option<AllocatedMoto>,
}

impl Vaga {
    pub fn is_free(&self) -> bool {
        self.status == StatusVaga::Livre
    }
}

/// Data needed to create a parking space
#[derive(Debug, Clone)]
pub struct NewVaga {
    pub numero: i32,
    pub tipo: TipoVaga,
    pub status: StatusVaga,
    pub patio_id: PatioId,
}

impl NewVaga {
    /// A free, problem-free space in the given patio
    pub fn new(numero: i32, patio_id: PatioId) -> Self {
        Self {
            numero,
            tipo: TipoVaga::SemProblema,
            status: StatusVaga::Livre,
            patio_id,
        }
    }

    pub fn into_vaga(self, id: VagaId) -> Vaga {
        Vaga {
            id,
            numero: self.numero,
            tipo: self.tipo,
            status: self.status,
            patio_id: self.patio_id,
            moto: None,
        }
    }
}
