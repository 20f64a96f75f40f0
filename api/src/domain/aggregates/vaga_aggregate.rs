//! Vaga allocation aggregate
//!
//! In-memory projection of a stored `Vaga` plus its current occupant. It is
//! built per request from persisted state, mutated through `allocate_moto` /
//! `release_space`, written back with `apply_to_persistence` and dropped.
//!
//! Invariant: `status == Ocupada` if and only if `moto_id` is set.

use serde::Serialize;

use crate::domain::entities::{
    AllocatedMoto, MotoId, PatioId, StatusVaga, TipoVaga, Vaga, VagaId,
};
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VagaAggregate {
    id: VagaId,
    numero: i32,
    tipo: TipoVaga,
    status: StatusVaga,
    patio_id: PatioId,
    moto_id: Option<MotoId>,
}

impl VagaAggregate {
    /// Build the aggregate from a stored space
    pub fn from_persistence(vaga: Option<&Vaga>) -> Result<Self, DomainError> {
        let vaga = vaga.ok_or_else(|| {
            DomainError::Validation("Cannot build aggregate from an absent vaga".to_string())
        })?;

        Ok(Self {
            id: vaga.id,
            numero: vaga.numero,
            tipo: vaga.tipo,
            status: vaga.status,
            patio_id: vaga.patio_id,
            moto_id: vaga.moto.as_ref().map(|m| m.id),
        })
    }

    /// Write the aggregate state back onto a stored space
    ///
    /// Scalar fields are copied over. With an occupant, the stored reference is
    /// kept when it already points at the same motorcycle and replaced by a
    /// placeholder otherwise. Without an occupant the reference is cleared.
    pub fn apply_to_persistence(&self, vaga: &mut Vaga) {
        vaga.id = self.id;
        vaga.numero = self.numero;
        vaga.tipo = self.tipo;
        vaga.status = self.status;
        vaga.patio_id = self.patio_id;

        match self.moto_id {
            Some(moto_id) => {
                let already_recorded = vaga.moto.as_ref().is_some_and(|m| m.id == moto_id);
                if !already_recorded {
                    vaga.moto = Some(AllocatedMoto::placeholder(moto_id));
                }
            }
            None => vaga.moto = None,
        }
    }

    /// Park a motorcycle in this space
    ///
    /// Fails with `Validation` for a non-positive id and with `RuleViolation`
    /// when the space is already occupied. State is untouched on failure.
    pub fn allocate_moto(&mut self, moto_id: MotoId) -> Result<(), DomainError> {
        if moto_id.0 <= 0 {
            return Err(DomainError::Validation(format!(
                "Invalid moto id: {}",
                moto_id
            )));
        }
        if self.status == StatusVaga::Ocupada || self.moto_id.is_some() {
            return Err(DomainError::RuleViolation(format!(
                "Vaga {} is already occupied",
                self.id
            )));
        }

        self.moto_id = Some(moto_id);
        self.status = StatusVaga::Ocupada;
        Ok(())
    }

    /// Free this space. Releasing a free space is a no-op.
    pub fn release_space(&mut self) {
        if self.status == StatusVaga::Livre && self.moto_id.is_none() {
            return;
        }

        self.moto_id = None;
        self.status = StatusVaga::Livre;
    }

    /// Replace number, kind and patio. Allocation state is not touched.
    pub fn update_attributes(
        &mut self,
        numero: i32,
        tipo: TipoVaga,
        patio_id: PatioId,
    ) -> Result<(), DomainError> {
        if numero <= 0 {
            return Err(DomainError::Validation(
                "Vaga number must be greater than zero".to_string(),
            ));
        }

        self.numero = numero;
        self.tipo = tipo;
        self.patio_id = patio_id;
        Ok(())
    }

    pub fn id(&self) -> VagaId {
        self.id
    }

    pub fn numero(&self) -> i32 {
        self.numero
    }

    pub fn tipo(&self) -> TipoVaga {
        self.tipo
    }

    pub fn status(&self) -> StatusVaga {
        self.status
    }

    pub fn patio_id(&self) -> PatioId {
        self.patio_id
    }

    pub fn moto_id(&self) -> Option<MotoId> {
        self.moto_id
    }

    pub fn is_occupied(&self) -> bool {
        self.moto_id.is_some()
    }
}
