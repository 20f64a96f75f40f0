//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Email, Moto, MotoId, NewMoto, NewPatio, NewUsuario, NewVaga, Patio, PatioId, Usuario,
    UsuarioId, Vaga, VagaId,
};
use crate::domain::ports::{MotoRepository, PatioRepository, UsuarioRepository, VagaRepository};
use crate::error::DomainError;

fn failure() -> DomainError {
    DomainError::Database("Mock store failure".to_string())
}

/// Sequential id source, starting after any pre-populated ids
#[derive(Default)]
struct IdSequence(AtomicI64);

impl IdSequence {
    fn bump_past(&self, id: i64) {
        self.0.fetch_max(id, Ordering::SeqCst);
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

// ============================================================================
// In-Memory Moto Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryMotoRepository {
    motos: Arc<RwLock<BTreeMap<MotoId, Moto>>>,
    ids: IdSequence,
    fail: bool,
}

impl InMemoryMotoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails with a database error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a motorcycle for testing
    pub fn with_moto(self, moto: Moto) -> Self {
        self.ids.bump_past(moto.id.0);
        self.motos.write().unwrap().insert(moto.id, moto);
        self
    }
}

#[async_trait]
impl MotoRepository for InMemoryMotoRepository {
    async fn list(&self) -> Result<Vec<Moto>, DomainError> {
        if self.fail {
            return Err(failure());
        }
        Ok(self.motos.read().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: MotoId) -> Result<Option<Moto>, DomainError> {
        if self.fail {
            return Err(failure());
        }
        Ok(self.motos.read().unwrap().get(&id).cloned())
    }

    async fn create(&self, moto: &NewMoto) -> Result<Moto, DomainError> {
        if self.fail {
            return Err(failure());
        }
        let moto = moto.clone().into_moto(MotoId(self.ids.next()));
        self.motos.write().unwrap().insert(moto.id, moto.clone());
        Ok(moto)
    }

    async fn update(&self, moto: &Moto) -> Result<(), DomainError> {
        if self.fail {
            return Err(failure());
        }
        let mut motos = self.motos.write().unwrap();
        match motos.get_mut(&moto.id) {
            Some(existing) => {
                *existing = moto.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Moto {} not found", moto.id))),
        }
    }

    async fn delete(&self, id: MotoId) -> Result<(), DomainError> {
        if self.fail {
            return Err(failure());
        }
        self.motos.write().unwrap().remove(&id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Vaga Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryVagaRepository {
    vagas: Arc<RwLock<BTreeMap<VagaId, Vaga>>>,
    ids: IdSequence,
}

impl InMemoryVagaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a space for testing
    pub fn with_vaga(self, vaga: Vaga) -> Self {
        self.ids.bump_past(vaga.id.0);
        self.vagas.write().unwrap().insert(vaga.id, vaga);
        self
    }
}

#[async_trait]
impl VagaRepository for InMemoryVagaRepository {
    async fn list(&self) -> Result<Vec<Vaga>, DomainError> {
        Ok(self.vagas.read().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: VagaId) -> Result<Option<Vaga>, DomainError> {
        Ok(self.vagas.read().unwrap().get(&id).cloned())
    }

    async fn find_by_patio(&self, patio_id: PatioId) -> Result<Vec<Vaga>, DomainError> {
        Ok(self
            .vagas
            .read()
            .unwrap()
            .values()
            .filter(|v| v.patio_id == patio_id)
            .cloned()
            .collect())
    }

    async fn create(&self, vaga: &NewVaga) -> Result<Vaga, DomainError> {
        let vaga = vaga.clone().into_vaga(VagaId(self.ids.next()));
        self.vagas.write().unwrap().insert(vaga.id, vaga.clone());
        Ok(vaga)
    }

    async fn update(&self, vaga: &Vaga) -> Result<(), DomainError> {
        let mut vagas = self.vagas.write().unwrap();
        match vagas.get_mut(&vaga.id) {
            Some(existing) => {
                *existing = vaga.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Vaga {} not found", vaga.id))),
        }
    }

    async fn delete(&self, id: VagaId) -> Result<(), DomainError> {
        self.vagas.write().unwrap().remove(&id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Patio Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPatioRepository {
    patios: Arc<RwLock<BTreeMap<PatioId, Patio>>>,
    ids: IdSequence,
}

impl InMemoryPatioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patio(self, patio: Patio) -> Self {
        self.ids.bump_past(patio.id.0);
        self.patios.write().unwrap().insert(patio.id, patio);
        self
    }
}

#[async_trait]
impl PatioRepository for InMemoryPatioRepository {
    async fn list(&self) -> Result<Vec<Patio>, DomainError> {
        Ok(self.patios.read().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: PatioId) -> Result<Option<Patio>, DomainError> {
        Ok(self.patios.read().unwrap().get(&id).cloned())
    }

    async fn create(&self, patio: &NewPatio) -> Result<Patio, DomainError> {
        let patio = Patio {
            id: PatioId(self.ids.next()),
            nome: patio.nome.clone(),
        };
        self.patios.write().unwrap().insert(patio.id, patio.clone());
        Ok(patio)
    }

    async fn update(&self, patio: &Patio) -> Result<(), DomainError> {
        let mut patios = self.patios.write().unwrap();
        match patios.get_mut(&patio.id) {
            Some(existing) => {
                *existing = patio.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Patio {} not found", patio.id))),
        }
    }

    async fn delete(&self, id: PatioId) -> Result<(), DomainError> {
        self.patios.write().unwrap().remove(&id);
        Ok(())
    }
}

// ============================================================================
// In-Memory Usuario Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUsuarioRepository {
    usuarios: Arc<RwLock<BTreeMap<UsuarioId, Usuario>>>,
    ids: IdSequence,
}

impl InMemoryUsuarioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_usuario(self, usuario: Usuario) -> Self {
        self.ids.bump_past(usuario.id.0);
        self.usuarios.write().unwrap().insert(usuario.id, usuario);
        self
    }
}

#[async_trait]
impl UsuarioRepository for InMemoryUsuarioRepository {
    async fn list(&self) -> Result<Vec<Usuario>, DomainError> {
        Ok(self.usuarios.read().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: UsuarioId) -> Result<Option<Usuario>, DomainError> {
        Ok(self.usuarios.read().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Usuario>, DomainError> {
        Ok(self
            .usuarios
            .read()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn email_exists(
        &self,
        email: &Email,
        ignore_id: Option<UsuarioId>,
    ) -> Result<bool, DomainError> {
        Ok(self
            .usuarios
            .read()
            .unwrap()
            .values()
            .any(|u| &u.email == email && Some(u.id) != ignore_id))
    }

    async fn create(&self, usuario: &NewUsuario) -> Result<Usuario, DomainError> {
        let usuario = usuario.clone().into_usuario(UsuarioId(self.ids.next()));
        self.usuarios
            .write()
            .unwrap()
            .insert(usuario.id, usuario.clone());
        Ok(usuario)
    }

    async fn update(&self, usuario: &Usuario) -> Result<(), DomainError> {
        let mut usuarios = self.usuarios.write().unwrap();
        match usuarios.get_mut(&usuario.id) {
            Some(existing) => {
                *existing = usuario.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!(
                "Usuario {} not found",
                usuario.id
            ))),
        }
    }

    async fn delete(&self, id: UsuarioId) -> Result<(), DomainError> {
        self.usuarios.write().unwrap().remove(&id);
        Ok(())
    }
}
