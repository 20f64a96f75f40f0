//! Usuario service
//!
//! Users are unique by (normalized) email. Passwords are stored as
//! `salt$sha256(salt + senha)`, hex encoded.

use std::sync::Arc;

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{Email, NewUsuario, TipoUsuario, Usuario, UsuarioId};
use crate::domain::ports::UsuarioRepository;
use crate::error::{AppError, DomainError};

/// Incoming user data, password in clear
#[derive(Debug, Clone)]
pub struct UsuarioData {
    pub nome: String,
    pub email: Email,
    pub senha: String,
    pub tipo: TipoUsuario,
}

impl UsuarioData {
    fn into_new_usuario(self) -> NewUsuario {
        NewUsuario {
            senha_hash: hash_senha(&self.senha),
            nome: self.nome,
            email: self.email,
            tipo: self.tipo,
        }
    }
}

/// Service for managing users
pub struct UsuarioService<UR>
where
    UR: UsuarioRepository + ?Sized,
{
    usuarios: Arc<UR>,
}

impl<UR> UsuarioService<UR>
where
    UR: UsuarioRepository + ?Sized,
{
    pub fn new(usuarios: Arc<UR>) -> Self {
        Self { usuarios }
    }

    pub async fn list(&self) -> Result<Vec<Usuario>, AppError> {
        Ok(self.usuarios.list().await?)
    }

    pub async fn get(&self, id: UsuarioId) -> Result<Usuario, AppError> {
        self.usuarios
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Usuario {} not found", id)))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Usuario, AppError> {
        let email = Email::parse(email)?;
        self.usuarios
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Usuario with email {} not found", email)))
    }

    pub async fn create(&self, data: UsuarioData) -> Result<Usuario, AppError> {
        self.ensure_unique_email(&data.email, None).await?;

        let usuario = self.usuarios.create(&data.into_new_usuario()).await?;
        tracing::info!(usuario_id = %usuario.id, tipo = %usuario.tipo, "Usuario created");
        Ok(usuario)
    }

    pub async fn update(&self, id: UsuarioId, data: UsuarioData) -> Result<(), AppError> {
        self.get(id).await?;
        self.ensure_unique_email(&data.email, Some(id)).await?;

        self.usuarios
            .update(&data.into_new_usuario().into_usuario(id))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: UsuarioId) -> Result<(), AppError> {
        self.get(id).await?;
        self.usuarios.delete(id).await?;
        tracing::info!(usuario_id = %id, "Usuario deleted");
        Ok(())
    }

    async fn ensure_unique_email(
        &self,
        email: &Email,
        ignore: Option<UsuarioId>,
    ) -> Result<(), AppError> {
        if self.usuarios.email_exists(email, ignore).await? {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Email {} is already registered",
                email
            ))));
        }
        Ok(())
    }
}

/// Hash a password with a fresh random salt
pub fn hash_senha(senha: &str) -> String {
    let salt: [u8; 16] = rand::thread_rng().gen();
    let salt = hex::encode(salt);
    format!("{}${}", salt, digest(&salt, senha))
}

fn digest(salt: &str, senha: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(senha.as_bytes());
    hex::encode(hasher.finalize())
}
