//! PostgreSQL adapter for UsuarioRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{Email, NewUsuario, TipoUsuario, Usuario, UsuarioId};
use crate::domain::ports::UsuarioRepository;
use crate::entity::usuarios;
use crate::error::DomainError;

/// PostgreSQL implementation of UsuarioRepository
pub struct PostgresUsuarioRepository {
    db: DatabaseConnection,
}

impl PostgresUsuarioRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsuarioRepository for PostgresUsuarioRepository {
    async fn list(&self) -> Result<Vec<Usuario>, DomainError> {
        let results = usuarios::Entity::find()
            .order_by_asc(usuarios::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: UsuarioId) -> Result<Option<Usuario>, DomainError> {
        let result = usuarios::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Usuario>, DomainError> {
        let result = usuarios::Entity::find()
            .filter(usuarios::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn email_exists(
        &self,
        email: &Email,
        ignore_id: Option<UsuarioId>,
    ) -> Result<bool, DomainError> {
        let mut query = usuarios::Entity::find().filter(usuarios::Column::Email.eq(email.as_str()));
        if let Some(ignore) = ignore_id {
            query = query.filter(usuarios::Column::Id.ne(ignore.0));
        }

        let count = query
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, usuario: &NewUsuario) -> Result<Usuario, DomainError> {
        let result = usuarios::ActiveModel {
            nome: Set(usuario.nome.clone()),
            email: Set(usuario.email.to_string()),
            senha_hash: Set(usuario.senha_hash.clone()),
            tipo: Set(usuario.tipo.code()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, usuario: &Usuario) -> Result<(), DomainError> {
        usuarios::ActiveModel {
            id: Set(usuario.id.0),
            nome: Set(usuario.nome.clone()),
            email: Set(usuario.email.to_string()),
            senha_hash: Set(usuario.senha_hash.clone()),
            tipo: Set(usuario.tipo.code()),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Usuario {} not found", usuario.id))
            }
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(())
    }

    async fn delete(&self, id: UsuarioId) -> Result<(), DomainError> {
        usuarios::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

impl From<usuarios::Model> for Usuario {
    fn from(model: usuarios::Model) -> Self {
        Usuario {
            id: UsuarioId(model.id),
            nome: model.nome,
            email: Email::from_stored(model.email),
            senha_hash: model.senha_hash,
            tipo: TipoUsuario::from_code(model.tipo).unwrap_or(TipoUsuario::Mecanico),
        }
    }
}
