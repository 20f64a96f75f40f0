//! MongoDB adapter for UsuarioRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use super::documents::UsuarioDocument;
use super::IdSequence;
use crate::domain::entities::{Email, NewUsuario, Usuario, UsuarioId};
use crate::domain::ports::UsuarioRepository;
use crate::error::DomainError;

/// MongoDB implementation of UsuarioRepository (`usuarios` collection)
pub struct MongoUsuarioRepository {
    collection: Collection<UsuarioDocument>,
    ids: IdSequence,
}

impl MongoUsuarioRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("usuarios"),
            ids: IdSequence::new(&db, "usuarios"),
        }
    }
}

#[async_trait]
impl UsuarioRepository for MongoUsuarioRepository {
    async fn list(&self) -> Result<Vec<Usuario>, DomainError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let docs: Vec<UsuarioDocument> = self
            .collection
            .find(doc! {}, options)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(docs.into_iter().map(Usuario::from).collect())
    }

    async fn find_by_id(&self, id: UsuarioId) -> Result<Option<Usuario>, DomainError> {
        let result = self
            .collection
            .find_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Usuario::from))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Usuario>, DomainError> {
        let result = self
            .collection
            .find_one(doc! { "email": email.as_str() }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Usuario::from))
    }

    async fn email_exists(
        &self,
        email: &Email,
        ignore_id: Option<UsuarioId>,
    ) -> Result<bool, DomainError> {
        let mut filter = doc! { "email": email.as_str() };
        if let Some(ignore) = ignore_id {
            filter.insert("_id", doc! { "$ne": ignore.0 });
        }

        let count = self
            .collection
            .count_documents(filter, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, usuario: &NewUsuario) -> Result<Usuario, DomainError> {
        let usuario = usuario.clone().into_usuario(UsuarioId(self.ids.next().await?));
        self.collection
            .insert_one(UsuarioDocument::from(&usuario), None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(usuario)
    }

    async fn update(&self, usuario: &Usuario) -> Result<(), DomainError> {
        let result = self
            .collection
            .replace_one(
                doc! { "_id": usuario.id.0 },
                UsuarioDocument::from(usuario),
                None,
            )
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(DomainError::NotFound(format!(
                "Usuario {} not found",
                usuario.id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: UsuarioId) -> Result<(), DomainError> {
        self.collection
            .delete_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}
