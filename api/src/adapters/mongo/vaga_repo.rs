//! MongoDB adapter for VagaRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use super::documents::VagaDocument;
use super::IdSequence;
use crate::domain::entities::{NewVaga, PatioId, Vaga, VagaId};
use crate::domain::ports::VagaRepository;
use crate::error::DomainError;

/// MongoDB implementation of VagaRepository (`vagas` collection)
pub struct MongoVagaRepository {
    collection: Collection<VagaDocument>,
    ids: IdSequence,
}

impl MongoVagaRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("vagas"),
            ids: IdSequence::new(&db, "vagas"),
        }
    }

    async fn find_many(&self, filter: Document, sort: Document) -> Result<Vec<Vaga>, DomainError> {
        let options = FindOptions::builder().sort(sort).build();
        let docs: Vec<VagaDocument> = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(docs.into_iter().map(Vaga::from).collect())
    }
}

#[async_trait]
impl VagaRepository for MongoVagaRepository {
    async fn list(&self) -> Result<Vec<Vaga>, DomainError> {
        self.find_many(doc! {}, doc! { "_id": 1 }).await
    }

    async fn find_by_id(&self, id: VagaId) -> Result<Option<Vaga>, DomainError> {
        let result = self
            .collection
            .find_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Vaga::from))
    }

    async fn find_by_patio(&self, patio_id: PatioId) -> Result<Vec<Vaga>, DomainError> {
        self.find_many(doc! { "patio_id": patio_id.0 }, doc! { "numero": 1 })
            .await
    }

    async fn create(&self, vaga: &NewVaga) -> Result<Vaga, DomainError> {
        let vaga = vaga.clone().into_vaga(VagaId(self.ids.next().await?));
        self.collection
            .insert_one(VagaDocument::from(&vaga), None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(vaga)
    }

    async fn update(&self, vaga: &Vaga) -> Result<(), DomainError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": vaga.id.0 }, VagaDocument::from(vaga), None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(DomainError::NotFound(format!("Vaga {} not found", vaga.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: VagaId) -> Result<(), DomainError> {
        self.collection
            .delete_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}
