//! MongoDB adapter for PatioRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use super::documents::PatioDocument;
use super::IdSequence;
use crate::domain::entities::{NewPatio, Patio, PatioId};
use crate::domain::ports::PatioRepository;
use crate::error::DomainError;

/// MongoDB implementation of PatioRepository (`patios` collection)
pub struct MongoPatioRepository {
    collection: Collection<PatioDocument>,
    ids: IdSequence,
}

impl MongoPatioRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("patios"),
            ids: IdSequence::new(&db, "patios"),
        }
    }
}

#[async_trait]
impl PatioRepository for MongoPatioRepository {
    async fn list(&self) -> Result<Vec<Patio>, DomainError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let docs: Vec<PatioDocument> = self
            .collection
            .find(doc! {}, options)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(docs.into_iter().map(Patio::from).collect())
    }

    async fn find_by_id(&self, id: PatioId) -> Result<Option<Patio>, DomainError> {
        let result = self
            .collection
            .find_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Patio::from))
    }

    async fn create(&self, patio: &NewPatio) -> Result<Patio, DomainError> {
        let patio = Patio {
            id: PatioId(self.ids.next().await?),
            nome: patio.nome.clone(),
        };
        self.collection
            .insert_one(PatioDocument::from(&patio), None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(patio)
    }

    async fn update(&self, patio: &Patio) -> Result<(), DomainError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": patio.id.0 }, PatioDocument::from(patio), None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(DomainError::NotFound(format!("Patio {} not found", patio.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: PatioId) -> Result<(), DomainError> {
        self.collection
            .delete_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}
