//! MongoDB adapter for MotoRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use super::documents::MotoDocument;
use super::IdSequence;
use crate::domain::entities::{Moto, MotoId, NewMoto};
use crate::domain::ports::MotoRepository;
use crate::error::DomainError;

/// MongoDB implementation of MotoRepository (`motos` collection)
pub struct MongoMotoRepository {
    collection: Collection<MotoDocument>,
    ids: IdSequence,
}

impl MongoMotoRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("motos"),
            ids: IdSequence::new(&db, "motos"),
        }
    }
}

#[async_trait]
impl MotoRepository for MongoMotoRepository {
    async fn list(&self) -> Result<Vec<Moto>, DomainError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let docs: Vec<MotoDocument> = self
            .collection
            .find(doc! {}, options)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(docs.into_iter().map(Moto::from).collect())
    }

    async fn find_by_id(&self, id: MotoId) -> Result<Option<Moto>, DomainError> {
        let result = self
            .collection
            .find_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(Moto::from))
    }

    async fn create(&self, moto: &NewMoto) -> Result<Moto, DomainError> {
        let moto = moto.clone().into_moto(MotoId(self.ids.next().await?));
        self.collection
            .insert_one(MotoDocument::from(&moto), None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(moto)
    }

    async fn update(&self, moto: &Moto) -> Result<(), DomainError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": moto.id.0 }, MotoDocument::from(moto), None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(DomainError::NotFound(format!("Moto {} not found", moto.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: MotoId) -> Result<(), DomainError> {
        self.collection
            .delete_one(doc! { "_id": id.0 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}
