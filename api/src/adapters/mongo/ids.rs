//! Numeric id allocation for MongoDB collections

use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Collection, Database};

use crate::error::DomainError;

/// Monotonic id source for one collection
///
/// Backed by `{ _id: <collection>, seq: <last id> }` in `counters`. The
/// increment is a single `findOneAndUpdate`, so concurrent inserts never
/// share an id.
pub struct IdSequence {
    counters: Collection<Document>,
    name: &'static str,
}

impl IdSequence {
    pub fn new(db: &Database, name: &'static str) -> Self {
        Self {
            counters: db.collection("counters"),
            name,
        }
    }

    pub async fn next(&self) -> Result<i64, DomainError> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": self.name },
                doc! { "$inc": { "seq": 1_i64 } },
                options,
            )
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| {
                DomainError::Database(format!("Id counter {} missing after upsert", self.name))
            })?;

        counter
            .get_i64("seq")
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
