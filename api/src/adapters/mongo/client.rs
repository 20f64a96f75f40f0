//! MongoDB connection handle

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::domain::ports::HealthProbe;
use crate::error::DomainError;

/// Connected database shared by the v2 repositories
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(url: &str, database: &str) -> Result<Self, DomainError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Self {
            database: client.database(database),
        })
    }

    pub fn database(&self) -> Database {
        self.database.clone()
    }
}

#[async_trait]
impl HealthProbe for MongoStore {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    /// Round-trip a `ping` command
    async fn ping(&self) -> Result<(), DomainError> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(())
    }
}
