//! PostgreSQL health probe

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::ports::HealthProbe;
use crate::error::DomainError;

pub struct PostgresHealth {
    db: DatabaseConnection,
}

impl PostgresHealth {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthProbe for PostgresHealth {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.db
            .ping()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
