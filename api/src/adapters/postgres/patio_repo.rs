//! PostgreSQL adapter for PatioRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::domain::entities::{NewPatio, Patio, PatioId};
use crate::domain::ports::PatioRepository;
use crate::entity::patios;
use crate::error::DomainError;

/// PostgreSQL implementation of PatioRepository
pub struct PostgresPatioRepository {
    db: DatabaseConnection,
}

impl PostgresPatioRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PatioRepository for PostgresPatioRepository {
    async fn list(&self) -> Result<Vec<Patio>, DomainError> {
        let results = patios::Entity::find()
            .order_by_asc(patios::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: PatioId) -> Result<Option<Patio>, DomainError> {
        let result = patios::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, patio: &NewPatio) -> Result<Patio, DomainError> {
        let result = patios::ActiveModel {
            nome: Set(patio.nome.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, patio: &Patio) -> Result<(), DomainError> {
        patios::ActiveModel {
            id: Set(patio.id.0),
            nome: Set(patio.nome.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Patio {} not found", patio.id))
            }
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(())
    }

    async fn delete(&self, id: PatioId) -> Result<(), DomainError> {
        patios::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

impl From<patios::Model> for Patio {
    fn from(model: patios::Model) -> Self {
        Patio {
            id: PatioId(model.id),
            nome: model.nome,
        }
    }
}
