//! PostgreSQL adapter for MotoRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::domain::entities::{Moto, MotoId, NewMoto, Placa, VagaId};
use crate::domain::ports::MotoRepository;
use crate::entity::motos;
use crate::error::DomainError;

/// PostgreSQL implementation of MotoRepository
pub struct PostgresMotoRepository {
    db: DatabaseConnection,
}

impl PostgresMotoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MotoRepository for PostgresMotoRepository {
    async fn list(&self) -> Result<Vec<Moto>, DomainError> {
        let results = motos::Entity::find()
            .order_by_asc(motos::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: MotoId) -> Result<Option<Moto>, DomainError> {
        let result = motos::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, moto: &NewMoto) -> Result<Moto, DomainError> {
        let model = motos::ActiveModel {
            modelo: Set(moto.modelo.clone()),
            placa: Set(moto.placa.to_string()),
            chassi: Set(moto.chassi.clone()),
            problema_identificado: Set(moto.problema_identificado.clone()),
            vaga_id: Set(moto.vaga_id.map(|v| v.0)),
            defeitos: Set(serde_json::json!(moto.defeitos)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, moto: &Moto) -> Result<(), DomainError> {
        motos::ActiveModel {
            id: Set(moto.id.0),
            modelo: Set(moto.modelo.clone()),
            placa: Set(moto.placa.to_string()),
            chassi: Set(moto.chassi.clone()),
            problema_identificado: Set(moto.problema_identificado.clone()),
            vaga_id: Set(moto.vaga_id.map(|v| v.0)),
            defeitos: Set(serde_json::json!(moto.defeitos)),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Moto {} not found", moto.id)),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(())
    }

    async fn delete(&self, id: MotoId) -> Result<(), DomainError> {
        motos::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<motos::Model> for Moto {
    fn from(model: motos::Model) -> Self {
        Moto {
            id: MotoId(model.id),
            modelo: model.modelo,
            placa: Placa::from_stored(model.placa),
            chassi: model.chassi,
            problema_identificado: model.problema_identificado,
            vaga_id: model.vaga_id.filter(|id| *id > 0).map(VagaId),
            defeitos: serde_json::from_value(model.defeitos).unwrap_or_default(),
        }
    }
}
