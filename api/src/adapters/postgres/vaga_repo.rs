//! PostgreSQL adapter for VagaRepository
//!
//! The occupant is stored as `vagas.moto_id`; its descriptive fields are read
//! from `motos` when the space is loaded.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{
    AllocatedMoto, MotoId, NewVaga, PatioId, Placa, StatusVaga, TipoVaga, Vaga, VagaId,
};
use crate::domain::ports::VagaRepository;
use crate::entity::{motos, vagas};
use crate::error::DomainError;

/// PostgreSQL implementation of VagaRepository
pub struct PostgresVagaRepository {
    db: DatabaseConnection,
}

impl PostgresVagaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve occupant details for a batch of spaces
    async fn with_occupants(&self, models: Vec<vagas::Model>) -> Result<Vec<Vaga>, DomainError> {
        let moto_ids: Vec<i64> = models.iter().filter_map(|m| m.moto_id).collect();

        let occupants: HashMap<i64, motos::Model> = if moto_ids.is_empty() {
            HashMap::new()
        } else {
            motos::Entity::find()
                .filter(motos::Column::Id.is_in(moto_ids))
                .all(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?
                .into_iter()
                .map(|m| (m.id, m))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|model| {
                let moto = model.moto_id.map(|id| match occupants.get(&id) {
                    Some(m) => AllocatedMoto::from_parts(
                        MotoId(m.id),
                        &m.modelo,
                        &Placa::from_stored(m.placa.clone()),
                        &m.chassi,
                    ),
                    None => AllocatedMoto::placeholder(MotoId(id)),
                });
                to_domain(model, moto)
            })
            .collect())
    }
}

#[async_trait]
impl VagaRepository for PostgresVagaRepository {
    async fn list(&self) -> Result<Vec<Vaga>, DomainError> {
        let results = vagas::Entity::find()
            .order_by_asc(vagas::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.with_occupants(results).await
    }

    async fn find_by_id(&self, id: VagaId) -> Result<Option<Vaga>, DomainError> {
        let result = vagas::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        match result {
            Some(model) => Ok(self.with_occupants(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_patio(&self, patio_id: PatioId) -> Result<Vec<Vaga>, DomainError> {
        let results = vagas::Entity::find()
            .filter(vagas::Column::PatioId.eq(patio_id.0))
            .order_by_asc(vagas::Column::Numero)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.with_occupants(results).await
    }

    async fn create(&self, vaga: &NewVaga) -> Result<Vaga, DomainError> {
        let model = vagas::ActiveModel {
            numero: Set(vaga.numero),
            tipo: Set(vaga.tipo.code()),
            status: Set(vaga.status.code()),
            patio_id: Set(vaga.patio_id.0),
            moto_id: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(to_domain(result, None))
    }

    async fn update(&self, vaga: &Vaga) -> Result<(), DomainError> {
        vagas::ActiveModel {
            id: Set(vaga.id.0),
            numero: Set(vaga.numero),
            tipo: Set(vaga.tipo.code()),
            status: Set(vaga.status.code()),
            patio_id: Set(vaga.patio_id.0),
            moto_id: Set(vaga.moto.as_ref().map(|m| m.id.0)),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Vaga {} not found", vaga.id)),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(())
    }

    async fn delete(&self, id: VagaId) -> Result<(), DomainError> {
        vagas::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
fn to_domain(model: vagas::Model, moto: Option<AllocatedMoto>) -> Vaga {
    Vaga {
        id: VagaId(model.id),
        numero: model.numero,
        tipo: TipoVaga::from_code(model.tipo).unwrap_or(TipoVaga::SemProblema),
        status: StatusVaga::from_code(model.status).unwrap_or(StatusVaga::Livre),
        patio_id: PatioId(model.patio_id),
        moto,
    }
}
