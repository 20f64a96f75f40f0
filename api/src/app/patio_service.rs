//! Patio service

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{NewPatio, Patio, PatioId, Vaga};
use crate::domain::ports::{PatioRepository, VagaRepository};
use crate::error::{AppError, DomainError};

/// A patio together with its spaces
#[derive(Debug, Clone, Serialize)]
pub struct PatioDetalhes {
    #[serde(flatten)]
    pub patio: Patio,
    pub vagas: Vec<Vaga>,
}

/// Service for managing patios
pub struct PatioService<PR, VR>
where
    PR: PatioRepository + ?Sized,
    VR: VagaRepository + ?Sized,
{
    patios: Arc<PR>,
    vagas: Arc<VR>,
}

impl<PR, VR> PatioService<PR, VR>
where
    PR: PatioRepository + ?Sized,
    VR: VagaRepository + ?Sized,
{
    pub fn new(patios: Arc<PR>, vagas: Arc<VR>) -> Self {
        Self { patios, vagas }
    }

    pub async fn list(&self) -> Result<Vec<Patio>, AppError> {
        Ok(self.patios.list().await?)
    }

    pub async fn get(&self, id: PatioId) -> Result<Patio, AppError> {
        self.patios
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Patio {} not found", id)))
    }

    /// Patio plus its spaces, ordered by number
    pub async fn get_details(&self, id: PatioId) -> Result<PatioDetalhes, AppError> {
        let patio = self.get(id).await?;
        let mut vagas = self.vagas.find_by_patio(id).await?;
        vagas.sort_by_key(|v| v.numero);

        Ok(PatioDetalhes { patio, vagas })
    }

    pub async fn create(&self, data: NewPatio) -> Result<Patio, AppError> {
        self.ensure_unique_nome(&data.nome, None).await?;

        let patio = self.patios.create(&data).await?;
        tracing::info!(patio_id = %patio.id, nome = %patio.nome, "Patio created");
        Ok(patio)
    }

    pub async fn update(&self, id: PatioId, data: NewPatio) -> Result<(), AppError> {
        self.get(id).await?;
        self.ensure_unique_nome(&data.nome, Some(id)).await?;

        self.patios
            .update(&Patio {
                id,
                nome: data.nome,
            })
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: PatioId) -> Result<(), AppError> {
        self.get(id).await?;
        self.patios.delete(id).await?;
        tracing::info!(patio_id = %id, "Patio deleted");
        Ok(())
    }

    async fn ensure_unique_nome(&self, nome: &str, ignore: Option<PatioId>) -> Result<(), AppError> {
        let nome = nome.trim();
        let taken = self
            .patios
            .list()
            .await?
            .iter()
            .any(|p| p.nome.trim().eq_ignore_ascii_case(nome) && Some(p.id) != ignore);

        if taken {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "Patio '{}' already exists",
                nome
            ))));
        }
        Ok(())
    }
}
