// src/services/supplier_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SupplierRepository,
    models::{
        lookup::LookupOption,
        supplier::{Supplier, SupplierFilter, SupplierListItem, SupplierPayload},
    },
};

#[derive(Clone)]
pub struct SupplierService {
    repo: SupplierRepository,
}

impl SupplierService {
    pub fn new(repo: SupplierRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'e, E>(&self, executor: E, payload: SupplierPayload) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let draft = payload.into_draft()?;
        let supplier = self.repo.create(executor, &draft).await?;

        tracing::info!("🏪 Fornecedor cadastrado: {} ({})", supplier.name, supplier.id);
        Ok(supplier)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: SupplierPayload,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let draft = payload.into_draft()?;
        let supplier = self
            .repo
            .update(executor, id, &draft)
            .await?
            .ok_or(AppError::NotFound("supplier_not_found"))?;

        tracing::info!("✏️ Fornecedor atualizado: {}", supplier.id);
        Ok(supplier)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_by_id(executor, id)
            .await?
            .ok_or(AppError::NotFound("supplier_not_found"))
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        filter: SupplierFilter,
    ) -> Result<Vec<SupplierListItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list(executor, &filter).await
    }

    pub async fn lookup(&self) -> Result<Vec<LookupOption>, AppError> {
        self.repo.lookup_active().await
    }

    /// Ativa ou desativa. Inativo sai das listas de seleção, mas o histórico fica.
    pub async fn set_active<'e, E>(&self, executor: E, id: Uuid, active: bool) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = self
            .repo
            .set_active(executor, id, active)
            .await?
            .ok_or(AppError::NotFound("supplier_not_found"))?;

        tracing::info!("🔁 Fornecedor {} ativo = {}", supplier.id, supplier.active);
        Ok(supplier)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete(executor, id).await? {
            return Err(AppError::NotFound("supplier_not_found"));
        }

        tracing::info!("🗑️ Fornecedor removido: {}", id);
        Ok(())
    }
}
