// src/services/credit_card_service.rs

use chrono::Utc;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CreditCardRepository,
    models::{
        credit_card::{
            usage_window_start, CreditCard, CreditCardFilter, CreditCardListItem,
            CreditCardPayload,
        },
        lookup::LookupOption,
    },
};

#[derive(Clone)]
pub struct CreditCardService {
    repo: CreditCardRepository,
}

impl CreditCardService {
    pub fn new(repo: CreditCardRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'e, E>(&self, executor: E, payload: CreditCardPayload) -> Result<CreditCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let draft = payload.into_draft()?;
        let card = self.repo.create(executor, &draft).await?;

        tracing::info!("💳 Cartão cadastrado: {} ({})", card.name, card.id);
        Ok(card)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: CreditCardPayload,
    ) -> Result<CreditCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let draft = payload.into_draft()?;
        let card = self
            .repo
            .update(executor, id, &draft)
            .await?
            .ok_or(AppError::NotFound("credit_card_not_found"))?;

        tracing::info!("✏️ Cartão atualizado: {}", card.id);
        Ok(card)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<CreditCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_by_id(executor, id)
            .await?
            .ok_or(AppError::NotFound("credit_card_not_found"))
    }

    /// Listagem com o uso de cada cartão nos últimos 30 dias.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        filter: CreditCardFilter,
    ) -> Result<Vec<CreditCardListItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let used_since = usage_window_start(Utc::now().date_naive());
        self.repo.list(executor, &filter, used_since).await
    }

    /// Cartões ativos para o campo de seleção da compra.
    pub async fn lookup(&self) -> Result<Vec<LookupOption>, AppError> {
        self.repo.lookup_active().await
    }

    /// Ativa ou desativa. Cartão inativo não aparece no formulário de compras.
    pub async fn set_active<'e, E>(&self, executor: E, id: Uuid, active: bool) -> Result<CreditCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let card = self
            .repo
            .set_active(executor, id, active)
            .await?
            .ok_or(AppError::NotFound("credit_card_not_found"))?;

        tracing::info!("🔁 Cartão {} ativo = {}", card.id, card.active);
        Ok(card)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Cartão usado em alguma compra: a FK barra e vira ReferentialIntegrity
        let removed = self.repo.delete(executor, id).await?;
        if !removed {
            return Err(AppError::NotFound("credit_card_not_found"));
        }

        tracing::info!("🗑️ Cartão removido: {}", id);
        Ok(())
    }
}
