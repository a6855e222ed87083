// src/services/daily_sales_service.rs

use chrono::{NaiveDate, Utc};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::read_snapshot, error::AppError, pagination::PageWindow},
    db::DailySalesRepository,
    models::daily_sales::{
        DailySalesEntry, DailySalesFilter, DailySalesPage, DailySalesPayload, DailySalesResponse,
        DailySalesTotals,
    },
};

#[derive(Clone)]
pub struct DailySalesService {
    repo: DailySalesRepository,
    page_size: u32,
}

impl DailySalesService {
    pub fn new(repo: DailySalesRepository, page_size: u32) -> Self {
        Self { repo, page_size }
    }

    /// Um lançamento por dia; data repetida volta como UniqueConstraintViolation.
    pub async fn create<'e, E>(&self, executor: E, payload: DailySalesPayload) -> Result<DailySalesEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let draft = payload.into_draft(Utc::now().date_naive())?;
        let entry = self.repo.create(executor, &draft).await?;

        tracing::info!("💰 Vendas de {} lançadas (total {})", entry.date, entry.total_sales());
        Ok(entry)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: DailySalesPayload,
    ) -> Result<DailySalesEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let draft = payload.into_draft(Utc::now().date_naive())?;
        let entry = self
            .repo
            .update(executor, id, &draft)
            .await?
            .ok_or(AppError::NotFound("daily_sales_not_found"))?;

        tracing::info!("✏️ Vendas de {} atualizadas", entry.date);
        Ok(entry)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<DailySalesEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_by_id(executor, id)
            .await?
            .ok_or(AppError::NotFound("daily_sales_not_found"))
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> Result<DailySalesEntry, AppError> {
        self.repo
            .find_by_date(date)
            .await?
            .ok_or(AppError::NotFound("daily_sales_not_found"))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete(executor, id).await? {
            return Err(AppError::NotFound("daily_sales_not_found"));
        }

        tracing::info!("🗑️ Lançamento de vendas removido: {}", id);
        Ok(())
    }

    /// Página filtrada + totais do período inteiro, lidos na mesma transação.
    pub async fn list<'e, E>(&self, executor: E, filter: DailySalesFilter) -> Result<DailySalesPage, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        read_snapshot(&mut tx).await?;

        let sums = self
            .repo
            .sums(&mut *tx, filter.start_date, filter.end_date)
            .await?;
        let window = PageWindow::clamp(filter.page, self.page_size, sums.count);

        let entries = self
            .repo
            .page(&mut *tx, filter.start_date, filter.end_date, window)
            .await?;

        tx.commit().await?;

        Ok(DailySalesPage {
            items: entries.into_iter().map(DailySalesResponse::from).collect(),
            totals: DailySalesTotals::from(sums),
            page: window.page,
            page_size: window.page_size,
            total_pages: window.total_pages,
        })
    }
}
