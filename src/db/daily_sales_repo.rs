// src/db/daily_sales_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::unique_violation, error::AppError, pagination::PageWindow},
    models::daily_sales::{ChannelSums, DailySalesDraft, DailySalesEntry},
};

const ENTRY_COLUMNS: &str =
    "id, entry_date, pix, cash, debit_card, credit_card, created_at, updated_at";

// Filtro de período compartilhado pelas consultas de contagem, totais e página
const RANGE_FILTER: &str = "($1::DATE IS NULL OR entry_date >= $1)
             AND ($2::DATE IS NULL OR entry_date <= $2)";

fn map_duplicate_date(e: sqlx::Error) -> AppError {
    if unique_violation(&e) == Some("daily_sales_entries_entry_date_key") {
        return AppError::UniqueConstraintViolation("duplicate_sales_date");
    }
    e.into()
}

#[derive(Clone)]
pub struct DailySalesRepository {
    pool: PgPool,
}

impl DailySalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(&self, executor: E, draft: &DailySalesDraft) -> Result<DailySalesEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO daily_sales_entries (entry_date, pix, cash, debit_card, credit_card)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ENTRY_COLUMNS}"
        );

        sqlx::query_as::<_, DailySalesEntry>(&sql)
            .bind(draft.date)
            .bind(draft.pix)
            .bind(draft.cash)
            .bind(draft.debit_card)
            .bind(draft.credit_card)
            .fetch_one(executor)
            .await
            .map_err(map_duplicate_date)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: &DailySalesDraft,
    ) -> Result<Option<DailySalesEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE daily_sales_entries
             SET entry_date = $2, pix = $3, cash = $4, debit_card = $5, credit_card = $6,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ENTRY_COLUMNS}"
        );

        sqlx::query_as::<_, DailySalesEntry>(&sql)
            .bind(id)
            .bind(draft.date)
            .bind(draft.pix)
            .bind(draft.cash)
            .bind(draft.debit_card)
            .bind(draft.credit_card)
            .fetch_optional(executor)
            .await
            .map_err(map_duplicate_date)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<DailySalesEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM daily_sales_entries WHERE id = $1");

        let entry = sqlx::query_as::<_, DailySalesEntry>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(entry)
    }

    // Leitura avulsa, direto na pool
    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailySalesEntry>, AppError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM daily_sales_entries WHERE entry_date = $1");

        let entry = sqlx::query_as::<_, DailySalesEntry>(&sql)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM daily_sales_entries WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  RELATÓRIO (contagem + somas + página)
    // =========================================================================

    /// Quantidade e somas por canal de todo o período filtrado.
    pub async fn sums<'e, E>(
        &self,
        executor: E,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<ChannelSums, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT COUNT(*) AS count,
                    COALESCE(SUM(pix), 0) AS pix,
                    COALESCE(SUM(cash), 0) AS cash,
                    COALESCE(SUM(debit_card), 0) AS debit_card,
                    COALESCE(SUM(credit_card), 0) AS credit_card
             FROM daily_sales_entries
             WHERE {RANGE_FILTER}"
        );

        let sums = sqlx::query_as::<_, ChannelSums>(&sql)
            .bind(start)
            .bind(end)
            .fetch_one(executor)
            .await?;

        Ok(sums)
    }

    pub async fn page<'e, E>(
        &self,
        executor: E,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        window: PageWindow,
    ) -> Result<Vec<DailySalesEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM daily_sales_entries
             WHERE {RANGE_FILTER}
             ORDER BY entry_date DESC
             LIMIT $3 OFFSET $4"
        );

        let entries = sqlx::query_as::<_, DailySalesEntry>(&sql)
            .bind(start)
            .bind(end)
            .bind(window.limit())
            .bind(window.offset())
            .fetch_all(executor)
            .await?;

        Ok(entries)
    }

    /// Últimos lançamentos, de qualquer mês.
    pub async fn recent<'e, E>(&self, executor: E, limit: i64) -> Result<Vec<DailySalesEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM daily_sales_entries
             ORDER BY entry_date DESC
             LIMIT $1"
        );

        let entries = sqlx::query_as::<_, DailySalesEntry>(&sql)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(entries)
    }
}
