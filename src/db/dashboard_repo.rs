// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, Transaction};

use crate::{
    common::{db_utils::read_snapshot, error::AppError},
    models::dashboard::MonthSalesSums,
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Transação só de leitura: somas e listas do painel enxergam o mesmo estado
    pub async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        let mut tx = self.pool.begin().await?;
        read_snapshot(&mut tx).await?;
        Ok(tx)
    }

    // Vendas do período: total, à vista e crédito
    pub async fn sales_sums<'e, E>(
        &self,
        executor: E,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MonthSalesSums, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sums = sqlx::query_as::<_, MonthSalesSums>(
            r#"
            SELECT
                COALESCE(SUM(pix + cash + debit_card + credit_card), 0) AS sales_total,
                COALESCE(SUM(pix + cash + debit_card), 0) AS immediate_total,
                COALESCE(SUM(credit_card), 0) AS credit_total
            FROM daily_sales_entries
            WHERE entry_date BETWEEN $1 AND $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await?;

        Ok(sums)
    }

    // Compras do período
    pub async fn purchases_total<'e, E>(
        &self,
        executor: E,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_value), 0)
            FROM purchases
            WHERE purchase_date BETWEEN $1 AND $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }
}
