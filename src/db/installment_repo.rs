// src/db/installment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::installment::{InstallmentLine, NewInstallmentLine},
};

const LINE_COLUMNS: &str =
    "id, purchase_id, installment_number, installment_value, due_date, paid, paid_date, created_at";

#[derive(Clone)]
pub struct InstallmentRepository {
    pool: PgPool,
}

impl InstallmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_purchase(&self, purchase_id: Uuid) -> Result<Vec<InstallmentLine>, AppError> {
        let sql = format!(
            "SELECT {LINE_COLUMNS} FROM installment_lines
             WHERE purchase_id = $1
             ORDER BY installment_number ASC"
        );

        let lines = sqlx::query_as::<_, InstallmentLine>(&sql)
            .bind(purchase_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(lines)
    }

    /// Trava todas as linhas da compra (FOR UPDATE) e diz se alguma já foi paga.
    /// Um pagamento concorrente espera a transação terminar; se as linhas forem
    /// descartadas nela, o pagamento não encontra mais a parcela.
    pub async fn any_paid<'e, E>(&self, executor: E, purchase_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let paid: Vec<bool> = sqlx::query_scalar(
            "SELECT paid FROM installment_lines WHERE purchase_id = $1 FOR UPDATE",
        )
        .bind(purchase_id)
        .fetch_all(executor)
        .await?;

        Ok(paid.into_iter().any(|p| p))
    }

    /// Descarta o cronograma da compra. Devolve quantas linhas saíram.
    pub async fn delete_for_purchase<'e, E>(&self, executor: E, purchase_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM installment_lines WHERE purchase_id = $1")
            .bind(purchase_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Grava todas as linhas de uma vez (UNNEST dos arrays).
    pub async fn insert_all<'e, E>(
        &self,
        executor: E,
        purchase_id: Uuid,
        lines: &[NewInstallmentLine],
    ) -> Result<Vec<InstallmentLine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let numbers: Vec<i16> = lines.iter().map(|l| l.installment_number).collect();
        let values: Vec<Decimal> = lines.iter().map(|l| l.installment_value).collect();
        let due_dates: Vec<NaiveDate> = lines.iter().map(|l| l.due_date).collect();

        let sql = format!(
            "INSERT INTO installment_lines (purchase_id, installment_number, installment_value, due_date)
             SELECT $1, n, v, d FROM UNNEST($2::SMALLINT[], $3::NUMERIC[], $4::DATE[]) AS t(n, v, d)
             RETURNING {LINE_COLUMNS}"
        );

        let mut inserted = sqlx::query_as::<_, InstallmentLine>(&sql)
            .bind(purchase_id)
            .bind(numbers)
            .bind(values)
            .bind(due_dates)
            .fetch_all(executor)
            .await?;

        // RETURNING não garante ordem
        inserted.sort_by_key(|l| l.installment_number);
        Ok(inserted)
    }

    /// Marca (ou desmarca) uma parcela como paga.
    pub async fn set_paid<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        paid_date: Option<NaiveDate>,
    ) -> Result<Option<InstallmentLine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE installment_lines
             SET paid = $2::DATE IS NOT NULL, paid_date = $2
             WHERE id = $1
             RETURNING {LINE_COLUMNS}"
        );

        let line = sqlx::query_as::<_, InstallmentLine>(&sql)
            .bind(id)
            .bind(paid_date)
            .fetch_optional(executor)
            .await?;

        Ok(line)
    }
}
