// src/db/purchase_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{foreign_key_violation, search_pattern},
        error::AppError,
        pagination::PageWindow,
    },
    models::purchase::{
        PaymentMethod, Purchase, PurchaseDraft, PurchaseFilter, PurchaseRecord, PurchaseTotals,
    },
};

// Compra + nomes do fornecedor e do cartão. Espera a tabela de compras como `p`.
const PURCHASE_PROJECTION: &str = "
    p.id, p.supplier_id, s.name AS supplier_name, p.description, p.total_value,
    p.purchase_date, p.payment_method, p.credit_card_id, c.name AS credit_card_name,
    p.installment_count, p.notes, p.created_at, p.updated_at";

const PURCHASE_JOINS: &str = "
    JOIN suppliers s ON s.id = p.supplier_id
    LEFT JOIN credit_cards c ON c.id = p.credit_card_id";

// $1..$5 = início, fim, fornecedor, forma de pagamento, padrão de busca
const PURCHASE_FILTER: &str = "
    ($1::DATE IS NULL OR p.purchase_date >= $1)
    AND ($2::DATE IS NULL OR p.purchase_date <= $2)
    AND ($3::UUID IS NULL OR p.supplier_id = $3)
    AND ($4::payment_method IS NULL OR p.payment_method = $4)
    AND ($5::TEXT IS NULL OR p.description ILIKE $5 OR s.name ILIKE $5)";

/// FK violada em INSERT/UPDATE vira erro de validação no campo correspondente.
fn map_unknown_reference(e: sqlx::Error) -> AppError {
    match foreign_key_violation(&e) {
        Some("purchases_supplier_id_fkey") => AppError::field("supplier_id", "unknown_supplier"),
        Some("purchases_credit_card_id_fkey") => {
            AppError::field("credit_card_id", "unknown_credit_card")
        }
        _ => e.into(),
    }
}

fn into_purchases(records: Vec<PurchaseRecord>) -> Result<Vec<Purchase>, AppError> {
    records.into_iter().map(Purchase::try_from).collect()
}

// Parâmetros do filtro já no formato das binds
struct FilterBinds {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    supplier_id: Option<Uuid>,
    payment_method: Option<PaymentMethod>,
    pattern: Option<String>,
}

impl From<&PurchaseFilter> for FilterBinds {
    fn from(f: &PurchaseFilter) -> Self {
        Self {
            start: f.start_date,
            end: f.end_date,
            supplier_id: f.supplier_id,
            payment_method: f.payment_method,
            pattern: search_pattern(f.search.as_deref()),
        }
    }
}

#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(&self, executor: E, draft: &PurchaseDraft) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "WITH p AS (
                INSERT INTO purchases (
                    supplier_id, description, total_value, purchase_date,
                    payment_method, credit_card_id, installment_count, notes
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
             )
             SELECT {PURCHASE_PROJECTION} FROM p {PURCHASE_JOINS}"
        );

        let record = sqlx::query_as::<_, PurchaseRecord>(&sql)
            .bind(draft.supplier_id)
            .bind(&draft.description)
            .bind(draft.total_value)
            .bind(draft.purchase_date)
            .bind(draft.terms.method())
            .bind(draft.terms.credit_card_id())
            .bind(i16::from(draft.terms.installments().get()))
            .bind(&draft.notes)
            .fetch_one(executor)
            .await
            .map_err(map_unknown_reference)?;

        Purchase::try_from(record)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: &PurchaseDraft,
    ) -> Result<Option<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "WITH p AS (
                UPDATE purchases
                SET supplier_id = $2, description = $3, total_value = $4, purchase_date = $5,
                    payment_method = $6, credit_card_id = $7, installment_count = $8,
                    notes = $9, updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {PURCHASE_PROJECTION} FROM p {PURCHASE_JOINS}"
        );

        let record = sqlx::query_as::<_, PurchaseRecord>(&sql)
            .bind(id)
            .bind(draft.supplier_id)
            .bind(&draft.description)
            .bind(draft.total_value)
            .bind(draft.purchase_date)
            .bind(draft.terms.method())
            .bind(draft.terms.credit_card_id())
            .bind(i16::from(draft.terms.installments().get()))
            .bind(&draft.notes)
            .fetch_optional(executor)
            .await
            .map_err(map_unknown_reference)?;

        record.map(Purchase::try_from).transpose()
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {PURCHASE_PROJECTION} FROM purchases p {PURCHASE_JOINS} WHERE p.id = $1"
        );

        let record = sqlx::query_as::<_, PurchaseRecord>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        record.map(Purchase::try_from).transpose()
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM purchases WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found)
    }

    /// Igual a `find_by_id`, mas trava a linha da compra até o fim da transação.
    pub async fn find_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {PURCHASE_PROJECTION} FROM purchases p {PURCHASE_JOINS}
             WHERE p.id = $1
             FOR UPDATE OF p"
        );

        let record = sqlx::query_as::<_, PurchaseRecord>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        record.map(Purchase::try_from).transpose()
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // As parcelas caem junto (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  RELATÓRIO (contagem + somas + página)
    // =========================================================================

    /// Somas de todo o conjunto filtrado, não só da página.
    pub async fn totals<'e, E>(&self, executor: E, filter: &PurchaseFilter) -> Result<PurchaseTotals, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let binds = FilterBinds::from(filter);
        let sql = format!(
            "SELECT COUNT(*) AS count,
                    COALESCE(SUM(p.total_value), 0) AS total_value_sum,
                    COALESCE(SUM(p.total_value) FILTER (WHERE p.payment_method <> 'CREDIT'), 0)
                        AS immediate_value_sum,
                    COALESCE(SUM(p.total_value) FILTER (WHERE p.payment_method = 'CREDIT'), 0)
                        AS credit_value_sum
             FROM purchases p {PURCHASE_JOINS}
             WHERE {PURCHASE_FILTER}"
        );

        let totals = sqlx::query_as::<_, PurchaseTotals>(&sql)
            .bind(binds.start)
            .bind(binds.end)
            .bind(binds.supplier_id)
            .bind(binds.payment_method)
            .bind(binds.pattern)
            .fetch_one(executor)
            .await?;

        Ok(totals)
    }

    pub async fn page<'e, E>(
        &self,
        executor: E,
        filter: &PurchaseFilter,
        window: PageWindow,
    ) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let binds = FilterBinds::from(filter);
        let sql = format!(
            "SELECT {PURCHASE_PROJECTION} FROM purchases p {PURCHASE_JOINS}
             WHERE {PURCHASE_FILTER}
             ORDER BY p.purchase_date DESC, p.created_at DESC
             LIMIT $6 OFFSET $7"
        );

        let records = sqlx::query_as::<_, PurchaseRecord>(&sql)
            .bind(binds.start)
            .bind(binds.end)
            .bind(binds.supplier_id)
            .bind(binds.payment_method)
            .bind(binds.pattern)
            .bind(window.limit())
            .bind(window.offset())
            .fetch_all(executor)
            .await?;

        into_purchases(records)
    }

    /// Últimas compras lançadas, de qualquer mês.
    pub async fn recent<'e, E>(&self, executor: E, limit: i64) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT {PURCHASE_PROJECTION} FROM purchases p {PURCHASE_JOINS}
             ORDER BY p.purchase_date DESC, p.created_at DESC
             LIMIT $1"
        );

        let records = sqlx::query_as::<_, PurchaseRecord>(&sql)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        into_purchases(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_ignored() {
        let filter = PurchaseFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(FilterBinds::from(&filter).pattern, None);
    }

    #[test]
    fn search_term_becomes_an_escaped_pattern() {
        let filter = PurchaseFilter {
            search: Some(" 50%_off ".to_string()),
            payment_method: Some(PaymentMethod::Pix),
            ..Default::default()
        };
        let binds = FilterBinds::from(&filter);
        assert_eq!(binds.pattern.as_deref(), Some("%50\\%\\_off%"));
        assert_eq!(binds.payment_method, Some(PaymentMethod::Pix));
    }
}
