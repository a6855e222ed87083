// src/db/credit_card_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{foreign_key_violation, search_pattern},
        error::AppError,
    },
    models::{
        credit_card::{CreditCard, CreditCardDraft, CreditCardFilter, CreditCardListItem},
        lookup::LookupOption,
    },
};

const CARD_COLUMNS: &str = "id, name, credit_limit, statement_closing_day, active, created_at";

#[derive(Clone)]
pub struct CreditCardRepository {
    pool: PgPool,
}

impl CreditCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(&self, executor: E, draft: &CreditCardDraft) -> Result<CreditCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO credit_cards (name, credit_limit, statement_closing_day, active)
             VALUES ($1, $2, $3, $4)
             RETURNING {CARD_COLUMNS}"
        );

        let card = sqlx::query_as::<_, CreditCard>(&sql)
            .bind(&draft.name)
            .bind(draft.credit_limit)
            .bind(draft.statement_closing_day)
            .bind(draft.active)
            .fetch_one(executor)
            .await?;

        Ok(card)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: &CreditCardDraft,
    ) -> Result<Option<CreditCard>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE credit_cards
             SET name = $2, credit_limit = $3, statement_closing_day = $4, active = $5
             WHERE id = $1
             RETURNING {CARD_COLUMNS}"
        );

        let card = sqlx::query_as::<_, CreditCard>(&sql)
            .bind(id)
            .bind(&draft.name)
            .bind(draft.credit_limit)
            .bind(draft.statement_closing_day)
            .bind(draft.active)
            .fetch_optional(executor)
            .await?;

        Ok(card)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<CreditCard>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {CARD_COLUMNS} FROM credit_cards WHERE id = $1");

        let card = sqlx::query_as::<_, CreditCard>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(card)
    }

    /// Lista por nome, com o total comprado em cada cartão desde `used_since`.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        filter: &CreditCardFilter,
        used_since: NaiveDate,
    ) -> Result<Vec<CreditCardListItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, CreditCardListItem>(
            r#"
            SELECT c.id, c.name, c.credit_limit, c.statement_closing_day, c.active, c.created_at,
                   COALESCE(
                       (SELECT SUM(p.total_value) FROM purchases p
                        WHERE p.credit_card_id = c.id AND p.purchase_date >= $4),
                       0
                   ) AS used_last_30_days
            FROM credit_cards c
            WHERE ($1::BOOLEAN IS NULL OR c.active = $1)
              AND ($2::SMALLINT IS NULL OR c.statement_closing_day = $2)
              AND ($3::TEXT IS NULL OR c.name ILIKE $3)
            ORDER BY c.name ASC
            "#,
        )
        .bind(filter.active)
        .bind(filter.closing_day)
        .bind(search_pattern(filter.search.as_deref()))
        .bind(used_since)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    /// Cartões ativos (id, nome) para o formulário de compras.
    pub async fn lookup_active(&self) -> Result<Vec<LookupOption>, AppError> {
        let options = sqlx::query_as::<_, LookupOption>(
            "SELECT id, name FROM credit_cards WHERE active ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn set_active<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        active: bool,
    ) -> Result<Option<CreditCard>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE credit_cards SET active = $2 WHERE id = $1 RETURNING {CARD_COLUMNS}"
        );

        let card = sqlx::query_as::<_, CreditCard>(&sql)
            .bind(id)
            .bind(active)
            .fetch_optional(executor)
            .await?;

        Ok(card)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM credit_cards WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if foreign_key_violation(&e).is_some() {
                    return AppError::ReferentialIntegrity("credit_card_in_use");
                }
                e.into()
            })?;

        Ok(result.rows_affected() > 0)
    }
}
