// src/db/supplier_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{foreign_key_violation, search_pattern},
        error::AppError,
    },
    models::{
        lookup::LookupOption,
        supplier::{Supplier, SupplierDraft, SupplierFilter, SupplierListItem},
    },
};

const SUPPLIER_COLUMNS: &str = "id, name, contact, notes, active, created_at";

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(&self, executor: E, draft: &SupplierDraft) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO suppliers (name, contact, notes, active)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUPPLIER_COLUMNS}"
        );

        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(&draft.name)
            .bind(&draft.contact)
            .bind(&draft.notes)
            .bind(draft.active)
            .fetch_one(executor)
            .await?;

        Ok(supplier)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        draft: &SupplierDraft,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE suppliers
             SET name = $2, contact = $3, notes = $4, active = $5
             WHERE id = $1
             RETURNING {SUPPLIER_COLUMNS}"
        );

        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.contact)
            .bind(&draft.notes)
            .bind(draft.active)
            .fetch_optional(executor)
            .await?;

        Ok(supplier)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1");

        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(supplier)
    }

    /// Lista ordenada por nome, com o total comprado de cada fornecedor.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        filter: &SupplierFilter,
    ) -> Result<Vec<SupplierListItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, SupplierListItem>(
            r#"
            SELECT s.id, s.name, s.contact, s.notes, s.active, s.created_at,
                   COALESCE(
                       (SELECT SUM(p.total_value) FROM purchases p WHERE p.supplier_id = s.id),
                       0
                   ) AS total_purchases
            FROM suppliers s
            WHERE ($1::BOOLEAN IS NULL OR s.active = $1)
              AND ($2::TEXT IS NULL OR s.name ILIKE $2 OR s.contact ILIKE $2)
            ORDER BY s.name ASC
            "#,
        )
        .bind(filter.active)
        .bind(search_pattern(filter.search.as_deref()))
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    /// Fornecedores ativos para o campo de seleção da compra.
    pub async fn lookup_active(&self) -> Result<Vec<LookupOption>, AppError> {
        let options = sqlx::query_as::<_, LookupOption>(
            "SELECT id, name FROM suppliers WHERE active ORDER BY name ASC",
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
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "UPDATE suppliers SET active = $2 WHERE id = $1 RETURNING {SUPPLIER_COLUMNS}"
        );

        let supplier = sqlx::query_as::<_, Supplier>(&sql)
            .bind(id)
            .bind(active)
            .fetch_optional(executor)
            .await?;

        Ok(supplier)
    }

    /// Remove o fornecedor. A FK (ON DELETE RESTRICT) barra a exclusão enquanto
    /// houver compras apontando para ele. Devolve `false` se o id não existe.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| {
                if foreign_key_violation(&e).is_some() {
                    return AppError::ReferentialIntegrity("supplier_in_use");
                }
                e.into()
            })?;

        Ok(result.rows_affected() > 0)
    }
}
