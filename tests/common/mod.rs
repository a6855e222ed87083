//! Utilitários compartilhados pelos testes de integração com o banco.
//!
//! Os testes precisam de um Postgres descartável em `TEST_DATABASE_URL` e
//! ficam marcados com `#[ignore]`: rode com `cargo test -- --ignored`.

use std::sync::Once;

use chrono::NaiveDate;
use domcorleone::{
    config::{AppState, Config},
    models::{
        credit_card::{CreditCard, CreditCardPayload},
        supplier::{Supplier, SupplierPayload},
    },
};
use sqlx::postgres::PgPoolOptions;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Conecta, roda as migrações e zera as tabelas. Página de 2 itens.
pub async fn test_state() -> AppState {
    init_tracing();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL deve apontar para um Postgres de testes");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Falha ao conectar no banco de testes");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Falha ao rodar as migrações");

    sqlx::query(
        "TRUNCATE installment_lines, purchases, daily_sales_entries, credit_cards, suppliers CASCADE",
    )
    .execute(&pool)
    .await
    .expect("Falha ao limpar as tabelas");

    let config = Config {
        database_url,
        bind_address: "127.0.0.1:0".to_string(),
        max_connections: 2,
        page_size: 2,
    };

    AppState::with_pool(pool, config)
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(dead_code)]
pub async fn create_supplier(state: &AppState, name: &str) -> Supplier {
    let payload = SupplierPayload {
        name: name.to_string(),
        contact: None,
        notes: None,
        active: true,
    };
    state
        .supplier_service
        .create(&state.db_pool, payload)
        .await
        .expect("Falha ao criar fornecedor")
}

#[allow(dead_code)]
pub async fn create_card(state: &AppState, name: &str, closing_day: i16) -> CreditCard {
    let payload = CreditCardPayload {
        name: name.to_string(),
        credit_limit: None,
        statement_closing_day: closing_day,
        active: true,
    };
    state
        .credit_card_service
        .create(&state.db_pool, payload)
        .await
        .expect("Falha ao criar cartão")
}
