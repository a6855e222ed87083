// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        CreditCardRepository, DailySalesRepository, DashboardRepository, InstallmentRepository,
        PurchaseRepository, SupplierRepository,
    },
    services::{
        CreditCardService, DailySalesService, DashboardService, InstallmentService,
        PurchaseService, SupplierService,
    },
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PAGE_SIZE: u32 = 15;

// Configuração lida das variáveis de ambiente (ou do .env)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca (facilita os testes).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size >= 1)
                .with_context(|| format!("PAGE_SIZE inválido: {raw}"))?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            database_url,
            bind_address,
            max_connections,
            page_size,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub i18n_store: Arc<I18nStore>,
    pub supplier_service: SupplierService,
    pub credit_card_service: CreditCardService,
    pub daily_sales_service: DailySalesService,
    pub purchase_service: PurchaseService,
    pub installment_service: InstallmentService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_pool(db_pool: PgPool, config: Config) -> Self {
        let page_size = config.page_size;

        // Repositórios
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let credit_card_repo = CreditCardRepository::new(db_pool.clone());
        let daily_sales_repo = DailySalesRepository::new(db_pool.clone());
        let purchase_repo = PurchaseRepository::new(db_pool.clone());
        let installment_repo = InstallmentRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        // Serviços
        Self {
            db_pool,
            config: Arc::new(config),
            i18n_store: Arc::new(I18nStore::new()),
            supplier_service: SupplierService::new(supplier_repo),
            credit_card_service: CreditCardService::new(credit_card_repo.clone()),
            daily_sales_service: DailySalesService::new(daily_sales_repo.clone(), page_size),
            purchase_service: PurchaseService::new(
                purchase_repo.clone(),
                installment_repo.clone(),
                page_size,
            ),
            installment_service: InstallmentService::new(
                installment_repo,
                purchase_repo.clone(),
                credit_card_repo,
            ),
            dashboard_service: DashboardService::new(dashboard_repo, daily_sales_repo, purchase_repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.page_size, 15);
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("PAGE_SIZE", " 2 "),
        ]))
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.page_size, 2);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("PAGE_SIZE", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PAGE_SIZE"));
    }
}
