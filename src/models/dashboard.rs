// src/models/dashboard.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{daily_sales::DailySalesResponse, purchase::PurchaseResponse};

/// Quantos lançamentos e compras recentes o painel mostra.
pub const RECENT_LIMIT: i64 = 5;

/// Intervalo "mês até hoje": do dia 1 do mês corrente até `today`.
pub fn month_to_date(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    (start, today)
}

// Somas de vendas do período, direto do banco
#[derive(Debug, Clone, Default, FromRow)]
pub struct MonthSalesSums {
    pub sales_total: Decimal,
    pub immediate_total: Decimal,
    pub credit_total: Decimal,
}

// Painel do mês corrente (recalculado a cada requisição)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthDashboard {
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub month_start: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-01-20")]
    pub today: NaiveDate,

    // Vendas
    #[schema(example = "12500.00")]
    pub sales_total: Decimal,
    pub immediate_total: Decimal,
    pub credit_total: Decimal,

    // Compras
    #[schema(example = "4300.00")]
    pub purchases_total: Decimal,

    pub recent_sales: Vec<DailySalesResponse>,
    pub recent_purchases: Vec<PurchaseResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_starts_on_day_one() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let (start, end) = month_to_date(today);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, today);
    }

    #[test]
    fn first_day_is_a_single_day_range() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(month_to_date(today), (today, today));
    }
}
