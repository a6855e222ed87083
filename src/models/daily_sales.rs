// src/models/daily_sales.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::common::{error::AppError, serde_utils::empty_string_as_none, validation::FieldErrors};

// --- LANÇAMENTO DO DIA (um por data) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesEntry {
    pub id: Uuid,

    #[sqlx(rename = "entry_date")]
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub date: NaiveDate,

    #[schema(example = "350.00")]
    pub pix: Decimal,
    #[schema(example = "120.50")]
    pub cash: Decimal,
    #[schema(example = "200.00")]
    pub debit_card: Decimal,
    #[schema(example = "480.00")]
    pub credit_card: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailySalesEntry {
    pub fn total_sales(&self) -> Decimal {
        self.pix + self.cash + self.debit_card + self.credit_card
    }

    /// "À vista": o que entra no caixa no mesmo dia (PIX + dinheiro + débito).
    pub fn immediate_total(&self) -> Decimal {
        self.pix + self.cash + self.debit_card
    }

    pub fn card_total(&self) -> Decimal {
        self.debit_card + self.credit_card
    }

    /// Crédito ainda a receber da operadora.
    pub fn credit_total(&self) -> Decimal {
        self.credit_card
    }
}

// Lançamento com os totais derivados, calculados na leitura
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesResponse {
    #[serde(flatten)]
    pub entry: DailySalesEntry,
    pub total_sales: Decimal,
    pub immediate_total: Decimal,
    pub card_total: Decimal,
    pub credit_total: Decimal,
}

impl From<DailySalesEntry> for DailySalesResponse {
    fn from(entry: DailySalesEntry) -> Self {
        Self {
            total_sales: entry.total_sales(),
            immediate_total: entry.immediate_total(),
            card_total: entry.card_total(),
            credit_total: entry.credit_total(),
            entry,
        }
    }
}

// --- ENTRADA ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesPayload {
    // Ausente = hoje
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-15")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    #[schema(example = "350.00")]
    pub pix: Decimal,
    #[serde(default)]
    #[schema(example = "120.50")]
    pub cash: Decimal,
    #[serde(default)]
    #[schema(example = "200.00")]
    pub debit_card: Decimal,
    #[serde(default)]
    #[schema(example = "480.00")]
    pub credit_card: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySalesDraft {
    pub date: NaiveDate,
    pub pix: Decimal,
    pub cash: Decimal,
    pub debit_card: Decimal,
    pub credit_card: Decimal,
}

impl DailySalesPayload {
    pub fn into_draft(self, today: NaiveDate) -> Result<DailySalesDraft, AppError> {
        let mut errors = FieldErrors::default();
        let pix = errors.non_negative("pix", self.pix);
        let cash = errors.non_negative("cash", self.cash);
        let debit_card = errors.non_negative("debit_card", self.debit_card);
        let credit_card = errors.non_negative("credit_card", self.credit_card);
        errors.finish()?;

        Ok(DailySalesDraft {
            date: self.date.unwrap_or(today),
            pix,
            cash,
            debit_card,
            credit_card,
        })
    }
}

// --- FILTROS E TOTAIS ---

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DailySalesFilter {
    /// Data inicial (inclusiva)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,

    /// Data final (inclusiva)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,

    /// Página (começa em 1)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u32>,
}

// Somas por canal, direto do banco
#[derive(Debug, Clone, Default, FromRow)]
pub struct ChannelSums {
    pub count: i64,
    pub pix: Decimal,
    pub cash: Decimal,
    pub debit_card: Decimal,
    pub credit_card: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesTotals {
    pub count: i64,
    pub pix_sum: Decimal,
    pub cash_sum: Decimal,
    pub debit_card_sum: Decimal,
    pub credit_card_sum: Decimal,
    pub total_sales_sum: Decimal,
    pub immediate_total_sum: Decimal,
    pub credit_total_sum: Decimal,
}

impl From<ChannelSums> for DailySalesTotals {
    fn from(sums: ChannelSums) -> Self {
        Self {
            count: sums.count,
            total_sales_sum: sums.pix + sums.cash + sums.debit_card + sums.credit_card,
            immediate_total_sum: sums.pix + sums.cash + sums.debit_card,
            credit_total_sum: sums.credit_card,
            pix_sum: sums.pix,
            cash_sum: sums.cash,
            debit_card_sum: sums.debit_card,
            credit_card_sum: sums.credit_card,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesPage {
    pub items: Vec<DailySalesResponse>,
    pub totals: DailySalesTotals,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}
