// src/models/credit_card.rs

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    error::AppError,
    serde_utils::empty_string_as_none,
    validation::{trimmed, FieldErrors},
};

pub const DEFAULT_CLOSING_DAY: i16 = 10;

// Janela do "usado recentemente" (aproxima o período de uma fatura)
pub const USAGE_WINDOW_DAYS: u64 = 30;

/// Primeiro dia que ainda conta no uso recente do cartão.
pub fn usage_window_start(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(USAGE_WINDOW_DAYS)).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: Uuid,

    #[schema(example = "Nubank")]
    pub name: String,

    #[schema(example = "5000.00")]
    pub credit_limit: Option<Decimal>,

    // Dia do mês em que a fatura fecha (1–31); informativo
    #[schema(example = 10)]
    pub statement_closing_day: i16,

    #[schema(example = true)]
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

// Linha da listagem: o cartão e o total de compras nele nos últimos 30 dias
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardListItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub card: CreditCard,

    #[schema(example = "830.00")]
    pub used_last_30_days: Decimal,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CreditCardFilter {
    /// Filtra por situação (ativo/inativo). Ausente lista todos.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub active: Option<bool>,

    /// Só cartões que fecham a fatura neste dia
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub closing_day: Option<i16>,

    /// Busca no nome do cartão
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPayload {
    #[validate(length(max = 50, message = "too_long"))]
    #[schema(example = "Santander")]
    pub name: String,

    #[schema(example = "3000.00")]
    pub credit_limit: Option<Decimal>,

    #[serde(default = "default_closing_day")]
    #[validate(range(min = 1, max = 31, message = "invalid_closing_day"))]
    #[schema(example = 10)]
    pub statement_closing_day: i16,

    #[serde(default = "default_active")]
    #[schema(example = true)]
    pub active: bool,
}

fn default_closing_day() -> i16 {
    DEFAULT_CLOSING_DAY
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCardDraft {
    pub name: String,
    pub credit_limit: Option<Decimal>,
    pub statement_closing_day: i16,
    pub active: bool,
}

impl CreditCardPayload {
    pub fn into_draft(self) -> Result<CreditCardDraft, AppError> {
        let payload = CreditCardPayload {
            name: trimmed(self.name),
            ..self
        };

        let mut errors = FieldErrors::from_derive(&payload);
        errors.require_text("name", &payload.name);
        let credit_limit = payload
            .credit_limit
            .map(|limit| errors.non_negative("credit_limit", limit));
        errors.finish()?;

        Ok(CreditCardDraft {
            name: payload.name,
            credit_limit,
            statement_closing_day: payload.statement_closing_day,
            active: payload.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CreditCardPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn usage_window_covers_thirty_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(usage_window_start(today), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn closing_day_filter_reads_from_query() {
        let filter: CreditCardFilter =
            serde_json::from_str(r#"{"closingDay": "15", "search": ""}"#).unwrap();
        assert_eq!(filter.closing_day, Some(15));
        assert_eq!(filter.search, None);
    }

    #[test]
    fn closing_day_defaults_to_ten() {
        let draft = parse(r#"{"name": "Itaú"}"#).into_draft().unwrap();
        assert_eq!(draft.statement_closing_day, 10);
        assert_eq!(draft.credit_limit, None);
        assert!(draft.active);
    }

    #[test]
    fn closing_day_outside_month_is_rejected() {
        for day in [0, 32] {
            let payload = parse(&format!(r#"{{"name": "Itaú", "statementClosingDay": {day}}}"#));
            assert!(matches!(payload.into_draft(), Err(AppError::ValidationError(_))));
        }
    }

    #[test]
    fn negative_limit_is_rejected() {
        let payload = parse(r#"{"name": "Itaú", "creditLimit": -1}"#);
        assert!(matches!(payload.into_draft(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn limit_is_rounded_to_cents() {
        let draft = parse(r#"{"name": "Itaú", "creditLimit": 1500.125}"#).into_draft().unwrap();
        assert_eq!(draft.credit_limit, Some("1500.13".parse().unwrap()));
    }
}
