// src/models/installment.rs

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Parcela de uma compra no crédito
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentLine {
    pub id: Uuid,
    pub purchase_id: Uuid,

    #[schema(example = 1)]
    pub installment_number: i16,

    #[schema(example = "33.33")]
    pub installment_value: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-02-10")]
    pub due_date: NaiveDate,

    pub paid: bool,

    #[schema(value_type = Option<String>, format = Date)]
    pub paid_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

// Linha ainda não gravada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstallmentLine {
    pub installment_number: i16,
    pub installment_value: Decimal,
    pub due_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidPayload {
    // Ausente = hoje
    #[schema(value_type = Option<String>, format = Date, example = "2024-02-10")]
    pub paid_date: Option<NaiveDate>,
}

/// Vencimento da parcela `k`: mês da compra + k, no dia de fechamento do
/// cartão (limitado ao último dia dos meses mais curtos).
pub fn due_date(purchase_date: NaiveDate, closing_day: i16, k: u32) -> Option<NaiveDate> {
    let first_of_month = purchase_date.with_day(1)?;
    let target = first_of_month.checked_add_months(Months::new(k))?;
    let last_day = target
        .checked_add_months(Months::new(1))?
        .pred_opt()?
        .day();
    let day = u32::try_from(closing_day).ok()?.clamp(1, last_day);
    target.with_day(day)
}

/// Monta as linhas do cronograma a partir dos valores já divididos em centavos.
pub fn build_schedule(
    purchase_date: NaiveDate,
    closing_day: i16,
    values: &[Decimal],
) -> Option<Vec<NewInstallmentLine>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let number = u32::try_from(i + 1).ok()?;
            Some(NewInstallmentLine {
                installment_number: i16::try_from(number).ok()?,
                installment_value: *value,
                due_date: due_date(purchase_date, closing_day, number)?,
            })
        })
        .collect()
}
