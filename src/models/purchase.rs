// src/models/purchase.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    error::AppError,
    money,
    serde_utils::empty_string_as_none,
    validation::{optional_text, trimmed, FieldErrors},
};

// --- ENUMS ---

// Mapeia o CREATE TYPE payment_method do banco
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Pix,
    Debit,
    Credit,
}

impl PaymentMethod {
    /// Dinheiro, PIX e débito saem do saldo no mesmo dia.
    pub fn settles_immediately(self) -> bool {
        !matches!(self, PaymentMethod::Credit)
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "PIX" => Ok(PaymentMethod::Pix),
            "DEBIT" => Ok(PaymentMethod::Debit),
            "CREDIT" => Ok(PaymentMethod::Credit),
            other => Err(format!("forma de pagamento desconhecida: {other}")),
        }
    }
}

/// Número de parcelas de uma compra no crédito (1 a 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Installments(u8);

impl Installments {
    pub const ONE: Installments = Installments(1);
    pub const MAX: u8 = 12;

    pub fn new(count: i64) -> Option<Self> {
        u8::try_from(count)
            .ok()
            .filter(|n| (1..=Self::MAX).contains(n))
            .map(Installments)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Condições de pagamento. Só o crédito carrega cartão e parcelas, então o
/// estado "crédito sem cartão" não tem como ser representado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTerms {
    Cash,
    Pix,
    Debit,
    Credit { card_id: Uuid, installments: Installments },
}

impl PaymentTerms {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentTerms::Cash => PaymentMethod::Cash,
            PaymentTerms::Pix => PaymentMethod::Pix,
            PaymentTerms::Debit => PaymentMethod::Debit,
            PaymentTerms::Credit { .. } => PaymentMethod::Credit,
        }
    }

    pub fn credit_card_id(&self) -> Option<Uuid> {
        match self {
            PaymentTerms::Credit { card_id, .. } => Some(*card_id),
            _ => None,
        }
    }

    pub fn installments(&self) -> Installments {
        match self {
            PaymentTerms::Credit { installments, .. } => *installments,
            _ => Installments::ONE,
        }
    }

    pub fn settles_immediately(&self) -> bool {
        self.method().settles_immediately()
    }

    /// Reconstrói as condições a partir das colunas do banco.
    pub fn from_columns(
        method: PaymentMethod,
        credit_card_id: Option<Uuid>,
        installment_count: i16,
    ) -> Option<Self> {
        match (method, credit_card_id) {
            (PaymentMethod::Credit, Some(card_id)) => Some(PaymentTerms::Credit {
                card_id,
                installments: Installments::new(i64::from(installment_count))?,
            }),
            (PaymentMethod::Credit, None) => None,
            (PaymentMethod::Cash, _) => Some(PaymentTerms::Cash),
            (PaymentMethod::Pix, _) => Some(PaymentTerms::Pix),
            (PaymentMethod::Debit, _) => Some(PaymentTerms::Debit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    PaidImmediately,
    Installments(u8),
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::PaidImmediately => write!(f, "paid immediately"),
            PaymentStatus::Installments(n) => write!(f, "split into {n} installments"),
        }
    }
}

// --- COMPRA ---

// Linha crua do banco (com os nomes do fornecedor e do cartão via JOIN)
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseRecord {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub description: String,
    pub total_value: Decimal,
    pub purchase_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub credit_card_id: Option<Uuid>,
    pub credit_card_name: Option<String>,
    pub installment_count: i16,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub supplier_name: String,
    pub description: String,
    pub total_value: Decimal,
    pub purchase_date: NaiveDate,
    pub terms: PaymentTerms,
    pub credit_card_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PurchaseRecord> for Purchase {
    type Error = AppError;

    fn try_from(r: PurchaseRecord) -> Result<Self, Self::Error> {
        let terms = PaymentTerms::from_columns(r.payment_method, r.credit_card_id, r.installment_count)
            .ok_or_else(|| {
                anyhow::anyhow!("compra {} com condições de pagamento inconsistentes", r.id)
            })?;

        Ok(Purchase {
            id: r.id,
            supplier_id: r.supplier_id,
            supplier_name: r.supplier_name,
            description: r.description,
            total_value: r.total_value,
            purchase_date: r.purchase_date,
            terms,
            credit_card_name: r.credit_card_name,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

impl Purchase {
    pub fn settles_immediately(&self) -> bool {
        self.terms.settles_immediately()
    }

    /// Valor de cada parcela: quociente exato (precisão do `Decimal`), de modo
    /// que `installment_value() * n == total_value` até a 20ª casa.
    pub fn installment_value(&self) -> Decimal {
        match self.terms {
            PaymentTerms::Credit { installments, .. } if installments.get() > 1 => {
                self.total_value / Decimal::from(installments.get())
            }
            _ => self.total_value,
        }
    }

    pub fn payment_status(&self) -> PaymentStatus {
        match self.terms {
            PaymentTerms::Credit { installments, .. } => {
                PaymentStatus::Installments(installments.get())
            }
            _ => PaymentStatus::PaidImmediately,
        }
    }

    /// Parcelas em centavos; a última absorve a sobra da divisão.
    pub fn installment_schedule(&self) -> Vec<Decimal> {
        money::split_in_cents(self.total_value, self.terms.installments().get())
    }
}

// Compra como o cliente vê: colunas planas + campos derivados
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub id: Uuid,
    pub supplier_id: Uuid,
    #[schema(example = "Atacadão Central")]
    pub supplier_name: String,
    #[schema(example = "Farinha e açúcar")]
    pub description: String,
    #[schema(example = "300.00")]
    pub total_value: Decimal,
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub purchase_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub credit_card_id: Option<Uuid>,
    pub credit_card_name: Option<String>,
    #[schema(example = 3)]
    pub installment_count: u8,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Derivados
    pub settles_immediately: bool,
    #[schema(example = "100.00")]
    pub installment_value: Decimal,
    #[schema(example = "split into 3 installments")]
    pub payment_status: String,
}

impl From<Purchase> for PurchaseResponse {
    fn from(p: Purchase) -> Self {
        Self {
            settles_immediately: p.settles_immediately(),
            installment_value: money::to_cents(p.installment_value()),
            payment_status: p.payment_status().to_string(),
            id: p.id,
            supplier_id: p.supplier_id,
            supplier_name: p.supplier_name,
            description: p.description,
            total_value: p.total_value,
            purchase_date: p.purchase_date,
            payment_method: p.terms.method(),
            credit_card_id: p.terms.credit_card_id(),
            credit_card_name: p.credit_card_name,
            installment_count: p.terms.installments().get(),
            notes: p.notes,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// --- ENTRADA ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePayload {
    pub supplier_id: Uuid,

    #[validate(length(max = 200, message = "too_long"))]
    #[schema(example = "Farinha e açúcar")]
    pub description: String,

    #[schema(example = "300.00")]
    pub total_value: Decimal,

    // Ausente = hoje
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-15")]
    pub purchase_date: Option<NaiveDate>,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    // Só considerados quando a forma de pagamento é crédito
    pub credit_card_id: Option<Uuid>,
    #[schema(example = 3)]
    pub installment_count: Option<i16>,

    pub notes: Option<String>,
}

// Compra validada e normalizada; é o único formato que o repositório grava
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDraft {
    pub supplier_id: Uuid,
    pub description: String,
    pub total_value: Decimal,
    pub purchase_date: NaiveDate,
    pub terms: PaymentTerms,
    pub notes: Option<String>,
}

impl PurchasePayload {
    /// Valida e normaliza: crédito exige cartão; as demais formas descartam
    /// cartão e parcelas (viram 1x) sem erro.
    pub fn into_draft(self, today: NaiveDate) -> Result<PurchaseDraft, AppError> {
        let payload = PurchasePayload {
            description: trimmed(self.description),
            notes: optional_text(self.notes),
            ..self
        };

        let mut errors = FieldErrors::from_derive(&payload);
        errors.require_text("description", &payload.description);
        let total_value = errors.positive("total_value", payload.total_value);

        let terms = match payload.payment_method {
            PaymentMethod::Cash => Some(PaymentTerms::Cash),
            PaymentMethod::Pix => Some(PaymentTerms::Pix),
            PaymentMethod::Debit => Some(PaymentTerms::Debit),
            PaymentMethod::Credit => {
                let installments =
                    Installments::new(i64::from(payload.installment_count.unwrap_or(1)));
                if installments.is_none() {
                    errors.add("installment_count", "invalid_installment_count");
                }
                if payload.credit_card_id.is_none() {
                    errors.add("credit_card_id", "credit_card_required");
                }
                match (payload.credit_card_id, installments) {
                    (Some(card_id), Some(installments)) => {
                        Some(PaymentTerms::Credit { card_id, installments })
                    }
                    _ => None,
                }
            }
        };

        errors.finish()?;

        // `finish` já devolveu erro se as condições não fecharam
        let terms = terms.ok_or_else(|| AppError::field("payment_method", "required"))?;

        Ok(PurchaseDraft {
            supplier_id: payload.supplier_id,
            description: payload.description,
            total_value,
            purchase_date: payload.purchase_date.unwrap_or(today),
            terms,
            notes: payload.notes,
        })
    }
}

// --- FILTROS E TOTAIS ---

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PurchaseFilter {
    /// Data inicial (inclusiva)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,

    /// Data final (inclusiva)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub supplier_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<PaymentMethod>)]
    pub payment_method: Option<PaymentMethod>,

    /// Busca na descrição e no nome do fornecedor (sem diferenciar maiúsculas)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,

    /// Página (começa em 1)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<u32>,
}

// Totais do conjunto filtrado inteiro (não só da página)
#[derive(Debug, Clone, Default, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTotals {
    pub count: i64,
    #[schema(example = "350.50")]
    pub total_value_sum: Decimal,
    // Dinheiro + PIX + débito
    pub immediate_value_sum: Decimal,
    pub credit_value_sum: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePage {
    pub items: Vec<PurchaseResponse>,
    pub totals: PurchaseTotals,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}
