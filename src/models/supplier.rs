// src/models/supplier.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    error::AppError,
    serde_utils::empty_string_as_none,
    validation::{optional_text, trimmed, FieldErrors},
};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,

    #[schema(example = "Atacadão Central")]
    pub name: String,

    #[schema(example = "(11) 99999-8888")]
    pub contact: Option<String>,

    pub notes: Option<String>,

    // Inativo some das listas de seleção, mas as compras antigas continuam visíveis
    #[schema(example = true)]
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

// Linha da listagem: o fornecedor e quanto já foi comprado dele
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierListItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub supplier: Supplier,

    #[schema(example = "1250.40")]
    pub total_purchases: Decimal,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplierFilter {
    /// Filtra por situação (ativo/inativo). Ausente lista todos.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub active: Option<bool>,

    /// Busca no nome ou no contato
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(length(max = 100, message = "too_long"))]
    #[schema(example = "Atacadão Central")]
    pub name: String,

    #[validate(length(max = 100, message = "too_long"))]
    #[schema(example = "(11) 99999-8888")]
    pub contact: Option<String>,

    pub notes: Option<String>,

    #[serde(default = "default_active")]
    #[schema(example = true)]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

// Dados já normalizados e validados, prontos para gravar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierDraft {
    pub name: String,
    pub contact: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
}

impl SupplierPayload {
    pub fn into_draft(self) -> Result<SupplierDraft, AppError> {
        let payload = SupplierPayload {
            name: trimmed(self.name),
            contact: optional_text(self.contact),
            notes: optional_text(self.notes),
            active: self.active,
        };

        let mut errors = FieldErrors::from_derive(&payload);
        errors.require_text("name", &payload.name);
        errors.finish()?;

        Ok(SupplierDraft {
            name: payload.name,
            contact: payload.contact,
            notes: payload.notes,
            active: payload.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> SupplierPayload {
        SupplierPayload {
            name: name.to_string(),
            contact: Some("  ".to_string()),
            notes: None,
            active: true,
        }
    }

    #[test]
    fn names_are_trimmed_and_blank_contacts_dropped() {
        let draft = payload("  Padaria Sol  ").into_draft().unwrap();
        assert_eq!(draft.name, "Padaria Sol");
        assert_eq!(draft.contact, None);
        assert!(draft.active);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(payload("   ").into_draft(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn long_name_is_rejected() {
        let long = "x".repeat(101);
        assert!(matches!(payload(&long).into_draft(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn active_defaults_to_true() {
        let p: SupplierPayload = serde_json::from_str(r#"{"name": "Feira"}"#).unwrap();
        assert!(p.active);
    }
}
