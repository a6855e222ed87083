// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros de domínio e de infraestrutura. Cada variante de domínio carrega a
// chave de tradução usada na resposta ao cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("Registro não encontrado ({0})")]
    NotFound(&'static str),

    #[error("Violação de unicidade ({0})")]
    UniqueConstraintViolation(&'static str),

    #[error("Registro referenciado por outros dados ({0})")]
    ReferentialIntegrity(&'static str),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Erro de validação de um único campo. `code` também é a chave de tradução.
    pub fn field(field: &'static str, code: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new(code));
        AppError::ValidationError(errors)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UniqueConstraintViolation(_) | AppError::ReferentialIntegrity(_) => {
                StatusCode::CONFLICT
            }
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Traduz o erro para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status_code();
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(message) => store.translate(lang, message),
                            None => store.translate(lang, &e.code),
                        })
                        .collect();
                    details.insert(camel_case(&field), messages);
                }
                ApiError {
                    status,
                    message: store.translate(lang, "validation_failed"),
                    details: Some(details),
                }
            }
            AppError::NotFound(key)
            | AppError::UniqueConstraintViolation(key)
            | AppError::ReferentialIntegrity(key) => ApiError {
                status,
                message: store.translate(lang, key),
                details: None,
            },
            e => {
                // O cliente recebe só a mensagem genérica; o detalhe fica no log.
                tracing::error!("🔥 Erro Interno do Servidor: {}", e);
                ApiError {
                    status,
                    message: store.translate(lang, "internal_error"),
                    details: None,
                }
            }
        }
    }
}

// Os campos do JSON são camelCase; os erros nascem com o nome do campo Rust.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

// Resposta de erro já traduzida, pronta para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn domain_errors_map_to_http_statuses() {
        assert_eq!(AppError::field("name", "required").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("supplier_not_found").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::UniqueConstraintViolation("duplicate_sales_date").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::ReferentialIntegrity("supplier_in_use").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_carry_translated_field_details() {
        let store = I18nStore::new();
        let api = AppError::field("credit_card_id", "credit_card_required")
            .to_api_error(&english(), &store);

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        let messages = &details["creditCardId"];
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], store.translate("en", "credit_card_required"));
    }

    #[test]
    fn field_names_follow_the_json_casing() {
        assert_eq!(camel_case("statement_closing_day"), "statementClosingDay");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let store = I18nStore::new();
        let api = AppError::InternalServerError(anyhow::anyhow!("connection string leaked"))
            .to_api_error(&english(), &store);

        assert!(!api.message.contains("leaked"));
        assert!(api.details.is_none());
    }
}
