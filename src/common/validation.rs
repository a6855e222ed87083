// src/common/validation.rs

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::{error::AppError, money};

// Acumula erros de campo: os do `#[derive(Validate)]` mais as regras de domínio.
pub(crate) struct FieldErrors(ValidationErrors);

impl Default for FieldErrors {
    fn default() -> Self {
        FieldErrors(ValidationErrors::new())
    }
}

impl FieldErrors {
    /// Começa pelos erros declarativos do payload.
    pub fn from_derive(payload: &impl Validate) -> Self {
        FieldErrors(payload.validate().err().unwrap_or_else(ValidationErrors::new))
    }

    pub fn add(&mut self, field: &'static str, code: &'static str) {
        let mut error = ValidationError::new(code);
        error.message = Some(code.into());
        self.0.add(field, error);
    }

    pub fn require_text(&mut self, field: &'static str, value: &str) {
        if value.is_empty() {
            self.add(field, "required");
        }
    }

    /// Valida e arredonda um valor monetário; em caso de erro devolve zero.
    pub fn amount(
        &mut self,
        field: &'static str,
        value: Decimal,
        check: fn(Decimal) -> Result<Decimal, &'static str>,
    ) -> Decimal {
        match check(value) {
            Ok(cents) => cents,
            Err(code) => {
                self.add(field, code);
                Decimal::ZERO
            }
        }
    }

    pub fn non_negative(&mut self, field: &'static str, value: Decimal) -> Decimal {
        self.amount(field, value, money::non_negative)
    }

    pub fn positive(&mut self, field: &'static str, value: Decimal) -> Decimal {
        self.amount(field, value, money::positive)
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.0))
        }
    }
}

/// Remove espaços nas pontas.
pub(crate) fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// Texto opcional: em branco vira `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.map(trimmed).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_text_is_dropped() {
        assert_eq!(optional_text(Some("   ".into())), None);
        assert_eq!(optional_text(Some(" Rua A ".into())), Some("Rua A".into()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn errors_accumulate_per_field() {
        #[derive(Validate)]
        struct Sample {
            #[validate(length(max = 3, message = "too_long"))]
            code: String,
        }

        let ok = Sample { code: "abc".into() };
        assert!(FieldErrors::from_derive(&ok).finish().is_ok());

        let mut errors = FieldErrors::from_derive(&ok);

        errors.require_text("name", "");
        let value = errors.positive("total_value", "-1".parse().unwrap());
        assert_eq!(value, Decimal::ZERO);

        match errors.finish() {
            Err(AppError::ValidationError(e)) => {
                let fields = e.field_errors();
                assert!(fields.contains_key("name"));
                assert!(fields.contains_key("total_value"));
            }
            other => panic!("esperava erro de validação, veio {other:?}"),
        }
    }
}
