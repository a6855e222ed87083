// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    // Erros gerais
    ("validation_failed", "One or more fields are invalid."),
    ("internal_error", "An unexpected error occurred."),
    // Não encontrados
    ("supplier_not_found", "Supplier not found."),
    ("credit_card_not_found", "Credit card not found."),
    ("daily_sales_not_found", "Daily sales entry not found."),
    ("purchase_not_found", "Purchase not found."),
    ("installment_not_found", "Installment not found."),
    // Conflitos
    (
        "duplicate_sales_date",
        "There is already a sales entry for this date. Edit the existing entry instead.",
    ),
    (
        "supplier_in_use",
        "This supplier is referenced by purchases and cannot be deleted. Deactivate it instead.",
    ),
    (
        "credit_card_in_use",
        "This credit card is referenced by purchases and cannot be deleted. Deactivate it instead.",
    ),
    // Códigos de validação por campo
    ("required", "This field is required."),
    ("too_long", "This field is too long."),
    ("must_be_positive", "Value must be greater than zero."),
    ("must_not_be_negative", "Value cannot be negative."),
    ("value_too_large", "Value exceeds the maximum of 99,999,999.99."),
    ("credit_card_required", "A credit card is required for credit payments."),
    ("invalid_installment_count", "Installments must be between 1 and 12."),
    ("invalid_closing_day", "The statement closing day must be between 1 and 31."),
    ("unknown_supplier", "The selected supplier does not exist."),
    ("unknown_credit_card", "The selected credit card does not exist."),
    ("not_a_credit_purchase", "Only credit purchases have an installment schedule."),
    ("installments_already_paid", "Some installments are already paid; the schedule cannot change."),
];

const PT: &[(&str, &str)] = &[
    ("validation_failed", "Um ou mais campos são inválidos."),
    ("internal_error", "Ocorreu um erro inesperado."),
    ("supplier_not_found", "Fornecedor não encontrado."),
    ("credit_card_not_found", "Cartão de crédito não encontrado."),
    ("daily_sales_not_found", "Lançamento não encontrado."),
    ("purchase_not_found", "Compra não encontrada."),
    ("installment_not_found", "Parcela não encontrada."),
    (
        "duplicate_sales_date",
        "Já existe um lançamento para esta data. Edite o lançamento existente.",
    ),
    (
        "supplier_in_use",
        "Este fornecedor possui compras e não pode ser excluído. Desative-o.",
    ),
    (
        "credit_card_in_use",
        "Este cartão possui compras e não pode ser excluído. Desative-o.",
    ),
    ("required", "Campo obrigatório."),
    ("too_long", "Texto acima do tamanho permitido."),
    ("must_be_positive", "O valor deve ser maior que zero."),
    ("must_not_be_negative", "O valor não pode ser negativo."),
    ("value_too_large", "O valor excede o máximo de 99.999.999,99."),
    ("credit_card_required", "Cartão de crédito é obrigatório para pagamento no crédito."),
    ("invalid_installment_count", "O número de parcelas deve estar entre 1 e 12."),
    ("invalid_closing_day", "O dia de vencimento da fatura deve estar entre 1 e 31."),
    ("unknown_supplier", "O fornecedor selecionado não existe."),
    ("unknown_credit_card", "O cartão selecionado não existe."),
    ("not_a_credit_purchase", "Apenas compras no crédito possuem parcelas."),
    ("installments_already_paid", "Há parcelas pagas; o parcelamento não pode ser alterado."),
];

/// Mensagens de erro por idioma, indexadas pela chave de tradução.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("en", EN.iter().copied().collect());
        messages.insert("pt", PT.iter().copied().collect());
        Self { messages }
    }

    /// Idioma desconhecido cai no inglês; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .map(|message| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
