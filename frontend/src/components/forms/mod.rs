pub mod currency_input;
pub mod edit_transaction_modal;
pub mod transaction_fields;
pub mod transaction_form;

use shared::{ApiError, RecurrenceFrequency, TransactionForm, TransactionKind};
use web_sys::{FormData, HtmlFormElement};

pub use currency_input::CurrencyInput;
pub use edit_transaction_modal::EditTransactionModal;
pub use transaction_fields::TransactionFields;
pub use transaction_form::NewTransactionForm;

const NETWORK_ERROR_MESSAGE: &str = "Erro ao processar a solicitação";

/// Build a form from named field values. Missing fields read as empty and
/// checkboxes count as ticked only when they submitted "on".
pub fn transaction_form_from_fields(field: impl Fn(&str) -> Option<String>) -> TransactionForm {
    let text = |name: &str| field(name).unwrap_or_default();
    let checked = |name: &str| field(name).is_some_and(|value| value == "on");

    TransactionForm {
        tipo: match text("tipo").as_str() {
            "despesa" => TransactionKind::Despesa,
            _ => TransactionKind::Receita,
        },
        descricao: text("descricao"),
        valor: text("valor"),
        data: text("data"),
        vencimento: text("vencimento"),
        categoria_id: field("categoria_id").and_then(|id| id.trim().parse().ok()),
        observacoes: text("observacoes"),
        is_recurring: checked("is_recurring"),
        recurrence_frequency: RecurrenceFrequency::from_wire(&text("recurrence_frequency")),
        recurrence_end_date: text("recurrence_end_date"),
        update_all_future: checked("update_all_future"),
    }
}

/// Read the submitted form element's fields.
pub fn read_transaction_form(form: &HtmlFormElement) -> Option<TransactionForm> {
    let form_data = FormData::new_with_form(form).ok()?;
    Some(transaction_form_from_fields(|name| {
        form_data.get(name).as_string()
    }))
}

/// The text shown after a failed add or edit.
pub fn failure_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Network(_) | ApiError::Decode(_) => NETWORK_ERROR_MESSAGE.to_string(),
        other => other.user_message(fallback),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_form_from_submitted_fields() {
        let submitted = fields(&[
            ("tipo", "despesa"),
            ("descricao", "Aluguel"),
            ("valor", "R$ 1.500,00"),
            ("data", "2025-03-05"),
            ("vencimento", "2025-03-10"),
            ("categoria_id", "3"),
            ("observacoes", ""),
            ("is_recurring", "on"),
            ("recurrence_frequency", "trimestral"),
        ]);
        let form = transaction_form_from_fields(|name| submitted.get(name).cloned());

        assert_eq!(form.tipo, TransactionKind::Despesa);
        assert_eq!(form.descricao, "Aluguel");
        assert_eq!(form.canonical_value(), "1500.00");
        assert_eq!(form.vencimento, "2025-03-10");
        assert_eq!(form.categoria_id, Some(3));
        assert!(form.is_recurring);
        assert_eq!(form.recurrence_frequency, RecurrenceFrequency::Trimestral);
        assert!(!form.update_all_future);
    }

    #[test]
    fn test_missing_and_blank_fields() {
        let submitted = fields(&[("categoria_id", ""), ("descricao", "Salário")]);
        let form = transaction_form_from_fields(|name| submitted.get(name).cloned());

        assert_eq!(form.tipo, TransactionKind::Receita);
        assert_eq!(form.categoria_id, None);
        assert_eq!(form.valor, "");
        assert!(!form.is_recurring);
    }

    #[test]
    fn test_failure_message() {
        let rejected = ApiError::Rejected("Categoria inválida".to_string());
        assert_eq!(
            failure_message(&rejected, "Erro ao adicionar transação"),
            "Categoria inválida"
        );

        let status = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(
            failure_message(&status, "Erro ao editar transação"),
            "Erro ao editar transação"
        );

        let network = ApiError::Network("offline".to_string());
        assert_eq!(
            failure_message(&network, "Erro ao adicionar transação"),
            "Erro ao processar a solicitação"
        );
    }
}
