//! Wire models exchanged with the dashboard backend.
//!
//! Field names follow the backend's JSON and form contract, which is why most
//! of them are Portuguese.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::{to_canonical, to_display};

pub const INCOME_COLOR: &str = "#28a745";
pub const EXPENSE_COLOR: &str = "#dc3545";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Receita,
    Despesa,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Receita => "receita",
            TransactionKind::Despesa => "despesa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Receita => "Receita",
            TransactionKind::Despesa => "Despesa",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TransactionKind::Receita => INCOME_COLOR,
            TransactionKind::Despesa => EXPENSE_COLOR,
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, TransactionKind::Despesa)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    #[default]
    Mensal,
    Bimestral,
    Trimestral,
    Semestral,
    Anual,
}

impl RecurrenceFrequency {
    pub const ALL: [RecurrenceFrequency; 5] = [
        RecurrenceFrequency::Mensal,
        RecurrenceFrequency::Bimestral,
        RecurrenceFrequency::Trimestral,
        RecurrenceFrequency::Semestral,
        RecurrenceFrequency::Anual,
    ];

    pub fn months(&self) -> u32 {
        match self {
            RecurrenceFrequency::Mensal => 1,
            RecurrenceFrequency::Bimestral => 2,
            RecurrenceFrequency::Trimestral => 3,
            RecurrenceFrequency::Semestral => 6,
            RecurrenceFrequency::Anual => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Mensal => "mensal",
            RecurrenceFrequency::Bimestral => "bimestral",
            RecurrenceFrequency::Trimestral => "trimestral",
            RecurrenceFrequency::Semestral => "semestral",
            RecurrenceFrequency::Anual => "anual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Mensal => "Mensal",
            RecurrenceFrequency::Bimestral => "Bimestral",
            RecurrenceFrequency::Trimestral => "Trimestral",
            RecurrenceFrequency::Semestral => "Semestral",
            RecurrenceFrequency::Anual => "Anual",
        }
    }

    /// Unknown values fall back to monthly, as the backend does.
    pub fn from_wire(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == value)
            .unwrap_or_default()
    }
}

pub const STATUS_PENDING: &str = "Pendente";

/// One row of the transaction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub data: String,
    pub descricao: String,
    #[serde(default)]
    pub categoria: Option<String>,
    pub valor: f64,
    pub tipo: TransactionKind,
    #[serde(default)]
    pub status: String,
}

impl TransactionRow {
    /// Only pending expenses can be marked as paid.
    pub fn is_payable(&self) -> bool {
        self.tipo.is_expense() && self.status == STATUS_PENDING
    }

    pub fn category_label(&self) -> &str {
        self.categoria.as_deref().unwrap_or("Sem categoria")
    }

    pub fn display_value(&self) -> String {
        to_display(self.valor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub categoria: String,
    pub valor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub descricao: String,
    pub valor: f64,
    pub data: String,
    pub tipo: TransactionKind,
}

/// A category the transaction forms can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub tipo: Option<TransactionKind>,
}

/// Payload of `GET /dashboard/dashboard_data`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardData {
    pub total_receitas: f64,
    pub total_despesas: f64,
    pub total_pendencias: f64,
    pub saldo_atual: f64,
    pub transactions: Vec<TransactionRow>,
    pub current_month_year: String,
    pub despesas_por_categoria: Vec<CategoryTotal>,
    pub calendar_events: Vec<CalendarEvent>,
    pub categorias: Vec<Category>,
}

/// Payload of `GET /transactions/get/{id}`; `valor` is in reais.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub id: i64,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub valor: f64,
    #[serde(default)]
    pub tipo: TransactionKind,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub vencimento: Option<String>,
    #[serde(default)]
    pub pago: bool,
    #[serde(default)]
    pub categoria_id: Option<i64>,
    #[serde(default)]
    pub observacoes: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub frequencia: Option<String>,
}

/// The `{ success, message }` envelope every mutating endpoint answers with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLookupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transaction: Option<TransactionDetail>,
}

/// An expense coming due soon, from `GET /alerts/check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueAlert {
    pub id: i64,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub valor: f64,
    #[serde(default)]
    pub vencimento: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsResponse {
    pub alerts: Vec<DueAlert>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("Informe a descrição da transação.")]
    MissingDescription,
    #[error("Informe um valor válido.")]
    MissingValue,
    #[error("Informe a data da transação.")]
    MissingDate,
}

/// What the add and edit forms submit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionForm {
    pub tipo: TransactionKind,
    pub descricao: String,
    /// Whatever the amount field shows; canonicalised on submit.
    pub valor: String,
    pub data: String,
    pub vencimento: String,
    pub categoria_id: Option<i64>,
    pub observacoes: String,
    pub is_recurring: bool,
    pub recurrence_frequency: RecurrenceFrequency,
    pub recurrence_end_date: String,
    pub update_all_future: bool,
}

impl TransactionForm {
    /// Prefill the edit form. The amount is shown in display form.
    pub fn from_detail(detail: &TransactionDetail) -> Self {
        Self {
            tipo: detail.tipo,
            descricao: detail.descricao.clone(),
            valor: to_display(detail.valor),
            data: detail.data.clone().unwrap_or_default(),
            vencimento: detail.vencimento.clone().unwrap_or_default(),
            categoria_id: detail.categoria_id,
            observacoes: detail.observacoes.clone(),
            is_recurring: detail.is_recurring,
            recurrence_frequency: detail
                .frequencia
                .as_deref()
                .map(RecurrenceFrequency::from_wire)
                .unwrap_or_default(),
            recurrence_end_date: String::new(),
            update_all_future: false,
        }
    }

    pub fn canonical_value(&self) -> String {
        to_canonical(&self.valor)
    }

    /// Required fields the backend would otherwise reject.
    pub fn validate(&self) -> Result<(), FormValidationError> {
        if self.descricao.trim().is_empty() {
            return Err(FormValidationError::MissingDescription);
        }
        let value = self.canonical_value();
        if value.is_empty() || value.parse::<f64>().map_or(true, |v| v == 0.0) {
            return Err(FormValidationError::MissingValue);
        }
        if self.data.trim().is_empty() {
            return Err(FormValidationError::MissingDate);
        }
        Ok(())
    }

    /// Form-encoded pairs in the order the backend reads them.
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        let flag = |on: bool| if on { "on" } else { "off" }.to_string();

        let mut pairs = vec![
            ("tipo", self.tipo.as_str().to_string()),
            ("descricao", self.descricao.trim().to_string()),
            ("valor", self.canonical_value()),
            ("data", self.data.clone()),
        ];
        if self.tipo.is_expense() && !self.vencimento.is_empty() {
            pairs.push(("vencimento", self.vencimento.clone()));
        }
        pairs.push((
            "categoria_id",
            self.categoria_id.map(|id| id.to_string()).unwrap_or_default(),
        ));
        pairs.push(("observacoes", self.observacoes.clone()));
        pairs.push(("is_recurring", flag(self.is_recurring)));
        if self.is_recurring {
            pairs.push((
                "recurrence_frequency",
                self.recurrence_frequency.as_str().to_string(),
            ));
            if !self.recurrence_end_date.is_empty() {
                pairs.push(("recurrence_end_date", self.recurrence_end_date.clone()));
            }
        }
        pairs.push(("update_all_future", flag(self.update_all_future)));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair<'a>(pairs: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    fn expense_form(valor: &str) -> TransactionForm {
        TransactionForm {
            tipo: TransactionKind::Despesa,
            descricao: "Aluguel".to_string(),
            valor: valor.to_string(),
            data: "2024-09-05".to_string(),
            vencimento: "2024-09-10".to_string(),
            categoria_id: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_dashboard_data_tolerates_missing_fields() {
        let data: DashboardData = serde_json::from_str(
            r#"{"total_receitas": 5000.0, "current_month_year": "09/2024"}"#,
        )
        .unwrap();
        assert_eq!(data.total_receitas, 5000.0);
        assert_eq!(data.total_despesas, 0.0);
        assert!(data.transactions.is_empty());
        assert!(data.calendar_events.is_empty());
    }

    #[test]
    fn test_dashboard_data_full_payload() {
        let json = r#"{
            "total_receitas": 5000.0,
            "total_despesas": 1234.5,
            "total_pendencias": 200.0,
            "saldo_atual": 3765.5,
            "current_month_year": "09/2024",
            "transactions": [
                {"id": 1, "data": "2024-09-05", "descricao": "Aluguel",
                 "categoria": "Moradia", "valor": 1234.5, "tipo": "despesa",
                 "status": "Pendente"},
                {"id": 2, "data": "2024-09-01", "descricao": "Salário",
                 "categoria": null, "valor": 5000.0, "tipo": "receita",
                 "status": "Pago"}
            ],
            "despesas_por_categoria": [{"categoria": "Moradia", "valor": 1234.5}],
            "calendar_events": [
                {"descricao": "Aluguel", "valor": 1234.5, "data": "2024-09-05", "tipo": "despesa"}
            ]
        }"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();

        assert_eq!(data.transactions.len(), 2);
        assert!(data.transactions[0].is_payable());
        assert!(!data.transactions[1].is_payable());
        assert_eq!(data.transactions[1].category_label(), "Sem categoria");
        assert_eq!(data.transactions[0].display_value(), "R$ 1.234,50");
        assert_eq!(data.despesas_por_categoria[0].categoria, "Moradia");
        assert_eq!(data.calendar_events[0].tipo, TransactionKind::Despesa);
    }

    #[test]
    fn test_paid_expense_is_not_payable() {
        let row = TransactionRow {
            id: 9,
            data: "2024-09-05".to_string(),
            descricao: "Luz".to_string(),
            categoria: None,
            valor: 90.0,
            tipo: TransactionKind::Despesa,
            status: "Pago".to_string(),
        };
        assert!(!row.is_payable());
    }

    #[test]
    fn test_transaction_lookup_response() {
        let json = r#"{"success": true, "transaction": {
            "id": 7, "descricao": "Internet", "valor": 99.9, "tipo": "despesa",
            "data": "2024-09-01", "vencimento": null, "pago": false,
            "categoria_id": 2, "observacoes": "", "is_recurring": true,
            "frequencia": "trimestral"}}"#;
        let response: TransactionLookupResponse = serde_json::from_str(json).unwrap();
        let detail = response.transaction.unwrap();

        let form = TransactionForm::from_detail(&detail);
        assert_eq!(form.valor, "R$ 99,90");
        assert_eq!(form.vencimento, "");
        assert_eq!(form.recurrence_frequency, RecurrenceFrequency::Trimestral);
        assert_eq!(form.recurrence_frequency.months(), 3);
        assert_eq!(form.canonical_value(), "99.90");
    }

    #[test]
    fn test_failed_lookup_has_message() {
        let response: TransactionLookupResponse =
            serde_json::from_str(r#"{"success": false, "message": "Transação não encontrada."}"#)
                .unwrap();
        assert!(!response.success);
        assert!(response.transaction.is_none());
    }

    #[test]
    fn test_action_response_message_fallback() {
        let silent: ActionResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(silent.message_or("Erro ao adicionar transação"), "Erro ao adicionar transação");

        let blank = ActionResponse {
            success: false,
            message: Some(String::new()),
        };
        assert_eq!(blank.message_or("fallback"), "fallback");

        let said = ActionResponse {
            success: true,
            message: Some("Transação adicionada com sucesso!".to_string()),
        };
        assert_eq!(said.message_or("fallback"), "Transação adicionada com sucesso!");
    }

    #[test]
    fn test_alerts_response() {
        let json = r##"{"alerts": [{"id": 4, "tipo": "despesa", "valor": 80.0,
            "data": "2024-09-01", "descricao": "Água", "categoria": "Casa",
            "categoria_id": 1, "pago": false, "vencimento": "2024-09-12",
            "cor": "#3498db", "icone": "fa-tag"}], "count": 1}"##;
        let response: AlertsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.alerts[0].vencimento.as_deref(), Some("2024-09-12"));
    }

    #[test]
    fn test_form_pairs_carry_canonical_value() {
        for shown in ["R$ 1.234,56", "1234,56", "1.234,56", "1234.56"] {
            let pairs = expense_form(shown).to_form_pairs();
            assert_eq!(pair(&pairs, "valor"), Some("1234.56"));
        }
    }

    #[test]
    fn test_form_pairs_for_expense() {
        let mut form = expense_form("R$ 50,00");
        form.is_recurring = true;
        form.recurrence_frequency = RecurrenceFrequency::Anual;
        let pairs = form.to_form_pairs();

        assert_eq!(pair(&pairs, "tipo"), Some("despesa"));
        assert_eq!(pair(&pairs, "vencimento"), Some("2024-09-10"));
        assert_eq!(pair(&pairs, "categoria_id"), Some("3"));
        assert_eq!(pair(&pairs, "is_recurring"), Some("on"));
        assert_eq!(pair(&pairs, "recurrence_frequency"), Some("anual"));
        assert_eq!(pair(&pairs, "recurrence_end_date"), None);
        assert_eq!(pair(&pairs, "update_all_future"), Some("off"));
    }

    #[test]
    fn test_form_pairs_for_income_skip_due_date() {
        let mut form = expense_form("10");
        form.tipo = TransactionKind::Receita;
        form.categoria_id = None;
        let pairs = form.to_form_pairs();

        assert_eq!(pair(&pairs, "vencimento"), None);
        assert_eq!(pair(&pairs, "categoria_id"), Some(""));
        assert_eq!(pair(&pairs, "is_recurring"), Some("off"));
        assert_eq!(pair(&pairs, "recurrence_frequency"), None);
    }

    #[test]
    fn test_validation() {
        assert_eq!(expense_form("R$ 10,00").validate(), Ok(()));
        assert_eq!(
            expense_form("").validate(),
            Err(FormValidationError::MissingValue)
        );
        assert_eq!(
            expense_form("R$ 0,00").validate(),
            Err(FormValidationError::MissingValue)
        );

        let mut untitled = expense_form("10");
        untitled.descricao = "   ".to_string();
        assert_eq!(untitled.validate(), Err(FormValidationError::MissingDescription));

        let mut undated = expense_form("10");
        undated.data.clear();
        assert_eq!(undated.validate(), Err(FormValidationError::MissingDate));
    }

    #[test]
    fn test_frequency_wire_values() {
        assert_eq!(RecurrenceFrequency::from_wire("semestral").months(), 6);
        assert_eq!(RecurrenceFrequency::from_wire("quinzenal"), RecurrenceFrequency::Mensal);
        let json = serde_json::to_string(&RecurrenceFrequency::Bimestral).unwrap();
        assert_eq!(json, r#""bimestral""#);
    }
}
