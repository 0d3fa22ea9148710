use shared::{format_date_br, to_display, DueAlert};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DueAlertsProps {
    pub alerts: Vec<DueAlert>,
    pub on_dismiss: Callback<i64>,
}

/// One line per expense that is due or overdue.
pub fn alert_line(alert: &DueAlert) -> String {
    let due = alert
        .vencimento
        .as_deref()
        .map(format_date_br)
        .unwrap_or_else(|| "sem data".to_string());
    format!("{} - {} (vence em {})", alert.descricao, to_display(alert.valor), due)
}

#[function_component(DueAlerts)]
pub fn due_alerts(props: &DueAlertsProps) -> Html {
    if props.alerts.is_empty() {
        return html! {};
    }

    html! {
        <section class="due-alerts" id="due-alerts">
            <h3>{"Contas a vencer"}</h3>
            <ul>
                {for props.alerts.iter().map(|alert| {
                    let on_dismiss = {
                        let on_dismiss = props.on_dismiss.clone();
                        let id = alert.id;
                        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
                    };
                    html! {
                        <li class="due-alert" key={alert.id}>
                            <span class="due-alert-text">{alert_line(alert)}</span>
                            if let Some(categoria) = &alert.categoria {
                                <span class="due-alert-category">{categoria}</span>
                            }
                            <button type="button" class="btn btn-link" onclick={on_dismiss}>
                                {"Dispensar"}
                            </button>
                        </li>
                    }
                })}
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_line() {
        let alert = DueAlert {
            id: 7,
            descricao: "Conta de luz".to_string(),
            valor: 189.9,
            vencimento: Some("2025-03-10".to_string()),
            categoria: None,
        };
        assert_eq!(alert_line(&alert), "Conta de luz - R$ 189,90 (vence em 10/03/2025)");

        let undated = DueAlert {
            vencimento: None,
            ..alert
        };
        assert!(alert_line(&undated).ends_with("(vence em sem data)"));
    }
}
