use shared::{to_display, DashboardData};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub data: Option<DashboardData>,
    pub loading: bool,
}

/// Label, element id and value of each card, in display order.
pub fn summary_entries(data: &DashboardData) -> [(&'static str, &'static str, f64); 4] {
    [
        ("Receitas", "total-receitas", data.total_receitas),
        ("Despesas", "total-despesas", data.total_despesas),
        ("Pendências", "total-pendencias", data.total_pendencias),
        ("Saldo", "saldo-atual", data.saldo_atual),
    ]
}

#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let empty = DashboardData::default();
    let data = props.data.as_ref().unwrap_or(&empty);

    html! {
        <section class="summary-cards">
            {for summary_entries(data).into_iter().map(|(label, id, value)| {
                let class = if value < 0.0 { "summary-card negative" } else { "summary-card" };
                html! {
                    <div class={class}>
                        <span class="summary-label">{label}</span>
                        <span {id} class="summary-value currency-value">
                            {if props.loading && props.data.is_none() {
                                "…".to_string()
                            } else {
                                to_display(value)
                            }}
                        </span>
                    </div>
                }
            })}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_entries_order() {
        let data = DashboardData {
            total_receitas: 5000.0,
            total_despesas: 1234.5,
            total_pendencias: 200.0,
            saldo_atual: 3765.5,
            ..Default::default()
        };
        let entries = summary_entries(&data);
        assert_eq!(entries[0], ("Receitas", "total-receitas", 5000.0));
        assert_eq!(entries[3].2, 3765.5);
        assert_eq!(to_display(entries[1].2), "R$ 1.234,50");
    }
}
