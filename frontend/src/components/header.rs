use shared::calendar::month_name;
use shared::MonthYear;
use web_sys::{HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::services::date_utils::selectable_years;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub period: MonthYear,
    /// `MM/YYYY` as shown next to the arrows.
    pub period_label: String,
    pub on_prev: Callback<MouseEvent>,
    pub on_next: Callback<MouseEvent>,
    pub on_select: Callback<MonthYear>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let month_ref = use_node_ref();
    let year_ref = use_node_ref();

    let on_filter_submit = {
        let month_ref = month_ref.clone();
        let year_ref = year_ref.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            e.stop_propagation();
            let selected = |node: &NodeRef| {
                node.cast::<HtmlSelectElement>()
                    .and_then(|select| select.value().parse::<i64>().ok())
            };
            let target = match (selected(&month_ref), selected(&year_ref)) {
                (Some(month), Some(year)) => MonthYear::new(month as u32, year as i32),
                _ => None,
            };
            if let Some(target) = target {
                on_select.emit(target);
            }
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Dashboard Financeiro"}</h1>
                <div class="month-navigation">
                    <button id="prevMonth" class="calendar-nav-btn" onclick={props.on_prev.clone()}>{"‹"}</button>
                    <h2 id="current-month-year" class="calendar-title" title={props.period.to_string()}>
                        {&props.period_label}
                    </h2>
                    <button id="nextMonth" class="calendar-nav-btn" onclick={props.on_next.clone()}>{"›"}</button>
                </div>
                <form class="month-filter" onsubmit={on_filter_submit}>
                    <select id="mes" ref={month_ref}>
                        {for (1..=12u32).map(|month| html! {
                            <option value={month.to_string()} selected={month == props.period.month}>
                                {month_name(month)}
                            </option>
                        })}
                    </select>
                    <select id="ano" ref={year_ref}>
                        {for selectable_years(props.period.year).into_iter().map(|year| html! {
                            <option value={year.to_string()} selected={year == props.period.year}>
                                {year}
                            </option>
                        })}
                    </select>
                    <button type="submit" class="btn btn-secondary">{"Filtrar"}</button>
                </form>
            </div>
        </header>
    }
}
