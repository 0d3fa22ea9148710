use shared::calendar::WEEKDAY_LABELS;
use shared::{CalendarCell, CalendarChip, CalendarEvent, CalendarGrid, MonthYear};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils::is_today;

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub period: MonthYear,
    pub events: Vec<CalendarEvent>,
    pub on_chip_click: Callback<CalendarChip>,
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    let grid = use_memo((props.period, props.events.clone()), |(period, events)| {
        CalendarGrid::build(*period, events)
    });

    let cells = grid.cells.iter().map(|cell| match cell {
        CalendarCell::Padding => html! {
            <div class="calendar-day empty"></div>
        },
        CalendarCell::Day { day, chips } => html! {
            <div class={classes!("calendar-day", is_today(props.period, *day).then_some("today"))}>
                <div class="day-header">
                    <div class="day-number">{day}</div>
                </div>
                <div class="day-transactions">
                    {for chips.iter().map(|chip| {
                        let chip_class = if chip.is_income() {
                            "transaction-chip positive"
                        } else {
                            "transaction-chip negative"
                        };
                        let onclick = {
                            let on_chip_click = props.on_chip_click.clone();
                            let chip = chip.clone();
                            Callback::from(move |_: MouseEvent| on_chip_click.emit(chip.clone()))
                        };
                        html! {
                            <div class={chip_class}
                                 title={chip.title.clone()}
                                 style={format!("background-color: {};", chip.color)}
                                 {onclick}>
                                {&chip.title}
                            </div>
                        }
                    })}
                </div>
            </div>
        },
    });

    html! {
        <div id="calendar" class="calendar">
            <div class="calendar-weekdays">
                {for WEEKDAY_LABELS.iter().map(|label| html! {
                    <div class="weekday">{*label}</div>
                })}
            </div>
            <div class="calendar-grid">
                {for cells}
            </div>
        </div>
    }
}
