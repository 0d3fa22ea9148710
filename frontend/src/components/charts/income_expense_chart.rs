use plotters::prelude::*;
use shared::models::{EXPENSE_COLOR, INCOME_COLOR};
use shared::{to_display, WidgetSlot};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::chart_handle::{chart_error, hex_color, CanvasArea, ChartHandle};

const BAR_LABELS: [&str; 2] = ["Receitas", "Despesas"];

#[derive(Properties, PartialEq)]
pub struct IncomeExpenseChartProps {
    pub receitas: f64,
    pub despesas: f64,
}

/// Bar chart of the month's income against its expenses.
pub struct IncomeExpenseChart {
    canvas_ref: NodeRef,
    chart: WidgetSlot<ChartHandle>,
}

impl Component for IncomeExpenseChart {
    type Message = ();
    type Properties = IncomeExpenseChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
            chart: WidgetSlot::new("income-expense-chart"),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props() != old_props
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let props = ctx.props();
        let (receitas, despesas) = (props.receitas, props.despesas);

        let chart = self
            .chart
            .replace(|| ChartHandle::draw(canvas, |root| draw_bars(root, receitas, despesas)));
        if let Some(error) = chart.error() {
            gloo::console::error!("Failed to draw income/expense chart:", error.to_string());
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="chart-container">
                <h3 class="chart-title">{"Receitas x Despesas"}</h3>
                <canvas
                    id="barChart"
                    ref={self.canvas_ref.clone()}
                    width="480"
                    height="320"
                ></canvas>
            </div>
        }
    }
}

/// Top of the value axis: a tenth of headroom, never below one real.
pub fn value_axis_max(receitas: f64, despesas: f64) -> f64 {
    let highest = receitas.max(despesas).max(0.0);
    (highest * 1.1).max(1.0)
}

fn segment_label(value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::Exact(index) | SegmentValue::CenterOf(index) => BAR_LABELS
            .get(*index as usize)
            .map(|label| label.to_string())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

fn draw_bars(root: &CanvasArea, receitas: f64, despesas: f64) -> Result<(), String> {
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(100)
        .build_cartesian_2d(
            (0u32..2u32).into_segmented(),
            0f64..value_axis_max(receitas, despesas),
        )
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_label_formatter(&|v| to_display(*v))
        .x_label_formatter(&segment_label)
        .label_style(("sans-serif", 12))
        .bold_line_style(&RGBColor(235, 235, 235))
        .light_line_style(&RGBColor(248, 248, 248))
        .y_labels(6)
        .draw()
        .map_err(chart_error)?;

    let bars = [(0u32, receitas, INCOME_COLOR), (1u32, despesas, EXPENSE_COLOR)];
    for (index, value, color) in bars {
        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(hex_color(color).filled())
                    .margin(40)
                    .data(std::iter::once((index, value.max(0.0)))),
            )
            .map_err(chart_error)?;
    }

    root.present().map_err(chart_error)
}
