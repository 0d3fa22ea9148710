use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::prelude::*;
use shared::{to_display, CategoryTotal, WidgetSlot};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::chart_handle::{chart_error, hex_color, CanvasArea, ChartHandle};

const PALETTE: [&str; 8] = [
    "#dc3545", "#fd7e14", "#ffc107", "#20c997", "#0d6efd", "#6f42c1", "#d63384", "#6c757d",
];

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub totals: Vec<CategoryTotal>,
}

/// Pie chart of the month's expenses by category.
pub struct CategoryChart {
    canvas_ref: NodeRef,
    chart: WidgetSlot<ChartHandle>,
}

impl Component for CategoryChart {
    type Message = ();
    type Properties = CategoryChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
            chart: WidgetSlot::new("category-chart"),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props() != old_props
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let slices = pie_slices(&ctx.props().totals);

        let chart = self
            .chart
            .replace(|| ChartHandle::draw(canvas, |root| draw_pie(root, &slices)));
        if let Some(error) = chart.error() {
            gloo::console::error!("Failed to draw category chart:", error.to_string());
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="chart-container">
                <h3 class="chart-title">{"Despesas por categoria"}</h3>
                <canvas
                    id="pieChart"
                    ref={self.canvas_ref.clone()}
                    width="480"
                    height="320"
                ></canvas>
            </div>
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Radians, clockwise from twelve o'clock.
    pub start: f64,
    pub sweep: f64,
    pub color: &'static str,
}

impl PieSlice {
    pub fn legend(&self) -> String {
        format!("{}: {}", self.label, to_display(self.value))
    }
}

/// Split the circle between the positive totals; empty when nothing was spent.
pub fn pie_slices(totals: &[CategoryTotal]) -> Vec<PieSlice> {
    let positive: Vec<&CategoryTotal> = totals
        .iter()
        .filter(|total| total.valor.is_finite() && total.valor > 0.0)
        .collect();
    let sum: f64 = positive.iter().map(|total| total.valor).sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    positive
        .into_iter()
        .enumerate()
        .map(|(i, total)| {
            let sweep = total.valor / sum * TAU;
            let slice = PieSlice {
                label: total.categoria.clone(),
                value: total.valor,
                start,
                sweep,
                color: PALETTE[i % PALETTE.len()],
            };
            start += sweep;
            slice
        })
        .collect()
}

/// Outline of one slice as pixel points, centre first.
fn slice_points(center: (i32, i32), radius: f64, slice: &PieSlice) -> Vec<(i32, i32)> {
    let steps = ((slice.sweep / TAU) * 96.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = slice.start + slice.sweep * step as f64 / steps as f64 - FRAC_PI_2;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}

fn draw_pie(root: &CanvasArea, slices: &[PieSlice]) -> Result<(), String> {
    root.fill(&WHITE).map_err(chart_error)?;
    let (width, height) = root.dim_in_pixel();

    if slices.is_empty() {
        root.draw(&Text::new(
            "Sem despesas no período",
            (20, height as i32 / 2),
            ("sans-serif", 16).into_font().color(&RGBColor(108, 117, 125)),
        ))
        .map_err(chart_error)?;
        return root.present().map_err(chart_error);
    }

    let radius = (height.min(width / 2) as f64 / 2.0 - 12.0).max(10.0);
    let center = (radius as i32 + 12, height as i32 / 2);

    for slice in slices {
        root.draw(&Polygon::new(
            slice_points(center, radius, slice),
            hex_color(slice.color).filled(),
        ))
        .map_err(chart_error)?;
    }

    let legend_x = center.0 + radius as i32 + 24;
    for (row, slice) in slices.iter().enumerate() {
        let y = 16 + row as i32 * 22;
        root.draw(&Rectangle::new(
            [(legend_x, y), (legend_x + 12, y + 12)],
            hex_color(slice.color).filled(),
        ))
        .map_err(chart_error)?;
        root.draw(&Text::new(
            slice.legend(),
            (legend_x + 18, y),
            ("sans-serif", 13).into_font(),
        ))
        .map_err(chart_error)?;
    }

    root.present().map_err(chart_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(categoria: &str, valor: f64) -> CategoryTotal {
        CategoryTotal {
            categoria: categoria.to_string(),
            valor,
        }
    }

    #[test]
    fn test_slices_cover_the_circle() {
        let slices = pie_slices(&[total("Moradia", 1500.0), total("Lazer", 500.0)]);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].sweep - TAU * 0.75).abs() < 1e-9);
        assert!((slices[1].start - slices[0].sweep).abs() < 1e-9);
        let covered: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((covered - TAU).abs() < 1e-9);
        assert_eq!(slices[0].legend(), "Moradia: R$ 1.500,00");
    }

    #[test]
    fn test_non_positive_totals_are_skipped() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&[total("Nada", 0.0)]).is_empty());
        let slices = pie_slices(&[total("Estorno", -20.0), total("Mercado", 80.0)]);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "Mercado");
    }

    #[test]
    fn test_slice_points_start_at_twelve_o_clock() {
        let slice = PieSlice {
            label: "Tudo".to_string(),
            value: 1.0,
            start: 0.0,
            sweep: TAU / 4.0,
            color: PALETTE[0],
        };
        let points = slice_points((100, 100), 50.0, &slice);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (100, 50));
        assert_eq!(*points.last().unwrap(), (150, 100));
    }
}
