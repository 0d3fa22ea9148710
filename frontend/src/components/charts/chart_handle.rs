use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::Widget;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub type CanvasArea = DrawingArea<CanvasBackend, Shift>;

/// A chart drawn onto a canvas. Destroying it wipes the canvas so the next
/// chart starts from a blank surface.
pub struct ChartHandle {
    canvas: HtmlCanvasElement,
    error: Option<String>,
}

impl ChartHandle {
    pub fn draw<F>(canvas: HtmlCanvasElement, draw: F) -> Self
    where
        F: FnOnce(&CanvasArea) -> Result<(), String>,
    {
        let error = match CanvasBackend::with_canvas_object(canvas.clone()) {
            Some(backend) => draw(&backend.into_drawing_area()).err(),
            None => Some("canvas has no 2d context".to_string()),
        };
        Self { canvas, error }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Widget for ChartHandle {
    fn destroy(&mut self) {
        let context = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok());
        if let Some(context) = context {
            context.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }
    }
}

/// `#rrggbb` to a plotters colour; anything else is mid grey.
pub fn hex_color(hex: &str) -> RGBColor {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    match (hex.len(), hex.starts_with('#')) {
        (7, true) => match (channel(1..3), channel(3..5), channel(5..7)) {
            (Some(r), Some(g), Some(b)) => RGBColor(r, g, b),
            _ => RGBColor(128, 128, 128),
        },
        _ => RGBColor(128, 128, 128),
    }
}

pub fn chart_error<E: std::fmt::Debug>(error: E) -> String {
    format!("{:?}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#28a745"), RGBColor(0x28, 0xa7, 0x45));
        assert_eq!(hex_color("#dc3545"), RGBColor(0xdc, 0x35, 0x45));
        assert_eq!(hex_color("28a745"), RGBColor(128, 128, 128));
        assert_eq!(hex_color("#zzzzzz"), RGBColor(128, 128, 128));
    }
}
