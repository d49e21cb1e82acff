//! Browser text measurement through an off-screen 2D canvas.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::TextMeasurer;
use crate::error::{Error, Result};

const FONT_FAMILY: &str = "'Microsoft JhengHei', 'Segoe UI', sans-serif";

/// Owns a detached `<canvas>` for the lifetime of the measurer.
pub struct CanvasMeasurer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasMeasurer {
    pub fn new() -> Result<Self> {
        let unavailable = |what: &str| Error::MeasurementUnavailable(what.to_string());

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| unavailable("no document"))?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|_| unavailable("cannot create canvas"))?
            .dyn_into()
            .map_err(|_| unavailable("element is not a canvas"))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| unavailable("getContext failed"))?
            .ok_or_else(|| unavailable("2d context unsupported"))?
            .dyn_into()
            .map_err(|_| unavailable("context is not 2d"))?;
        Ok(Self { ctx })
    }
}

impl TextMeasurer for CanvasMeasurer {
    fn measure(&self, text: &str, font_px: f64) -> Result<f64> {
        self.ctx.set_font(&format!("bold {font_px}px {FONT_FAMILY}"));
        let metrics = self
            .ctx
            .measure_text(text)
            .map_err(|e| Error::MeasurementUnavailable(format!("measureText failed: {e:?}")))?;
        Ok(metrics.width())
    }
}
