//! 2D canvas painter (web only)

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCmd, Frame};
use crate::view::{View, clamp_dpr};

/// Owns the canvas and its 2D context
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Backing-store pixels per CSS pixel
    dpr: f64,
    /// Window size in CSS pixels
    pub size: (f64, f64),
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            dpr: 1.0,
            size: (0.0, 0.0),
        })
    }

    /// Match the backing store to the window. Returns true if anything changed.
    pub fn resize(&mut self, w: f64, h: f64, dpr: f64) -> bool {
        let dpr = clamp_dpr(dpr);
        if self.size == (w, h) && self.dpr == dpr {
            return false;
        }
        self.size = (w, h);
        self.dpr = dpr;

        self.canvas.set_width((w * dpr).floor() as u32);
        self.canvas.set_height((h * dpr).floor() as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", w));
        let _ = style.set_property("height", &format!("{}px", h));

        log::info!("Canvas resized to {}x{} (dpr {})", w, h, dpr);
        true
    }

    /// Clear to black, then paint the frame inside the letterbox
    pub fn paint(&self, frame: &Frame, view: &View) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        ctx.set_image_smoothing_enabled(false);
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, self.size.0, self.size.1);

        ctx.save();
        ctx.translate(view.ox as f64, view.oy as f64)?;
        ctx.scale(view.scale as f64, view.scale as f64)?;
        ctx.set_text_baseline("alphabetic");

        for cmd in &frame.cmds {
            match cmd {
                DrawCmd::Rect { x, y, w, h, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
                }
                DrawCmd::Text { text, x, y, style } => {
                    ctx.set_global_alpha(style.alpha as f64);
                    ctx.set_font(&style.font());
                    ctx.set_text_align(style.align.as_str());
                    ctx.set_fill_style_str(style.color);
                    ctx.fill_text(text, *x as f64, *y as f64)?;
                    ctx.set_global_alpha(1.0);
                }
            }
        }

        ctx.restore();
        Ok(())
    }
}
