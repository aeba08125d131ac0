//! Canvas rendering module
//!
//! Rendering is split in two: `scene` turns a `GameState` into a flat list
//! of draw commands in logical game coordinates, and `canvas` (web only)
//! paints that list with the 2D context. Building the list is pure, so the
//! layout is testable without a browser.

pub mod scene;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::build_frame;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in logical pixels
    pub size: f32,
    /// CSS font weight (700 bold, 900 black)
    pub weight: u16,
    pub align: Align,
    pub color: &'static str,
    pub alpha: f32,
}

impl TextStyle {
    pub const fn new(size: f32, weight: u16, align: Align) -> Self {
        Self {
            size,
            weight,
            align,
            color: "#FFFFFF",
            alpha: 0.95,
        }
    }

    pub const fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// CSS font shorthand
    pub fn font(&self) -> String {
        format!("{} {}px system-ui, Arial", self.weight, self.size)
    }
}

/// One thing to paint
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled rectangle (CSS colour)
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: &'static str,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

/// Draw list for one frame, in logical coordinates
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub gw: f32,
    pub gh: f32,
    pub cmds: Vec<DrawCmd>,
}

impl Frame {
    pub fn new(gw: f32, gh: f32) -> Self {
        Self {
            gw,
            gh,
            cmds: Vec::with_capacity(256),
        }
    }

    /// Pixel-art rectangle; corners snap to whole pixels
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &'static str) {
        self.cmds.push(DrawCmd::Rect {
            x: x.round(),
            y: y.round(),
            w: w.round(),
            h: h.round(),
            color,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, style: TextStyle) {
        self.cmds.push(DrawCmd::Text {
            text: text.into(),
            x,
            y,
            style,
        });
    }

    /// Horizontally centred text
    pub fn centered(&mut self, text: impl Into<String>, y: f32, size: f32, alpha: f32) {
        let x = self.gw / 2.0;
        self.text(text, x, y, TextStyle::new(size, 700, Align::Center).alpha(alpha));
    }

    /// All text drawn this frame, in order (handy for layout checks)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            DrawCmd::Rect { .. } => None,
        })
    }

    pub fn rect_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Rect { .. }))
            .count()
    }
}
