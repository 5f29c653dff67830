//! Drawing-surface abstraction
//!
//! The simulation issues draw calls against a [`Surface`] in court pixel
//! coordinates (origin top-left, y down). Backends decide how to rasterize.

/// Linear RGBA color
pub type Rgba = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const PADDLE: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const SCORE: Rgba = [1.0, 1.0, 1.0, 1.0];
    /// Burst on top/bottom wall bounce
    pub const WALL_HIT: Rgba = [0.0, 0.0, 1.0, 1.0];
    /// Burst on left paddle hit
    pub const LEFT_HIT: Rgba = [0.0, 0.5, 0.0, 1.0];
    /// Burst on right paddle hit
    pub const RIGHT_HIT: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: Rgba = [0.0, 0.0, 0.0, 1.0];

    /// Same color with its alpha scaled by `alpha` (clamped to [0, 1])
    pub fn faded(color: Rgba, alpha: f32) -> Rgba {
        [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Erase a rectangle
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Rgba);
    /// Draw text with its baseline-left corner at (x, y)
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba, font: &str);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { x: f32, y: f32, w: f32, h: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32, color: Rgba },
    Circle { x: f32, y: f32, r: f32, color: Rgba },
    Text { text: String, x: f32, y: f32, color: Rgba, font: String },
}

/// Surface that records every call, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.commands.push(DrawCommand::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { x, y, r, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba, font: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color,
            font: font.to_string(),
        });
    }
}
