//! Frame batch: collects draw calls as triangles plus text labels
//!
//! Shapes go to the GPU in one draw; text is handed to the host page, which
//! lays it out with the browser's font engine.

use super::shapes;
use super::vertex::Vertex;
use crate::render::{Rgba, Surface};

/// A piece of text requested by the frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Rgba,
    pub font: String,
}

impl TextLabel {
    /// CSS color string for the label
    pub fn css_color(&self) -> String {
        let [r, g, b, a] = self.color;
        format!(
            "rgba({}, {}, {}, {})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }
}

/// [`Surface`] that accumulates one frame for the WebGPU pipeline
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    labels: Vec<TextLabel>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triangles in court pixel coordinates
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }
}

impl Surface for ShapeBatch {
    /// Triangles cannot be partially erased, so any clear starts a new frame
    fn clear(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        self.vertices.extend(shapes::rect(x, y, w, h, color));
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32, color: Rgba) {
        // Invisible
        if r <= 0.0 || color[3] <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::circle(x, y, r, color, shapes::circle_segments(r)));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgba, font: &str) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            x,
            y,
            color,
            font: font.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputState;
    use crate::render::colors;
    use crate::settings::Settings;
    use crate::sim::{Match, frame};

    #[test]
    fn test_frame_tessellates_into_batch() {
        let mut game = Match::new(800.0, 600.0, Settings::default(), 5);
        let mut batch = ShapeBatch::new();
        frame(&mut game, &InputState::new(), &mut batch);

        // Two paddles plus the ball
        let ball_tris = shapes::circle_segments(game.ball.radius) as usize * 3;
        assert_eq!(batch.vertices().len(), 12 + ball_tris);
        assert_eq!(batch.labels().len(), 2);
        assert_eq!(batch.labels()[0].x, 200.0);
        assert_eq!(batch.labels()[1].x, 600.0);
    }

    #[test]
    fn test_transparent_circles_are_skipped() {
        let mut batch = ShapeBatch::new();
        batch.fill_circle(1.0, 1.0, 3.0, colors::faded(colors::WALL_HIT, 0.0));
        assert!(batch.vertices().is_empty());
    }

    #[test]
    fn test_css_color() {
        let label = TextLabel {
            text: "3".into(),
            x: 0.0,
            y: 0.0,
            color: [1.0, 0.5, 0.0, 1.0],
            font: "48px Arial".into(),
        };
        assert_eq!(label.css_color(), "rgba(255, 128, 0, 1)");
    }
}
