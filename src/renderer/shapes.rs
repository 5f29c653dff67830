//! Shape generation for 2D primitives

use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::render::Rgba;

/// Segment count that keeps circle edges smooth at the given radius
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 2.0) as u32).clamp(8, 48)
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: Rgba) -> [Vertex; 6] {
    let (x2, y2) = (x + w, y + h);
    [
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(cx: f32, cy: f32, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(cx, cy, color));
        vertices.push(Vertex::new(
            cx + radius * theta1.cos(),
            cy + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            cx + radius * theta2.cos(),
            cy + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(10.0, 20.0, 5.0, 8.0, [1.0; 4]);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 15.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 28.0);
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let v = circle(0.0, 0.0, 10.0, [1.0; 4], 16);
        assert_eq!(v.len(), 48);
        for vert in &v {
            let [x, y] = vert.position;
            assert!((x * x + y * y).sqrt() <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn test_segment_count_bounds() {
        assert_eq!(circle_segments(2.0), 8);
        assert_eq!(circle_segments(10.0), 20);
        assert_eq!(circle_segments(500.0), 48);
    }
}
