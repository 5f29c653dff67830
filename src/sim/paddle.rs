//! Paddles: fixed x per side, keyboard-driven y

use glam::Vec2;

use crate::input::PaddleIntent;
use crate::settings::Settings;

/// Which end of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A player's paddle (axis-aligned rectangle, `pos` is its top-left corner)
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity for the current frame
    pub dy: f32,
    /// Distance moved per frame while a key is held
    pub speed: f32,
    /// Gap between the court edge and the outer face
    pub margin: f32,
}

impl Paddle {
    /// Create a paddle vertically centered on its side of the court
    pub fn new(side: Side, court: Vec2, settings: &Settings) -> Self {
        let mut paddle = Self {
            side,
            pos: Vec2::ZERO,
            width: settings.paddle_width,
            height: settings.paddle_height,
            dy: 0.0,
            speed: settings.paddle_speed,
            margin: settings.paddle_margin,
        };
        paddle.pos = Vec2::new(
            paddle.anchor_x(court.x),
            court.y / 2.0 - paddle.height / 2.0,
        );
        paddle
    }

    fn anchor_x(&self, court_width: f32) -> f32 {
        match self.side {
            Side::Left => self.margin,
            Side::Right => court_width - self.margin - self.width,
        }
    }

    /// Pick this frame's velocity from input.
    ///
    /// A held key only moves the paddle if the whole step stays inside
    /// `[0, boundary_height]`; otherwise the paddle stops where it is.
    /// "Up" wins when both keys are held and up is permitted.
    pub fn update_velocity(&mut self, intent: PaddleIntent, boundary_height: f32) {
        self.dy = if intent.up && self.top() - self.speed >= 0.0 {
            -self.speed
        } else if intent.down && self.bottom() + self.speed <= boundary_height {
            self.speed
        } else {
            0.0
        };
    }

    pub fn apply_motion(&mut self) {
        self.pos.y += self.dy;
    }

    /// Re-anchor after the court changed size
    pub fn refit(&mut self, court: Vec2) {
        self.pos.x = self.anchor_x(court.x);
        let max_y = (court.y - self.height).max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Whether `y` lies strictly inside the paddle's vertical span
    #[inline]
    pub fn spans(&self, y: f32) -> bool {
        y > self.top() && y < self.bottom()
    }
}
