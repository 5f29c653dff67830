//! Particle Pong - two-player keyboard Pong with particle bursts
//!
//! Core modules:
//! - `sim`: Per-frame simulation (paddles, ball, particles, scores)
//! - `input`: Key-state map and paddle bindings
//! - `render`: Drawing-surface abstraction used by the simulation
//! - `renderer`: WebGPU backend for the drawing surface
//! - `settings`: Data-driven tuning

pub mod input;
pub mod render;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use input::{InputState, KeyBindings};
pub use render::{DrawList, Surface};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Default tuning values (all motion is per simulation frame)
pub mod consts {
    /// Simulation frame length used by the fixed-step driver (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum simulation frames per display callback
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 4.0;
    /// Gap between a court edge and the outer face of its paddle
    pub const PADDLE_MARGIN: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 2.0;
    /// Speed added per point of the leading score on each paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 0.2;
    pub const BALL_MAX_SPEED: f32 = 10.0;
    /// Half-angle of the serve cone around horizontal (22.5 degrees)
    pub const SERVE_CONE: f32 = std::f32::consts::PI / 8.0;

    /// Particle defaults
    pub const BURST_SIZE: usize = 20;
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 5.0;
    /// Each velocity component is drawn from [-spread/2, spread/2)
    pub const PARTICLE_SPREAD: f32 = 4.0;
    pub const PARTICLE_FADE: f32 = 0.02;

    /// Score text
    pub const SCORE_FONT: &str = "48px Arial";
    pub const SCORE_BASELINE: f32 = 50.0;
}

/// Velocity of the given magnitude pointing along `angle` (radians)
#[inline]
pub fn velocity_from_angle(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Direction of a velocity vector in radians, in (-π, π]
#[inline]
pub fn heading(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}
