//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Per-frame motion constants
//! - Seeded RNG only
//! - Fixed update order (paddles, ball, particles)
//! - Rendering only through the [`crate::render::Surface`] trait

pub mod ball;
pub mod paddle;
pub mod particle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use paddle::{Paddle, Side};
pub use particle::{Particle, ParticleSystem};
pub use state::{GameEvent, Match, Scores};
pub use tick::{FixedStep, frame};
