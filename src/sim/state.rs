//! Match state and core simulation types
//!
//! Everything the frame loop touches lives in one [`Match`] value owned by
//! the driver; there is no ambient global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::paddle::{Paddle, Side};
use super::particle::ParticleSystem;
use crate::settings::Settings;

/// Points per side; only ever incremented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub left: u32,
    pub right: u32,
}

impl Scores {
    /// Award one point to `side`
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// The higher of the two scores (drives ball speed escalation)
    pub fn leading(&self) -> u32 {
        self.left.max(self.right)
    }
}

/// Something that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball reflected off the top or bottom wall
    WallBounce { pos: Vec2 },
    /// Ball struck a paddle; `speed` is the speed after escalation
    PaddleHit { side: Side, pos: Vec2, speed: f32 },
    /// `scorer` won the point; the ball has already been re-served
    Scored { scorer: Side, scores: Scores },
}

/// One continuous two-player match
#[derive(Debug, Clone)]
pub struct Match {
    /// Court size in pixels (width, height)
    pub court: Vec2,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub particles: ParticleSystem,
    pub scores: Scores,
    /// Simulation frames run so far
    pub frame_count: u64,
    pub(crate) settings: Settings,
    pub(crate) rng: Pcg32,
    /// Events raised by the most recent frame
    pub(crate) events: Vec<GameEvent>,
}

impl Match {
    /// Create a match on a `width` x `height` court, serving immediately
    pub fn new(width: f32, height: f32, settings: Settings, seed: u64) -> Self {
        let court = Vec2::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new(&settings);
        ball.serve(court / 2.0, &mut rng);

        log::info!(
            "Match started on {}x{} court (seed {}), first serve heading {}",
            width,
            height,
            seed,
            if ball.vel.x > 0.0 { "right" } else { "left" }
        );

        Self {
            court,
            left: Paddle::new(Side::Left, court, &settings),
            right: Paddle::new(Side::Right, court, &settings),
            ball,
            particles: ParticleSystem::new(&settings),
            scores: Scores::default(),
            frame_count: 0,
            settings,
            rng,
            events: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.court / 2.0
    }

    /// Adopt new court dimensions
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring degenerate court size {}x{}", width, height);
            return;
        }
        self.court = Vec2::new(width, height);
        self.left.refit(self.court);
        self.right.refit(self.court);
        log::debug!("Court resized to {}x{}", width, height);
    }

    /// Events raised by the most recent frame, in order
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_serves_from_center() {
        let game = Match::new(800.0, 600.0, Settings::default(), 1);
        assert_eq!(game.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(game.ball.speed, 2.0);
        assert!((game.ball.vel.length() - 2.0).abs() < 1e-5);
        assert_eq!(game.scores, Scores::default());
        assert!(game.particles.is_empty());
    }

    #[test]
    fn test_award_and_leading() {
        let mut scores = Scores::default();
        scores.award(Side::Right);
        scores.award(Side::Right);
        scores.award(Side::Left);
        assert_eq!(scores, Scores { left: 1, right: 2 });
        assert_eq!(scores.leading(), 2);
    }

    #[test]
    fn test_resize_reanchors_paddles() {
        let mut game = Match::new(800.0, 600.0, Settings::default(), 1);
        game.resize(1024.0, 768.0);
        assert_eq!(game.court, Vec2::new(1024.0, 768.0));
        assert_eq!(game.right.pos.x, 1024.0 - 30.0 - 20.0);
        assert_eq!(game.left.pos.x, 30.0);

        game.resize(0.0, 768.0);
        assert_eq!(game.court, Vec2::new(1024.0, 768.0));
    }

    #[test]
    fn test_same_seed_same_serve() {
        let a = Match::new(800.0, 600.0, Settings::default(), 99);
        let b = Match::new(800.0, 600.0, Settings::default(), 99);
        assert_eq!(a.ball.vel, b.ball.vel);
    }
}
