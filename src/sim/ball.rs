//! Ball motion, collisions and scoring

use glam::Vec2;
use rand::Rng;

use super::paddle::{Paddle, Side};
use super::state::{GameEvent, Scores};
use crate::settings::Settings;
use crate::{heading, velocity_from_angle};

/// The ball. `vel` always has magnitude `speed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub base_speed: f32,
    /// Current speed; grows on paddle hits, reset on every serve
    pub speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    /// Half-angle of the serve cone around horizontal
    pub serve_cone: f32,
}

impl Ball {
    /// A stationary ball; call [`Ball::serve`] to put it in play
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: settings.ball_radius,
            base_speed: settings.ball_base_speed,
            speed: settings.ball_base_speed,
            speed_increment: settings.ball_speed_increment,
            max_speed: settings.ball_max_speed,
            serve_cone: settings.serve_cone,
        }
    }

    /// Re-center at base speed, heading within the serve cone towards a
    /// random side
    pub fn serve<R: Rng>(&mut self, center: Vec2, rng: &mut R) {
        self.pos = center;
        self.speed = self.base_speed;

        let angle = rng.random_range(-self.serve_cone..=self.serve_cone);
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let vel = velocity_from_angle(self.speed, angle);
        self.vel = Vec2::new(vel.x * direction, vel.y);

        log::debug!(
            "Serve: angle {:.1} deg, heading {}",
            angle.to_degrees(),
            if direction > 0.0 { "right" } else { "left" }
        );
    }

    /// Rescale to the speed earned by the leading score, keeping direction.
    ///
    /// The horizontal sign of `vel` survives the round trip through its
    /// heading even when the ball travels almost vertically.
    pub fn escalate(&mut self, scores: Scores) {
        let target = self.base_speed + scores.leading() as f32 * self.speed_increment;
        self.speed = target.min(self.max_speed);
        let rescaled = velocity_from_angle(self.speed, heading(self.vel));
        self.vel = Vec2::new(rescaled.x.copysign(self.vel.x), rescaled.y);
    }

    #[inline]
    pub fn left_edge(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top_edge(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom_edge(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Advance one frame.
    ///
    /// Order matters: walls, left paddle, right paddle, then goal lines. A
    /// paddle hit moves the ball flush against the paddle, clear of the goal
    /// line, so a returned ball is never scored in the same frame.
    pub fn update<R: Rng>(
        &mut self,
        court: Vec2,
        left: &Paddle,
        right: &Paddle,
        scores: &mut Scores,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.pos += self.vel;

        // Top/bottom walls: reflect only while still heading outwards
        let hit_top = self.top_edge() < 0.0 && self.vel.y < 0.0;
        let hit_bottom = self.bottom_edge() > court.y && self.vel.y > 0.0;
        if hit_top || hit_bottom {
            self.vel.y = -self.vel.y;
            log::trace!("Wall bounce at ({:.1}, {:.1})", self.pos.x, self.pos.y);
            events.push(GameEvent::WallBounce { pos: self.pos });
        }

        if self.left_edge() < left.right() && left.spans(self.pos.y) {
            self.vel.x = self.vel.x.abs();
            self.pos.x = left.right() + self.radius;
            self.escalate(*scores);
            events.push(GameEvent::PaddleHit {
                side: Side::Left,
                pos: self.pos,
                speed: self.speed,
            });
        }

        if self.right_edge() > right.left() && right.spans(self.pos.y) {
            self.vel.x = -self.vel.x.abs();
            self.pos.x = right.left() - self.radius;
            self.escalate(*scores);
            events.push(GameEvent::PaddleHit {
                side: Side::Right,
                pos: self.pos,
                speed: self.speed,
            });
        }

        let scorer = if self.left_edge() < 0.0 {
            Some(Side::Right)
        } else if self.right_edge() > court.x {
            Some(Side::Left)
        } else {
            None
        };

        if let Some(scorer) = scorer {
            scores.award(scorer);
            events.push(GameEvent::Scored {
                scorer,
                scores: *scores,
            });
            self.serve(court / 2.0, rng);
        }
    }
}
