//! Per-frame update/render cycle
//!
//! One call to [`frame`] per display refresh. Motion constants are per frame,
//! so game speed follows the refresh rate unless the driver paces frames
//! with [`FixedStep`].

use super::paddle::{Paddle, Side};
use super::state::{GameEvent, Match};
use crate::consts::{FRAME_MS, MAX_SUBSTEPS, SCORE_BASELINE};
use crate::input::InputState;
use crate::render::{Surface, colors};

/// Run one frame: clear, paddles, ball, score, particles, in that order
pub fn frame<S: Surface>(game: &mut Match, input: &InputState, surface: &mut S) {
    game.events.clear();
    game.frame_count += 1;

    let court = game.court;
    surface.clear(0.0, 0.0, court.x, court.y);

    // Input is sampled once, here
    let keys = &game.settings.keys;
    game.left.update_velocity(keys.left(input), court.y);
    game.right.update_velocity(keys.right(input), court.y);
    game.left.apply_motion();
    game.right.apply_motion();
    draw_paddle(surface, &game.left);
    draw_paddle(surface, &game.right);

    game.ball.update(
        court,
        &game.left,
        &game.right,
        &mut game.scores,
        &mut game.rng,
        &mut game.events,
    );
    spawn_feedback(game);
    surface.fill_circle(
        game.ball.pos.x,
        game.ball.pos.y,
        game.ball.radius,
        colors::BALL,
    );

    draw_score(surface, game);

    game.particles.advance_and_prune();
    for p in game.particles.iter() {
        surface.fill_circle(p.pos.x, p.pos.y, p.radius, colors::faded(p.color, p.alpha));
    }
}

/// Turn this frame's ball events into particle bursts and log lines
fn spawn_feedback(game: &mut Match) {
    let count = game.settings.burst_size;
    for event in &game.events {
        match *event {
            GameEvent::WallBounce { pos } => {
                game.particles
                    .spawn_burst(pos, colors::WALL_HIT, count, &mut game.rng);
            }
            GameEvent::PaddleHit { side, pos, speed } => {
                let color = match side {
                    Side::Left => colors::LEFT_HIT,
                    Side::Right => colors::RIGHT_HIT,
                };
                game.particles.spawn_burst(pos, color, count, &mut game.rng);
                log::debug!("{} paddle hit, ball speed now {:.2}", side.as_str(), speed);
            }
            GameEvent::Scored { scorer, scores } => {
                log::info!(
                    "Point to {}: {} - {}",
                    scorer.as_str(),
                    scores.left,
                    scores.right
                );
            }
        }
    }
}

fn draw_paddle<S: Surface>(surface: &mut S, paddle: &Paddle) {
    surface.fill_rect(
        paddle.pos.x,
        paddle.pos.y,
        paddle.width,
        paddle.height,
        colors::PADDLE,
    );
}

fn draw_score<S: Surface>(surface: &mut S, game: &Match) {
    let font = &game.settings.score_font;
    let width = game.court.x;
    surface.fill_text(
        &game.scores.left.to_string(),
        width / 4.0,
        SCORE_BASELINE,
        colors::SCORE,
        font,
    );
    surface.fill_text(
        &game.scores.right.to_string(),
        3.0 * width / 4.0,
        SCORE_BASELINE,
        colors::SCORE,
        font,
    );
}

/// Accumulator that paces simulation frames at 60 Hz regardless of the
/// display refresh rate
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simulation frames to run for a callback at `now_ms`.
    ///
    /// The first callback runs one frame. Long gaps (tab in background) are
    /// clamped so the game never tries to catch up more than
    /// [`MAX_SUBSTEPS`] frames at once.
    pub fn frames_due(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(now_ms) else {
            return 1;
        };

        let elapsed = (now_ms - last).clamp(0.0, FRAME_MS * (MAX_SUBSTEPS + 1) as f64);
        self.accumulator += elapsed;

        let mut frames = 0;
        while self.accumulator >= FRAME_MS && frames < MAX_SUBSTEPS {
            self.accumulator -= FRAME_MS;
            frames += 1;
        }
        frames
    }

    /// Forget timing history (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList};
    use crate::settings::Settings;
    use glam::Vec2;

    fn new_match() -> Match {
        Match::new(800.0, 600.0, Settings::default(), 12345)
    }

    #[test]
    fn test_draw_order() {
        let mut game = new_match();
        let mut surface = DrawList::new();
        frame(&mut game, &InputState::new(), &mut surface);

        let kinds: Vec<&str> = surface
            .commands
            .iter()
            .map(|c| match c {
                DrawCommand::Clear { .. } => "clear",
                DrawCommand::Rect { .. } => "rect",
                DrawCommand::Circle { .. } => "circle",
                DrawCommand::Text { .. } => "text",
            })
            .collect();
        assert_eq!(kinds, ["clear", "rect", "rect", "circle", "text", "text"]);
        assert_eq!(surface.texts().collect::<Vec<_>>(), ["0", "0"]);
    }

    #[test]
    fn test_input_moves_paddles() {
        let mut game = new_match();
        let mut input = InputState::new();
        input.press("w");
        input.press("ArrowDown");
        let mut surface = DrawList::new();
        frame(&mut game, &input, &mut surface);

        assert_eq!(game.left.pos.y, 246.0);
        assert_eq!(game.right.pos.y, 254.0);
        assert_eq!(
            surface.commands[1],
            DrawCommand::Rect {
                x: 30.0,
                y: 246.0,
                w: 20.0,
                h: 100.0,
                color: colors::PADDLE
            }
        );
    }

    #[test]
    fn test_wall_bounce_spawns_burst() {
        let mut game = new_match();
        game.ball.pos = Vec2::new(400.0, 12.0);
        game.ball.vel = Vec2::new(1.0, -3.0);
        game.ball.speed = game.ball.vel.length();

        let mut surface = DrawList::new();
        frame(&mut game, &InputState::new(), &mut surface);

        assert_eq!(game.events().len(), 1);
        assert_eq!(game.particles.len(), 20);
        assert!(game.particles.iter().all(|p| p.color == colors::WALL_HIT));
        // Ball plus the freshly advanced burst
        assert_eq!(surface.circles().count(), 21);
    }

    #[test]
    fn test_score_scenario() {
        let mut game = new_match();
        game.ball.pos = Vec2::ZERO;
        game.ball.vel = Vec2::new(-2.0, -2.0);
        game.ball.speed = game.ball.vel.length();

        let mut surface = DrawList::new();
        frame(&mut game, &InputState::new(), &mut surface);

        assert_eq!(game.scores.right, 1);
        assert_eq!(game.scores.left, 0);
        assert_eq!(game.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(game.ball.speed, 2.0);
        assert_eq!(game.particles.len(), 20);
        assert_eq!(surface.texts().collect::<Vec<_>>(), ["0", "1"]);
    }

    #[test]
    fn test_particles_fade_out_over_frames() {
        let mut game = new_match();
        game.particles.spawn_burst(
            Vec2::new(100.0, 100.0),
            colors::LEFT_HIT,
            20,
            &mut game.rng,
        );
        let mut surface = DrawList::new();
        let input = InputState::new();
        for _ in 0..60 {
            // Keep the ball parked mid-court so no new bursts appear
            game.ball.pos = game.center();
            frame(&mut game, &input, &mut surface);
        }
        assert!(game.particles.is_empty());
    }

    #[test]
    fn test_fixed_step_paces_frames() {
        let mut step = FixedStep::new();
        assert_eq!(step.frames_due(0.0), 1);
        // 120 Hz display: every other callback runs a frame
        assert_eq!(step.frames_due(8.5), 0);
        assert_eq!(step.frames_due(17.0), 1);
        // 30 Hz display: two frames per callback
        assert_eq!(step.frames_due(50.4), 2);
    }

    #[test]
    fn test_fixed_step_clamps_long_gaps() {
        let mut step = FixedStep::new();
        step.frames_due(0.0);
        assert_eq!(step.frames_due(10_000.0), MAX_SUBSTEPS);
        step.reset();
        assert_eq!(step.frames_due(20_000.0), 1);
    }
}
