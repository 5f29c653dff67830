//! Collision-feedback particles
//!
//! Purely visual: particles never influence paddles, ball or scores.

use glam::Vec2;
use rand::Rng;

use crate::render::Rgba;
use crate::settings::Settings;

/// A single fading spark
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgba,
    /// Opacity, starts at 1.0 and falls linearly
    pub alpha: f32,
}

impl Particle {
    pub fn update(&mut self, fade: f32) {
        self.pos += self.vel;
        self.alpha -= fade;
    }

    /// Fully transparent particles are dropped
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Owns every live particle
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    min_radius: f32,
    max_radius: f32,
    spread: f32,
    fade: f32,
}

impl ParticleSystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            particles: Vec::new(),
            min_radius: settings.particle_min_radius,
            max_radius: settings.particle_max_radius,
            spread: settings.particle_spread,
            fade: settings.particle_fade,
        }
    }

    /// Append `count` particles at `pos`, all sharing `color`
    pub fn spawn_burst<R: Rng>(&mut self, pos: Vec2, color: Rgba, count: usize, rng: &mut R) {
        self.particles.reserve(count);
        for _ in 0..count {
            let radius = rng.random_range(self.min_radius..self.max_radius);
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * self.spread,
                (rng.random::<f32>() - 0.5) * self.spread,
            );
            self.particles.push(Particle {
                pos,
                vel,
                radius,
                color,
                alpha: 1.0,
            });
        }
    }

    /// Move and fade every particle, then drop the spent ones
    pub fn advance_and_prune(&mut self) {
        let fade = self.fade;
        self.particles.retain_mut(|p| {
            p.update(fade);
            !p.is_spent()
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn system() -> (ParticleSystem, Pcg32) {
        (
            ParticleSystem::new(&Settings::default()),
            Pcg32::seed_from_u64(42),
        )
    }

    #[test]
    fn test_burst_shape() {
        let (mut particles, mut rng) = system();
        let origin = Vec2::new(100.0, 200.0);
        particles.spawn_burst(origin, colors::WALL_HIT, 20, &mut rng);

        assert_eq!(particles.len(), 20);
        for p in particles.iter() {
            assert_eq!(p.pos, origin);
            assert_eq!(p.color, colors::WALL_HIT);
            assert_eq!(p.alpha, 1.0);
            assert!(p.radius >= 2.0 && p.radius < 5.0);
            assert!(p.vel.x >= -2.0 && p.vel.x < 2.0);
            assert!(p.vel.y >= -2.0 && p.vel.y < 2.0);
        }
    }

    #[test]
    fn test_advance_moves_and_fades() {
        let (mut particles, mut rng) = system();
        particles.spawn_burst(Vec2::ZERO, colors::LEFT_HIT, 5, &mut rng);
        let before: Vec<Particle> = particles.iter().cloned().collect();

        particles.advance_and_prune();

        for (old, new) in before.iter().zip(particles.iter()) {
            assert_eq!(new.pos, old.pos + old.vel);
            assert!(new.alpha < old.alpha);
            assert!((old.alpha - new.alpha - 0.02).abs() < 1e-6);
        }
    }

    #[test]
    fn test_removed_on_the_update_alpha_hits_zero() {
        let (mut particles, mut rng) = system();
        particles.spawn_burst(Vec2::ZERO, colors::RIGHT_HIT, 20, &mut rng);

        let mut updates = 0;
        while !particles.is_empty() {
            let alphas: Vec<f32> = particles.iter().map(|p| p.alpha).collect();
            particles.advance_and_prune();
            updates += 1;
            // Survivors are exactly those whose decayed alpha is still positive
            let expected = alphas.iter().filter(|a| **a - 0.02 > 0.0).count();
            assert_eq!(particles.len(), expected);
            assert!(updates <= 51, "particles outlived their fade");
        }
        assert!(updates >= 49);
    }

    #[test]
    fn test_pruning_does_not_skip_neighbours() {
        let (mut particles, _) = system();
        // Alternate nearly-spent and fresh particles
        for i in 0..10 {
            particles.particles.push(Particle {
                pos: Vec2::ZERO,
                vel: Vec2::ONE,
                radius: 2.0,
                color: colors::WALL_HIT,
                alpha: if i % 2 == 0 { 0.01 } else { 1.0 },
            });
        }
        particles.advance_and_prune();
        assert_eq!(particles.len(), 5);
        // Every survivor was updated exactly once
        assert!(particles.iter().all(|p| (p.alpha - 0.98).abs() < 1e-6));
        assert!(particles.iter().all(|p| p.pos == Vec2::ONE));
    }
}
