//! Fixed-capacity particle ring buffer
//!
//! Particles are visual only. Spawning overwrites slots starting at a
//! rotating cursor, live or not, and nothing is allocated after `new`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single particle slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds since spawn
    pub age: f32,
    /// Seconds until fully faded
    pub lifetime: f32,
    /// Square side in pixels
    pub size: u8,
}

impl Particle {
    const DEAD: Particle = Particle {
        pos: Vec2::ZERO,
        vel: Vec2::ZERO,
        age: 1.0,
        lifetime: 0.0,
        size: 0,
    };

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Opacity in [0, 1], fading linearly over the lifetime
    pub fn alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// What the renderer needs for one visible particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub size: u8,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    cursor: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::DEAD; capacity.max(1)],
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Reset `count` slots at the cursor into a burst around `origin`
    pub fn spawn<R: Rng + ?Sized>(&mut self, origin: Vec2, count: usize, rng: &mut R) {
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(50.0..=200.0);
            self.slots[self.cursor] = Particle {
                pos: origin,
                vel: crate::direction(angle) * speed,
                age: 0.0,
                lifetime: rng.random_range(0.5..=1.0),
                size: rng.random_range(2..=5),
            };
            self.cursor = (self.cursor + 1) % self.slots.len();
        }
    }

    /// Age and move every slot, dead ones included
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.slots {
            p.age += dt;
            p.pos += p.vel * dt;
        }
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|p| p.is_alive()).count()
    }

    /// Visible particles with their current alpha
    pub fn sprites(&self) -> impl Iterator<Item = ParticleSprite> + '_ {
        self.slots.iter().filter(|p| p.is_alive()).map(|p| ParticleSprite {
            pos: p.pos,
            size: p.size,
            alpha: p.alpha(),
        })
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(crate::consts::MAX_PARTICLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_wraps_and_never_grows() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pool = ParticlePool::new(8);
        pool.spawn(Vec2::ZERO, 5, &mut rng);
        pool.spawn(Vec2::ZERO, 5, &mut rng);
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.live_count(), 8);
        assert_eq!(pool.cursor, 2);
    }

    #[test]
    fn test_spawned_ranges() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut pool = ParticlePool::new(100);
        pool.spawn(Vec2::new(10.0, 20.0), 100, &mut rng);
        for p in &pool.slots {
            let speed = p.vel.length();
            assert!((49.9..=200.1).contains(&speed));
            assert!((0.5..=1.0).contains(&p.lifetime));
            assert!((2..=5).contains(&p.size));
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
        }
    }

    #[test]
    fn test_fade_and_expiry() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = ParticlePool::new(4);
        pool.spawn(Vec2::ZERO, 4, &mut rng);
        assert!(pool.sprites().all(|s| (s.alpha - 1.0).abs() < 1e-6));

        pool.update(0.25);
        assert!(pool.sprites().all(|s| s.alpha > 0.0 && s.alpha < 1.0));

        pool.update(1.0);
        assert_eq!(pool.sprites().count(), 0);
    }
}
