//! Particle bursts (visual only, never affect gameplay)

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// Downward pull on particles, px/s²
const PARTICLE_GRAVITY: f32 = 600.0;

/// A single particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 when spawned, removed at 0
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
    pub size: f32,
    pub color: &'static str,
}

/// Shape of a burst
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Launch direction (radians; -PI/2 is straight up)
    pub angle: f32,
    /// Half-width of the launch cone (radians)
    pub spread: f32,
    pub decay: f32,
    pub size: f32,
    pub color: &'static str,
}

impl Burst {
    /// Carrot collected
    pub const CARROT: Burst = Burst {
        count: 12,
        min_speed: 80.0,
        max_speed: 220.0,
        angle: -std::f32::consts::FRAC_PI_2,
        spread: 1.2,
        decay: 1.8,
        size: 4.0,
        color: "#FF8A2A",
    };

    /// Ball in the cup, goal reached
    pub const SPARKLE: Burst = Burst {
        count: 16,
        min_speed: 60.0,
        max_speed: 260.0,
        angle: -std::f32::consts::FRAC_PI_2,
        spread: std::f32::consts::PI,
        decay: 1.5,
        size: 3.0,
        color: "#FFFFFF",
    };

    /// Decoy crate or coal
    pub const PUFF: Burst = Burst {
        count: 10,
        min_speed: 30.0,
        max_speed: 110.0,
        angle: -std::f32::consts::FRAC_PI_2,
        spread: 1.4,
        decay: 2.2,
        size: 5.0,
        color: "#6E6E6E",
    };

    /// Coin caught
    pub const GOLD: Burst = Burst {
        count: 10,
        min_speed: 70.0,
        max_speed: 200.0,
        angle: -std::f32::consts::FRAC_PI_2,
        spread: 1.0,
        decay: 2.0,
        size: 3.0,
        color: "#FFD24D",
    };

    /// Player hit by an obstacle
    pub const HIT: Burst = Burst {
        count: 14,
        min_speed: 90.0,
        max_speed: 240.0,
        angle: -std::f32::consts::FRAC_PI_2,
        spread: 1.6,
        decay: 2.4,
        size: 4.0,
        color: "#FF5A5A",
    };
}

/// Spawn a burst at `origin`, never growing past `cap` live particles
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    burst: &Burst,
    cap: usize,
) {
    let room = cap.saturating_sub(particles.len());
    for _ in 0..burst.count.min(room) {
        let angle = burst.angle + rng.random_range(-1.0f32..=1.0) * burst.spread;
        let speed = rng.random_range(burst.min_speed..=burst.max_speed);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: 1.0,
            decay: burst.decay * rng.random_range(0.8f32..=1.2),
            size: burst.size,
            color: burst.color,
        });
    }
}

/// Advance particles and drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.pos += p.vel * dt;
        p.life -= p.decay * dt;
        p.size = (p.size * (1.0 - 0.6 * dt)).max(1.0);
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, &Burst::SPARKLE, 20);
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, &Burst::SPARKLE, 20);
        assert_eq!(particles.len(), 20);
    }

    #[test]
    fn test_zero_cap_disables_particles() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, &Burst::HIT, 0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::new(100.0, 100.0), &Burst::PUFF, 100);
        assert!(!particles.is_empty());
        // Slowest decay is 0.8 * 2.2 per second, so 1s is plenty
        for _ in 0..120 {
            update_particles(&mut particles, 1.0 / 120.0);
        }
        assert!(particles.is_empty());
    }

    proptest! {
        #[test]
        fn upward_bursts_start_rising(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut particles = Vec::new();
            spawn_burst(&mut particles, &mut rng, Vec2::ZERO, &Burst::CARROT, 64);
            // Cone of +-1.2 rad around straight up never points downward
            for p in &particles {
                prop_assert!(p.vel.y < 0.0);
            }
        }
    }
}
