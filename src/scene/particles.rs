use crate::foundation::core::Canvas;
use crate::foundation::math::Rng64;

/// Particles spawned per new active lyric with a glyph.
pub const BURST_SIZE: usize = 5;

/// Defensive ceiling on live particles; the oldest are evicted first when a
/// burst would exceed it.
pub const MAX_PARTICLES: usize = 512;

/// Default opacity decrement per tick.
pub const DECAY_PER_FRAME: f64 = 0.01;

/// Short-lived glyph particle. Velocities are canvas pixels per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
    pub glyph: String,
    pub size: f64,
}

/// How particle opacity decays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecayMode {
    /// Fixed decrement per tick. Fade time depends on the host refresh rate;
    /// at 60 Hz the default decrement fades a particle in 100 frames.
    PerFrame(f64),
    /// Decrement scaled by elapsed media time, making the fade refresh-rate
    /// independent. Opt-in.
    PerSecond(f64),
}

impl Default for DecayMode {
    fn default() -> Self {
        Self::PerFrame(DECAY_PER_FRAME)
    }
}

/// Glyph particle pool owned by the session and mutated only by the tick.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    next_id: u64,
    decay: DecayMode,
    last_t: Option<f64>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decay(decay: DecayMode) -> Self {
        Self {
            decay,
            ..Self::default()
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn one burst of glyph particles across the middle 60% of the
    /// canvas width at 60% height, drifting upward.
    pub fn spawn_burst(&mut self, canvas: Canvas, glyph: &str, rng: &mut Rng64) {
        let w = canvas.width_f();
        let h = canvas.height_f();
        for _ in 0..BURST_SIZE {
            let particle = Particle {
                id: self.next_id,
                x: w * rng.uniform(0.2, 0.8),
                y: h * 0.6,
                vx: rng.uniform(-0.5, 0.5),
                vy: -rng.uniform(0.5, 2.0),
                opacity: 1.0,
                glyph: glyph.to_string(),
                size: (w / 40.0) * rng.uniform(0.75, 1.25),
            };
            self.next_id += 1;
            self.particles.push(particle);
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Integrate positions, decay opacity and cull dead particles.
    pub fn advance(&mut self, t: f64) {
        let decrement = match self.decay {
            DecayMode::PerFrame(d) => d,
            DecayMode::PerSecond(rate) => {
                let dt = self.last_t.map_or(0.0, |last| (t - last).max(0.0));
                rate * dt
            }
        };
        self.last_t = Some(t);

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.opacity -= decrement;
        }
        // Repeated subtraction of 0.01 lands near zero, not on it.
        self.particles.retain(|p| p.opacity > 1e-9);
    }

    /// Drop all particles (session reset).
    pub fn clear(&mut self) {
        self.particles.clear();
        self.last_t = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particles.rs"]
mod tests;
