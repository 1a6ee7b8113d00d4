// Particle field
//
// Owns the moving nodes of the network: seeding inside the surface bounds,
// per-frame motion with toroidal wraparound, and drawing.

use super::config::{EngineConfig, MIN_RENDER_RADIUS};
use crate::surface::{Bounds, Surface};
use crate::theme::{Palette, Rgba};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

/// Colour used when a palette has no particle colours
const FALLBACK_COLOR: Rgba = Rgba::new(255, 255, 255, 0.5);

/// Radius oscillation state of a particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Current phase in radians
    pub phase: f64,
    /// Phase increment per frame
    pub speed: f64,
    /// Peak radius deviation from the base size
    pub amplitude: f64,
}

/// A single moving node
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Base radius
    pub size: f64,
    /// Radius drawn this frame (`size` unless pulsing)
    pub radius: f64,
    pub pulse: Option<Pulse>,
    /// Sampled from the palette at seeding time and never changed
    pub color: Rgba,
}

impl Particle {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Move one frame and keep the position on the torus
    fn step(&mut self, bounds: Bounds) {
        self.x = wrap_coordinate(self.x + self.vx, bounds.width);
        self.y = wrap_coordinate(self.y + self.vy, bounds.height);

        if let Some(pulse) = self.pulse.as_mut() {
            pulse.phase = (pulse.phase + pulse.speed) % std::f64::consts::TAU;
            self.radius = (self.size + pulse.phase.sin() * pulse.amplitude).max(MIN_RENDER_RADIUS);
        }
    }
}

/// Wrap a coordinate into `[0, extent)`
///
/// At or beyond the upper edge the coordinate restarts at zero. Below zero
/// it re-enters from the upper edge, carrying the overshoot. A coordinate
/// left far outside by a shrinking surface also restarts at zero.
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    if value >= extent {
        0.0
    } else if value < 0.0 {
        let wrapped = value + extent;
        if (0.0..extent).contains(&wrapped) {
            wrapped
        } else {
            0.0
        }
    } else {
        value
    }
}

/// Uniform sample from `range`, or its start when the range is empty
fn sample(rng: &mut impl Rng, range: Range<f64>) -> f64 {
    if range.start < range.end {
        rng.gen_range(range)
    } else {
        range.start
    }
}

/// The authoritative set of particles for one surface
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Seed `count` particles inside `bounds`
    ///
    /// Colours are drawn from `palette` here and stay fixed for the field's
    /// lifetime. The same `rng` state always yields the same field.
    pub fn initialize(
        bounds: Bounds,
        count: usize,
        palette: &Palette,
        config: &EngineConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let speed = config.max_speed.abs();

        let particles = (0..count)
            .map(|_| {
                let x = sample(rng, 0.0..bounds.width);
                let y = sample(rng, 0.0..bounds.height);
                let size = sample(rng, config.size_range.clone());
                let vx = sample(rng, -speed..speed);
                let vy = sample(rng, -speed..speed);
                let color = palette
                    .particles
                    .choose(rng)
                    .copied()
                    .unwrap_or(FALLBACK_COLOR);

                let pulse = config.pulse_enabled().then(|| Pulse {
                    phase: sample(rng, 0.0..std::f64::consts::TAU),
                    speed: sample(rng, config.pulse_speed_range.clone()),
                    amplitude: config.pulse_amplitude,
                });

                Particle {
                    x,
                    y,
                    vx,
                    vy,
                    size,
                    radius: size,
                    pulse,
                    color,
                }
            })
            .collect();

        Self { particles }
    }

    /// Advance every particle by one frame against the current bounds
    ///
    /// Bounds smaller than 1×1 mean the surface is unavailable; the field is
    /// left untouched.
    pub fn advance(&mut self, bounds: Bounds) {
        if !bounds.is_drawable() {
            return;
        }
        for particle in &mut self.particles {
            particle.step(bounds);
        }
    }

    /// Paint every particle as a filled circle
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.radius, p.color);
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

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
