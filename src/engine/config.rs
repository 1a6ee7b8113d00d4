// Engine configuration types
//
// This module contains the tunables of the particle-network engine:
// - Particle count and seeding ranges
// - Pulsation
// - Connection visibility threshold and stroke width
// - Optional seed for reproducible fields

use std::ops::Range;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Default number of particles per field
pub const DEFAULT_PARTICLE_COUNT: usize = 80;

/// Upper bound on particle count; the connection graph is O(N²)
pub const MAX_PARTICLE_COUNT: usize = 400;

/// Default per-axis velocity bound in pixels per frame
pub const DEFAULT_MAX_SPEED: f64 = 0.3;

/// Default base radius range in pixels
pub const DEFAULT_SIZE_RANGE: Range<f64> = 1.0..3.0;

/// Default radius oscillation amplitude in pixels
pub const DEFAULT_PULSE_AMPLITUDE: f64 = 0.5;

/// Default pulse phase increment range in radians per frame
pub const DEFAULT_PULSE_SPEED_RANGE: Range<f64> = 0.02..0.05;

/// Default distance beyond which connections are invisible
pub const DEFAULT_CONNECTION_THRESHOLD: f64 = 150.0;

/// Default connection stroke width in pixels
pub const DEFAULT_LINE_WIDTH: f64 = 0.5;

/// Smallest radius a pulsing particle is rendered with
pub const MIN_RENDER_RADIUS: f64 = 0.25;

// ============================================================================
// Errors
// ============================================================================

/// Rejected engine configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count {count} exceeds the maximum of {max}")]
    TooManyParticles { count: usize, max: usize },

    #[error("connection threshold must be positive, got {0}")]
    NonPositiveThreshold(f64),

    #[error("max speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f64),

    #[error("size range {start}..{end} must be positive and non-empty")]
    InvalidSizeRange { start: f64, end: f64 },

    #[error("pulse amplitude must be finite and non-negative, got {0}")]
    InvalidPulseAmplitude(f64),

    #[error("pulse speed range {start}..{end} must be non-empty")]
    InvalidPulseSpeedRange { start: f64, end: f64 },

    #[error("line width must be positive, got {0}")]
    NonPositiveLineWidth(f64),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Tunables for one particle-network engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of particles seeded into the field
    pub particle_count: usize,

    /// Per-axis velocity bound (pixels per frame)
    pub max_speed: f64,

    /// Base radius range (pixels)
    pub size_range: Range<f64>,

    /// Radius oscillation amplitude; 0 disables pulsation
    pub pulse_amplitude: f64,

    /// Pulse phase increment range (radians per frame)
    pub pulse_speed_range: Range<f64>,

    /// Connections at or beyond this distance are not drawn
    pub connection_threshold: f64,

    /// Connection stroke width (pixels)
    pub line_width: f64,

    /// Seed for the random source; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            max_speed: DEFAULT_MAX_SPEED,
            size_range: DEFAULT_SIZE_RANGE,
            pulse_amplitude: DEFAULT_PULSE_AMPLITUDE,
            pulse_speed_range: DEFAULT_PULSE_SPEED_RANGE,
            connection_threshold: DEFAULT_CONNECTION_THRESHOLD,
            line_width: DEFAULT_LINE_WIDTH,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Whether particles oscillate their radius
    pub fn pulse_enabled(&self) -> bool {
        self.pulse_amplitude > 0.0
    }

    /// Check every tunable before an engine is built from it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::TooManyParticles {
                count: self.particle_count,
                max: MAX_PARTICLE_COUNT,
            });
        }

        if !(self.connection_threshold > 0.0 && self.connection_threshold.is_finite()) {
            return Err(ConfigError::NonPositiveThreshold(self.connection_threshold));
        }

        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(ConfigError::InvalidSpeed(self.max_speed));
        }

        let sizes = &self.size_range;
        if !(sizes.start > 0.0 && sizes.start < sizes.end && sizes.end.is_finite()) {
            return Err(ConfigError::InvalidSizeRange {
                start: sizes.start,
                end: sizes.end,
            });
        }

        if !(self.pulse_amplitude >= 0.0 && self.pulse_amplitude.is_finite()) {
            return Err(ConfigError::InvalidPulseAmplitude(self.pulse_amplitude));
        }

        let speeds = &self.pulse_speed_range;
        if self.pulse_enabled() && !(speeds.start < speeds.end && speeds.end.is_finite()) {
            return Err(ConfigError::InvalidPulseSpeedRange {
                start: speeds.start,
                end: speeds.end,
            });
        }

        if !(self.line_width > 0.0 && self.line_width.is_finite()) {
            return Err(ConfigError::NonPositiveLineWidth(self.line_width));
        }

        Ok(())
    }
}
