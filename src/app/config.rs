// Application configuration types
//
// This module contains host-side configuration:
// - Frame interval bounds and adjustment step
// - Frame-time monitoring thresholds
// - Layout constants shared by the container and the UI

use std::time::{Duration, Instant};

// ============================================================================
// Constants
// ============================================================================

/// Default frame interval (~30 fps)
pub const DEFAULT_FRAME_MS: u64 = 33;

/// Minimum frame interval in milliseconds (~60 fps)
pub const MIN_FRAME_MS: u64 = 16;

/// Maximum frame interval in milliseconds
pub const MAX_FRAME_MS: u64 = 250;

/// Frame interval adjustment step in milliseconds
pub const FRAME_STEP_MS: u64 = 8;

/// Duration to highlight a recently changed frame interval
pub const CHANGE_HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

/// Frame time above which a frame counts as slow
pub const SLOW_FRAME_THRESHOLD_MS: u128 = 100;

/// Number of consecutive slow frames before the lag is reported
pub const SLOW_FRAME_COUNT_THRESHOLD: u32 = 5;

/// Smoothing factor for the displayed frame rate (weight of the newest sample)
pub const FPS_SMOOTHING: f32 = 0.1;

/// Terminal rows taken by the status bar below the canvas
pub const STATUS_BAR_HEIGHT: u16 = 3;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Frame cadence of the render loop
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Frame interval in milliseconds (MIN_FRAME_MS..=MAX_FRAME_MS)
    pub frame_ms: u64,

    /// Timestamp of last interval change (for visual feedback)
    pub last_change: Option<Instant>,
}

impl FrameConfig {
    pub fn new(frame_ms: u64) -> Self {
        Self {
            frame_ms: frame_ms.clamp(MIN_FRAME_MS, MAX_FRAME_MS),
            last_change: None,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Shorten the interval by one step
    pub fn faster(&mut self) {
        self.frame_ms = self
            .frame_ms
            .saturating_sub(FRAME_STEP_MS)
            .max(MIN_FRAME_MS);
        self.last_change = Some(Instant::now());
    }

    /// Lengthen the interval by one step
    pub fn slower(&mut self) {
        self.frame_ms = self
            .frame_ms
            .saturating_add(FRAME_STEP_MS)
            .min(MAX_FRAME_MS);
        self.last_change = Some(Instant::now());
    }

    /// Whether the interval changed within CHANGE_HIGHLIGHT_DURATION of `now`
    pub fn recently_changed(&self, now: Instant) -> bool {
        self.last_change
            .is_some_and(|t| now.duration_since(t) < CHANGE_HIGHLIGHT_DURATION)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_MS)
    }
}
