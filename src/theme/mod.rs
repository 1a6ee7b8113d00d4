// Theme module - Palettes, colour helpers and UI accent constants
//
// A Theme is a two-valued flag (Light/Dark) that selects a Palette. The
// palette is sampled when a particle field is seeded and stays fixed for
// that field's lifetime; switching themes re-seeds the field.

pub mod dark;
pub mod light;

use ratatui::style::Color;

/// Accent colour for borders and key hints
/// RGB: (122, 162, 247)
pub const SIGNAL_BLUE: Color = Color::Rgb(122, 162, 247);

/// Healthy/default indicator
/// RGB: (158, 206, 106)
pub const PULSE_GREEN: Color = Color::Rgb(158, 206, 106);

/// Warning indicator (frame interval well below default)
/// RGB: (255, 158, 100)
pub const AMBER: Color = Color::Rgb(255, 158, 100);

/// Danger indicator (frame interval far below default)
/// RGB: (247, 118, 142)
pub const ALERT_RED: Color = Color::Rgb(247, 118, 142);

/// Neutral text
/// RGB: (169, 177, 214)
pub const MUTED_TEXT: Color = Color::Rgb(169, 177, 214);

/// Colour theme of the hosting screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The palette particles and connections sample from under this theme
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => light::palette(),
            Theme::Dark => dark::palette(),
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// An RGB colour with an opacity in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }

    /// Same colour with a different opacity (clamped to `[0.0, 1.0]`)
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Composite this colour over an opaque background
    ///
    /// Terminals have no alpha channel, so opacity is realised by
    /// interpolating from the background towards the colour.
    pub fn over(self, background: (u8, u8, u8)) -> Color {
        interpolate_color(background, self.rgb(), self.alpha)
    }
}

/// Colour set a particle field and its connection graph draw with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Opaque surface background, used for alpha compositing
    pub background: (u8, u8, u8),

    /// Particle colours; each particle picks one at seeding time
    pub particles: &'static [Rgba],

    /// Base connection colour (opacity is derived from distance)
    pub connection: (u8, u8, u8),

    /// Opacity of a connection between two coincident particles
    pub connection_max_opacity: f32,
}

impl Palette {
    /// Connection colour at the given opacity
    pub fn connection_color(&self, opacity: f32) -> Rgba {
        let (r, g, b) = self.connection;
        Rgba::new(r, g, b, 1.0).with_alpha(opacity)
    }
}

/// Interpolate between two RGB colors based on a ratio (0.0 ~ 1.0)
///
/// # Arguments
/// * `color1` - Starting color as (r, g, b) tuple
/// * `color2` - Ending color as (r, g, b) tuple
/// * `ratio` - Interpolation ratio (0.0 = color1, 1.0 = color2)
///
/// # Returns
/// Interpolated Color::Rgb value
pub fn interpolate_color(color1: (u8, u8, u8), color2: (u8, u8, u8), ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let r = (color1.0 as f32 + (color2.0 as f32 - color1.0 as f32) * ratio) as u8;
    let g = (color1.1 as f32 + (color2.1 as f32 - color1.1 as f32) * ratio) as u8;
    let b = (color1.2 as f32 + (color2.2 as f32 - color1.2 as f32) * ratio) as u8;
    Color::Rgb(r, g, b)
}

/// Get color for the frame interval based on its value relative to default
///
/// Color coding:
/// - Green (PULSE_GREEN): default or slower (lower CPU cost)
/// - Amber: faster than default
/// - Red (ALERT_RED): more than twice the default frame rate
///
/// If `recently_changed` is true, returns a brighter version of the color
pub fn frame_interval_color(interval_ms: u64, default_ms: u64, recently_changed: bool) -> Color {
    let base_color = if interval_ms >= default_ms {
        PULSE_GREEN
    } else {
        let ratio = (default_ms - interval_ms) as f32 / default_ms as f32;
        if ratio > 0.5 {
            ALERT_RED
        } else {
            AMBER
        }
    };

    if !recently_changed {
        return base_color;
    }

    match base_color {
        Color::Rgb(r, g, b) => {
            // Increase brightness by 20%
            let r = ((r as f32 * 1.2).min(255.0)) as u8;
            let g = ((g as f32 * 1.2).min(255.0)) as u8;
            let b = ((b as f32 * 1.2).min(255.0)) as u8;
            Color::Rgb(r, g, b)
        }
        _ => base_color,
    }
}
