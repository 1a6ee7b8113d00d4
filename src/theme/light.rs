// Light theme palette
//
// Saturated blues on an off-white background. Opacities are a little lower
// than the dark palette so edges stay subtle against the bright surface.

use super::{Palette, Rgba};

/// Surface background
pub const BACKGROUND: (u8, u8, u8) = (245, 248, 252);

/// Connection base colour
pub const CONNECTION: (u8, u8, u8) = (37, 99, 235);

static PARTICLES: [Rgba; 4] = [
    Rgba::new(37, 99, 235, 0.7),
    Rgba::new(59, 130, 246, 0.6),
    Rgba::new(14, 165, 233, 0.6),
    Rgba::new(99, 102, 241, 0.5),
];

pub fn palette() -> Palette {
    Palette {
        background: BACKGROUND,
        particles: &PARTICLES,
        connection: CONNECTION,
        connection_max_opacity: 0.5,
    }
}
