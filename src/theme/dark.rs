// Dark theme palette
//
// Cool cyan/blue nodes on a near-black navy background.

use super::{Palette, Rgba};

/// Surface background
pub const BACKGROUND: (u8, u8, u8) = (10, 14, 26);

/// Connection base colour
pub const CONNECTION: (u8, u8, u8) = (0, 180, 255);

static PARTICLES: [Rgba; 4] = [
    Rgba::new(0, 200, 255, 0.8),
    Rgba::new(64, 156, 255, 0.6),
    Rgba::new(130, 220, 255, 0.7),
    Rgba::new(255, 255, 255, 0.5),
];

pub fn palette() -> Palette {
    Palette {
        background: BACKGROUND,
        particles: &PARTICLES,
        connection: CONNECTION,
        connection_max_opacity: 0.6,
    }
}
