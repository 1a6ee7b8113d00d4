// Particle-network engine
//
// One reusable, configurable engine instantiated per surface. It bundles the
// particle field, its connection graph, the palette both were seeded with and
// the random source used for seeding.

pub mod config;
pub mod connection;
pub mod particle;

pub use config::{ConfigError, EngineConfig};
pub use connection::{connection_opacity, Connection, ConnectionGraph};
pub use particle::{wrap_coordinate, Particle, ParticleField, Pulse};

use crate::surface::{Bounds, Surface};
use crate::theme::{Palette, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

/// Particle field + connection graph for one surface
pub struct NetworkEngine {
    config: EngineConfig,
    theme: Theme,
    palette: Palette,
    field: ParticleField,
    graph: ConnectionGraph,
    rng: StdRng,
}

impl NetworkEngine {
    /// Seed a field inside `bounds` using the palette of `theme`
    pub fn new(config: EngineConfig, theme: Theme, bounds: Bounds) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let palette = theme.palette();

        let mut engine = Self {
            config,
            theme,
            palette,
            field: ParticleField::default(),
            graph: ConnectionGraph::build(&[], 0.0, 0.0, palette),
            rng,
        };
        engine.reseed(bounds);
        engine
    }

    /// Discard the current field and seed a fresh one inside `bounds`
    pub fn reseed(&mut self, bounds: Bounds) {
        self.field = ParticleField::initialize(
            bounds,
            self.config.particle_count,
            &self.palette,
            &self.config,
            &mut self.rng,
        );
        self.graph = ConnectionGraph::build(
            self.field.particles(),
            self.config.connection_threshold,
            self.config.line_width,
            self.palette,
        );

        debug!(
            particles = self.field.len(),
            connections = self.graph.len(),
            width = bounds.width,
            height = bounds.height,
            theme = self.theme.label(),
            "Seeded particle field"
        );
    }

    /// Switch palettes
    ///
    /// Particle colours are fixed for a field's lifetime, so a theme change
    /// re-seeds the whole field. Setting the current theme is a no-op.
    pub fn set_theme(&mut self, theme: Theme, bounds: Bounds) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.palette = theme.palette();
        self.reseed(bounds);
    }

    /// Render one frame onto `surface`
    ///
    /// Clears the surface, advances then draws the particles, refreshes then
    /// draws the connections. Motion uses the surface's bounds as of this
    /// call. An unavailable (zero-sized) surface is skipped entirely.
    pub fn render_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let bounds = surface.bounds();
        if !bounds.is_drawable() {
            trace!("Surface not drawable, skipping frame");
            return;
        }

        surface.clear();
        self.field.advance(bounds);
        self.field.draw(surface);
        self.graph.refresh(self.field.particles());
        self.graph.draw(self.field.particles(), surface);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
