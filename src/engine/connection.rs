// Connection graph
//
// Complete graph over the particle field. Edges are materialized once when
// the field is seeded; each frame only their distance and opacity change.
// Edges at or beyond the visibility threshold are skipped when drawing,
// which is what makes the dense graph read as sparse local links.

use super::particle::Particle;
use crate::surface::Surface;
use crate::theme::Palette;

/// An unordered particle pair with its per-frame visual weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Lower particle index
    pub a: usize,
    /// Higher particle index
    pub b: usize,
    distance: f64,
    opacity: f32,
}

impl Connection {
    fn new(a: usize, b: usize) -> Self {
        Self {
            a,
            b,
            distance: f64::INFINITY,
            opacity: 0.0,
        }
    }

    /// Euclidean distance as of the last refresh
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Opacity as of the last refresh
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// Opacity of an edge of length `distance`
///
/// Falls linearly from `max_opacity` at distance 0 to zero at `threshold`
/// and stays zero beyond it.
pub fn connection_opacity(distance: f64, threshold: f64, max_opacity: f32) -> f32 {
    if threshold <= 0.0 || distance >= threshold {
        return 0.0;
    }
    let closeness = (1.0 - distance / threshold).clamp(0.0, 1.0);
    (closeness as f32 * max_opacity).clamp(0.0, max_opacity)
}

/// Proximity relationships between every pair of particles
#[derive(Debug, Clone)]
pub struct ConnectionGraph {
    connections: Vec<Connection>,
    threshold: f64,
    line_width: f64,
    palette: Palette,
}

impl ConnectionGraph {
    /// Materialize all `N·(N-1)/2` pairs of `particles`
    ///
    /// Distances are computed immediately so the graph is drawable before
    /// the first refresh.
    pub fn build(particles: &[Particle], threshold: f64, line_width: f64, palette: Palette) -> Self {
        let n = particles.len();
        let mut connections = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in (a + 1)..n {
                connections.push(Connection::new(a, b));
            }
        }

        let mut graph = Self {
            connections,
            threshold,
            line_width,
            palette,
        };
        graph.refresh(particles);
        graph
    }

    /// Recompute distance and opacity of every connection
    ///
    /// Pairs that no longer index into `particles` are left as they are.
    pub fn refresh(&mut self, particles: &[Particle]) {
        let threshold = self.threshold;
        let max_opacity = self.palette.connection_max_opacity;

        for conn in &mut self.connections {
            let (Some(p), Some(q)) = (particles.get(conn.a), particles.get(conn.b)) else {
                continue;
            };
            let dx = p.x - q.x;
            let dy = p.y - q.y;
            conn.distance = (dx * dx + dy * dy).sqrt();
            conn.opacity = connection_opacity(conn.distance, threshold, max_opacity);
        }
    }

    /// Stroke every connection shorter than the threshold
    pub fn draw<S: Surface + ?Sized>(&self, particles: &[Particle], surface: &mut S) {
        for conn in self.visible() {
            let (Some(p), Some(q)) = (particles.get(conn.a), particles.get(conn.b)) else {
                continue;
            };
            surface.stroke_line(
                p.position(),
                q.position(),
                self.palette.connection_color(conn.opacity),
                self.line_width,
            );
        }
    }

    /// Connections currently below the visibility threshold
    pub fn visible(&self) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |c| self.is_drawable(c))
    }

    /// Whether a connection is short enough to be stroked
    pub fn is_drawable(&self, conn: &Connection) -> bool {
        conn.distance < self.threshold
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::particle::ParticleField;
    use crate::surface::{Bounds, DisplayList, Shape};
    use crate::theme::Theme;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle_at(x: f64, y: f64) -> Particle {
        let palette = Theme::Dark.palette();
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size: 1.0,
            radius: 1.0,
            pulse: None,
            color: palette.particles[0],
        }
    }

    fn field(count: usize, seed: u64) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::initialize(
            Bounds::new(800.0, 600.0),
            count,
            &Theme::Dark.palette(),
            &EngineConfig::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_build_complete_graph_count() {
        let f = field(80, 1);
        let graph = ConnectionGraph::build(f.particles(), 150.0, 0.5, Theme::Dark.palette());
        assert_eq!(graph.len(), 3160);
    }

    #[test]
    fn test_build_small_fields() {
        let palette = Theme::Dark.palette();
        assert!(ConnectionGraph::build(&[], 150.0, 0.5, palette).is_empty());
        assert!(ConnectionGraph::build(&[particle_at(1.0, 1.0)], 150.0, 0.5, palette).is_empty());

        let three = [
            particle_at(0.0, 0.0),
            particle_at(1.0, 0.0),
            particle_at(2.0, 0.0),
        ];
        let graph = ConnectionGraph::build(&three, 150.0, 0.5, palette);
        let pairs: Vec<_> = graph.connections().iter().map(|c| (c.a, c.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_refresh_never_changes_edge_count() {
        let mut f = field(30, 2);
        let mut graph = ConnectionGraph::build(f.particles(), 150.0, 0.5, Theme::Dark.palette());
        let before = graph.len();
        for _ in 0..100 {
            f.advance(Bounds::new(800.0, 600.0));
            graph.refresh(f.particles());
        }
        assert_eq!(graph.len(), before);
        assert_eq!(before, 30 * 29 / 2);
    }

    #[test]
    fn test_refresh_distance_and_opacity() {
        let palette = Theme::Dark.palette();
        let particles = [particle_at(0.0, 0.0), particle_at(30.0, 40.0)];
        let graph = ConnectionGraph::build(&particles, 100.0, 0.5, palette);
        let conn = graph.connections()[0];
        assert!((conn.distance() - 50.0).abs() < 1e-9);
        assert!((conn.opacity() - 0.5 * palette.connection_max_opacity).abs() < 1e-6);
        assert!(graph.is_drawable(&conn));
    }

    #[test]
    fn test_visible_matches_is_drawable() {
        let palette = Theme::Light.palette();
        let particles = [
            particle_at(0.0, 0.0),
            particle_at(60.0, 0.0),
            particle_at(0.0, 200.0),
        ];
        let graph = ConnectionGraph::build(&particles, 100.0, 0.5, palette);
        let expected = graph
            .connections()
            .iter()
            .filter(|c| graph.is_drawable(c))
            .count();
        assert_eq!(graph.visible().count(), expected);
        assert_eq!(expected, 1);
    }

    #[test]
    fn test_beyond_threshold_is_not_drawn() {
        let palette = Theme::Dark.palette();
        let particles = [
            particle_at(0.0, 0.0),
            particle_at(10.0, 0.0),
            particle_at(500.0, 0.0),
        ];
        let graph = ConnectionGraph::build(&particles, 150.0, 0.5, palette);
        assert_eq!(graph.visible().count(), 1);

        let mut list = DisplayList::new(Bounds::new(800.0, 600.0));
        graph.draw(&particles, &mut list);
        assert_eq!(list.line_count(), 1);
        match list.shapes()[0] {
            Shape::Line { from, to, width, .. } => {
                assert_eq!(from, (0.0, 0.0));
                assert_eq!(to, (10.0, 0.0));
                assert_eq!(width, 0.5);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_at_threshold_is_hidden() {
        let palette = Theme::Light.palette();
        let particles = [particle_at(0.0, 0.0), particle_at(150.0, 0.0)];
        let graph = ConnectionGraph::build(&particles, 150.0, 0.5, palette);
        assert_eq!(graph.connections()[0].opacity(), 0.0);
        assert_eq!(graph.visible().count(), 0);
    }

    #[test]
    fn test_refresh_skips_missing_particles() {
        let palette = Theme::Dark.palette();
        let particles = [
            particle_at(0.0, 0.0),
            particle_at(10.0, 0.0),
            particle_at(20.0, 0.0),
        ];
        let mut graph = ConnectionGraph::build(&particles, 150.0, 0.5, palette);
        graph.refresh(&particles[..1]);
        let mut list = DisplayList::new(Bounds::new(100.0, 100.0));
        graph.draw(&particles[..1], &mut list);
        assert_eq!(list.line_count(), 0);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_dense_field_has_visible_connections() {
        let mut f = field(80, 1234);
        let mut graph = ConnectionGraph::build(f.particles(), 150.0, 0.5, Theme::Dark.palette());
        f.advance(Bounds::new(800.0, 600.0));
        graph.refresh(f.particles());
        assert!(graph.visible().count() > 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_complete_graph_size(n in 0usize..120) {
            let particles: Vec<_> = (0..n).map(|i| particle_at(i as f64, 0.0)).collect();
            let graph = ConnectionGraph::build(&particles, 150.0, 0.5, Theme::Dark.palette());
            prop_assert_eq!(graph.len(), n * n.saturating_sub(1) / 2);
        }

        /// Opacity never increases as distance grows and is zero past the threshold
        #[test]
        fn prop_opacity_non_increasing(
            d1 in 0.0f64..400.0,
            delta in 0.0f64..400.0,
            threshold in 1.0f64..300.0,
            max_opacity in 0.0f32..1.0,
        ) {
            let d2 = d1 + delta;
            let o1 = connection_opacity(d1, threshold, max_opacity);
            let o2 = connection_opacity(d2, threshold, max_opacity);
            prop_assert!(o2 <= o1);
            prop_assert!((0.0..=max_opacity).contains(&o1));
            if d2 >= threshold {
                prop_assert_eq!(o2, 0.0);
            }
        }
    }
}
