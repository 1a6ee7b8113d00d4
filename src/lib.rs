//! Neuromesh - ambient particle-network background renderer.
//!
//! A field of drifting particles on a toroidal surface, joined by edges
//! that fade in as particles approach each other. The engine draws through
//! the [`surface::Surface`] trait; the bundled host paints it onto a
//! ratatui canvas.

pub mod app;
pub mod engine;
pub mod render_loop;
pub mod surface;
pub mod theme;
pub mod ui;
pub mod viewport;

pub use engine::{ConfigError, EngineConfig, NetworkEngine};
pub use render_loop::{FrameHandle, FrameScheduler, IntervalScheduler, LoopState, RenderLoop};
pub use surface::{Bounds, DisplayList, Shape, Surface};
pub use theme::{Palette, Rgba, Theme};
pub use viewport::{Container, TerminalContainer, ViewportAdapter};
