// Application state management
//
// AppState is one mount of the particle-network background: engine, surface,
// render loop, viewport adapter and the frame scheduler that drives them.
// Mounting measures the container and seeds the field; unmounting stops the
// loop and removes the resize listener.

pub mod config;
pub mod event;

pub use config::{FrameConfig, STATUS_BAR_HEIGHT};

use crate::engine::{EngineConfig, NetworkEngine};
use crate::render_loop::{IntervalScheduler, LoopState, RenderLoop};
use crate::surface::{Bounds, DisplayList, Surface};
use crate::theme::Theme;
use crate::viewport::{TerminalContainer, ViewportAdapter};
use config::{FPS_SMOOTHING, SLOW_FRAME_COUNT_THRESHOLD, SLOW_FRAME_THRESHOLD_MS};
use std::time::Instant;

/// Main application state
pub struct AppState {
    /// Whether the application is running
    pub running: bool,

    /// Particle field + connection graph
    pub engine: NetworkEngine,

    /// Retained drawing surface painted by the UI each frame
    pub surface: DisplayList,

    /// Animation driver
    pub render_loop: RenderLoop,

    /// Keeps `surface` sized to `container`
    pub viewport: ViewportAdapter,

    /// The terminal window the canvas lives in
    pub container: TerminalContainer,

    /// Frame-deadline source for the render loop
    pub scheduler: IntervalScheduler,

    /// Frame cadence
    pub frame_config: FrameConfig,

    /// Smoothed frames per second, for display
    pub measured_fps: f32,

    /// Whether frame times have been consistently slow
    pub frames_lagging: bool,

    /// Timestamp of the last rendered frame
    last_frame_time: Option<Instant>,

    /// Counter for consecutive slow frames
    slow_frame_count: u32,
}

impl AppState {
    /// Mount a background onto `container`
    ///
    /// Syncs the surface to the container, subscribes to resize events and
    /// seeds the field inside the measured bounds. If the container is not
    /// measurable yet the surface stays empty until the first resize.
    pub fn mount(
        engine_config: EngineConfig,
        theme: Theme,
        container: TerminalContainer,
        frame_config: FrameConfig,
    ) -> Self {
        let mut surface = DisplayList::new(Bounds::ZERO);
        let mut viewport = ViewportAdapter::new();
        viewport.sync_to_container(&mut surface, &container);
        viewport.subscribe();

        let engine = NetworkEngine::new(engine_config, theme, surface.bounds());
        let scheduler = IntervalScheduler::new(frame_config.interval());

        tracing::debug!(
            cols = container.cols,
            rows = container.rows,
            particles = engine.field().len(),
            "Mounted particle background"
        );

        Self {
            running: true,
            engine,
            surface,
            render_loop: RenderLoop::new(),
            viewport,
            container,
            scheduler,
            frame_config,
            measured_fps: 0.0,
            frames_lagging: false,
            last_frame_time: None,
            slow_frame_count: 0,
        }
    }

    /// Start animating (Idle -> Running)
    pub fn start(&mut self) -> bool {
        self.render_loop.start(&mut self.scheduler)
    }

    /// Render the pending frame if it is due at `now`
    ///
    /// Returns whether a frame was rendered.
    pub fn on_frame_due(&mut self, now: Instant) -> bool {
        let Some(handle) = self.scheduler.due_at(now) else {
            return false;
        };
        let rendered = self.render_loop.on_frame(
            handle,
            &mut self.engine,
            &mut self.surface,
            &mut self.scheduler,
        );
        if rendered {
            self.update_frame_time(now);
        }
        rendered
    }

    /// Terminal resize event
    ///
    /// Resizes only the surface; particles keep their positions and wrap
    /// into the new bounds on the next frame. The one exception is the first
    /// usable size after mounting into an unmeasurable container, which
    /// re-seeds the field.
    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.container.set_size(cols, rows);
        let was_drawable = self.surface.bounds().is_drawable();
        let synced = self.viewport.on_resize(&mut self.surface, &self.container);

        // A field seeded before the container was measurable sits at the
        // origin; give it real coordinates on the first usable size.
        if synced && !was_drawable {
            self.engine.reseed(self.surface.bounds());
        }
    }

    /// Switch between light and dark palettes (re-seeds the field)
    pub fn toggle_theme(&mut self) {
        let theme = self.engine.theme().toggled();
        self.engine.set_theme(theme, self.surface.bounds());
    }

    /// Replace the field with a freshly seeded one
    pub fn reseed(&mut self) {
        self.engine.reseed(self.surface.bounds());
    }

    /// Shorten the frame interval
    pub fn increase_frame_rate(&mut self) {
        self.frame_config.faster();
        self.scheduler.set_interval(self.frame_config.interval());
    }

    /// Lengthen the frame interval
    pub fn decrease_frame_rate(&mut self) {
        self.frame_config.slower();
        self.scheduler.set_interval(self.frame_config.interval());
    }

    /// Tear down: stop the render loop and remove the resize listener
    pub fn unmount(&mut self) {
        self.render_loop.stop(&mut self.scheduler);
        self.viewport.unsubscribe();
        self.running = false;
    }

    /// Update frame time tracking
    ///
    /// Counts consecutive frames slower than SLOW_FRAME_THRESHOLD_MS and
    /// reports once when the count reaches SLOW_FRAME_COUNT_THRESHOLD.
    fn update_frame_time(&mut self, now: Instant) {
        let Some(last) = self.last_frame_time.replace(now) else {
            return;
        };
        let frame_time = now.duration_since(last);
        let frame_ms = frame_time.as_millis();

        if frame_time.as_secs_f32() > 0.0 {
            let fps = 1.0 / frame_time.as_secs_f32();
            self.measured_fps = if self.measured_fps == 0.0 {
                fps
            } else {
                self.measured_fps * (1.0 - FPS_SMOOTHING) + fps * FPS_SMOOTHING
            };
        }

        if frame_ms > SLOW_FRAME_THRESHOLD_MS {
            self.slow_frame_count += 1;
            if self.slow_frame_count >= SLOW_FRAME_COUNT_THRESHOLD && !self.frames_lagging {
                self.frames_lagging = true;
                tracing::info!(
                    frame_time_ms = frame_ms,
                    slow_frame_count = self.slow_frame_count,
                    connections = self.engine.graph().len(),
                    "Frames are consistently slower than the target interval"
                );
            }
        } else {
            self.slow_frame_count = 0;
            self.frames_lagging = false;
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if self.render_loop.state() != LoopState::Stopped {
            self.unmount();
        }
    }
}
