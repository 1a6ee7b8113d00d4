// Render loop
//
// Drives the engine at display cadence as an explicit state machine
// (Idle -> Running -> Stopped) holding a single pending frame handle. Each
// frame renders once and requests the next one; stopping cancels the pending
// request so no further frames are ever scheduled.

use crate::engine::NetworkEngine;
use crate::surface::Surface;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Identifies one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's "call me before the next repaint" primitive
pub trait FrameScheduler {
    /// Request one future frame callback
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested frame; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Lifecycle of a render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Built but not started
    #[default]
    Idle,
    /// Rendering and rescheduling every frame
    Running,
    /// Torn down; terminal state
    Stopped,
}

/// Per-surface animation driver
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    pending: Option<FrameHandle>,
    frames_rendered: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin animating: Idle -> Running and request the first frame
    ///
    /// Returns `false` (and does nothing) when already running or stopped.
    pub fn start<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> bool {
        if self.state != LoopState::Idle {
            debug!(state = ?self.state, "Render loop start ignored");
            return false;
        }
        self.state = LoopState::Running;
        self.pending = Some(scheduler.request_frame());
        debug!("Render loop started");
        true
    }

    /// Handle a fired frame callback
    ///
    /// Renders one frame and requests the next. Callbacks that are stale
    /// (not the pending handle) or arrive while not running are ignored.
    /// Returns whether a frame was rendered.
    pub fn on_frame<S, F>(
        &mut self,
        handle: FrameHandle,
        engine: &mut NetworkEngine,
        surface: &mut S,
        scheduler: &mut F,
    ) -> bool
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if !self.is_running() || self.pending != Some(handle) {
            trace!(handle = handle.0, state = ?self.state, "Ignoring stale frame");
            return false;
        }
        self.pending = None;

        engine.render_frame(surface);
        self.frames_rendered += 1;

        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Tear down: cancel the pending frame and enter Stopped
    ///
    /// Safe to call in any state and more than once.
    pub fn stop<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        if self.state != LoopState::Stopped {
            info!(frames = self.frames_rendered, "Render loop stopped");
        }
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// The frame currently requested from the scheduler, if any
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

/// Deadline-based frame scheduler for hosts without a native repaint signal
///
/// A requested frame becomes due one interval after the request. At most one
/// frame is outstanding; a new request replaces the previous one.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the cadence; applies to the next request
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// The pending frame if its deadline has passed at `now`
    pub fn due_at(&self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, deadline)) if now >= deadline => Some(handle),
            _ => None,
        }
    }

    /// How long the host may block waiting for events before the next frame
    ///
    /// With nothing pending the host can wait a full interval.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.pending {
            Some((_, deadline)) => deadline.saturating_duration_since(now),
            None => self.interval,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some((handle, Instant::now() + self.interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use crate::surface::{Bounds, DisplayList};
    use crate::theme::Theme;

    /// Scheduler double that records every request and cancellation
    #[derive(Default)]
    struct RecordingScheduler {
        next_id: u64,
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl RecordingScheduler {
        /// Requested frames that were never cancelled
        fn outstanding(&self) -> Vec<FrameHandle> {
            self.requested
                .iter()
                .filter(|h| !self.cancelled.contains(h))
                .copied()
                .collect()
        }
    }

    impl FrameScheduler for RecordingScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next_id += 1;
            let handle = FrameHandle(self.next_id);
            self.requested.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    fn engine_and_surface() -> (NetworkEngine, DisplayList) {
        let bounds = Bounds::new(320.0, 240.0);
        let config = EngineConfig {
            seed: Some(8),
            particle_count: 15,
            ..Default::default()
        };
        (
            NetworkEngine::new(config, Theme::Dark, bounds),
            DisplayList::new(bounds),
        )
    }

    #[test]
    fn test_initial_state_is_idle() {
        let render_loop = RenderLoop::new();
        assert_eq!(render_loop.state(), LoopState::Idle);
        assert_eq!(render_loop.pending(), None);
    }

    #[test]
    fn test_start_requests_first_frame() {
        let mut scheduler = RecordingScheduler::default();
        let mut render_loop = RenderLoop::new();

        assert!(render_loop.start(&mut scheduler));
        assert_eq!(render_loop.state(), LoopState::Running);
        assert_eq!(scheduler.requested.len(), 1);

        // Second start is ignored
        assert!(!render_loop.start(&mut scheduler));
        assert_eq!(scheduler.requested.len(), 1);
    }

    #[test]
    fn test_each_frame_reschedules_once() {
        let mut scheduler = RecordingScheduler::default();
        let (mut engine, mut surface) = engine_and_surface();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);

        for _ in 0..5 {
            let handle = render_loop.pending().expect("frame pending");
            assert!(render_loop.on_frame(handle, &mut engine, &mut surface, &mut scheduler));
        }

        assert_eq!(render_loop.frames_rendered(), 5);
        assert_eq!(scheduler.requested.len(), 6);
        assert_eq!(surface.circle_count(), 15);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut scheduler = RecordingScheduler::default();
        let (mut engine, mut surface) = engine_and_surface();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);

        let rendered = render_loop.on_frame(FrameHandle(999), &mut engine, &mut surface, &mut scheduler);
        assert!(!rendered);
        assert_eq!(render_loop.frames_rendered(), 0);
        assert_eq!(scheduler.requested.len(), 1);
    }

    #[test]
    fn test_frame_before_start_is_ignored() {
        let mut scheduler = RecordingScheduler::default();
        let (mut engine, mut surface) = engine_and_surface();
        let mut render_loop = RenderLoop::new();

        assert!(!render_loop.on_frame(FrameHandle(1), &mut engine, &mut surface, &mut scheduler));
        assert!(scheduler.requested.is_empty());
    }

    #[test]
    fn test_stop_leaves_no_scheduled_frame() {
        let mut scheduler = RecordingScheduler::default();
        let (mut engine, mut surface) = engine_and_surface();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);

        let handle = render_loop.pending().expect("frame pending");
        render_loop.on_frame(handle, &mut engine, &mut surface, &mut scheduler);
        let last = render_loop.pending().expect("frame pending");

        render_loop.stop(&mut scheduler);

        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert_eq!(render_loop.pending(), None);
        assert_eq!(scheduler.cancelled, vec![last]);
        // Every frame requested was either consumed or cancelled
        assert_eq!(scheduler.outstanding(), vec![handle]);

        // A callback that was already in flight does not revive the loop
        let requested_before = scheduler.requested.len();
        assert!(!render_loop.on_frame(last, &mut engine, &mut surface, &mut scheduler));
        assert_eq!(scheduler.requested.len(), requested_before);

        // Stopped is terminal
        assert!(!render_loop.start(&mut scheduler));
        assert_eq!(scheduler.requested.len(), requested_before);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = RecordingScheduler::default();
        let mut render_loop = RenderLoop::new();
        render_loop.stop(&mut scheduler);
        render_loop.stop(&mut scheduler);
        assert_eq!(render_loop.state(), LoopState::Stopped);
        assert!(scheduler.cancelled.is_empty());
    }

    #[test]
    fn test_interval_scheduler_deadline() {
        let interval = Duration::from_millis(50);
        let mut scheduler = IntervalScheduler::new(interval);
        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.due_at(Instant::now()), None);

        let before = Instant::now();
        let handle = scheduler.request_frame();
        let after = Instant::now();
        assert!(scheduler.has_pending());

        // The deadline lies between before + interval and after + interval
        assert_eq!(scheduler.due_at(before), None);
        assert!(scheduler.time_until_next(after) <= interval);
        assert!(scheduler.time_until_next(before) >= interval);
        assert_eq!(
            scheduler.time_until_next(after + interval + Duration::from_millis(1)),
            Duration::ZERO
        );
        assert_eq!(
            scheduler.due_at(after + interval + Duration::from_millis(1)),
            Some(handle)
        );
    }

    #[test]
    fn test_interval_scheduler_cancel() {
        let mut scheduler = IntervalScheduler::new(Duration::from_millis(0));
        let old = scheduler.request_frame();
        let current = scheduler.request_frame();
        assert_ne!(old, current);

        // Cancelling a superseded handle leaves the current request alone
        scheduler.cancel_frame(old);
        assert!(scheduler.has_pending());

        scheduler.cancel_frame(current);
        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.due_at(Instant::now() + Duration::from_secs(1)), None);
        assert_eq!(scheduler.time_until_next(Instant::now()), Duration::from_millis(0));
    }

    #[test]
    fn test_render_loop_with_interval_scheduler_stops_cleanly() {
        let mut scheduler = IntervalScheduler::new(Duration::from_millis(0));
        let (mut engine, mut surface) = engine_and_surface();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);

        for _ in 0..3 {
            let handle = scheduler
                .due_at(Instant::now() + Duration::from_millis(1))
                .expect("frame due");
            render_loop.on_frame(handle, &mut engine, &mut surface, &mut scheduler);
        }
        assert_eq!(render_loop.frames_rendered(), 3);

        render_loop.stop(&mut scheduler);
        assert!(!scheduler.has_pending());
    }
}
