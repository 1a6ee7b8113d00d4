// Viewport adapter
//
// Keeps a surface's backing size matched to its container. Syncs once at
// mount and again on every resize event while subscribed. Resizing never
// touches particle state; out-of-range particles are wrapped back by the
// field on its next advance.

use crate::surface::{Bounds, Surface};
use tracing::{debug, warn};

/// Nominal pixel width of one terminal column
pub const CELL_WIDTH_PX: f64 = 8.0;

/// Nominal pixel height of one terminal row
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Something with a measurable on-screen size
pub trait Container {
    /// Current rendered size, or `None` when not measurable yet
    fn measure(&self) -> Option<Bounds>;
}

/// The terminal window as a container
///
/// Converts cells to nominal pixels after reserving rows for the chrome
/// drawn below the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalContainer {
    pub cols: u16,
    pub rows: u16,
    pub reserved_rows: u16,
}

impl TerminalContainer {
    pub fn new(cols: u16, rows: u16, reserved_rows: u16) -> Self {
        Self {
            cols,
            rows,
            reserved_rows,
        }
    }

    /// Record a new terminal size (from a resize event)
    pub fn set_size(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Rows available to the canvas
    pub fn canvas_rows(&self) -> u16 {
        self.rows.saturating_sub(self.reserved_rows)
    }
}

impl Container for TerminalContainer {
    fn measure(&self) -> Option<Bounds> {
        let rows = self.canvas_rows();
        if self.cols == 0 || rows == 0 {
            return None;
        }
        Some(Bounds::new(
            self.cols as f64 * CELL_WIDTH_PX,
            rows as f64 * CELL_HEIGHT_PX,
        ))
    }
}

/// Resize-listener state of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subscription {
    #[default]
    Unsubscribed,
    Subscribed,
}

/// Synchronizes a surface's bounds with its container
#[derive(Debug, Default)]
pub struct ViewportAdapter {
    subscription: Subscription,
}

impl ViewportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the container's measured size onto the surface
    ///
    /// Returns `false` and leaves the surface untouched when the container
    /// cannot be measured or measures below 1×1.
    pub fn sync_to_container<S, C>(&mut self, surface: &mut S, container: &C) -> bool
    where
        S: Surface + ?Sized,
        C: Container + ?Sized,
    {
        let Some(bounds) = container.measure() else {
            debug!("Container not measurable yet, skipping viewport sync");
            return false;
        };
        if !bounds.is_drawable() {
            debug!(
                width = bounds.width,
                height = bounds.height,
                "Container too small, skipping viewport sync"
            );
            return false;
        }

        surface.set_bounds(bounds);
        debug!(
            width = bounds.width,
            height = bounds.height,
            "Viewport synced to container"
        );
        true
    }

    /// Start listening for resize events
    pub fn subscribe(&mut self) {
        self.subscription = Subscription::Subscribed;
    }

    /// Stop listening; later resize events are ignored
    pub fn unsubscribe(&mut self) {
        if self.subscription == Subscription::Subscribed {
            debug!("Resize listener removed");
        }
        self.subscription = Subscription::Unsubscribed;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription == Subscription::Subscribed
    }

    /// Resize-event handler; syncs only while subscribed
    pub fn on_resize<S, C>(&mut self, surface: &mut S, container: &C) -> bool
    where
        S: Surface + ?Sized,
        C: Container + ?Sized,
    {
        if !self.is_subscribed() {
            warn!("Resize event delivered to an unsubscribed viewport");
            return false;
        }
        self.sync_to_container(surface, container)
    }
}
