// UI rendering module
//
// This module contains the terminal rendering of a mounted background.
// The main draw() function lays out the network canvas and the status bar.

mod network;
mod status_bar;

use crate::app::{AppState, STATUS_BAR_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use network::render_network;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &AppState) {
    let size = f.area();

    // Canvas above, status bar below; the container reserves the same rows
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(size);

    render_network(f, chunks[0], app);
    render_status_bar(f, chunks[1], app);
}
