// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and live engine
// indicators (theme, node/edge counts, frame interval).

use crate::app::config::DEFAULT_FRAME_MS;
use crate::app::AppState;
use crate::theme::{frame_interval_color, ALERT_RED, MUTED_TEXT, PULSE_GREEN, SIGNAL_BLUE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    // Calculate available width for hints (subtract borders and icon)
    let available_width = area.width.saturating_sub(4);

    struct Hint {
        priority: u8,
        key: &'static str,
        desc: &'static str,
        color: Color,
    }

    let hints = [
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit | ",
            color: ALERT_RED,
        },
        Hint {
            priority: 1,
            key: "T:",
            desc: "Theme | ",
            color: SIGNAL_BLUE,
        },
        Hint {
            priority: 2,
            key: "R:",
            desc: "Reseed | ",
            color: SIGNAL_BLUE,
        },
        Hint {
            priority: 2,
            key: "+/-:",
            desc: "Speed | ",
            color: SIGNAL_BLUE,
        },
    ];

    let mut spans = vec![Span::styled(" ◉ ", Style::default().fg(SIGNAL_BLUE))];
    let mut current_length = 3;

    // Add hints by priority until we run out of space
    for priority in 1..=2 {
        for hint in hints.iter().filter(|h| h.priority == priority) {
            let hint_length = hint.key.len() + hint.desc.len();
            if current_length + hint_length <= available_width as usize {
                spans.push(Span::styled(
                    hint.key,
                    Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(hint.desc));
                current_length += hint_length;
            }
        }
    }

    spans.push(Span::raw(" "));
    spans.extend(build_indicators(app, Instant::now()));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(SIGNAL_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Build engine indicator spans for the status bar
///
/// Shows [theme] [nodes:N] [edges:visible/total] [frame interval ~fps]
pub fn build_indicators(app: &AppState, now: Instant) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let label = Style::default().fg(MUTED_TEXT);
    let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    spans.push(Span::styled("[", label));
    spans.push(Span::styled(app.engine.theme().label(), value(SIGNAL_BLUE)));
    spans.push(Span::styled("] ", label));

    spans.push(Span::styled("[nodes:", label));
    spans.push(Span::styled(
        app.engine.field().len().to_string(),
        value(PULSE_GREEN),
    ));
    spans.push(Span::styled("] ", label));

    let graph = app.engine.graph();
    spans.push(Span::styled("[edges:", label));
    spans.push(Span::styled(
        format!("{}/{}", graph.visible().count(), graph.len()),
        value(PULSE_GREEN),
    ));
    spans.push(Span::styled("] ", label));

    let frame_ms = app.frame_config.frame_ms;
    let frame_color = frame_interval_color(
        frame_ms,
        DEFAULT_FRAME_MS,
        app.frame_config.recently_changed(now),
    );
    spans.push(Span::styled("[", label));
    spans.push(Span::styled(format!("{}ms", frame_ms), value(frame_color)));
    spans.push(Span::styled(
        format!(" ~{:.0}fps", app.measured_fps),
        if app.frames_lagging {
            value(ALERT_RED)
        } else {
            label
        },
    ));
    spans.push(Span::styled("]", label));

    spans
}
