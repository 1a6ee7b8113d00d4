// Network canvas rendering module
//
// Paints the retained display list onto a Braille canvas. Surface
// coordinates grow downward while canvas coordinates grow upward, so every
// y is flipped against the surface height. Opacity is composited over the
// palette background since terminal cells have no alpha.

use crate::app::AppState;
use crate::surface::{Bounds, Shape, Surface};
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    Frame,
};

/// Pixel size of one Braille dot (8×16 px cell split into 2×4 dots)
const DOT_SIZE_PX: f64 = 4.0;

pub fn render_network(f: &mut Frame, area: Rect, app: &AppState) {
    let bounds = app.surface.bounds();
    let background = app.engine.palette().background;
    let shapes = app.surface.shapes();

    let canvas = Canvas::default()
        .background_color(Color::Rgb(background.0, background.1, background.2))
        .marker(Marker::Braille)
        .x_bounds([0.0, bounds.width.max(1.0)])
        .y_bounds([0.0, bounds.height.max(1.0)])
        .paint(move |ctx| {
            // Edges first so nodes sit on top of them
            for shape in shapes.iter().filter(|s| matches!(s, Shape::Line { .. })) {
                paint_shape(ctx, shape, bounds, background);
            }
            for shape in shapes.iter().filter(|s| matches!(s, Shape::Circle { .. })) {
                paint_shape(ctx, shape, bounds, background);
            }
        });

    f.render_widget(canvas, area);
}

/// Draw one retained shape; points outside the canvas are clipped by ratatui
fn paint_shape(ctx: &mut Context, shape: &Shape, bounds: Bounds, background: (u8, u8, u8)) {
    match *shape {
        Shape::Circle {
            x,
            y,
            radius,
            color,
        } => {
            let color = color.over(background);
            let (x, y) = to_canvas((x, y), bounds);
            ctx.draw(&Points {
                coords: &[(x, y)],
                color,
            });
            // Radii below one dot render as the single point above
            if radius >= DOT_SIZE_PX {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius,
                    color,
                });
            }
        }
        // Braille lines are one dot wide whatever the stroke width
        Shape::Line {
            from, to, color, ..
        } => {
            let (x1, y1) = to_canvas(from, bounds);
            let (x2, y2) = to_canvas(to, bounds);
            ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color: color.over(background),
            });
        }
    }
}

/// Surface (y down) to canvas (y up) coordinates
fn to_canvas(point: (f64, f64), bounds: Bounds) -> (f64, f64) {
    (point.0, bounds.height - point.1)
}
