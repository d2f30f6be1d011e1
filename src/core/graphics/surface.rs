//=========================================================================
// Surface
//=========================================================================
//
// Drawing facade over a bound canvas.
//
// Every shape call sets the shared style (fill, stroke, line width) and
// then forwards one or more primitives. Nothing is retained between calls
// besides what the canvas itself keeps.
//
// Rectangles and triangles are given by corners; circles and arcs by
// center and radius; angles are in radians.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f64::consts::TAU;
use std::fmt;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Color, DrawCommand, Rect, TextAlign};
use crate::core::host::Canvas;
use crate::core::resources::{FontHandle, ImageHandle};

//=== Surface =============================================================

/// A bound drawing surface.
pub struct Surface {
    element_id: String,
    width: u32,
    height: u32,
    canvas: Box<dyn Canvas>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("element_id", &self.element_id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Wraps `canvas` and sizes it to `width` x `height`.
    pub(crate) fn new(
        element_id: &str,
        width: u32,
        height: u32,
        mut canvas: Box<dyn Canvas>,
    ) -> Self {
        canvas.resize(width, height);
        Self {
            element_id: element_id.to_owned(),
            width,
            height,
            canvas,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    //--- Style ------------------------------------------------------------

    /// Sets fill and stroke to `color` and the line width to `thickness`.
    pub fn set_style(&mut self, color: Color, thickness: f64) {
        self.emit(DrawCommand::SetLineWidth(thickness));
        self.emit(DrawCommand::SetFillStyle(color));
        self.emit(DrawCommand::SetStrokeStyle(color));
    }

    //--- Clearing ---------------------------------------------------------

    /// Wipes the surface and paints it with `color`.
    pub fn clear(&mut self, color: Color) {
        let whole = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        self.set_style(color, 1.0);
        self.emit(DrawCommand::ClearRect(whole));
        self.emit(DrawCommand::FillRect(whole));
    }

    //--- Primitives -------------------------------------------------------

    pub fn draw_pixel(&mut self, x: f64, y: f64, color: Color) {
        self.draw_filled_rectangle(x, y, x + 1.0, y + 1.0, color);
    }

    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, thickness: f64) {
        self.set_style(color, thickness);
        self.emit(DrawCommand::BeginPath);
        self.emit(DrawCommand::MoveTo { x: x1, y: y1 });
        self.emit(DrawCommand::LineTo { x: x2, y: y2 });
        self.emit(DrawCommand::ClosePath);
        self.emit(DrawCommand::Stroke);
    }

    /// Outlines the rectangle with corners `(x1, y1)` and `(x2, y2)`.
    pub fn draw_rectangle(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        thickness: f64,
    ) {
        self.set_style(color, thickness);
        self.emit(DrawCommand::BeginPath);
        self.emit(DrawCommand::Rect(corners(x1, y1, x2, y2)));
        self.emit(DrawCommand::ClosePath);
        self.emit(DrawCommand::Stroke);
    }

    pub fn draw_filled_rectangle(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.set_style(color, 1.0);
        self.emit(DrawCommand::BeginPath);
        self.emit(DrawCommand::Rect(corners(x1, y1, x2, y2)));
        self.emit(DrawCommand::ClosePath);
        self.emit(DrawCommand::Fill);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        color: Color,
        thickness: f64,
    ) {
        self.set_style(color, thickness);
        self.trace_path(&[x1, y1, x2, y2, x3, y3], true);
        self.emit(DrawCommand::Stroke);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_filled_triangle(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        color: Color,
    ) {
        self.set_style(color, 1.0);
        self.trace_path(&[x1, y1, x2, y2, x3, y3], true);
        self.emit(DrawCommand::Fill);
    }

    /// Strokes an arc from `start` to `end` radians. The path is closed, so a
    /// partial arc also draws the chord between its ends.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        color: Color,
        thickness: f64,
    ) {
        self.set_style(color, thickness);
        self.emit(DrawCommand::BeginPath);
        self.emit(DrawCommand::Arc { x, y, radius, start, end });
        self.emit(DrawCommand::ClosePath);
        self.emit(DrawCommand::Stroke);
    }

    pub fn draw_filled_arc(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        color: Color,
    ) {
        self.set_style(color, 1.0);
        self.emit(DrawCommand::BeginPath);
        self.emit(DrawCommand::Arc { x, y, radius, start, end });
        self.emit(DrawCommand::ClosePath);
        self.emit(DrawCommand::Fill);
    }

    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, thickness: f64) {
        self.draw_arc(x, y, radius, 0.0, TAU, color, thickness);
    }

    pub fn draw_filled_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.draw_filled_arc(x, y, radius, 0.0, TAU, color);
    }

    pub fn draw_ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        color: Color,
        thickness: f64,
    ) {
        self.set_style(color, thickness);
        self.emit(DrawCommand::BeginPath);
        self.emit(ellipse(x, y, radius_x, radius_y));
        self.emit(DrawCommand::ClosePath);
        self.emit(DrawCommand::Stroke);
    }

    pub fn draw_filled_ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        color: Color,
    ) {
        self.set_style(color, 1.0);
        self.emit(DrawCommand::BeginPath);
        self.emit(ellipse(x, y, radius_x, radius_y));
        self.emit(DrawCommand::ClosePath);
        self.emit(DrawCommand::Fill);
    }

    /// Strokes a polyline through `points` given as flat `x, y` pairs.
    ///
    /// `join` closes the path back to the first point. A trailing unpaired
    /// coordinate is ignored.
    pub fn draw_polygon(&mut self, points: &[f64], color: Color, thickness: f64, join: bool) {
        self.set_style(color, thickness);
        self.trace_path(points, join);
        self.emit(DrawCommand::Stroke);
    }

    /// Fills the closed polygon through `points` given as flat `x, y` pairs.
    pub fn draw_filled_polygon(&mut self, points: &[f64], color: Color) {
        self.set_style(color, 1.0);
        self.trace_path(points, true);
        self.emit(DrawCommand::Fill);
    }

    //--- Images -----------------------------------------------------------

    pub fn draw_image(&mut self, image: &ImageHandle, x: f64, y: f64) {
        self.emit(DrawCommand::DrawImage { image: image.id(), x, y });
    }

    /// Draws `image` at `(x, y)` scaled by `sx`, `sy`.
    pub fn draw_scaled_image(&mut self, image: &ImageHandle, x: f64, y: f64, sx: f64, sy: f64) {
        self.emit(DrawCommand::Save);
        self.emit(DrawCommand::Translate { x, y });
        self.emit(DrawCommand::Scale { x: sx, y: sy });
        self.emit(DrawCommand::DrawImage { image: image.id(), x: 0.0, y: 0.0 });
        self.emit(DrawCommand::Restore);
    }

    /// Copies the `source` region of `image` to `(x, y)` at its original size.
    pub fn draw_partial_image(&mut self, image: &ImageHandle, source: Rect, x: f64, y: f64) {
        let dest = Rect::new(x, y, source.width, source.height);
        self.emit(DrawCommand::Save);
        self.emit(DrawCommand::DrawImageRegion { image: image.id(), source, dest });
        self.emit(DrawCommand::Restore);
    }

    /// Draws `image` at `(x, y)` rotated by `angle` radians about its local
    /// point `(cx, cy)`.
    pub fn draw_rotated_image(
        &mut self,
        image: &ImageHandle,
        x: f64,
        y: f64,
        cx: f64,
        cy: f64,
        angle: f64,
    ) {
        self.emit(DrawCommand::Save);
        self.emit(DrawCommand::Translate { x: x + cx, y: y + cy });
        self.emit(DrawCommand::Rotate(angle));
        self.emit(DrawCommand::DrawImage { image: image.id(), x: -cx, y: -cy });
        self.emit(DrawCommand::Restore);
    }

    //--- Text -------------------------------------------------------------

    /// Draws `text` with its top at `y` (the baseline sits at `y + size`).
    ///
    /// `outline` strokes the glyphs with the given color and width; a width
    /// of zero or less draws no outline.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        font: &FontHandle,
        size: f64,
        x: f64,
        y: f64,
        text: &str,
        color: Color,
        align: TextAlign,
        outline: Option<(Color, f64)>,
    ) {
        let baseline = y + size;

        self.emit(DrawCommand::SetFont {
            family: font.family().to_owned(),
            size,
        });
        self.emit(DrawCommand::SetTextAlign(align));
        self.set_style(color, 1.0);
        self.emit(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y: baseline,
        });

        if let Some((outline_color, width)) = outline {
            if width > 0.0 {
                self.set_style(outline_color, width);
                self.emit(DrawCommand::StrokeText {
                    text: text.to_owned(),
                    x,
                    y: baseline,
                });
            }
        }
    }

    /// Draws an empty string so the host resolves the font ahead of use.
    pub(crate) fn prewarm_font(&mut self, font: &FontHandle) {
        trace!(target: "momo::graphics", "Prewarming font {}", font.family());
        self.emit(DrawCommand::SetFont {
            family: font.family().to_owned(),
            size: 1.0,
        });
        self.emit(DrawCommand::FillText {
            text: String::new(),
            x: 0.0,
            y: 0.0,
        });
    }

    //--- Internal ---------------------------------------------------------

    fn trace_path(&mut self, points: &[f64], close: bool) {
        self.emit(DrawCommand::BeginPath);

        let mut pairs = points.chunks_exact(2);
        if let Some(first) = pairs.next() {
            self.emit(DrawCommand::MoveTo { x: first[0], y: first[1] });
            for pair in pairs {
                self.emit(DrawCommand::LineTo { x: pair[0], y: pair[1] });
            }
        }

        if close {
            self.emit(DrawCommand::ClosePath);
        }
    }

    fn emit(&mut self, command: DrawCommand) {
        self.canvas.execute(command);
    }
}

//=== Helpers =============================================================

fn corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
    Rect::new(x1, y1, x2 - x1, y2 - y1)
}

fn ellipse(x: f64, y: f64, radius_x: f64, radius_y: f64) -> DrawCommand {
    DrawCommand::Ellipse {
        x,
        y,
        radius_x,
        radius_y,
        rotation: 0.0,
        start: 0.0,
        end: TAU,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
