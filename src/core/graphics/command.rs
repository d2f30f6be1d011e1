//=========================================================================
// Draw Commands
//=========================================================================
//
// Canvas primitives forwarded to the host, one command per call.
//
// The set mirrors a 2D canvas context: style setters, path building,
// path painting, transforms, image blits and text.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Color;
use crate::core::host::ImageId;

//=== TextAlign ===========================================================

/// Horizontal anchor for text relative to its x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

//=== Rect ================================================================

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

//=== DrawCommand =========================================================

/// A single canvas primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    //--- Style ------------------------------------------------------------
    SetLineWidth(f64),
    SetFillStyle(Color),
    SetStrokeStyle(Color),
    SetFont { family: String, size: f64 },
    SetTextAlign(TextAlign),

    //--- Paths ------------------------------------------------------------
    BeginPath,
    ClosePath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Rect(Rect),
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Ellipse {
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start: f64,
        end: f64,
    },
    Stroke,
    Fill,

    //--- Immediate Rectangles ---------------------------------------------
    ClearRect(Rect),
    FillRect(Rect),

    //--- Transform Stack --------------------------------------------------
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    Rotate(f64),

    //--- Images -----------------------------------------------------------
    DrawImage { image: ImageId, x: f64, y: f64 },
    DrawImageRegion { image: ImageId, source: Rect, dest: Rect },

    //--- Text -------------------------------------------------------------
    FillText { text: String, x: f64, y: f64 },
    StrokeText { text: String, x: f64, y: f64 },
}
