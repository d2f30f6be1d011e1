//=========================================================================
// Graphics
//=========================================================================
//
// Drawing facade: colors, draw commands, and the bound surface.
//
//=========================================================================

mod color;
mod command;
mod surface;

pub use color::Color;
pub use command::{DrawCommand, Rect, TextAlign};
pub use surface::Surface;
