//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use momo::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine and context
pub use crate::core::{Context, MomoError};
pub use crate::engine::{Engine, EngineBuilder};

// Input
pub use crate::core::input::{InputEvent, KeyCode, MouseButton};

// Resources
pub use crate::core::resources::{FontHandle, ImageHandle, SoundHandle};

// Drawing
pub use crate::core::graphics::{Color, Rect, Surface, TextAlign};

// Hosts
pub use crate::core::host::{Host, Playback};
pub use crate::platform::headless::HeadlessHost;
