//=========================================================================
// Core
//
// Platform-independent systems owned by the application context.
//
// Responsibilities:
// - Input state tracking with per-tick edge detection (`input`)
// - Resource handles and the readiness gate (`resources`)
// - Fixed-rate tick scheduling (`frame_loop`)
// - Drawing and audio facades over host capabilities (`graphics`, `audio`)
// - The `Context` tying them together
//
// Notes:
// Nothing here touches the OS directly. Every external capability goes
// through the traits in `host`, implemented by the platform layer.
//
//=========================================================================

//=== Modules =============================================================

pub mod audio;
pub mod context;
pub mod error;
pub mod frame_loop;
pub mod graphics;
pub mod host;
pub mod input;
pub mod resources;

//=== Public API ==========================================================

pub use context::Context;
pub use error::{MomoError, PlatformError};
