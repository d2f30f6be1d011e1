//=========================================================================
// momo — Library Root
//
// A minimal 2D multimedia helper: one drawing surface, polled keyboard
// and pointer input, image/sound/font loading with a readiness gate, and
// a fixed-rate frame loop.
//
// Typical usage:
// ```no_run
// use momo::{EngineBuilder, HeadlessHost};
//
// fn main() -> Result<(), momo::MomoError> {
//     EngineBuilder::new()
//         .with_frame_rate(60)
//         .build(HeadlessHost::new().with_surface("screen"))?
//         .run(|ctx| {
//             let _ = ctx.bind_surface("screen", 800, 600);
//             ctx.install_keyboard();
//         })
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every platform-independent system: input, resources,
// frame loop, drawing and audio facades, and the `Context` owning them.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` holds the Winit integration (window, event loop, input
// conversion). Only its headless host is public.
//
// `engine` defines the builder and the run entry point.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::{Context, MomoError};
pub use engine::{Engine, EngineBuilder};
pub use platform::headless::{HeadlessHost, SoundState, DEFAULT_COMMAND_LIMIT};
