//=========================================================================
// Host Interface
//=========================================================================
//
// Traits the context uses to reach the outside world: drawing surfaces,
// image and font loading, and audio playback.
//
// Architecture:
//   Context ──► Host (SurfaceHost + MediaHost + AudioHost)
//                 ├── window renderer (attached to the platform window)
//                 └── HeadlessHost (tests, offscreen)
//
// Loaders never block. They take a `Completion` and fill it when the
// resource is usable, from whatever thread does the loading.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;
use std::sync::Arc;

use winit::raw_window_handle::{HasDisplayHandle, HasWindowHandle};

//=== Internal Dependencies ===============================================

use crate::core::graphics::DrawCommand;
use crate::core::input::EventKind;
use crate::core::resources::{Completion, ImageInfo};

//=== Identifiers =========================================================

/// Host-assigned identifier for a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

/// Host-assigned identifier for a loaded sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundId(pub u32);

//=== Playback ============================================================

/// Parameters for starting a sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    /// `0.0` (silent) to `1.0` (full).
    pub volume: f32,
    /// Playback rate, `1.0` is normal speed.
    pub speed: f32,
    pub looping: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            volume: 1.0,
            speed: 1.0,
            looping: false,
        }
    }
}

//=== Canvas ==============================================================

/// A 2D drawing target bound to one surface.
pub trait Canvas {
    /// Sets the backing size in pixels.
    fn resize(&mut self, width: u32, height: u32);

    fn execute(&mut self, command: DrawCommand);
}

//=== HostWindow ==========================================================

/// The OS window a host renders into.
///
/// The raw handles let a renderer build a presentable surface from it
/// (softbuffer, wgpu and similar take anything with both handles).
pub trait HostWindow: HasWindowHandle + HasDisplayHandle {
    /// Inner size in physical pixels.
    fn inner_size(&self) -> (u32, u32);

    fn scale_factor(&self) -> f64;

    /// Schedules a redraw; the platform answers it with
    /// [`SurfaceHost::present`].
    fn request_redraw(&self);

    fn set_cursor_visible(&self, visible: bool);
}

//=== SurfaceHost =========================================================

pub trait SurfaceHost {
    /// Whether the host can provide 2D drawing at all.
    fn supports_canvas(&self) -> bool {
        true
    }

    /// Looks up the surface named `element_id`.
    fn acquire_surface(&mut self, element_id: &str) -> Option<Box<dyn Canvas>>;

    /// Receives the platform window once it exists, before the entry point
    /// runs. Surfaces acquired afterwards draw into it.
    fn attach_window(&mut self, _window: Arc<dyn HostWindow>) {}

    /// Shows everything drawn since the last call.
    fn present(&mut self) {}

    /// Stops the host's own handling of these event kinds (context menu,
    /// page scroll, focus moves) while momo consumes them.
    fn suppress_defaults(&mut self, _kinds: &[EventKind]) {}

    /// Hands these event kinds back to the host.
    fn restore_defaults(&mut self, _kinds: &[EventKind]) {}
}

//=== MediaHost ===========================================================

pub trait MediaHost {
    /// Starts decoding an image. `done` fires with its dimensions.
    fn load_image(&mut self, path: &Path, done: Completion<ImageInfo>) -> ImageId;

    /// Makes the font at `path` available under `family`.
    fn register_font(&mut self, path: &Path, family: &str);
}

//=== AudioHost ===========================================================

pub trait AudioHost {
    /// Whether audio of the given MIME type can be decoded.
    fn can_play_type(&self, mime: &str) -> bool;

    /// Starts buffering a sound. `done` fires once it can play through.
    fn load_sound(&mut self, path: &Path, done: Completion<()>) -> SoundId;

    /// Whether enough data is buffered for uninterrupted playback.
    ///
    /// Consulted by the readiness gate in case the host never fires the
    /// completion for a sound that was already cached.
    fn sound_buffered(&self, id: SoundId) -> bool;

    fn play(&mut self, id: SoundId, playback: Playback);
    fn pause(&mut self, id: SoundId);
    fn resume(&mut self, id: SoundId);

    /// Seeks to the start without changing the paused state.
    fn rewind(&mut self, id: SoundId);

    /// Resets the sound's playback state so it can start over cleanly.
    fn reload(&mut self, id: SoundId);

    fn is_paused(&self, id: SoundId) -> bool;
}

//=== Host ================================================================

/// Everything the context needs from its environment.
pub trait Host: SurfaceHost + MediaHost + AudioHost {}

impl<T: SurfaceHost + MediaHost + AudioHost> Host for T {}
