//=========================================================================
// Resources
//=========================================================================
//
// Resource handles and the readiness gate.
//
// Architecture:
//   load_image / load_sound / load_font
//     → handle + Completion registered in ReadinessGate
//     → host fills the Completion
//     → take_ready() hands back continuations once every resource is ready
//
// The tracked list is re-scanned on every check, so resources registered
// after `when_all_ready` still hold the continuation back.
//
//=========================================================================

//=== Module Declarations =================================================

mod completion;

//=== Public API ==========================================================

pub use completion::{Completion, Waker};

//=== External Dependencies ===============================================

use std::mem;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::host::{AudioHost, ImageId, SoundId};

//=== ImageInfo ===========================================================

/// Dimensions reported by the host once an image has decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

//=== Handles =============================================================

/// A loaded or loading image.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    id: ImageId,
    path: PathBuf,
    done: Completion<ImageInfo>,
}

impl ImageHandle {
    pub(crate) fn new(id: ImageId, path: &Path, done: Completion<ImageInfo>) -> Self {
        Self {
            id,
            path: path.to_path_buf(),
            done,
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ready(&self) -> bool {
        self.done.is_complete()
    }

    /// Width in pixels, `None` until loaded.
    pub fn width(&self) -> Option<u32> {
        self.done.get().map(|info| info.width)
    }

    /// Height in pixels, `None` until loaded.
    pub fn height(&self) -> Option<u32> {
        self.done.get().map(|info| info.height)
    }
}

/// A loaded or loading sound.
#[derive(Debug, Clone)]
pub struct SoundHandle {
    id: SoundId,
    path: PathBuf,
    done: Completion<()>,
}

impl SoundHandle {
    pub(crate) fn new(id: SoundId, path: &Path, done: Completion<()>) -> Self {
        Self {
            id,
            path: path.to_path_buf(),
            done,
        }
    }

    pub fn id(&self) -> SoundId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ready(&self) -> bool {
        self.done.is_complete()
    }
}

/// A registered font, usable as soon as it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontHandle {
    family: String,
    path: PathBuf,
}

static NEXT_FONT: AtomicU64 = AtomicU64::new(0);

impl FontHandle {
    /// Creates a handle with a fresh `font_<hex>` family name.
    pub(crate) fn new(path: &Path) -> Self {
        let serial = NEXT_FONT.fetch_add(1, Ordering::Relaxed);
        Self {
            family: format!("font_{:x}", serial),
            path: path.to_path_buf(),
        }
    }

    /// Family name the font is registered under.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

//=== ReadinessGate =======================================================

enum Tracked {
    Image(Completion<ImageInfo>),
    Sound { id: SoundId, done: Completion<()> },
    Font(Completion<()>),
}

impl Tracked {
    fn is_ready(&self) -> bool {
        match self {
            Tracked::Image(done) => done.is_complete(),
            Tracked::Sound { done, .. } => done.is_complete(),
            Tracked::Font(done) => done.is_complete(),
        }
    }
}

/// Holds continuations until every registered resource is ready.
pub struct ReadinessGate<C> {
    tracked: Vec<Tracked>,
    pending: Vec<C>,
}

impl<C> ReadinessGate<C> {
    pub fn new() -> Self {
        Self {
            tracked: Vec::new(),
            pending: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    pub fn track_image(&mut self, handle: &ImageHandle) {
        self.tracked.push(Tracked::Image(handle.done.clone()));
    }

    pub fn track_sound(&mut self, handle: &SoundHandle) {
        self.tracked.push(Tracked::Sound {
            id: handle.id,
            done: handle.done.clone(),
        });
    }

    /// Fonts are synchronously usable, so they never hold the gate.
    pub fn track_font(&mut self, _handle: &FontHandle) {
        self.tracked.push(Tracked::Font(Completion::ready(())));
    }

    /// Queues a continuation for when everything is ready.
    pub fn when_all_ready(&mut self, continuation: C) {
        self.pending.push(continuation);
        debug!(
            target: "momo::resources",
            "Continuation queued ({} waiting, {} resources loading)",
            self.pending.len(),
            self.pending_resources()
        );
    }

    //--- Evaluation -------------------------------------------------------

    /// Returns the queued continuations if every resource is ready.
    ///
    /// Sounds the audio host reports as buffered are completed first.
    /// Each continuation is handed out exactly once.
    pub fn take_ready<A: AudioHost + ?Sized>(&mut self, audio: &A) -> Vec<C> {
        for tracked in &self.tracked {
            if let Tracked::Sound { id, done } = tracked {
                if !done.is_complete() && audio.sound_buffered(*id) && done.complete(()) {
                    trace!(target: "momo::resources", "Sound {:?} buffered", id);
                }
            }
        }

        if self.pending.is_empty() {
            return Vec::new();
        }

        let loading = self.pending_resources();
        if loading > 0 {
            trace!(target: "momo::resources", "{} resources still loading", loading);
            return Vec::new();
        }

        debug!(
            target: "momo::resources",
            "All {} resources ready, releasing {} continuations",
            self.tracked.len(),
            self.pending.len()
        );
        mem::take(&mut self.pending)
    }

    //--- Queries ----------------------------------------------------------

    /// Number of resources still loading.
    pub fn pending_resources(&self) -> usize {
        self.tracked.iter().filter(|t| !t.is_ready()).count()
    }

    /// Number of continuations waiting.
    pub fn waiting(&self) -> usize {
        self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

impl<C> Default for ReadinessGate<C> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
