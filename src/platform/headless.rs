//=========================================================================
// Headless Host
//=========================================================================
//
// In-memory implementation of every host capability.
//
// Surfaces record the draw commands they receive, loads stay pending until
// completed by hand, and audio keeps per-sound playback state. Clones share
// the same state, so a test can keep one clone while the context owns
// another.
//
// Each surface keeps only its most recent `command_limit` commands, so a
// host driven by a running frame loop stays at a fixed size.
//
// Usage:
// ```text
//   let host = HeadlessHost::new().with_surface("screen");
//   let mut ctx = Context::new(host.clone())?;
//   let img = ctx.load_image("hero.png");
//   host.finish_image(img.id(), 32, 32);
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::graphics::DrawCommand;
use crate::core::host::{
    AudioHost, Canvas, HostWindow, ImageId, MediaHost, Playback, SoundId, SurfaceHost,
};
use crate::core::input::EventKind;
use crate::core::resources::{Completion, ImageInfo};

/// Commands kept per surface unless configured otherwise.
pub const DEFAULT_COMMAND_LIMIT: usize = 4096;

/// MIME types playable out of the box.
const DEFAULT_PLAYABLE: &[&str] = &[
    "audio/wav",
    "audio/ogg",
    "audio/mp3",
    "audio/mpeg",
    "audio/flac",
];

//=== Snapshots ===========================================================

/// Observable playback state of one headless sound.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundState {
    pub path: PathBuf,
    pub paused: bool,
    pub playback: Option<Playback>,
    pub rewinds: u32,
    pub reloads: u32,
}

//=== Shared State ========================================================

#[derive(Default)]
struct SurfaceRecord {
    size: Option<(u32, u32)>,
    commands: VecDeque<DrawCommand>,
}

struct ImageRecord {
    path: PathBuf,
    done: Completion<ImageInfo>,
}

struct SoundRecord {
    state: SoundState,
    done: Completion<()>,
    buffered: bool,
}

struct HeadlessState {
    canvas_supported: bool,
    command_limit: usize,
    window_size: Option<(u32, u32)>,
    presents: u64,
    suppressed: HashSet<EventKind>,
    surfaces: HashMap<String, SurfaceRecord>,
    playable: HashSet<String>,
    images: Vec<ImageRecord>,
    sounds: Vec<SoundRecord>,
    fonts: Vec<(String, PathBuf)>,
}

impl HeadlessState {
    fn sound_mut(&mut self, id: SoundId) -> Option<&mut SoundRecord> {
        self.sounds.get_mut(id.0 as usize)
    }
}

//=== HeadlessHost ========================================================

/// A host with no window, no decoder and no audio device.
#[derive(Clone)]
pub struct HeadlessHost {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHost {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                canvas_supported: true,
                command_limit: DEFAULT_COMMAND_LIMIT,
                window_size: None,
                presents: 0,
                suppressed: HashSet::new(),
                surfaces: HashMap::new(),
                playable: DEFAULT_PLAYABLE.iter().map(|m| (*m).to_owned()).collect(),
                images: Vec::new(),
                sounds: Vec::new(),
                fonts: Vec::new(),
            })),
        }
    }

    /// Adds a surface element named `element_id`.
    pub fn with_surface(self, element_id: &str) -> Self {
        self.state
            .borrow_mut()
            .surfaces
            .entry(element_id.to_owned())
            .or_default();
        self
    }

    /// Reports no 2D canvas support.
    pub fn without_canvas_support(self) -> Self {
        self.state.borrow_mut().canvas_supported = false;
        self
    }

    /// Accepts an extra audio MIME type.
    pub fn with_playable(self, mime: &str) -> Self {
        self.state.borrow_mut().playable.insert(mime.to_owned());
        self
    }

    /// Keeps at most `limit` commands per surface, dropping the oldest.
    pub fn with_command_limit(self, limit: usize) -> Self {
        assert!(limit > 0, "Command limit must be positive");
        self.state.borrow_mut().command_limit = limit;
        self
    }

    //--- Surfaces ---------------------------------------------------------

    /// The most recent commands recorded on `element_id`, oldest first.
    pub fn commands(&self, element_id: &str) -> Vec<DrawCommand> {
        self.state
            .borrow()
            .surfaces
            .get(element_id)
            .map(|s| s.commands.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear_commands(&self, element_id: &str) {
        if let Some(surface) = self.state.borrow_mut().surfaces.get_mut(element_id) {
            surface.commands.clear();
        }
    }

    /// Size the surface was last resized to.
    pub fn surface_size(&self, element_id: &str) -> Option<(u32, u32)> {
        self.state.borrow().surfaces.get(element_id).and_then(|s| s.size)
    }

    //--- Window -----------------------------------------------------------

    /// Inner size of the attached window, if one was handed over.
    pub fn window_size(&self) -> Option<(u32, u32)> {
        self.state.borrow().window_size
    }

    /// Frames presented so far.
    pub fn present_count(&self) -> u64 {
        self.state.borrow().presents
    }

    pub fn is_default_suppressed(&self, kind: EventKind) -> bool {
        self.state.borrow().suppressed.contains(&kind)
    }

    //--- Loads ------------------------------------------------------------

    /// Completes an image load. Returns `false` for an unknown or already
    /// finished image.
    pub fn finish_image(&self, id: ImageId, width: u32, height: u32) -> bool {
        let state = self.state.borrow();
        match state.images.get(id.0 as usize) {
            Some(image) => {
                trace!(target: "momo::resources", "Headless image {:?} finished", image.path);
                image.done.complete(ImageInfo { width, height })
            }
            None => false,
        }
    }

    /// Completes a sound load through its completion.
    pub fn finish_sound(&self, id: SoundId) -> bool {
        let state = self.state.borrow();
        state
            .sounds
            .get(id.0 as usize)
            .is_some_and(|sound| sound.done.complete(()))
    }

    /// Marks a sound as buffered without firing its completion.
    pub fn buffer_sound(&self, id: SoundId) {
        if let Some(sound) = self.state.borrow_mut().sound_mut(id) {
            sound.buffered = true;
        }
    }

    pub fn image_path(&self, id: ImageId) -> Option<PathBuf> {
        self.state.borrow().images.get(id.0 as usize).map(|i| i.path.clone())
    }

    /// Registered font family names, in registration order.
    pub fn font_families(&self) -> Vec<String> {
        self.state.borrow().fonts.iter().map(|(family, _)| family.clone()).collect()
    }

    //--- Audio ------------------------------------------------------------

    pub fn sound(&self, id: SoundId) -> Option<SoundState> {
        self.state.borrow().sounds.get(id.0 as usize).map(|s| s.state.clone())
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

//=== Canvas ==============================================================

struct HeadlessCanvas {
    element_id: String,
    state: Rc<RefCell<HeadlessState>>,
}

impl Canvas for HeadlessCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        if let Some(surface) = self.state.borrow_mut().surfaces.get_mut(&self.element_id) {
            surface.size = Some((width, height));
        }
    }

    fn execute(&mut self, command: DrawCommand) {
        let mut state = self.state.borrow_mut();
        let limit = state.command_limit;
        if let Some(surface) = state.surfaces.get_mut(&self.element_id) {
            if surface.commands.len() == limit {
                surface.commands.pop_front();
            }
            surface.commands.push_back(command);
        }
    }
}

//=== Host Traits =========================================================

impl SurfaceHost for HeadlessHost {
    fn supports_canvas(&self) -> bool {
        self.state.borrow().canvas_supported
    }

    fn acquire_surface(&mut self, element_id: &str) -> Option<Box<dyn Canvas>> {
        if !self.state.borrow().surfaces.contains_key(element_id) {
            debug!(target: "momo::graphics", "No headless surface '{}'", element_id);
            return None;
        }

        Some(Box::new(HeadlessCanvas {
            element_id: element_id.to_owned(),
            state: Rc::clone(&self.state),
        }))
    }

    fn attach_window(&mut self, window: Arc<dyn HostWindow>) {
        self.state.borrow_mut().window_size = Some(window.inner_size());
    }

    fn present(&mut self) {
        self.state.borrow_mut().presents += 1;
    }

    fn suppress_defaults(&mut self, kinds: &[EventKind]) {
        self.state.borrow_mut().suppressed.extend(kinds.iter().copied());
    }

    fn restore_defaults(&mut self, kinds: &[EventKind]) {
        let mut state = self.state.borrow_mut();
        for kind in kinds {
            state.suppressed.remove(kind);
        }
    }
}

impl MediaHost for HeadlessHost {
    fn load_image(&mut self, path: &Path, done: Completion<ImageInfo>) -> ImageId {
        let mut state = self.state.borrow_mut();
        let id = ImageId(state.images.len() as u32);
        state.images.push(ImageRecord {
            path: path.to_path_buf(),
            done,
        });
        id
    }

    fn register_font(&mut self, path: &Path, family: &str) {
        self.state
            .borrow_mut()
            .fonts
            .push((family.to_owned(), path.to_path_buf()));
    }
}

impl AudioHost for HeadlessHost {
    fn can_play_type(&self, mime: &str) -> bool {
        self.state.borrow().playable.contains(mime)
    }

    fn load_sound(&mut self, path: &Path, done: Completion<()>) -> SoundId {
        let mut state = self.state.borrow_mut();
        let id = SoundId(state.sounds.len() as u32);
        state.sounds.push(SoundRecord {
            state: SoundState {
                path: path.to_path_buf(),
                paused: true,
                playback: None,
                rewinds: 0,
                reloads: 0,
            },
            done,
            buffered: false,
        });
        id
    }

    fn sound_buffered(&self, id: SoundId) -> bool {
        self.state
            .borrow()
            .sounds
            .get(id.0 as usize)
            .is_some_and(|s| s.buffered)
    }

    fn play(&mut self, id: SoundId, playback: Playback) {
        if let Some(sound) = self.state.borrow_mut().sound_mut(id) {
            sound.state.playback = Some(playback);
            sound.state.paused = false;
        }
    }

    fn pause(&mut self, id: SoundId) {
        if let Some(sound) = self.state.borrow_mut().sound_mut(id) {
            sound.state.paused = true;
        }
    }

    fn resume(&mut self, id: SoundId) {
        if let Some(sound) = self.state.borrow_mut().sound_mut(id) {
            sound.state.paused = false;
        }
    }

    fn rewind(&mut self, id: SoundId) {
        if let Some(sound) = self.state.borrow_mut().sound_mut(id) {
            sound.state.rewinds += 1;
        }
    }

    fn reload(&mut self, id: SoundId) {
        if let Some(sound) = self.state.borrow_mut().sound_mut(id) {
            sound.state.reloads += 1;
            sound.state.paused = true;
        }
    }

    fn is_paused(&self, id: SoundId) -> bool {
        self.state
            .borrow()
            .sounds
            .get(id.0 as usize)
            .map_or(true, |s| s.state.paused)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::Color;

    #[test]
    fn unknown_surface_not_acquired() {
        let mut host = HeadlessHost::new().with_surface("screen");

        assert!(host.acquire_surface("screen").is_some());
        assert!(host.acquire_surface("other").is_none());
    }

    #[test]
    fn canvas_records_into_shared_state() {
        let mut host = HeadlessHost::new().with_surface("screen");
        let mut canvas = host.acquire_surface("screen").unwrap();

        canvas.resize(64, 48);
        canvas.execute(DrawCommand::SetFillStyle(Color::WHITE));

        assert_eq!(host.surface_size("screen"), Some((64, 48)));
        assert_eq!(host.commands("screen"), vec![DrawCommand::SetFillStyle(Color::WHITE)]);

        host.clear_commands("screen");
        assert!(host.commands("screen").is_empty());
    }

    #[test]
    fn command_log_keeps_latest() {
        let mut host = HeadlessHost::new().with_surface("screen").with_command_limit(3);
        let mut canvas = host.acquire_surface("screen").unwrap();

        for i in 0..10 {
            canvas.execute(DrawCommand::SetLineWidth(f64::from(i)));
        }

        assert_eq!(
            host.commands("screen"),
            vec![
                DrawCommand::SetLineWidth(7.0),
                DrawCommand::SetLineWidth(8.0),
                DrawCommand::SetLineWidth(9.0),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "Command limit must be positive")]
    fn zero_command_limit_rejected() {
        let _ = HeadlessHost::new().with_command_limit(0);
    }

    #[test]
    fn image_completes_once() {
        let mut host = HeadlessHost::new();
        let done = Completion::new(None);
        let id = host.load_image(Path::new("a.png"), done.clone());

        assert!(host.finish_image(id, 3, 4));
        assert!(!host.finish_image(id, 5, 6));
        assert_eq!(done.get(), Some(&ImageInfo { width: 3, height: 4 }));
        assert!(!host.finish_image(ImageId(99), 1, 1));
    }

    #[test]
    fn default_playable_types() {
        let host = HeadlessHost::new().with_playable("audio/x-custom");

        assert!(host.can_play_type("audio/ogg"));
        assert!(host.can_play_type("audio/x-custom"));
        assert!(!host.can_play_type("audio/unknownext"));
    }

    #[test]
    fn sounds_start_paused() {
        let mut host = HeadlessHost::new();
        let id = host.load_sound(Path::new("a.ogg"), Completion::new(None));

        assert!(host.is_paused(id));
        host.play(id, Playback::default());
        assert!(!host.is_paused(id));
        assert_eq!(host.sound(id).unwrap().playback, Some(Playback::default()));
    }
}
