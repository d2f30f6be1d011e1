//=========================================================================
// Context
//=========================================================================
//
// The application context: one value owning everything the library
// tracks for a running application.
//
// Architecture:
// ```text
//   Platform ──EventSender──► EventQueue ─┐
//                                         ▼
//   pump(now) ── drain → InputSystem::apply
//             ── ReadinessGate::take_ready → continuations(&mut Context)
//             ── FrameLoop::is_due → tick callback(&mut Context)
//                                    → InputSystem::end_tick
// ```
//
// Everything runs on the thread that owns the context. Only resource
// completions cross threads, and they wake the platform through the
// installed `Waker`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::audio;
use crate::core::error::MomoError;
use crate::core::frame_loop::FrameLoop;
use crate::core::graphics::Surface;
use crate::core::host::{Host, HostWindow, Playback};
use crate::core::input::event_queue::EventQueue;
use crate::core::input::{EventKind, EventSender, InputSystem, SUPPRESSED_DEFAULTS};
use crate::core::resources::{
    Completion, FontHandle, ImageHandle, ReadinessGate, SoundHandle, Waker,
};

//=== Callback Types ======================================================

/// Frame loop callback, invoked once per tick.
pub type TickFn = Box<dyn FnMut(&mut Context)>;

/// Readiness continuation, invoked once.
pub type ReadyFn = Box<dyn FnOnce(&mut Context)>;

/// Default capacity of the input event queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 128;

//=== Context =============================================================

pub struct Context {
    host: Box<dyn Host>,
    surface: Option<Surface>,
    input: InputSystem,
    events: EventQueue,
    gate: ReadinessGate<ReadyFn>,
    fonts: Vec<FontHandle>,
    frame_loop: FrameLoop<TickFn>,
    waker: Option<Arc<dyn Waker>>,
    created: Instant,
    cursor_hidden: bool,
    exit_requested: bool,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("surface", &self.surface)
            .field("frame_rate", &self.frame_loop.rate())
            .field("running", &self.frame_loop.is_running())
            .field("pending_resources", &self.gate.pending_resources())
            .finish_non_exhaustive()
    }
}

impl Context {
    //--- Construction -----------------------------------------------------

    /// Creates a context over `host`.
    ///
    /// Fails with [`MomoError::CanvasUnsupported`] when the host cannot
    /// draw at all.
    pub fn new(host: impl Host + 'static) -> Result<Self, MomoError> {
        Self::with_queue_capacity(host, DEFAULT_QUEUE_CAPACITY)
    }

    /// Creates a context whose input queue holds `capacity` events.
    pub fn with_queue_capacity(
        host: impl Host + 'static,
        capacity: usize,
    ) -> Result<Self, MomoError> {
        if !host.supports_canvas() {
            return Err(MomoError::CanvasUnsupported);
        }

        Ok(Self {
            host: Box::new(host),
            surface: None,
            input: InputSystem::new(),
            events: EventQueue::new(capacity),
            gate: ReadinessGate::new(),
            fonts: Vec::new(),
            frame_loop: FrameLoop::new(),
            waker: None,
            created: Instant::now(),
            cursor_hidden: false,
            exit_requested: false,
        })
    }

    /// Installs the waker handed to completions created from now on.
    pub fn set_waker(&mut self, waker: Arc<dyn Waker>) {
        self.waker = Some(waker);
    }

    /// Producer handle for feeding input events.
    pub fn event_sender(&self) -> EventSender {
        self.events.sender()
    }

    /// Hands the platform window to the host.
    pub fn attach_window(&mut self, window: Arc<dyn HostWindow>) {
        let (width, height) = window.inner_size();
        info!(target: "momo::graphics", "Window attached ({}x{})", width, height);
        self.host.attach_window(window);
    }

    /// Asks the host to show the current frame.
    pub fn present(&mut self) {
        self.host.present();
    }

    //--- Surface ----------------------------------------------------------

    /// Binds the surface named `element_id` and sizes it.
    ///
    /// Attaches pointer input and prewarms every registered font.
    pub fn bind_surface(
        &mut self,
        element_id: &str,
        width: u32,
        height: u32,
    ) -> Result<(), MomoError> {
        let canvas = self
            .host
            .acquire_surface(element_id)
            .ok_or_else(|| MomoError::SurfaceUnavailable {
                element_id: element_id.to_owned(),
            })?;

        let mut surface = Surface::new(element_id, width, height, canvas);
        for font in &self.fonts {
            surface.prewarm_font(font);
        }

        self.surface = Some(surface);
        self.input.attach_pointer();
        self.host.suppress_defaults(&suppressed_kinds(false));

        info!(target: "momo::graphics", "Surface '{}' bound ({}x{})", element_id, width, height);
        Ok(())
    }

    /// Drops the bound surface and detaches pointer input.
    pub fn unbind_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            info!(target: "momo::graphics", "Surface '{}' unbound", surface.element_id());
            self.host.restore_defaults(&suppressed_kinds(false));
        }
        self.input.detach_pointer();
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// The bound surface, or `None` when drawing would be a no-op.
    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.surface.as_mut()
    }

    pub fn surface_width(&self) -> Option<u32> {
        self.surface.as_ref().map(Surface::width)
    }

    pub fn surface_height(&self) -> Option<u32> {
        self.surface.as_ref().map(Surface::height)
    }

    //--- Resources --------------------------------------------------------

    /// Starts loading an image. Ready once the host reports its size.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> ImageHandle {
        let path = path.as_ref();
        let done = Completion::new(self.waker.clone());
        let id = self.host.load_image(path, done.clone());
        let handle = ImageHandle::new(id, path, done);

        self.gate.track_image(&handle);
        debug!(target: "momo::resources", "Loading image {:?} as {:?}", path, id);
        handle
    }

    /// Starts loading a sound.
    ///
    /// Fails when the host cannot play `audio/<extension>`.
    pub fn load_sound(&mut self, path: impl AsRef<Path>) -> Result<SoundHandle, MomoError> {
        let path = path.as_ref();
        let mime = audio::mime_for(path).unwrap_or_else(|| "audio/".to_owned());

        if !self.host.can_play_type(&mime) {
            warn!(target: "momo::audio", "Cannot play {:?} ({})", path, mime);
            return Err(MomoError::UnsupportedAudioFormat {
                path: path.to_path_buf(),
                mime,
            });
        }

        let done = Completion::new(self.waker.clone());
        let id = self.host.load_sound(path, done.clone());
        let handle = SoundHandle::new(id, path, done);

        self.gate.track_sound(&handle);
        debug!(target: "momo::resources", "Loading sound {:?} as {:?}", path, id);
        Ok(handle)
    }

    /// Registers a font under a fresh family name.
    pub fn load_font(&mut self, path: impl AsRef<Path>) -> FontHandle {
        let path = path.as_ref();
        let font = FontHandle::new(path);

        self.host.register_font(path, font.family());
        self.gate.track_font(&font);
        if let Some(surface) = self.surface.as_mut() {
            surface.prewarm_font(&font);
        }

        debug!(target: "momo::resources", "Font {:?} registered as {}", path, font.family());
        self.fonts.push(font.clone());
        font
    }

    /// Runs `continuation` once every resource loaded so far, and any loaded
    /// before it fires, is ready.
    pub fn when_all_ready(&mut self, continuation: impl FnOnce(&mut Context) + 'static) {
        self.gate.when_all_ready(Box::new(continuation));
    }

    /// Resources still loading.
    pub fn pending_resources(&self) -> usize {
        self.gate.pending_resources()
    }

    /// Whether continuations are waiting on resources.
    pub fn is_waiting_on_resources(&self) -> bool {
        self.gate.waiting() > 0
    }

    //--- Frame Loop -------------------------------------------------------

    pub fn set_frame_rate(&mut self, rate: u32) -> Result<(), MomoError> {
        self.frame_loop.set_rate(rate)
    }

    pub fn frame_rate(&self) -> Option<u32> {
        self.frame_loop.rate()
    }

    /// Starts calling `callback` at the frame rate.
    pub fn start(&mut self, callback: impl FnMut(&mut Context) + 'static) -> Result<(), MomoError> {
        self.frame_loop.start(Box::new(callback), Instant::now())
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// When the next tick is due, if the loop is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.frame_loop.deadline()
    }

    pub fn tick_count(&self) -> u64 {
        self.frame_loop.tick_count()
    }

    //--- Pump -------------------------------------------------------------

    /// Processes queued input, releases ready continuations and runs the
    /// tick if it is due at `now`. Returns whether a tick ran.
    pub fn pump(&mut self, now: Instant) -> bool {
        let events = self.events.drain();
        self.input.apply(events);

        for continuation in self.gate.take_ready(&*self.host) {
            continuation(self);
        }

        if !self.frame_loop.is_due(now) {
            return false;
        }

        self.frame_loop.advance(now);
        if let Some(mut callback) = self.frame_loop.take_callback() {
            callback(self);
            self.frame_loop.finish_tick(callback);
        }
        self.input.end_tick();
        true
    }

    //--- Input ------------------------------------------------------------

    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    pub fn install_keyboard(&mut self) {
        self.input.install_keyboard();
        self.host.suppress_defaults(&suppressed_kinds(true));
    }

    pub fn uninstall_keyboard(&mut self) {
        self.input.uninstall_keyboard();
        self.host.restore_defaults(&suppressed_kinds(true));
    }

    pub fn hide_mouse_cursor(&mut self) {
        self.cursor_hidden = true;
    }

    pub fn show_mouse_cursor(&mut self) {
        self.cursor_hidden = false;
    }

    pub fn is_mouse_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    //--- Audio ------------------------------------------------------------

    /// Plays `sound`. A one-shot already playing restarts from the top.
    pub fn play_sound(&mut self, sound: &SoundHandle, volume: f32, speed: f32, looping: bool) {
        let playback = Playback {
            volume,
            speed,
            looping,
        };
        audio::play(&mut *self.host, sound, playback);
    }

    pub fn stop_sound(&mut self, sound: &SoundHandle) {
        audio::stop(&mut *self.host, sound);
    }

    pub fn pause_sound(&mut self, sound: &SoundHandle) {
        audio::pause(&mut *self.host, sound);
    }

    pub fn resume_sound(&mut self, sound: &SoundHandle) {
        audio::resume(&mut *self.host, sound);
    }

    pub fn is_sound_paused(&self, sound: &SoundHandle) -> bool {
        audio::is_paused(&*self.host, sound)
    }

    pub fn is_sound_playing(&self, sound: &SoundHandle) -> bool {
        audio::is_playing(&*self.host, sound)
    }

    //--- Misc -------------------------------------------------------------

    /// Seconds since the context was created.
    pub fn elapsed_secs(&self) -> f64 {
        self.created.elapsed().as_secs_f64()
    }

    /// Asks the platform to leave its event loop.
    pub fn request_exit(&mut self) {
        info!(target: "momo::frame_loop", "Exit requested");
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Kinds with suppressed defaults, split by keyboard vs. pointer device.
fn suppressed_kinds(keyboard: bool) -> Vec<EventKind> {
    SUPPRESSED_DEFAULTS
        .iter()
        .copied()
        .filter(|kind| kind.is_keyboard() == keyboard)
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================
