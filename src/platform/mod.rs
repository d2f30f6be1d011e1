//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the application context.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                        │
//  │   ↓                                                      │
//  │  InputProcessor        (Winit → InputEvent, DPI scaling) │
//  │   ↓                                                      │
//  │  InputBuffer           (ordered, coalesced)              │
//  │   ↓ about_to_wait: flush                                 │
//  │  EventSender ──► bounded queue ──► Context::pump(now)    │
//  │                                      ├─ input state      │
//  │                                      ├─ readiness gate   │
//  │                                      └─ frame tick       │
//  │   ↓ tick ran: request_redraw → RedrawRequested → present │
//  │  ControlFlow::WaitUntil(next deadline)                   │
//  └──────────────────────────────────────────────────────────┘
//          ▲
//          │ EventLoopProxy<WakeUp>  (resource completions)
// ```
//
// Key Design Decisions:
// - **One thread**: the context lives on the event loop thread; ticks
//   never overlap and input needs no locks
// - **Wake on completion**: loaders on other threads wake the loop through
//   the proxy instead of the loop polling
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
// Responsibilities:
// - Create the OS window and hand it to the host
// - Convert Winit types → momo InputEvents
// - Feed the context's event queue in arrival order
// - Run the entry point once the window exists
// - Sleep until the next tick, completion or OS event
//
//=========================================================================

//=== Submodules ==========================================================

pub mod headless;
mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton as WinitMouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::error::PlatformError;
use crate::core::host::HostWindow;
use crate::core::input::{EventSender, InputEvent};
use crate::core::resources::Waker;
use crate::core::Context;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

/// Re-check interval while continuations wait on resources, so sounds
/// that buffer without firing their completion are still noticed.
const RESOURCE_POLL: Duration = Duration::from_millis(100);

//=== WakeUp ==============================================================

/// User event sent through the proxy when a resource completes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WakeUp;

struct ProxyWaker(Mutex<EventLoopProxy<WakeUp>>);

impl Waker for ProxyWaker {
    fn wake(&self) {
        if let Ok(proxy) = self.0.lock() {
            if proxy.send_event(WakeUp).is_err() {
                trace!(target: "platform", "Event loop closed, wake-up dropped");
            }
        }
    }
}

//=== HostWindow ==========================================================

impl HostWindow for Window {
    fn inner_size(&self) -> (u32, u32) {
        let size = Window::inner_size(self);
        (size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        Window::scale_factor(self)
    }

    fn request_redraw(&self) {
        Window::request_redraw(self);
    }

    fn set_cursor_visible(&self, visible: bool) {
        Window::set_cursor_visible(self, visible);
    }
}

//=== WindowConfig ========================================================

/// Window parameters applied when the window is created.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Entry point invoked once the window exists.
pub(crate) type ReadyHook = Box<dyn FnOnce(&mut Context)>;

/// Window manager and driver of the application context.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(context, config, on_ready)`
/// 2. **Execution**: `platform.run()` - blocks in the event loop
/// 3. **Resume**: window created and attached to the host, `on_ready` runs once
/// 4. **Loop**: events buffered → flushed and pumped in `about_to_wait`;
///    each tick requests a redraw, answered by `Context::present`
/// 5. **Shutdown**: close button or `Context::request_exit`
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<dyn HostWindow>>,

    config: WindowConfig,

    /// Buffers input until the next pump.
    buffer: InputBuffer,

    /// Producer half of the context's event queue.
    event_sender: EventSender,

    /// Converts Winit events to InputEvents.
    input_processor: InputProcessor,

    context: Context,

    on_ready: Option<ReadyHook>,

    /// Cursor visibility last applied to the window.
    cursor_hidden: bool,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a new platform driving `context`.
    ///
    /// Does not create window yet - that happens lazily in `resumed()`.
    pub fn new(context: Context, config: WindowConfig, on_ready: ReadyHook) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender: context.event_sender(),
            input_processor: InputProcessor::new(),
            context,
            on_ready: Some(on_ready),
            cursor_hidden: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or exit is requested.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::<WakeUp>::with_user_event()
            .build()
            .map_err(PlatformError::EventLoopCreation)?;

        let waker = ProxyWaker(Mutex::new(event_loop.create_proxy()));
        self.context.set_waker(Arc::new(waker));

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Moves buffered input into the context's event queue.
    fn flush_input_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        trace!(target: "platform::input", "Flushing {} events", self.buffer.len());

        let mut dropped = 0;
        for event in self.buffer.drain() {
            if !self.event_sender.push(event) {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!(target: "platform::input", "Dropped {} events", dropped);
        }
    }

    /// Flushes input and pumps the context once.
    fn pump(&mut self, now: Instant) {
        self.flush_input_buffer();
        let ticked = self.context.pump(now);
        self.sync_cursor();

        if ticked {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    /// Hands a freshly created window to the host, then runs the entry
    /// point the first time.
    fn attach_window(&mut self, window: Arc<dyn HostWindow>) {
        self.input_processor.update_scale_factor(window.scale_factor());
        self.context.attach_window(Arc::clone(&window));
        self.window = Some(window);

        if let Some(on_ready) = self.on_ready.take() {
            info!(target: "platform", "Running entry point");
            on_ready(&mut self.context);
        }
    }

    fn sync_cursor(&mut self) {
        let hidden = self.context.is_mouse_cursor_hidden();
        if hidden == self.cursor_hidden {
            return;
        }
        if let Some(window) = &self.window {
            window.set_cursor_visible(!hidden);
            debug!(target: "platform", "Cursor {}", if hidden { "hidden" } else { "shown" });
        }
        self.cursor_hidden = hidden;
    }

    /// When the loop should next wake up on its own, if ever.
    fn next_wake(&self, now: Instant) -> Option<Instant> {
        let poll = self
            .context
            .is_waiting_on_resources()
            .then(|| now + RESOURCE_POLL);

        match (self.context.next_deadline(), poll) {
            (Some(deadline), Some(poll)) => Some(deadline.min(poll)),
            (deadline, poll) => deadline.or(poll),
        }
    }

    fn handle_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                trace!(target: "platform::input", "Scale factor changed: {}", scale_factor);
                self.input_processor.update_scale_factor(*scale_factor);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_mouse_move(*position);
                self.buffer.push(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.input_processor.process_wheel(*delta);
                self.buffer.push(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push(event);

                if *button == WinitMouseButton::Right && *state == ElementState::Pressed {
                    self.buffer.push(InputEvent::ContextMenu);
                }
            }

            _ => {}
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<WakeUp> for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet, then runs the entry
    /// point the first time.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.attach_window(Arc::new(window));
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// A resource completed on some loader; the pump in `about_to_wait`
    /// picks it up.
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, _event: WakeUp) {
        trace!(target: "platform", "Woken by resource completion");
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.context.stop();
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                self.context.present();
            }

            other => self.handle_input(other),
        }
    }

    /// All pending OS events handled: pump and pick the next wake-up.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.pump(now);

        if self.context.exit_requested() {
            info!(target: "platform", "Leaving event loop");
            event_loop.exit();
            return;
        }

        match self.next_wake(Instant::now()) {
            Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(at)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};
    use headless::HeadlessHost;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use winit::dpi::PhysicalPosition;
    use winit::raw_window_handle::{
        DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
    };

    /// Window stand-in that counts what the platform asks of it.
    struct TestWindow {
        size: (u32, u32),
        scale: f64,
        redraws: AtomicU32,
        cursor_visible: AtomicBool,
    }

    impl TestWindow {
        fn new(size: (u32, u32), scale: f64) -> Arc<Self> {
            Arc::new(Self {
                size,
                scale,
                redraws: AtomicU32::new(0),
                cursor_visible: AtomicBool::new(true),
            })
        }
    }

    impl HasWindowHandle for TestWindow {
        fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
            Err(HandleError::Unavailable)
        }
    }

    impl HasDisplayHandle for TestWindow {
        fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
            Err(HandleError::Unavailable)
        }
    }

    impl HostWindow for TestWindow {
        fn inner_size(&self) -> (u32, u32) {
            self.size
        }

        fn scale_factor(&self) -> f64 {
            self.scale
        }

        fn request_redraw(&self) {
            self.redraws.fetch_add(1, Ordering::Relaxed);
        }

        fn set_cursor_visible(&self, visible: bool) {
            self.cursor_visible.store(visible, Ordering::Relaxed);
        }
    }

    fn platform_with(host: HeadlessHost, on_ready: ReadyHook) -> Platform {
        let context = Context::with_queue_capacity(host, 4).unwrap();
        let config = WindowConfig {
            title: "test".into(),
            width: 320,
            height: 200,
        };
        Platform::new(context, config, on_ready)
    }

    fn platform() -> Platform {
        platform_with(HeadlessHost::new(), Box::new(|_| {}))
    }

    #[test]
    fn platform_creation() {
        let platform = platform();
        assert!(platform.window.is_none(), "Window should be created lazily");
        assert!(platform.on_ready.is_some());
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let mut platform = platform();

        platform.flush_input_buffer();

        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn pump_delivers_buffered_events() {
        let mut platform = platform();
        platform.context.install_keyboard();

        platform.buffer.push(InputEvent::KeyDown(KeyCode::Space));
        platform.pump(Instant::now());

        assert!(platform.buffer.is_empty());
        assert!(platform.context.input().is_key_down(KeyCode::Space));
    }

    #[test]
    fn flush_beyond_capacity_drops() {
        let mut platform = platform();
        platform.context.install_keyboard();

        for i in 0..6u16 {
            platform.buffer.push(InputEvent::ButtonDown(MouseButton::Other(i)));
        }
        platform.flush_input_buffer();

        assert!(platform.buffer.is_empty(), "Buffer drains even when events drop");
    }

    #[test]
    fn window_reaches_host_before_entry_point() {
        let host = HeadlessHost::new();
        let seen = Rc::new(Cell::new(None));

        let observer = host.clone();
        let seen_in_hook = seen.clone();
        let mut platform = platform_with(
            host.clone(),
            Box::new(move |_| seen_in_hook.set(Some(observer.window_size()))),
        );

        platform.attach_window(TestWindow::new((640, 400), 2.0));

        assert_eq!(seen.get(), Some(Some((640, 400))));
        assert!(platform.on_ready.is_none(), "Entry point runs once");

        let moved = platform
            .input_processor
            .process_mouse_move(PhysicalPosition::new(10.0, 20.0));
        assert_eq!(moved, InputEvent::PointerMoved { x: 5.0, y: 10.0 });
    }

    #[test]
    fn tick_requests_redraw() {
        let mut platform = platform();
        let window = TestWindow::new((320, 200), 1.0);
        platform.attach_window(window.clone());
        platform.context.set_frame_rate(50).unwrap();
        platform.context.start(|_| {}).unwrap();

        let due = platform.context.next_deadline().unwrap();
        platform.pump(due - Duration::from_millis(1));
        assert_eq!(window.redraws.load(Ordering::Relaxed), 0);

        platform.pump(due);
        assert_eq!(window.redraws.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn hidden_cursor_applied_to_window() {
        let mut platform = platform();
        let window = TestWindow::new((320, 200), 1.0);
        platform.attach_window(window.clone());

        platform.context.hide_mouse_cursor();
        platform.pump(Instant::now());
        assert!(!window.cursor_visible.load(Ordering::Relaxed));

        platform.context.show_mouse_cursor();
        platform.pump(Instant::now());
        assert!(window.cursor_visible.load(Ordering::Relaxed));
    }

    #[test]
    fn idle_context_sleeps_indefinitely() {
        let platform = platform();
        assert_eq!(platform.next_wake(Instant::now()), None);
    }

    #[test]
    fn waiting_continuation_polls() {
        let mut platform = platform();
        platform.context.load_image("slow.png");
        platform.context.when_all_ready(|_| {});

        let now = Instant::now();
        assert_eq!(platform.next_wake(now), Some(now + RESOURCE_POLL));
    }

    #[test]
    fn running_loop_wakes_at_deadline() {
        let mut platform = platform();
        platform.context.set_frame_rate(1000).unwrap();
        platform.context.start(|_| {}).unwrap();

        let deadline = platform.context.next_deadline().unwrap();
        assert_eq!(platform.next_wake(Instant::now()), Some(deadline));
    }
}
