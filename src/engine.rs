//=========================================================================
// Engine
//
// Main entry point: configures the window and context, then hands both
// to the platform event loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(host)──>  Engine  ──run(on_ready)──>  [Event Loop]
//         │                              │
//         ├─ with_frame_rate()           ├─ creates window
//         ├─ with_channel_capacity()     ├─ runs on_ready once
//         ├─ with_title()                └─ pumps the context
//         └─ with_window_size()              blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::context::DEFAULT_QUEUE_CAPACITY;
use crate::core::error::MomoError;
use crate::core::host::Host;
use crate::core::Context;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Frame rate**: unset (call `Context::set_frame_rate` before `start`)
/// - **Channel capacity**: 128 events
/// - **Title**: "momo"
/// - **Window size**: 800x600
///
/// # Examples
///
/// ```no_run
/// use momo::{EngineBuilder, HeadlessHost};
/// use momo::core::graphics::Color;
///
/// EngineBuilder::new()
///     .with_frame_rate(60)
///     .with_title("Demo")
///     .build(HeadlessHost::new().with_surface("screen"))?
///     .run(|ctx| {
///         ctx.bind_surface("screen", 800, 600).expect("surface");
///         ctx.install_keyboard();
///         ctx.when_all_ready(|ctx| {
///             ctx.start(|ctx| {
///                 if let Some(surface) = ctx.surface_mut() {
///                     surface.clear(Color::BLACK);
///                 }
///             })
///             .expect("frame rate set");
///         });
///     })?;
/// # Ok::<(), momo::MomoError>(())
/// ```
pub struct EngineBuilder {
    frame_rate: Option<u32>,
    channel_capacity: usize,
    title: String,
    window_size: (u32, u32),
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            frame_rate: None,
            channel_capacity: DEFAULT_QUEUE_CAPACITY,
            title: "momo".to_owned(),
            window_size: (800, 600),
        }
    }

    /// Sets the initial frame rate of the context's frame loop.
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        assert!(fps > 0, "Frame rate must be positive, got {}", fps);
        self.frame_rate = Some(fps);
        self
    }

    /// Sets the capacity of the input event queue.
    ///
    /// Events arriving while the queue is full are dropped.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the window's logical size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.window_size = (width, height);
        self
    }

    /// Builds the engine over `host`.
    ///
    /// # Errors
    ///
    /// [`MomoError::CanvasUnsupported`] when the host cannot draw.
    pub fn build(self, host: impl Host + 'static) -> Result<Engine, MomoError> {
        info!(
            "Building engine (frame rate: {:?}, channel: {})",
            self.frame_rate, self.channel_capacity
        );

        let mut context = Context::with_queue_capacity(host, self.channel_capacity)?;
        if let Some(fps) = self.frame_rate {
            context.set_frame_rate(fps)?;
        }

        Ok(Engine {
            context,
            window: WindowConfig {
                title: self.title,
                width: self.window_size.0,
                height: self.window_size.1,
            },
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// A configured context waiting to be run.
pub struct Engine {
    context: Context,
    window: WindowConfig,
}

impl Engine {
    /// Access to the context before the event loop starts.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Runs the event loop, calling `on_ready` once the window exists.
    ///
    /// Blocks until the window closes or [`Context::request_exit`] is
    /// called.
    ///
    /// # Errors
    ///
    /// [`MomoError::Platform`] if the event loop cannot start or fails.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms that require it.
    pub fn run(self, on_ready: impl FnOnce(&mut Context) + 'static) -> Result<(), MomoError> {
        info!("Starting engine runtime");

        let platform = Platform::new(self.context, self.window, Box::new(on_ready));
        platform.run()?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
