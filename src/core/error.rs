//=========================================================================
// Error Types
//=========================================================================
//
// Failures surfaced by the context and the platform layer.
//
// Taxonomy:
//   capability  → CanvasUnsupported, SurfaceUnavailable, UnsupportedAudioFormat
//   misuse      → InvalidFrameRate, FrameRateUnset
//   platform    → Platform(PlatformError)
//
// Silent degradation (unknown key names, drawing without a surface,
// resources that never finish) is logged, never raised.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::PathBuf;

//=== MomoError ===========================================================

/// Errors returned by [`Context`](crate::core::Context) and
/// [`Engine`](crate::Engine) operations.
#[derive(Debug)]
pub enum MomoError {
    /// The host cannot provide a 2D drawing context at all.
    CanvasUnsupported,

    /// No surface element with this id exists, or its drawing context
    /// could not be obtained.
    SurfaceUnavailable { element_id: String },

    /// The audio host cannot decode the format inferred from the file
    /// extension.
    UnsupportedAudioFormat { path: PathBuf, mime: String },

    /// Frame rate must be at least 1.
    InvalidFrameRate(u32),

    /// `start()` was called before any frame rate was set.
    FrameRateUnset,

    /// Window/event loop failure.
    Platform(PlatformError),
}

impl fmt::Display for MomoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanvasUnsupported => write!(f, "Host does not support 2D canvas drawing"),
            Self::SurfaceUnavailable { element_id } => {
                write!(f, "Surface element '{}' is unavailable", element_id)
            }
            Self::UnsupportedAudioFormat { path, mime } => {
                write!(f, "Cannot play '{}' ({} unsupported)", path.display(), mime)
            }
            Self::InvalidFrameRate(rate) => write!(f, "Invalid frame rate: {}", rate),
            Self::FrameRateUnset => write!(f, "Frame rate must be set before starting the loop"),
            Self::Platform(e) => write!(f, "Platform error: {}", e),
        }
    }
}

impl std::error::Error for MomoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for MomoError {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

//=== PlatformError =======================================================

/// Event loop initialization and runtime errors.
///
/// These are fatal: if the event loop can't be created, nothing runs.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_implement_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<MomoError>();
        assert_error::<PlatformError>();
    }

    #[test]
    fn surface_error_names_element() {
        let err = MomoError::SurfaceUnavailable { element_id: "missing-id".into() };
        assert!(err.to_string().contains("missing-id"));
    }

    #[test]
    fn audio_error_names_mime() {
        let err = MomoError::UnsupportedAudioFormat {
            path: PathBuf::from("x.unknownext"),
            mime: "audio/unknownext".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("x.unknownext"));
        assert!(msg.contains("audio/unknownext"));
    }
}
