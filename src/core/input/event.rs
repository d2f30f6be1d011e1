//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (e.g. Winit) into
// a unified, engine-friendly format used by the input subsystem.
//
// Responsibilities:
// - Represent keyboard and mouse inputs in a stable, portable way
// - Carry each key's legacy device code (`KeyCode::code()`)
// - Classify events by kind, including which kinds suppress the host's
//   default handling
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    EventQueue (ordered, drained once per tick)
//         ↓
//    StateTracker (held / pressed / released)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Button numbering follows the DOM convention: left = 0, middle = 1,
/// right = 2, back = 3, forward = 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Middle button (wheel click).
    Middle,

    /// Secondary button (typically right).
    Right,

    /// Side "back" button.
    Back,

    /// Side "forward" button.
    Forward,

    /// Any other button, by platform index.
    Other(u16),
}

impl MouseButton {
    /// Numeric button index.
    pub fn index(self) -> u16 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::Back => 3,
            Self::Forward => 4,
            Self::Other(n) => n,
        }
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Each variant's discriminant is the legacy device key code, so
/// `KeyCode::KeyA.code() == 65`. Symbolic names (`"a"`, `"space"`,
/// `"pad_5"`) resolve through the key table, see
/// [`KeyCode::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KeyCode {
    //--- Editing / Control ------------------------------------------------
    Backspace = 8,
    Tab = 9,
    Enter = 13,
    Shift = 16,
    Ctrl = 17,
    Alt = 18,
    PauseBreak = 19,
    CapsLock = 20,
    Escape = 27,
    Space = 32,

    //--- Navigation -------------------------------------------------------
    PageUp = 33,
    PageDown = 34,
    End = 35,
    Home = 36,
    ArrowLeft = 37,
    ArrowUp = 38,
    ArrowRight = 39,
    ArrowDown = 40,
    Insert = 45,
    Delete = 46,

    //--- Numeric Keys -----------------------------------------------------
    Digit0 = 48,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA = 65,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,

    //--- Meta -------------------------------------------------------------
    LeftMeta = 91,
    RightMeta = 92,
    Select = 93,

    //--- Numpad -----------------------------------------------------------
    Pad0 = 96,
    Pad1,
    Pad2,
    Pad3,
    Pad4,
    Pad5,
    Pad6,
    Pad7,
    Pad8,
    Pad9,
    Multiply = 106,
    Add = 107,
    Subtract = 109,
    Divide = 111,

    //--- Function Keys ----------------------------------------------------
    F1 = 112,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    //--- Locks ------------------------------------------------------------
    NumLock = 144,
    ScrollLock = 145,

    //--- Punctuation ------------------------------------------------------
    Semicolon = 186,
    Equals = 187,
    Comma = 188,
    Dash = 189,
    Period = 190,
    ForwardSlash = 191,
    Tilde = 192,
    OpenBrace = 219,
    Backslash = 220,
    CloseBrace = 221,
    Quote = 222,

    /// Fallback for keys the platform reports but the table doesn't cover.
    Unidentified = 0,
}

impl KeyCode {
    /// Legacy device key code.
    pub fn code(self) -> u16 {
        self as u16
    }
}

//=== EventKind ===========================================================

/// Event category, independent of payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    ButtonDown,
    ButtonUp,
    PointerMove,
    Wheel,
    ContextMenu,
}

/// Event kinds whose default host handling (context menu, page scroll,
/// focus change) is suppressed so the surface stays interactive.
///
/// The context hands the pointer kinds to the host when a surface is
/// bound and the keyboard kinds when the keyboard is installed.
pub const SUPPRESSED_DEFAULTS: &[EventKind] = &[
    EventKind::KeyDown,
    EventKind::KeyUp,
    EventKind::ButtonDown,
    EventKind::ButtonUp,
    EventKind::PointerMove,
    EventKind::Wheel,
    EventKind::ContextMenu,
];

impl EventKind {
    /// Returns `true` if the host's default action for this kind is
    /// swallowed by the input subsystem.
    pub fn suppresses_default(self) -> bool {
        SUPPRESSED_DEFAULTS.contains(&self)
    }

    /// Keyboard kinds require the keyboard to be installed.
    pub fn is_keyboard(self) -> bool {
        matches!(self, Self::KeyDown | Self::KeyUp)
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: keyboard transitions
/// - **ButtonDown/ButtonUp**: pointer button transitions
/// - **PointerMoved**: cursor position in surface-local pixels
/// - **Wheel**: vertical scroll delta in pixels, positive scrolls down
/// - **ContextMenu**: the host asked to open a context menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    PointerMoved { x: f32, y: f32 },
    Wheel { delta: f32 },
    ContextMenu,
}

impl InputEvent {
    /// Returns the event's kind.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::ButtonDown(_) => EventKind::ButtonDown,
            Self::ButtonUp(_) => EventKind::ButtonUp,
            Self::PointerMoved { .. } => EventKind::PointerMove,
            Self::Wheel { .. } => EventKind::Wheel,
            Self::ContextMenu => EventKind::ContextMenu,
        }
    }

    /// Continuous events overwrite state, so consecutive ones coalesce
    /// (last value wins).
    pub fn is_continuous(&self) -> bool {
        matches!(self.kind(), EventKind::PointerMove | EventKind::Wheel)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
