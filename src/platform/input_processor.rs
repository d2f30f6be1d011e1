//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into momo InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent → InputBuffer
//
// Stateful scale tracking: caches the window's scale factor so cursor
// positions arrive in logical (surface) pixels. Unmapped keys (F13-F24,
// media keys, exotic layouts) are filtered (returns None).
//
// Wheel deltas follow the surface convention: pixels, positive scrolls
// down. Line-based deltas are converted at `LINE_HEIGHT` pixels per line.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

/// Pixels scrolled per wheel line.
pub(crate) const LINE_HEIGHT: f32 = 40.0;

//=== InputProcessor ======================================================

/// Converts Winit events to InputEvents with stateful scale tracking.
pub(crate) struct InputProcessor {
    scale_factor: f64,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    //--- Scale State Management -------------------------------------------

    /// Updates the cached scale factor (applied to subsequent events).
    pub(crate) fn update_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    //--- Event Processing -------------------------------------------------

    /// Converts Winit KeyEvent to InputEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        match key_event.physical_key {
            PhysicalKey::Code(code) => self.process_key(code, key_event.state),
            _ => None,
        }
    }

    pub(crate) fn process_key(
        &self,
        code: WinitKeyCode,
        state: ElementState,
    ) -> Option<InputEvent> {
        let key = KeyCode::from(code);

        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }

    /// Converts Winit mouse button event to InputEvent.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::ButtonDown(button),
            ElementState::Released => InputEvent::ButtonUp(button),
        }
    }

    /// Converts a physical cursor position to surface pixels.
    pub(crate) fn process_mouse_move(&self, position: PhysicalPosition<f64>) -> InputEvent {
        let logical = position.to_logical::<f64>(self.scale_factor);
        InputEvent::PointerMoved {
            x: logical.x as f32,
            y: logical.y as f32,
        }
    }

    /// Converts a scroll to a wheel delta in pixels, positive down.
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, lines) => -lines * LINE_HEIGHT,
            MouseScrollDelta::PixelDelta(position) => {
                -(position.to_logical::<f64>(self.scale_factor).y as f32)
            }
        };
        InputEvent::Wheel { delta }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to momo key codes.
///
/// Left and right modifier keys share one code, as do the main-row and
/// numpad Enter. Keys without a legacy code return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Navigation ---------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,
            PageUp => KeyCode::PageUp,
            PageDown => KeyCode::PageDown,
            Home => KeyCode::Home,
            End => KeyCode::End,
            Insert => KeyCode::Insert,
            Delete => KeyCode::Delete,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft | ShiftRight => KeyCode::Shift,
            ControlLeft | ControlRight => KeyCode::Ctrl,
            AltLeft | AltRight => KeyCode::Alt,
            SuperLeft => KeyCode::LeftMeta,
            SuperRight => KeyCode::RightMeta,
            ContextMenu => KeyCode::Select,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Pause => KeyCode::PauseBreak,
            CapsLock => KeyCode::CapsLock,
            NumLock => KeyCode::NumLock,
            ScrollLock => KeyCode::ScrollLock,

            //--- Numpad -------------------------------------------------------

            Numpad0 => KeyCode::Pad0,
            Numpad1 => KeyCode::Pad1,
            Numpad2 => KeyCode::Pad2,
            Numpad3 => KeyCode::Pad3,
            Numpad4 => KeyCode::Pad4,
            Numpad5 => KeyCode::Pad5,
            Numpad6 => KeyCode::Pad6,
            Numpad7 => KeyCode::Pad7,
            Numpad8 => KeyCode::Pad8,
            Numpad9 => KeyCode::Pad9,
            NumpadMultiply => KeyCode::Multiply,
            NumpadAdd => KeyCode::Add,
            NumpadSubtract => KeyCode::Subtract,
            NumpadDivide => KeyCode::Divide,

            //--- Function -----------------------------------------------------

            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,

            //--- Punctuation --------------------------------------------------

            Semicolon => KeyCode::Semicolon,
            Equal => KeyCode::Equals,
            Comma => KeyCode::Comma,
            Minus => KeyCode::Dash,
            Period => KeyCode::Period,
            Slash => KeyCode::ForwardSlash,
            Backquote => KeyCode::Tilde,
            BracketLeft => KeyCode::OpenBrace,
            Backslash => KeyCode::Backslash,
            BracketRight => KeyCode::CloseBrace,
            Quote => KeyCode::Quote,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to momo buttons.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(n) => MouseButton::Other(n),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn starts_at_unit_scale() {
        let processor = InputProcessor::new();
        let event = processor.process_mouse_move(PhysicalPosition::new(7.0, 9.0));
        assert_eq!(event, InputEvent::PointerMoved { x: 7.0, y: 9.0 });
    }

    #[test]
    fn key_press_and_release() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.process_key(WinitKeyCode::KeyS, ElementState::Pressed),
            Some(InputEvent::KeyDown(KeyCode::KeyS))
        );
        assert_eq!(
            processor.process_key(WinitKeyCode::KeyS, ElementState::Released),
            Some(InputEvent::KeyUp(KeyCode::KeyS))
        );
    }

    #[test]
    fn unmapped_key_filtered() {
        let processor = InputProcessor::new();

        assert!(matches!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified));
        assert_eq!(processor.process_key(WinitKeyCode::F13, ElementState::Pressed), None);
    }

    #[test]
    fn mouse_button_events() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::ButtonDown(MouseButton::Left)
        );
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Right, ElementState::Released),
            InputEvent::ButtonUp(MouseButton::Right)
        );
    }

    #[test]
    fn mouse_move_scaled_to_logical() {
        let mut processor = InputProcessor::new();
        processor.update_scale_factor(2.0);

        let event = processor.process_mouse_move(PhysicalPosition::new(200.0, 90.0));

        assert_eq!(event, InputEvent::PointerMoved { x: 100.0, y: 45.0 });
    }

    #[test]
    fn wheel_lines_to_pixels_positive_down() {
        let processor = InputProcessor::new();

        // Winit reports scrolling down as negative lines.
        let event = processor.process_wheel(MouseScrollDelta::LineDelta(0.0, -2.0));
        assert_eq!(event, InputEvent::Wheel { delta: 80.0 });
    }

    #[test]
    fn wheel_pixels_negated() {
        let processor = InputProcessor::new();

        let delta = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 12.0));
        let event = processor.process_wheel(delta);
        assert_eq!(event, InputEvent::Wheel { delta: -12.0 });
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_special() {
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftRight), KeyCode::Shift);
        assert_eq!(KeyCode::from(WinitKeyCode::Backquote), KeyCode::Tilde);
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad7).code(), 103);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Back);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }
}
