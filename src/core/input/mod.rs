//=========================================================================
// Input System
//=========================================================================
//
// High-level input interface owned by the context.
//
// Architecture:
//   EventQueue → InputSystem::apply() → StateTracker → queries
//
// Device lifecycle:
//   keyboard  Uninstalled ──install_keyboard()──► Installed
//             Installed ──uninstall_keyboard()──► Uninstalled (state cleared)
//   pointer   attached while a surface is bound
//
// Events for a device that is not installed are dropped.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
pub(crate) mod event_queue;
mod key_table;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{EventKind, InputEvent, KeyCode, MouseButton, SUPPRESSED_DEFAULTS};
pub use event_queue::EventSender;
pub use key_table::UnknownKeyName;
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use log::{debug, info, trace, warn};

//=== InputSystem =========================================================

/// Keyboard and pointer state with device install/uninstall lifecycle.
pub struct InputSystem {
    tracker: StateTracker,
    keyboard_installed: bool,
    pointer_attached: bool,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates an input system with no devices installed.
    pub fn new() -> Self {
        Self {
            tracker: StateTracker::new(),
            keyboard_installed: false,
            pointer_attached: false,
        }
    }

    //--- Device Lifecycle -------------------------------------------------

    /// Starts accepting keyboard events. Installing twice is a no-op.
    pub fn install_keyboard(&mut self) {
        if self.keyboard_installed {
            debug!(target: "momo::input", "Keyboard already installed");
            return;
        }
        self.tracker.reset_keys();
        self.keyboard_installed = true;
        info!(target: "momo::input", "Keyboard installed");
    }

    /// Stops accepting keyboard events and clears all key state.
    pub fn uninstall_keyboard(&mut self) {
        if !self.keyboard_installed {
            debug!(target: "momo::input", "Keyboard not installed");
            return;
        }
        self.tracker.reset_keys();
        self.keyboard_installed = false;
        info!(target: "momo::input", "Keyboard uninstalled");
    }

    pub fn is_keyboard_installed(&self) -> bool {
        self.keyboard_installed
    }

    pub(crate) fn attach_pointer(&mut self) {
        self.pointer_attached = true;
    }

    pub(crate) fn detach_pointer(&mut self) {
        self.tracker.reset_buttons();
        self.pointer_attached = false;
    }

    pub fn is_pointer_attached(&self) -> bool {
        self.pointer_attached
    }

    //--- Event Processing -------------------------------------------------

    /// Applies events in order. Returns how many were accepted.
    pub(crate) fn apply(&mut self, events: &[InputEvent]) -> usize {
        let mut accepted = 0;

        for event in events {
            let listening = if event.kind().is_keyboard() {
                self.keyboard_installed
            } else {
                self.pointer_attached
            };

            if listening {
                self.tracker.process_event(event);
                accepted += 1;
            } else {
                trace!(target: "momo::input", "No listener for {:?}", event);
            }
        }

        accepted
    }

    /// Clears the one-shot state at the end of a tick.
    pub(crate) fn end_tick(&mut self) {
        self.tracker.clear();
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.tracker.is_key_down(key)
    }

    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.tracker.is_key_down(key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.tracker.is_key_pressed(key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.tracker.is_key_released(key)
    }

    //--- By Name ----------------------------------------------------------
    //
    // Unknown names read as "never pressed": down/pressed/released are
    // false and up is true.
    //

    pub fn is_key_down_by_name(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|key| self.is_key_down(key))
    }

    pub fn is_key_up_by_name(&self, name: &str) -> bool {
        !self.is_key_down_by_name(name)
    }

    pub fn is_key_pressed_by_name(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|key| self.is_key_pressed(key))
    }

    pub fn is_key_released_by_name(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|key| self.is_key_released(key))
    }

    fn lookup(&self, name: &str) -> Option<KeyCode> {
        let key = KeyCode::from_name(name);
        if key.is_none() {
            warn!(target: "momo::input", "Unknown key name '{}'", name);
        }
        key
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.tracker.is_button_down(button)
    }

    pub fn is_button_up(&self, button: MouseButton) -> bool {
        !self.tracker.is_button_down(button)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.tracker.is_button_pressed(button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.tracker.is_button_released(button)
    }

    /// Cursor x in surface pixels.
    pub fn mouse_x(&self) -> f32 {
        self.tracker.mouse_position().0
    }

    /// Cursor y in surface pixels.
    pub fn mouse_y(&self) -> f32 {
        self.tracker.mouse_position().1
    }

    /// Scroll delta for the current tick (positive scrolls down).
    pub fn mouse_z(&self) -> f32 {
        self.tracker.wheel_delta()
    }

    /// Direct access to the underlying tracker.
    pub fn state(&self) -> &StateTracker {
        &self.tracker
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn installed() -> InputSystem {
        let mut input = InputSystem::new();
        input.install_keyboard();
        input.attach_pointer();
        input
    }

    #[test]
    fn key_events_ignored_until_installed() {
        let mut input = InputSystem::new();

        assert_eq!(input.apply(&[InputEvent::KeyDown(KeyCode::KeyA)]), 0);
        assert!(!input.is_key_down(KeyCode::KeyA));

        input.install_keyboard();
        assert_eq!(input.apply(&[InputEvent::KeyDown(KeyCode::KeyA)]), 1);
        assert!(input.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn pointer_events_ignored_until_attached() {
        let mut input = InputSystem::new();

        input.apply(&[InputEvent::PointerMoved { x: 4.0, y: 2.0 }]);
        assert_eq!((input.mouse_x(), input.mouse_y()), (0.0, 0.0));

        input.attach_pointer();
        input.apply(&[InputEvent::PointerMoved { x: 4.0, y: 2.0 }]);
        assert_eq!((input.mouse_x(), input.mouse_y()), (4.0, 2.0));
    }

    #[test]
    fn uninstall_clears_stale_flags() {
        let mut input = installed();

        input.apply(&[InputEvent::KeyDown(KeyCode::Space)]);
        assert!(input.is_key_pressed(KeyCode::Space));

        input.uninstall_keyboard();
        input.install_keyboard();

        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(!input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn double_install_keeps_state() {
        let mut input = installed();

        input.apply(&[InputEvent::KeyDown(KeyCode::KeyQ)]);
        input.install_keyboard();

        assert!(input.is_key_down(KeyCode::KeyQ));
    }

    #[test]
    fn name_queries_resolve_through_table() {
        let mut input = installed();

        input.apply(&[InputEvent::KeyDown(KeyCode::ArrowLeft)]);

        assert!(input.is_key_down_by_name("left"));
        assert!(input.is_key_pressed_by_name("left"));
        assert!(!input.is_key_up_by_name("left"));
    }

    #[test]
    fn unknown_name_reads_never_pressed() {
        let input = installed();

        assert!(!input.is_key_down_by_name("warp"));
        assert!(!input.is_key_pressed_by_name("warp"));
        assert!(!input.is_key_released_by_name("warp"));
        assert!(input.is_key_up_by_name("warp"));
    }

    #[test]
    fn up_is_negation_of_down() {
        let mut input = installed();

        assert!(input.is_button_up(MouseButton::Left));
        input.apply(&[InputEvent::ButtonDown(MouseButton::Left)]);
        assert!(!input.is_button_up(MouseButton::Left));
        assert!(input.is_key_up(KeyCode::KeyA));
    }

    #[test]
    fn end_tick_resets_edges_and_wheel() {
        let mut input = installed();

        input.apply(&[
            InputEvent::KeyDown(KeyCode::KeyA),
            InputEvent::ButtonUp(MouseButton::Right),
            InputEvent::Wheel { delta: 12.0 },
        ]);
        assert_eq!(input.mouse_z(), 12.0);

        input.end_tick();

        assert!(!input.is_key_pressed(KeyCode::KeyA));
        assert!(!input.is_button_released(MouseButton::Right));
        assert_eq!(input.mouse_z(), 0.0);
        assert!(input.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn detach_pointer_clears_buttons() {
        let mut input = installed();

        input.apply(&[InputEvent::ButtonDown(MouseButton::Left)]);
        input.detach_pointer();

        assert!(!input.is_button_down(MouseButton::Left));
        assert!(!input.is_pointer_attached());
    }
}
