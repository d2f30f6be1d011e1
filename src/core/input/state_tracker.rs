//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state tracking with per-tick edge flags.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Tick lifecycle: process_events() → [tick callback queries] → clear()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-tick edges (pressed/released).
///
/// Codes that were never seen read as not held, not pressed, not released.
pub struct StateTracker {
    //--- Persistent State (survives tick boundary) -----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),

    //--- Tick Edges (reset each tick via clear()) ------------------------
    keys_pressed_this_tick: HashSet<KeyCode>,
    keys_released_this_tick: HashSet<KeyCode>,
    buttons_pressed_this_tick: HashSet<MouseButton>,
    buttons_released_this_tick: HashSet<MouseButton>,

    //--- Per-tick Axis ---------------------------------------------------
    wheel_delta: f32,
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            keys_pressed_this_tick: HashSet::new(),
            keys_released_this_tick: HashSet::new(),
            buttons_pressed_this_tick: HashSet::new(),
            buttons_released_this_tick: HashSet::new(),
            wheel_delta: 0.0,
        }
    }

    //--- Tick Processing --------------------------------------------------

    /// Clears tick-specific edges and the wheel delta.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_tick.clear();
        self.keys_released_this_tick.clear();
        self.buttons_pressed_this_tick.clear();
        self.buttons_released_this_tick.clear();
        self.wheel_delta = 0.0;
    }

    /// Drops every key flag, held ones included.
    pub(crate) fn reset_keys(&mut self) {
        self.keys_down.clear();
        self.keys_pressed_this_tick.clear();
        self.keys_released_this_tick.clear();
    }

    /// Drops every button flag, held ones included.
    pub(crate) fn reset_buttons(&mut self) {
        self.buttons_down.clear();
        self.buttons_pressed_this_tick.clear();
        self.buttons_released_this_tick.clear();
    }

    /// Processes input events in order, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    pub(crate) fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                // Only mark as pressed if it wasn't already down
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_tick.insert(key);
                }
            }

            InputEvent::KeyUp(key) => {
                self.keys_down.remove(&key);
                self.keys_released_this_tick.insert(key);
            }

            InputEvent::ButtonDown(button) => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed_this_tick.insert(button);
                }
            }

            InputEvent::ButtonUp(button) => {
                self.buttons_down.remove(&button);
                self.buttons_released_this_tick.insert(button);
            }

            InputEvent::PointerMoved { x, y } => {
                self.mouse_position = (x, y);
            }

            InputEvent::Wheel { delta } => {
                // Overwrite, not accumulate
                self.wheel_delta = delta;
            }

            InputEvent::ContextMenu => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN (one tick only).
    ///
    /// Use for discrete actions like jumping or toggling menus.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_tick.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if the key went up this tick.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_tick.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse Buttons
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed_this_tick.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released_this_tick.contains(&button)
    }

    //=====================================================================
    // Query API - Axes
    //=====================================================================

    /// Returns mouse position in surface coordinates (pixels, top-left origin).
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Returns the last wheel delta seen this tick (0 if none).
    pub fn wheel_delta(&self) -> f32 {
        self.wheel_delta
    }

    //=====================================================================
    // Query API - Iteration
    //=====================================================================

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Returns an iterator over all mouse buttons currently held.
    pub fn buttons_down(&self) -> impl Iterator<Item = &MouseButton> {
        self.buttons_down.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
