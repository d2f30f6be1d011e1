//=========================================================================
// Input Buffer
//
// Collects converted window events between two pumps, in arrival order,
// before they are pushed into the context's event queue.
//
// Responsibilities:
// - Preserve the relative order of every event
// - Drop repeated discrete inputs (e.g. key repeat KeyDown)
// - Coalesce runs of continuous inputs (pointer moves, wheel) so a burst
//   of motion costs one queue slot
//
// Notes:
// Only *consecutive* continuous events of the same kind are merged, so a
// move → click → move sequence keeps both positions around the click.
// Within a run the last pointer position and the last wheel delta win.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
pub struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a typical frame's worth of input.
    //
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Push -------------------------------------------------------------
    pub fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // Merges into the previous event when it is of the same kind.
    //
    fn push_continuous(&mut self, event: InputEvent) {
        match (self.events.last_mut(), event) {
            (
                Some(InputEvent::PointerMoved { x, y }),
                InputEvent::PointerMoved { x: nx, y: ny },
            ) => {
                *x = nx;
                *y = ny;
            }
            (Some(InputEvent::Wheel { delta }), InputEvent::Wheel { delta: latest }) => {
                *delta = latest;
            }
            _ => self.events.push(event),
        }
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events are ignored to prevent flooding.
    //
    fn push_discrete(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the buffered events in order and leaves the buffer empty,
    // keeping its allocation.
    //
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    //--- Utilities --------------------------------------------------------
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
