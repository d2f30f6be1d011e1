//=========================================================================
// Event Queue
//=========================================================================
//
// Ordered input event queue between the platform and the input system.
//
// Architecture:
//   EventSender (platform) → bounded channel → EventQueue::drain() → Vec
//
// Events are delivered in arrival order and drained once per pump, before
// the tick callback runs. A full queue drops new events with a warning.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::event::InputEvent;

//=== EventSender =========================================================

/// Producer half handed to the platform layer.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<InputEvent>,
}

impl EventSender {
    /// Enqueues an event. Returns `false` if it was dropped.
    ///
    /// Never blocks: the producer and consumer share one thread.
    pub fn push(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(target: "momo::input", "Event queue full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(event)) => {
                warn!(target: "momo::input", "Event queue closed, dropping {:?}", event);
                false
            }
        }
    }
}

//=== EventQueue ==========================================================

/// Consumer half, owned by the context.
pub(crate) struct EventQueue {
    receiver: Receiver<InputEvent>,
    sender: Sender<InputEvent>,
    drained: Vec<InputEvent>,
}

impl EventQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            receiver,
            sender,
            drained: Vec::with_capacity(capacity.min(64)),
        }
    }

    /// Returns a new producer handle.
    pub(crate) fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Removes every queued event, preserving order.
    ///
    /// The returned slice is valid until the next drain.
    pub(crate) fn drain(&mut self) -> &[InputEvent] {
        self.drained.clear();

        loop {
            match self.receiver.try_recv() {
                Ok(event) => self.drained.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if !self.drained.is_empty() {
            trace!(target: "momo::input", "Drained {} events", self.drained.len());
        }

        &self.drained
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
