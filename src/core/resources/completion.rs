//=========================================================================
// Completion
//=========================================================================
//
// Single-fire readiness cell shared between a resource handle and the
// host loader that fills it.
//
//   host loader ──complete(value)──► OnceLock<T> ──wake()──► event loop
//
// Only the first `complete()` stores a value and wakes the loop; later
// calls are ignored. Safe to complete from a loader thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::{Arc, OnceLock};

//=== Waker ===============================================================

/// Wakes the event loop so a fresh completion gets noticed promptly.
pub trait Waker: Send + Sync {
    fn wake(&self);
}

//=== Completion ==========================================================

/// Shared, single-fire readiness signal carrying a payload.
pub struct Completion<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    value: OnceLock<T>,
    waker: Option<Arc<dyn Waker>>,
}

impl<T> Completion<T> {
    /// Creates an incomplete cell that wakes `waker` when it fires.
    pub fn new(waker: Option<Arc<dyn Waker>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: OnceLock::new(),
                waker,
            }),
        }
    }

    /// Creates a cell that is already complete.
    pub fn ready(value: T) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(value);
        Self {
            inner: Arc::new(Inner {
                value: cell,
                waker: None,
            }),
        }
    }

    /// Stores the value. Returns `false` if already completed.
    pub fn complete(&self, value: T) -> bool {
        let first = self.inner.value.set(value).is_ok();
        if first {
            if let Some(waker) = &self.inner.waker {
                waker.wake();
            }
        }
        first
    }

    pub fn is_complete(&self) -> bool {
        self.inner.value.get().is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.value.get()
    }
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("value", &self.inner.value.get())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    struct CountingWaker(AtomicUsize);

    impl Waker for CountingWaker {
        fn wake(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn starts_incomplete() {
        let done = Completion::<u32>::new(None);
        assert!(!done.is_complete());
        assert_eq!(done.get(), None);
    }

    #[test]
    fn first_completion_wins() {
        let done = Completion::new(None);

        assert!(done.complete(1));
        assert!(!done.complete(2), "Second completion is ignored");
        assert_eq!(done.get(), Some(&1));
    }

    #[test]
    fn clones_share_state() {
        let done = Completion::new(None);
        let host_side = done.clone();

        host_side.complete("loaded");

        assert!(done.is_complete());
    }

    #[test]
    fn wakes_exactly_once() {
        let waker = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let done = Completion::new(Some(waker.clone() as Arc<dyn Waker>));

        done.complete(());
        done.complete(());

        assert_eq!(waker.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ready_is_complete_without_waking() {
        let done = Completion::ready(7u8);
        assert!(done.is_complete());
        assert!(!done.complete(8));
    }

    #[test]
    fn completes_from_loader_thread() {
        let done = Completion::new(None);
        let remote = done.clone();

        thread::spawn(move || remote.complete(42u32))
            .join()
            .expect("loader thread panicked");

        assert_eq!(done.get(), Some(&42));
    }
}
