use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub type FrameCallback = Box<dyn FnOnce()>;

/// Source of display frames. A callback handed to `request_frame` runs once, on
/// the next frame.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request_frame(&self, callback: FrameCallback) {
        (**self).request_frame(callback)
    }
}

/// Scheduler driven by hand, one frame per [`FrameQueue::run_frame`] call.
///
/// The wasm host calls `run_frame` from the page's animation frame callback;
/// tests call it directly.
#[derive(Default)]
pub struct FrameQueue {
    pending: RefCell<VecDeque<FrameCallback>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Runs the callbacks queued so far and returns how many ran. Requests made
    /// while the frame runs wait for the next call.
    pub fn run_frame(&self) -> usize {
        let batch = std::mem::take(&mut *self.pending.borrow_mut());
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }

    /// Drops every queued callback without running it.
    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}

/// Shared stop flag for a repeating task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_run_once_in_order() {
        let queue = FrameQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = Rc::clone(&log);
            queue.request_frame(Box::new(move || log.borrow_mut().push(i)));
        }
        assert_eq!(queue.pending(), 3);
        assert_eq!(queue.run_frame(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert_eq!(queue.run_frame(), 0);
    }

    #[test]
    fn requests_during_a_frame_wait_for_the_next() {
        let queue = Rc::new(FrameQueue::new());
        let inner = Rc::clone(&queue);
        queue.request_frame(Box::new(move || {
            inner.request_frame(Box::new(|| {}));
        }));
        assert_eq!(queue.run_frame(), 1);
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
