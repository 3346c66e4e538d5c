//! Resource Loading
//!
//! Fetching is the host's business. When an element is triggered the engine
//! hands the host's [`ResourceLoader`] the element, its pending resource
//! identifier, and a single-shot [`LoadCompletion`]. Whatever the loader
//! eventually reports comes back through a oneshot channel; completions for
//! different elements may arrive in any order.

use tokio::sync::oneshot;

use super::element::Element;
use crate::error::LoadError;

/// Outcome delivered through a [`LoadCompletion`].
pub type LoadOutcome = Result<(), LoadError>;

/// Begins asynchronous loads on behalf of triggered elements.
pub trait ResourceLoader: Send + Sync {
    /// Start fetching `resource` for `element` and report through `done`.
    ///
    /// Dropping `done` without reporting abandons the load; the element then
    /// stays hidden.
    fn begin_load(&self, element: &dyn Element, resource: Option<&str>, done: LoadCompletion);
}

/// Single-shot notification that a load finished.
#[derive(Debug)]
pub struct LoadCompletion {
    sender: oneshot::Sender<LoadOutcome>,
}

impl LoadCompletion {
    /// Create a completion handle and the receiver the engine waits on.
    pub(crate) fn channel() -> (Self, oneshot::Receiver<LoadOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// The resource arrived and was assigned to the element.
    pub fn complete(self) {
        self.report(Ok(()));
    }

    /// The load failed. The element stays hidden.
    pub fn fail(self, error: LoadError) {
        self.report(Err(error));
    }

    pub fn report(self, outcome: LoadOutcome) {
        // The receiver is gone only when the runtime is shutting down.
        let _ = self.sender.send(outcome);
    }
}
