//! Callback registries used to notify renderers and alert sinks.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Callback invoked with a borrowed event
pub type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// A list of subscribers for events of type `E`
///
/// Clones share the same subscriber list.
pub struct Subscribers<E> {
    callbacks: Arc<Mutex<Vec<Callback<E>>>>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self { callbacks: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Registers a callback
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.callbacks.lock().push(Box::new(callback));
    }

    /// Invokes every callback in registration order
    ///
    /// Callbacks run while the registry is locked and must not subscribe from
    /// inside the callback.
    pub fn notify(&self, event: &E) {
        let callbacks = self.callbacks.lock();
        for callback in callbacks.iter() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Subscribers<E> {
    fn clone(&self) -> Self {
        Self { callbacks: Arc::clone(&self.callbacks) }
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = match self.callbacks.try_lock() {
            Some(callbacks) => callbacks.len(),
            None => 0,
        };
        write!(f, "<{} callbacks>", count)
    }
}
