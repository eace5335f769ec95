//! Single-subscriber event slots
//!
//! Each component event (`zoomChanged`, `pageChanged`, `thumbnailSelected`)
//! has exactly one listener. Registering a new handler replaces the old one.

use std::fmt;

pub struct Subscriber<T> {
    handler: Option<Box<dyn FnMut(T) + Send>>,
}

impl<T> Subscriber<T> {
    pub fn new() -> Self {
        Self { handler: None }
    }

    /// Install `handler`, dropping any previously installed one
    pub fn set(&mut self, handler: impl FnMut(T) + Send + 'static) {
        self.handler = Some(Box::new(handler));
    }

    pub fn is_set(&self) -> bool {
        self.handler.is_some()
    }

    /// Deliver `value` to the current handler, if any
    pub fn emit(&mut self, value: T) {
        if let Some(handler) = self.handler.as_mut() {
            handler(value);
        }
    }
}

impl<T> Default for Subscriber<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("is_set", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_emit_without_handler_is_noop() {
        let mut subscriber = Subscriber::<u32>::new();
        subscriber.emit(3);
        assert!(!subscriber.is_set());
    }

    #[test]
    fn test_new_handler_replaces_old() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut subscriber = Subscriber::new();

        let first = seen.clone();
        subscriber.set(move |v: u32| first.lock().unwrap().push(("first", v)));
        subscriber.emit(1);

        let second = seen.clone();
        subscriber.set(move |v: u32| second.lock().unwrap().push(("second", v)));
        subscriber.emit(2);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 1), ("second", 2)]);
    }
}
