//! Notification bridge - the auth-changed broadcast channel
//!
//! The controller publishes every committed transition here, carrying the new
//! `Option<Identity>`. Listeners (profile badge, nav buttons, greeting text)
//! subscribe independently and are invoked fire-and-forget: the publisher
//! never awaits them, their order is unspecified, and a panicking listener is
//! isolated so its siblings still run.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::models::Identity;

/// A subscribed auth-change callback
pub type AuthListener = Box<dyn Fn(Option<&Identity>)>;

/// Page-lifetime broadcast channel for auth transitions
#[derive(Default)]
pub struct AuthBridge {
    listeners: Vec<AuthListener>,
}

impl AuthBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for auth-changed notifications
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(Option<&Identity>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Notify every listener of the new state.
    ///
    /// A panic in one listener is caught and logged; remaining listeners
    /// still run and nothing propagates back to the publisher.
    pub fn publish(&self, identity: Option<&Identity>) {
        for (index, listener) in self.listeners.iter().enumerate() {
            if catch_unwind(AssertUnwindSafe(|| listener(identity))).is_err() {
                log::warn!("auth listener {index} panicked; continuing with remaining listeners");
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_every_listener_observes_the_published_identity() {
        let mut bridge = AuthBridge::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for _ in 0..3 {
            let seen = Rc::clone(&seen);
            bridge.subscribe(move |identity| {
                seen.borrow_mut()
                    .push(identity.map(|i| i.display_name.clone()));
            });
        }

        bridge.publish(Some(&Identity::local("ada")));
        bridge.publish(None);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[..3], vec![Some("ada".to_string()); 3][..]);
        assert_eq!(seen[3..], vec![None; 3][..]);
    }

    #[test]
    fn test_panicking_listener_does_not_stop_siblings() {
        let mut bridge = AuthBridge::new();
        let seen = Rc::new(RefCell::new(0));

        bridge.subscribe(|_| panic!("listener blew up"));
        {
            let seen = Rc::clone(&seen);
            bridge.subscribe(move |_| *seen.borrow_mut() += 1);
        }

        // Keep the panic message out of the test output.
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        bridge.publish(None);
        std::panic::set_hook(previous_hook);

        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn test_publish_with_no_listeners_is_a_no_op() {
        let bridge = AuthBridge::new();
        assert!(bridge.is_empty());
        bridge.publish(Some(&Identity::local("ada")));
    }
}
