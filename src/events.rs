// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Change notification between editor views.
//!
//! The bus is an owned value created by the UI root and passed explicitly
//! to whoever needs it; subscriptions are scoped by token and can be
//! dropped at teardown. Delivery is synchronous, in registration order,
//! on the calling thread. A failing subscriber is logged and skipped so
//! one faulty view cannot break the others.

use crate::models::frame::FrameId;

/// Events published by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The active frame changed - by selection, playback, or a structural
    /// edit of the sequence.
    ActiveFrameChanged { frame: FrameId, index: usize },
}

/// Token returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler = Box<dyn FnMut(&EditorEvent) -> anyhow::Result<()>>;

/// Synchronous publish/subscribe dispatcher.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(Subscription, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for all future events. Subscribers are
    /// invoked in registration order.
    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&EditorEvent) -> anyhow::Result<()> + 'static,
    ) -> Subscription {
        let token = Subscription(self.next_id);
        self.next_id += 1;
        self.subscribers.push((token, Box::new(handler)));
        token
    }

    /// Drop a subscriber. Returns whether the token was registered.
    pub fn unsubscribe(&mut self, token: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(t, _)| *t != token);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber. Subscriber failures are
    /// logged and do not abort delivery to the remaining subscribers.
    pub fn publish(&mut self, event: &EditorEvent) {
        for (token, handler) in &mut self.subscribers {
            if let Err(err) = handler(event) {
                log::warn!("Event subscriber {token:?} failed: {err:#}");
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event() -> EditorEvent {
        let frame = crate::models::frame::Frame::default();
        EditorEvent::ActiveFrameChanged {
            frame: frame.id(),
            index: 0,
        }
    }

    #[test]
    fn delivers_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |_| {
                seen.borrow_mut().push(tag);
                Ok(())
            });
        }
        bus.publish(&event());
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn failing_subscriber_does_not_abort_delivery() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(|_| Err(anyhow::anyhow!("broken view")));
        {
            let seen = Rc::clone(&seen);
            bus.subscribe(move |_| {
                seen.borrow_mut().push("survivor");
                Ok(())
            });
        }
        bus.publish(&event());
        assert_eq!(*seen.borrow(), vec!["survivor"]);
    }

    #[test]
    fn unsubscribed_handlers_stop_receiving() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let token = {
            let count = Rc::clone(&count);
            bus.subscribe(move |_| {
                *count.borrow_mut() += 1;
                Ok(())
            })
        };
        bus.publish(&event());
        assert!(bus.unsubscribe(token));
        assert!(!bus.unsubscribe(token));
        bus.publish(&event());
        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
