//! Pointer-down subscriptions used for click-outside detection
//!
//! The application forwards every primary pointer press to a [`PointerHub`].
//! Each interested control holds a [`PointerSubscription`] carrying the
//! control's bounding rectangle; presses landing outside it are flagged until
//! the control drains them. Dropping a subscription deregisters it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use eframe::egui::{Pos2, Rect};

#[derive(Debug, Default)]
struct Listener {
    bounds: Option<Rect>,
    outside_pressed: bool,
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

/// Fan-out point for pointer presses
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<Listeners>>,
}

impl PointerHub {
    /// Create an empty hub
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener
    pub fn subscribe(&self) -> PointerSubscription {
        let mut listeners = self.inner.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, Listener::default());
        tracing::debug!("Pointer listener {} registered", id);

        PointerSubscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Record a pointer press at `pos`
    pub fn pointer_down(&self, pos: Pos2) {
        for listener in self.inner.borrow_mut().entries.values_mut() {
            if let Some(bounds) = listener.bounds {
                if !bounds.contains(pos) {
                    listener.outside_pressed = true;
                }
            }
        }
    }

    /// Number of live listeners
    #[allow(dead_code)]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// A live registration with a [`PointerHub`]
#[derive(Debug)]
pub struct PointerSubscription {
    id: u64,
    hub: Weak<RefCell<Listeners>>,
}

impl PointerSubscription {
    /// Update the region considered "inside"
    pub fn set_bounds(&self, bounds: Rect) {
        self.with_listener(|listener| listener.bounds = Some(bounds));
    }

    /// Whether a press landed outside the bounds since the last call
    pub fn take_outside_press(&self) -> bool {
        self.with_listener(|listener| std::mem::take(&mut listener.outside_pressed))
            .unwrap_or(false)
    }

    fn with_listener<R>(&self, f: impl FnOnce(&mut Listener) -> R) -> Option<R> {
        let hub = self.hub.upgrade()?;
        let mut listeners = hub.borrow_mut();
        listeners.entries.get_mut(&self.id).map(f)
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().entries.remove(&self.id);
            tracing::debug!("Pointer listener {} released", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn bounds() -> Rect {
        Rect::from_min_size(pos2(10.0, 10.0), vec2(100.0, 50.0))
    }

    #[test]
    fn test_press_outside_is_flagged_once() {
        let hub = PointerHub::new();
        let sub = hub.subscribe();
        sub.set_bounds(bounds());

        hub.pointer_down(pos2(500.0, 500.0));
        assert!(sub.take_outside_press());
        assert!(!sub.take_outside_press());
    }

    #[test]
    fn test_press_inside_is_ignored() {
        let hub = PointerHub::new();
        let sub = hub.subscribe();
        sub.set_bounds(bounds());

        hub.pointer_down(pos2(20.0, 20.0));
        assert!(!sub.take_outside_press());
    }

    #[test]
    fn test_listener_without_bounds_is_not_flagged() {
        let hub = PointerHub::new();
        let sub = hub.subscribe();
        hub.pointer_down(pos2(0.0, 0.0));
        assert!(!sub.take_outside_press());
    }

    #[test]
    fn test_drop_releases_listener() {
        let hub = PointerHub::new();
        let first = hub.subscribe();
        let second = hub.subscribe();
        assert_eq!(hub.listener_count(), 2);

        drop(first);
        assert_eq!(hub.listener_count(), 1);
        drop(second);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_inert() {
        let hub = PointerHub::new();
        let sub = hub.subscribe();
        drop(hub);
        sub.set_bounds(bounds());
        assert!(!sub.take_outside_press());
    }
}
