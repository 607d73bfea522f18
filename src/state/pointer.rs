//! Pointer Module - Pointer-down classification and subscription registry
//!
//! The broadcaster is the single root-level pointer-down listener. It
//! classifies the raw button code, captures the modifier keys, and fans the
//! event out to every matching subscription.
//! Does NOT own stdin (that is the input module).
//!
//! # API
//!
//! - `subscribe(button, callback, modifiers)` - Register a callback, get a handle
//! - `unsubscribe(handle)` - Remove it again (no-op if already removed)
//! - `dispatch(event)` - Fan a pointer-down out to matching subscriptions
//! - `subscription_count(button)` - Live registrations (leak detection)
//!
//! # Matching
//!
//! A subscription fires when the event's classified button equals its button
//! and either it has no modifier requirement, or every one of the four
//! modifier flags equals the required flag exactly.
//!
//! # Example
//!
//! ```ignore
//! use spark_focus::state::{Modifiers, PointerBroadcaster, PointerButton, PointerEvent};
//!
//! let broadcaster = PointerBroadcaster::new();
//!
//! // Ctrl+click only
//! let handle = broadcaster.subscribe(
//!     PointerButton::Primary,
//!     |event| println!("ctrl-click at ({}, {})", event.x, event.y),
//!     Some(Modifiers::ctrl()),
//! );
//!
//! broadcaster.dispatch(PointerEvent::primary(3, 4).with_modifiers(Modifiers::ctrl()));
//! broadcaster.unsubscribe(handle);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use super::modifiers::Modifiers;
use crate::engine;

// =============================================================================
// TYPES
// =============================================================================

/// Pointer button, classified from a raw button code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Every button, in code order.
    pub const ALL: [PointerButton; 3] = [Self::Primary, Self::Middle, Self::Secondary];

    /// Classify a raw button code (0 primary, 1 middle, 2 secondary).
    ///
    /// Unrecognized codes are treated as the primary button.
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => {
                debug!(code = other, "unrecognized pointer button code, treating as primary");
                Self::Primary
            }
        }
    }

    /// The canonical raw code for this button.
    pub fn code(self) -> i16 {
        match self {
            Self::Primary => 0,
            Self::Middle => 1,
            Self::Secondary => 2,
        }
    }
}

/// A root-level pointer-down event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Raw button code as delivered by the host
    pub code: i16,
    /// X coordinate (0-indexed)
    pub x: u16,
    /// Y coordinate (0-indexed)
    pub y: u16,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Component index the pointer landed on (filled by dispatch when absent)
    pub target: Option<usize>,
}

impl PointerEvent {
    /// Create a pointer-down event from a raw button code.
    pub fn down(code: i16, x: u16, y: u16) -> Self {
        Self {
            code,
            x,
            y,
            modifiers: Modifiers::default(),
            target: None,
        }
    }

    /// Create a primary-button pointer-down event.
    pub fn primary(x: u16, y: u16) -> Self {
        Self::down(PointerButton::Primary.code(), x, y)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_target(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }

    /// The classified button.
    pub fn button(&self) -> PointerButton {
        PointerButton::from_code(self.code)
    }
}

// =============================================================================
// HANDLER TYPES
// =============================================================================

/// Handler for pointer-down events.
///
/// Rc so dispatch can snapshot the matching handlers and release the registry
/// before invoking any of them.
pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

/// Identifies one registration. Returned by [`PointerBroadcaster::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    button: PointerButton,
    id: usize,
}

impl SubscriptionHandle {
    /// The button this registration listens to.
    pub fn button(&self) -> PointerButton {
        self.button
    }
}

// =============================================================================
// SUBSCRIPTION REGISTRY
// =============================================================================

struct Subscription {
    id: usize,
    modifiers: Option<Modifiers>,
    callback: PointerHandler,
}

impl Subscription {
    fn matches(&self, modifiers: &Modifiers) -> bool {
        self.modifiers.is_none_or(|required| required == *modifiers)
    }
}

#[derive(Default)]
struct SubscriptionRegistry {
    primary: Vec<Subscription>,
    middle: Vec<Subscription>,
    secondary: Vec<Subscription>,
    next_id: usize,
}

impl SubscriptionRegistry {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn list(&self, button: PointerButton) -> &Vec<Subscription> {
        match button {
            PointerButton::Primary => &self.primary,
            PointerButton::Middle => &self.middle,
            PointerButton::Secondary => &self.secondary,
        }
    }

    fn list_mut(&mut self, button: PointerButton) -> &mut Vec<Subscription> {
        match button {
            PointerButton::Primary => &mut self.primary,
            PointerButton::Middle => &mut self.middle,
            PointerButton::Secondary => &mut self.secondary,
        }
    }
}

// =============================================================================
// BROADCASTER
// =============================================================================

/// Owned pointer-down subscription registry.
///
/// Clones share the same registry, so one broadcaster can be handed to every
/// component that needs it.
#[derive(Clone, Default)]
pub struct PointerBroadcaster {
    registry: Rc<RefCell<SubscriptionRegistry>>,
}

impl PointerBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `button`.
    ///
    /// `modifiers: None` matches every modifier combination. Registering the
    /// same callback twice yields two independent registrations.
    pub fn subscribe<F>(
        &self,
        button: PointerButton,
        callback: F,
        modifiers: Option<Modifiers>,
    ) -> SubscriptionHandle
    where
        F: Fn(&PointerEvent) + 'static,
    {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id();
        reg.list_mut(button).push(Subscription {
            id,
            modifiers,
            callback: Rc::new(callback),
        });
        trace!(?button, id, ?modifiers, "pointer subscription added");
        SubscriptionHandle { button, id }
    }

    /// Remove a registration. Returns false if it was already removed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut reg = self.registry.borrow_mut();
        let list = reg.list_mut(handle.button);
        let before = list.len();
        list.retain(|sub| sub.id != handle.id);
        let removed = list.len() != before;
        if removed {
            trace!(button = ?handle.button, id = handle.id, "pointer subscription removed");
        }
        removed
    }

    /// Check whether a registration is still live.
    pub fn is_subscribed(&self, handle: SubscriptionHandle) -> bool {
        self.registry
            .borrow()
            .list(handle.button)
            .iter()
            .any(|sub| sub.id == handle.id)
    }

    /// Dispatch a pointer-down event to all matching subscriptions, in
    /// registration order. Returns how many callbacks ran.
    ///
    /// An event without a target is resolved through the hit grid first.
    /// Subscriptions added or removed by a callback take effect from the next
    /// dispatch.
    pub fn dispatch(&self, mut event: PointerEvent) -> usize {
        if event.target.is_none() {
            event.target = engine::hit_test(event.x, event.y);
        }
        let button = event.button();

        let matching: Vec<PointerHandler> = self
            .registry
            .borrow()
            .list(button)
            .iter()
            .filter(|sub| sub.matches(&event.modifiers))
            .map(|sub| sub.callback.clone())
            .collect();

        trace!(
            ?button,
            hit = ?event.target,
            modifiers = ?event.modifiers,
            matched = matching.len(),
            "pointer down"
        );

        for callback in &matching {
            callback(&event);
        }
        matching.len()
    }

    /// Number of live registrations for a button.
    pub fn subscription_count(&self, button: PointerButton) -> usize {
        self.registry.borrow().list(button).len()
    }

    /// Number of live registrations across all buttons.
    pub fn len(&self) -> usize {
        PointerButton::ALL
            .iter()
            .map(|&button| self.subscription_count(button))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PointerBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerBroadcaster")
            .field("primary", &self.subscription_count(PointerButton::Primary))
            .field("middle", &self.subscription_count(PointerButton::Middle))
            .field("secondary", &self.subscription_count(PointerButton::Secondary))
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
