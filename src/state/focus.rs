//! Focus Coordinator - Exactly one active region, closed on outside click
//!
//! Owns the active region id for the whole application:
//! - `ActiveRegionState` - the reactive cell ("" means no region active)
//! - Outside-click dismissal via one broadcaster subscription
//! - Explicit teardown that removes that subscription
//!
//! Activating a region implicitly closes whichever region was active before;
//! there is no separate close step.
//!
//! # Example
//!
//! ```ignore
//! use spark_focus::state::{FocusCoordinator, PointerBroadcaster, PointerEvent};
//!
//! let broadcaster = PointerBroadcaster::new();
//! let focus = FocusCoordinator::new(&broadcaster);
//!
//! focus.set_active_region("menu");
//! assert!(focus.is_active("menu"));
//!
//! // Pointer-down outside every focus region / trigger
//! broadcaster.dispatch(PointerEvent::primary(70, 20));
//! assert_eq!(focus.active_region(), "");
//!
//! focus.teardown();
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::{debug, trace};

use super::modifiers::Modifiers;
use super::pointer::{PointerBroadcaster, PointerButton, PointerEvent, SubscriptionHandle};
use crate::engine;
use crate::types::NodeFlags;

// =============================================================================
// ACTIVE REGION STATE
// =============================================================================

/// The single active-region cell.
///
/// Clones share the same signal. Reads inside an effect create a reactive
/// dependency, so bindings re-evaluate when the active region changes.
#[derive(Clone)]
pub struct ActiveRegionState {
    value: Signal<String>,
}

impl ActiveRegionState {
    pub fn new() -> Self {
        Self { value: signal(String::new()) }
    }

    /// The active region id, or "" when none is active.
    pub fn get(&self) -> String {
        self.value.get()
    }

    /// Make `id` the active region. An empty id deactivates.
    pub fn set(&self, id: impl Into<String>) {
        let id = id.into();
        if id.is_empty() {
            debug!("focus region cleared");
        } else {
            debug!(region = %id, "focus region activated");
        }
        self.value.set(id);
    }

    pub fn clear(&self) {
        self.set(String::new());
    }

    /// True if `id` is the active region. Never true for an empty id.
    pub fn is_active(&self, id: &str) -> bool {
        !id.is_empty() && self.value.get() == id
    }

    /// True if no region is active.
    pub fn is_empty(&self) -> bool {
        self.value.get().is_empty()
    }

    /// The underlying signal, for effects and deriveds.
    pub fn signal(&self) -> Signal<String> {
        self.value.clone()
    }
}

impl Default for ActiveRegionState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Which pointer-downs count as dismissal candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOptions {
    pub dismiss_button: PointerButton,
    /// None matches every modifier combination.
    pub dismiss_modifiers: Option<Modifiers>,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            dismiss_button: PointerButton::Primary,
            dismiss_modifiers: None,
        }
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

struct CoordinatorInner {
    state: ActiveRegionState,
    broadcaster: PointerBroadcaster,
    subscription: Cell<Option<SubscriptionHandle>>,
}

impl CoordinatorInner {
    fn teardown(&self) {
        if let Some(handle) = self.subscription.take() {
            self.broadcaster.unsubscribe(handle);
            debug!("focus coordinator torn down");
        }
    }
}

impl Drop for CoordinatorInner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Governs which single focus region is open.
///
/// Cheap to clone; clones share state. Pass it explicitly to every
/// [`focus_region`](crate::primitives::focus_region) and
/// [`focus_trigger`](crate::primitives::focus_trigger) that needs it.
#[derive(Clone)]
pub struct FocusCoordinator {
    inner: Rc<CoordinatorInner>,
}

impl FocusCoordinator {
    /// Create a coordinator that dismisses on any primary pointer-down outside
    /// every focus region and trigger.
    pub fn new(broadcaster: &PointerBroadcaster) -> Self {
        Self::with_options(broadcaster, FocusOptions::default())
    }

    pub fn with_options(broadcaster: &PointerBroadcaster, options: FocusOptions) -> Self {
        let state = ActiveRegionState::new();

        // Captures the state only, never the coordinator: the broadcaster must
        // not keep the coordinator alive.
        let dismiss_state = state.clone();
        let handle = broadcaster.subscribe(
            options.dismiss_button,
            move |event| dismiss_outside(&dismiss_state, event),
            options.dismiss_modifiers,
        );
        debug!(button = ?options.dismiss_button, "focus coordinator mounted");

        Self {
            inner: Rc::new(CoordinatorInner {
                state,
                broadcaster: broadcaster.clone(),
                subscription: Cell::new(Some(handle)),
            }),
        }
    }

    /// The active region id, or "" when none is active.
    pub fn active_region(&self) -> String {
        self.inner.state.get()
    }

    /// Make `id` the active region, superseding any previous one.
    /// An empty id deactivates.
    pub fn set_active_region(&self, id: impl Into<String>) {
        self.inner.state.set(id);
    }

    pub fn clear_active_region(&self) {
        self.inner.state.clear();
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.inner.state.is_active(id)
    }

    pub fn has_active_region(&self) -> bool {
        !self.inner.state.is_empty()
    }

    /// Handle on the active-region cell.
    pub fn state(&self) -> ActiveRegionState {
        self.inner.state.clone()
    }

    /// The broadcaster this coordinator listens on.
    pub fn broadcaster(&self) -> &PointerBroadcaster {
        &self.inner.broadcaster
    }

    /// Remove the outside-click subscription. Idempotent.
    ///
    /// After teardown no pointer-down changes the active region.
    pub fn teardown(&self) {
        self.inner.teardown();
    }

    pub fn is_torn_down(&self) -> bool {
        let handle = self.inner.subscription.get();
        handle.is_none_or(|handle| !self.inner.broadcaster.is_subscribed(handle))
    }
}

impl fmt::Debug for FocusCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusCoordinator")
            .field("active_region", &self.active_region())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}

/// Clear the active region unless the pointer landed inside a focus region or
/// trigger. A missing target counts as outside.
fn dismiss_outside(state: &ActiveRegionState, event: &PointerEvent) {
    let inside = event
        .target
        .and_then(|target| engine::closest_flagged(target, NodeFlags::FOCUS_SCOPE));
    if let Some(node) = inside {
        trace!(hit = ?event.target, node, "pointer down inside focus scope");
        return;
    }
    if !state.is_empty() {
        state.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
