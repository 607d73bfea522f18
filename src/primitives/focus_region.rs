//! Focus Region - Content that exists only while its region is active.
//!
//! A region binding watches the coordinator's active region. When it matches
//! the binding's id, a node marked [`NodeFlags::FOCUS_REGION`] is created under
//! the parent that was current at the call and the children render beneath
//! it. When another region becomes active (or the region is dismissed), the
//! node and everything below it are released: subscriptions, destroy callbacks,
//! hit cells. The next inclusion renders the children from scratch.
//!
//! # Example
//!
//! ```ignore
//! use spark_focus::primitives::{focus_region, box_primitive, BoxProps, FocusRegionProps};
//!
//! let menu = focus_region(&focus, FocusRegionProps {
//!     id: "file-menu".into(),
//!     children: Some(Box::new(|| {
//!         box_primitive(BoxProps::default());
//!     })),
//!     ..Default::default()
//! });
//!
//! focus.set_active_region("file-menu");
//! assert!(menu.is_included());
//!
//! focus.set_active_region("edit-menu");
//! assert!(!menu.is_included());
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::engine::{
    allocate_index, arrays, get_current_parent_index, on_destroy, release_index,
    with_parent_context,
};
use crate::state::{ActiveRegionState, FocusCoordinator, PointerBroadcaster, PointerButton};
use crate::types::NodeFlags;
use super::control_flow::{run_shared, stop_with_parent, watch_condition, SharedCleanup};
use super::trigger::activate_on_click;
use super::types::{Cleanup, FocusRegionProps, Inclusion, PointerCallback};

// =============================================================================
// Handle
// =============================================================================

/// A live region binding.
///
/// Dropping the handle leaves the binding running; call [`unmount`](Self::unmount)
/// (or release the parent node) to stop it.
pub struct FocusRegionHandle {
    id: String,
    inclusion: Rc<Cell<Inclusion>>,
    node: Rc<Cell<Option<usize>>>,
    stop: SharedCleanup,
}

impl FocusRegionHandle {
    /// The region id this binding follows.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inclusion(&self) -> Inclusion {
        self.inclusion.get()
    }

    pub fn is_included(&self) -> bool {
        self.inclusion.get() == Inclusion::Included
    }

    /// Index of the region node while included.
    pub fn node_index(&self) -> Option<usize> {
        self.node.get()
    }

    /// Stop following the active region and release the content if present.
    pub fn unmount(self) {
        run_shared(&self.stop);
    }
}

impl fmt::Debug for FocusRegionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusRegionHandle")
            .field("id", &self.id)
            .field("inclusion", &self.inclusion.get())
            .field("node", &self.node.get())
            .finish()
    }
}

impl From<FocusRegionHandle> for Cleanup {
    fn from(handle: FocusRegionHandle) -> Self {
        Box::new(move || handle.unmount())
    }
}

// =============================================================================
// Binding
// =============================================================================

/// Bind `props.children` to the region `props.id`.
///
/// The content is included if and only if `props.id` is the active region.
/// A primary pointer-down landing inside the included content re-asserts the
/// region as active, then runs `props.on_click`.
pub fn focus_region(focus: &FocusCoordinator, props: FocusRegionProps) -> FocusRegionHandle {
    let FocusRegionProps { id, children, on_click } = props;
    if id.is_empty() {
        warn!("focus region bound to an empty id will never be included");
    }

    let parent_index = get_current_parent_index();
    let inclusion = Rc::new(Cell::new(Inclusion::Absent));
    let node: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));

    let condition = {
        let state = focus.state();
        let id = id.clone();
        move || state.is_active(&id)
    };

    let update = {
        let mount = RegionMount {
            id: id.clone(),
            parent_index,
            state: focus.state(),
            broadcaster: focus.broadcaster().clone(),
            children: children.map(Rc::from),
            on_click,
        };
        let inclusion = inclusion.clone();
        let node = node.clone();
        move |active: bool| {
            if active {
                let index = mount.mount(&node);
                node.set(Some(index));
                inclusion.set(Inclusion::Included);
            } else {
                if let Some(index) = node.take() {
                    release_index(index);
                    debug!(region = %mount.id, node = index, "focus region absent");
                }
                inclusion.set(Inclusion::Absent);
            }
        }
    };

    let dispose = {
        let inclusion = inclusion.clone();
        let node = node.clone();
        move || {
            if let Some(index) = node.take() {
                release_index(index);
            }
            inclusion.set(Inclusion::Absent);
        }
    };

    // Releasing the parent ends the binding too.
    let stop = stop_with_parent(parent_index, watch_condition(condition, update, dispose));

    FocusRegionHandle { id, inclusion, node, stop }
}

/// Everything needed to (re)create the region node on each inclusion.
struct RegionMount {
    id: String,
    parent_index: Option<usize>,
    state: ActiveRegionState,
    broadcaster: PointerBroadcaster,
    children: Option<Rc<dyn Fn()>>,
    on_click: Option<PointerCallback>,
}

impl RegionMount {
    fn mount(&self, node: &Rc<Cell<Option<usize>>>) -> usize {
        let index = allocate_index(None);
        arrays::set_parent_index(index, self.parent_index);
        arrays::add_flags(index, NodeFlags::FOCUS_REGION);

        // Subscribed before the children render, so the region's own
        // passthrough runs ahead of any trigger inside it.
        let handle = self.broadcaster.subscribe(
            PointerButton::Primary,
            activate_on_click(index, self.id.clone(), self.state.clone(), self.on_click.clone()),
            None,
        );
        let broadcaster = self.broadcaster.clone();
        let node = node.clone();
        on_destroy(index, move || {
            broadcaster.unsubscribe(handle);
            if node.get() == Some(index) {
                node.set(None);
            }
        });

        if let Some(children) = &self.children {
            with_parent_context(index, || children());
        }

        debug!(region = %self.id, node = index, "focus region included");
        index
    }
}

// =============================================================================
// Tests
// =============================================================================
