//! Focus Trigger - A node that opens a focus region when clicked.
//!
//! Triggers carry [`NodeFlags::FOCUS_TRIGGER`], so the coordinator's
//! outside-click check treats a press on a trigger as "inside" and does not
//! clear the active region first. The trigger then activates its region,
//! which closes whatever region was open before.
//!
//! # Example
//!
//! ```ignore
//! use spark_focus::primitives::{focus_trigger, FocusTriggerProps};
//!
//! let cleanup = focus_trigger(&focus, FocusTriggerProps {
//!     region: "file-menu".into(),
//!     ..Default::default()
//! });
//! ```

use tracing::trace;

use crate::engine::{
    allocate_index, arrays, get_current_parent_index, is_within, on_destroy, release_index,
    with_parent_context,
};
use crate::state::{ActiveRegionState, FocusCoordinator, PointerButton, PointerEvent};
use crate::types::NodeFlags;
use super::types::{Cleanup, FocusTriggerProps, PointerCallback};

/// Build the primary-click handler shared by triggers and regions: when the
/// press lands on `index` or below it, make `region` active, then run the
/// user callback.
pub(super) fn activate_on_click(
    index: usize,
    region: String,
    state: ActiveRegionState,
    on_click: Option<PointerCallback>,
) -> impl Fn(&PointerEvent) + 'static {
    move |event: &PointerEvent| {
        let Some(target) = event.target else { return };
        if !is_within(target, index) {
            return;
        }
        trace!(node = index, region = %region, "focus click");
        state.set(region.as_str());
        if let Some(on_click) = &on_click {
            on_click(event);
        }
    }
}

/// Create a trigger node for `props.region`.
///
/// Returns a cleanup function that releases the node and its subscription.
pub fn focus_trigger(focus: &FocusCoordinator, props: FocusTriggerProps) -> Cleanup {
    let index = allocate_index(props.id.as_deref());
    arrays::set_parent_index(index, get_current_parent_index());
    arrays::add_flags(index, NodeFlags::FOCUS_TRIGGER);

    let broadcaster = focus.broadcaster().clone();
    let handle = broadcaster.subscribe(
        PointerButton::Primary,
        activate_on_click(index, props.region, focus.state(), props.on_click),
        None,
    );
    on_destroy(index, move || {
        broadcaster.unsubscribe(handle);
    });

    if let Some(children) = props.children {
        with_parent_context(index, children);
    }

    Box::new(move || release_index(index))
}
