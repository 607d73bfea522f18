//! # spark-focus
//!
//! Exclusive focus for terminal UIs: at most one "focus region" (menu,
//! popover, dropdown) is open at a time, and a pointer-down outside every
//! region closes it.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! ```text
//! crossterm mouse-down → RootListener → PointerBroadcaster::dispatch
//!     → FocusCoordinator (outside click? clear active region)
//!     → region / trigger passthroughs (activate their region)
//!     → active-region signal → focus_region bindings include / exclude content
//! ```
//!
//! Components are indices into parallel arrays rather than objects. A region's
//! node carries [`NodeFlags::FOCUS_REGION`]; "inside" means the pointer target
//! has an ancestor carrying a focus flag.
//!
//! ## Modules
//!
//! - [`types`] - Node flags
//! - [`engine`] - Component registry, parent and flag arrays, hit grid
//! - [`state`] - Modifiers, pointer broadcaster, root listener, focus coordinator
//! - [`primitives`] - Box, show, focus region and focus trigger components

pub mod engine;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    allocate_index, fill_hit_rect, get_allocated_indices, get_current_parent_index, get_index,
    hit_test, is_allocated, on_destroy, pop_parent_context, push_parent_context,
    release_index, reset_registry, resize_hit_grid,
};

pub use primitives::{
    box_primitive, focus_region, focus_trigger, show, BoxProps, Cleanup, FocusRegionHandle,
    FocusRegionProps, FocusTriggerProps, Inclusion, PointerCallback,
};

pub use state::{
    // Focus
    ActiveRegionState, FocusCoordinator, FocusOptions,
    // Pointer
    PointerBroadcaster, PointerButton, PointerEvent, PointerHandler, SubscriptionHandle,
    // Modifiers
    Modifiers,
    // Input
    pointer_down_from_crossterm, route_event, RootListener,
};
