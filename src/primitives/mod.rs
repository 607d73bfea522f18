//! Primitives - Component building blocks for exclusive focus.
//!
//! - [`box_primitive`] - Plain container node
//! - [`show`] - Conditional mount of one of two branches
//! - [`focus_region`] - Content included only while its region is active
//! - [`focus_trigger`] - Node that activates a region when pressed
//!
//! # Architecture
//!
//! Components are indices into parallel arrays. Each component:
//! 1. Allocates an index from the registry
//! 2. Records its parent (the current parent context) and node flags
//! 3. Renders its children with itself as the parent context
//! 4. Returns a cleanup function (or a handle convertible into one)
//!
//! Pointer subscriptions a component registers are removed by a destroy
//! callback on its node, so releasing any ancestor removes them too.

mod types;
mod box_primitive;
mod control_flow;
mod focus_region;
mod trigger;

pub use types::*;
pub use box_primitive::box_primitive;
pub use control_flow::show;
pub use focus_region::{focus_region, FocusRegionHandle};
pub use trigger::focus_trigger;
