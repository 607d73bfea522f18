//! Engine - Component registry, node arrays, and hit grid.
//!
//! The engine manages the core data structures the focus system queries:
//! - Registry: Index allocation, ID mapping, parent context, destroy callbacks
//! - Arrays: Parallel per-index arrays (parent, node flags)
//! - HitGrid: Cell-to-component lookup for pointer targets
//!
//! # Architecture
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Box           (parent=None, flags=NONE)
//! Index 1: Trigger       (parent=0,    flags=FOCUS_TRIGGER)
//! Index 2: Focus region  (parent=0,    flags=FOCUS_REGION)
//! Index 3: Box           (parent=2,    flags=NONE)
//! ```
//!
//! "Is this node inside that subtree" is a walk up the parent array.

mod registry;
mod hit_grid;
pub mod arrays;

pub use registry::*;
pub use hit_grid::*;
pub use arrays::{closest_flagged, is_within};
