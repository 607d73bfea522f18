//! Node Arrays - Per-index component state.
//!
//! Each array index corresponds to one component:
//! - **parent**: Parent component index (None at the root)
//! - **flags**: [`NodeFlags`] markers (focus region, focus trigger)
//!
//! Out-of-range reads return the default, so callers never have to check
//! whether an index has been allocated before querying it.

use std::cell::RefCell;

use crate::types::NodeFlags;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Parent index per component.
    static PARENT_INDEX: RefCell<Vec<Option<usize>>> = const { RefCell::new(Vec::new()) };

    /// Marker flags per component.
    static FLAGS: RefCell<Vec<NodeFlags>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    PARENT_INDEX.with(|arr| {
        let mut arr = arr.borrow_mut();
        if arr.len() <= index {
            arr.resize(index + 1, None);
        }
    });
    FLAGS.with(|arr| {
        let mut arr = arr.borrow_mut();
        if arr.len() <= index {
            arr.resize(index + 1, NodeFlags::NONE);
        }
    });
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    PARENT_INDEX.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
    FLAGS.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = NodeFlags::NONE;
        }
    });
}

/// Reset all arrays to release memory.
pub fn reset() {
    PARENT_INDEX.with(|arr| arr.borrow_mut().clear());
    FLAGS.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// Parent
// =============================================================================

/// Get parent index.
pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.borrow().get(index).copied().flatten())
}

/// Set parent index.
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    ensure_capacity(index);
    PARENT_INDEX.with(|arr| arr.borrow_mut()[index] = parent);
}

// =============================================================================
// Flags
// =============================================================================

/// Get node flags.
pub fn get_flags(index: usize) -> NodeFlags {
    FLAGS.with(|arr| arr.borrow().get(index).copied().unwrap_or_default())
}

/// Replace node flags.
pub fn set_flags(index: usize, flags: NodeFlags) {
    ensure_capacity(index);
    FLAGS.with(|arr| arr.borrow_mut()[index] = flags);
}

/// Add flags to a node, keeping the ones already set.
pub fn add_flags(index: usize, flags: NodeFlags) {
    ensure_capacity(index);
    FLAGS.with(|arr| arr.borrow_mut()[index] |= flags);
}

// =============================================================================
// Subtree Queries
// =============================================================================

/// Find the nearest node, starting at `index` itself and walking up the parent
/// chain, whose flags intersect `flags`.
pub fn closest_flagged(index: usize, flags: NodeFlags) -> Option<usize> {
    let mut current = Some(index);
    while let Some(node) = current {
        if get_flags(node).intersects(flags) {
            return Some(node);
        }
        current = get_parent_index(node);
    }
    None
}

/// Check whether `index` is `ancestor` or one of its descendants.
pub fn is_within(index: usize, ancestor: usize) -> bool {
    let mut current = Some(index);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = get_parent_index(node);
    }
    false
}
