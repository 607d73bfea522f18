//! Primitive types - Props, inclusion state, and cleanup.
//!
//! Props are plain structs with `Default`, built with struct-update syntax:
//!
//! ```ignore
//! focus_region(&focus, FocusRegionProps {
//!     id: "menu".into(),
//!     children: Some(Box::new(|| { box_primitive(BoxProps::default()); })),
//!     ..Default::default()
//! });
//! ```

use std::rc::Rc;

use crate::state::PointerEvent;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Pointer-down callback (Rc for shared ownership in closures).
///
/// Using Rc<dyn Fn> instead of Box<dyn Fn> allows cloning callbacks
/// into the handler a binding registers each time it is included.
pub type PointerCallback = Rc<dyn Fn(&PointerEvent)>;

// =============================================================================
// Inclusion
// =============================================================================

/// Whether a conditional binding's content is currently in the tree.
///
/// Absent means no node exists at all: not hidden, gone, with every piece of
/// state its content held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inclusion {
    Included,
    #[default]
    Absent,
}

// =============================================================================
// Box Props
// =============================================================================

/// Props for a plain container node.
#[derive(Default)]
pub struct BoxProps {
    /// Component id (generated when None).
    pub id: Option<String>,
    /// Rendered once, with this box as parent.
    pub children: Option<Box<dyn FnOnce()>>,
}

// =============================================================================
// Focus Region Props
// =============================================================================

/// Props for [`focus_region`](super::focus_region).
#[derive(Default)]
pub struct FocusRegionProps {
    /// Region id. The content is included only while this is the active region.
    /// An empty id never becomes active.
    pub id: String,
    /// Content, rendered with the region node as parent every time the region
    /// is included.
    pub children: Option<Box<dyn Fn()>>,
    /// Runs after the region re-asserts itself as active, for pointer-downs
    /// landing inside its content.
    pub on_click: Option<PointerCallback>,
}

// =============================================================================
// Focus Trigger Props
// =============================================================================

/// Props for [`focus_trigger`](super::focus_trigger).
#[derive(Default)]
pub struct FocusTriggerProps {
    /// Component id of the trigger node (generated when None).
    pub id: Option<String>,
    /// The region this trigger opens.
    pub region: String,
    /// Rendered once, with the trigger as parent (label, icon).
    pub children: Option<Box<dyn FnOnce()>>,
    /// Runs after the region has been activated.
    pub on_click: Option<PointerCallback>,
}
