//! Box Primitive - Plain container node.
//!
//! Boxes give content a place in the node tree. Pointer targets resolve to
//! boxes through the hit grid, and the focus system walks up from them to
//! find the enclosing region or trigger.
//!
//! # Example
//!
//! ```ignore
//! use spark_focus::primitives::{box_primitive, BoxProps};
//!
//! let cleanup = box_primitive(BoxProps {
//!     id: Some("sidebar".into()),
//!     children: Some(Box::new(|| {
//!         box_primitive(BoxProps::default());
//!     })),
//! });
//!
//! cleanup(); // releases the sidebar and its child
//! ```

use crate::engine::{
    allocate_index, arrays, get_current_parent_index, release_index, with_parent_context,
};
use super::types::{BoxProps, Cleanup};

/// Create a box container component.
///
/// Returns a cleanup function that releases the box and everything below it.
pub fn box_primitive(props: BoxProps) -> Cleanup {
    let index = allocate_index(props.id.as_deref());
    arrays::set_parent_index(index, get_current_parent_index());

    if let Some(children) = props.children {
        with_parent_context(index, children);
    }

    Box::new(move || release_index(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{get_allocated_count, get_index, reset_registry};

    #[test]
    fn test_box_nesting() {
        reset_registry();

        let cleanup = box_primitive(BoxProps {
            id: Some("outer".into()),
            children: Some(Box::new(|| {
                box_primitive(BoxProps {
                    id: Some("inner".into()),
                    ..Default::default()
                });
            })),
        });

        let (Some(outer), Some(inner)) = (get_index("outer"), get_index("inner")) else {
            panic!("both boxes allocated");
        };
        assert_eq!(arrays::get_parent_index(inner), Some(outer));
        assert_eq!(arrays::get_parent_index(outer), None);
        assert_eq!(get_current_parent_index(), None);

        cleanup();
        assert_eq!(get_allocated_count(), 0);
    }
}
