//! Core types shared by the engine and the focus primitives.

// =============================================================================
// Node Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Runtime-queryable markers placed on nodes of the component tree.
    ///
    /// Combine with bitwise OR: `NodeFlags::FOCUS_REGION | NodeFlags::FOCUS_TRIGGER`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        const NONE = 0;
        /// Root node of an included focus region's content.
        const FOCUS_REGION = 1 << 0;
        /// Element that opens a focus region.
        const FOCUS_TRIGGER = 1 << 1;
        /// Everything a pointer-down may land on without dismissing the active region.
        const FOCUS_SCOPE = Self::FOCUS_REGION.bits() | Self::FOCUS_TRIGGER.bits();
    }
}
