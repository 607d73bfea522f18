//! State Module - Runtime state behind exclusive focus
//!
//! - **Modifiers** - Alt/Ctrl/Meta/Shift state and exact matching
//! - **Pointer** - Button classification, pointer-down broadcaster
//! - **Input** - Root listener bridging crossterm mouse events
//! - **Focus** - Active region state, outside-click dismissal

mod focus;
mod input;
mod modifiers;
mod pointer;

pub use focus::*;
pub use input::*;
pub use modifiers::*;
pub use pointer::*;
