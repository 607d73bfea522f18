//! Input Module - Root pointer listener
//!
//! Bridges crossterm's event system with the pointer broadcaster. This is the
//! one place the terminal's mouse stream enters the focus system: only
//! pointer-down events are forwarded. Terminal resizes resize the hit grid;
//! everything else is ignored.
//!
//! # API
//!
//! - `pointer_down_from_crossterm` - Convert a crossterm mouse-down to a PointerEvent
//! - `route_event` - Forward a crossterm event to the broadcaster
//! - `RootListener` - Mouse capture for the lifetime of the listener
//!
//! # Example
//!
//! ```ignore
//! use spark_focus::state::{PointerBroadcaster, RootListener};
//! use std::time::Duration;
//!
//! let broadcaster = PointerBroadcaster::new();
//! let listener = RootListener::attach(&broadcaster)?;
//!
//! loop {
//!     listener.poll(Duration::from_millis(16))?;
//! }
//! ```

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
    poll, read,
};
use crossterm::execute;
use tracing::{debug, warn};

use super::modifiers::Modifiers;
use super::pointer::{PointerBroadcaster, PointerButton, PointerEvent};
use crate::engine::resize_hit_grid;

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert a crossterm mouse event into a pointer-down event.
///
/// Returns None for anything that is not a button press (release, drag,
/// move, scroll).
pub fn pointer_down_from_crossterm(event: CrosstermMouseEvent) -> Option<PointerEvent> {
    let MouseEventKind::Down(button) = event.kind else {
        return None;
    };
    Some(
        PointerEvent::down(convert_button(button).code(), event.column, event.row)
            .with_modifiers(convert_modifiers(event.modifiers)),
    )
}

fn convert_button(button: CrosstermMouseButton) -> PointerButton {
    match button {
        CrosstermMouseButton::Left => PointerButton::Primary,
        CrosstermMouseButton::Middle => PointerButton::Middle,
        CrosstermMouseButton::Right => PointerButton::Secondary,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers.
///
/// Terminals report the OS key as SUPER or META depending on the protocol;
/// both map to `meta`.
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        alt: mods.contains(KeyModifiers::ALT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// EVENT ROUTING
// =============================================================================

/// Route a crossterm event to the broadcaster.
/// Returns how many subscriptions were invoked.
pub fn route_event(broadcaster: &PointerBroadcaster, event: CrosstermEvent) -> usize {
    match event {
        CrosstermEvent::Mouse(mouse) => match pointer_down_from_crossterm(mouse) {
            Some(pointer) => broadcaster.dispatch(pointer),
            None => 0,
        },
        CrosstermEvent::Resize(width, height) => {
            debug!(width, height, "terminal resized");
            resize_hit_grid(width, height);
            0
        }
        _ => 0,
    }
}

// =============================================================================
// ROOT LISTENER
// =============================================================================

/// The root-level pointer listener.
///
/// Enables mouse capture on attach and disables it on detach (or drop).
/// Create one per application.
pub struct RootListener {
    broadcaster: PointerBroadcaster,
    attached: bool,
}

impl RootListener {
    /// Enable mouse capture and start feeding `broadcaster`.
    pub fn attach(broadcaster: &PointerBroadcaster) -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        debug!("root pointer listener attached");
        Ok(Self {
            broadcaster: broadcaster.clone(),
            attached: true,
        })
    }

    /// Read one event if it arrives within `timeout` and route it.
    /// Returns how many subscriptions were invoked.
    pub fn poll(&self, timeout: Duration) -> std::io::Result<usize> {
        if poll(timeout)? {
            Ok(route_event(&self.broadcaster, read()?))
        } else {
            Ok(0)
        }
    }

    /// Disable mouse capture.
    pub fn detach(mut self) -> std::io::Result<()> {
        self.attached = false;
        debug!("root pointer listener detached");
        execute!(stdout(), DisableMouseCapture)
    }
}

impl Drop for RootListener {
    fn drop(&mut self) {
        if self.attached {
            if let Err(err) = execute!(stdout(), DisableMouseCapture) {
                warn!(%err, "failed to disable mouse capture");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use std::cell::Cell;
    use std::rc::Rc;

    fn mouse(kind: MouseEventKind, modifiers: KeyModifiers) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers,
        }
    }

    #[test]
    fn test_convert_mouse_down() {
        let event = pointer_down_from_crossterm(mouse(
            MouseEventKind::Down(CrosstermMouseButton::Left),
            KeyModifiers::empty(),
        ));

        let event = event.expect("press converts");
        assert_eq!(event.button(), PointerButton::Primary);
        assert_eq!((event.x, event.y), (10, 5));
        assert!(event.modifiers.is_empty());
        assert_eq!(event.target, None);
    }

    #[test]
    fn test_convert_buttons() {
        for (button, expected) in [
            (CrosstermMouseButton::Left, PointerButton::Primary),
            (CrosstermMouseButton::Middle, PointerButton::Middle),
            (CrosstermMouseButton::Right, PointerButton::Secondary),
        ] {
            let event = pointer_down_from_crossterm(mouse(
                MouseEventKind::Down(button),
                KeyModifiers::empty(),
            ));
            assert_eq!(event.map(|e| e.button()), Some(expected));
        }
    }

    #[test]
    fn test_non_press_ignored() {
        for kind in [
            MouseEventKind::Up(CrosstermMouseButton::Left),
            MouseEventKind::Drag(CrosstermMouseButton::Left),
            MouseEventKind::Moved,
            MouseEventKind::ScrollUp,
        ] {
            assert!(pointer_down_from_crossterm(mouse(kind, KeyModifiers::empty())).is_none());
        }
    }

    #[test]
    fn test_convert_modifiers() {
        let event = pointer_down_from_crossterm(mouse(
            MouseEventKind::Down(CrosstermMouseButton::Left),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        ))
        .expect("press converts");
        assert_eq!(event.modifiers, Modifiers::ctrl().with_shift());

        let event = pointer_down_from_crossterm(mouse(
            MouseEventKind::Down(CrosstermMouseButton::Left),
            KeyModifiers::SUPER | KeyModifiers::ALT,
        ))
        .expect("press converts");
        assert_eq!(event.modifiers, Modifiers::meta().with_alt());
    }

    #[test]
    fn test_route_event() {
        crate::engine::reset_registry();
        let broadcaster = PointerBroadcaster::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        broadcaster.subscribe(
            PointerButton::Secondary,
            move |_| count_clone.set(count_clone.get() + 1),
            None,
        );

        let press = CrosstermEvent::Mouse(mouse(
            MouseEventKind::Down(CrosstermMouseButton::Right),
            KeyModifiers::empty(),
        ));
        assert_eq!(route_event(&broadcaster, press), 1);

        let release = CrosstermEvent::Mouse(mouse(
            MouseEventKind::Up(CrosstermMouseButton::Right),
            KeyModifiers::empty(),
        ));
        assert_eq!(route_event(&broadcaster, release), 0);

        let key = CrosstermEvent::Key(KeyCode::Esc.into());
        assert_eq!(route_event(&broadcaster, key), 0);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_resize_event_resizes_hit_grid() {
        crate::engine::reset_registry();
        let broadcaster = PointerBroadcaster::new();

        assert_eq!(route_event(&broadcaster, CrosstermEvent::Resize(120, 40)), 0);
        crate::engine::fill_hit_rect(100, 30, 2, 2, 7);
        assert_eq!(crate::engine::hit_test(101, 31), Some(7));

        // Shrinking clears the grid
        route_event(&broadcaster, CrosstermEvent::Resize(40, 10));
        assert_eq!(crate::engine::hit_test(101, 31), None);
        assert_eq!(crate::engine::hit_test(1, 1), None);
    }
}
