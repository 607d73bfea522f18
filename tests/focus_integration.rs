//! Integration tests for exclusive focus.
//!
//! These tests drive the whole path end-to-end: crossterm mouse events or
//! pointer events → `PointerBroadcaster` → `FocusCoordinator` → region and
//! trigger bindings, with targets resolved through the hit grid.

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{
    Event as CrosstermEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use spark_focus::{
    box_primitive, fill_hit_rect, focus_region, focus_trigger, get_index, reset_registry,
    route_event, BoxProps, FocusCoordinator, FocusRegionHandle, FocusRegionProps,
    FocusTriggerProps, Inclusion, Modifiers, PointerBroadcaster, PointerButton, PointerEvent,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (PointerBroadcaster, FocusCoordinator) {
    reset_registry();
    let broadcaster = PointerBroadcaster::new();
    let focus = FocusCoordinator::new(&broadcaster);
    (broadcaster, focus)
}

fn counter() -> (Rc<Cell<usize>>, impl Fn(&PointerEvent) + 'static) {
    let count = Rc::new(Cell::new(0));
    let count_clone = count.clone();
    (count, move |_: &PointerEvent| count_clone.set(count_clone.get() + 1))
}

fn left_click(column: u16, row: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}

/// A region whose content is one box, painted over `rect` in the hit grid
/// each time it is included.
fn painted_region(
    focus: &FocusCoordinator,
    id: &str,
    rect: (u16, u16, u16, u16),
) -> FocusRegionHandle {
    let content_id = format!("{id}-content");
    focus_region(focus, FocusRegionProps {
        id: id.to_string(),
        children: Some(Box::new(move || {
            box_primitive(BoxProps {
                id: Some(content_id.clone()),
                ..Default::default()
            });
            if let Some(index) = get_index(&content_id) {
                let (x, y, w, h) = rect;
                fill_hit_rect(x, y, w, h, index);
            }
        })),
        ..Default::default()
    })
}

// ── Broadcaster scenarios ─────────────────────────────────────────────────────

#[test]
fn test_catch_all_subscription_invoked_once() {
    reset_registry();
    let broadcaster = PointerBroadcaster::new();
    let (count, callback) = counter();

    broadcaster.subscribe(PointerButton::Primary, callback, None);
    let invoked = broadcaster.dispatch(PointerEvent::primary(3, 3));

    assert_eq!(invoked, 1);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_modifier_requirement_is_exact() {
    reset_registry();
    let broadcaster = PointerBroadcaster::new();
    let (count, callback) = counter();

    broadcaster.subscribe(PointerButton::Primary, callback, Some(Modifiers::ctrl()));

    broadcaster.dispatch(PointerEvent::primary(0, 0));
    assert_eq!(count.get(), 0, "ctrl=false must not match");

    broadcaster.dispatch(PointerEvent::primary(0, 0).with_modifiers(Modifiers::ctrl()));
    assert_eq!(count.get(), 1);

    broadcaster.dispatch(
        PointerEvent::primary(0, 0).with_modifiers(Modifiers::ctrl().with_shift()),
    );
    assert_eq!(count.get(), 1, "extra modifiers must not match");
}

#[test]
fn test_unsubscribed_callback_never_fires_again() {
    reset_registry();
    let broadcaster = PointerBroadcaster::new();
    let (count, callback) = counter();

    let handle = broadcaster.subscribe(PointerButton::Middle, callback, None);
    assert!(broadcaster.unsubscribe(handle));
    assert!(!broadcaster.unsubscribe(handle));

    broadcaster.dispatch(PointerEvent::down(1, 0, 0));
    assert_eq!(count.get(), 0);
    assert!(broadcaster.is_empty());
}

// ── Coordinator scenarios ─────────────────────────────────────────────────────

#[test]
fn test_inside_then_outside_click() {
    let (broadcaster, focus) = setup();
    let menu = painted_region(&focus, "menu", (10, 2, 20, 5));

    focus.set_active_region("menu");
    assert!(menu.is_included());

    broadcaster.dispatch(PointerEvent::primary(15, 4));
    assert_eq!(focus.active_region(), "menu");

    broadcaster.dispatch(PointerEvent::primary(60, 20));
    assert_eq!(focus.active_region(), "");
    assert_eq!(menu.inclusion(), Inclusion::Absent);
}

#[test]
fn test_only_latest_region_renders() {
    let (_broadcaster, focus) = setup();
    let a = painted_region(&focus, "a", (0, 0, 5, 5));
    let b = painted_region(&focus, "b", (10, 0, 5, 5));

    focus.set_active_region("a");
    focus.set_active_region("b");

    assert_eq!(a.inclusion(), Inclusion::Absent);
    assert_eq!(b.inclusion(), Inclusion::Included);
    assert_eq!(get_index("a-content"), None);
    assert!(get_index("b-content").is_some());
}

#[test]
fn test_set_active_region_is_idempotent() {
    let (broadcaster, focus) = setup();
    let subscriptions = broadcaster.len();

    focus.set_active_region("a");
    focus.set_active_region("a");

    assert_eq!(focus.active_region(), "a");
    assert_eq!(broadcaster.len(), subscriptions);
}

#[test]
fn test_non_primary_buttons_do_not_dismiss() {
    let (broadcaster, focus) = setup();

    focus.set_active_region("menu");
    broadcaster.dispatch(PointerEvent::down(1, 70, 20));
    broadcaster.dispatch(PointerEvent::down(2, 70, 20));
    assert_eq!(focus.active_region(), "menu");

    // Unrecognized codes are classified as primary
    broadcaster.dispatch(PointerEvent::down(7, 70, 20));
    assert_eq!(focus.active_region(), "");
}

#[test]
fn test_teardown_isolation() {
    let (broadcaster, focus) = setup();

    focus.set_active_region("menu");
    focus.teardown();
    focus.teardown();
    assert!(focus.is_torn_down());

    broadcaster.dispatch(PointerEvent::primary(70, 20));
    assert_eq!(focus.active_region(), "menu");
}

#[test]
fn test_dropping_coordinator_removes_subscription() {
    reset_registry();
    let broadcaster = PointerBroadcaster::new();
    {
        let _focus = FocusCoordinator::new(&broadcaster);
        assert_eq!(broadcaster.subscription_count(PointerButton::Primary), 1);
    }
    assert!(broadcaster.is_empty());
}

// ── Triggers ──────────────────────────────────────────────────────────────────

#[test]
fn test_trigger_switches_between_regions() {
    let (broadcaster, focus) = setup();
    let file = painted_region(&focus, "file", (0, 1, 12, 6));
    let edit = painted_region(&focus, "edit", (8, 1, 12, 6));

    let _file_trigger = focus_trigger(&focus, FocusTriggerProps {
        id: Some("file-trigger".into()),
        region: "file".into(),
        ..Default::default()
    });
    let _edit_trigger = focus_trigger(&focus, FocusTriggerProps {
        id: Some("edit-trigger".into()),
        region: "edit".into(),
        ..Default::default()
    });
    let (Some(file_trigger), Some(edit_trigger)) =
        (get_index("file-trigger"), get_index("edit-trigger"))
    else {
        panic!("triggers allocated");
    };
    fill_hit_rect(0, 0, 4, 1, file_trigger);
    fill_hit_rect(8, 0, 4, 1, edit_trigger);

    broadcaster.dispatch(PointerEvent::primary(1, 0));
    assert!(file.is_included());
    assert!(!edit.is_included());

    // Switching goes straight from one region to the other
    broadcaster.dispatch(PointerEvent::primary(9, 0));
    assert!(!file.is_included());
    assert!(edit.is_included());

    broadcaster.dispatch(PointerEvent::primary(40, 20));
    assert!(!edit.is_included());
    assert_eq!(focus.active_region(), "");
}

#[test]
fn test_trigger_inside_region_opens_other_region() {
    let (broadcaster, focus) = setup();

    let focus_clone = focus.clone();
    let main = focus_region(&focus, FocusRegionProps {
        id: "main".into(),
        children: Some(Box::new(move || {
            focus_trigger(&focus_clone, FocusTriggerProps {
                id: Some("more".into()),
                region: "submenu".into(),
                ..Default::default()
            });
            if let Some(index) = get_index("more") {
                fill_hit_rect(0, 0, 4, 1, index);
            }
        })),
        ..Default::default()
    });
    let submenu = painted_region(&focus, "submenu", (20, 0, 10, 4));

    focus.set_active_region("main");
    let primary_subscriptions = broadcaster.subscription_count(PointerButton::Primary);

    broadcaster.dispatch(PointerEvent::primary(1, 0));
    assert_eq!(focus.active_region(), "submenu");
    assert!(!main.is_included());
    assert!(submenu.is_included());

    // main's passthrough and nested trigger are gone, submenu's passthrough is live
    assert_eq!(
        broadcaster.subscription_count(PointerButton::Primary),
        primary_subscriptions - 1
    );
    assert_eq!(get_index("more"), None);
}

// ── Root listener routing ─────────────────────────────────────────────────────

#[test]
fn test_crossterm_clicks_route_through_hit_grid() {
    let (broadcaster, focus) = setup();
    let menu = painted_region(&focus, "menu", (5, 5, 10, 3));

    focus.set_active_region("menu");

    assert_eq!(route_event(&broadcaster, left_click(6, 6)), 2);
    assert!(menu.is_included());

    route_event(&broadcaster, left_click(0, 0));
    assert!(!menu.is_included());
}
