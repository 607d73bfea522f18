//! Control Flow Primitives - Conditional rendering.
//!
//! - [`show`] - Mount one of two branches depending on a reactive condition
//!
//! Branches are created and destroyed, never hidden: a branch that goes away
//! releases its nodes, their destroy callbacks, and their subscriptions.
//!
//! # Pattern: EffectScope-based Cleanup
//!
//! Conditional primitives share [`watch_condition`]:
//! 1. Create an EffectScope to own the tracking effect
//! 2. Inside `scope.run()`, an effect reads the condition and calls `update`
//!    only when the value actually flips
//! 3. `update` runs outside the effect: content reads are not tracked and
//!    effects created by the content are not children of the watcher, so a
//!    watcher re-run never disposes them
//! 4. `on_scope_dispose()` runs the final teardown
//! 5. The returned Cleanup stops the scope

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use spark_signals::{effect, effect_scope, on_scope_dispose, untrack, with_context, AnyReaction};

use crate::engine::{get_current_parent_index, on_destroy, with_parent_context};
use crate::primitives::Cleanup;

/// Track `condition` reactively and call `update` each time its value flips
/// (including the first evaluation). `dispose` runs once when the returned
/// Cleanup is called.
pub(crate) fn watch_condition<C, U, D>(condition: C, update: U, dispose: D) -> Cleanup
where
    C: Fn() -> bool + 'static,
    U: Fn(bool) + 'static,
    D: FnOnce() + 'static,
{
    let last: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));
    let dispose = RefCell::new(Some(dispose));

    let scope = effect_scope(false);

    scope.run(move || {
        let _effect_cleanup = effect(move || {
            let current = condition();
            if last.get() == Some(current) {
                return;
            }
            last.set(Some(current));
            outside_watcher(|| update(current));
        });

        on_scope_dispose(move || {
            let dispose = dispose.borrow_mut().take();
            if let Some(dispose) = dispose {
                dispose();
            }
        });
    });

    Box::new(move || {
        scope.stop();
    })
}

/// A cleanup that runs at most once, shared between its owner and a destroy
/// callback on the parent node.
pub(crate) type SharedCleanup = Rc<RefCell<Option<Cleanup>>>;

/// Share `stop` and also run it when `parent` is released, so a binding
/// created inside some content ends with that content.
pub(crate) fn stop_with_parent(parent: Option<usize>, stop: Cleanup) -> SharedCleanup {
    let stop = Rc::new(RefCell::new(Some(stop)));
    if let Some(parent) = parent {
        let stop = stop.clone();
        on_destroy(parent, move || run_shared(&stop));
    }
    stop
}

pub(crate) fn run_shared(cleanup: &RefCell<Option<Cleanup>>) {
    let cleanup = cleanup.borrow_mut().take();
    if let Some(cleanup) = cleanup {
        cleanup();
    }
}

/// Restores the active effect on drop.
struct ActiveEffectGuard(Option<Weak<dyn AnyReaction>>);

impl Drop for ActiveEffectGuard {
    fn drop(&mut self) {
        let previous = self.0.take();
        with_context(|ctx| ctx.set_active_effect(previous));
    }
}

/// Run `f` untracked and with no active effect. Content rendered here owns
/// its effects through its own scopes and is released by its own cleanup.
fn outside_watcher<R>(f: impl FnOnce() -> R) -> R {
    let _guard = ActiveEffectGuard(with_context(|ctx| ctx.set_active_effect(None)));
    untrack(f)
}

/// Conditionally render components based on a reactive condition.
///
/// When the condition becomes true, `then_fn` renders; when it becomes false,
/// the previous branch's cleanup runs and `else_fn` (if any) renders. The
/// parent index current at the call is restored for every branch, and
/// releasing that parent stops the `show`.
///
/// # Example
///
/// ```ignore
/// use spark_focus::primitives::{show, box_primitive, BoxProps, Cleanup};
/// use spark_signals::signal;
///
/// let open = signal(false);
/// let open_clone = open.clone();
///
/// let cleanup = show(
///     move || open_clone.get(),
///     || box_primitive(BoxProps::default()),
///     None::<fn() -> Cleanup>,
/// );
///
/// open.set(true);  // box created
/// open.set(false); // box destroyed
/// cleanup();
/// ```
pub fn show<ThenF, ElseF, ThenR, ElseR>(
    condition: impl Fn() -> bool + 'static,
    then_fn: ThenF,
    else_fn: Option<ElseF>,
) -> Cleanup
where
    ThenF: Fn() -> ThenR + 'static,
    ElseF: Fn() -> ElseR + 'static,
    ThenR: Into<Cleanup>,
    ElseR: Into<Cleanup>,
{
    let parent_index = get_current_parent_index();

    let branch: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let branch_for_update = branch.clone();

    let render = move |visible: bool| -> Option<Cleanup> {
        if visible {
            Some(then_fn().into())
        } else {
            else_fn.as_ref().map(|f| f().into())
        }
    };

    let stop = watch_condition(
        condition,
        move |visible| {
            let previous = branch_for_update.borrow_mut().take();
            if let Some(previous) = previous {
                previous();
            }

            let next = match parent_index {
                Some(parent) => with_parent_context(parent, || render(visible)),
                None => render(visible),
            };
            *branch_for_update.borrow_mut() = next;
        },
        move || {
            let current = branch.borrow_mut().take();
            if let Some(current) = current {
                current();
            }
        },
    );

    let stop = stop_with_parent(parent_index, stop);
    Box::new(move || run_shared(&stop))
}

// =============================================================================
// Tests
// =============================================================================
