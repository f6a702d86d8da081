#![forbid(unsafe_code)]

//! The focus trap state machine.
//!
//! A trap guards one container for its whole lifetime and toggles between
//! inactive and active. Activation snapshots the element to restore, moves
//! focus into the container, and installs the two document listeners that
//! enforce the boundary; deactivation releases the listeners and restores
//! focus. Both transitions are idempotent no-ops when already in the target
//! state.
//!
//! # Invariants
//!
//! 1. Listener installs and removals are exactly paired: the listeners live
//!    inside the trap's active state as RAII guards, so deactivation AND
//!    dropping an active trap both release them.
//! 2. Entry focus happens before the listeners are installed, and the
//!    restoration focus happens after they are released, so the trap never
//!    observes its own lifecycle focus moves.
//! 3. A redirect targets an element inside the container; the nested
//!    focus-in it triggers takes the in-container path and re-anchors
//!    without redirecting again, so redirection cannot loop.
//!
//! # Failure Modes
//!
//! - Container with no tabbable content: Tab has no stops to wrap between
//!   and passes through to the host untouched, so focus can leave the
//!   container. Deliberate degenerate-case policy.
//! - Redirect target no longer focusable (e.g. removed from layout): the
//!   focus call reports failure and focus stays where the host put it.

use std::cell::RefCell;
use std::rc::Rc;

use tabtrap_dom::{
    Document, ElementId, FocusInEvent, KeyCode, KeyDownEvent, ListenerGuard, Modifiers,
};

use crate::focus::focus;
use crate::query::{focus_first_element, focusable_elements};

/// Trap configuration.
///
/// # Example
///
/// ```
/// use tabtrap::TrapOptions;
///
/// let options = TrapOptions::new().restore_focus(false);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrapOptions {
    restore_focus: bool,
}

impl Default for TrapOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TrapOptions {
    /// Default options: focus is restored on deactivation.
    pub const fn new() -> Self {
        Self {
            restore_focus: true,
        }
    }

    /// Whether deactivation without an explicit target restores focus to
    /// the element that was active at activation time.
    pub const fn restore_focus(mut self, restore: bool) -> Self {
        self.restore_focus = restore;
        self
    }
}

/// State shared with the installed listeners while the trap is active.
struct TrapShared {
    container: ElementId,
    /// Last known focused element inside the container; the redirect
    /// anchor when focus escapes.
    current: Option<ElementId>,
}

/// Per-activation state. Dropping it releases both listeners.
struct ActiveTrap {
    shared: Rc<RefCell<TrapShared>>,
    initial_focus: Option<ElementId>,
    _focus_guard: ListenerGuard,
    _key_guard: ListenerGuard,
}

/// A focus trap guarding one container element.
///
/// # Example
///
/// ```
/// use tabtrap::FocusTrap;
/// use tabtrap::dom::{Document, Element};
///
/// let mut doc = Document::new();
/// let panel = doc.append(doc.root(), Element::new("div"));
/// let input = doc.append(panel, Element::new("input"));
///
/// let mut trap = FocusTrap::new(panel);
/// trap.activate(&mut doc, None, false);
/// assert!(trap.is_active());
/// assert_eq!(doc.active_element(), Some(input));
///
/// trap.deactivate(&mut doc, None, false);
/// assert!(!trap.is_active());
/// ```
pub struct FocusTrap {
    container: ElementId,
    options: TrapOptions,
    active: Option<ActiveTrap>,
}

impl FocusTrap {
    /// Create an inactive trap for `container` with default options.
    pub fn new(container: ElementId) -> Self {
        Self::with_options(container, TrapOptions::new())
    }

    /// Create an inactive trap for `container`.
    pub fn with_options(container: ElementId, options: TrapOptions) -> Self {
        Self {
            container,
            options,
            active: None,
        }
    }

    /// The guarded container.
    #[inline]
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// Whether the trap is currently enforcing its boundary.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The last known focused element inside the container. `None` while
    /// inactive, and `None` after activation until the first focus change
    /// is observed.
    pub fn current_element(&self) -> Option<ElementId> {
        self.active
            .as_ref()
            .and_then(|active| active.shared.borrow().current)
    }

    /// Activate the trap. No-op if already active.
    ///
    /// Records the currently active element for later restoration, then
    /// focuses `focus_target` if given, else the container's first tabbable
    /// element, else the container itself. `scroll` controls whether the
    /// entry focus scrolls into view. The boundary listeners are installed
    /// after the entry focus settles.
    pub fn activate(&mut self, doc: &mut Document, focus_target: Option<ElementId>, scroll: bool) {
        if self.active.is_some() {
            return;
        }

        let initial_focus = doc.active_element();

        let entry = focus_target
            .or_else(|| focusable_elements(doc, self.container).first().copied())
            .unwrap_or(self.container);
        focus(doc, Some(entry), scroll);

        let shared = Rc::new(RefCell::new(TrapShared {
            container: self.container,
            current: None,
        }));
        let focus_guard = {
            let shared = Rc::clone(&shared);
            doc.listeners()
                .on_focus_in(move |doc, event| on_focus_in(&shared, doc, event))
        };
        let key_guard = {
            let shared = Rc::clone(&shared);
            doc.listeners()
                .on_key_down(move |doc, event| on_key_down(&shared, doc, event))
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(container = self.container.id(), "focus trap activated");

        self.active = Some(ActiveTrap {
            shared,
            initial_focus,
            _focus_guard: focus_guard,
            _key_guard: key_guard,
        });
    }

    /// Deactivate the trap. No-op if already inactive.
    ///
    /// Releases both boundary listeners, then focuses `focus_target` if
    /// given, else the recorded pre-activation element when the
    /// `restore_focus` option is on, else nothing. The trap may be
    /// activated again afterwards.
    pub fn deactivate(
        &mut self,
        doc: &mut Document,
        focus_target: Option<ElementId>,
        scroll: bool,
    ) {
        let Some(active) = self.active.take() else {
            return;
        };
        let ActiveTrap {
            shared,
            initial_focus,
            _focus_guard,
            _key_guard,
        } = active;

        // Release the listeners before the restoration focus so it is not
        // intercepted as an escape.
        drop(_focus_guard);
        drop(_key_guard);
        drop(shared);

        let restore = focus_target.or(if self.options.restore_focus {
            initial_focus
        } else {
            None
        });
        if restore.is_some() {
            focus(doc, restore, scroll);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(container = self.container.id(), "focus trap deactivated");
    }
}

impl std::fmt::Debug for FocusTrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusTrap")
            .field("container", &self.container)
            .field("active", &self.is_active())
            .field("options", &self.options)
            .finish()
    }
}

/// Boundary enforcement for focus changes.
///
/// Focus landing inside the container is the common case: record it as the
/// new anchor and stop propagation. Focus landing outside is an escape:
/// suppress the host's default reaction and pull focus back to the anchor,
/// or to the first tabbable element when no anchor is known yet. The
/// redirect always scrolls into view.
fn on_focus_in(shared: &Rc<RefCell<TrapShared>>, doc: &mut Document, event: &mut FocusInEvent) {
    let (container, current) = {
        let shared = shared.borrow();
        (shared.container, shared.current)
    };

    if doc.contains(container, event.target()) {
        event.stop_propagation();
        shared.borrow_mut().current = Some(event.target());
        return;
    }

    event.prevent_default();

    #[cfg(feature = "tracing")]
    tracing::trace!(
        escaped_to = event.target().id(),
        container = container.id(),
        "focus escaped; redirecting"
    );

    // The borrow on `shared` is released here: the focus call below
    // re-enters this handler through the nested focus-in dispatch.
    if current.is_some() {
        focus(doc, current, true);
    } else {
        focus_first_element(doc, container, true);
    }
}

/// Tab wrapping at the container's edges.
///
/// Only an unmodified Tab is handled; Alt/Ctrl/Meta chords pass through and
/// Shift picks the direction. The tab stops are recomputed on every press.
/// Wrapping fires only at the edge stops, so stops strictly between first
/// and last are left to the host's native tab movement. With no stops at
/// all the comparisons never match and the press passes through.
fn on_key_down(shared: &Rc<RefCell<TrapShared>>, doc: &mut Document, event: &mut KeyDownEvent) {
    if event.code() != KeyCode::Tab
        || event
            .modifiers()
            .intersects(Modifiers::ALT | Modifiers::CTRL | Modifiers::META)
    {
        return;
    }

    let container = shared.borrow().container;
    let elements = focusable_elements(doc, container);
    let (Some(&first), Some(&last)) = (elements.first(), elements.last()) else {
        return;
    };
    let Some(active) = doc.active_element() else {
        return;
    };

    if event.modifiers().contains(Modifiers::SHIFT) {
        if active == first {
            #[cfg(feature = "tracing")]
            tracing::trace!(container = container.id(), "wrapping focus to last stop");
            focus(doc, Some(last), true);
            event.prevent_default();
        }
    } else if active == last {
        #[cfg(feature = "tracing")]
        tracing::trace!(container = container.id(), "wrapping focus to first stop");
        focus(doc, Some(first), true);
        event.prevent_default();
    }
}
