//! End-to-end trap behavior against a simulated host.
//!
//! The library suppresses native tab movement through `prevent_default` but
//! never performs it; `press_tab` below plays the host, moving focus to the
//! next document-order tab stop whenever a Tab press comes back
//! unsuppressed.

use tabtrap::dom::{Document, Element, ElementId, KeyEvent};
use tabtrap::{FocusTrap, TrapOptions, focusable_elements};

/// Dispatch a Tab press and, unless a listener suppressed it, perform the
/// host's native focus move over the whole document's tab stops.
fn press_tab(doc: &mut Document, shift: bool) {
    let key = if shift {
        KeyEvent::shift_tab()
    } else {
        KeyEvent::tab()
    };
    let event = doc.dispatch_key_down(key);
    if event.default_prevented() {
        return;
    }

    let stops = focusable_elements(doc, doc.root());
    if stops.is_empty() {
        return;
    }
    let position = doc
        .active_element()
        .and_then(|active| stops.iter().position(|&stop| stop == active));
    let next = match (position, shift) {
        (Some(i), false) => stops.get(i + 1).copied().unwrap_or(stops[0]),
        (Some(0), true) => stops[stops.len() - 1],
        (Some(i), true) => stops[i - 1],
        (None, false) => stops[0],
        (None, true) => stops[stops.len() - 1],
    };
    doc.focus(next, false);
}

/// body > [trigger, container > [a, b, c], after]
struct Page {
    doc: Document,
    trigger: ElementId,
    container: ElementId,
    a: ElementId,
    b: ElementId,
    c: ElementId,
}

fn page() -> Page {
    let mut doc = Document::new();
    let trigger = doc.append(doc.root(), Element::new("button"));
    let container = doc.append(doc.root(), Element::new("div"));
    let a = doc.append(container, Element::new("input"));
    let b = doc.append(container, Element::new("button"));
    let c = doc.append(container, Element::new("a").attr("href", "#"));
    doc.append(doc.root(), Element::new("button"));
    Page {
        doc,
        trigger,
        container,
        a,
        b,
        c,
    }
}

#[test]
fn full_activation_cycle_restores_focus() {
    let mut page = page();
    page.doc.focus(page.trigger, false);

    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);
    assert_eq!(page.doc.active_element(), Some(page.a));

    trap.deactivate(&mut page.doc, None, false);
    assert_eq!(page.doc.active_element(), Some(page.trigger));
}

#[test]
fn tab_cycles_within_the_container() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);

    // a -> b -> c are native moves; c -> a is the trap's wrap.
    press_tab(&mut page.doc, false);
    assert_eq!(page.doc.active_element(), Some(page.b));
    press_tab(&mut page.doc, false);
    assert_eq!(page.doc.active_element(), Some(page.c));
    press_tab(&mut page.doc, false);
    assert_eq!(page.doc.active_element(), Some(page.a));
}

#[test]
fn shift_tab_cycles_backwards() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);

    // a -> c is the trap's wrap; c -> b -> a are native moves.
    press_tab(&mut page.doc, true);
    assert_eq!(page.doc.active_element(), Some(page.c));
    press_tab(&mut page.doc, true);
    assert_eq!(page.doc.active_element(), Some(page.b));
    press_tab(&mut page.doc, true);
    assert_eq!(page.doc.active_element(), Some(page.a));
}

#[test]
fn many_cycles_never_leave_the_container() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);

    for _ in 0..20 {
        press_tab(&mut page.doc, false);
        let active = page.doc.active_element().unwrap();
        assert!(page.doc.contains(page.container, active));
    }
    for _ in 0..20 {
        press_tab(&mut page.doc, true);
        let active = page.doc.active_element().unwrap();
        assert!(page.doc.contains(page.container, active));
    }
}

#[test]
fn programmatic_escape_is_reverted() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);

    page.doc.focus(page.b, false);
    assert!(!page.doc.focus(page.trigger, false));
    assert_eq!(page.doc.active_element(), Some(page.b));
}

#[test]
fn escape_reverts_to_first_before_any_anchor_exists() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, Some(page.c), false);

    // No focus change has been observed since activation.
    assert!(!page.doc.focus(page.trigger, false));
    assert_eq!(page.doc.active_element(), Some(page.a));
}

#[test]
fn redirects_force_scroll_into_view() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);
    assert_eq!(page.doc.scrolled_into_view(), None);

    page.doc.focus(page.trigger, false);
    assert_eq!(page.doc.scrolled_into_view(), Some(page.a));
}

#[test]
fn tab_wrap_forces_scroll_into_view() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);

    page.doc.focus(page.c, false);
    assert_eq!(page.doc.scrolled_into_view(), None);
    press_tab(&mut page.doc, false);
    assert_eq!(page.doc.scrolled_into_view(), Some(page.a));
}

#[test]
fn listener_counts_stay_paired_across_cycles() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);

    for _ in 0..3 {
        trap.activate(&mut page.doc, None, false);
        trap.activate(&mut page.doc, None, false);
        trap.deactivate(&mut page.doc, None, false);
        trap.deactivate(&mut page.doc, None, false);
    }

    let listeners = page.doc.listeners();
    assert_eq!(listeners.installed_count(), 6);
    assert_eq!(listeners.removed_count(), 6);
    assert_eq!(listeners.active_listeners(), 0);
}

#[test]
fn inactive_trap_does_not_interfere() {
    let mut page = page();
    let trap = FocusTrap::new(page.container);

    page.doc.focus(page.a, false);
    press_tab(&mut page.doc, false);
    press_tab(&mut page.doc, false);
    // Native movement walks past the container boundary.
    press_tab(&mut page.doc, false);
    let active = page.doc.active_element().unwrap();
    assert!(!page.doc.contains(page.container, active));
    assert!(!trap.is_active());
}

#[test]
fn empty_container_lets_focus_escape() {
    let mut doc = Document::new();
    let before = doc.append(doc.root(), Element::new("button"));
    let container = doc.append(doc.root(), Element::new("div"));
    doc.append(container, Element::new("p"));

    let mut trap = FocusTrap::new(container);
    trap.activate(&mut doc, None, false);
    // Fallback entry focus: the container itself.
    assert_eq!(doc.active_element(), Some(container));

    press_tab(&mut doc, false);
    assert_eq!(doc.active_element(), Some(before));
}

#[test]
fn radio_group_contributes_one_stop() {
    let mut doc = Document::new();
    let container = doc.append(doc.root(), Element::new("form"));
    let r1 = doc.append(
        container,
        Element::new("input").attr("type", "radio").attr("name", "g"),
    );
    let r2 = doc.append(
        container,
        Element::new("input")
            .attr("type", "radio")
            .attr("name", "g")
            .checked(true),
    );
    let r3 = doc.append(
        container,
        Element::new("input").attr("type", "radio").attr("name", "g"),
    );
    let submit = doc.append(container, Element::new("button"));

    assert_eq!(focusable_elements(&doc, container), vec![r2, submit]);

    doc.set_checked(r2, false);
    assert_eq!(focusable_elements(&doc, container), vec![r1, r2, r3, submit]);

    let mut trap = FocusTrap::new(container);
    doc.set_checked(r2, true);
    trap.activate(&mut doc, None, false);
    assert_eq!(doc.active_element(), Some(r2));

    // One stop for the group: Tab moves straight to the submit button,
    // wraps back to the checked radio.
    press_tab(&mut doc, false);
    assert_eq!(doc.active_element(), Some(submit));
    press_tab(&mut doc, false);
    assert_eq!(doc.active_element(), Some(r2));
}

#[test]
fn restore_focus_off_leaves_focus_in_place() {
    let mut page = page();
    page.doc.focus(page.trigger, false);

    let mut trap =
        FocusTrap::with_options(page.container, TrapOptions::new().restore_focus(false));
    trap.activate(&mut page.doc, None, false);
    page.doc.focus(page.b, false);
    trap.deactivate(&mut page.doc, None, false);

    assert_eq!(page.doc.active_element(), Some(page.b));
}

#[test]
fn deactivation_target_overrides_restore() {
    let mut page = page();
    page.doc.focus(page.trigger, false);

    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);
    trap.deactivate(&mut page.doc, Some(page.c), false);

    assert_eq!(page.doc.active_element(), Some(page.c));
}

#[test]
fn trap_reactivates_after_deactivation() {
    let mut page = page();
    page.doc.focus(page.trigger, false);

    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);
    trap.deactivate(&mut page.doc, None, false);
    trap.activate(&mut page.doc, None, false);

    // The boundary is enforced again.
    assert!(!page.doc.focus(page.trigger, false));
    let active = page.doc.active_element().unwrap();
    assert!(page.doc.contains(page.container, active));
}

#[test]
fn dynamically_added_stops_join_the_cycle() {
    let mut page = page();
    let mut trap = FocusTrap::new(page.container);
    trap.activate(&mut page.doc, None, false);

    let d = page.doc.append(page.container, Element::new("textarea"));
    page.doc.focus(page.c, false);

    // `c` is no longer the last stop, so Tab is a native move to `d`.
    press_tab(&mut page.doc, false);
    assert_eq!(page.doc.active_element(), Some(d));
    // `d` is the new last stop; Tab wraps.
    press_tab(&mut page.doc, false);
    assert_eq!(page.doc.active_element(), Some(page.a));
}
