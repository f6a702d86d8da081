//! The tabbability predicate.
//!
//! Decides whether a single candidate element currently occupies a tab
//! stop. The rules mirror native tab-order behavior: disabled, hidden, and
//! invisible elements are skipped, an explicit negative `tabindex` opts an
//! element out, and a radio group contributes a single stop.

use tabtrap_dom::{Document, ElementId, Visibility};

use crate::query::FOCUSABLE_CANDIDATES;

/// Whether the element appears in the tab order.
///
/// An element is tabbable iff all of:
/// 1. it is not hidden and not disabled;
/// 2. it has no explicit negative `tabindex`;
/// 3. it matches the focusable candidate list;
/// 4. it is visible (at least one non-empty layout box, computed visibility
///    not hidden);
/// 5. if it is a radio input, its group rule allows it.
pub fn is_tabbable(doc: &Document, id: ElementId) -> bool {
    if doc.is_hidden(id) || doc.is_disabled(id) {
        return false;
    }
    if has_negative_tab_index(doc, id) {
        return false;
    }
    if !doc.matches(id, FOCUSABLE_CANDIDATES) {
        return false;
    }
    if !is_visible(doc, id) {
        return false;
    }
    if is_radio(doc, id) && !radio_group_allows(doc, id) {
        return false;
    }
    true
}

/// A present `tabindex` parsed as a negative integer excludes the element.
/// An absent, non-negative, or unparsable value does not.
fn has_negative_tab_index(doc: &Document, id: ElementId) -> bool {
    doc.attr(id, "tabindex")
        .and_then(|value| value.trim().parse::<i32>().ok())
        .is_some_and(|index| index < 0)
}

/// Rendered somewhere and not hidden by computed visibility.
pub(crate) fn is_visible(doc: &Document, id: ElementId) -> bool {
    doc.boxes(id).iter().any(|rect| !rect.is_empty())
        && doc.computed_visibility(id) != Visibility::Hidden
}

fn is_radio(doc: &Document, id: ElementId) -> bool {
    doc.tag(id) == "input"
        && doc
            .attr(id, "type")
            .is_some_and(|ty| ty.eq_ignore_ascii_case("radio"))
}

/// One focus stop per radio group: if any member of the same-name group is
/// checked, only the checked member is tabbable; otherwise all members are.
///
/// The group is scoped to the enclosing `form` when there is one, else to
/// the whole document. A radio without a name (or with an empty one) is a
/// group of its own and is always allowed.
fn radio_group_allows(doc: &Document, id: ElementId) -> bool {
    let Some(name) = doc.attr(id, "name").filter(|name| !name.is_empty()) else {
        return true;
    };

    let scope = doc
        .closest_ancestor(id, "form")
        .unwrap_or_else(|| doc.root());

    let group_has_checked = doc.descendants(scope).any(|member| {
        is_radio(doc, member)
            && doc.attr(member, "name") == Some(name)
            && doc.is_checked(member)
    });

    !group_has_checked || doc.is_checked(id)
}
