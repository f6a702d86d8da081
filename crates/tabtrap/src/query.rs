//! The focusable-element query.

use tabtrap_dom::{Document, ElementId, Selector};

use crate::focus::focus;
use crate::tabbable::is_tabbable;

/// Candidate selectors for natively focusable elements.
///
/// Matching one of these is necessary but not sufficient: candidates still
/// pass through [`is_tabbable`] before they count as focus stops.
pub const FOCUSABLE_CANDIDATES: &[Selector] = &[
    Selector::Tag("input"),
    Selector::Tag("select"),
    Selector::Tag("textarea"),
    Selector::Tag("button"),
    Selector::Tag("summary"),
    Selector::TagAttr("a", "href"),
    Selector::TagAttr("area", "href"),
    Selector::Tag("embed"),
    Selector::Tag("iframe"),
    Selector::Tag("object"),
    Selector::TagAttr("audio", "controls"),
    Selector::TagAttr("video", "controls"),
    Selector::AttrNotValue("contenteditable", "false"),
];

/// The container's tabbable descendants, in document order.
///
/// Recomputed from the live tree on every call; the result is stale the
/// instant the tree mutates. The container itself is never included.
pub fn focusable_elements(doc: &Document, container: ElementId) -> Vec<ElementId> {
    doc.descendants(container)
        .filter(|&id| doc.matches(id, FOCUSABLE_CANDIDATES))
        .filter(|&id| is_tabbable(doc, id))
        .collect()
}

/// Focus the first tabbable element inside `container`.
///
/// Returns `false` when the container has none.
pub fn focus_first_element(doc: &mut Document, container: ElementId, scroll: bool) -> bool {
    let nodes = focusable_elements(doc, container);
    match nodes.first() {
        Some(&first) => focus(doc, Some(first), scroll),
        None => false,
    }
}
