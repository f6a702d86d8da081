//! The focus primitive.

use tabtrap_dom::{Document, ElementId};

/// Move focus to `target`, reporting success.
///
/// A `None` target or an id the document never minted is a no-op that
/// returns `false`. Otherwise the document's active element moves and a
/// focus-in notification fires; `scroll` controls whether the target is
/// scrolled into view. Returns whether the target holds focus when the call
/// completes, so a listener that redirects focus makes this report `false`.
pub fn focus(doc: &mut Document, target: Option<ElementId>, scroll: bool) -> bool {
    match target {
        Some(id) => doc.focus(id, scroll),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabtrap_dom::Element;

    #[test]
    fn none_target_is_noop() {
        let mut doc = Document::new();
        assert!(!focus(&mut doc, None, true));
        assert_eq!(doc.active_element(), Some(doc.root()));
        assert_eq!(doc.scrolled_into_view(), None);
    }

    #[test]
    fn some_target_receives_focus() {
        let mut doc = Document::new();
        let button = doc.append(doc.root(), Element::new("button"));
        assert!(focus(&mut doc, Some(button), false));
        assert_eq!(doc.active_element(), Some(button));
    }

    #[test]
    fn scroll_flag_is_forwarded() {
        let mut doc = Document::new();
        let button = doc.append(doc.root(), Element::new("button"));
        focus(&mut doc, Some(button), true);
        assert_eq!(doc.scrolled_into_view(), Some(button));
    }
}
