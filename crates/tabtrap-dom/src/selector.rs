//! Tiny attribute selectors for matching elements.
//!
//! The model supports exactly the selector shapes focus queries use: a bare
//! tag (`input`), a tag with a required attribute (`a[href]`), and a
//! required attribute with one rejected value
//! (`[contenteditable]` but not `[contenteditable="false"]`). There is no
//! parser; selector lists are written as const slices.

use crate::document::Document;
use crate::element::ElementId;

/// A single selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Matches elements with this tag.
    Tag(&'static str),
    /// Matches elements with this tag that carry the attribute, whatever
    /// its value.
    TagAttr(&'static str, &'static str),
    /// Matches elements carrying the attribute with any value except the
    /// rejected one.
    AttrNotValue(&'static str, &'static str),
}

impl Selector {
    /// Whether the element matches this selector.
    pub fn matches(self, doc: &Document, id: ElementId) -> bool {
        match self {
            Selector::Tag(tag) => doc.tag(id) == tag,
            Selector::TagAttr(tag, attr) => doc.tag(id) == tag && doc.has_attr(id, attr),
            Selector::AttrNotValue(attr, rejected) => {
                doc.attr(id, attr).is_some_and(|value| value != rejected)
            }
        }
    }
}
