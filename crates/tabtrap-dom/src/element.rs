//! Element identity, state flags, and the element builder.

use ahash::AHashMap;

use crate::geometry::Rect;

/// Unique identifier for an element within its [`Document`](crate::Document).
///
/// Ids are minted by `Document::append` and stay valid for the document's
/// lifetime (elements are never removed). An id from one document must not
/// be used with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

bitflags::bitflags! {
    /// Boolean element state.
    ///
    /// `HIDDEN` mirrors the `hidden` host attribute, `DISABLED` the form
    /// control disabled state, `CHECKED` the live checkedness of radio and
    /// checkbox inputs. Checkedness is state, not an attribute: toggling it
    /// does not touch the attribute map.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u8 {
        const HIDDEN = 1 << 0;
        const DISABLED = 1 << 1;
        const CHECKED = 1 << 2;
    }
}

/// Declared visibility of an element.
///
/// `Inherit` resolves through the ancestor chain when computed; an explicit
/// `Visible` overrides a hidden ancestor, as in CSS `visibility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Inherit,
    Visible,
    Hidden,
}

/// A detached element, built up before insertion into a document.
///
/// Tags are lowercased on construction. New elements default to one
/// non-empty layout box (they render somewhere), `Inherit` visibility, and
/// no flags set.
///
/// # Example
///
/// ```
/// use tabtrap_dom::Element;
///
/// let radio = Element::new("input")
///     .attr("type", "radio")
///     .attr("name", "flavor")
///     .checked(true);
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) attrs: AHashMap<String, String>,
    pub(crate) flags: ElementFlags,
    pub(crate) visibility: Visibility,
    pub(crate) boxes: Vec<Rect>,
}

impl Element {
    /// Create a new element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        let mut tag = tag.into();
        tag.make_ascii_lowercase();
        Self {
            tag,
            attrs: AHashMap::new(),
            flags: ElementFlags::empty(),
            visibility: Visibility::Inherit,
            boxes: vec![Rect::new(0, 0, 10, 1)],
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the `tabindex` attribute.
    pub fn tab_index(self, index: i32) -> Self {
        self.attr("tabindex", index.to_string())
    }

    /// Set the hidden flag.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.flags.set(ElementFlags::HIDDEN, hidden);
        self
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.flags.set(ElementFlags::DISABLED, disabled);
        self
    }

    /// Set the checked flag.
    pub fn checked(mut self, checked: bool) -> Self {
        self.flags.set(ElementFlags::CHECKED, checked);
        self
    }

    /// Set the declared visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Replace the layout boxes.
    pub fn boxes(mut self, boxes: Vec<Rect>) -> Self {
        self.boxes = boxes;
        self
    }

    /// Remove all layout boxes. The element takes no space, as if not
    /// rendered at all.
    pub fn unrendered(mut self) -> Self {
        self.boxes.clear();
        self
    }
}
