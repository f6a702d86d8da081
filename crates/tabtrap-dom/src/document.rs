#![forbid(unsafe_code)]

//! The document: an append-only element tree plus focus state and event
//! dispatch.
//!
//! # Invariants
//!
//! 1. Ids are dense arena indices minted by [`Document::append`]; elements
//!    are never removed, so an id stays valid for the document's lifetime.
//! 2. [`Document::descendants`] yields pre-order traversal, which is
//!    document order.
//! 3. The active element always refers to a live element; a fresh document
//!    starts with its root (`body`) active, matching how hosts report a
//!    default active element.
//! 4. Dispatch is synchronous and reentrant: a handler that moves focus
//!    triggers a nested focus-in dispatch before the outer one returns.
//!    Focusing the already-active element does not re-fire.
//!
//! # Failure Modes
//!
//! - `focus` on an id the document never minted returns `false` and changes
//!   nothing.
//! - Dispatch with no listeners installed returns the event untouched.

use crate::element::{Element, ElementFlags, ElementId, Visibility};
use crate::event::{FocusInEvent, KeyDownEvent, KeyEvent};
use crate::geometry::Rect;
use crate::listener::ListenerRegistry;
use crate::selector::Selector;

struct Node {
    element: Element,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// An element tree with focus state and listener channels.
pub struct Document {
    nodes: Vec<Node>,
    root: ElementId,
    active: Option<ElementId>,
    scrolled: Option<ElementId>,
    listeners: ListenerRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only a `body` root, which starts as the
    /// active element.
    pub fn new() -> Self {
        let root = ElementId::from_index(0);
        Self {
            nodes: vec![Node {
                element: Element::new("body"),
                parent: None,
                children: Vec::new(),
            }],
            root,
            active: Some(root),
            scrolled: None,
            listeners: ListenerRegistry::new(),
        }
    }

    /// The root element.
    #[inline]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of elements in the document, root included. Never zero.
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Append a detached element as the last child of `parent`, returning
    /// its id.
    pub fn append(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = ElementId::from_index(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn node(&self, id: ElementId) -> &Node {
        &self.nodes[id.index()]
    }

    fn is_valid(&self, id: ElementId) -> bool {
        id.index() < self.nodes.len()
    }

    // --- Tree Queries ---

    /// The element's tag, lowercased.
    pub fn tag(&self, id: ElementId) -> &str {
        &self.node(id).element.tag
    }

    /// The element's parent, `None` for the root.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).parent
    }

    /// The element's children, in insertion order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.node(id).children
    }

    /// Whether `id` is `ancestor` itself or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// The descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: ElementId) -> Descendants<'_> {
        let mut stack: Vec<ElementId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// The nearest ancestor (excluding `id` itself) with the given tag.
    pub fn closest_ancestor(&self, id: ElementId, tag: &str) -> Option<ElementId> {
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if self.tag(current) == tag {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    // --- Attributes and Flags ---

    /// Attribute value, if present.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node(id).element.attrs.get(name).map(String::as_str)
    }

    /// Whether the attribute is present, whatever its value.
    pub fn has_attr(&self, id: ElementId, name: &str) -> bool {
        self.node(id).element.attrs.contains_key(name)
    }

    /// Set an attribute on a live element.
    pub fn set_attr(&mut self, id: ElementId, name: impl Into<String>, value: impl Into<String>) {
        self.nodes[id.index()]
            .element
            .attrs
            .insert(name.into(), value.into());
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.node(id).element.flags.contains(ElementFlags::HIDDEN)
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.node(id).element.flags.contains(ElementFlags::DISABLED)
    }

    pub fn is_checked(&self, id: ElementId) -> bool {
        self.node(id).element.flags.contains(ElementFlags::CHECKED)
    }

    /// Set or clear the checked flag. Group exclusivity is the caller's
    /// concern; checking one radio does not uncheck its siblings here.
    pub fn set_checked(&mut self, id: ElementId, checked: bool) {
        self.nodes[id.index()]
            .element
            .flags
            .set(ElementFlags::CHECKED, checked);
    }

    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        self.nodes[id.index()]
            .element
            .flags
            .set(ElementFlags::HIDDEN, hidden);
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        self.nodes[id.index()]
            .element
            .flags
            .set(ElementFlags::DISABLED, disabled);
    }

    // --- Geometry and Visibility ---

    /// The element's layout boxes. Empty when the element is not rendered.
    pub fn boxes(&self, id: ElementId) -> &[Rect] {
        &self.node(id).element.boxes
    }

    /// The element's declared visibility.
    pub fn visibility(&self, id: ElementId) -> Visibility {
        self.node(id).element.visibility
    }

    /// Resolve `Inherit` through the ancestor chain. The nearest explicit
    /// declaration wins; an undeclared chain is `Visible`.
    pub fn computed_visibility(&self, id: ElementId) -> Visibility {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.visibility(current) {
                Visibility::Inherit => cursor = self.parent(current),
                explicit => return explicit,
            }
        }
        Visibility::Visible
    }

    // --- Selector Matching ---

    /// Whether the element matches any selector in the list.
    pub fn matches(&self, id: ElementId, selectors: &[Selector]) -> bool {
        selectors.iter().any(|selector| selector.matches(self, id))
    }

    // --- Focus State ---

    /// The element that currently holds focus.
    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    /// The element most recently scrolled into view by a focus call, if
    /// any.
    pub fn scrolled_into_view(&self) -> Option<ElementId> {
        self.scrolled
    }

    /// Move focus to `id`, optionally scrolling it into view, and dispatch
    /// a focus-in notification.
    ///
    /// Returns whether `id` holds focus when the call completes. A listener
    /// that moves focus elsewhere during dispatch makes this report
    /// `false`. Focusing the already-active element succeeds without
    /// re-dispatching.
    pub fn focus(&mut self, id: ElementId, scroll: bool) -> bool {
        if !self.is_valid(id) {
            return false;
        }
        if scroll {
            self.scrolled = Some(id);
        }
        if self.active == Some(id) {
            return true;
        }
        self.active = Some(id);
        self.dispatch_focus_in(id);
        self.active == Some(id)
    }

    // --- Event Dispatch ---

    /// The listener channels for this document.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Deliver a focus-in notification for `target` to the installed
    /// listeners, in registration order, honoring `stop_propagation`.
    /// Returns the event so the caller can observe its flags.
    pub fn dispatch_focus_in(&mut self, target: ElementId) -> FocusInEvent {
        let mut event = FocusInEvent::new(target);
        for handler in self.listeners.focus_in_snapshot() {
            handler(self, &mut event);
            if event.propagation_stopped() {
                break;
            }
        }
        event
    }

    /// Deliver a key-press notification to the installed listeners, in
    /// registration order, honoring `stop_propagation`. Returns the event;
    /// the caller decides whether to run its default key handling based on
    /// `default_prevented`.
    pub fn dispatch_key_down(&mut self, key: KeyEvent) -> KeyDownEvent {
        let mut event = KeyDownEvent::new(key);
        for handler in self.listeners.key_down_snapshot() {
            handler(self, &mut event);
            if event.propagation_stopped() {
                break;
            }
        }
        event
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.nodes.len())
            .field("active", &self.active)
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// Pre-order iterator over an element's descendants.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.stack.pop()?;
        let children = self.doc.children(id);
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}
