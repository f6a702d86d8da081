#![forbid(unsafe_code)]

//! Headless document model for focus management.
//!
//! This crate provides the substrate a focus trap operates on: an element
//! tree with attributes and layout boxes, computed visibility, an active
//! element register, synchronous focus/key event dispatch, and a listener
//! registry with RAII deregistration guards.
//!
//! The model is deliberately small. It carries exactly the observable state
//! that tab-order decisions depend on (tags, attributes, enabled/hidden
//! flags, layout boxes, visibility inheritance) and nothing else: no styles,
//! no text content, no reflow. Policy — which elements are tabbable, what a
//! trap does with events — lives in the `tabtrap` crate.
//!
//! # Example
//!
//! ```
//! use tabtrap_dom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let dialog = doc.append(doc.root(), Element::new("div"));
//! let button = doc.append(dialog, Element::new("button"));
//!
//! assert!(doc.contains(dialog, button));
//! assert!(doc.focus(button, false));
//! assert_eq!(doc.active_element(), Some(button));
//! ```

pub mod document;
pub mod element;
pub mod event;
pub mod geometry;
pub mod listener;
pub mod selector;

pub use document::{Descendants, Document};
pub use element::{Element, ElementFlags, ElementId, Visibility};
pub use event::{FocusInEvent, KeyCode, KeyDownEvent, KeyEvent, Modifiers};
pub use geometry::Rect;
pub use listener::{ListenerGuard, ListenerId, ListenerRegistry};
pub use selector::Selector;
