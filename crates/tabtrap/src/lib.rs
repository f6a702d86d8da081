#![forbid(unsafe_code)]

//! Keyboard focus trap for a headless document.
//!
//! A [`FocusTrap`] guards one container element. While active it keeps
//! focus inside the container: Tab wraps from the last tabbable element to
//! the first (and Shift+Tab the other way), and any focus change that lands
//! outside the container is redirected back in. Deactivating restores focus
//! to whatever was active before activation.
//!
//! The trap holds its document listeners through RAII guards, so the
//! listeners are released on deactivation and on drop; no exit path leaks a
//! handler.
//!
//! # Example
//!
//! ```
//! use tabtrap::FocusTrap;
//! use tabtrap::dom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let dialog = doc.append(doc.root(), Element::new("div"));
//! let confirm = doc.append(dialog, Element::new("button"));
//! let cancel = doc.append(dialog, Element::new("button"));
//!
//! let mut trap = FocusTrap::new(dialog);
//! trap.activate(&mut doc, None, false);
//! assert_eq!(doc.active_element(), Some(confirm));
//!
//! trap.deactivate(&mut doc, None, false);
//! assert_eq!(doc.active_element(), Some(doc.root()));
//! # let _ = cancel;
//! ```

pub mod focus;
pub mod query;
pub mod tabbable;
pub mod trap;

pub use tabtrap_dom as dom;

pub use focus::focus;
pub use query::{FOCUSABLE_CANDIDATES, focus_first_element, focusable_elements};
pub use tabbable::is_tabbable;
pub use trap::{FocusTrap, TrapOptions};
