#![forbid(unsafe_code)]

//! Listener registration as a scoped capability.
//!
//! The registry holds the document-wide focus-in and key-down listener
//! lists. Registering returns a [`ListenerGuard`]; the listener stays
//! installed exactly as long as the guard lives and is removed when the
//! guard drops, on every exit path including panic unwinding. There is no
//! way to install a listener without receiving its guard, so installs and
//! removals are paired by construction.
//!
//! # Invariants
//!
//! 1. One guard per registration; dropping the guard removes exactly that
//!    registration and no other.
//! 2. `installed_count() - removed_count() == active_listeners()` at all
//!    times.
//! 3. Delivery order is registration order.
//! 4. Handlers may register or deregister listeners while a dispatch is in
//!    flight; the in-flight dispatch keeps delivering to the snapshot it
//!    started with.
//!
//! # Failure Modes
//!
//! - Guard outlives the registry: drop is a no-op (weak handle upgrade
//!   fails), no panic.
//! - Handler panics: the guard still removes its registration when the
//!   owner unwinds.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::document::Document;
use crate::event::{FocusInEvent, KeyDownEvent};

/// Handler for focus-change notifications.
pub type FocusInHandler = Rc<dyn Fn(&mut Document, &mut FocusInEvent)>;

/// Handler for key-press notifications.
pub type KeyDownHandler = Rc<dyn Fn(&mut Document, &mut KeyDownEvent)>;

/// Unique identifier for one listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    FocusIn,
    KeyDown,
}

struct Slot<H> {
    id: ListenerId,
    handler: H,
}

struct RegistryInner {
    focus_in: Vec<Slot<FocusInHandler>>,
    key_down: Vec<Slot<KeyDownHandler>>,
    next_id: u64,
    installed: u64,
    removed: u64,
}

impl RegistryInner {
    fn new() -> Self {
        Self {
            focus_in: Vec::new(),
            key_down: Vec::new(),
            next_id: 1,
            installed: 0,
            removed: 0,
        }
    }

    fn mint_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn remove_slot<H>(slots: &mut Vec<Slot<H>>, id: ListenerId) -> bool {
    match slots.iter().position(|slot| slot.id == id) {
        Some(index) => {
            slots.remove(index);
            true
        }
        None => false,
    }
}

/// The document's listener lists.
///
/// Owned by a [`Document`]; handles are cheap to clone and share the same
/// underlying lists.
#[derive(Clone)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner::new())),
        }
    }

    /// Install a focus-in listener. It stays installed until the returned
    /// guard is dropped.
    pub fn on_focus_in<F>(&self, handler: F) -> ListenerGuard
    where
        F: Fn(&mut Document, &mut FocusInEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.mint_id();
        inner.focus_in.push(Slot {
            id,
            handler: Rc::new(handler),
        });
        inner.installed += 1;
        ListenerGuard {
            registry: Rc::downgrade(&self.inner),
            channel: Channel::FocusIn,
            id,
        }
    }

    /// Install a key-down listener. It stays installed until the returned
    /// guard is dropped.
    pub fn on_key_down<F>(&self, handler: F) -> ListenerGuard
    where
        F: Fn(&mut Document, &mut KeyDownEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.mint_id();
        inner.key_down.push(Slot {
            id,
            handler: Rc::new(handler),
        });
        inner.installed += 1;
        ListenerGuard {
            registry: Rc::downgrade(&self.inner),
            channel: Channel::KeyDown,
            id,
        }
    }

    /// Snapshot of the focus-in handlers, in delivery order.
    pub(crate) fn focus_in_snapshot(&self) -> Vec<FocusInHandler> {
        self.inner
            .borrow()
            .focus_in
            .iter()
            .map(|slot| Rc::clone(&slot.handler))
            .collect()
    }

    /// Snapshot of the key-down handlers, in delivery order.
    pub(crate) fn key_down_snapshot(&self) -> Vec<KeyDownHandler> {
        self.inner
            .borrow()
            .key_down
            .iter()
            .map(|slot| Rc::clone(&slot.handler))
            .collect()
    }

    /// Number of listeners currently installed across both channels.
    pub fn active_listeners(&self) -> usize {
        let inner = self.inner.borrow();
        inner.focus_in.len() + inner.key_down.len()
    }

    /// Total registrations over the registry's lifetime.
    pub fn installed_count(&self) -> u64 {
        self.inner.borrow().installed
    }

    /// Total removals over the registry's lifetime.
    pub fn removed_count(&self) -> u64 {
        self.inner.borrow().removed
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ListenerRegistry")
            .field("focus_in", &inner.focus_in.len())
            .field("key_down", &inner.key_down.len())
            .field("installed", &inner.installed)
            .field("removed", &inner.removed)
            .finish()
    }
}

/// RAII guard for one listener registration.
///
/// Dropping the guard removes the listener. The guard holds only a weak
/// handle to the registry, so it may safely outlive the document.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Weak<RefCell<RegistryInner>>,
    channel: Channel,
    id: ListenerId,
}

impl ListenerGuard {
    /// The registration this guard owns.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        let removed = match self.channel {
            Channel::FocusIn => remove_slot(&mut inner.focus_in, self.id),
            Channel::KeyDown => remove_slot(&mut inner.key_down, self.id),
        };
        if removed {
            inner.removed += 1;
        }
    }
}
