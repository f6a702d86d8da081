//! Focus and keyboard events with dispatch controls.
//!
//! Both event types carry the two controls a handler can exercise during
//! synchronous dispatch: `stop_propagation` halts delivery to later
//! listeners, `prevent_default` marks the host's default action (native tab
//! movement, scrolling) as suppressed. The dispatcher returns the event so
//! the host can observe both flags after delivery.

use crate::element::ElementId;

bitflags::bitflags! {
    /// Keyboard modifier state at the time of a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
        const META = 1 << 3;
    }
}

/// A key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    Tab,
    Enter,
    Escape,
}

/// A key press: code plus modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers held.
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Attach modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// An unmodified Tab press.
    pub const fn tab() -> Self {
        Self::new(KeyCode::Tab)
    }

    /// A Shift+Tab press.
    pub fn shift_tab() -> Self {
        Self::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT)
    }
}

/// A focus-change notification: some element just received focus.
#[derive(Debug)]
pub struct FocusInEvent {
    target: ElementId,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl FocusInEvent {
    pub(crate) fn new(target: ElementId) -> Self {
        Self {
            target,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// The element that received focus.
    #[inline]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Halt delivery to listeners registered after the current one.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Suppress the host's default reaction to this focus change.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A key-press notification.
#[derive(Debug)]
pub struct KeyDownEvent {
    key: KeyEvent,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl KeyDownEvent {
    pub(crate) fn new(key: KeyEvent) -> Self {
        Self {
            key,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// The key press being delivered.
    #[inline]
    pub fn key(&self) -> KeyEvent {
        self.key
    }

    /// The pressed key's code.
    #[inline]
    pub fn code(&self) -> KeyCode {
        self.key.code
    }

    /// Modifier state at press time.
    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.key.modifiers
    }

    /// Halt delivery to listeners registered after the current one.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Suppress the host's default key handling (e.g. native tab movement).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
