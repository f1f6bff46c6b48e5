//! # Store Navigation
//!
//! Keyboard selection cursor for the store screen.
//!
//! The cursor never touches the menu or the order. It looks at their lengths,
//! moves itself, and reports what the key asked for as a [`KeyOutcome`]. The
//! caller performs the change and then calls [`Cursor::settle`].
//!
//! ## Key Map
//! ```text
//! ┌──────────────┬───────────────────────────────────────────────────────────┐
//! │ Key          │ Effect                                                    │
//! ├──────────────┼───────────────────────────────────────────────────────────┤
//! │ 1..9         │ focus menu item n and add it (ignored past the menu end)  │
//! │ next / prev  │ menu: wrap around       bill: stop at the ends            │
//! │ enter        │ add the focused menu item                                 │
//! │ + / -        │ one more / one fewer of the focused bill line             │
//! │ tab          │ menu → bill (if the bill has lines), bill → menu          │
//! │ escape       │ clear focus                                               │
//! └──────────────┴───────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Which list holds the cursor, and where.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pane", content = "index", rename_all = "lowercase")]
pub enum Focus {
    #[default]
    None,
    Menu(usize),
    Bill(usize),
}

/// A key the store screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Quick-add key `1`..=`9`.
    Digit(u8),
    Next,
    Prev,
    Enter,
    Increase,
    Decrease,
    Tab,
    Escape,
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Add one unit of the menu item at this index.
    AddMenuItem(usize),
    /// Add one unit to the bill line at this index.
    IncreaseLine(usize),
    /// Remove one unit from the bill line at this index.
    DecreaseLine(usize),
    /// Only the focus changed.
    Moved,
    /// Nothing to do.
    Ignored,
}

/// Selection cursor over the menu grid and the bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    focus: Focus,
}

impl Cursor {
    /// Starts on the first menu item, or unfocused when the menu is empty.
    pub fn start(menu_len: usize) -> Self {
        Cursor {
            focus: if menu_len > 0 { Focus::Menu(0) } else { Focus::None },
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Handles one key press against the current list lengths.
    pub fn press(&mut self, key: Key, menu_len: usize, bill_len: usize) -> KeyOutcome {
        match key {
            Key::Digit(d) => {
                let index = match d {
                    1..=9 => usize::from(d - 1),
                    _ => return KeyOutcome::Ignored,
                };
                if index >= menu_len {
                    return KeyOutcome::Ignored;
                }
                self.focus = Focus::Menu(index);
                KeyOutcome::AddMenuItem(index)
            }

            Key::Next => match self.focus {
                Focus::Bill(i) if bill_len > 0 => {
                    self.focus = Focus::Bill((i + 1).min(bill_len - 1));
                    KeyOutcome::Moved
                }
                Focus::Menu(i) if menu_len > 0 => {
                    self.focus = Focus::Menu((i + 1) % menu_len);
                    KeyOutcome::Moved
                }
                Focus::None if menu_len > 0 => {
                    self.focus = Focus::Menu(0);
                    KeyOutcome::Moved
                }
                _ => KeyOutcome::Ignored,
            },

            Key::Prev => match self.focus {
                Focus::Bill(i) if bill_len > 0 => {
                    self.focus = Focus::Bill(i.saturating_sub(1).min(bill_len - 1));
                    KeyOutcome::Moved
                }
                Focus::Menu(i) if menu_len > 0 => {
                    self.focus = Focus::Menu((i % menu_len + menu_len - 1) % menu_len);
                    KeyOutcome::Moved
                }
                Focus::None if menu_len > 0 => {
                    self.focus = Focus::Menu(menu_len - 1);
                    KeyOutcome::Moved
                }
                _ => KeyOutcome::Ignored,
            },

            Key::Enter => match self.focus {
                Focus::Menu(i) if i < menu_len => KeyOutcome::AddMenuItem(i),
                _ => KeyOutcome::Ignored,
            },

            Key::Increase => match self.focus {
                Focus::Bill(i) if i < bill_len => KeyOutcome::IncreaseLine(i),
                _ => KeyOutcome::Ignored,
            },

            Key::Decrease => match self.focus {
                Focus::Bill(i) if i < bill_len => KeyOutcome::DecreaseLine(i),
                _ => KeyOutcome::Ignored,
            },

            Key::Tab => match self.focus {
                Focus::Menu(_) if bill_len > 0 => {
                    self.focus = Focus::Bill(0);
                    KeyOutcome::Moved
                }
                Focus::Bill(_) => {
                    self.focus = if menu_len > 0 { Focus::Menu(0) } else { Focus::None };
                    KeyOutcome::Moved
                }
                _ => KeyOutcome::Ignored,
            },

            Key::Escape => {
                self.focus = Focus::None;
                KeyOutcome::Moved
            }
        }
    }

    /// Pulls the cursor back inside the lists after either one shrinks.
    ///
    /// A bill cursor on an emptied bill returns to the top of the menu.
    pub fn settle(&mut self, menu_len: usize, bill_len: usize) {
        self.focus = match self.focus {
            Focus::Bill(_) if bill_len == 0 => {
                if menu_len > 0 {
                    Focus::Menu(0)
                } else {
                    Focus::None
                }
            }
            Focus::Bill(i) => Focus::Bill(i.min(bill_len - 1)),
            Focus::Menu(_) if menu_len == 0 => Focus::None,
            Focus::Menu(i) => Focus::Menu(i.min(menu_len - 1)),
            Focus::None => Focus::None,
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
