use crossterm::event::{KeyEvent, MouseButton, MouseEventKind};
use revealkit_core::hold_scroll::{PressKind, PRIMARY_BUTTON};

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleFade,
    ToggleSlide,
    ToggleScale,
    ToggleAll,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap) -> Action {
    keymap
        .get(&KeyBinding::new(key.code, key.modifiers))
        .copied()
        .unwrap_or(Action::None)
}

/// Mouse event mapped onto the hold-scroll input contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press(PressKind),
    /// Right button: the terminal's stand-in for a context menu
    ContextMenu,
    Release,
    /// Motion with or without a held button; may leave a trigger
    Move,
}

/// Translate a crossterm mouse event kind
pub fn translate_mouse(kind: MouseEventKind) -> Option<PointerAction> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerAction::Press(PressKind::Pointer {
            button: PRIMARY_BUTTON,
        })),
        MouseEventKind::Down(MouseButton::Middle) => {
            Some(PointerAction::Press(PressKind::Pointer { button: 1 }))
        }
        MouseEventKind::Down(MouseButton::Right) => Some(PointerAction::ContextMenu),
        MouseEventKind::Up(_) => Some(PointerAction::Release),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(PointerAction::Move),
        _ => None,
    }
}
