use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn arrow_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn enter_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
}

pub fn backspace_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)
}

pub fn escape_key() -> KeyEvent {
    KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
}

/// Canonical form used for binding lookups.
///
/// Terminals report `G` as `Char('G')` with SHIFT set and may attach
/// release/repeat kinds or lock-state bits; none of that takes part in
/// matching.
pub fn normalize(event: KeyEvent) -> KeyEvent {
    let mut modifiers = event.modifiers;
    if matches!(event.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(event.code, modifiers)
}

/// True for events the controller should act on.
pub fn is_press(event: &KeyEvent) -> bool {
    event.kind != KeyEventKind::Release
}

/// True for Ctrl+C in any form.
pub fn is_interrupt(event: &KeyEvent) -> bool {
    normalize(*event) == ctrl('c')
}

/// Printable character typed without Ctrl/Alt.
pub fn typed_char(event: &KeyEvent) -> Option<char> {
    match event.code {
        KeyCode::Char(c)
            if !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_shift_on_chars_only() {
        let shifted = KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT);
        assert_eq!(normalize(shifted), key('Y'));

        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(normalize(back_tab).modifiers, KeyModifiers::SHIFT);
    }

    #[test]
    fn test_typed_char_rejects_ctrl() {
        assert_eq!(typed_char(&key('a')), Some('a'));
        assert_eq!(typed_char(&ctrl('u')), None);
        assert!(is_interrupt(&ctrl('c')));
    }
}
