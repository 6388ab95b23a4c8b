use crossterm::event::{Event, KeyCode, KeyEventKind};

/// The [`KeyCode`] of a key press, ignoring releases, repeats and non-key events
pub(super) fn pressed_key(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key.code),
        _ => None,
    }
}
