/// Terminal key events → logical actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Action;

/// `None` for anything the game ignores: releases, repeats, bare
/// modifiers, Alt chords, mouse and resize events.
pub fn decode(event: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    let action = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ if modifiers.contains(KeyModifiers::ALT) => return None,
        KeyCode::Esc => Action::Escape,
        KeyCode::Char('s') | KeyCode::Char('S') => Action::ToggleMute,
        KeyCode::Char('p') | KeyCode::Char('P') => Action::TogglePause,
        KeyCode::Modifier(_) => return None,
        _ => Action::Generic,
    };
    Some(action)
}
