use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    ForceQuit, // Ctrl+C, quits even while a request is running
    CursorUp,
    CursorDown,
    Submit,
    CycleMode,
    Resize,
}

/// Poll for an event with timeout
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !matches!(event::poll(timeout), Ok(true)) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            map_key(key_event)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Enter) | (_, KeyCode::Char(' ')) => Some(TuiEvent::Submit),
        (_, KeyCode::Char('m')) | (_, KeyCode::Tab) => Some(TuiEvent::CycleMode),
        _ => None,
    }
}
