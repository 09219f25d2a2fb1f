//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use kanban_protocol::Message;

/// Polls for a terminal event, waiting at most `timeout`.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event. A zero timeout
/// never blocks, which keeps the async runtime free to drive requests.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts a terminal event to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_to_message(*key),
        _ => None,
    }
}

/// A key binding as listed in the help overlay.
#[derive(Debug)]
pub struct KeyBinding {
    /// Key label shown to the user.
    pub label: &'static str,
    /// Key that triggers the binding.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
    /// What the binding does.
    pub description: &'static str,
    /// Message the key produces.
    pub message: Message,
}

const fn bind(
    label: &'static str,
    code: KeyCode,
    modifiers: KeyModifiers,
    description: &'static str,
    message: Message,
) -> KeyBinding {
    KeyBinding {
        label,
        code,
        modifiers,
        description,
        message,
    }
}

/// Every key [`key_to_message`] understands, in help order.
///
/// `Space` also selects but is left out of the list.
pub const KEY_BINDINGS: &[KeyBinding] = &[
    bind("←", KeyCode::Left, KeyModifiers::NONE, "Previous column", Message::NavigateLeft),
    bind("→", KeyCode::Right, KeyModifiers::NONE, "Next column", Message::NavigateRight),
    bind("↑", KeyCode::Up, KeyModifiers::NONE, "Previous item", Message::NavigateUp),
    bind("↓", KeyCode::Down, KeyModifiers::NONE, "Next item", Message::NavigateDown),
    bind("Enter", KeyCode::Enter, KeyModifiers::NONE, "Open board", Message::Select),
    bind("Backspace", KeyCode::Backspace, KeyModifiers::NONE, "Back", Message::Back),
    bind("Esc", KeyCode::Esc, KeyModifiers::NONE, "Close help / back", Message::Escape),
    bind("r", KeyCode::Char('r'), KeyModifiers::NONE, "Refresh", Message::Refresh),
    bind("Ctrl+C", KeyCode::Char('c'), KeyModifiers::CONTROL, "Quit", Message::Quit),
    bind("?", KeyCode::Char('?'), KeyModifiers::NONE, "Toggle help", Message::ToggleHelp),
];

/// Converts a terminal key event to an application message.
///
/// Returns `Some(Message)` if the key event maps to an action,
/// or `None` if the key is not bound. See [`KEY_BINDINGS`].
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        // Navigation (arrow keys only)
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),
        KeyCode::Backspace => Some(Message::Back),

        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_key_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: event::KeyEventState::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            key_to_message(make_key_with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            )),
            Some(Message::Quit)
        );
        assert_eq!(key_to_message(make_key(KeyCode::Char('q'))), None);
        assert_eq!(key_to_message(make_key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn escape_key() {
        assert_eq!(
            key_to_message(make_key(KeyCode::Esc)),
            Some(Message::Escape)
        );
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(
            key_to_message(make_key(KeyCode::Left)),
            Some(Message::NavigateLeft)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Right)),
            Some(Message::NavigateRight)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Up)),
            Some(Message::NavigateUp)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Down)),
            Some(Message::NavigateDown)
        );
    }

    #[test]
    fn selection_keys() {
        assert_eq!(
            key_to_message(make_key(KeyCode::Enter)),
            Some(Message::Select)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Char(' '))),
            Some(Message::Select)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Backspace)),
            Some(Message::Back)
        );
    }

    #[test]
    fn other_action_keys() {
        assert_eq!(
            key_to_message(make_key(KeyCode::Char('r'))),
            Some(Message::Refresh)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Char('?'))),
            Some(Message::ToggleHelp)
        );
    }

    #[test]
    fn listed_bindings_produce_their_message() {
        for binding in KEY_BINDINGS {
            let key = make_key_with_modifiers(binding.code, binding.modifiers);
            assert_eq!(
                key_to_message(key).as_ref(),
                Some(&binding.message),
                "{}",
                binding.label
            );
        }
    }

    #[test]
    fn unmapped_keys_return_none() {
        assert_eq!(key_to_message(make_key(KeyCode::Char('x'))), None);
        assert_eq!(key_to_message(make_key(KeyCode::F(1))), None);
    }

    #[test]
    fn event_to_message_handles_key_presses() {
        let key_event = Event::Key(make_key(KeyCode::Enter));
        assert_eq!(event_to_message(&key_event), Some(Message::Select));
    }

    #[test]
    fn event_to_message_ignores_key_releases() {
        let mut key = make_key(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(event_to_message(&Event::Key(key)), None);
    }

    #[test]
    fn event_to_message_ignores_resize_events() {
        let resize_event = Event::Resize(80, 24);
        assert_eq!(event_to_message(&resize_event), None);
    }
}
