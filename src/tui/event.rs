//! Events consumed by the interaction loop.
//!
//! Terminal input, resizes and probe completions all arrive through one
//! unbounded channel and are handled one at a time by a single consumer.

use crate::probe::ProbeCompletion;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long the input reader blocks before checking whether the loop is gone.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Key presses after translation from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Printable character
    Input(char),
    Backspace,
    Up,
    Down,
    /// Tab
    NextField,
    /// Shift+Tab
    PrevField,
    /// Enter
    Submit,
    /// Esc
    Back,
    /// Ctrl+C
    Quit,
}

/// Everything the interaction loop reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A key press
    Input(Action),
    /// New terminal dimensions (columns, rows)
    Resize(u16, u16),
    /// A launched request finished
    ProbeCompleted(ProbeCompletion),
    /// The terminal input stream failed; the loop cannot continue
    InputClosed(String),
}

impl From<ProbeCompletion> for AppEvent {
    fn from(completion: ProbeCompletion) -> Self {
        Self::ProbeCompleted(completion)
    }
}

impl From<Action> for AppEvent {
    fn from(action: Action) -> Self {
        Self::Input(action)
    }
}

/// Translate a terminal key event.
///
/// Key releases and unbound keys yield `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        (m, KeyCode::Char(_)) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        (_, KeyCode::Char(c)) => Some(Action::Input(c)),
        (_, KeyCode::Backspace) => Some(Action::Backspace),
        (_, KeyCode::Up) => Some(Action::Up),
        (_, KeyCode::Down) => Some(Action::Down),
        (_, KeyCode::Tab) => Some(Action::NextField),
        (_, KeyCode::BackTab) => Some(Action::PrevField),
        (_, KeyCode::Enter) => Some(Action::Submit),
        (_, KeyCode::Esc) => Some(Action::Back),
        _ => None,
    }
}

/// Forward terminal input into `events` from a blocking task.
///
/// The reader stops once the receiving side of `events` is dropped. A
/// terminal read error is reported as [`AppEvent::InputClosed`].
pub fn spawn_input_reader(events: mpsc::UnboundedSender<AppEvent>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !events.is_closed() {
            let ready = match event::poll(INPUT_POLL_INTERVAL) {
                Ok(ready) => ready,
                Err(e) => {
                    let _ = events.send(AppEvent::InputClosed(e.to_string()));
                    break;
                }
            };
            if !ready {
                continue;
            }

            let forwarded = match event::read() {
                Ok(Event::Key(key)) => map_key(key).map(AppEvent::Input),
                Ok(Event::Resize(cols, rows)) => Some(AppEvent::Resize(cols, rows)),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Terminal read failed: {e}");
                    Some(AppEvent::InputClosed(e.to_string()))
                }
            };

            match forwarded {
                Some(event @ AppEvent::InputClosed(_)) => {
                    let _ = events.send(event);
                    break;
                }
                Some(event) => {
                    if events.send(event).is_err() {
                        break;
                    }
                }
                None => {}
            }
        }
        tracing::debug!("Input reader stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_map_navigation_keys() {
        assert_eq!(map_key(key(KeyCode::Tab, KeyModifiers::NONE)), Some(Action::NextField));
        assert_eq!(
            map_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::PrevField)
        );
        assert_eq!(map_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::Submit));
        assert_eq!(map_key(key(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Back));
        assert_eq!(map_key(key(KeyCode::Up, KeyModifiers::NONE)), Some(Action::Up));
    }

    #[test]
    fn test_map_characters() {
        assert_eq!(
            map_key(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Input('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Action::Input('A'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_ignore_key_release() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
