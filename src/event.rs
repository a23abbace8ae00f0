use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
    /// A background job has queued its result.
    Wakeup,
}

/// Lets background jobs nudge the UI loop.
#[derive(Debug, Clone)]
pub struct Waker {
    tx: mpsc::UnboundedSender<Event>,
}

impl Waker {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { tx }
    }

    pub fn wake(&self) {
        let _ = self.tx.send(Event::Wakeup);
    }
}

/// Holds only the receiving end: the stream ends once the input task, the tick
/// task and every `Waker` are gone.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReader {
    /// Start the input and tick tasks. The returned `Waker` is the handle for
    /// background jobs.
    pub fn new(tick_rate: Duration) -> (Self, Waker) {
        let (tx, rx) = mpsc::unbounded_channel();

        let event_tx = tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                match reader.next().await {
                    Some(Ok(CrosstermEvent::Key(key))) => {
                        if event_tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => {
                        if event_tx.send(Event::Resize).is_err() {
                            break;
                        }
                    }
                    Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        });

        let waker = Waker::new(tx.clone());

        let tick_tx = tx;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        (Self { rx }, waker)
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking: returns a pending event if one is available, or None.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// Map a key event to an action.
pub fn map_key_to_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Action::Quit),
            KeyCode::Char('f') => Some(Action::ScrollPageDown),
            KeyCode::Char('b') => Some(Action::ScrollPageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Enter => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::ScrollPageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::ScrollPageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::ScrollToTop),
        KeyCode::End | KeyCode::Char('G') => Some(Action::ScrollToBottom),
        KeyCode::Char('n') => Some(Action::NextFile),
        KeyCode::Char('N') | KeyCode::Char('p') => Some(Action::PrevFile),
        KeyCode::Char('+') => Some(Action::IncreaseContext),
        KeyCode::Char('-') => Some(Action::DecreaseContext),
        KeyCode::Char('=') => Some(Action::ResetContext),
        KeyCode::Char('a') => Some(Action::AllContext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(map_key_to_action(ev), Some(Action::Quit)));
    }

    #[test]
    fn test_context_keys() {
        assert!(matches!(
            map_key_to_action(key(KeyCode::Char('+'))),
            Some(Action::IncreaseContext)
        ));
        assert!(matches!(
            map_key_to_action(key(KeyCode::Char('-'))),
            Some(Action::DecreaseContext)
        ));
        assert!(matches!(
            map_key_to_action(key(KeyCode::Char('='))),
            Some(Action::ResetContext)
        ));
        assert!(matches!(
            map_key_to_action(key(KeyCode::Char('a'))),
            Some(Action::AllContext)
        ));
    }

    #[test]
    fn test_unbound_key() {
        assert!(map_key_to_action(key(KeyCode::Char('z'))).is_none());
    }

    #[tokio::test]
    async fn test_reader_ends_when_every_sender_is_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut reader = EventReader { rx };
        let waker = Waker::new(tx);
        waker.wake();
        drop(waker);

        assert!(matches!(reader.next().await, Some(Event::Wakeup)));
        assert!(reader.next().await.is_none());
    }

    #[test]
    fn test_waker_sends_wakeup() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        Waker::new(tx).wake();
        assert!(matches!(rx.try_recv(), Ok(Event::Wakeup)));
    }
}
