use std::sync::mpsc::{self, Receiver};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum QuizEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize)
pub trait QuizEventSource {
    /// Block until the next event; `None` once the source is closed.
    fn recv(&self) -> Option<QuizEvent>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<QuizEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // windows reports both press and release
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(QuizEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => Some(QuizEvent::Resize),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("terminal event stream ended: {e}");
                    break;
                }
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEventSource for CrosstermEventSource {
    fn recv(&self) -> Option<QuizEvent> {
        self.rx.recv().ok()
    }
}

/// Channel-fed event source for headless tests
pub struct TestEventSource {
    rx: Receiver<QuizEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<QuizEvent>) -> Self {
        Self { rx }
    }
}

impl QuizEventSource for TestEventSource {
    fn recv(&self) -> Option<QuizEvent> {
        self.rx.recv().ok()
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: QuizEventSource> {
    event_source: E,
}

impl<E: QuizEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    pub fn step(&self) -> Option<QuizEvent> {
        self.event_source.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(QuizEvent::Resize).unwrap();
        tx.send(QuizEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
            .unwrap();
        let runner = Runner::new(TestEventSource::new(rx));

        assert!(matches!(runner.step(), Some(QuizEvent::Resize)));
        match runner.step() {
            Some(QuizEvent::Key(key)) => assert_eq!(key.code, KeyCode::Enter),
            other => panic!("expected Enter key, got {other:?}"),
        }
    }

    #[test]
    fn step_returns_none_when_source_closes() {
        let (tx, rx) = mpsc::channel::<QuizEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx));
        assert!(runner.step().is_none());
    }
}
