//! Async driver for a quiz session.
//!
//! The controller owns the session on a spawned task. Commands come in over
//! an mpsc channel; session events go out over another. After a revealed
//! answer the controller schedules the next question `reveal_delay` later
//! using the advance ticket, so a category change or reset in the meantime
//! silently discards the pending advance.

use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::catalog::{load_catalog, DocumentSource};
use crate::config::DataSettings;
use crate::domain::SessionEvent;

use super::session::{AdvanceTicket, QuizSession};

/// Requests a front end can make of a running quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Answer with an artist name
    Submit(String),
    ChangeCategory(String),
    Reset,
    Shutdown,
}

/// Handle to a running controller task
pub struct ControllerHandle<R> {
    commands: mpsc::Sender<Command>,
    task: tokio::task::JoinHandle<QuizSession<R>>,
}

impl<R> ControllerHandle<R> {
    /// Send a command; fails once the controller has stopped
    pub async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow::anyhow!("Quiz controller has stopped"))
    }

    /// A clonable sender for the command channel
    pub fn sender(&self) -> mpsc::Sender<Command> {
        self.commands.clone()
    }

    /// Stop the controller and get the session back
    pub async fn shutdown(self) -> Result<QuizSession<R>> {
        let _ = self.commands.send(Command::Shutdown).await;
        Ok(self.task.await?)
    }
}

/// Owns a session and applies commands and scheduled advances to it
pub struct QuizController<R> {
    session: QuizSession<R>,
    reveal_delay: Duration,
    commands: mpsc::Receiver<Command>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl<R> QuizController<R>
where
    R: Rng + Send + 'static,
{
    /// Spawn a controller that loads the catalog from `source`, then runs
    /// until shut down or until every command sender is dropped.
    pub fn spawn(
        session: QuizSession<R>,
        source: Box<dyn DocumentSource>,
        data: DataSettings,
    ) -> (mpsc::UnboundedReceiver<SessionEvent>, ControllerHandle<R>) {
        let (command_tx, command_rx) = mpsc::channel::<Command>(32);
        let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();

        let reveal_delay = session.settings().reveal_delay();
        let mut controller = Self {
            session,
            reveal_delay,
            commands: command_rx,
            events: event_tx,
        };

        let task = tokio::spawn(async move {
            if controller.load(source.as_ref(), &data).await {
                controller.run().await
            } else {
                controller.session
            }
        });

        (
            event_rx,
            ControllerHandle {
                commands: command_tx,
                task,
            },
        )
    }

    /// Load the catalog into the session. Returns false if shutdown was
    /// requested before loading finished; the load is dropped then.
    async fn load(&mut self, source: &dyn DocumentSource, data: &DataSettings) -> bool {
        let loading = load_catalog(source, data);
        tokio::pin!(loading);

        loop {
            tokio::select! {
                result = &mut loading => {
                    self.session.catalog_loaded(result);
                    self.publish();
                    return true;
                }
                command = self.commands.recv() => match command {
                    None | Some(Command::Shutdown) => {
                        info!("Loading cancelled");
                        return false;
                    }
                    Some(other) => warn!(?other, "Ignoring command while loading"),
                },
            }
        }
    }

    async fn run(mut self) -> QuizSession<R> {
        let mut pending: Option<AdvanceTicket> = None;
        let sleep = time::sleep(self.reveal_delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                () = &mut sleep, if pending.is_some() => {
                    if let Some(ticket) = pending.take() {
                        self.session.advance(ticket);
                    }
                }
                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    match command {
                        Command::Shutdown => break,
                        Command::Submit(choice) => match self.session.submit_answer(&choice) {
                            Ok(reveal) => {
                                if let Some(ticket) = reveal.advance {
                                    pending = Some(ticket);
                                    sleep.as_mut().reset(Instant::now() + self.reveal_delay);
                                }
                            }
                            Err(e) => debug!(error = %e, "Ignoring answer"),
                        },
                        Command::ChangeCategory(id) => {
                            if let Err(e) = self.session.change_category(&id) {
                                warn!(error = %e, "Cannot change category");
                            }
                        }
                        Command::Reset => {
                            if let Err(e) = self.session.reset() {
                                warn!(error = %e, "Cannot reset");
                            }
                        }
                    }
                }
            }

            self.publish();
        }

        info!(session = %self.session.id(), streak = self.session.streak(), "Quiz stopped");
        self.session
    }

    fn publish(&mut self) {
        for event in self.session.drain_events() {
            if self.events.send(event).is_err() {
                debug!("Event receiver dropped");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, MemorySource};
    use crate::config::QuizSettings;
    use crate::core::Phase;
    use crate::domain::EventKind;
    use async_trait::async_trait;

    struct StalledSource;

    #[async_trait]
    impl DocumentSource for StalledSource {
        fn describe(&self) -> String {
            "stalled".to_string()
        }

        async fn fetch(&self, _name: &str) -> Result<String, CatalogError> {
            std::future::pending().await
        }
    }

    const PAINTINGS: &str = r#"[
        {"artist": "A", "url": "u1"},
        {"artist": "B", "url": "u2"},
        {"artist": "C", "url": "u3"}
    ]"#;

    fn data() -> DataSettings {
        DataSettings {
            location: "memory".to_string(),
            paintings: "paintings.json".to_string(),
            bios: "bios.json".to_string(),
            fetch_timeout_seconds: 5,
        }
    }

    fn start() -> (
        mpsc::UnboundedReceiver<SessionEvent>,
        ControllerHandle<rand::rngs::StdRng>,
    ) {
        let session = QuizSession::seeded(QuizSettings::default(), 3);
        let source = MemorySource::new().with_document("paintings.json", PAINTINGS);
        QuizController::spawn(session, Box::new(source), data())
    }

    async fn next_kind(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> EventKind {
        events.recv().await.unwrap().kind
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_answer_advances_after_delay() {
        let (mut events, handle) = start();
        assert!(matches!(next_kind(&mut events).await, EventKind::QuestionReady { .. }));

        handle.send(Command::Submit("Nobody".to_string())).await.unwrap();
        match next_kind(&mut events).await {
            EventKind::Answered { correct, streak, .. } => {
                assert!(!correct);
                assert_eq!(streak, 0);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        // Paused clock auto-advances to the scheduled advance
        assert!(matches!(next_kind(&mut events).await, EventKind::QuestionReady { .. }));

        let session = handle.shutdown().await.unwrap();
        assert_eq!(session.phase().name(), "awaiting_answer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_category_change_cancels_scheduled_advance() {
        let (mut events, handle) = start();
        next_kind(&mut events).await;

        handle.send(Command::Submit("Nobody".to_string())).await.unwrap();
        next_kind(&mut events).await;

        handle.send(Command::ChangeCategory("all".to_string())).await.unwrap();
        assert!(matches!(next_kind(&mut events).await, EventKind::CategoryChanged { .. }));
        assert!(matches!(next_kind(&mut events).await, EventKind::QuestionReady { .. }));

        time::sleep(Duration::from_secs(10)).await;
        assert!(events.try_recv().is_err());

        let session = handle.shutdown().await.unwrap();
        assert_eq!(session.phase().name(), "awaiting_answer");
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let session = QuizSession::seeded(QuizSettings::default(), 3);
        let (mut events, handle) =
            QuizController::spawn(session, Box::new(MemorySource::new()), data());

        assert!(matches!(next_kind(&mut events).await, EventKind::LoadFailed { .. }));

        let session = handle.shutdown().await.unwrap();
        assert_eq!(session.phase().name(), "load_error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_loading() {
        let session = QuizSession::seeded(QuizSettings::default(), 3);
        let (mut events, handle) =
            QuizController::spawn(session, Box::new(StalledSource), data());

        let session = handle.shutdown().await.unwrap();

        assert_eq!(session.phase(), &Phase::Loading);
        assert!(session.catalog().is_none());
        assert!(events.recv().await.is_none());
    }
}
