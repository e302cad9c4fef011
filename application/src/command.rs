//! Command processor
//!
//! Observer receive loops only enqueue raw payloads here. A single worker
//! parses them and hands valid commands to the orchestrator, which
//! serializes them against automatic progression.

use crate::orchestrator::ConferenceOrchestrator;
use crate::ports::response_generator::ResponseGenerator;
use roundtable_domain::ConferenceCommand;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

struct Envelope {
    conference_id: String,
    raw: String,
}

/// Queue of observer-issued commands
#[derive(Clone)]
pub struct CommandProcessor {
    sender: mpsc::UnboundedSender<Envelope>,
}

impl CommandProcessor {
    /// Start the worker. It stops once every processor clone is dropped.
    pub fn spawn<G: ResponseGenerator + 'static>(
        orchestrator: ConferenceOrchestrator<G>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(orchestrator, receiver));
        (Self { sender }, worker)
    }

    /// Enqueue a raw payload such as `{"type":"next_round"}`.
    ///
    /// Returns false if the worker has stopped.
    pub fn submit(&self, conference_id: impl Into<String>, raw: impl Into<String>) -> bool {
        self.sender
            .send(Envelope {
                conference_id: conference_id.into(),
                raw: raw.into(),
            })
            .is_ok()
    }

    pub fn submit_command(&self, conference_id: impl Into<String>, command: ConferenceCommand) -> bool {
        match serde_json::to_string(&command) {
            Ok(raw) => self.submit(conference_id, raw),
            Err(e) => {
                warn!("Failed to encode command {}: {}", command, e);
                false
            }
        }
    }
}

async fn run_worker<G: ResponseGenerator + 'static>(
    orchestrator: ConferenceOrchestrator<G>,
    mut receiver: mpsc::UnboundedReceiver<Envelope>,
) {
    while let Some(envelope) = receiver.recv().await {
        let command = match ConferenceCommand::parse(&envelope.raw) {
            Ok(command) => command,
            Err(e) => {
                warn!(
                    "Ignoring command for conference {}: {}",
                    envelope.conference_id, e
                );
                continue;
            }
        };
        dispatch(&orchestrator, envelope.conference_id, command).await;
    }
    debug!("Command worker stopped");
}

async fn dispatch<G: ResponseGenerator + 'static>(
    orchestrator: &ConferenceOrchestrator<G>,
    conference_id: String,
    command: ConferenceCommand,
) {
    info!("Conference {}: command {}", conference_id, command);

    match command {
        ConferenceCommand::NextRound => {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                match orchestrator.advance_round(&conference_id).await {
                    Ok(true) => debug!("Conference {}: round advanced", conference_id),
                    Ok(false) => {}
                    Err(e) => warn!("Advance for conference {} failed: {}", conference_id, e),
                }
            });
        }
        ConferenceCommand::EndConference => {
            // Cancel before any later command is dispatched
            match orchestrator.store().handle(&conference_id).await {
                Ok(handle) => handle.cancel(),
                Err(e) => {
                    warn!("Ignoring end command: {}", e);
                    return;
                }
            }

            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                if let Err(e) = orchestrator.end_conference(&conference_id).await {
                    warn!("End for conference {} failed: {}", conference_id, e);
                }
                orchestrator.hub().disconnect_all(&conference_id).await;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OrchestrationSettings, ProgressionMode};
    use crate::hub::BroadcastHub;
    use crate::ports::observer::ChannelObserver;
    use crate::ports::response_generator::{GenerationError, GenerationRequest};
    use crate::store::ConferenceStore;
    use async_trait::async_trait;
    use roundtable_domain::{ConferenceConfig, ConferenceEvent, Participant, Stage};
    use std::sync::Arc;
    use std::time::Duration;

    struct EchoGenerator;

    #[async_trait]
    impl ResponseGenerator for EchoGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
            Ok(format!("{} here", request.speaker.name))
        }
    }

    async fn manual_conference() -> (
        ConferenceOrchestrator<EchoGenerator>,
        String,
        mpsc::Receiver<ConferenceEvent>,
    ) {
        let orchestrator = ConferenceOrchestrator::new(
            Arc::new(ConferenceStore::new()),
            Arc::new(BroadcastHub::new()),
            Arc::new(EchoGenerator),
            OrchestrationSettings::immediate()
                .with_auto_start(false)
                .with_progression(ProgressionMode::Manual),
        );
        let config = ConferenceConfig::new(
            "Q3 roadmap",
            vec![
                Participant::new("gm", "Alex", "General manager"),
                Participant::new("cfo", "Dana", "Financial manager"),
            ],
        )
        .with_rounds(3);
        let id = orchestrator.create(config).await.unwrap();

        let handle = orchestrator.store().handle(&id).await.unwrap();
        let (observer, rx) = ChannelObserver::with_capacity("viewer", 1024, Duration::from_secs(5));
        orchestrator
            .hub()
            .subscribe(&handle, Arc::new(observer))
            .await
            .unwrap();

        orchestrator.run(&id).await.unwrap();
        (orchestrator, id, rx)
    }

    async fn wait_for(rx: &mut mpsc::Receiver<ConferenceEvent>, wanted: &ConferenceEvent) {
        while let Some(event) = rx.recv().await {
            if &event == wanted {
                return;
            }
        }
        panic!("stream ended before {:?}", wanted);
    }

    #[tokio::test]
    async fn test_next_round_command_runs_one_round() {
        let (orchestrator, id, mut rx) = manual_conference().await;
        let (processor, _worker) = CommandProcessor::spawn(orchestrator.clone());

        assert!(processor.submit(&id, r#"{"type":"next_round"}"#));
        wait_for(&mut rx, &ConferenceEvent::RoundCompleted { round: 2 }).await;

        let snapshot = orchestrator.store().get(&id).await.unwrap();
        assert_eq!(snapshot.current_round, 2);
        assert_eq!(snapshot.stage, Stage::Discussion);
    }

    #[tokio::test]
    async fn test_end_command_concludes_and_closes_connections() {
        let (orchestrator, id, mut rx) = manual_conference().await;
        let (processor, _worker) = CommandProcessor::spawn(orchestrator.clone());

        assert!(processor.submit_command(&id, ConferenceCommand::EndConference));
        wait_for(&mut rx, &ConferenceEvent::StageChanged { stage: Stage::Ended }).await;

        // The hub releases the connection after the conclusion
        while rx.recv().await.is_some() {}
        assert_eq!(orchestrator.hub().observer_count(&id).await, 0);

        let snapshot = orchestrator.store().get(&id).await.unwrap();
        assert_eq!(snapshot.stage, Stage::Ended);
        assert_eq!(snapshot.current_round, 1);
    }

    #[tokio::test]
    async fn test_malformed_commands_are_ignored() {
        let (orchestrator, id, mut rx) = manual_conference().await;
        let (processor, _worker) = CommandProcessor::spawn(orchestrator.clone());

        assert!(processor.submit(&id, "not json"));
        assert!(processor.submit(&id, r#"{"type":"pause"}"#));
        assert!(processor.submit("unknown-conference", r#"{"type":"end_conference"}"#));
        // A valid command queued behind the garbage still runs
        assert!(processor.submit(&id, r#"{"type":"next_round"}"#));
        wait_for(&mut rx, &ConferenceEvent::RoundCompleted { round: 2 }).await;

        assert_eq!(orchestrator.store().get(&id).await.unwrap().stage, Stage::Discussion);
    }

    #[tokio::test]
    async fn test_end_after_next_round_wins() {
        let (orchestrator, id, mut rx) = manual_conference().await;
        let (processor, _worker) = CommandProcessor::spawn(orchestrator.clone());

        processor.submit_command(&id, ConferenceCommand::EndConference);
        processor.submit_command(&id, ConferenceCommand::NextRound);
        wait_for(&mut rx, &ConferenceEvent::StageChanged { stage: Stage::Ended }).await;

        // The advance queued after the end never starts a round
        let snapshot = orchestrator.store().get(&id).await.unwrap();
        assert_eq!(snapshot.current_round, 1);
    }
}
