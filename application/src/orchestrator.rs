//! Conference orchestrator
//!
//! Drives a conference through waiting → introduction → discussion →
//! conclusion → ended. Each introduction, round and conclusion runs under
//! the conference's sequence lock, so automatic progression and observer
//! commands never interleave their turns.

use crate::config::{OrchestrationSettings, ProgressionMode};
use crate::error::ConferenceError;
use crate::hub::BroadcastHub;
use crate::ports::observer::ObserverConnection;
use crate::ports::response_generator::{
    GenerationError, GenerationRequest, ResponseGenerator, UtteranceKind,
};
use crate::store::{ConferenceHandle, ConferenceStore};
use roundtable_domain::{
    Conference, ConferenceConfig, ConferenceEvent, DomainError, MODERATOR_ID, Participant,
    PromptTemplate, Stage, TurnScheduler,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Runs conferences against a [`ResponseGenerator`]
pub struct ConferenceOrchestrator<G: ResponseGenerator + 'static> {
    store: Arc<ConferenceStore>,
    hub: Arc<BroadcastHub>,
    generator: Arc<G>,
    settings: OrchestrationSettings,
}

impl<G: ResponseGenerator + 'static> Clone for ConferenceOrchestrator<G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hub: Arc::clone(&self.hub),
            generator: Arc::clone(&self.generator),
            settings: self.settings.clone(),
        }
    }
}

impl<G: ResponseGenerator + 'static> ConferenceOrchestrator<G> {
    pub fn new(
        store: Arc<ConferenceStore>,
        hub: Arc<BroadcastHub>,
        generator: Arc<G>,
        settings: OrchestrationSettings,
    ) -> Self {
        Self {
            store,
            hub,
            generator,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<ConferenceStore> {
        &self.store
    }

    pub fn hub(&self) -> &Arc<BroadcastHub> {
        &self.hub
    }

    pub fn settings(&self) -> &OrchestrationSettings {
        &self.settings
    }

    // ==================== Lifecycle ====================

    /// Create a conference; starts it in the background when `auto_start` is set.
    pub async fn create(&self, config: ConferenceConfig) -> Result<String, ConferenceError> {
        let handle = self.store.create(config).await?;
        if self.settings.auto_start {
            self.start_handle(&handle);
        }
        Ok(handle.id().to_string())
    }

    /// Register an observer. The first observer of a waiting conference starts it.
    ///
    /// Returns `false` when the snapshot could not be delivered; the
    /// connection is then not registered.
    pub async fn subscribe(
        &self,
        conference_id: &str,
        connection: Arc<dyn ObserverConnection>,
    ) -> Result<bool, ConferenceError> {
        let handle = self.store.handle(conference_id).await?;
        let observer_id = connection.id().to_string();

        if let Err(e) = self.hub.subscribe(&handle, connection).await {
            warn!(
                "Observer {} could not join conference {}: {}",
                observer_id, conference_id, e
            );
            return Ok(false);
        }

        if handle.stage().await == Stage::Waiting {
            self.start_handle(&handle);
        }
        Ok(true)
    }

    /// Start the background driver unless the conference already started.
    pub async fn ensure_started(&self, conference_id: &str) -> Result<bool, ConferenceError> {
        let handle = self.store.handle(conference_id).await?;
        Ok(self.start_handle(&handle))
    }

    fn start_handle(&self, handle: &Arc<ConferenceHandle>) -> bool {
        if !handle.try_mark_started() {
            return false;
        }
        let this = self.clone();
        let handle = Arc::clone(handle);
        tokio::spawn(async move {
            this.drive(&handle).await;
        });
        true
    }

    /// Run a conference in the calling task.
    ///
    /// Does nothing if the conference was already started elsewhere.
    pub async fn run(&self, conference_id: &str) -> Result<(), ConferenceError> {
        let handle = self.store.handle(conference_id).await?;
        if !handle.try_mark_started() {
            debug!("Conference {} already started", conference_id);
            return Ok(());
        }
        self.run_sequence(&handle).await
    }

    async fn drive(&self, handle: &ConferenceHandle) {
        if let Err(e) = self.run_sequence(handle).await {
            self.report_fault(handle, &e).await;
        }
    }

    async fn report_fault(&self, handle: &ConferenceHandle, err: &ConferenceError) {
        let stage = handle.stage().await;
        error!(
            conference_id = handle.id(),
            stage = %stage,
            "Conference orchestration failed: {}",
            err
        );
        self.hub
            .publish(
                handle.id(),
                &ConferenceEvent::Error {
                    message: err.to_string(),
                },
            )
            .await;
    }

    async fn run_sequence(&self, handle: &ConferenceHandle) -> Result<(), ConferenceError> {
        self.introduce(handle).await?;

        match self.settings.progression {
            ProgressionMode::Automatic => {
                while self.run_next_round(handle).await? {}
                self.conclude(handle).await
            }
            ProgressionMode::Manual => {
                self.run_next_round(handle).await?;
                if handle.is_cancelled() || self.rounds_exhausted(handle).await {
                    self.conclude(handle).await?;
                }
                Ok(())
            }
        }
    }

    // ==================== Commands ====================

    /// Run exactly one more round. The conference concludes as soon as its
    /// final round has run, or when advanced with no rounds left.
    ///
    /// Returns whether a round ran.
    pub async fn advance_round(&self, conference_id: &str) -> Result<bool, ConferenceError> {
        let handle = self.store.handle(conference_id).await?;

        if self.run_next_round(&handle).await? {
            if self.rounds_exhausted(&handle).await {
                info!(
                    "Conference {}: final round done, moving to conclusion",
                    conference_id
                );
                self.conclude(&handle).await?;
            }
            return Ok(true);
        }

        let stage = handle.stage().await;
        if self.rounds_exhausted(&handle).await {
            info!(
                "Conference {}: no rounds left, moving to conclusion",
                conference_id
            );
            self.conclude(&handle).await?;
        } else {
            debug!(
                "Conference {}: advance ignored in stage {}",
                conference_id, stage
            );
        }
        Ok(false)
    }

    /// Stop further rounds and conclude.
    ///
    /// A turn already generating finishes first. A conference that never
    /// started runs its introduction stage before concluding.
    pub async fn end_conference(&self, conference_id: &str) -> Result<(), ConferenceError> {
        let handle = self.store.handle(conference_id).await?;
        info!("Conference {}: end requested", conference_id);
        handle.cancel();

        if handle.try_mark_started() {
            self.introduce(&handle).await?;
        }
        self.conclude(&handle).await
    }

    // ==================== Stages ====================

    async fn introduce(&self, handle: &ConferenceHandle) -> Result<(), ConferenceError> {
        let _sequence = handle.lock_sequence().await;
        if handle.stage().await != Stage::Waiting {
            return Ok(());
        }

        self.transition(handle, Stage::Introduction).await?;

        let (moderator, topic, speakers, language) = {
            let state = handle.read().await;
            (
                state.moderator(),
                state.topic().to_string(),
                state.speakers().cloned().collect::<Vec<_>>(),
                state.language().to_string(),
            )
        };

        self.append(handle, MODERATOR_ID, PromptTemplate::welcome(&moderator, &topic))
            .await?;
        let pacing = &self.settings.pacing;
        self.pause(handle, pacing.after_message + pacing.after_welcome)
            .await;

        for speaker in &speakers {
            if handle.is_cancelled() {
                info!(
                    "Conference {}: introductions interrupted by end request",
                    handle.id()
                );
                return Ok(());
            }

            let prompt = {
                let state = handle.read().await;
                PromptTemplate::introduction(&state, speaker)
            };
            let request = GenerationRequest::new(
                UtteranceKind::Introduction,
                speaker,
                PromptTemplate::speaker_system(speaker, &language),
                prompt,
            );
            let text = self.generate(handle.id(), &request).await;
            self.append(handle, &speaker.id, text).await?;
            self.pause(handle, pacing.after_message + pacing.after_introduction)
                .await;
        }

        if handle.is_cancelled() {
            return Ok(());
        }
        self.transition(handle, Stage::Discussion).await
    }

    /// Run the next round if one is due. Returns whether a round ran.
    async fn run_next_round(&self, handle: &ConferenceHandle) -> Result<bool, ConferenceError> {
        let _sequence = handle.lock_sequence().await;
        if handle.is_cancelled() {
            return Ok(false);
        }

        let Some(round) = handle.read().await.next_round() else {
            return Ok(false);
        };

        self.run_round(handle, round).await?;
        Ok(true)
    }

    /// True while discussing with every round already run and no end requested.
    async fn rounds_exhausted(&self, handle: &ConferenceHandle) -> bool {
        if handle.is_cancelled() {
            return false;
        }
        let state = handle.read().await;
        state.stage() == Stage::Discussion && state.next_round().is_none()
    }

    /// One discussion round. Caller holds the sequence lock.
    async fn run_round(&self, handle: &ConferenceHandle, round: u32) -> Result<(), ConferenceError> {
        self.apply(handle, |c| {
            c.begin_round(round)?;
            Ok(ConferenceEvent::RoundStarted { round })
        })
        .await?;

        let (plan, language) = {
            let state = handle.read().await;
            (
                TurnScheduler::plan_round(&state, round),
                state.language().to_string(),
            )
        };
        info!(
            "Conference {}: round {} chaired by {} ({})",
            handle.id(),
            round,
            plan.chair.name,
            plan.round_topic
        );

        for turn in &plan.turns {
            if handle.is_cancelled() {
                info!(
                    "Conference {}: round {} interrupted by end request",
                    handle.id(),
                    round
                );
                return Ok(());
            }

            let prompt = {
                let state = handle.read().await;
                let context = turn.context.render(state.transcript());
                if turn.is_opening() {
                    PromptTemplate::chair_opening(
                        &state,
                        &turn.speaker,
                        round,
                        &plan.round_topic,
                        &context,
                    )
                } else {
                    PromptTemplate::discussion(&state, &turn.speaker, &plan.round_topic, &context)
                }
            };
            debug!(
                "Conference {}: {} speaking ({:?} context)",
                handle.id(),
                turn.speaker.id,
                turn.context
            );

            let request = GenerationRequest::new(
                UtteranceKind::Remark,
                &turn.speaker,
                PromptTemplate::speaker_system(&turn.speaker, &language),
                prompt,
            );
            let text = self.generate(handle.id(), &request).await;
            self.append_as(handle, &turn.speaker, text).await?;

            let pacing = &self.settings.pacing;
            let delay = pacing.after_message
                + if turn.is_opening() {
                    pacing.after_chair
                } else {
                    pacing.after_participant
                };
            self.pause(handle, delay).await;
        }

        self.hub
            .publish(handle.id(), &ConferenceEvent::RoundCompleted { round })
            .await;
        info!("Conference {}: round {} completed", handle.id(), round);
        Ok(())
    }

    /// Handoff, summary and closing remarks. Runs at most once.
    async fn conclude(&self, handle: &ConferenceHandle) -> Result<(), ConferenceError> {
        let _sequence = handle.lock_sequence().await;
        match handle.stage().await {
            Stage::Introduction | Stage::Discussion => {}
            // Not yet introduced; the driver that owns the start concludes later
            Stage::Waiting => return Ok(()),
            Stage::Conclusion | Stage::Ended => return Ok(()),
        }

        self.transition(handle, Stage::Conclusion).await?;

        let (chair, moderator) = {
            let state = handle.read().await;
            (TurnScheduler::closing_chair(&state), state.moderator())
        };
        let pacing = &self.settings.pacing;

        match &chair {
            Some(chair) => {
                self.append_as(handle, chair, PromptTemplate::chair_handoff(&moderator))
                    .await?
            }
            None => {
                self.append_as(handle, &moderator, PromptTemplate::moderator_handoff())
                    .await?
            }
        }
        Self::sleep(pacing.after_message + pacing.after_handoff).await;

        let summary = self.summarize(handle, &moderator).await;
        self.append_as(handle, &moderator, summary).await?;
        Self::sleep(pacing.after_message + pacing.after_summary).await;

        match &chair {
            Some(chair) => {
                self.append_as(handle, chair, PromptTemplate::chair_closing(&moderator))
                    .await?
            }
            None => {
                self.append_as(handle, &moderator, PromptTemplate::moderator_closing())
                    .await?
            }
        }
        Self::sleep(pacing.after_message).await;

        self.transition(handle, Stage::Ended).await?;
        info!("Conference {} completed", handle.id());
        Ok(())
    }

    async fn summarize(&self, handle: &ConferenceHandle, moderator: &Participant) -> String {
        let (prompt, topic) = {
            let state = handle.read().await;
            let context = TurnScheduler::summary_context(state.transcript());
            (
                PromptTemplate::summary(&state, moderator, &context),
                state.topic().to_string(),
            )
        };

        let request = GenerationRequest::new(
            UtteranceKind::Summary,
            moderator,
            PromptTemplate::summary_system(moderator),
            prompt,
        )
        .with_temperature(self.settings.summary_temperature);

        match self.generator.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Conference {}: summary generation failed, using fallback: {}",
                    handle.id(),
                    e
                );
                PromptTemplate::summary_fallback(&topic)
            }
        }
    }

    // ==================== Helpers ====================

    /// Generate an utterance, degrading to a fallback on failure.
    async fn generate(&self, conference_id: &str, request: &GenerationRequest) -> String {
        match self.generator.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Conference {}: generation for {} failed, using fallback: {}",
                    conference_id, request.speaker.id, e
                );
                Self::fallback(&request.speaker, &e)
            }
        }
    }

    fn fallback(speaker: &Participant, err: &GenerationError) -> String {
        PromptTemplate::fallback_utterance(&speaker.id, &err.to_string())
    }

    async fn transition(&self, handle: &ConferenceHandle, stage: Stage) -> Result<(), ConferenceError> {
        self.apply(handle, |c| {
            c.transition_to(stage)?;
            Ok(ConferenceEvent::StageChanged { stage })
        })
        .await?;
        info!("Conference {} stage changed to {}", handle.id(), stage);
        Ok(())
    }

    async fn append(
        &self,
        handle: &ConferenceHandle,
        speaker_id: &str,
        text: String,
    ) -> Result<(), ConferenceError> {
        self.apply(handle, |c| {
            let message = c.append_message(speaker_id, text)?;
            Ok(ConferenceEvent::message_appended(message.clone()))
        })
        .await
    }

    async fn append_as(
        &self,
        handle: &ConferenceHandle,
        speaker: &Participant,
        text: String,
    ) -> Result<(), ConferenceError> {
        self.append(handle, &speaker.id, text).await
    }

    /// Commit a state change through the hub, mapping rejections to internal faults.
    async fn apply<F>(&self, handle: &ConferenceHandle, change: F) -> Result<(), ConferenceError>
    where
        F: FnOnce(&mut Conference) -> Result<ConferenceEvent, DomainError> + Send,
    {
        match self.hub.commit(handle, change).await {
            Ok(_) => Ok(()),
            Err(e) => Err(ConferenceError::internal(
                handle.id(),
                handle.stage().await,
                e,
            )),
        }
    }

    /// Pacing delay that an end request cuts short.
    async fn pause(&self, handle: &ConferenceHandle, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = handle.cancel_token().cancelled() => {}
        }
    }

    async fn sleep(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
