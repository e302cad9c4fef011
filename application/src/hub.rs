//! Broadcast hub
//!
//! Per-conference registry of observer connections. Every state change goes
//! through [`BroadcastHub::commit`], which holds the conference's registry
//! lock while it mutates state and delivers the resulting event. A new
//! subscriber takes the same lock before reading its snapshot, so each
//! observer sees the snapshot followed by exactly the events committed
//! after it.
//!
//! Lock order is always registry, then state.
//!
//! A conference's registry lives until the conference ends. The `ended`
//! stage change is the last event anyone receives; afterwards the
//! connections are closed and the registry is dropped.

use crate::ports::observer::{DeliveryError, ObserverConnection};
use crate::store::ConferenceHandle;
use futures::future::join_all;
use roundtable_domain::{Conference, ConferenceEvent, DomainError, Stage};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

type Registry = Vec<Arc<dyn ObserverConnection>>;

#[derive(Default)]
pub struct BroadcastHub {
    registries: RwLock<HashMap<String, Arc<Mutex<Registry>>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    async fn registry(&self, conference_id: &str) -> Arc<Mutex<Registry>> {
        if let Some(registry) = self.registries.read().await.get(conference_id) {
            return Arc::clone(registry);
        }
        let mut registries = self.registries.write().await;
        Arc::clone(
            registries
                .entry(conference_id.to_string())
                .or_default(),
        )
    }

    async fn existing(&self, conference_id: &str) -> Option<Arc<Mutex<Registry>>> {
        self.registries.read().await.get(conference_id).cloned()
    }

    /// Register `connection` after sending it the current snapshot.
    ///
    /// If the snapshot cannot be delivered the connection is not registered.
    pub async fn subscribe(
        &self,
        handle: &ConferenceHandle,
        connection: Arc<dyn ObserverConnection>,
    ) -> Result<(), DeliveryError> {
        let registry = self.registry(handle.id()).await;
        let mut observers = registry.lock().await;

        let snapshot = {
            let state = handle.read().await;
            ConferenceEvent::ConnectionInitialized {
                stage: state.stage(),
                current_round: state.current_round(),
                messages: state.transcript().to_vec(),
            }
        };

        connection.deliver(&snapshot).await?;

        if let ConferenceEvent::ConnectionInitialized {
            stage: Stage::Ended,
            ..
        } = snapshot
        {
            // Nothing further will be broadcast
            let retired = observers.is_empty();
            drop(observers);
            connection.close().await;
            if retired {
                self.forget(handle.id(), &registry).await;
            }
            debug!("Observer joined ended conference {}", handle.id());
            return Ok(());
        }

        observers.push(connection);

        info!(
            "Observer registered for conference {} ({} connected)",
            handle.id(),
            observers.len()
        );
        Ok(())
    }

    /// Remove one connection by id. Returns whether it was registered.
    pub async fn unsubscribe(&self, conference_id: &str, observer_id: &str) -> bool {
        let Some(registry) = self.existing(conference_id).await else {
            return false;
        };
        let mut observers = registry.lock().await;
        let before = observers.len();
        observers.retain(|o| o.id() != observer_id);
        let removed = observers.len() < before;
        if removed {
            debug!("Observer {} left conference {}", observer_id, conference_id);
        }
        removed
    }

    /// Apply `change` to the conference state and broadcast the event it yields.
    ///
    /// Nothing is broadcast if `change` fails.
    pub async fn commit<F>(
        &self,
        handle: &ConferenceHandle,
        change: F,
    ) -> Result<ConferenceEvent, DomainError>
    where
        F: FnOnce(&mut Conference) -> Result<ConferenceEvent, DomainError>,
    {
        let registry = self.registry(handle.id()).await;
        let mut observers = registry.lock().await;

        let event = {
            let mut state = handle.write().await;
            change(&mut state)?
        };

        Self::fan_out(handle.id(), &mut observers, &event).await;

        if event == (ConferenceEvent::StageChanged { stage: Stage::Ended }) {
            let released: Registry = std::mem::take(&mut *observers);
            drop(observers);
            self.forget(handle.id(), &registry).await;
            join_all(released.iter().map(|o| o.close())).await;
            info!(
                "Conference {} ended, released {} observer connection(s)",
                handle.id(),
                released.len()
            );
        }
        Ok(event)
    }

    /// Broadcast an event that does not change conference state.
    ///
    /// Conferences without a registry (never observed, or ended) are skipped.
    pub async fn publish(&self, conference_id: &str, event: &ConferenceEvent) {
        let Some(registry) = self.existing(conference_id).await else {
            debug!(
                "No observers for conference {}, dropping {}",
                conference_id,
                event.kind()
            );
            return;
        };
        let mut observers = registry.lock().await;
        Self::fan_out(conference_id, &mut observers, event).await;
    }

    /// Drop the map entry if it still points at `registry`.
    async fn forget(&self, conference_id: &str, registry: &Arc<Mutex<Registry>>) {
        let mut registries = self.registries.write().await;
        if registries
            .get(conference_id)
            .is_some_and(|current| Arc::ptr_eq(current, registry))
        {
            registries.remove(conference_id);
        }
    }

    #[cfg(test)]
    async fn is_tracked(&self, conference_id: &str) -> bool {
        self.registries.read().await.contains_key(conference_id)
    }

    /// Deliver to every observer concurrently, pruning those that fail.
    async fn fan_out(conference_id: &str, observers: &mut Registry, event: &ConferenceEvent) {
        if observers.is_empty() {
            return;
        }

        let outcomes = join_all(observers.iter().map(|o| o.deliver(event))).await;

        let mut kept = Vec::with_capacity(observers.len());
        for (observer, outcome) in observers.drain(..).zip(outcomes) {
            match outcome {
                Ok(()) => kept.push(observer),
                Err(e) => warn!(
                    "Dropping observer {} of conference {}: {}",
                    observer.id(),
                    conference_id,
                    e
                ),
            }
        }
        *observers = kept;

        debug!(
            "Delivered {} to {} observer(s) of conference {}",
            event.kind(),
            observers.len(),
            conference_id
        );
    }

    pub async fn observer_count(&self, conference_id: &str) -> usize {
        match self.existing(conference_id).await {
            Some(registry) => registry.lock().await.len(),
            None => 0,
        }
    }

    /// Release every connection of a conference.
    pub async fn disconnect_all(&self, conference_id: &str) {
        let Some(registry) = self.registries.write().await.remove(conference_id) else {
            return;
        };

        let observers: Registry = std::mem::take(&mut *registry.lock().await);
        let count = observers.len();
        join_all(observers.iter().map(|o| o.close())).await;

        info!(
            "Closed {} observer connection(s) of conference {}",
            count, conference_id
        );
    }
}
