use super::machine::{Effect, SessionEvent, SessionMachine, SessionState};
use crate::prefs::PreferenceStore;
use crate::transport::{Transport, TransportEvent};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Drives the session machine: feeds it events and executes the returned
/// effect lists against the injected transport and preference store.
///
/// One task owns the controller, so transitions are strictly serialized;
/// a `LoadPreference` effect resolves to a follow-up event that is applied
/// before the next external event is looked at.
pub struct SessionController {
    machine: SessionMachine,
    transport: Arc<dyn Transport>,
    prefs: Arc<dyn PreferenceStore>,
}

impl SessionController {
    pub fn new(
        requested_service_id: Option<String>,
        transport: Arc<dyn Transport>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            machine: SessionMachine::new(requested_service_id),
            transport,
            prefs,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    /// Apply one event and run its effects, plus any follow-up events the
    /// effects produce (preference loads feeding a rejoin).
    pub async fn handle(&mut self, event: SessionEvent) -> Result<()> {
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(event);

        while let Some(next) = queue.pop_front() {
            let effects = self.machine.apply(next);
            for effect in effects {
                match effect {
                    Effect::Join(room) => {
                        info!("Joining room: {}", room);
                        self.transport.join(&room).await?;
                    }
                    Effect::Leave(room) => {
                        info!("Leaving room: {}", room);
                        self.transport.leave(&room).await?;
                    }
                    Effect::Persist {
                        language,
                        language_name,
                        service_code,
                    } => {
                        self.prefs.set_language(&language, &language_name)?;
                        self.prefs.set_service_code(&service_code)?;
                    }
                    Effect::LoadPreference => {
                        match (self.prefs.language(), self.prefs.service_code()) {
                            (Some(language), Some(service_code)) => {
                                let language_name = self
                                    .prefs
                                    .language_name()
                                    .unwrap_or_else(|| language.clone());
                                info!("Attempting to rejoin {}:{}", service_code, language);
                                queue.push_back(SessionEvent::RejoinLoaded {
                                    language,
                                    language_name,
                                    service_code,
                                });
                            }
                            _ => warn!("No persisted preference to rejoin with"),
                        }
                    }
                    Effect::CloseTransport => {
                        self.transport.close().await?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Map an inbound transport event onto the machine
    pub async fn on_transport_event(&mut self, event: TransportEvent) -> Result<()> {
        let session_event = match event {
            TransportEvent::Connecting => SessionEvent::Connecting,
            TransportEvent::Connected { recovered } => SessionEvent::Connected { recovered },
            TransportEvent::Disconnected => SessionEvent::Disconnected,
            TransportEvent::Transcript(text) => SessionEvent::Transcript(text),
            TransportEvent::Translation(text) => SessionEvent::Translation(text),
            TransportEvent::Status { active, .. } => SessionEvent::ServiceStatus { active },
        };
        self.handle(session_event).await
    }

    pub async fn select_language(&mut self, locale: &str, label: &str) -> Result<()> {
        self.handle(SessionEvent::LanguageSelected {
            locale: locale.to_string(),
            label: label.to_string(),
        })
        .await
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.handle(SessionEvent::StopRequested).await
    }

    /// Leave all rooms and close the transport. Called exactly once when
    /// the run ends.
    pub async fn teardown(&mut self) -> Result<()> {
        self.handle(SessionEvent::Teardown).await
    }
}
