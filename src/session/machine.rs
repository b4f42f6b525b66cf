use super::rooms::{heartbeat_room, language_code, language_room, transcript_room};

/// Transport-level connection state, independent of room membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Disconnected,
    Connecting,
    Connected,
}

/// Room membership. `Joined` records the *intent* to be in a language room;
/// it is retained across disconnects so the membership can be replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    NotJoined,
    Joined {
        /// Short language code used in the room name
        language: String,
        /// Display label of the chosen language
        language_name: String,
        /// Service the rooms belong to
        service_code: String,
    },
}

/// Everything that can move the session machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Tenant configuration arrived with the server-side default service id
    ConfigLoaded { default_service_id: String },
    /// A transport connection attempt started
    Connecting,
    /// The transport acknowledged the connection
    Connected { recovered: bool },
    /// The transport dropped; it retries on its own
    Disconnected,
    /// Service status observed on the heartbeat room
    ServiceStatus { active: bool },
    /// The user picked a language (locale + display label)
    LanguageSelected { locale: String, label: String },
    /// The persisted preference was read back for a reconnect-driven rejoin
    RejoinLoaded {
        language: String,
        language_name: String,
        service_code: String,
    },
    /// Source-language text received
    Transcript(String),
    /// Translated text received
    Translation(String),
    /// The user stopped the translation
    StopRequested,
    /// Page-lifetime end: leave everything and shut the transport
    Teardown,
}

/// Side effects a transition asks the controller to run, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Join(String),
    Leave(String),
    /// Write the preference keys; emitted only for a user-initiated join
    Persist {
        language: String,
        language_name: String,
        service_code: String,
    },
    /// Read the preference keys back and feed `RejoinLoaded`
    LoadPreference,
    CloseTransport,
}

/// Observable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub connection: Connection,
    /// Server-asserted readiness; joins are only permitted while true
    pub service_ready: bool,
    pub membership: Membership,
    /// Resolved session identity (URL parameter, else tenant default)
    pub service_code: Option<String>,
    /// Set when a non-recovered reconnect must replay a prior membership
    pub rejoin_pending: bool,
    /// Latest transcript text, replaced wholesale per event
    pub transcript: Option<String>,
    /// Latest translation text, replaced wholesale per event
    pub translation: Option<String>,
    default_service_id: Option<String>,
    heartbeat_joined: bool,
}

impl SessionState {
    fn new() -> Self {
        Self {
            connection: Connection::Disconnected,
            service_ready: false,
            membership: Membership::NotJoined,
            service_code: None,
            rejoin_pending: false,
            transcript: None,
            translation: None,
            default_service_id: None,
            heartbeat_joined: false,
        }
    }

    /// Language selection is only offered while this holds
    pub fn can_join(&self) -> bool {
        self.connection == Connection::Connected && self.service_ready
    }

    pub fn is_joined(&self) -> bool {
        matches!(self.membership, Membership::Joined { .. })
    }
}

/// The session membership state machine.
///
/// `apply` is the single transition function: it mutates the state and
/// returns the side effects to execute, but performs no I/O itself, so
/// every transition is testable without a live transport.
pub struct SessionMachine {
    state: SessionState,
    /// Service id requested via the URL/CLI, if any. Consulted exactly once
    /// when the identity is resolved; later changes never re-trigger.
    requested_service_id: Option<String>,
}

impl SessionMachine {
    pub fn new(requested_service_id: Option<String>) -> Self {
        let requested = requested_service_id.filter(|id| !id.is_empty());
        Self {
            state: SessionState::new(),
            requested_service_id: requested,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::ConfigLoaded { default_service_id } => {
                self.state.default_service_id = Some(default_service_id);
                self.resolve_identity()
            }
            SessionEvent::Connecting => {
                self.state.connection = Connection::Connecting;
                Vec::new()
            }
            SessionEvent::Connected { recovered } => {
                self.state.connection = Connection::Connected;
                if !recovered && self.state.is_joined() {
                    // Rooms were lost server-side; replay once ready again
                    self.state.rejoin_pending = true;
                }
                self.resolve_identity()
            }
            SessionEvent::Disconnected => {
                self.state.connection = Connection::Disconnected;
                // Readiness must be re-asserted by the server before any
                // join fires again. Membership intent and content stay.
                self.state.service_ready = false;
                self.state.heartbeat_joined = false;
                Vec::new()
            }
            SessionEvent::ServiceStatus { active } => {
                self.state.service_ready = active;
                if active && self.state.rejoin_pending {
                    vec![Effect::LoadPreference]
                } else {
                    Vec::new()
                }
            }
            SessionEvent::LanguageSelected { locale, label } => {
                self.select_language(&locale, &label)
            }
            SessionEvent::RejoinLoaded {
                language,
                language_name,
                service_code,
            } => self.rejoin(language, language_name, service_code),
            SessionEvent::Transcript(text) => {
                self.state.transcript = Some(text);
                Vec::new()
            }
            SessionEvent::Translation(text) => {
                self.state.translation = Some(text);
                Vec::new()
            }
            SessionEvent::StopRequested => self.stop(),
            SessionEvent::Teardown => self.teardown(),
        }
    }

    /// Fix the session identity the first time connection and configuration
    /// are both available, then join the heartbeat room for this connection.
    fn resolve_identity(&mut self) -> Vec<Effect> {
        if self.state.connection != Connection::Connected {
            return Vec::new();
        }

        if self.state.service_code.is_none() {
            let resolved = self
                .requested_service_id
                .clone()
                .or_else(|| self.state.default_service_id.clone())
                .filter(|code| !code.is_empty());
            self.state.service_code = resolved;
        }

        if let Some(code) = self.state.service_code.clone() {
            if !self.state.heartbeat_joined {
                self.state.heartbeat_joined = true;
                return vec![Effect::Join(heartbeat_room(&code))];
            }
        }

        Vec::new()
    }

    /// User-initiated join. A no-op unless connected and ready; the
    /// language menu is only offered while `can_join` holds, this guard
    /// closes the race with a readiness update.
    fn select_language(&mut self, locale: &str, label: &str) -> Vec<Effect> {
        if !self.state.can_join() {
            return Vec::new();
        }
        let Some(service_code) = self.state.service_code.clone() else {
            return Vec::new();
        };

        let code = language_code(locale);
        let mut effects = Vec::new();

        match &self.state.membership {
            Membership::Joined {
                language,
                service_code: joined_service,
                ..
            } => {
                if *language == code && *joined_service == service_code {
                    return Vec::new();
                }
                // One language room at a time: drop the old one first
                effects.push(Effect::Leave(language_room(joined_service, language)));
                if *joined_service != service_code {
                    effects.push(Effect::Leave(transcript_room(joined_service)));
                }
                effects.push(Effect::Join(language_room(&service_code, &code)));
                if *joined_service != service_code {
                    effects.push(Effect::Join(transcript_room(&service_code)));
                }
            }
            Membership::NotJoined => {
                effects.push(Effect::Join(language_room(&service_code, &code)));
                effects.push(Effect::Join(transcript_room(&service_code)));
            }
        }

        effects.push(Effect::Persist {
            language: code.clone(),
            language_name: label.to_string(),
            service_code: service_code.clone(),
        });

        self.state.membership = Membership::Joined {
            language: code,
            language_name: label.to_string(),
            service_code,
        };
        self.state.rejoin_pending = false;

        effects
    }

    /// Replay of a prior membership after a non-recovered reconnect. Uses
    /// the persisted preference verbatim and does not write it back.
    fn rejoin(
        &mut self,
        language: String,
        language_name: String,
        service_code: String,
    ) -> Vec<Effect> {
        if !self.state.rejoin_pending || !self.state.can_join() {
            return Vec::new();
        }

        self.state.rejoin_pending = false;
        self.state.membership = Membership::Joined {
            language: language.clone(),
            language_name,
            service_code: service_code.clone(),
        };

        vec![
            Effect::Join(language_room(&service_code, &language)),
            Effect::Join(transcript_room(&service_code)),
        ]
    }

    fn stop(&mut self) -> Vec<Effect> {
        let Membership::Joined {
            language,
            service_code,
            ..
        } = self.state.membership.clone()
        else {
            return Vec::new();
        };

        self.state.membership = Membership::NotJoined;
        self.state.rejoin_pending = false;
        self.state.transcript = None;
        self.state.translation = None;

        vec![
            Effect::Leave(language_room(&service_code, &language)),
            Effect::Leave(transcript_room(&service_code)),
        ]
    }

    /// Guaranteed cleanup when the page goes away: leave every room (the
    /// language room before the transcript room), clear content, close.
    fn teardown(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Membership::Joined {
            language,
            service_code,
            ..
        } = &self.state.membership
        {
            effects.push(Effect::Leave(language_room(service_code, language)));
            effects.push(Effect::Leave(transcript_room(service_code)));
        }
        if self.state.heartbeat_joined {
            if let Some(code) = &self.state.service_code {
                effects.push(Effect::Leave(heartbeat_room(code)));
            }
        }

        self.state.membership = Membership::NotJoined;
        self.state.rejoin_pending = false;
        self.state.heartbeat_joined = false;
        self.state.transcript = None;
        self.state.translation = None;

        effects.push(Effect::CloseTransport);
        effects
    }
}
