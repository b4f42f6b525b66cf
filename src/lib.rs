pub mod config;
pub mod control;
pub mod prefs;
pub mod session;
pub mod tenant;
pub mod transport;
pub mod view;

pub use config::Config;
pub use control::{ControlClient, OrganisationProfile};
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use session::{
    Connection, Effect, Membership, SessionController, SessionEvent, SessionMachine, SessionState,
};
pub use tenant::{Language, TenantClient, TenantInfo, Welcome};
pub use transport::{SocketTransport, Transport, TransportEvent};
pub use view::TranscriptLog;
