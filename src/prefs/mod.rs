//! Durable participant preferences
//!
//! Remembers the last user-initiated join (language code, display label,
//! service identifier) so a reconnect can replay the membership. Written
//! exactly once per user-initiated join, read back only at rejoin time.

mod file;
mod store;

pub use file::FilePreferences;
pub use store::{MemoryPreferences, PreferenceStore, PreferenceValues};
