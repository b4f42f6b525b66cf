//! Session membership controller
//!
//! This module owns "am I connected, is the service ready, which room am I
//! in" for a participant:
//! - `machine` is a pure state machine: every transition is a function of
//!   the current state and one event, returning the side effects to run
//!   (rooms to join/leave, preference writes). No I/O happens inside it.
//! - `controller` executes those effects against an injected transport and
//!   preference store.
//! - `rooms` derives the room names shared with the server.

mod controller;
mod machine;
mod rooms;

pub use controller::SessionController;
pub use machine::{Connection, Effect, Membership, SessionEvent, SessionMachine, SessionState};
pub use rooms::{heartbeat_room, language_code, language_room, transcript_room};
