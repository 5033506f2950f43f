//! # guandan-core
//!
//! Pure synchronization logic for the Guandan table client (no I/O, instant
//! tests).
//!
//! This crate implements the state machines and reducers that keep a local
//! table view consistent with the server's event stream, without any network
//! or timer I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (WebSocket, timers) is performed by `guandan-client`, which
//! interprets the actions and effects produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod connection;
pub mod gate;
pub mod reducer;
pub mod sync;

pub use connection::{
    Action, ConnectionEvent, ConnectionNotice, ConnectionState, ConnectionStatus, ReconnectPolicy,
};
pub use gate::{GateDecision, VersionGate};
pub use reducer::{PlayError, Store, TableView};
pub use sync::{SyncController, SyncEffect};
