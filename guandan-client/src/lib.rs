//! # guandan-client
//!
//! Realtime client synchronization engine for the Guandan table.
//!
//! This is the I/O shell around `guandan-core`: it owns the transport
//! session, answers liveness probes, gates and reduces the inbound event
//! stream, and publishes the resulting table view to subscribers.
//!
//! ## Features
//!
//! - **Transport Abstraction**: Pluggable transport layer (WebSocket, mock)
//! - **Pure Core**: All protocol decisions live in `guandan-core`, driven
//!   here by a single session task
//! - **Self-Healing**: Version gaps and dead connections resolve through
//!   bounded reconnection and fresh snapshots, without user intervention
//!
//! ## Example
//!
//! ```ignore
//! use guandan_client::{ClientConfig, GameClient, WsTransport};
//! use guandan_types::Seat;
//!
//! let config = ClientConfig::new("ws://host/api/room/r1/ws?seat=0", Seat::East);
//! let client = GameClient::new(config, WsTransport::new());
//! client.connect().await?;
//!
//! let mut states = client.subscribe();
//! while states.changed().await.is_ok() {
//!     let view = states.borrow_and_update().clone();
//!     println!("version {}", view.state.version);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod transport;

pub use client::{ClientError, GameClient};
pub use config::{room_url, ClientConfig};
pub use transport::{MockTransport, Transport, TransportError, WsTransport, WsTransportConfig};
