//! Transport abstraction for the table session.
//!
//! This module provides a pluggable transport layer that abstracts the
//! underlying connection mechanism (WebSocket, mock for testing).
//!
//! # Design
//!
//! The transport trait is async and connection-oriented:
//! - `connect()` establishes a session against an endpoint URL
//! - `send()` transmits one JSON text frame
//! - `recv()` yields the next inbound text frame
//! - `close()` gracefully terminates
//!
//! Frames are opaque strings at this layer; the envelope is decoded above.

mod mock;
mod ws;

pub use mock::MockTransport;
pub use ws::{WsTransport, WsTransportConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Not connected.
    #[error("not connected")]
    NotConnected,

    /// Connection closed.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// Connection timeout.
    #[error("connection timeout")]
    Timeout,
}

/// Transport trait for exchanging protocol frames with the server.
///
/// Implementations handle the underlying connection mechanism
/// (WebSocket, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a session against the given endpoint URL.
    async fn connect(&self, url: &str) -> Result<(), TransportError>;

    /// Send one text frame over the session.
    async fn send(&self, frame: &str) -> Result<(), TransportError>;

    /// Receive the next text frame.
    ///
    /// Pends until a frame is available; returns `ConnectionClosed` when
    /// the peer ends the session.
    async fn recv(&self) -> Result<String, TransportError>;

    /// Check if a session is currently open.
    fn is_connected(&self) -> bool;

    /// Close the session gracefully.
    async fn close(&self) -> Result<(), TransportError>;
}
