//! WebSocket transport using tokio-tungstenite.
//!
//! Read and write halves are locked independently so a pending `recv()`
//! never blocks an outbound send (the session task sends heartbeats while
//! it waits for inbound frames).

use super::{Transport, TransportError};
use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Configuration for [`WsTransport`].
#[derive(Clone, Debug)]
pub struct WsTransportConfig {
    /// Handshake timeout for `connect()`.
    pub connect_timeout: Duration,
}

impl Default for WsTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// WebSocket transport over tokio-tungstenite.
pub struct WsTransport {
    writer: Mutex<Option<SplitSink<WsStream, Message>>>,
    reader: Mutex<Option<SplitStream<WsStream>>>,
    config: WsTransportConfig,
}

impl WsTransport {
    /// Create a transport with default configuration.
    pub fn new() -> Self {
        Self::with_config(WsTransportConfig::default())
    }

    /// Create a transport with custom configuration.
    pub fn with_config(config: WsTransportConfig) -> Self {
        Self {
            writer: Mutex::new(None),
            reader: Mutex::new(None),
            config,
        }
    }
}

impl Default for WsTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn connect(&self, url: &str) -> Result<(), TransportError> {
        // Drop any previous session first.
        self.close().await.ok();

        let (stream, _response) = tokio::time::timeout(self.config.connect_timeout, async {
            connect_async(url)
                .await
                .map_err(|e| TransportError::ConnectionFailed(e.to_string()))
        })
        .await
        .map_err(|_| TransportError::Timeout)??;

        let (write, read) = stream.split();
        *self.writer.lock().await = Some(write);
        *self.reader.lock().await = Some(read);
        Ok(())
    }

    async fn send(&self, frame: &str) -> Result<(), TransportError> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(TransportError::NotConnected)?;
        writer
            .send(Message::Text(frame.to_owned()))
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    async fn recv(&self) -> Result<String, TransportError> {
        let mut guard = self.reader.lock().await;
        let reader = guard.as_mut().ok_or(TransportError::NotConnected)?;

        loop {
            match reader.next().await {
                None => return Err(TransportError::ConnectionClosed),
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(Message::Close(_))) => return Err(TransportError::ConnectionClosed),
                // Control and binary frames are not part of the protocol.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(TransportError::ReceiveFailed(e.to_string())),
            }
        }
    }

    fn is_connected(&self) -> bool {
        // The reader lock is held by a pending recv; the writer lock is
        // only held across individual sends, so probe that one.
        self.writer
            .try_lock()
            .map(|guard| guard.is_some())
            .unwrap_or(true)
    }

    async fn close(&self) -> Result<(), TransportError> {
        let writer = self.writer.lock().await.take();
        let _reader = self.reader.lock().await.take();
        if let Some(mut writer) = writer {
            writer.send(Message::Close(None)).await.ok();
        }
        Ok(())
    }
}
