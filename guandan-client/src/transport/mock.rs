//! Mock transport for testing.
//!
//! Allows queueing inbound frames, capturing sent frames, scripting
//! connect/send failures, and injecting a server-side close.

use super::{Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock transport for testing.
///
/// Clones share state, so a test can keep a handle for scripting while the
/// client owns another. `recv()` pends until a frame is queued, matching
/// the continuous inbound pump the client runs against a real socket.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
    notify: Arc<Notify>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    connected: bool,
    connected_url: Option<String>,
    connect_calls: u32,
    sent_frames: Vec<String>,
    receive_queue: VecDeque<String>,
    session_closed: bool,
    fail_next_connect: Option<String>,
    fail_all_connects: Option<String>,
    fail_next_send: Option<String>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame to be yielded by a later `recv()` call.
    pub fn queue_response(&self, frame: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        inner.receive_queue.push_back(frame.into());
        drop(inner);
        self.notify.notify_one();
    }

    /// Get all frames that were sent.
    pub fn sent_frames(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.sent_frames.clone()
    }

    /// Get the last frame that was sent.
    pub fn last_sent(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.sent_frames.last().cloned()
    }

    /// The URL of the most recent connect.
    pub fn connected_url(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.connected_url.clone()
    }

    /// Total number of connect attempts, successful or not.
    pub fn connect_calls(&self) -> u32 {
        let inner = self.inner.lock().unwrap();
        inner.connect_calls
    }

    /// Cause the next connect() to fail with the given error.
    pub fn fail_next_connect(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_connect = Some(error.to_string());
    }

    /// Cause every connect() to fail until `allow_connects` is called.
    pub fn fail_connects(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_all_connects = Some(error.to_string());
    }

    /// Let connects succeed again.
    pub fn allow_connects(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_all_connects = None;
    }

    /// Cause the next send() to fail with the given error.
    pub fn fail_next_send(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_send = Some(error.to_string());
    }

    /// Simulate the server closing the session: once the queue drains,
    /// `recv()` reports `ConnectionClosed`.
    pub fn close_session(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.session_closed = true;
        drop(inner);
        self.notify.notify_one();
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            notify: Arc::clone(&self.notify),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self, url: &str) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.connect_calls += 1;

        if let Some(error) = inner.fail_next_connect.take() {
            return Err(TransportError::ConnectionFailed(error));
        }
        if let Some(error) = inner.fail_all_connects.clone() {
            return Err(TransportError::ConnectionFailed(error));
        }

        inner.connected = true;
        inner.session_closed = false;
        inner.connected_url = Some(url.to_string());
        Ok(())
    }

    async fn send(&self, frame: &str) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();

        if !inner.connected {
            return Err(TransportError::NotConnected);
        }
        if let Some(error) = inner.fail_next_send.take() {
            return Err(TransportError::SendFailed(error));
        }

        inner.sent_frames.push(frame.to_string());
        Ok(())
    }

    async fn recv(&self) -> Result<String, TransportError> {
        loop {
            {
                let mut inner = self.inner.lock().unwrap();
                if !inner.connected {
                    return Err(TransportError::NotConnected);
                }
                if let Some(frame) = inner.receive_queue.pop_front() {
                    return Ok(frame);
                }
                if inner.session_closed {
                    return Err(TransportError::ConnectionClosed);
                }
            }
            self.notify.notified().await;
        }
    }

    fn is_connected(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.connected
    }

    async fn close(&self) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.connected = false;
        drop(inner);
        self.notify.notify_one();
        Ok(())
    }
}
