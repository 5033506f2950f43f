//! Connection lifecycle state machine.
//!
//! This module provides a pure, side-effect-free state machine for managing
//! the transport session lifecycle. The state machine takes events as input
//! and produces a new state plus a list of actions to execute.
//!
//! The actual I/O (connecting, timers, heartbeats) is performed by
//! guandan-client, not by this module. This enables instant unit testing
//! without network mocks or a real clock.

use std::time::Duration;

/// Reconnection policy: a bounded number of attempts with a fixed
/// inter-attempt delay. Deliberately not exponential - the server is close
/// and a desynced client should heal fast or give up visibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// How many scheduled reconnect attempts to make before giving up.
    pub max_attempts: u32,
    /// Fixed delay before each scheduled attempt.
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(3),
        }
    }
}

/// Connection state machine - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No session; only an explicit connect request leaves this state.
    Disconnected,
    /// Explicit connect in progress.
    Connecting,
    /// Session established; heartbeat running.
    Connected,
    /// Session lost; a reconnect attempt is scheduled or in flight.
    Reconnecting {
        /// Which scheduled attempt this is (1-based).
        attempt: u32,
    },
    /// Reconnect attempts exhausted; terminal until an explicit connect.
    Failed,
}

impl ConnectionState {
    /// Create a new state machine in the Disconnected state.
    pub fn new() -> Self {
        Self::Disconnected
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller
    /// (guandan-client) is responsible for executing the returned actions.
    pub fn on_event(self, event: ConnectionEvent, policy: &ReconnectPolicy) -> (Self, Vec<Action>) {
        match (self, event) {
            // From Disconnected / Failed: only an explicit connect moves us
            (Self::Disconnected | Self::Failed, ConnectionEvent::ConnectRequested) => {
                (Self::Connecting, vec![Action::Connect])
            }

            // From Connecting (the explicit attempt)
            (Self::Connecting, ConnectionEvent::ConnectSucceeded) => (
                Self::Connected,
                vec![
                    Action::StartHeartbeat,
                    Action::Notify(ConnectionNotice::Connected),
                ],
            ),
            (Self::Connecting, ConnectionEvent::ConnectFailed { error }) => {
                schedule_reconnect(1, error, policy)
            }
            (Self::Connecting, ConnectionEvent::DisconnectRequested) => {
                (Self::Disconnected, vec![Action::Disconnect])
            }

            // From Connected
            (Self::Connected, ConnectionEvent::ConnectionLost { reason }) => {
                let (next, mut actions) = schedule_reconnect(1, reason.clone(), policy);
                actions.insert(0, Action::StopHeartbeat);
                actions.insert(1, Action::Notify(ConnectionNotice::Disconnected { reason }));
                (next, actions)
            }
            (Self::Connected, ConnectionEvent::DisconnectRequested) => (
                Self::Disconnected,
                vec![
                    Action::StopHeartbeat,
                    Action::Disconnect,
                    Action::Notify(ConnectionNotice::Disconnected {
                        reason: "user requested".into(),
                    }),
                ],
            ),

            // From Reconnecting: the timer fires, the attempt runs, and the
            // state keeps its attempt count until the attempt resolves.
            (Self::Reconnecting { attempt }, ConnectionEvent::ReconnectTimerFired) => {
                (Self::Reconnecting { attempt }, vec![Action::Connect])
            }
            (Self::Reconnecting { .. }, ConnectionEvent::ConnectSucceeded) => (
                Self::Connected,
                vec![
                    Action::StartHeartbeat,
                    Action::Notify(ConnectionNotice::Connected),
                ],
            ),
            (Self::Reconnecting { attempt }, ConnectionEvent::ConnectFailed { error }) => {
                if attempt >= policy.max_attempts {
                    (
                        Self::Failed,
                        vec![Action::Notify(ConnectionNotice::ReconnectsExhausted {
                            attempts: attempt,
                            error,
                        })],
                    )
                } else {
                    schedule_reconnect(attempt + 1, error, policy)
                }
            }
            (Self::Reconnecting { .. }, ConnectionEvent::DisconnectRequested) => {
                (Self::Disconnected, vec![Action::CancelReconnect])
            }

            // Invalid transitions - stay in current state
            (state, _) => (state, vec![]),
        }
    }

    /// The UI-facing status for this state. The reconnect cycle reads as
    /// "connecting"; exhausted reconnects read as "error".
    pub fn status(&self) -> ConnectionStatus {
        match self {
            Self::Disconnected => ConnectionStatus::Disconnected,
            Self::Connecting | Self::Reconnecting { .. } => ConnectionStatus::Connecting,
            Self::Connected => ConnectionStatus::Connected,
            Self::Failed => ConnectionStatus::Error,
        }
    }

    /// Check if the session is established.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

fn schedule_reconnect(
    attempt: u32,
    error: String,
    policy: &ReconnectPolicy,
) -> (ConnectionState, Vec<Action>) {
    if policy.max_attempts == 0 {
        return (
            ConnectionState::Failed,
            vec![Action::Notify(ConnectionNotice::ReconnectsExhausted {
                attempts: 0,
                error,
            })],
        );
    }
    (
        ConnectionState::Reconnecting { attempt },
        vec![
            Action::Notify(ConnectionNotice::ReconnectScheduled { attempt, error }),
            Action::StartReconnectTimer {
                delay: policy.delay,
            },
        ],
    )
}

/// Events that can occur in the connection lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// User requested connection.
    ConnectRequested,
    /// Transport session established.
    ConnectSucceeded,
    /// Transport connection attempt failed.
    ConnectFailed {
        /// Error message describing the failure.
        error: String,
    },
    /// An established session died (close, receive error, or a heartbeat
    /// send failure) without an explicit disconnect.
    ConnectionLost {
        /// Reason for the loss.
        reason: String,
    },
    /// Reconnect timer fired.
    ReconnectTimerFired,
    /// User requested disconnect.
    DisconnectRequested,
}

/// Actions to be executed by guandan-client.
///
/// These are instructions, not side effects. The client interprets these
/// and performs the actual I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the transport session.
    Connect,
    /// Close the transport session.
    Disconnect,
    /// Start the periodic liveness probe.
    StartHeartbeat,
    /// Stop the periodic liveness probe.
    StopHeartbeat,
    /// Start a timer for the next reconnect attempt.
    StartReconnectTimer {
        /// Delay before attempting reconnection.
        delay: Duration,
    },
    /// Cancel any pending reconnect timer.
    CancelReconnect,
    /// Surface a lifecycle notice to the application.
    Notify(ConnectionNotice),
}

/// Lifecycle notices surfaced to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionNotice {
    /// Session established.
    Connected,
    /// Session lost; reconnection will follow unless disconnected.
    Disconnected {
        /// Reason for the loss.
        reason: String,
    },
    /// A reconnect attempt is scheduled.
    ReconnectScheduled {
        /// Which attempt (1-based).
        attempt: u32,
        /// The failure that triggered it.
        error: String,
    },
    /// The attempt bound was reached; the session is in terminal error.
    ReconnectsExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The final failure.
        error: String,
    },
}

/// The UI-facing connection status set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No session.
    #[default]
    Disconnected,
    /// Session being established (incl. the reconnect cycle).
    Connecting,
    /// Session live.
    Connected,
    /// Terminal failure; requires an explicit reconnect.
    Error,
}
