//! Client configuration.

use guandan_core::ReconnectPolicy;
use guandan_types::Seat;
use std::time::Duration;

/// Configuration for [`GameClient`](crate::GameClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint URL of the room's WebSocket session (see [`room_url`]).
    pub url: String,
    /// The locally-owned seat at the table.
    pub seat: Seat,
    /// Reconnection policy (bounded attempts, fixed delay).
    pub reconnect: ReconnectPolicy,
    /// Interval between liveness probes while connected.
    pub heartbeat_interval: Duration,
}

impl ClientConfig {
    /// Create a configuration with default reconnect and heartbeat settings.
    pub fn new(url: impl Into<String>, seat: Seat) -> Self {
        Self {
            url: url.into(),
            seat,
            reconnect: ReconnectPolicy::default(),
            heartbeat_interval: Duration::from_secs(30),
        }
    }

    /// Set the reconnection policy.
    pub fn with_reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }

    /// Set the heartbeat interval.
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }
}

/// Build the session endpoint URL for a room and seat.
///
/// Room creation and listing are HTTP concerns outside this crate; callers
/// that already hold a server-issued URL can pass it to [`ClientConfig`]
/// directly.
pub fn room_url(base: &str, room_id: &str, seat: Seat) -> String {
    format!(
        "{}/api/room/{}/ws?seat={}",
        base.trim_end_matches('/'),
        room_id,
        seat.index()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_protocol() {
        let config = ClientConfig::new("ws://table", Seat::East);
        assert_eq!(config.reconnect.max_attempts, 5);
        assert_eq!(config.reconnect.delay, Duration::from_secs(3));
        assert_eq!(config.heartbeat_interval, Duration::from_secs(30));
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::new("ws://table", Seat::South)
            .with_reconnect_policy(ReconnectPolicy {
                max_attempts: 2,
                delay: Duration::from_millis(500),
            })
            .with_heartbeat_interval(Duration::from_secs(5));

        assert_eq!(config.reconnect.max_attempts, 2);
        assert_eq!(config.heartbeat_interval, Duration::from_secs(5));
    }

    #[test]
    fn room_url_carries_room_and_seat_index() {
        assert_eq!(
            room_url("ws://table:8080", "r-42", Seat::West),
            "ws://table:8080/api/room/r-42/ws?seat=2"
        );
        assert_eq!(
            room_url("ws://table:8080/", "r-42", Seat::East),
            "ws://table:8080/api/room/r-42/ws?seat=0"
        );
    }
}
