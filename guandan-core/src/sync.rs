//! The synchronization controller.
//!
//! Sits between the decoded message stream and the reducer: snapshots are
//! applied unconditionally, events pass through the version gate, and the
//! escalation-to-resync decision is surfaced as an effect. Like the rest of
//! this crate the controller is pure - it returns effects for the client to
//! interpret instead of performing I/O.

use crate::gate::{GateDecision, VersionGate};
use crate::reducer::Store;
use guandan_types::{GameEvent, Seat, ServerMessage, Version};

/// What the client must do after a message was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEffect {
    /// The published state changed; notify subscribers.
    StateChanged,
    /// A version discontinuity was detected; drop the session's assumed
    /// consistency and obtain a fresh snapshot.
    ResyncNeeded,
    /// A server error message should be surfaced to the UI.
    SurfaceError(String),
    /// An event kind this client does not recognize was skipped.
    UnknownEvent {
        /// The kind tag as received.
        kind: String,
    },
}

/// Gates and reduces the inbound message stream.
#[derive(Debug, Clone)]
pub struct SyncController {
    store: Store,
    gate: VersionGate,
}

impl SyncController {
    /// Create a controller for the given locally-owned seat.
    pub fn new(my_seat: Seat) -> Self {
        Self {
            store: Store::new(my_seat),
            gate: VersionGate::new(),
        }
    }

    /// Read access to the store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access for the UI-boundary operations (selection, transient
    /// errors). State evolution still only happens via [`handle_message`].
    ///
    /// [`handle_message`]: SyncController::handle_message
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The last applied version.
    pub fn version(&self) -> Version {
        self.gate.current()
    }

    /// Whether a resynchronization request is outstanding.
    pub fn resync_pending(&self) -> bool {
        self.gate.resync_pending()
    }

    /// Handle one decoded inbound message, atomically.
    ///
    /// Liveness frames are transport plumbing and must be intercepted
    /// before this point; they are tolerated here as no-ops.
    pub fn handle_message(&mut self, message: &ServerMessage) -> Vec<SyncEffect> {
        match message {
            ServerMessage::Snapshot { payload, .. } => {
                // The payload carries its own version; the envelope mirror
                // is ignored in favor of it.
                self.gate.accept_snapshot(payload.version);
                self.store.apply_snapshot(payload);
                vec![SyncEffect::StateChanged]
            }
            ServerMessage::Event { e, version, data } => match self.gate.offer(*version) {
                GateDecision::Apply => {
                    let event = GameEvent::from_wire(e, data);
                    self.store.apply_event(*version, &event);
                    let mut effects = vec![SyncEffect::StateChanged];
                    if let GameEvent::Unknown { kind } = event {
                        effects.push(SyncEffect::UnknownEvent { kind });
                    }
                    effects
                }
                GateDecision::Discard { request_resync } => {
                    if request_resync {
                        vec![SyncEffect::ResyncNeeded]
                    } else {
                        vec![]
                    }
                }
            },
            ServerMessage::Error { error } => {
                self.store.set_error(error.clone());
                vec![
                    SyncEffect::StateChanged,
                    SyncEffect::SurfaceError(error.clone()),
                ]
            }
            ServerMessage::Ping | ServerMessage::Pong => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guandan_types::{MatchStatus, SnapshotState};
    use serde_json::json;

    fn snapshot(version: u64, status: &str) -> ServerMessage {
        let payload: SnapshotState = serde_json::from_value(json!({
            "matchId": "m-1",
            "players": [],
            "status": status,
            "version": version
        }))
        .unwrap();
        ServerMessage::Snapshot {
            version: Version::new(version),
            payload,
        }
    }

    fn event(kind: &str, version: u64, data: serde_json::Value) -> ServerMessage {
        ServerMessage::Event {
            e: kind.to_owned(),
            version: Version::new(version),
            data,
        }
    }

    fn roster_data() -> serde_json::Value {
        json!({
            "Players": [
                {"ID": "p0", "Name": "Li", "SeatID": 0},
                {"ID": "p1", "Name": "Wei", "SeatID": 1},
                {"ID": "p2", "Name": "Na", "SeatID": 2},
                {"ID": "p3", "Name": "Jun", "SeatID": 3}
            ]
        })
    }

    #[test]
    fn snapshot_then_in_order_event() {
        let mut controller = SyncController::new(Seat::East);

        let effects = controller.handle_message(&snapshot(5, "waiting"));
        assert_eq!(effects, vec![SyncEffect::StateChanged]);
        assert_eq!(controller.version(), Version::new(5));
        assert_eq!(controller.store().state().status, MatchStatus::Waiting);

        let effects = controller.handle_message(&event("MatchCreated", 6, roster_data()));
        assert_eq!(effects, vec![SyncEffect::StateChanged]);
        assert_eq!(controller.version(), Version::new(6));
        assert_eq!(controller.store().state().status, MatchStatus::Playing);
        assert_eq!(controller.store().state().players.len(), 4);
    }

    #[test]
    fn gap_discards_requests_resync_and_pins_version() {
        let mut controller = SyncController::new(Seat::East);
        controller.handle_message(&snapshot(5, "waiting"));
        controller.handle_message(&event("MatchCreated", 6, roster_data()));

        // Version 8 skips 7.
        let effects = controller.handle_message(&event("PlayerPassed", 8, json!({"Player": 0})));
        assert_eq!(effects, vec![SyncEffect::ResyncNeeded]);
        assert_eq!(controller.version(), Version::new(6));
        // The discarded event left the state untouched.
        assert_eq!(controller.store().state().players.len(), 4);

        // Another stray event: no second resync request.
        let effects = controller.handle_message(&event("PlayerPassed", 9, json!({"Player": 1})));
        assert!(effects.is_empty());
        assert_eq!(controller.version(), Version::new(6));

        // The fresh snapshot heals everything.
        controller.handle_message(&snapshot(9, "playing"));
        assert_eq!(controller.version(), Version::new(9));
        assert!(!controller.resync_pending());
    }

    #[test]
    fn duplicate_event_is_discarded() {
        let mut controller = SyncController::new(Seat::East);
        controller.handle_message(&snapshot(5, "waiting"));
        controller.handle_message(&event("MatchCreated", 6, roster_data()));

        let effects = controller.handle_message(&event("MatchCreated", 6, roster_data()));
        assert_eq!(effects, vec![SyncEffect::ResyncNeeded]);
        assert_eq!(controller.version(), Version::new(6));
    }

    #[test]
    fn version_advances_by_exactly_one_per_event() {
        let mut controller = SyncController::new(Seat::East);
        controller.handle_message(&snapshot(0, "waiting"));
        controller.handle_message(&event("MatchCreated", 1, roster_data()));
        controller.handle_message(&event(
            "DealStarted",
            2,
            json!({"DealNumber": 1, "Trump": 1, "FirstPlayer": 0}),
        ));
        for v in 3..=6 {
            controller.handle_message(&event(
                "PlayerPassed",
                v,
                json!({"Player": (v - 3) % 4}),
            ));
        }
        assert_eq!(controller.version(), Version::new(6));
        assert_eq!(controller.store().state().version, Version::new(6));
    }

    #[test]
    fn unknown_kind_advances_version_without_state_change() {
        let mut controller = SyncController::new(Seat::East);
        controller.handle_message(&snapshot(5, "playing"));

        let effects = controller.handle_message(&event("TributeGiven", 6, json!({})));
        assert!(effects.contains(&SyncEffect::StateChanged));
        assert!(effects.contains(&SyncEffect::UnknownEvent {
            kind: "TributeGiven".to_owned()
        }));
        assert_eq!(controller.version(), Version::new(6));
        assert_eq!(controller.store().state().status, MatchStatus::Playing);
    }

    #[test]
    fn server_error_surfaces_without_touching_state() {
        let mut controller = SyncController::new(Seat::East);
        controller.handle_message(&snapshot(5, "playing"));

        let effects = controller.handle_message(&ServerMessage::Error {
            error: "invalid play".to_owned(),
        });
        assert!(effects.contains(&SyncEffect::SurfaceError("invalid play".to_owned())));
        assert_eq!(controller.version(), Version::new(5));
        assert_eq!(
            controller.store().view().error_message.as_deref(),
            Some("invalid play")
        );
    }

    #[test]
    fn snapshot_clears_surfaced_errors() {
        let mut controller = SyncController::new(Seat::East);
        controller.handle_message(&ServerMessage::Error {
            error: "invalid play".to_owned(),
        });
        controller.handle_message(&snapshot(5, "playing"));
        assert!(controller.store().view().error_message.is_none());
    }

    #[test]
    fn liveness_frames_are_no_ops() {
        let mut controller = SyncController::new(Seat::East);
        assert!(controller.handle_message(&ServerMessage::Ping).is_empty());
        assert!(controller.handle_message(&ServerMessage::Pong).is_empty());
    }
}
