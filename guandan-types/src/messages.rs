//! The WebSocket message envelope.
//!
//! Inbound and outbound frames share one JSON shape: a `t` type tag plus
//! message-specific fields. Liveness probes (`ping`/`pong`) travel in the
//! same envelope and are handled by the connection layer, never forwarded
//! to the synchronization path.

use crate::error::WireError;
use crate::seat::Seat;
use crate::state::{MatchStatus, Player, Version};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A frame received from the server.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum ServerMessage {
    /// Authoritative full-state replacement. Always wins over local state.
    Snapshot {
        /// Version carried by the envelope (mirrors the payload's own).
        version: Version,
        /// The full match state.
        payload: SnapshotState,
    },
    /// A discrete, versioned state transition.
    Event {
        /// Event kind tag (`MatchCreated`, `CardsPlayed`, ...).
        e: String,
        /// The version this event advances the state to.
        version: Version,
        /// Event-specific payload, decoded per kind.
        #[serde(default)]
        data: Value,
    },
    /// Human-readable server error; surfaced to the UI, no state mutation.
    Error {
        /// The message text.
        error: String,
    },
    /// Liveness probe; answered with `pong` at the connection layer.
    #[serde(rename = "ping")]
    Ping,
    /// Liveness response; swallowed at the connection layer.
    #[serde(rename = "pong")]
    Pong,
}

impl ServerMessage {
    /// Parse a frame from JSON text.
    pub fn from_json(text: &str) -> Result<Self, WireError> {
        serde_json::from_str(text).map_err(WireError::Deserialization)
    }

    /// Serialize to JSON text (used by tests and tooling).
    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Serialization)
    }
}

/// A frame sent to the server.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum ClientMessage {
    /// Submit a play of one or more encoded card tokens.
    PlayCards {
        /// The play payload.
        data: PlayCardsData,
    },
    /// Pass the turn.
    Pass,
    /// Liveness probe.
    #[serde(rename = "ping")]
    Ping,
    /// Liveness response.
    #[serde(rename = "pong")]
    Pong,
}

/// Payload of a `PlayCards` frame.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PlayCardsData {
    /// Encoded card tokens, in play order.
    pub cards: Vec<String>,
}

impl ClientMessage {
    /// Serialize to JSON text for the wire.
    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Serialization)
    }

    /// Parse from JSON text (used by tests and tooling).
    pub fn from_json(text: &str) -> Result<Self, WireError> {
        serde_json::from_str(text).map_err(WireError::Deserialization)
    }
}

/// The full match state as carried by a `Snapshot` frame.
///
/// Card tokens stay as raw JSON values here; the reducer runs them through
/// the card codec so a single malformed token degrades instead of rejecting
/// the whole snapshot.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotState {
    /// Match identifier.
    #[serde(default)]
    pub match_id: String,
    /// The roster.
    #[serde(default)]
    pub players: Vec<Player>,
    /// The current deal, absent before the first deal.
    #[serde(default)]
    pub current_deal: Option<SnapshotDeal>,
    /// Coarse status.
    #[serde(default)]
    pub status: MatchStatus,
    /// The version this snapshot represents.
    #[serde(default)]
    pub version: Version,
}

/// Deal state as carried by a `Snapshot` frame.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDeal {
    /// Deal identifier.
    #[serde(default)]
    pub deal_id: String,
    /// Trump indicator.
    #[serde(default)]
    pub trump: String,
    /// Phase tag.
    #[serde(default)]
    pub phase: String,
    /// The seat whose turn it is.
    #[serde(default)]
    pub current_turn: Option<Seat>,
    /// The active table play, if any.
    #[serde(default)]
    pub table_play: Option<SnapshotPlay>,
    /// The seat that placed the active play.
    #[serde(default)]
    pub last_player: Option<Seat>,
    /// Per-seat hands; only the locally-owned seat's entry is decoded.
    #[serde(default)]
    pub player_hands: BTreeMap<Seat, Vec<Value>>,
}

/// The active play as carried by a `Snapshot` frame.
///
/// The shape label and weight are re-derived locally, so only the tokens
/// matter here.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SnapshotPlay {
    /// Raw card tokens.
    #[serde(default)]
    pub cards: Vec<Value>,
}
