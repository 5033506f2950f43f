//! The closed union of versioned table events.
//!
//! Event payloads keep the engine's field casing (`Player`, `Cards`,
//! `Winner`, ...). Decoding is total: a kind the client does not recognize,
//! or a known kind whose payload does not parse, becomes
//! [`GameEvent::Unknown`] instead of an error, so one bad event cannot stall
//! the stream.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One roster entry in a `MatchCreated` event.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RosterEntry {
    /// Server-assigned player id.
    #[serde(rename = "ID", default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Seat index 0..3; entries without a resolvable seat are dropped.
    #[serde(rename = "SeatID", default)]
    pub seat_id: Option<i64>,
    /// Rank/level counter.
    #[serde(default)]
    pub level: i64,
    /// Connectivity flag; absent means online.
    #[serde(default = "default_online")]
    pub is_online: bool,
}

fn default_online() -> bool {
    true
}

/// Payload of `MatchCreated`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchCreatedPayload {
    /// The roster, replacing the local player list wholesale.
    #[serde(default)]
    pub players: Vec<RosterEntry>,
}

/// Payload of `CardsDealt`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardsDealtPayload {
    /// Per-seat hands keyed by seat index string; tolerated when absent.
    #[serde(default)]
    pub hands: Option<BTreeMap<String, Vec<Value>>>,
}

/// Payload of `DealStarted`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DealStartedPayload {
    /// Ordinal of the deal within the match.
    #[serde(default)]
    pub deal_number: i64,
    /// Trump indicator (a rank code or literal).
    #[serde(default)]
    pub trump: Value,
    /// Seat index of the seat that leads the deal.
    pub first_player: i64,
}

/// Payload of `CardsPlayed`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardsPlayedPayload {
    /// Seat index of the acting seat.
    pub player: i64,
    /// The played card tokens.
    #[serde(default)]
    pub cards: Vec<Value>,
}

/// Payload of `PlayerPassed`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerPassedPayload {
    /// Seat index of the passing seat.
    pub player: i64,
}

/// Payload of `TrickWon`.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrickWonPayload {
    /// Seat index of the winning seat.
    pub winner: i64,
}

/// A decoded table event.
#[derive(Clone, PartialEq, Debug)]
pub enum GameEvent {
    /// The match formed; carries the roster.
    MatchCreated(MatchCreatedPayload),
    /// Hands were dealt.
    CardsDealt(CardsDealtPayload),
    /// A new deal began.
    DealStarted(DealStartedPayload),
    /// A seat played cards.
    CardsPlayed(CardsPlayedPayload),
    /// A seat passed.
    PlayerPassed(PlayerPassedPayload),
    /// A trick resolved.
    TrickWon(TrickWonPayload),
    /// Unrecognized kind or unparseable payload; applies as a no-op.
    Unknown {
        /// The kind tag as received.
        kind: String,
    },
}

impl GameEvent {
    /// Decode an event from its kind tag and raw payload.
    pub fn from_wire(kind: &str, data: &Value) -> GameEvent {
        fn parse<T: for<'de> Deserialize<'de>>(data: &Value) -> Option<T> {
            serde_json::from_value(data.clone()).ok()
        }

        let decoded = match kind {
            "MatchCreated" => parse(data).map(GameEvent::MatchCreated),
            "CardsDealt" => parse(data).map(GameEvent::CardsDealt),
            "DealStarted" => parse(data).map(GameEvent::DealStarted),
            "CardsPlayed" => parse(data).map(GameEvent::CardsPlayed),
            "PlayerPassed" => parse(data).map(GameEvent::PlayerPassed),
            "TrickWon" => parse(data).map(GameEvent::TrickWon),
            _ => None,
        };

        decoded.unwrap_or_else(|| GameEvent::Unknown {
            kind: kind.to_owned(),
        })
    }
}
