//! Match state: the canonical snapshot the reducer owns.

use crate::group::CardGroup;
use crate::seat::Seat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monotonically increasing version for ordering table events.
///
/// Assigned by the server; every applied event advances it by exactly one.
/// Versions are more reliable than timestamps because client clocks drift.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Version(u64);

impl Version {
    /// Create a new Version with the given value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the numeric value of this Version.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The version before any state has been received.
    pub fn zero() -> Self {
        Self(0)
    }

    /// The immediate successor version.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.0)
    }
}

/// Coarse match lifecycle status.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Seats are filling; no deal yet.
    #[default]
    Waiting,
    /// A deal is in progress.
    Playing,
    /// The match has concluded.
    Finished,
}

/// One player at the table.
///
/// Only the owning seat ever sees hand contents; everyone else tracks the
/// `hand_count` counter. `connected` is the only field mutated by connection
/// events rather than game events.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Server-assigned player id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The seat this player occupies. Immutable once assigned.
    pub seat: Seat,
    /// Number of cards in hand (contents hidden for remote seats).
    #[serde(default)]
    pub hand_count: usize,
    /// Rank/level counter.
    #[serde(default)]
    pub level: i64,
    /// Connectivity flag.
    #[serde(default = "default_connected")]
    pub connected: bool,
}

fn default_connected() -> bool {
    true
}

/// One hand of play within a match.
///
/// Created when a deal starts and replaced wholesale by the next deal's
/// state, never patched across a deal boundary.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DealState {
    /// Deal identifier (`deal_<n>`).
    pub deal_id: String,
    /// Trump indicator for this deal.
    pub trump: String,
    /// Phase tag as reported by the server.
    pub phase: String,
    /// The seat whose turn it is.
    pub current_turn: Option<Seat>,
    /// The active play on the table, if a trick is contested.
    pub table_play: Option<CardGroup>,
    /// The seat that placed the active play.
    pub last_player: Option<Seat>,
}

/// The canonical match-state snapshot.
///
/// Single source of truth for the table; all UI-facing derived flags are
/// computed from it, never stored in a way that can diverge.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MatchState {
    /// Match identifier.
    pub match_id: String,
    /// Players in seat order as reported by the server.
    pub players: Vec<Player>,
    /// The current deal; absent before the first deal.
    pub current_deal: Option<DealState>,
    /// Coarse status.
    pub status: MatchStatus,
    /// Last applied version.
    pub version: Version,
}

impl MatchState {
    /// Look up a player by seat.
    pub fn player_at(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    /// Mutable lookup by seat.
    pub fn player_at_mut(&mut self, seat: Seat) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.seat == seat)
    }

    /// The seat whose turn it is, if a deal is active.
    pub fn current_turn(&self) -> Option<Seat> {
        self.current_deal.as_ref().and_then(|d| d.current_turn)
    }
}
