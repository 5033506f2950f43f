//! # guandan-types
//!
//! Wire format and domain value types for the Guandan table client.
//!
//! This crate provides the foundational types used across the client stack:
//! - [`Seat`], [`Card`], [`Suit`], [`Rank`], [`Version`] - Identity and ordering types
//! - [`ServerMessage`] / [`ClientMessage`] - The WebSocket message envelope
//! - [`GameEvent`] - The closed union of versioned table events
//! - [`WireError`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod card;
mod error;
mod events;
mod group;
mod messages;
mod seat;
mod state;

pub use card::{Card, DecodeAnomaly, DecodedCard, Rank, Suit};
pub use error::WireError;
pub use events::{
    CardsDealtPayload, CardsPlayedPayload, DealStartedPayload, GameEvent, MatchCreatedPayload,
    PlayerPassedPayload, RosterEntry, TrickWonPayload,
};
pub use group::{CardGroup, PlayKind};
pub use messages::{
    ClientMessage, PlayCardsData, ServerMessage, SnapshotDeal, SnapshotPlay, SnapshotState,
};
pub use seat::Seat;
pub use state::{DealState, MatchState, MatchStatus, Player, Version};
