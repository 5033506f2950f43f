//! Table plays: an ordered group of cards with a derived display label.

use crate::card::{Card, Suit};
use std::fmt;

/// Coarse shape label for a play, derived client-side for display.
///
/// This is not rule validation; play legality is decided by the server.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlayKind {
    /// One card.
    Single,
    /// Two cards of the same rank.
    Pair,
    /// Three cards of the same rank.
    Triple,
    /// Four or more cards of the same rank.
    Bomb,
    /// Five or more consecutive natural ranks.
    Straight,
    /// Any other shape.
    Other,
}

impl PlayKind {
    /// Classify a group of cards by shape.
    pub fn classify(cards: &[Card]) -> PlayKind {
        match cards.len() {
            0 => PlayKind::Other,
            1 => PlayKind::Single,
            n => {
                let first = cards[0].rank;
                if cards.iter().all(|c| c.rank == first) {
                    return match n {
                        2 => PlayKind::Pair,
                        3 => PlayKind::Triple,
                        _ => PlayKind::Bomb,
                    };
                }
                if n >= 5 && is_straight(cards) {
                    return PlayKind::Straight;
                }
                PlayKind::Other
            }
        }
    }
}

fn is_straight(cards: &[Card]) -> bool {
    if cards.iter().any(|c| c.suit == Suit::Joker) {
        return false;
    }
    let mut weights: Vec<u16> = cards.iter().map(|c| c.rank.weight()).collect();
    weights.sort_unstable();
    weights.windows(2).all(|w| w[1] == w[0] + 1)
}

impl fmt::Display for PlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayKind::Single => "single",
            PlayKind::Pair => "pair",
            PlayKind::Triple => "triple",
            PlayKind::Bomb => "bomb",
            PlayKind::Straight => "straight",
            PlayKind::Other => "other",
        };
        write!(f, "{label}")
    }
}

/// The active play on the table: the cards, their derived shape label, and
/// a comparison weight taken from the highest rank in the group.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CardGroup {
    /// The cards, in the order they were played.
    pub cards: Vec<Card>,
    /// Derived shape label.
    pub kind: PlayKind,
    /// Derived comparison weight.
    pub value: u16,
}

impl CardGroup {
    /// Build a group from played cards, deriving the label and weight.
    pub fn from_cards(cards: Vec<Card>) -> CardGroup {
        let kind = PlayKind::classify(&cards);
        let value = cards.iter().map(|c| c.rank.weight()).max().unwrap_or(0);
        CardGroup { cards, kind, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn classifies_single() {
        let group = CardGroup::from_cards(vec![card(Suit::Hearts, Rank::Seven)]);
        assert_eq!(group.kind, PlayKind::Single);
        assert_eq!(group.value, Rank::Seven.weight());
    }

    #[test]
    fn classifies_pair_and_triple() {
        let pair = vec![card(Suit::Hearts, Rank::Nine), card(Suit::Clubs, Rank::Nine)];
        assert_eq!(PlayKind::classify(&pair), PlayKind::Pair);

        let triple = vec![
            card(Suit::Hearts, Rank::King),
            card(Suit::Clubs, Rank::King),
            card(Suit::Spades, Rank::King),
        ];
        assert_eq!(PlayKind::classify(&triple), PlayKind::Triple);
    }

    #[test]
    fn four_of_a_kind_is_a_bomb() {
        let bomb: Vec<Card> = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
            .into_iter()
            .map(|s| card(s, Rank::Five))
            .collect();
        assert_eq!(PlayKind::classify(&bomb), PlayKind::Bomb);
    }

    #[test]
    fn consecutive_run_is_a_straight() {
        let run = vec![
            card(Suit::Hearts, Rank::Three),
            card(Suit::Clubs, Rank::Four),
            card(Suit::Spades, Rank::Five),
            card(Suit::Hearts, Rank::Six),
            card(Suit::Diamonds, Rank::Seven),
        ];
        assert_eq!(PlayKind::classify(&run), PlayKind::Straight);
    }

    #[test]
    fn mixed_cards_are_other() {
        let mixed = vec![card(Suit::Hearts, Rank::Three), card(Suit::Clubs, Rank::Nine)];
        assert_eq!(PlayKind::classify(&mixed), PlayKind::Other);
    }

    #[test]
    fn value_is_highest_rank_weight() {
        let group = CardGroup::from_cards(vec![
            card(Suit::Hearts, Rank::Three),
            card(Suit::Clubs, Rank::Ace),
        ]);
        assert_eq!(group.value, Rank::Ace.weight());
    }
}
