//! Cards and the wire card codec.
//!
//! The server speaks two token forms: a structured `{"Suit": n, "Rank": n}`
//! pair inside event payloads, and a short printable string (`"♥7"`,
//! `"小王"`) in play submissions and some snapshots. The codec maps both to
//! the same [`Card`] value and always emits the string form outbound.
//!
//! Decoding never fails: an unrecognized code degrades to a documented
//! default and the degradation is reported alongside the card, so one
//! malformed token cannot take down the message path.

use serde_json::Value;
use std::fmt;

/// A card suit. `Joker` is the synthetic suit carrying the two joker ranks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Suit {
    /// Numeric code 0, glyph `♥`.
    Hearts,
    /// Numeric code 1, glyph `♦`.
    Diamonds,
    /// Numeric code 2, glyph `♣`.
    Clubs,
    /// Numeric code 3, glyph `♠`.
    Spades,
    /// Numeric code 4; joker cards have no glyph, only rank literals.
    Joker,
}

impl Suit {
    /// Decode a numeric suit code.
    pub fn from_code(code: i64) -> Option<Suit> {
        match code {
            0 => Some(Suit::Hearts),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Clubs),
            3 => Some(Suit::Spades),
            4 => Some(Suit::Joker),
            _ => None,
        }
    }

    /// The display glyph for a natural suit. Jokers render by rank alone.
    pub fn glyph(self) -> Option<char> {
        match self {
            Suit::Hearts => Some('♥'),
            Suit::Diamonds => Some('♦'),
            Suit::Clubs => Some('♣'),
            Suit::Spades => Some('♠'),
            Suit::Joker => None,
        }
    }

    fn from_glyph(glyph: char) -> Option<Suit> {
        match glyph {
            '♥' => Some(Suit::Hearts),
            '♦' => Some(Suit::Diamonds),
            '♣' => Some(Suit::Clubs),
            '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A card rank. The numeric wire codes run 1..=13 for Two..=Ace; the two
/// joker ranks ride on the `Joker` suit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Rank {
    /// Code 1.
    Two,
    /// Code 2.
    Three,
    /// Code 3.
    Four,
    /// Code 4.
    Five,
    /// Code 5.
    Six,
    /// Code 6.
    Seven,
    /// Code 7.
    Eight,
    /// Code 8.
    Nine,
    /// Code 9.
    Ten,
    /// Code 10.
    Jack,
    /// Code 11.
    Queen,
    /// Code 12.
    King,
    /// Code 13.
    Ace,
    /// Code 14 (legacy sentinel 51), literal `小王`.
    SmallJoker,
    /// Code 15 (legacy sentinel 52), literal `大王`.
    BigJoker,
}

impl Rank {
    /// Decode a natural (non-joker) numeric rank code 1..=13.
    pub fn from_code(code: i64) -> Option<Rank> {
        match code {
            1 => Some(Rank::Two),
            2 => Some(Rank::Three),
            3 => Some(Rank::Four),
            4 => Some(Rank::Five),
            5 => Some(Rank::Six),
            6 => Some(Rank::Seven),
            7 => Some(Rank::Eight),
            8 => Some(Rank::Nine),
            9 => Some(Rank::Ten),
            10 => Some(Rank::Jack),
            11 => Some(Rank::Queen),
            12 => Some(Rank::King),
            13 => Some(Rank::Ace),
            _ => None,
        }
    }

    /// The rank literal used in the string token form.
    pub fn literal(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::SmallJoker => "小王",
            Rank::BigJoker => "大王",
        }
    }

    fn from_literal(literal: &str) -> Option<Rank> {
        match literal {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Numeric comparison weight (Two = 1 .. BigJoker = 15).
    pub fn weight(self) -> u16 {
        match self {
            Rank::Two => 1,
            Rank::Three => 2,
            Rank::Four => 3,
            Rank::Five => 4,
            Rank::Six => 5,
            Rank::Seven => 6,
            Rank::Eight => 7,
            Rank::Nine => 8,
            Rank::Ten => 9,
            Rank::Jack => 10,
            Rank::Queen => 11,
            Rank::King => 12,
            Rank::Ace => 13,
            Rank::SmallJoker => 14,
            Rank::BigJoker => 15,
        }
    }
}

/// A card value object. Equality is suit + rank; duplicate physical cards
/// across the two decks are indistinguishable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Card {
    /// The suit.
    pub suit: Suit,
    /// The rank.
    pub rank: Rank,
}

/// Why a token decode had to degrade.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DecodeAnomaly {
    /// Structured form carried a suit code outside 0..=4.
    UnknownSuitCode(i64),
    /// Structured form carried a natural rank code outside 1..=13.
    UnknownRankCode(i64),
    /// Structured form carried a joker rank that is neither small nor big.
    UnknownJokerRank(i64),
    /// String form started with an unrecognized suit glyph.
    UnknownSuitGlyph(char),
    /// String form carried an unrecognized rank literal.
    UnknownRankLiteral(String),
    /// The token was neither a suit/rank object nor a string.
    MalformedToken,
}

impl fmt::Display for DecodeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeAnomaly::UnknownSuitCode(code) => write!(f, "unknown suit code {code}"),
            DecodeAnomaly::UnknownRankCode(code) => write!(f, "unknown rank code {code}"),
            DecodeAnomaly::UnknownJokerRank(code) => write!(f, "unknown joker rank {code}"),
            DecodeAnomaly::UnknownSuitGlyph(glyph) => write!(f, "unknown suit glyph {glyph:?}"),
            DecodeAnomaly::UnknownRankLiteral(lit) => write!(f, "unknown rank literal {lit:?}"),
            DecodeAnomaly::MalformedToken => write!(f, "malformed card token"),
        }
    }
}

/// The result of decoding one wire token: always a card, plus the anomaly
/// if the decode had to fall back to a default.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DecodedCard {
    /// The decoded (possibly degraded) card.
    pub card: Card,
    /// Present when the token was not cleanly recognized.
    pub anomaly: Option<DecodeAnomaly>,
}

impl Card {
    /// Construct a card from its parts.
    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card { suit, rank }
    }

    /// Decode a wire token in either form.
    ///
    /// Degradation defaults: unknown suit → Hearts, unknown natural rank →
    /// Two, unknown joker rank → the small joker, anything unparseable →
    /// `♥2`. The anomaly field reports the first degradation encountered.
    pub fn decode(token: &Value) -> DecodedCard {
        if let Some(text) = token.as_str() {
            return Card::decode_str(text);
        }
        if token.is_object() {
            let suit_code = token.get("Suit").and_then(Value::as_i64);
            let rank_code = token.get("Rank").and_then(Value::as_i64);
            if let (Some(suit_code), Some(rank_code)) = (suit_code, rank_code) {
                return Card::decode_codes(suit_code, rank_code);
            }
        }
        DecodedCard {
            card: Card::new(Suit::Hearts, Rank::Two),
            anomaly: Some(DecodeAnomaly::MalformedToken),
        }
    }

    fn decode_codes(suit_code: i64, rank_code: i64) -> DecodedCard {
        let (suit, suit_anomaly) = match Suit::from_code(suit_code) {
            Some(suit) => (suit, None),
            None => (Suit::Hearts, Some(DecodeAnomaly::UnknownSuitCode(suit_code))),
        };

        let (rank, rank_anomaly) = if suit == Suit::Joker {
            // The engine emits 14/15; the legacy sentinel pair 51/52 still
            // appears in older snapshots.
            match rank_code {
                14 | 51 => (Rank::SmallJoker, None),
                15 | 52 => (Rank::BigJoker, None),
                other => (
                    Rank::SmallJoker,
                    Some(DecodeAnomaly::UnknownJokerRank(other)),
                ),
            }
        } else {
            match Rank::from_code(rank_code) {
                Some(rank) => (rank, None),
                None => (Rank::Two, Some(DecodeAnomaly::UnknownRankCode(rank_code))),
            }
        };

        DecodedCard {
            card: Card::new(suit, rank),
            anomaly: suit_anomaly.or(rank_anomaly),
        }
    }

    fn decode_str(text: &str) -> DecodedCard {
        match text {
            "小王" => {
                return DecodedCard {
                    card: Card::new(Suit::Joker, Rank::SmallJoker),
                    anomaly: None,
                }
            }
            "大王" => {
                return DecodedCard {
                    card: Card::new(Suit::Joker, Rank::BigJoker),
                    anomaly: None,
                }
            }
            _ => {}
        }

        let mut chars = text.chars();
        let Some(glyph) = chars.next() else {
            return DecodedCard {
                card: Card::new(Suit::Hearts, Rank::Two),
                anomaly: Some(DecodeAnomaly::MalformedToken),
            };
        };

        let (suit, suit_anomaly) = match Suit::from_glyph(glyph) {
            Some(suit) => (suit, None),
            None => (Suit::Hearts, Some(DecodeAnomaly::UnknownSuitGlyph(glyph))),
        };

        let literal: String = chars.collect();
        let (rank, rank_anomaly) = match Rank::from_literal(&literal) {
            Some(rank) => (rank, None),
            None => (Rank::Two, Some(DecodeAnomaly::UnknownRankLiteral(literal))),
        };

        DecodedCard {
            card: Card::new(suit, rank),
            anomaly: suit_anomaly.or(rank_anomaly),
        }
    }

    /// Encode to the string token form the server expects for submissions.
    pub fn encode(&self) -> String {
        match self.suit.glyph() {
            Some(glyph) => format!("{glyph}{}", self.rank.literal()),
            None => self.rank.literal().to_owned(),
        }
    }

    /// Every representable card: the 52 natural cards plus the two jokers.
    pub fn full_deck() -> Vec<Card> {
        let mut cards = Vec::with_capacity(54);
        for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades] {
            for code in 1..=13 {
                let rank = Rank::from_code(code).expect("codes 1..=13 are valid");
                cards.push(Card::new(suit, rank));
            }
        }
        cards.push(Card::new(Suit::Joker, Rank::SmallJoker));
        cards.push(Card::new(Suit::Joker, Rank::BigJoker));
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
