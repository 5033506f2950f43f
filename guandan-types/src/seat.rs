//! Seat identities and turn rotation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed player positions at the table.
///
/// The rotation order is east → south → west → north → east; it defines
/// both turn order and the partner relationship (opposite seats team up).
/// The server addresses seats by index 0..3 in event payloads and by name
/// in snapshot payloads.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// Seat index 0.
    East,
    /// Seat index 1.
    South,
    /// Seat index 2.
    West,
    /// Seat index 3.
    North,
}

impl Seat {
    /// All seats in rotation order.
    pub const ALL: [Seat; 4] = [Seat::East, Seat::South, Seat::West, Seat::North];

    /// Decode a server seat index (0..3). Any other value is unresolvable.
    pub fn from_index(index: i64) -> Option<Seat> {
        match index {
            0 => Some(Seat::East),
            1 => Some(Seat::South),
            2 => Some(Seat::West),
            3 => Some(Seat::North),
            _ => None,
        }
    }

    /// The server-side index of this seat.
    pub fn index(self) -> u8 {
        match self {
            Seat::East => 0,
            Seat::South => 1,
            Seat::West => 2,
            Seat::North => 3,
        }
    }

    /// The next seat in turn rotation, wrapping north → east.
    pub fn next(self) -> Seat {
        match self {
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
            Seat::North => Seat::East,
        }
    }

    /// The seat directly across the table (this seat's partner).
    pub fn partner(self) -> Seat {
        self.next().next()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Seat::East => "east",
            Seat::South => "south",
            Seat::West => "west",
            Seat::North => "north",
        };
        write!(f, "{name}")
    }
}
