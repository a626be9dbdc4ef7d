//! Seats, roles, and per-player round state
//!
//! This module defines the identity and state of a single player slot at
//! the table: the stable seat number, the secret role dealt each round,
//! the word (or reveal message) attached to that role, and the per-round
//! bookkeeping flags the state machine drives.

use std::{fmt::Display, num::ParseIntError, str::FromStr};

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// A stable player slot number within a round
///
/// Seats are numbered 1..=N at round setup and never reused within a
/// round. The seat, not the name, is the identity everything else is
/// keyed by.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct Seat(usize);

impl Seat {
    /// Creates a seat from its 1-based number
    pub fn new(number: usize) -> Self {
        Self(number)
    }

    /// Returns the 1-based seat number
    pub fn number(self) -> usize {
        self.0
    }
}

impl Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Seat {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(usize::from_str(s)?))
    }
}

/// The secret role dealt to a player for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Role {
    /// Knows the common word; wins by eliminating all impostors
    Civilian,
    /// Knows the decoy word; wins as part of the impostor side
    Undercover,
    /// Has no word; can win by guessing the civilian word after elimination
    MrWhite,
}

impl Role {
    /// Whether this role is on the impostor side (Undercover or Mr. White)
    pub fn is_impostor(self) -> bool {
        matches!(self, Role::Undercover | Role::MrWhite)
    }
}

/// Per-seat state for the active round
///
/// Points persist across rounds; everything else is rebuilt when roles are
/// reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// The seat this state belongs to
    pub seat: Seat,
    /// Player name, empty until set; carried across rounds once set
    pub name: String,
    /// Secret role for this round
    pub role: Role,
    /// Word shown to this player, or the fixed Mr. White reveal message
    pub word: String,
    /// Accumulated points across rounds
    pub points: u64,
    /// Whether this player has been voted out this round
    pub is_eliminated: bool,
    /// Whether this player has opened their word reveal at least once
    pub has_viewed_once: bool,
}

impl PlayerState {
    /// Whether this player is still in the round
    pub fn is_alive(&self) -> bool {
        !self.is_eliminated
    }
}
