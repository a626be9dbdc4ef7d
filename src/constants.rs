//! Configuration constants for the Undercover game engine
//!
//! This module contains the limits and fixed values used throughout the
//! engine: table size bounds, name constraints, the reveal message shown
//! to Mr. White, and the point deltas applied at the end of a round.

/// Table configuration constants
pub mod table {
    /// Minimum number of players at the table
    pub const MIN_PLAYER_COUNT: usize = 3;
    /// Maximum number of players at the table
    pub const MAX_PLAYER_COUNT: usize = 12;
    /// Maximum length of a player name in characters
    pub const MAX_NAME_LENGTH: usize = 30;
}

/// Fixed texts shown to players during the reveal phase
pub mod reveal {
    /// Message shown instead of a word to players holding the Mr. White role
    pub const MR_WHITE_MESSAGE: &str = "You are Mr. White!";
}

/// Point deltas applied when a round reaches a terminal state
pub mod scoring {
    /// Points awarded to every civilian when all impostors are eliminated
    pub const CIVILIAN_WIN_POINTS: u64 = 2;
    /// Points awarded to every undercover player on an impostor win
    pub const UNDERCOVER_WIN_POINTS: u64 = 10;
    /// Points awarded to every Mr. White player on an impostor win
    pub const MR_WHITE_WIN_POINTS: u64 = 6;
    /// Points awarded to every Mr. White player on a correct word guess
    pub const MR_WHITE_GUESS_POINTS: u64 = 6;
}
