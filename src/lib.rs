//! # Undercover Game Library
//!
//! This library provides the core game logic for the Undercover social
//! deduction word game. It handles word pair selection, secret role
//! assignment, speaking order, the elimination round state machine,
//! Mr. White's last-chance guess, and scoring across rounds.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::ignored_unit_patterns)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]

use serde::Serialize;

pub mod assign;
pub mod constants;
pub mod leaderboard;
pub mod names;
pub mod order;
pub mod player;
pub mod round;
pub mod session;
pub mod words;

/// Any error the game logic can produce
///
/// Aggregates the per-module error types so callers that do not care
/// which stage failed can handle them uniformly.
#[derive(Debug, Clone, thiserror::Error, derive_more::From, Serialize)]
pub enum Error {
    /// The round configuration is not playable
    #[error(transparent)]
    Config(assign::Error),
    /// The word catalog could not supply a pair
    #[error(transparent)]
    Words(words::Error),
    /// A player name was rejected
    #[error(transparent)]
    Name(names::Error),
    /// No speaking order could be formed
    #[error(transparent)]
    Order(order::Error),
    /// A round operation was not allowed in the current phase
    #[error(transparent)]
    Round(round::Error),
}

impl From<round::CreateError> for Error {
    fn from(error: round::CreateError) -> Self {
        match error {
            round::CreateError::Config(e) => Self::Config(e),
            round::CreateError::Words(e) => Self::Words(e),
        }
    }
}
