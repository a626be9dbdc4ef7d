//! Role assignment
//!
//! This module validates a round configuration and deals shuffled roles to
//! the seats at the table. The shuffle is a uniform Fisher-Yates via
//! `fastrand::shuffle`; each player's word is resolved from the active
//! word pair according to their role, and names and points carry over from
//! the previous round keyed by seat.

use std::collections::BTreeMap;

use enum_map::{EnumMap, enum_map};
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::{
        reveal::MR_WHITE_MESSAGE,
        table::{MAX_PLAYER_COUNT, MIN_PLAYER_COUNT},
    },
    player::{PlayerState, Role, Seat},
    words::WordPair,
};

/// The role composition of a round
///
/// Total players and the two special role counts; the civilian count is
/// derived, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct RoundConfig {
    /// Number of seats at the table
    #[garde(range(min = MIN_PLAYER_COUNT, max = MAX_PLAYER_COUNT))]
    pub total_players: usize,
    /// Number of undercover players
    #[garde(skip)]
    pub undercover: usize,
    /// Number of Mr. White players
    #[garde(skip)]
    pub mr_white: usize,
}

/// Errors that can occur when validating a round configuration
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The player count is outside the supported table size
    #[error("player count must be between {MIN_PLAYER_COUNT} and {MAX_PLAYER_COUNT}")]
    PlayerCount,
    /// The special roles leave no civilian seat
    #[error("at least one civilian is required")]
    NoCivilians,
    /// The special roles outnumber half the table
    #[error("special roles cannot exceed half the table")]
    TooManySpecials,
    /// Neither undercover nor Mr. White is present
    #[error("at least one undercover or mr. white is required")]
    NoSpecials,
}

impl RoundConfig {
    /// Checks that the configuration describes a playable table
    ///
    /// # Errors
    ///
    /// * [`Error::PlayerCount`] - total outside 3..=12
    /// * [`Error::NoSpecials`] - no undercover and no Mr. White
    /// * [`Error::TooManySpecials`] - specials exceed half the table
    /// * [`Error::NoCivilians`] - no civilian seat remains
    pub fn check(&self) -> Result<(), Error> {
        if self.validate().is_err() {
            return Err(Error::PlayerCount);
        }
        let specials = self.undercover + self.mr_white;
        if specials == 0 {
            return Err(Error::NoSpecials);
        }
        if specials > self.total_players / 2 {
            return Err(Error::TooManySpecials);
        }
        if self.civilians() < 1 {
            return Err(Error::NoCivilians);
        }
        Ok(())
    }

    /// Derived number of civilian seats
    pub fn civilians(&self) -> usize {
        self.total_players
            .saturating_sub(self.undercover + self.mr_white)
    }

    /// Target headcount per role
    pub fn role_counts(&self) -> EnumMap<Role, usize> {
        enum_map! {
            Role::Civilian => self.civilians(),
            Role::Undercover => self.undercover,
            Role::MrWhite => self.mr_white,
        }
    }
}

/// Deals shuffled roles to seats 1..=N and attaches role-appropriate words
///
/// Civilians receive the civilian word, undercover players the decoy, and
/// Mr. White the fixed reveal message. Names and points carry over from
/// `prior_names`/`prior_points` keyed by seat; elimination and viewed
/// flags start cleared.
///
/// # Errors
///
/// Returns a configuration error if the composition is not playable; no
/// partial state is produced.
pub fn assign(
    config: &RoundConfig,
    pair: &WordPair,
    prior_names: &BTreeMap<Seat, String>,
    prior_points: &BTreeMap<Seat, u64>,
) -> Result<BTreeMap<Seat, PlayerState>, Error> {
    config.check()?;

    let mut roles = Vec::with_capacity(config.total_players);
    for (role, count) in config.role_counts() {
        roles.extend(std::iter::repeat_n(role, count));
    }
    fastrand::shuffle(&mut roles);

    Ok(roles
        .into_iter()
        .enumerate()
        .map(|(index, role)| {
            let seat = Seat::new(index + 1);
            let word = match role {
                Role::Civilian => pair.civilian_word.clone(),
                Role::Undercover => pair.undercover_word.clone(),
                Role::MrWhite => MR_WHITE_MESSAGE.to_owned(),
            };
            let state = PlayerState {
                seat,
                name: prior_names.get(&seat).cloned().unwrap_or_default(),
                role,
                word,
                points: prior_points.get(&seat).copied().unwrap_or_default(),
                is_eliminated: false,
                has_viewed_once: false,
            };
            (seat, state)
        })
        .collect())
}
