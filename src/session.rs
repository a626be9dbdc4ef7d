//! Game session lifecycle
//!
//! A session spans multiple rounds at the same table. It owns the active
//! [`Round`], re-deals roles between rounds while carrying names and
//! points forward, and hands serialized snapshots to the presentation
//! layer. The session draws the line between the three lifecycle
//! operations: next round carries points, restart zeroes them, and a full
//! reset rebuilds the table from scratch.

use std::collections::BTreeMap;

use crate::{
    assign::RoundConfig,
    leaderboard::Standing,
    player::Seat,
    round::{CreateError, Round},
};

/// A multi-round game at one table
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GameSession {
    /// Configuration used to deal the active round
    config: RoundConfig,
    /// The active round
    round: Round,
}

impl GameSession {
    /// Creates a session and deals the first round
    ///
    /// # Errors
    ///
    /// Fails if the configuration is not playable.
    pub fn new(config: RoundConfig) -> Result<Self, CreateError> {
        let round = Round::create(config, &BTreeMap::new(), &BTreeMap::new())?;
        Ok(Self { config, round })
    }

    /// The configuration of the active round
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// The active round
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The active round, mutably, for driving state transitions
    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    /// Deals the next round: new roles and word, points and names carried
    ///
    /// The configuration may change between rounds (players joining or
    /// leaving); carryover stays keyed by seat.
    ///
    /// # Errors
    ///
    /// Fails if the new configuration is not playable; the current round
    /// is left untouched in that case.
    pub fn next_round(&mut self, config: RoundConfig) -> Result<(), CreateError> {
        let round = Round::create(config, &self.carried_names(), &self.carried_points())?;
        self.config = config;
        self.round = round;
        Ok(())
    }

    /// Restarts with new roles and all points reset to zero
    ///
    /// Names are kept; this is "try this configuration again" rather than
    /// a continuation of the running score.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is not playable; the current round is
    /// left untouched in that case.
    pub fn restart_round(&mut self, config: RoundConfig) -> Result<(), CreateError> {
        let round = Round::create(config, &self.carried_names(), &BTreeMap::new())?;
        self.config = config;
        self.round = round;
        Ok(())
    }

    /// Fully resets the table: new roles, no names, no points
    ///
    /// # Errors
    ///
    /// Fails if the configuration is not playable; the current round is
    /// left untouched in that case.
    pub fn reset(&mut self, config: RoundConfig) -> Result<(), CreateError> {
        let round = Round::create(config, &BTreeMap::new(), &BTreeMap::new())?;
        self.config = config;
        self.round = round;
        Ok(())
    }

    /// Standings of the active round, sorted by points then seat
    pub fn standings(&self) -> Vec<Standing> {
        self.round.standings()
    }

    /// Serializes the active round as a JSON snapshot for the caller
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never
    /// happen with the default JSON serializer for well-formed data.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.round).expect("default serializer cannot fail")
    }

    fn carried_names(&self) -> BTreeMap<Seat, String> {
        self.round
            .players()
            .values()
            .filter(|p| !p.name.is_empty())
            .map(|p| (p.seat, p.name.clone()))
            .collect()
    }

    fn carried_points(&self) -> BTreeMap<Seat, u64> {
        self.round
            .players()
            .values()
            .map(|p| (p.seat, p.points))
            .collect()
    }
}
