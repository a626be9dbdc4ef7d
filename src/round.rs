//! Round state machine
//!
//! This module contains the core engine for one round of Undercover: the
//! explicit phase enum, the per-seat player map, the reveal and
//! elimination operations, the Mr. White guess flow, and the win-condition
//! evaluation that runs synchronously after every finalized elimination.
//!
//! A [`Round`] is an explicit state value: callers invoke operations on it
//! and re-render from the mutated state, there is no hidden global. Every
//! transition is a single match on [`Phase`].

use std::collections::BTreeMap;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{
    assign::{self, RoundConfig},
    leaderboard::{self, Standing},
    names, order,
    player::{PlayerState, Role, Seat},
    words::{self, WordPair},
};

/// The phase a round is in
///
/// `Setup` covers naming and word reveals; `InProgress` covers the
/// elimination loop; `AwaitingGuess` is the sub-state entered when a
/// Mr. White player is voted out and gets one guess before their
/// elimination is finalized; `Ended` is terminal until the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Players set names and reveal their words
    Setup,
    /// Elimination phase with a fixed speaking order
    InProgress,
    /// A voted-out Mr. White gets one guess at the civilian word
    AwaitingGuess {
        /// Seat of the Mr. White player whose elimination is pending
        seat: Seat,
    },
    /// The round has a declared winner
    Ended,
}

/// The declared winner of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// All impostors were eliminated
    CivilianWin,
    /// Civilians no longer outnumber the impostors
    ImpostorWin,
    /// A voted-out Mr. White guessed the civilian word
    MrWhiteWin,
}

impl Outcome {
    /// The win message announced for this outcome
    pub fn message(self) -> &'static str {
        match self {
            Outcome::CivilianWin => "Civilians win! All impostors have been eliminated.",
            Outcome::ImpostorWin => "Impostors win! They outnumber the civilians.",
            Outcome::MrWhiteWin => "Mr. White wins! The secret word was guessed.",
        }
    }
}

/// Errors that can occur while driving a round
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No player sits at that seat
    #[error("no player at that seat")]
    UnknownSeat,
    /// The operation is only valid before the round starts
    #[error("round already started")]
    AlreadyStarted,
    /// The operation is only valid after the round starts
    #[error("round not started yet")]
    NotStarted,
    /// The round already has a declared winner
    #[error("round already ended")]
    RoundEnded,
    /// The player has already been voted out; state is unchanged
    #[error("player already eliminated")]
    AlreadyEliminated,
    /// Some player is missing a name or has not viewed their word
    #[error("not all players are ready")]
    NotAllPlayersReady,
    /// A Mr. White guess must be resolved first
    #[error("a mr. white guess is pending")]
    GuessPending,
    /// No Mr. White guess is pending for that seat
    #[error("no mr. white guess is pending")]
    NoGuessPending,
    /// The player name was rejected
    #[error("invalid player name: {0}")]
    Name(#[from] names::Error),
    /// No eligible starting player could be chosen
    #[error(transparent)]
    Order(#[from] order::Error),
}

/// Errors that can occur when creating a round
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateError {
    /// The role composition is not playable
    #[error(transparent)]
    Config(#[from] assign::Error),
    /// No word pair could be drawn
    #[error(transparent)]
    Words(#[from] words::Error),
}

/// Word and role information revealed to a single player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reveal {
    /// The seat being revealed to
    pub seat: Seat,
    /// Stored player name, possibly empty
    pub name: String,
    /// The player's secret role
    pub role: Role,
    /// The word shown to the player, or the Mr. White message
    pub word: String,
}

/// What tapping a seat means in the current phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Selection {
    /// Before the round starts: open the name/word reveal flow
    Reveal(Reveal),
    /// After the round starts: ask for elimination confirmation
    ConfirmElimination {
        /// The seat up for elimination
        seat: Seat,
        /// Stored player name, possibly empty
        name: String,
    },
}

/// The result of confirming an elimination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Elimination {
    /// The elimination was finalized
    Eliminated {
        /// The eliminated seat
        seat: Seat,
        /// The revealed role of the eliminated player
        role: Role,
        /// Human-readable elimination notice
        notice: &'static str,
        /// Terminal outcome if this elimination ended the round
        outcome: Option<Outcome>,
    },
    /// The voted-out player is Mr. White and gets one guess first
    AwaitingGuess {
        /// Seat of the pending Mr. White player
        seat: Seat,
    },
}

/// The result of a Mr. White guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GuessResult {
    /// The guess matched the civilian word; Mr. White wins outright
    Correct,
    /// The guess missed; the elimination was finalized
    Incorrect {
        /// Terminal outcome if the finalized elimination ended the round
        outcome: Option<Outcome>,
    },
}

fn elimination_notice(role: Role) -> &'static str {
    match role {
        Role::Civilian => "A Civilian has been eliminated",
        Role::Undercover => "An undercover agent has been eliminated",
        Role::MrWhite => "Mr. White has been eliminated",
    }
}

/// Normalizes a guess for comparison against the civilian word
fn clean_guess(guess: &str) -> String {
    guess.trim().to_lowercase()
}

/// One round of Undercover from role assignment to a declared winner
///
/// Owns all per-seat state plus the active word pair, the phase, and the
/// terminal bookkeeping. Mutated in place by the operations below and
/// discarded (except points and names) when the next round begins.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// The configuration this round was dealt from
    config: RoundConfig,
    /// The active word pair
    pair: WordPair,
    /// Per-seat state, keyed by seat number
    players: BTreeMap<Seat, PlayerState>,
    /// Current phase
    phase: Phase,
    /// Speaking order fixed at round start; empty during setup
    speaking_order: Vec<Seat>,
    /// Declared winner, if any
    outcome: Option<Outcome>,
    /// Win message for the declared winner, if any
    win_message: Option<String>,
    /// Guard ensuring point deltas are applied at most once per round
    points_distributed: bool,
}

impl Round {
    /// Creates a round: draws a word pair and deals shuffled roles
    ///
    /// Names and points carry over from the prior maps keyed by seat;
    /// everything else starts fresh in the `Setup` phase.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is not playable or no word pair could
    /// be drawn; no partial state is created.
    pub fn create(
        config: RoundConfig,
        prior_names: &BTreeMap<Seat, String>,
        prior_points: &BTreeMap<Seat, u64>,
    ) -> Result<Self, CreateError> {
        let pair = words::pick_random_pair()?;
        let players = assign::assign(&config, &pair, prior_names, prior_points)?;

        Ok(Self {
            config,
            pair,
            players,
            phase: Phase::Setup,
            speaking_order: Vec::new(),
            outcome: None,
            win_message: None,
            points_distributed: false,
        })
    }

    /// The configuration this round was dealt from
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// The active word pair
    pub fn pair(&self) -> &WordPair {
        &self.pair
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Declared winner, if the round has ended
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Win message, if the round has ended
    pub fn win_message(&self) -> Option<&str> {
        self.win_message.as_deref()
    }

    /// Per-seat state, keyed by seat
    pub fn players(&self) -> &BTreeMap<Seat, PlayerState> {
        &self.players
    }

    /// Speaking order fixed at round start; empty during setup
    pub fn speaking_order(&self) -> &[Seat] {
        &self.speaking_order
    }

    /// Headcount of players still in the round, per role
    pub fn alive_counts(&self) -> EnumMap<Role, usize> {
        let mut counts = EnumMap::default();
        for player in self.players.values().filter(|p| p.is_alive()) {
            counts[player.role] += 1;
        }
        counts
    }

    /// Standings sorted by points descending, seat ascending
    pub fn standings(&self) -> Vec<Standing> {
        leaderboard::standings(&self.players)
    }

    fn player(&self, seat: Seat) -> Result<&PlayerState, Error> {
        self.players.get(&seat).ok_or(Error::UnknownSeat)
    }

    fn player_mut(&mut self, seat: Seat) -> Result<&mut PlayerState, Error> {
        self.players.get_mut(&seat).ok_or(Error::UnknownSeat)
    }

    /// Reveals a player's word and role, marking the seat as having viewed
    ///
    /// Only valid during setup. Repeat reveals are allowed and change
    /// nothing beyond the first viewed flag.
    ///
    /// # Errors
    ///
    /// Fails if the seat is unknown or the round has already started.
    pub fn reveal_word(&mut self, seat: Seat) -> Result<Reveal, Error> {
        if !matches!(self.phase, Phase::Setup) {
            return Err(Error::AlreadyStarted);
        }
        let player = self.player_mut(seat)?;
        player.has_viewed_once = true;
        Ok(Reveal {
            seat,
            name: player.name.clone(),
            role: player.role,
            word: player.word.clone(),
        })
    }

    /// Sets or edits a player's name during setup
    ///
    /// The name is trimmed and validated; re-saving overwrites the
    /// previous name.
    ///
    /// # Errors
    ///
    /// Fails if the seat is unknown, the round has started, or the name
    /// is rejected by validation.
    pub fn set_player_name(&mut self, seat: Seat, name: &str) -> Result<String, Error> {
        if !matches!(self.phase, Phase::Setup) {
            return Err(Error::AlreadyStarted);
        }
        let cleaned = names::clean_name(name)?;
        let player = self.player_mut(seat)?;
        player.name = cleaned.clone();
        Ok(cleaned)
    }

    /// Starts the elimination phase
    ///
    /// Every player must have a non-empty name and must have viewed their
    /// word at least once. On success the speaking order is fixed and the
    /// phase moves to `InProgress`.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadyStarted`] - the round left setup already
    /// * [`Error::NotAllPlayersReady`] - a name or reveal is missing
    /// * [`Error::Order`] - no eligible starter (internal invariant)
    pub fn start(&mut self) -> Result<(), Error> {
        if !matches!(self.phase, Phase::Setup) {
            return Err(Error::AlreadyStarted);
        }
        if self
            .players
            .values()
            .any(|p| p.name.is_empty() || !p.has_viewed_once)
        {
            return Err(Error::NotAllPlayersReady);
        }
        self.speaking_order = order::compute_order(&self.players)?;
        self.phase = Phase::InProgress;
        Ok(())
    }

    /// Resolves what tapping a seat means in the current phase
    ///
    /// During setup this opens the reveal flow (marking the seat as
    /// viewed); during the elimination phase it asks for confirmation.
    ///
    /// # Errors
    ///
    /// Fails without mutating state if the seat is unknown or already
    /// eliminated, a guess is pending, or the round has ended.
    pub fn select(&mut self, seat: Seat) -> Result<Selection, Error> {
        if self.player(seat)?.is_eliminated {
            return Err(Error::AlreadyEliminated);
        }
        match self.phase {
            Phase::Setup => Ok(Selection::Reveal(self.reveal_word(seat)?)),
            Phase::InProgress => Ok(Selection::ConfirmElimination {
                seat,
                name: self.player(seat)?.name.clone(),
            }),
            Phase::AwaitingGuess { .. } => Err(Error::GuessPending),
            Phase::Ended => Err(Error::RoundEnded),
        }
    }

    /// Confirms the elimination of a player
    ///
    /// For a Mr. White player this transitions to the `AwaitingGuess`
    /// sub-state instead of finalizing; for everyone else the elimination
    /// is applied and win conditions are evaluated immediately.
    ///
    /// # Errors
    ///
    /// Fails without mutating state if the round is not in the
    /// elimination phase or the player is already eliminated.
    pub fn confirm_eliminate(&mut self, seat: Seat) -> Result<Elimination, Error> {
        match self.phase {
            Phase::Setup => return Err(Error::NotStarted),
            Phase::AwaitingGuess { .. } => return Err(Error::GuessPending),
            Phase::Ended => return Err(Error::RoundEnded),
            Phase::InProgress => {}
        }
        let player = self.player(seat)?;
        if player.is_eliminated {
            return Err(Error::AlreadyEliminated);
        }

        if player.role == Role::MrWhite {
            self.phase = Phase::AwaitingGuess { seat };
            return Ok(Elimination::AwaitingGuess { seat });
        }

        let role = player.role;
        self.player_mut(seat)?.is_eliminated = true;
        let outcome = self.evaluate_win();
        Ok(Elimination::Eliminated {
            seat,
            role,
            notice: elimination_notice(role),
            outcome,
        })
    }

    /// Submits the pending Mr. White guess
    ///
    /// The guess is trimmed and compared case-insensitively against the
    /// civilian word. A correct guess ends the round with a Mr. White
    /// win; an incorrect guess finalizes the elimination and re-runs the
    /// normal win evaluation.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoGuessPending`] unless a guess is pending for
    /// exactly this seat.
    pub fn submit_guess(&mut self, seat: Seat, guess: &str) -> Result<GuessResult, Error> {
        let pending = self.pending_guess_seat(seat)?;

        if clean_guess(guess) == clean_guess(&self.pair.civilian_word) {
            if !self.points_distributed {
                leaderboard::apply_mr_white_win(&mut self.players);
                self.points_distributed = true;
            }
            self.outcome = Some(Outcome::MrWhiteWin);
            self.win_message = Some(Outcome::MrWhiteWin.message().to_owned());
            self.phase = Phase::Ended;
            return Ok(GuessResult::Correct);
        }

        Ok(GuessResult::Incorrect {
            outcome: self.finalize_pending_elimination(pending),
        })
    }

    /// Skips the pending Mr. White guess
    ///
    /// Equivalent to an incorrect guess: the elimination is finalized and
    /// win conditions are evaluated.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoGuessPending`] unless a guess is pending for
    /// exactly this seat.
    pub fn skip_guess(&mut self, seat: Seat) -> Result<GuessResult, Error> {
        let pending = self.pending_guess_seat(seat)?;
        Ok(GuessResult::Incorrect {
            outcome: self.finalize_pending_elimination(pending),
        })
    }

    fn pending_guess_seat(&self, seat: Seat) -> Result<Seat, Error> {
        match self.phase {
            Phase::AwaitingGuess { seat: pending } if pending == seat => Ok(pending),
            _ => Err(Error::NoGuessPending),
        }
    }

    fn finalize_pending_elimination(&mut self, seat: Seat) -> Option<Outcome> {
        if let Some(player) = self.players.get_mut(&seat) {
            player.is_eliminated = true;
        }
        self.phase = Phase::InProgress;
        self.evaluate_win()
    }

    /// Evaluates win conditions after a finalized elimination
    ///
    /// Impostor exhaustion is checked before civilian exhaustion, so a
    /// state satisfying both is a civilian win. Skips entirely once the
    /// round has ended or points were distributed, which makes repeated
    /// evaluation a no-op.
    fn evaluate_win(&mut self) -> Option<Outcome> {
        if matches!(self.phase, Phase::Ended) || self.points_distributed {
            return None;
        }

        let alive = self.alive_counts();
        let alive_civilians = alive[Role::Civilian];
        let alive_impostors = alive[Role::Undercover] + alive[Role::MrWhite];

        let outcome = if alive_impostors == 0 {
            leaderboard::apply_civilian_win(&mut self.players);
            Outcome::CivilianWin
        } else if alive_civilians <= 1 {
            leaderboard::apply_impostor_win(&mut self.players);
            Outcome::ImpostorWin
        } else {
            return None;
        };

        self.points_distributed = true;
        self.outcome = Some(outcome);
        self.win_message = Some(outcome.message().to_owned());
        self.phase = Phase::Ended;
        Some(outcome)
    }
}
