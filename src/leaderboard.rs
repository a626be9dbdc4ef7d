//! Scoring and standings
//!
//! This module applies the fixed point deltas for each round outcome and
//! produces the standings view shown between rounds. Deltas go to every
//! player of the qualifying role, eliminated or not; the round state
//! machine guarantees each round is scored at most once.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    constants::scoring::{
        CIVILIAN_WIN_POINTS, MR_WHITE_GUESS_POINTS, MR_WHITE_WIN_POINTS, UNDERCOVER_WIN_POINTS,
    },
    player::{PlayerState, Role, Seat},
};

/// One row of the standings view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Position in the standings (1-indexed)
    pub position: usize,
    /// The seat this row belongs to
    pub seat: Seat,
    /// Stored player name, possibly empty
    pub name: String,
    /// Accumulated points
    pub points: u64,
}

/// Awards the civilian-win bonus to every civilian
///
/// Every player with the Civilian role receives the bonus, including
/// eliminated ones.
pub fn apply_civilian_win(players: &mut BTreeMap<Seat, PlayerState>) {
    award_role(players, Role::Civilian, CIVILIAN_WIN_POINTS);
}

/// Awards the impostor-win bonuses to the whole impostor side
///
/// Undercover players and Mr. White players receive different deltas, but
/// both roles are paid in full regardless of elimination status.
pub fn apply_impostor_win(players: &mut BTreeMap<Seat, PlayerState>) {
    award_role(players, Role::Undercover, UNDERCOVER_WIN_POINTS);
    award_role(players, Role::MrWhite, MR_WHITE_WIN_POINTS);
}

/// Awards the guess bonus to every Mr. White after a correct word guess
pub fn apply_mr_white_win(players: &mut BTreeMap<Seat, PlayerState>) {
    award_role(players, Role::MrWhite, MR_WHITE_GUESS_POINTS);
}

fn award_role(players: &mut BTreeMap<Seat, PlayerState>, role: Role, delta: u64) {
    for player in players.values_mut().filter(|p| p.role == role) {
        player.points += delta;
    }
}

/// Produces the standings sorted by points descending, seat ascending
///
/// Ties on points are broken by the lower seat number; positions are
/// 1-indexed.
pub fn standings(players: &BTreeMap<Seat, PlayerState>) -> Vec<Standing> {
    players
        .values()
        .sorted_by_key(|p| (std::cmp::Reverse(p.points), p.seat))
        .enumerate()
        .map(|(index, p)| Standing {
            position: index + 1,
            seat: p.seat,
            name: p.name.clone(),
            points: p.points,
        })
        .collect_vec()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn table(entries: &[(Role, u64, bool)]) -> BTreeMap<Seat, PlayerState> {
        entries
            .iter()
            .enumerate()
            .map(|(index, &(role, points, is_eliminated))| {
                let seat = Seat::new(index + 1);
                (
                    seat,
                    PlayerState {
                        seat,
                        name: format!("P{}", index + 1),
                        role,
                        word: String::new(),
                        points,
                        is_eliminated,
                        has_viewed_once: true,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_civilian_win_pays_whole_role() {
        let mut players = table(&[
            (Role::Civilian, 0, false),
            (Role::Civilian, 0, true),
            (Role::Undercover, 0, true),
        ]);
        apply_civilian_win(&mut players);

        assert_eq!(players[&Seat::new(1)].points, CIVILIAN_WIN_POINTS);
        assert_eq!(
            players[&Seat::new(2)].points,
            CIVILIAN_WIN_POINTS,
            "eliminated civilians are paid too"
        );
        assert_eq!(players[&Seat::new(3)].points, 0);
    }

    #[test]
    fn test_impostor_win_pays_both_roles() {
        let mut players = table(&[
            (Role::Civilian, 0, true),
            (Role::Undercover, 0, false),
            (Role::MrWhite, 0, true),
        ]);
        apply_impostor_win(&mut players);

        assert_eq!(players[&Seat::new(1)].points, 0);
        assert_eq!(players[&Seat::new(2)].points, UNDERCOVER_WIN_POINTS);
        assert_eq!(players[&Seat::new(3)].points, MR_WHITE_WIN_POINTS);
    }

    #[test]
    fn test_mr_white_win_pays_mr_white_only() {
        let mut players = table(&[
            (Role::Civilian, 0, false),
            (Role::Undercover, 0, false),
            (Role::MrWhite, 0, true),
        ]);
        apply_mr_white_win(&mut players);

        assert_eq!(players[&Seat::new(1)].points, 0);
        assert_eq!(players[&Seat::new(2)].points, 0);
        assert_eq!(players[&Seat::new(3)].points, MR_WHITE_GUESS_POINTS);
    }

    #[test]
    fn test_deltas_accumulate() {
        let mut players = table(&[(Role::Civilian, 5, false), (Role::Undercover, 3, false)]);
        apply_civilian_win(&mut players);
        assert_eq!(players[&Seat::new(1)].points, 5 + CIVILIAN_WIN_POINTS);
        assert_eq!(players[&Seat::new(2)].points, 3);
    }

    #[test]
    fn test_standings_sorted_points_then_seat() {
        let players = table(&[
            (Role::Civilian, 4, false),
            (Role::Civilian, 10, false),
            (Role::Undercover, 4, false),
            (Role::MrWhite, 0, false),
        ]);
        let standings = standings(&players);

        let order: Vec<usize> = standings.iter().map(|s| s.seat.number()).collect();
        assert_eq!(order, vec![2, 1, 3, 4], "ties break by ascending seat");
        assert_eq!(
            standings.iter().map(|s| s.position).collect_vec(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_standings_carry_names() {
        let players = table(&[(Role::Civilian, 1, false)]);
        let standings = standings(&players);
        assert_eq!(standings[0].name, "P1");
    }
}
