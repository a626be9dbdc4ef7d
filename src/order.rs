//! Speaking order for the elimination phase
//!
//! The order is a rotation of the ascending seat sequence, started at a
//! uniformly chosen player who is not Mr. White. Mr. White must never
//! speak first because hearing another player's clue would hand them the
//! word; everyone else keeps their relative table order.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::player::{PlayerState, Role, Seat};

/// Errors that can occur when computing the speaking order
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Every seat holds Mr. White, so no one may start
    ///
    /// Unreachable when the configuration guards hold; treated as an
    /// internal invariant violation.
    #[error("no eligible starting player")]
    NoEligibleStarter,
}

/// Computes the speaking order as a rotation of ascending seats
///
/// Picks a uniformly random non-Mr.-White seat as the starter and rotates
/// the full ascending seat sequence to begin there. For seats
/// `[1, 2, 3, 4, 5]` and starter 3 the order is `[3, 4, 5, 1, 2]`.
///
/// # Errors
///
/// Returns [`Error::NoEligibleStarter`] if no seat is eligible to start.
pub fn compute_order(players: &BTreeMap<Seat, PlayerState>) -> Result<Vec<Seat>, Error> {
    let eligible = players
        .values()
        .filter(|p| p.role != Role::MrWhite)
        .map(|p| p.seat)
        .collect_vec();

    let starter = fastrand::choice(eligible).ok_or(Error::NoEligibleStarter)?;

    let seats = players.keys().copied().collect_vec();
    let start_index = seats
        .iter()
        .position(|&s| s == starter)
        .ok_or(Error::NoEligibleStarter)?;

    Ok(seats[start_index..]
        .iter()
        .chain(seats[..start_index].iter())
        .copied()
        .collect_vec())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::player::Role;

    fn table(roles: &[Role]) -> BTreeMap<Seat, PlayerState> {
        roles
            .iter()
            .enumerate()
            .map(|(index, &role)| {
                let seat = Seat::new(index + 1);
                (
                    seat,
                    PlayerState {
                        seat,
                        name: String::new(),
                        role,
                        word: String::new(),
                        points: 0,
                        is_eliminated: false,
                        has_viewed_once: false,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_order_is_a_rotation() {
        let players = table(&[
            Role::Civilian,
            Role::Civilian,
            Role::Civilian,
            Role::Undercover,
            Role::MrWhite,
        ]);

        for _ in 0..20 {
            let order = compute_order(&players).unwrap();
            assert_eq!(order.len(), 5);

            // Read cyclically, the order must be the ascending sequence.
            let start = order[0].number();
            for (offset, seat) in order.iter().enumerate() {
                let expected = (start - 1 + offset) % 5 + 1;
                assert_eq!(seat.number(), expected);
            }
        }
    }

    #[test]
    fn test_mr_white_never_starts() {
        let players = table(&[Role::MrWhite, Role::Civilian, Role::Undercover]);
        for _ in 0..50 {
            let order = compute_order(&players).unwrap();
            assert_ne!(order[0], Seat::new(1));
        }
    }

    #[test]
    fn test_no_eligible_starter() {
        let players = table(&[Role::MrWhite, Role::MrWhite]);
        assert_eq!(compute_order(&players), Err(Error::NoEligibleStarter));
    }

    #[test]
    fn test_single_eligible_starter() {
        let players = table(&[Role::MrWhite, Role::Civilian, Role::MrWhite]);
        let order = compute_order(&players).unwrap();
        assert_eq!(
            order,
            vec![Seat::new(2), Seat::new(3), Seat::new(1)],
            "order must rotate to the only eligible starter"
        );
    }
}
