//! Lineup generation: batting order and fielding assignments.
//!
//! The shuffle takes an injected picker so tests can drive it
//! deterministically; the browser entry point feeds it
//! `Math.random`.

#[cfg(test)]
#[path = "lineup_test.rs"]
mod lineup_test;

use crate::net::types::Player;

/// Defensive positions in conventional scorekeeping order (1 through 9).
pub const FIELD_POSITIONS: [&str; 9] = ["P", "C", "1B", "2B", "3B", "SS", "LF", "CF", "RF"];

/// One player assigned to one defensive position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAssignment {
    pub position: &'static str,
    pub player: Player,
}

/// A generated lineup: full batting order, the nine fielders, and
/// whoever is left on the bench.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lineup {
    pub batting_order: Vec<Player>,
    pub fielding: Vec<FieldAssignment>,
    pub bench: Vec<Player>,
}

/// Build a lineup from a shuffled copy of `players`. `pick(bound)`
/// must return a value in `0..bound`; out-of-range picks are clamped.
///
/// Fewer than nine players fills positions in order and leaves the
/// rest empty; extras beyond nine still bat and sit on the bench.
pub fn build_lineup(players: &[Player], mut pick: impl FnMut(usize) -> usize) -> Lineup {
    let mut order: Vec<Player> = players.to_vec();
    // Fisher-Yates.
    for i in (1..order.len()).rev() {
        let j = pick(i + 1).min(i);
        order.swap(i, j);
    }
    let fielding = FIELD_POSITIONS
        .iter()
        .zip(order.iter())
        .map(|(position, player)| FieldAssignment { position, player: player.clone() })
        .collect();
    let bench = order.iter().skip(FIELD_POSITIONS.len()).cloned().collect();
    Lineup { batting_order: order, fielding, bench }
}

/// Lineup from a browser-random shuffle. Outside the browser the order
/// is left as-is.
#[must_use]
pub fn random_lineup(players: &[Player]) -> Lineup {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        #[allow(clippy::cast_sign_loss)]
        build_lineup(players, |bound| (js_sys::Math::random() * bound as f64) as usize)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        build_lineup(players, |_| 0)
    }
}
