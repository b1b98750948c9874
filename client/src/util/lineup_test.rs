use super::*;

fn roster(count: usize) -> Vec<Player> {
    (0..count)
        .map(|i| Player {
            id: format!("p-{i}"),
            team_id: "t-1".to_owned(),
            name: format!("Player {i}"),
            jersey_number: None,
        })
        .collect()
}

/// Picker that always returns 0, reversing the tail into a rotation.
fn pick_zero(_bound: usize) -> usize {
    0
}

#[test]
fn every_player_bats_exactly_once() {
    let players = roster(12);
    let lineup = build_lineup(&players, pick_zero);
    assert_eq!(lineup.batting_order.len(), 12);
    let mut ids: Vec<&str> = lineup.batting_order.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 12, "shuffle must be a permutation");
}

#[test]
fn nine_fielders_and_the_rest_bench() {
    let players = roster(12);
    let lineup = build_lineup(&players, pick_zero);
    assert_eq!(lineup.fielding.len(), 9);
    assert_eq!(lineup.bench.len(), 3);
    let positions: Vec<&str> = lineup.fielding.iter().map(|a| a.position).collect();
    assert_eq!(positions, FIELD_POSITIONS.to_vec());
}

#[test]
fn short_roster_fills_positions_in_order() {
    let players = roster(5);
    let lineup = build_lineup(&players, pick_zero);
    assert_eq!(lineup.fielding.len(), 5);
    assert_eq!(lineup.fielding[0].position, "P");
    assert_eq!(lineup.fielding[4].position, "3B");
    assert!(lineup.bench.is_empty());
}

#[test]
fn empty_roster_builds_empty_lineup() {
    let lineup = build_lineup(&[], pick_zero);
    assert_eq!(lineup, Lineup::default());
}

#[test]
fn out_of_range_picks_are_clamped() {
    let players = roster(4);
    let lineup = build_lineup(&players, |bound| bound + 100);
    assert_eq!(lineup.batting_order.len(), 4);
    // Clamping to i makes every swap a no-op: original order preserved.
    let ids: Vec<&str> = lineup.batting_order.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-0", "p-1", "p-2", "p-3"]);
}

#[test]
fn identity_picker_preserves_order() {
    let players = roster(3);
    let lineup = build_lineup(&players, |bound| bound - 1);
    let ids: Vec<&str> = lineup.batting_order.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-0", "p-1", "p-2"]);
}
