//! Move resolution tests - sliding, merging and the one-merge-per-tile rule

use tile_merge::core::{GameSession, SessionConfig};
use tile_merge::types::{Direction, GameEvent, MoveBatch, Position, SessionState};

fn p(x: u16, y: u16) -> Position {
    Position::new(x, y)
}

fn session(layout: &[(Position, u32)]) -> GameSession {
    GameSession::with_tiles(SessionConfig::default(), 2024, layout).unwrap()
}

fn value_at(session: &GameSession, cell: Position) -> Option<u32> {
    session.tile_at(cell).map(|t| t.value)
}

fn moved_batch(events: &[GameEvent]) -> MoveBatch {
    events
        .iter()
        .find_map(|e| match e {
            GameEvent::Moved(batch) => Some(batch.clone()),
            _ => None,
        })
        .expect("move should emit a batch")
}

/// Resolve and settle a move. The follow-up spawn lands on a random cell, so
/// callers filter spawned cells out with [`spawned_cells`].
fn play(session: &mut GameSession, dir: Direction) -> Vec<GameEvent> {
    assert!(session.request_move(dir));
    assert!(session.animations_complete());
    session.take_events()
}

fn spawned_cells(events: &[GameEvent]) -> Vec<Position> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Spawned(s) => Some(s.cell),
            _ => None,
        })
        .collect()
}

/// Values of row `y` ignoring cells that were filled by spawns
fn row(session: &GameSession, y: u16, spawned: &[Position]) -> Vec<Option<u32>> {
    (0..session.grid().width())
        .map(|x| {
            let cell = p(x, y);
            if spawned.contains(&cell) {
                None
            } else {
                value_at(session, cell)
            }
        })
        .collect()
}

#[test]
fn test_two_equal_tiles_merge_left() {
    let mut s = session(&[(p(0, 0), 2), (p(1, 0), 2)]);
    let events = play(&mut s, Direction::Left);
    let spawned = spawned_cells(&events);

    assert_eq!(value_at(&s, p(0, 0)), Some(4));
    assert!(spawned.contains(&p(1, 0)) || s.grid().is_empty_at(p(1, 0)));
    // One merged tile plus one spawn.
    assert_eq!(s.tiles().len(), 2);
}

#[test]
fn test_three_in_a_row_merge_once() {
    let mut s = session(&[(p(0, 0), 2), (p(1, 0), 2), (p(2, 0), 2)]);
    let events = play(&mut s, Direction::Left);
    let spawned = spawned_cells(&events);

    assert_eq!(
        row(&s, 0, &spawned),
        vec![Some(4), Some(2), None, None]
    );
    assert!(spawned.contains(&p(2, 0)) || s.grid().is_empty_at(p(2, 0)));
}

#[test]
fn test_four_in_a_row_make_two_pairs() {
    let mut s = session(&[(p(0, 1), 2), (p(1, 1), 2), (p(2, 1), 2), (p(3, 1), 2)]);
    let events = play(&mut s, Direction::Left);
    let spawned = spawned_cells(&events);

    assert_eq!(row(&s, 1, &spawned), vec![Some(4), Some(4), None, None]);
}

#[test]
fn test_merged_tile_does_not_merge_again() {
    // 2 2 4: the fresh 4 must not swallow the trailing 4 in the same move.
    let mut s = session(&[(p(0, 2), 2), (p(1, 2), 2), (p(2, 2), 4)]);
    let events = play(&mut s, Direction::Left);
    let spawned = spawned_cells(&events);

    assert_eq!(row(&s, 2, &spawned), vec![Some(4), Some(4), None, None]);
}

#[test]
fn test_three_in_a_row_merge_right() {
    let mut s = session(&[(p(0, 0), 2), (p(1, 0), 2), (p(2, 0), 2)]);
    let events = play(&mut s, Direction::Right);
    let spawned = spawned_cells(&events);

    // The tile nearest the right edge is processed first and receives the merge.
    assert_eq!(row(&s, 0, &spawned), vec![None, None, Some(2), Some(4)]);
}

#[test]
fn test_column_merges_up_and_down() {
    let mut up = session(&[(p(0, 0), 2), (p(0, 1), 2), (p(0, 2), 2)]);
    let events = play(&mut up, Direction::Up);
    let spawned = spawned_cells(&events);
    assert_eq!(value_at(&up, p(0, 3)), Some(4));
    assert_eq!(value_at(&up, p(0, 2)), Some(2));
    assert!(spawned.contains(&p(0, 1)) || up.grid().is_empty_at(p(0, 1)));
    assert!(spawned.contains(&p(0, 0)) || up.grid().is_empty_at(p(0, 0)));

    let mut down = session(&[(p(2, 1), 8), (p(2, 3), 8)]);
    play(&mut down, Direction::Down);
    assert_eq!(value_at(&down, p(2, 0)), Some(16));
}

#[test]
fn test_single_tile_slides_to_far_edge() {
    for (dir, end) in [
        (Direction::Left, p(0, 1)),
        (Direction::Right, p(3, 1)),
        (Direction::Up, p(1, 3)),
        (Direction::Down, p(1, 0)),
    ] {
        let mut s = session(&[(p(1, 1), 2)]);
        assert!(s.request_move(dir));
        let tile = *s.tiles().iter().next().unwrap();
        assert_eq!(tile.position, end, "sliding {dir}");
        assert_eq!(s.grid().occupant_at(end), Some(tile.id));
        assert_eq!(s.grid().occupied_count(), 1);
    }
}

#[test]
fn test_different_values_block() {
    let mut s = session(&[(p(2, 0), 2), (p(3, 0), 4)]);
    let events = play(&mut s, Direction::Left);
    let spawned = spawned_cells(&events);

    assert_eq!(row(&s, 0, &spawned), vec![Some(2), Some(4), None, None]);
}

#[test]
fn test_gap_between_equal_tiles_still_merges() {
    let mut s = session(&[(p(0, 3), 32), (p(3, 3), 32)]);
    play(&mut s, Direction::Left);
    assert_eq!(value_at(&s, p(0, 3)), Some(64));
}

#[test]
fn test_move_batch_describes_slides_and_merges() {
    let mut s = session(&[(p(0, 0), 2), (p(1, 0), 2), (p(2, 0), 2)]);
    assert!(s.request_move(Direction::Left));
    let batch = moved_batch(&s.take_events());

    assert_eq!(batch.direction, Direction::Left);
    assert_eq!(batch.placements.len(), 3);
    // Processing order is x ascending for a left move.
    let froms: Vec<Position> = batch.placements.iter().map(|m| m.from).collect();
    assert_eq!(froms, vec![p(0, 0), p(1, 0), p(2, 0)]);
    let tos: Vec<Position> = batch.placements.iter().map(|m| m.to).collect();
    assert_eq!(tos, vec![p(0, 0), p(0, 0), p(1, 0)]);

    assert_eq!(batch.merges.len(), 1);
    let merge = batch.merges[0];
    assert_eq!(merge.cell, p(0, 0));
    assert_eq!(merge.value, 4);
    assert!(!s.tiles().contains(merge.survivor));

    // The survivor appears only once the animations settle.
    assert!(s.animations_complete());
    let events = s.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::MergeSettled(t) if t.tile == merge.survivor && t.cell == p(0, 0) && t.value == 4
    )));
    assert_eq!(s.tile(merge.survivor).map(|t| t.value), Some(4));
    for absorbed in merge.absorbed {
        assert!(s.tile(absorbed).is_none());
    }
}

#[test]
fn test_move_without_change_still_spawns() {
    let mut s = session(&[(p(0, 0), 2)]);
    let events = play(&mut s, Direction::Left);

    assert_eq!(spawned_cells(&events).len(), 1);
    assert_eq!(s.tiles().len(), 2);
    assert_eq!(s.state(), SessionState::WaitingInput);
}
