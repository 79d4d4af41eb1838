use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::board::Board;
use crate::components::{Active, GameState, Input, Intent, Next, Phase, Piece, PieceRng};

/// The piece the player is steering, if any.
pub fn active_piece(world: &mut World) -> Option<(Entity, Piece)> {
    let mut query = world.query_filtered::<(Entity, &Piece), With<Active>>();
    query.iter(world).next().map(|(entity, piece)| (entity, *piece))
}

/// The queued piece shown in the preview, if any.
pub fn next_piece(world: &mut World) -> Option<(Entity, Piece)> {
    let mut query = world.query_filtered::<(Entity, &Piece), With<Next>>();
    query.iter(world).next().map(|(entity, piece)| (entity, *piece))
}

fn store_piece(world: &mut World, entity: Entity, piece: Piece) {
    if let Some(mut current) = world.get_mut::<Piece>(entity) {
        *current = piece;
    }
}

/// Promotes the queued piece to active (or draws one if none is queued)
/// and queues a freshly drawn next piece.
pub fn spawn_piece(world: &mut World) {
    if let Some((entity, piece)) = next_piece(world) {
        world.entity_mut(entity).remove::<Next>().insert(Active);
        debug!("Spawned {} piece", piece.kind.name());
    } else {
        let kind = world.resource_mut::<PieceRng>().next_kind();
        world.spawn((Piece::new(kind), Active));
        debug!("Spawned {} piece", kind.name());
    }

    let next_kind = world.resource_mut::<PieceRng>().next_kind();
    world.spawn((Piece::new(next_kind), Next));
}

/// Advances the pacing timers and lets the active piece fall one row when due.
/// A blocked fall below the top edge moves the engine to [`Phase::Locking`].
pub fn gravity_system(world: &mut World, delta_ms: f32) {
    let should_drop = world.resource_mut::<GameState>().advance_timers(delta_ms);
    if !should_drop {
        return;
    }

    let Some((entity, mut piece)) = active_piece(world) else {
        debug!("No active piece, spawning a new one");
        spawn_piece(world);
        return;
    };

    piece.translate(0, 1);
    let valid = world.resource::<Board>().grid.is_valid_position(&piece);
    if !valid && piece.position.y > 0 {
        piece.translate(0, -1);
        world.resource_mut::<GameState>().set_phase(Phase::Locking);
    }

    trace!(
        "Piece {} at ({}, {})",
        piece.kind.name(),
        piece.position.x,
        piece.position.y
    );
    store_piece(world, entity, piece);
}

/// Applies the pending intent to the active piece, keeping the old
/// placement when the new one is not valid.
pub fn input_system(world: &mut World) {
    let Some(intent) = world.resource_mut::<Input>().take() else {
        return;
    };

    let Some((entity, piece)) = active_piece(world) else {
        return;
    };

    let mut candidate = piece;
    match intent {
        Intent::MoveLeft => candidate.translate(-1, 0),
        Intent::MoveRight => candidate.translate(1, 0),
        Intent::SoftDrop => candidate.translate(0, 1),
        Intent::RotateCw => candidate.rotate(1),
        Intent::Quit => return,
    }

    if world.resource::<Board>().grid.is_valid_position(&candidate) {
        store_piece(world, entity, candidate);
    } else {
        trace!("Rejected {intent:?}");
    }
}

/// Settles the active piece, clears full rows, scores them and brings in
/// the next piece. Ends the game once a settled cell reaches the top row.
pub fn lock_system(world: &mut World) {
    if world.resource::<GameState>().phase != Phase::Locking {
        return;
    }

    let Some((entity, piece)) = active_piece(world) else {
        world.resource_mut::<GameState>().set_phase(Phase::Falling);
        return;
    };

    let grid = {
        let mut board = world.resource_mut::<Board>();
        let board = &mut *board;
        let grid = board.grid.overlaid(&piece);
        board.locked.lock(&piece);
        grid
    };

    // Only held while the rows below are cleared; callers see Falling or GameOver
    world
        .resource_mut::<GameState>()
        .set_phase(Phase::RowClearing);

    let cleared = world.resource_mut::<Board>().locked.clear_full_rows(&grid);
    if cleared > 0 {
        info!("Cleared {cleared} rows");
    }
    world.resource_mut::<GameState>().record_cleared_rows(cleared);

    world.despawn(entity);
    spawn_piece(world);

    let lost = world.resource::<Board>().locked.has_reached_top();
    let mut game_state = world.resource_mut::<GameState>();
    if lost {
        info!("Game over with score {}", game_state.score);
        game_state.set_phase(Phase::GameOver);
    } else {
        game_state.set_phase(Phase::Falling);
    }
}

/// One engine step: snapshot, gravity, player intent, then lock and clear.
pub fn game_tick_system(world: &mut World, delta_ms: f32) {
    if world.resource::<GameState>().is_game_over() {
        return;
    }

    world.resource_mut::<Board>().refresh();
    gravity_system(world, delta_ms);
    input_system(world);
    lock_system(world);
}
