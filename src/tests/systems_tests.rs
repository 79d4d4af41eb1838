#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::components::{
        Active, GameState, Input, Intent, Next, Phase, Piece, Position, TetrominoType,
    };
    use crate::systems::*;
    use crate::tests::test_utils::{
        GRAY, create_running_world, create_test_world, fill_row, replace_active,
    };
    use bevy_ecs::prelude::*;

    fn queue(world: &mut World, intent: Intent) {
        world.resource_mut::<Input>().queue(intent);
    }

    fn active(world: &mut World) -> Piece {
        active_piece(world).expect("an active piece").1
    }

    #[test]
    fn test_spawn_piece() {
        let mut world = create_test_world();
        spawn_piece(&mut world);

        let active_count = world.query::<&Active>().iter(&world).count();
        let next_count = world.query::<&Next>().iter(&world).count();
        assert_eq!(active_count, 1);
        assert_eq!(next_count, 1);

        let piece = active(&mut world);
        assert_eq!(piece.position, Position { x: 5, y: 0 });
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_spawn_promotes_next_piece() {
        let mut world = create_running_world();
        let (active_entity, _) = active_piece(&mut world).unwrap();
        let (next_entity, queued) = next_piece(&mut world).unwrap();

        world.despawn(active_entity);
        spawn_piece(&mut world);

        let (promoted_entity, promoted) = active_piece(&mut world).unwrap();
        assert_eq!(promoted_entity, next_entity);
        assert_eq!(promoted, queued);
        assert_eq!(world.query::<&Piece>().iter(&world).count(), 2);
    }

    #[test]
    fn test_input_moves_piece() {
        let mut world = create_running_world();
        replace_active(&mut world, Piece::at(TetrominoType::O, 5, 10));

        queue(&mut world, Intent::MoveLeft);
        input_system(&mut world);
        assert_eq!(active(&mut world).position, Position { x: 4, y: 10 });

        queue(&mut world, Intent::MoveRight);
        input_system(&mut world);
        assert_eq!(active(&mut world).position, Position { x: 5, y: 10 });

        queue(&mut world, Intent::SoftDrop);
        input_system(&mut world);
        assert_eq!(active(&mut world).position, Position { x: 5, y: 11 });

        // Intent was consumed
        input_system(&mut world);
        assert_eq!(active(&mut world).position, Position { x: 5, y: 11 });
    }

    #[test]
    fn test_input_rolls_back_at_wall() {
        let mut world = create_running_world();
        replace_active(&mut world, Piece::at(TetrominoType::O, 1, 10));

        queue(&mut world, Intent::MoveLeft);
        input_system(&mut world);

        assert_eq!(active(&mut world).position, Position { x: 1, y: 10 });
        assert_eq!(world.resource::<Input>().pending(), None);
    }

    #[test]
    fn test_soft_drop_rolls_back_at_floor() {
        let mut world = create_running_world();
        replace_active(&mut world, Piece::at(TetrominoType::O, 5, 20));

        queue(&mut world, Intent::SoftDrop);
        input_system(&mut world);

        assert_eq!(active(&mut world).position.y, 20);
        assert_eq!(world.resource::<GameState>().phase, Phase::Falling);
    }

    #[test]
    fn test_rotation_applies_and_reverts() {
        let mut world = create_running_world();
        replace_active(&mut world, Piece::at(TetrominoType::I, 5, 10));

        queue(&mut world, Intent::RotateCw);
        input_system(&mut world);
        assert_eq!(active(&mut world).rotation, 1);

        // Horizontal I at x = 0 would poke out of the left wall
        replace_active(&mut world, Piece::at(TetrominoType::I, 0, 10));
        queue(&mut world, Intent::RotateCw);
        input_system(&mut world);
        assert_eq!(active(&mut world).rotation, 0);
    }

    #[test]
    fn test_rotation_blocked_by_locked_cell() {
        let mut world = create_running_world();
        // Horizontal I at (5, 10) would cover (3..=6, 7)
        {
            let mut board = world.resource_mut::<Board>();
            board.locked.insert(3, 7, GRAY);
            board.refresh();
        }
        replace_active(&mut world, Piece::at(TetrominoType::I, 5, 10));

        queue(&mut world, Intent::RotateCw);
        input_system(&mut world);
        assert_eq!(active(&mut world).rotation, 0);
    }

    #[test]
    fn test_quit_intent_is_ignored_by_engine() {
        let mut world = create_running_world();
        let before = active(&mut world);

        queue(&mut world, Intent::Quit);
        input_system(&mut world);

        assert_eq!(active(&mut world), before);
    }

    #[test]
    fn test_gravity_waits_for_interval() {
        let mut world = create_running_world();
        let start = active(&mut world).position;

        gravity_system(&mut world, 100.0);
        assert_eq!(active(&mut world).position, start);

        gravity_system(&mut world, 200.0);
        assert_eq!(active(&mut world).position.y, start.y + 1);
    }

    #[test]
    fn test_gravity_blocked_starts_locking() {
        let mut world = create_running_world();
        replace_active(&mut world, Piece::at(TetrominoType::O, 5, 20));

        gravity_system(&mut world, 300.0);

        assert_eq!(active(&mut world).position.y, 20);
        assert_eq!(world.resource::<GameState>().phase, Phase::Locking);
    }

    #[test]
    fn test_lock_fills_last_gap_and_scores() {
        let mut world = create_running_world();
        {
            let mut board = world.resource_mut::<Board>();
            fill_row(&mut board.locked, 19, &[0]);
            board.refresh();
        }
        replace_active(&mut world, Piece::at(TetrominoType::I, 0, 20));
        let queued = next_piece(&mut world).unwrap().1;
        world.resource_mut::<GameState>().set_phase(Phase::Locking);

        lock_system(&mut world);

        let state = world.resource::<GameState>();
        assert_eq!(state.score, 10);
        assert_eq!(state.lines_cleared, 1);
        assert_eq!(state.phase, Phase::Falling);

        let board = world.resource::<Board>();
        assert_eq!(board.locked.len(), 3);
        for row in 17..=19 {
            assert_eq!(board.locked.get(0, row), Some(TetrominoType::I.color()));
        }

        assert_eq!(active(&mut world), queued);
        assert!(next_piece(&mut world).is_some());
    }

    #[test]
    fn test_lock_without_clear_keeps_score() {
        let mut world = create_running_world();
        replace_active(&mut world, Piece::at(TetrominoType::O, 5, 20));
        world.resource_mut::<GameState>().set_phase(Phase::Locking);

        lock_system(&mut world);

        assert_eq!(world.resource::<GameState>().score, 0);
        let board = world.resource::<Board>();
        assert_eq!(board.locked.len(), 4);
        assert!(board.locked.contains(4, 19));
        assert!(board.locked.contains(5, 18));
    }

    #[test]
    fn test_lock_at_top_ends_game() {
        let mut world = create_running_world();
        // O at y = 2 covers rows 0 and 1
        replace_active(&mut world, Piece::at(TetrominoType::O, 5, 2));
        world.resource_mut::<GameState>().set_phase(Phase::Locking);

        lock_system(&mut world);

        assert!(world.resource::<Board>().locked.contains(4, 0));
        assert_eq!(world.resource::<GameState>().phase, Phase::GameOver);
    }

    #[test]
    fn test_lock_system_idle_while_falling() {
        let mut world = create_running_world();
        lock_system(&mut world);
        assert!(world.resource::<Board>().locked.is_empty());
    }

    #[test]
    fn test_intent_applies_in_locking_tick() {
        let mut world = create_running_world();
        replace_active(&mut world, Piece::at(TetrominoType::O, 5, 20));
        queue(&mut world, Intent::MoveRight);

        game_tick_system(&mut world, 300.0);

        let board = world.resource::<Board>();
        assert!(board.locked.contains(5, 19));
        assert!(board.locked.contains(6, 19));
        assert!(!board.locked.contains(4, 19));
    }

    #[test]
    fn test_tick_does_nothing_after_game_over() {
        let mut world = create_running_world();
        world.resource_mut::<GameState>().set_phase(Phase::GameOver);
        let before = active(&mut world);

        game_tick_system(&mut world, 1000.0);

        assert_eq!(active(&mut world), before);
        assert!(world.resource::<GameState>().fall_timer_ms.abs() < f32::EPSILON);
    }

    #[test]
    fn test_tick_refreshes_snapshot() {
        let mut world = create_running_world();
        world.resource_mut::<Board>().locked.insert(2, 15, GRAY);

        game_tick_system(&mut world, 1.0);

        assert_eq!(world.resource::<Board>().grid.cell(2, 15), Some(GRAY));
    }
}
