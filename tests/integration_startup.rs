//! Integration test to ensure a new game starts in a playable state.

use delve::{
    create_rng, is_reachable, Action, ActionOutcome, DelveResult, Direction, GameConfig, GameState, GameStatus,
    RenderLayer,
};

#[test]
fn test_basic_startup() -> DelveResult<()> {
    let state = GameState::new_game(GameConfig::default(), create_rng(12345))?;

    assert_eq!(state.depth, 1);
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.player_health(), (100, 100));
    assert_eq!(state.inventory.len(), 1);

    let player = state.player()?;
    let stairs = state
        .entity(state.stairs_id())
        .expect("floor has stairs");
    assert!(!state.grid.is_blocked(player.position));
    assert!(is_reachable(&state.grid, player.position, stairs.position));
    assert!(state.grid.is_explored(player.position));
    assert!(state.fov.visible_count() > 1);

    Ok(())
}

#[test]
fn test_population_respects_layers() -> DelveResult<()> {
    let state = GameState::new_game(GameConfig::default(), create_rng(99))?;

    for entity in &state.entities {
        if entity.fighter.is_some() && entity.id != state.player_id() {
            assert_eq!(entity.layer, RenderLayer::Actor);
            assert!(entity.ai.is_some());
            assert!(entity.blocks);
        }
        if entity.item.is_some() || entity.equipment.is_some() {
            assert_eq!(entity.layer, RenderLayer::Floor);
            assert!(entity.always_visible);
        }
    }
    Ok(())
}

#[test]
fn test_a_few_turns_of_play() -> DelveResult<()> {
    let mut state = GameState::new_game(GameConfig::default(), create_rng(2024))?;

    let directions = Direction::all();
    for turn in 0..40 {
        if state.status == GameStatus::Dead {
            break;
        }
        if state.is_level_up_pending() {
            state.choose_level_up(0)?;
        }
        let outcome = state.perform(Action::Move(directions[turn % directions.len()]))?;
        assert_eq!(outcome, ActionOutcome::TookTurn);

        let (hp, max_hp) = state.player_health();
        assert!(hp <= max_hp);
        assert!(hp >= 0);
    }
    assert!(!state.messages.is_empty());
    Ok(())
}
