//! Integration tests for snapshots and the save file.

use delve::{
    create_rng, Action, DelveError, DelveResult, Direction, GameConfig, GameState, ItemKind, SaveStore,
};

#[test]
fn test_save_and_continue_mid_game() -> DelveResult<()> {
    let dir = tempfile::tempdir()?;
    let store = SaveStore::new(dir.path().join("savegame.json"));

    let mut state = GameState::new_game(GameConfig::default(), create_rng(404))?;
    for direction in [Direction::East, Direction::South, Direction::West] {
        state.perform(Action::Move(direction))?;
    }
    let player_pos = state.player()?.position;
    state.spawn_item(ItemKind::HealingPotion, player_pos);
    state.perform(Action::PickUp)?;

    store.save(&state.snapshot()?)?;
    let restored = GameState::restore(store.load()?, GameConfig::default(), create_rng(1))?;

    assert_eq!(restored.grid, state.grid);
    assert_eq!(restored.entities, state.entities);
    assert_eq!(restored.inventory, state.inventory);
    assert_eq!(restored.messages, state.messages);
    assert_eq!(restored.status, state.status);
    assert_eq!(restored.depth, state.depth);
    assert_eq!(restored.player()?.position, player_pos);
    assert!(restored.is_in_fov(player_pos));
    Ok(())
}

#[test]
fn test_explored_memory_survives_restore() -> DelveResult<()> {
    let state = GameState::new_game(GameConfig::default(), create_rng(8))?;
    let explored: Vec<_> = state.grid.positions().filter(|p| state.grid.is_explored(*p)).collect();
    assert!(!explored.is_empty());

    let restored = GameState::restore(state.snapshot()?, GameConfig::default(), create_rng(8))?;
    assert!(explored.iter().all(|p| restored.grid.is_explored(*p)));
    Ok(())
}

#[test]
fn test_missing_save_is_not_a_crash() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path().join("absent.json"));
    match store.load() {
        Err(DelveError::NoSaveGame) => {}
        other => panic!("expected NoSaveGame, got {:?}", other),
    }
}

#[test]
fn test_restore_rejects_missing_player() -> DelveResult<()> {
    let state = GameState::new_game(GameConfig::default(), create_rng(8))?;
    let mut snapshot = state.snapshot()?;
    snapshot.player_index = snapshot.entities.len() + 3;

    assert!(matches!(
        GameState::restore(snapshot, GameConfig::default(), create_rng(8)),
        Err(DelveError::InvalidState(_))
    ));
    Ok(())
}

#[test]
fn test_snapshot_json_has_indices_not_handles() -> DelveResult<()> {
    let state = GameState::new_game(GameConfig::default(), create_rng(8))?;
    let snapshot = state.snapshot()?;
    assert_eq!(snapshot.player_index, 0);
    assert_eq!(snapshot.stairs_index, snapshot.entities.len() - 1);

    let value = serde_json::to_value(&snapshot)?;
    assert_eq!(value["depth"], 1);
    assert_eq!(value["player_index"], 0);
    Ok(())
}
