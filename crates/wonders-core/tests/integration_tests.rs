//! Integration tests for wonders-core
//!
//! These tests drive the grid, the user store and the main queue together
//! the way a front end does.

use std::time::Duration;

use wonders_core::grid::{CellKind, PLAYER_SLOTS};
use wonders_core::{
    FileBackend, GridEdit, LoadSequence, MainQueue, MemoryBackend, ScoreGrid, ScoreType, User,
    UserBackend, UserStore, load_then_assign,
};

/// Column totals always match the scores in the column
mod total_tests {
    use super::*;

    fn expected_total(grid: &ScoreGrid, player: usize) -> i64 {
        ScoreType::scoring()
            .filter_map(|category| {
                let index = grid.index_of(category, player).unwrap();
                grid.cell(index).unwrap().score()
            })
            .sum()
    }

    #[test]
    fn test_totals_follow_any_edit_sequence() {
        let mut grid = ScoreGrid::new();
        let inputs = ["3", "-1", "x", "12", "", "7", "+2", "0", "1e3"];
        let categories: Vec<ScoreType> = ScoreType::scoring().collect();

        // Deterministic walk over cells and inputs
        let mut seed: usize = 17;
        for _ in 0..300 {
            seed = (seed * 31 + 7) % 1009;
            let category = categories[seed % categories.len()];
            let player = (seed / 7) % PLAYER_SLOTS;
            let text = inputs[(seed / 3) % inputs.len()];

            let index = grid.index_of(category, player).unwrap();
            grid.set_score(index, text).unwrap();

            let total = grid.total(player).unwrap();
            assert_eq!(total, expected_total(&grid, player));
            assert_eq!(grid.total_text(player).unwrap(), total.to_string());
        }
    }

    #[test]
    fn test_scenario_army_and_coins() {
        let mut grid = ScoreGrid::new();
        grid.set_score(grid.index_of(ScoreType::Army, 0).unwrap(), "5")
            .unwrap();
        grid.set_score(grid.index_of(ScoreType::Coins, 0).unwrap(), "3")
            .unwrap();
        assert_eq!(grid.total_text(0).unwrap(), "8");
    }

    #[test]
    fn test_scenario_non_numeric() {
        let mut grid = ScoreGrid::new();
        let index = grid.index_of(ScoreType::Army, 1).unwrap();
        grid.set_score(index, "abc").unwrap();
        assert_eq!(grid.cell(index).unwrap().text(), Some("abc"));
        assert_eq!(grid.total_text(1).unwrap(), "0");
    }

    #[test]
    fn test_edits_in_one_column_leave_others() {
        let mut grid = ScoreGrid::new();
        grid.set_score(grid.index_of(ScoreType::Yellow, 2).unwrap(), "4")
            .unwrap();
        for player in (0..PLAYER_SLOTS).filter(|&p| p != 2) {
            assert_eq!(grid.total_text(player).unwrap(), "");
        }
    }
}

/// Name edits and the user store
mod user_tests {
    use super::*;

    #[test]
    fn test_name_edits_persist_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let mut grid = ScoreGrid::new();
        let mut store = UserStore::new(FileBackend::new(&path));

        for (player, name) in ["Ana", "Ben", "Ana"].into_iter().enumerate() {
            let edit = GridEdit::Name {
                index: grid.index_of(ScoreType::People, player).unwrap(),
                text: name.to_string(),
            };
            grid.apply(edit, &mut store).unwrap();
        }

        let mut reopened = UserStore::new(FileBackend::new(&path));
        assert_eq!(
            reopened.load_users(),
            vec![User::new("Ana"), User::new("Ben")]
        );
    }

    #[test]
    fn test_name_edit_keeps_stored_players() {
        let backend = MemoryBackend::with_value("users", serde_json::json!(["Zed", "Bob"]));
        let mut store = UserStore::new(backend.clone());
        let mut grid = ScoreGrid::new();

        // Refresh the cache before editing, as the name editor does
        store.load_users();
        let index = grid.index_of(ScoreType::People, 0).unwrap();
        grid.set_name(index, "Ana", &mut store).unwrap();
        grid.set_name(index, "Bob", &mut store).unwrap();

        assert_eq!(
            backend.get("users").unwrap(),
            Some(serde_json::json!(["Zed", "Bob", "Ana"]))
        );
    }

    #[test]
    fn test_load_empty_backend_returns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UserStore::new(FileBackend::new(dir.path().join("none.json")));
        assert!(store.load_users().is_empty());
    }

    #[test]
    fn test_corrupt_file_reads_as_no_users() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{ not json").unwrap();
        let mut store = UserStore::new(FileBackend::new(&path));
        assert!(store.load_users().is_empty());
    }

    #[test]
    fn test_assign_fewer_users_than_slots() {
        let mut grid = ScoreGrid::new();
        let mut store = UserStore::new(MemoryBackend::new());
        let last = grid.index_of(ScoreType::People, PLAYER_SLOTS - 1).unwrap();
        grid.set_name(last, "Zed", &mut store).unwrap();

        grid.assign_users(&[User::new("Ana"), User::new("Ben"), User::new("Cy")]);

        let names: Vec<&str> = grid.players().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["Ana", "Ben", "Cy", "", "", "", "Zed"]);
    }

    #[test]
    fn test_store_writes_full_list() {
        let backend = MemoryBackend::new();
        let mut store = UserStore::new(backend.clone());
        store.add_user(User::new("Ana")).unwrap();
        store.add_user(User::new("Ben")).unwrap();
        store.add_user(User::new("Ana")).unwrap();

        let stored = backend.get("users").unwrap().unwrap();
        assert_eq!(stored, serde_json::json!(["Ana", "Ben"]));
    }
}

/// Asynchronous loads reach the grid through the main queue
mod dispatch_tests {
    use super::*;

    #[test]
    fn test_loaded_users_wait_for_the_grid_thread() {
        let backend = MemoryBackend::with_value("users", serde_json::json!(["Ana", "Ben"]));
        let store = UserStore::new(backend).into_shared();
        let (queue, dispatcher) = MainQueue::new();
        let mut grid = ScoreGrid::new();

        let loads = LoadSequence::new();
        let id = load_then_assign(store, Vec::new(), dispatcher, &loads);

        // Nothing touches the grid until the queue is drained
        assert!(grid.players().all(|(_, name)| name.is_empty()));

        assert!(
            queue
                .run_until(&mut grid, Duration::from_secs(1), || loads.is_applied(id))
                .unwrap()
        );
        let first = grid.index_of(ScoreType::People, 0).unwrap();
        assert_eq!(grid.cell(first).unwrap().text(), Some("Ana"));
        assert_eq!(grid.cell(first).unwrap().kind(), CellKind::Name);
    }
}
