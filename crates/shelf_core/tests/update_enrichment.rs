use std::sync::Once;

use pretty_assertions::assert_eq;
use shelf_core::{update, AppState, Effect, Generation, Msg, ResolvedPath, SizeState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(shelf_logging::initialize_for_tests);
}

fn stage_batch(state: AppState, names: &[&str]) -> (AppState, Generation) {
    let files = names
        .iter()
        .map(|name| ResolvedPath::from_path(format!("/src/{name}")))
        .collect();
    let (state, effects) = update(state, Msg::FilesDropped(files));
    let Some(Effect::StageFiles { generation, paths }) = effects.into_iter().next() else {
        panic!("expected stage effect");
    };
    let staged = paths.iter().map(|p| p.replace("/src/", "/staged/")).collect();
    let (mut state, _) = update(
        state,
        Msg::StageCompleted {
            generation,
            result: Ok(staged),
        },
    );
    state.consume_dirty();
    (state, generation)
}

fn size(state: AppState, generation: Generation, index: usize, result: Result<u64, &str>) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SizeResolved {
            generation,
            index,
            result: result.map_err(str::to_string),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn failed_lookup_degrades_to_unknown_without_blocking_siblings() {
    init_logging();
    let (state, generation) = stage_batch(AppState::new(), &["good.txt", "bad.txt"]);

    let mut state = size(state, generation, 1, Err("permission denied"));
    assert!(state.consume_dirty());
    assert_eq!(
        state.view().lines(),
        vec!["good.txt (Loading…)".to_string(), "bad.txt (Unknown)".to_string()]
    );

    let mut state = size(state, generation, 0, Ok(1536));
    assert!(state.consume_dirty());
    assert_eq!(
        state.view().lines(),
        vec!["good.txt (1.5 KB)".to_string(), "bad.txt (Unknown)".to_string()]
    );
}

#[test]
fn each_resolution_renders_once() {
    init_logging();
    let (state, generation) = stage_batch(AppState::new(), &["a", "b", "c"]);

    let mut state = size(state, generation, 2, Ok(3));
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
    let mut state = size(state, generation, 0, Ok(1));
    assert!(state.consume_dirty());
    assert_eq!(
        state.view().lines(),
        vec![
            "a (1 B)".to_string(),
            "b (Loading…)".to_string(),
            "c (3 B)".to_string(),
        ]
    );
}

#[test]
fn settled_size_is_never_overwritten() {
    init_logging();
    let (state, generation) = stage_batch(AppState::new(), &["a"]);
    let mut state = size(state, generation, 0, Ok(5));
    assert!(state.consume_dirty());

    let mut state = size(state, generation, 0, Err("late failure"));
    assert!(!state.consume_dirty());
    let mut state = size(state, generation, 0, Ok(7));
    assert!(!state.consume_dirty());
    assert_eq!(state.session().entries()[0].size(), SizeState::Bytes(5));
}

#[test]
fn out_of_range_index_is_ignored() {
    init_logging();
    let (state, generation) = stage_batch(AppState::new(), &["a"]);
    let before = state.clone();
    let mut state = size(state, generation, 4, Ok(5));
    assert!(!state.consume_dirty());
    assert_eq!(state, before);
}

#[test]
fn second_drop_before_enrichment_shows_only_second_batch() {
    init_logging();
    let (state, first) = stage_batch(AppState::new(), &["a1", "a2"]);

    let files = vec![ResolvedPath::from_path("/src/b1")];
    let (state, effects) = update(state, Msg::FilesDropped(files));
    let Some(Effect::StageFiles { generation: second, .. }) = effects.into_iter().next() else {
        panic!("expected stage effect");
    };

    // Late results for the first batch arrive while the second is staging.
    let mut state = size(state, first, 0, Ok(100));
    assert!(!state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::StageCompleted {
            generation: second,
            result: Ok(vec!["/staged/b1".to_string()]),
        },
    );
    assert!(state.consume_dirty());
    assert_eq!(state.view().lines(), vec!["b1 (Loading…)".to_string()]);

    // And after it has been adopted.
    let mut state = size(state, first, 1, Ok(200));
    assert!(!state.consume_dirty());
    assert_eq!(state.view().lines(), vec!["b1 (Loading…)".to_string()]);

    let mut state = size(state, second, 0, Ok(2048));
    assert!(state.consume_dirty());
    assert_eq!(state.view().lines(), vec!["b1 (2 KB)".to_string()]);
}
