use shelf_logging::{shelf_debug, shelf_error, shelf_info, shelf_warn};

use crate::{AppState, Effect, Generation, Msg, SizeState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every asynchronous result carries the generation it was requested under
/// and is compared against the live generation here; stale results change
/// nothing and never mark the state dirty.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesDropped(files) => {
            if files.is_empty() {
                return (state, Vec::new());
            }
            let paths: Vec<String> = files.iter().map(|f| f.original_path.clone()).collect();
            let generation = state.begin_batch(files);
            shelf_info!(
                "Staging batch generation={} files={}",
                generation,
                paths.len()
            );
            vec![Effect::StageFiles { generation, paths }]
        }
        Msg::StageCompleted { generation, result } => {
            if !state.is_pending(generation) {
                shelf_debug!("Discarding stale stage result generation={}", generation);
                return (state, Vec::new());
            }
            let expected = state.pending_len();
            let lookups = match result {
                Ok(staged) if staged.len() == expected => {
                    shelf_info!(
                        "Staged generation={} files={}",
                        generation,
                        staged.len()
                    );
                    state.adopt_staged(staged)
                }
                Ok(staged) => {
                    shelf_error!(
                        "Failed to stage files: backend returned {} paths for {} files",
                        staged.len(),
                        expected
                    );
                    state.abandon_pending()
                }
                Err(err) => {
                    shelf_error!("Failed to stage files: {}", err);
                    state.abandon_pending()
                }
            };
            size_requests(state.session().generation(), lookups)
        }
        Msg::SizeResolved {
            generation,
            index,
            result,
        } => {
            if !state.is_current(generation) {
                shelf_debug!(
                    "Discarding stale size result generation={} index={}",
                    generation,
                    index
                );
                return (state, Vec::new());
            }
            let size = match result {
                Ok(bytes) => SizeState::Bytes(bytes),
                Err(err) => {
                    shelf_warn!("Size lookup failed for entry {}: {}", index, err);
                    SizeState::Unknown
                }
            };
            if !state.settle_size(index, size) {
                shelf_debug!(
                    "Ignoring size result for settled or missing entry {}",
                    index
                );
            }
            Vec::new()
        }
        Msg::ClearClicked => {
            let generation = state.clear();
            shelf_info!("Cleared staging, generation={}", generation);
            vec![Effect::ClearStaging]
        }
        Msg::ClearCompleted { result } => {
            if let Err(err) = result {
                shelf_warn!("Backend clear failed: {}", err);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn size_requests(generation: Generation, lookups: Vec<(usize, String)>) -> Vec<Effect> {
    lookups
        .into_iter()
        .map(|(index, staged_path)| Effect::RequestSize {
            generation,
            index,
            staged_path,
        })
        .collect()
}
