use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use shelf_core::{Effect, Msg};
use shelf_engine::{EngineError, EngineEvent, EngineHandle, EventSink, FsMetadata, FsStager};
use shelf_logging::shelf_debug;

use super::app::LoopEvent;

/// Runs core effects against the engine and feeds results back to the loop.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(staging_dir: PathBuf, loop_tx: mpsc::Sender<LoopEvent>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(
            Arc::new(FsStager::new(staging_dir)),
            Arc::new(FsMetadata),
            Arc::new(LoopSink { tx: loop_tx }),
        )?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StageFiles { generation, paths } => {
                    shelf_debug!("StageFiles generation={} count={}", generation, paths.len());
                    self.engine.stage(generation, paths);
                }
                Effect::RequestSize {
                    generation,
                    index,
                    staged_path,
                } => {
                    self.engine.request_size(generation, index, staged_path);
                }
                Effect::ClearStaging => self.engine.clear(),
            }
        }
    }

    pub fn shutdown(&self, timeout: Duration) -> bool {
        self.engine.shutdown(timeout)
    }
}

struct LoopSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for LoopSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(LoopEvent::Msg(map_event(event)));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Staged { generation, result } => Msg::StageCompleted {
            generation,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::SizeResolved {
            generation,
            index,
            result,
        } => Msg::SizeResolved {
            generation,
            index,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::Cleared { result } => Msg::ClearCompleted {
            result: result.map_err(|err| err.to_string()),
        },
    }
}
