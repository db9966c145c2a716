use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use shelf_logging::{shelf_debug, shelf_warn};
use tokio::sync::mpsc as async_mpsc;

use crate::{EngineError, EngineEvent, Generation, MetadataService, Stager};

/// Receives engine results. Called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Stager(StagerCommand),
    Size {
        generation: Generation,
        index: usize,
        path: String,
    },
}

/// Work for the serialized stager queue.
enum StagerCommand {
    Stage {
        generation: Generation,
        paths: Vec<String>,
    },
    Clear,
    Shutdown { done: mpsc::Sender<()> },
}

/// Front of the request/response boundary to the staging backend.
///
/// Stage and clear requests run one at a time in the order they were sent.
/// Size lookups run concurrently and may complete in any order. Nothing is
/// cancelled; callers discard results they no longer want.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        stager: Arc<dyn Stager>,
        metadata: Arc<dyn MetadataService>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let (stager_tx, stager_rx) = async_mpsc::unbounded_channel();
            runtime.spawn(run_stager(stager, stager_rx, sink.clone()));

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Size {
                        generation,
                        index,
                        path,
                    } => {
                        let metadata = metadata.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = metadata.size(&path).await;
                            sink.emit(EngineEvent::SizeResolved {
                                generation,
                                index,
                                result,
                            });
                        });
                    }
                    EngineCommand::Stager(command) => {
                        if stager_tx.send(command).is_err() {
                            shelf_warn!("Stager task stopped; dropping request");
                        }
                    }
                }
            }
            shelf_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn stage(&self, generation: Generation, paths: Vec<String>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Stager(StagerCommand::Stage { generation, paths }));
    }

    pub fn request_size(&self, generation: Generation, index: usize, path: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Size {
            generation,
            index,
            path: path.into(),
        });
    }

    pub fn clear(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Stager(StagerCommand::Clear));
    }

    /// Clears staged copies after all queued stager work and waits up to
    /// `timeout`. Returns whether the clear finished in time.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let (done, done_rx) = mpsc::channel();
        let command = EngineCommand::Stager(StagerCommand::Shutdown { done });
        if self.cmd_tx.send(command).is_err() {
            return false;
        }
        done_rx.recv_timeout(timeout).is_ok()
    }
}

async fn run_stager(
    stager: Arc<dyn Stager>,
    mut commands: async_mpsc::UnboundedReceiver<StagerCommand>,
    sink: Arc<dyn EventSink>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            StagerCommand::Stage { generation, paths } => {
                let result = stager.stage(&paths).await;
                sink.emit(EngineEvent::Staged { generation, result });
            }
            StagerCommand::Clear => {
                let result = stager.clear().await;
                sink.emit(EngineEvent::Cleared { result });
            }
            StagerCommand::Shutdown { done } => {
                if let Err(err) = stager.clear().await {
                    shelf_warn!("Failed to clear staging on shutdown: {}", err);
                }
                let _ = done.send(());
            }
        }
    }
}
