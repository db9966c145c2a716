//! ShelfSend engine: staging backend, metadata lookups and request execution.
mod engine;
mod error;
mod metadata;
mod stager;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use error::{EngineError, MetadataError, StagingError};
pub use metadata::{FsMetadata, MetadataService};
pub use stager::{prepare_staging_dir, FsStager, Stager};
pub use types::{EngineEvent, Generation};
