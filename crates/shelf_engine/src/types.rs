use crate::{MetadataError, StagingError};

/// Session tag echoed back with every result. Opaque to the engine.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Staged {
        generation: Generation,
        result: Result<Vec<String>, StagingError>,
    },
    SizeResolved {
        generation: Generation,
        index: usize,
        result: Result<u64, MetadataError>,
    },
    Cleared {
        result: Result<(), StagingError>,
    },
}
