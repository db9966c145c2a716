use crate::{Generation, ResolvedPath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// One physical drop, already resolved and in drop order.
    FilesDropped(Vec<ResolvedPath>),
    /// Backend answer to `Effect::StageFiles`.
    StageCompleted {
        generation: Generation,
        result: Result<Vec<String>, String>,
    },
    /// Backend answer to `Effect::RequestSize`.
    SizeResolved {
        generation: Generation,
        index: usize,
        result: Result<u64, String>,
    },
    /// User clicked Clear.
    ClearClicked,
    /// Backend answer to `Effect::ClearStaging`.
    ClearCompleted { result: Result<(), String> },
}
