use crate::Generation;

/// Requests the app runs against the staging backend on behalf of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Copy/register the batch; the response comes back as `Msg::StageCompleted`.
    StageFiles {
        generation: Generation,
        paths: Vec<String>,
    },
    /// Look up the byte size of one staged entry; answered by `Msg::SizeResolved`.
    RequestSize {
        generation: Generation,
        index: usize,
        staged_path: String,
    },
    /// Drop every staged copy; answered by `Msg::ClearCompleted`.
    ClearStaging,
}
