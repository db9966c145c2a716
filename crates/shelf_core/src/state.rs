use crate::path::ResolvedPath;
use crate::view_model::{render_rows, AppViewModel};

/// Identifies a staging session; strictly increasing, starts at 0.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeState {
    #[default]
    Unresolved,
    Bytes(u64),
    Unknown,
}

impl SizeState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SizeState::Unresolved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Staging,
    Enriching,
}

/// A staged file. The staged path is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    original_path: String,
    display_name: String,
    staged_path: String,
    size: SizeState,
}

impl FileEntry {
    pub fn new(resolved: ResolvedPath, staged_path: String) -> Self {
        Self {
            original_path: resolved.original_path,
            display_name: resolved.display_name,
            staged_path,
            size: SizeState::Unresolved,
        }
    }

    pub fn original_path(&self) -> &str {
        &self.original_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn staged_path(&self) -> &str {
        &self.staged_path
    }

    pub fn size(&self) -> SizeState {
        self.size
    }

    /// Moves `Unresolved` to a terminal state. Settled sizes are never overwritten.
    pub(crate) fn settle_size(&mut self, size: SizeState) -> bool {
        if self.size.is_settled() || !size.is_settled() {
            return false;
        }
        self.size = size;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StagingSession {
    generation: Generation,
    entries: Vec<FileEntry>,
}

impl StagingSession {
    pub(crate) fn new(generation: Generation, entries: Vec<FileEntry>) -> Self {
        Self {
            generation,
            entries,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.entries.iter().all(|entry| entry.size.is_settled())
    }

    /// `(index, staged_path)` of every entry still waiting for its size.
    pub(crate) fn unresolved(&self) -> Vec<(usize, String)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.size.is_settled())
            .map(|(index, entry)| (index, entry.staged_path.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingBatch {
    generation: Generation,
    files: Vec<ResolvedPath>,
}

/// The single staging state of the process.
///
/// `generation` is the live generation: the newest one allocated. Results
/// tagged with anything else are stale. The displayed `session` only carries
/// the live generation while no batch is waiting on the stager.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    generation: Generation,
    session: StagingSession,
    pending: Option<PendingBatch>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase(),
            generation: self.session.generation,
            rows: render_rows(self.session.entries()),
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn session(&self) -> &StagingSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Staging
        } else if !self.session.is_fully_resolved() {
            Phase::Enriching
        } else {
            Phase::Idle
        }
    }

    /// Returns and clears the render flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn allocate_generation(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    /// Accepts a batch under a fresh generation, superseding all prior work.
    pub(crate) fn begin_batch(&mut self, files: Vec<ResolvedPath>) -> Generation {
        let generation = self.allocate_generation();
        self.pending = Some(PendingBatch { generation, files });
        generation
    }

    pub(crate) fn is_pending(&self, generation: Generation) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.generation == generation)
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, |pending| pending.files.len())
    }

    /// Turns the pending batch into the displayed session.
    ///
    /// `staged` must be aligned with the pending batch. Returns the size
    /// lookups to issue.
    pub(crate) fn adopt_staged(&mut self, staged: Vec<String>) -> Vec<(usize, String)> {
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        let entries = pending
            .files
            .into_iter()
            .zip(staged)
            .map(|(resolved, staged_path)| FileEntry::new(resolved, staged_path))
            .collect();
        self.session = StagingSession::new(pending.generation, entries);
        self.dirty = true;
        self.session.unresolved()
    }

    /// Drops the pending batch and makes the displayed session live again
    /// under a fresh generation. Returns the size lookups to re-issue.
    pub(crate) fn abandon_pending(&mut self) -> Vec<(usize, String)> {
        self.pending = None;
        let generation = self.allocate_generation();
        self.session.generation = generation;
        self.session.unresolved()
    }

    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        self.pending.is_none()
            && self.session.generation == generation
            && self.generation == generation
    }

    /// Applies a size result for the live session. Returns whether the entry changed.
    pub(crate) fn settle_size(&mut self, index: usize, size: SizeState) -> bool {
        let changed = self
            .session
            .entries
            .get_mut(index)
            .is_some_and(|entry| entry.settle_size(size));
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Invalidates everything in flight and leaves an empty, live session.
    pub(crate) fn clear(&mut self) -> Generation {
        let generation = self.allocate_generation();
        self.pending = None;
        self.session = StagingSession::new(generation, Vec::new());
        self.dirty = true;
        generation
    }
}
