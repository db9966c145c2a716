//! ShelfSend core: pure staging state machine, drop normalization and list rendering.
mod drop_source;
mod effect;
mod msg;
mod path;
mod state;
mod update;
mod view_model;

pub use drop_source::{DropChannel, DropEvent, DropOutcome, DropSource};
pub use effect::Effect;
pub use msg::Msg;
pub use path::{display_name, resolve, DroppedItem, FileHandle, ResolvedPath};
pub use state::{AppState, FileEntry, Generation, Phase, SizeState, StagingSession};
pub use update::update;
pub use view_model::{
    human_size, render_lines, size_text, AppViewModel, FileRowView, SIZE_PENDING, SIZE_UNKNOWN,
};
