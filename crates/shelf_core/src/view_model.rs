use crate::{FileEntry, Generation, Phase, SizeState};

/// Shown while an entry's size lookup is in flight.
pub const SIZE_PENDING: &str = "Loading…";
/// Shown when an entry's size lookup failed.
pub const SIZE_UNKNOWN: &str = "Unknown";

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub generation: Generation,
    pub rows: Vec<FileRowView>,
}

impl AppViewModel {
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(FileRowView::line).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub display_name: String,
    pub size_text: String,
}

impl FileRowView {
    pub fn line(&self) -> String {
        format!("{} ({})", self.display_name, self.size_text)
    }
}

pub(crate) fn render_rows(entries: &[FileEntry]) -> Vec<FileRowView> {
    entries
        .iter()
        .map(|entry| FileRowView {
            display_name: entry.display_name().to_string(),
            size_text: size_text(entry.size()),
        })
        .collect()
}

/// Renders entries as `name (size)` lines, in order.
pub fn render_lines(entries: &[FileEntry]) -> Vec<String> {
    render_rows(entries).iter().map(FileRowView::line).collect()
}

pub fn size_text(size: SizeState) -> String {
    match size {
        SizeState::Unresolved => SIZE_PENDING.to_string(),
        SizeState::Bytes(bytes) => human_size(bytes),
        SizeState::Unknown => SIZE_UNKNOWN.to_string(),
    }
}

/// Human readable size in 1024 steps, rounded to two decimals: `1536` is `1.5 KB`.
///
/// Anything beyond gigabytes stays in GB.
pub fn human_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
