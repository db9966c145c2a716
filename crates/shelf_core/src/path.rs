/// One item of a raw drop payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DroppedItem {
    /// Absolute filesystem path delivered by the native file-drop channel.
    NativePath(String),
    /// Browser file handle delivered by the DOM channel.
    FileHandle(FileHandle),
}

/// What a DOM `File` exposes. Only some webviews fill in `path`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileHandle {
    pub name: String,
    pub path: Option<String>,
    pub relative_path: Option<String>,
}

impl FileHandle {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub original_path: String,
    pub display_name: String,
}

impl ResolvedPath {
    pub fn from_path(path: impl Into<String>) -> Self {
        let original_path = path.into();
        let display_name = display_name(&original_path);
        Self {
            original_path,
            display_name,
        }
    }
}

/// Best-effort resolution of a dropped item; never fails.
///
/// File handles without a real filesystem path fall back to the relative
/// path hint, then to the bare file name.
pub fn resolve(item: &DroppedItem) -> ResolvedPath {
    match item {
        DroppedItem::NativePath(path) => ResolvedPath::from_path(path.as_str()),
        DroppedItem::FileHandle(handle) => {
            let original = [handle.path.as_deref(), handle.relative_path.as_deref()]
                .into_iter()
                .flatten()
                .find(|candidate| !candidate.trim().is_empty())
                .unwrap_or(handle.name.as_str());
            ResolvedPath::from_path(original)
        }
    }
}

/// Final path segment, splitting on both `/` and `\`.
///
/// Trailing separators are skipped; a path with no segment at all is returned as is.
pub fn display_name(path: &str) -> String {
    path.split(['/', '\\'])
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}
