use crate::path::{resolve, DroppedItem, FileHandle, ResolvedPath};

/// Which channel produces batches. Chosen once at setup, never per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropChannel {
    Native,
    DomFallback,
}

/// Raw events from either drop channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropEvent {
    NativeDragOver,
    NativeDrop(Vec<String>),
    DomDragOver,
    DomDrop(Vec<FileHandle>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropOutcome {
    /// The default navigation must be suppressed for this event. Set for every
    /// dragover and drop so the window keeps accepting the drop.
    pub prevent_default: bool,
    /// At most one batch per physical drop, in drop order.
    pub batch: Option<Vec<ResolvedPath>>,
}

/// Normalizes both drop channels into a single stream of batches.
///
/// When the native listener registered, the DOM drop that the webview fires
/// for the same physical action is swallowed; the DOM channel only produces
/// batches when native registration failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropSource {
    channel: DropChannel,
}

impl DropSource {
    pub fn select(native_registered: bool) -> Self {
        let channel = if native_registered {
            DropChannel::Native
        } else {
            DropChannel::DomFallback
        };
        shelf_logging::shelf_info!("Drop source selected: {:?}", channel);
        Self { channel }
    }

    pub fn channel(&self) -> DropChannel {
        self.channel
    }

    pub fn handle(&self, event: DropEvent) -> DropOutcome {
        match event {
            DropEvent::DomDragOver | DropEvent::NativeDragOver => DropOutcome {
                prevent_default: true,
                batch: None,
            },
            DropEvent::NativeDrop(paths) => {
                let batch = match self.channel {
                    DropChannel::Native => non_empty(
                        paths
                            .into_iter()
                            .filter(|path| !path.trim().is_empty())
                            .map(DroppedItem::NativePath),
                    ),
                    DropChannel::DomFallback => {
                        shelf_logging::shelf_debug!(
                            "Ignoring native drop while DOM fallback is active"
                        );
                        None
                    }
                };
                DropOutcome {
                    prevent_default: true,
                    batch,
                }
            }
            DropEvent::DomDrop(handles) => {
                let batch = match self.channel {
                    DropChannel::DomFallback => {
                        non_empty(handles.into_iter().map(DroppedItem::FileHandle))
                    }
                    DropChannel::Native => None,
                };
                DropOutcome {
                    prevent_default: true,
                    batch,
                }
            }
        }
    }
}

fn non_empty(items: impl Iterator<Item = DroppedItem>) -> Option<Vec<ResolvedPath>> {
    let resolved: Vec<ResolvedPath> = items.map(|item| resolve(&item)).collect();
    if resolved.is_empty() {
        None
    } else {
        Some(resolved)
    }
}
