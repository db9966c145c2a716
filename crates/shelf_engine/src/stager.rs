use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use shelf_logging::{shelf_debug, shelf_info, shelf_warn};
use tempfile::NamedTempFile;

use crate::StagingError;

/// Backend that takes ownership of dropped files for the session.
#[async_trait::async_trait]
pub trait Stager: Send + Sync {
    /// Stages `paths` and returns the staged paths in the same order.
    async fn stage(&self, paths: &[String]) -> Result<Vec<String>, StagingError>;

    /// Removes every staged copy.
    async fn clear(&self) -> Result<(), StagingError>;
}

/// Creates `dir` if needed and checks that files can be created in it.
///
/// Runs at startup and before every batch, so both fail the same way.
pub fn prepare_staging_dir(dir: &Path) -> Result<(), StagingError> {
    let unavailable = |err: std::io::Error| {
        StagingError::StagingDir(format!("{}: {}", dir.display(), err))
    };
    fs::create_dir_all(dir).map_err(unavailable)?;
    NamedTempFile::new_in(dir).map(drop).map_err(unavailable)
}

/// Copies files into a flat staging directory, `<dir>/<file name>`.
///
/// Names repeated within one batch get a ` (n)` suffix so every entry keeps
/// its own copy.
#[derive(Debug)]
pub struct FsStager {
    dir: PathBuf,
    staged: Mutex<Vec<PathBuf>>,
}

impl FsStager {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Staged copies currently tracked for removal.
    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.lock_staged().clone()
    }

    fn lock_staged(&self) -> std::sync::MutexGuard<'_, Vec<PathBuf>> {
        // The list stays consistent even if a holder panicked.
        self.staged
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn track(&self, path: PathBuf) {
        let mut staged = self.lock_staged();
        if !staged.contains(&path) {
            staged.push(path);
        }
    }
}

#[async_trait::async_trait]
impl Stager for FsStager {
    async fn stage(&self, paths: &[String]) -> Result<Vec<String>, StagingError> {
        let dir = self.dir.clone();
        tokio::task::spawn_blocking(move || prepare_staging_dir(&dir))
            .await
            .map_err(|err| StagingError::StagingDir(err.to_string()))??;

        let mut taken = HashSet::with_capacity(paths.len());
        let mut staged = Vec::with_capacity(paths.len());
        for path in paths {
            let src = Path::new(path);
            let Some(name) = src.file_name() else {
                return Err(StagingError::NoFileName { path: path.clone() });
            };
            let name = unique_name(name, &taken);
            let dest = self.dir.join(&name);
            taken.insert(name);
            tokio::fs::copy(src, &dest)
                .await
                .map_err(|err| StagingError::Copy {
                    path: path.clone(),
                    message: err.to_string(),
                })?;
            shelf_debug!("Staged {} -> {}", path, dest.display());
            staged.push(dest.display().to_string());
            self.track(dest);
        }
        shelf_info!("Staged {} file(s) into {}", staged.len(), self.dir.display());
        Ok(staged)
    }

    async fn clear(&self) -> Result<(), StagingError> {
        let tracked = std::mem::take(&mut *self.lock_staged());
        let total = tracked.len();

        let mut failures = Vec::new();
        for path in tracked {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    shelf_warn!("Failed to remove staged file {}: {}", path.display(), err);
                    failures.push((path, err.to_string()));
                }
            }
        }

        shelf_info!(
            "Cleared {} of {} staged file(s)",
            total - failures.len(),
            total
        );
        let Some((_, message)) = failures.first() else {
            return Ok(());
        };
        let error = StagingError::Clear {
            failed: failures.len(),
            message: message.clone(),
        };
        // Keep the leftovers so the next clear retries them.
        for (path, _) in failures {
            self.track(path);
        }
        Err(error)
    }
}

/// `name`, or `stem (n).ext` with the smallest `n` not yet taken.
fn unique_name(name: &OsStr, taken: &HashSet<OsString>) -> OsString {
    if !taken.contains(name) {
        return name.to_owned();
    }
    let as_path = Path::new(name);
    let stem = as_path.file_stem().unwrap_or(name).to_string_lossy();
    let ext = as_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    (1..)
        .map(|n| OsString::from(format!("{stem} ({n}){ext}")))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_owned())
}
