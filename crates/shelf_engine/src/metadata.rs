use crate::MetadataError;

#[async_trait::async_trait]
pub trait MetadataService: Send + Sync {
    /// Byte length of the file at `path`.
    async fn size(&self, path: &str) -> Result<u64, MetadataError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsMetadata;

#[async_trait::async_trait]
impl MetadataService for FsMetadata {
    async fn size(&self, path: &str) -> Result<u64, MetadataError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|err| MetadataError::Io {
                path: path.to_string(),
                message: err.to_string(),
            })?;
        if !meta.is_file() {
            return Err(MetadataError::NotAFile {
                path: path.to_string(),
            });
        }
        Ok(meta.len())
    }
}
