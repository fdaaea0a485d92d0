use std::path::Path;

use bytes::Bytes;

use super::error::CommandError;

/// Reads a `-f` file into a request body.
pub async fn load_body(path: &Path) -> Result<Bytes, CommandError> {
    tokio::fs::read(path)
        .await
        .map(Bytes::from)
        .map_err(|source| CommandError::FileUnreadable {
            path: path.display().to_string(),
            source,
        })
}
