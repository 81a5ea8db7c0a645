use anyhow::{Context, Error as Anyhow};
use lib::game::Upload;
use std::path::Path;
use tokio::fs;
use tracing::instrument;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Reads an image from disk and sniffs its media type.
///
/// Content that does not carry the PNG signature is still delivered, with a
/// media type the table is expected to reject.
#[instrument(level = "debug", err)]
pub async fn read(path: &Path) -> Result<Upload, Anyhow> {
    let content = fs::read(path)
        .await
        .with_context(|| format!("failed to read `{}`", path.display()))?;

    let media_type = if content.starts_with(&PNG_SIGNATURE) {
        "image/png"
    } else {
        "application/octet-stream"
    };

    Ok(Upload::new(media_type, format!("file://{}", path.display())))
}
