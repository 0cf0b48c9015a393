// ABOUTME: Packs project files into the gzip tarball shipped to the colabond service

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to add {path} to archive: {source}")]
    AddFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Build an in-memory `.tar.gz` of `paths`, each relative to `root` and stored
/// under its relative name.
pub fn build_archive<'a, I>(root: &Path, paths: I) -> Result<Vec<u8>, ArchiveError>
where
    I: IntoIterator<Item = &'a str>,
{
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mut count = 0usize;

    for path in paths {
        builder
            .append_path_with_name(root.join(path), path)
            .map_err(|source| ArchiveError::AddFile {
                path: path.to_string(),
                source,
            })?;
        count += 1;
    }

    let bytes = builder.into_inner()?.finish()?;
    debug!("Archived {} files ({} bytes)", count, bytes.len());
    Ok(bytes)
}

pub fn encode_archive(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
