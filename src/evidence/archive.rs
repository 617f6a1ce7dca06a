use super::classify::{classify_by_extension, extension_of, is_text_like};
use super::extract::{extract_preview, DEFAULT_PREVIEW_CHARS};
use super::schema::UploadedFileMetadata;
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Largest archive accepted for upload (25 MiB).
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 25 * 1024 * 1024;

/// Worst-case UTF-8 width; bounds the bytes kept for a preview.
const MAX_UTF8_BYTES: usize = 4;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("not a readable ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to read archive entry {entry}: {source}")]
    Entry {
        entry: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Limits applied while reading an uploaded archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveOptions {
    pub max_archive_bytes: u64,
    pub preview_chars: usize,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

/// Read every file entry of a ZIP archive into upload metadata.
///
/// Entries are decoded one at a time, in archive order. Directory entries
/// and entries without a basename are skipped. Only text-like entries are
/// decompressed: the head is kept for the preview and the rest is streamed
/// through to count lines, so memory stays bounded whatever the entry
/// expands to.
pub fn read_archive(
    data: &[u8],
    options: &ArchiveOptions,
) -> Result<Vec<UploadedFileMetadata>, ArchiveError> {
    let size = data.len() as u64;
    if size > options.max_archive_bytes {
        return Err(ArchiveError::TooLarge {
            size,
            limit: options.max_archive_bytes,
        });
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut files = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let path = entry.name().to_string();
        let Some(filename) = basename(&path) else {
            debug!(path = %path, "skipping archive entry without a basename");
            continue;
        };

        let (file_type, mime) = classify_by_extension(&filename);
        let (preview, line_count) = if is_text_like(&extension_of(&filename)) {
            let head_cap = options.preview_chars.saturating_mul(MAX_UTF8_BYTES);
            let (head, lines) =
                scan_text(&mut entry, head_cap).map_err(|source| ArchiveError::Entry {
                    entry: path.clone(),
                    source,
                })?;
            (
                extract_preview(&head, &filename, options.preview_chars),
                Some(lines),
            )
        } else {
            (None, None)
        };

        files.push(UploadedFileMetadata {
            filename,
            path,
            file_type: file_type.to_string(),
            size_bytes: entry.size(),
            mime: mime.to_string(),
            preview,
            line_count,
        });
    }

    info!(entries = files.len(), bytes = size, "archive read");
    Ok(files)
}

/// Read an archive from disk, then parse it with [`read_archive`].
pub async fn read_archive_file(
    path: &Path,
    options: &ArchiveOptions,
) -> Result<Vec<UploadedFileMetadata>, ArchiveError> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > options.max_archive_bytes {
        return Err(ArchiveError::TooLarge {
            size,
            limit: options.max_archive_bytes,
        });
    }
    let data = tokio::fs::read(path).await?;
    read_archive(&data, options)
}

/// Keep the first `head_cap` bytes of `reader` and count its lines the way
/// a split on `\n` would: newlines plus one.
fn scan_text(reader: &mut impl Read, head_cap: usize) -> std::io::Result<(Vec<u8>, u64)> {
    let mut head = Vec::new();
    reader.by_ref().take(head_cap as u64).read_to_end(&mut head)?;
    let mut newlines = bytecount(&head);

    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        newlines += bytecount(&buf[..n]);
    }
    Ok((head, newlines + 1))
}

fn bytecount(bytes: &[u8]) -> u64 {
    bytes.iter().filter(|&&b| b == b'\n').count() as u64
}

/// Last path segment of an archive entry name. ZIP names use `/`, but
/// archives built on Windows sometimes carry `\`.
fn basename(path: &str) -> Option<String> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
