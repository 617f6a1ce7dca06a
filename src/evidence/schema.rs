use serde::{Deserialize, Serialize};

/// One per-file classification result shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub filename: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub contents: String,
}

impl EvidenceItem {
    pub fn new(
        filename: impl Into<String>,
        file_type: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            file_type: file_type.into(),
            contents: contents.into(),
        }
    }
}

/// Ordered list of evidence items. May be empty; duplicates are kept.
pub type EvidenceSummary = Vec<EvidenceItem>;

/// Metadata extracted from one archive entry at upload time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileMetadata {
    /// Basename only, never contains a path separator.
    pub filename: String,
    /// Full archive-relative path.
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub size_bytes: u64,
    pub mime: String,
    /// First characters of decoded text, for text-like extensions only.
    pub preview: Option<String>,
    /// Lines in the whole decoded entry, for text-like extensions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u64>,
}

/// The evidence currently in play for a conversation.
///
/// Built once per upload and replaced wholesale by the next one; nothing
/// mutates it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSet {
    pub archive_name: String,
    pub files: Vec<UploadedFileMetadata>,
}

impl EvidenceSet {
    pub fn new(archive_name: impl Into<String>, files: Vec<UploadedFileMetadata>) -> Self {
        Self {
            archive_name: archive_name.into(),
            files,
        }
    }

    /// Filenames the reconciler falls back on when the upstream reply is unusable.
    pub fn filenames(&self) -> Vec<String> {
        self.files.iter().map(|f| f.filename.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }
}
