//! Evidence — uploaded archive handling
//!
//! Handles archive reading, file classification, text previews, upload
//! descriptions and reconciliation of upstream replies into summaries.

pub mod archive;
pub mod classify;
pub mod describe;
pub mod extract;
pub mod reconcile;
pub mod schema;

pub use archive::{read_archive, read_archive_file, ArchiveError, ArchiveOptions};
pub use classify::{classify_by_extension, UNKNOWN_FILE_TYPE, UNKNOWN_MIME};
pub use reconcile::{
    is_valid_evidence_summary, reconcile, Provenance, ReconcilePolicy, Reconciled,
};
pub use schema::{EvidenceItem, EvidenceSet, EvidenceSummary, UploadedFileMetadata};
