//! evidence-chat: evidence triage assistant.
//!
//! Accepts ZIP uploads of evidence files, classifies their entries, forwards
//! one question per turn to a hosted prediction endpoint and reconciles the
//! reply into something renderable, whatever shape it arrives in.

pub mod config;
pub mod evidence;
pub mod knowledge;
pub mod render;
pub mod session;
pub mod upstream;

pub use config::Config;
pub use evidence::{EvidenceItem, EvidenceSet, EvidenceSummary, Reconciled, UploadedFileMetadata};
pub use session::{Session, TurnOutcome, UploadStatus};
pub use upstream::{HttpPredictionClient, PredictionClient, PredictionRequest, RawUpstreamReply};
