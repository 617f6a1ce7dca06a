//! Conversation loop.
//!
//! A [`Session`] owns the last uploaded evidence set, the responder and the
//! turn history. An upload is attached to the next turn only; later turns go
//! out without it. Turns take `&mut self`, so at most one request is ever in
//! flight.

use crate::config::Config;
use crate::evidence::archive::{read_archive, read_archive_file, ArchiveOptions};
use crate::evidence::describe::describe_set;
use crate::evidence::{
    reconcile, ArchiveError, EvidenceSet, ReconcilePolicy, Reconciled, UploadedFileMetadata,
};
use crate::knowledge::KnowledgeBase;
use crate::upstream::{HttpPredictionClient, PredictionClient, PredictionRequest};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

/// What a turn produced.
pub type TurnOutcome = Reconciled;

/// Where answers come from.
pub enum Responder {
    Online(Box<dyn PredictionClient>),
    Offline(KnowledgeBase),
}

/// Result of an upload attempt. Rejections are reported inline and leave
/// the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Accepted { archive: String, files: usize },
    Rejected { archive: String, reason: String },
}

/// One completed turn, kept in memory only.
#[derive(Debug, Clone)]
pub struct Turn {
    pub id: Uuid,
    pub asked_at: DateTime<Utc>,
    pub question: String,
    pub evidence_files: usize,
    pub outcome: TurnOutcome,
}

pub struct Session {
    responder: Responder,
    policy: ReconcilePolicy,
    archive_options: ArchiveOptions,
    evidence: Option<EvidenceSet>,
    /// Set by an accepted upload, cleared by the turn that sends it.
    pending: bool,
    history: Vec<Turn>,
}

impl Session {
    pub fn new(responder: Responder, config: &Config) -> Self {
        Self {
            responder,
            policy: config.reconcile.policy(),
            archive_options: config.upload.archive_options(),
            evidence: None,
            pending: false,
            history: Vec::new(),
        }
    }

    /// Online when an endpoint is configured, offline otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let responder = if config.is_offline() {
            info!("no prediction endpoint configured, answering from the knowledge base");
            Responder::Offline(KnowledgeBase::default())
        } else {
            Responder::Online(Box::new(HttpPredictionClient::from_config(&config.upstream)?))
        };
        Ok(Self::new(responder, config))
    }

    pub fn offline(config: &Config) -> Self {
        Self::new(Responder::Offline(KnowledgeBase::default()), config)
    }

    pub fn online(client: impl PredictionClient + 'static, config: &Config) -> Self {
        Self::new(Responder::Online(Box::new(client)), config)
    }

    pub fn is_online(&self) -> bool {
        matches!(self.responder, Responder::Online(_))
    }

    /// The last accepted upload, whether or not a turn has used it yet.
    pub fn evidence(&self) -> Option<&EvidenceSet> {
        self.evidence.as_ref()
    }

    /// The upload the next turn will carry, if any.
    pub fn pending_evidence(&self) -> Option<&EvidenceSet> {
        self.evidence.as_ref().filter(|_| self.pending)
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn clear_evidence(&mut self) {
        self.evidence = None;
        self.pending = false;
    }

    /// Parse an uploaded archive and make it the current evidence set.
    pub fn upload_archive(&mut self, archive: &str, data: &[u8]) -> UploadStatus {
        let parsed = read_archive(data, &self.archive_options);
        self.accept_upload(archive, parsed)
    }

    pub async fn upload_archive_file(&mut self, path: &Path) -> UploadStatus {
        let archive = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let parsed = read_archive_file(path, &self.archive_options).await;
        self.accept_upload(&archive, parsed)
    }

    fn accept_upload(
        &mut self,
        archive: &str,
        parsed: std::result::Result<Vec<UploadedFileMetadata>, ArchiveError>,
    ) -> UploadStatus {
        match parsed {
            Ok(files) => {
                let count = files.len();
                info!(archive, files = count, "evidence set replaced");
                self.evidence = Some(EvidenceSet::new(archive, files));
                self.pending = true;
                UploadStatus::Accepted {
                    archive: archive.to_string(),
                    files: count,
                }
            }
            Err(e) => {
                warn!(archive, error = %e, "upload rejected");
                UploadStatus::Rejected {
                    archive: archive.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Run one turn. Returns None when there is neither a question nor any
    /// pending evidence to talk about. A pending upload is consumed by the
    /// turn, whatever the outcome.
    pub async fn ask(&mut self, question: &str) -> Option<TurnOutcome> {
        let question = question.trim();
        let evidence = self.pending_evidence().filter(|set| !set.is_empty());
        if question.is_empty() && evidence.is_none() {
            return None;
        }
        let requested = evidence.map(EvidenceSet::filenames).unwrap_or_default();

        let outcome = match &self.responder {
            Responder::Online(client) => {
                let request = PredictionRequest::for_turn(question, evidence);
                let reply = client.predict(&request).await;
                reconcile(&reply, &requested, &self.policy)
            }
            Responder::Offline(kb) => {
                let file_info = evidence.map(describe_set).unwrap_or_default();
                Reconciled::Message(kb.respond(question, &file_info))
            }
        };

        self.pending = false;
        self.history.push(Turn {
            id: Uuid::new_v4(),
            asked_at: Utc::now(),
            question: question.to_string(),
            evidence_files: requested.len(),
            outcome: outcome.clone(),
        });
        Some(outcome)
    }
}
