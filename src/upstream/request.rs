use crate::evidence::{EvidenceSet, UploadedFileMetadata};
use serde::Serialize;

const SUMMARY_INSTRUCTION: &str = "\n\nDescribe each evidence file listed in evidenceFiles. \
Answer with JSON only, shaped as {\"evidenceSummary\": [{\"filename\": \"...\", \"type\": \"...\", \"contents\": \"...\"}]}.";

/// JSON body of a prediction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub question: String,
    pub evidence_files: Vec<String>,
    pub evidence_metadata: Vec<UploadedFileMetadata>,
}

impl PredictionRequest {
    /// Build the request for one turn. With evidence present the question
    /// asks for a machine-readable summary of the files.
    pub fn for_turn(question: &str, evidence: Option<&EvidenceSet>) -> Self {
        let question = question.trim();
        match evidence.filter(|set| !set.is_empty()) {
            Some(set) => {
                let question = if question.is_empty() {
                    "Analyze the uploaded evidence files."
                } else {
                    question
                };
                Self {
                    question: format!("{question}{SUMMARY_INSTRUCTION}"),
                    evidence_files: set.filenames(),
                    evidence_metadata: set.files.clone(),
                }
            }
            None => Self {
                question: question.to_string(),
                evidence_files: Vec::new(),
                evidence_metadata: Vec::new(),
            },
        }
    }
}
