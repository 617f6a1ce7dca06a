//! Offline responder.
//!
//! Keyword-matched answers used when no prediction endpoint is configured.

mod topics;

pub use topics::{Topic, TOPICS};

use tracing::debug;

const ECHO_CHARS: usize = 50;

/// Static keyword → answer table.
pub struct KnowledgeBase {
    topics: &'static [Topic],
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self { topics: TOPICS }
    }
}

impl KnowledgeBase {
    pub fn new(topics: &'static [Topic]) -> Self {
        Self { topics }
    }

    /// First topic, in table order, with a keyword contained in the
    /// lowercased question.
    pub fn lookup(&self, question: &str) -> Option<&'static Topic> {
        let question = question.to_lowercase();
        self.topics
            .iter()
            .find(|topic| topic.keywords.iter().any(|kw| question.contains(kw)))
    }

    /// Answer a question, appending `file_info` (the upload description
    /// block, possibly empty).
    pub fn respond(&self, question: &str, file_info: &str) -> String {
        let mut answer = match self.lookup(question) {
            Some(topic) => {
                debug!(topic = topic.name, "knowledge base match");
                topic.answer.to_string()
            }
            None => default_answer(question),
        };
        answer.push_str(file_info);
        answer
    }
}

/// Answer for questions no topic covers. The variant is picked from the
/// question length so the same question always gets the same answer.
fn default_answer(question: &str) -> String {
    let echoed: String = question.chars().take(ECHO_CHARS).collect();
    let ellipsis = if question.chars().count() > ECHO_CHARS {
        "..."
    } else {
        ""
    };
    match question.chars().count() % 3 {
        0 => format!(
            "I understand you're asking about: \"{echoed}{ellipsis}\"\n\n\
             I don't have a specific answer for that yet. Related topics I can cover:\n\n\
             **Suggested Topics:**\n\
             - Digital Forensics Fundamentals\n\
             - File System Analysis\n\
             - Memory Forensics\n\
             - Network Analysis\n\
             - Evidence Chain of Custody\n\
             - Timeline Analysis\n\
             - Log File Investigation\n\n\
             You can also upload an evidence archive for analysis."
        ),
        1 => "That's an interesting forensic question. To give more detailed guidance:\n\n\
              **Next Steps:**\n\
              - Specify your investigation focus\n\
              - Share relevant evidence files (if applicable)\n\
              - Describe your current challenge\n\
              - Clarify the system or device type\n\n\
              **I can assist with:** evidence interpretation, forensic methodology, \
              tool recommendations, timeline analysis and reporting."
            .to_string(),
        _ => "Good question! For a more complete answer, consider providing:\n\n\
              **Additional Information:**\n\
              - The forensic aspect you're investigating\n\
              - Device or system type (Windows, Linux, iOS, Android)\n\
              - Evidence files for analysis\n\
              - The specific scenario\n\n\
              **Popular Topics:** chain of custody, deleted file recovery, memory analysis, \
              browser artifacts, log analysis, mobile forensics, malware analysis."
            .to_string(),
    }
}
