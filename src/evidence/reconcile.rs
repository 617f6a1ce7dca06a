//! Reply reconciliation.
//!
//! The prediction endpoint is inconsistent about where it puts its answer:
//! sometimes a bare array, sometimes an `evidenceSummary` field, sometimes a
//! JSON document encoded inside `message.content`, `text` or `answer`, and
//! sometimes nothing usable at all. [`reconcile`] tries each known shape in
//! priority order and always returns something the caller can render.

use super::classify::classify_by_extension;
use super::schema::{EvidenceItem, EvidenceSummary};
use crate::upstream::RawUpstreamReply;
use serde_json::Value;
use tracing::{debug, warn};

/// Substring the hosted endpoint uses when the account is out of predictions.
pub const DEFAULT_QUOTA_SIGNATURE: &str = "Predictions limit exceeded";

/// Type label carried by every item of a mock summary.
pub const MOCK_TYPE: &str = "MockType";

const MOCK_CONTENTS: &str =
    "Mock analysis: the prediction quota is exhausted, so this file was not analysed upstream.";

const SUMMARY_KEY: &str = "evidenceSummary";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Transport errors containing this text produce a mock summary instead
    /// of an error.
    pub quota_signature: String,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            quota_signature: DEFAULT_QUOTA_SIGNATURE.to_string(),
        }
    }
}

/// Where the items of a summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Accepted as sent by the endpoint.
    Upstream,
    /// Synthesized because the endpoint quota is exhausted.
    Mock,
    /// Rebuilt from the local filenames because the reply was unusable.
    Repaired,
}

/// Result of reconciling one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    Summary {
        items: EvidenceSummary,
        provenance: Provenance,
    },
    /// Literal chat text to display, not evidence data.
    Message(String),
    /// Transport failure, surfaced verbatim and never retried.
    Error(String),
}

/// String fields that may carry an encoded answer, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    MessageContent,
    Text,
    Answer,
}

impl ContentField {
    pub const ALL: [ContentField; 3] = [Self::MessageContent, Self::Text, Self::Answer];

    pub fn name(self) -> &'static str {
        match self {
            Self::MessageContent => "message.content",
            Self::Text => "text",
            Self::Answer => "answer",
        }
    }

    fn locate(self, body: &Value) -> Option<&str> {
        match self {
            Self::MessageContent => body.get("message")?.get("content")?.as_str(),
            Self::Text => body.get("text")?.as_str(),
            Self::Answer => body.get("answer")?.as_str(),
        }
    }
}

/// Known shapes of a JSON reply body.
#[derive(Debug, Clone, Copy)]
enum ReplyShape<'a> {
    /// The body itself is the summary array.
    SummaryArray(&'a Value),
    /// Top-level `evidenceSummary` field.
    SummaryField(&'a Value),
    /// A string field holding a JSON document with an `evidenceSummary`.
    EncodedContent { field: ContentField, raw: &'a str },
}

impl<'a> ReplyShape<'a> {
    /// Shapes present in `body`, highest priority first.
    fn candidates(body: &'a Value) -> Vec<ReplyShape<'a>> {
        let mut shapes = Vec::new();
        if body.is_array() {
            shapes.push(ReplyShape::SummaryArray(body));
        }
        if let Some(field) = body.get(SUMMARY_KEY) {
            shapes.push(ReplyShape::SummaryField(field));
        }
        for field in ContentField::ALL {
            if let Some(raw) = field.locate(body) {
                shapes.push(ReplyShape::EncodedContent { field, raw });
            }
        }
        shapes
    }

    fn name(&self) -> &'static str {
        match self {
            ReplyShape::SummaryArray(_) => "array",
            ReplyShape::SummaryField(_) => SUMMARY_KEY,
            ReplyShape::EncodedContent { field, .. } => field.name(),
        }
    }

    fn parse(&self) -> Option<EvidenceSummary> {
        match *self {
            ReplyShape::SummaryArray(value) | ReplyShape::SummaryField(value) => {
                decode_summary(value)
            }
            ReplyShape::EncodedContent { raw, .. } => {
                let doc: Value = serde_json::from_str(strip_code_fence(raw)).ok()?;
                decode_summary(doc.get(SUMMARY_KEY)?)
            }
        }
    }
}

/// True when `value` is an array whose every element is an object with
/// string `filename`, `type` and `contents`. The empty array is valid.
pub fn is_valid_evidence_summary(value: &Value) -> bool {
    value.as_array().is_some_and(|items| {
        items.iter().all(|item| {
            ["filename", "type", "contents"]
                .iter()
                .all(|key| item.get(key).is_some_and(Value::is_string))
        })
    })
}

/// Turn an upstream reply into a summary, a message or an error.
///
/// Total: every input yields a value. `requested` are the filenames of the
/// current evidence set; they back the mock and repair paths, so an empty
/// list never produces invented entries.
pub fn reconcile(
    reply: &RawUpstreamReply,
    requested: &[String],
    policy: &ReconcilePolicy,
) -> Reconciled {
    let body = match reply {
        RawUpstreamReply::TransportError(text) => return reconcile_error(text, requested, policy),
        RawUpstreamReply::Unparseable(text) => {
            warn!(len = text.len(), "reply body is not JSON, repairing from local filenames");
            return repaired(requested);
        }
        RawUpstreamReply::Json(body) => body,
    };

    if let Some(text) = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
    {
        return reconcile_error(text, requested, policy);
    }

    for shape in ReplyShape::candidates(body) {
        match shape.parse() {
            Some(items) if items.is_empty() && !requested.is_empty() => {
                debug!(shape = shape.name(), "upstream summary is empty, preferring local filenames");
                return repaired(requested);
            }
            Some(items) => {
                debug!(shape = shape.name(), items = items.len(), "accepted upstream summary");
                return Reconciled::Summary {
                    items,
                    provenance: Provenance::Upstream,
                };
            }
            None => debug!(shape = shape.name(), "shape did not yield a summary"),
        }
    }

    let message = ContentField::ALL
        .iter()
        .filter_map(|field| field.locate(body))
        .find(|text| !text.trim().is_empty());
    if let Some(message) = message {
        return Reconciled::Message(message.to_string());
    }

    warn!("no known reply shape matched, repairing from local filenames");
    repaired(requested)
}

fn reconcile_error(text: &str, requested: &[String], policy: &ReconcilePolicy) -> Reconciled {
    if !policy.quota_signature.is_empty() && text.contains(&policy.quota_signature) {
        warn!("prediction quota exceeded, answering with a mock summary");
        return Reconciled::Summary {
            items: mock_summary(requested),
            provenance: Provenance::Mock,
        };
    }
    warn!(error = %text, "upstream request failed");
    Reconciled::Error(text.to_string())
}

/// One placeholder item per requested filename.
pub fn mock_summary(requested: &[String]) -> EvidenceSummary {
    requested
        .iter()
        .map(|name| EvidenceItem::new(name.as_str(), MOCK_TYPE, MOCK_CONTENTS))
        .collect()
}

/// One classified item per requested filename, the type label doubling as
/// the contents.
pub fn repair_summary(requested: &[String]) -> EvidenceSummary {
    requested
        .iter()
        .map(|name| {
            let (label, _) = classify_by_extension(name);
            EvidenceItem::new(name.as_str(), label, label)
        })
        .collect()
}

fn repaired(requested: &[String]) -> Reconciled {
    Reconciled::Summary {
        items: repair_summary(requested),
        provenance: Provenance::Repaired,
    }
}

fn decode_summary(value: &Value) -> Option<EvidenceSummary> {
    if !is_valid_evidence_summary(value) {
        return None;
    }
    value
        .as_array()?
        .iter()
        .map(|item| {
            Some(EvidenceItem::new(
                item.get("filename")?.as_str()?,
                item.get("type")?.as_str()?,
                item.get("contents")?.as_str()?,
            ))
        })
        .collect()
}

/// Models often wrap JSON answers in a markdown fence; drop it, along with
/// a language tag such as `json`, on one line or several.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(reply: RawUpstreamReply, requested: &[&str]) -> Reconciled {
        reconcile(&reply, &names(requested), &ReconcilePolicy::default())
    }

    fn summary(result: Reconciled) -> (EvidenceSummary, Provenance) {
        match result {
            Reconciled::Summary { items, provenance } => (items, provenance),
            other => panic!("expected a summary, got {other:?}"),
        }
    }

    #[test]
    fn validation_predicate() {
        assert!(is_valid_evidence_summary(&json!([])));
        assert!(is_valid_evidence_summary(&json!([
            {"filename": "a", "type": "b", "contents": "c"}
        ])));
        assert!(!is_valid_evidence_summary(&json!([{"filename": "a", "type": "b"}])));
        assert!(!is_valid_evidence_summary(&json!([
            {"filename": "a", "type": 1, "contents": "c"}
        ])));
        assert!(!is_valid_evidence_summary(&json!([null])));
        assert!(!is_valid_evidence_summary(&json!({"filename": "a"})));
        assert!(!is_valid_evidence_summary(&json!("[]")));
    }

    #[test]
    fn empty_encoded_summary_is_repaired_from_local_filenames() {
        let reply = RawUpstreamReply::Json(json!({
            "message": {"content": "{\"evidenceSummary\":[]}"}
        }));
        let (items, provenance) = summary(run(reply, &["a.txt", "b.exe"]));
        assert_eq!(provenance, Provenance::Repaired);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].filename, "a.txt");
        assert_eq!(items[0].file_type, "Text File");
        assert_eq!(items[1].filename, "b.exe");
        assert_eq!(items[1].file_type, "Executable");
        assert_eq!(items[1].contents, "Executable");
    }

    #[test]
    fn quota_error_yields_mock_summary() {
        let reply = RawUpstreamReply::TransportError(
            "HTTP 429: {\"message\":\"Predictions limit exceeded for this month\"}".to_string(),
        );
        let (items, provenance) = summary(run(reply, &["x.zip"]));
        assert_eq!(provenance, Provenance::Mock);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "x.zip");
        assert_eq!(items[0].file_type, MOCK_TYPE);
    }

    #[test]
    fn other_transport_errors_are_returned_verbatim() {
        let reply = RawUpstreamReply::TransportError("HTTP 502: bad gateway".to_string());
        assert_eq!(
            run(reply, &["a.txt"]),
            Reconciled::Error("HTTP 502: bad gateway".to_string())
        );
    }

    #[test]
    fn error_field_in_body_counts_as_error_indicator() {
        let quota = RawUpstreamReply::Json(json!({"error": "Predictions limit exceeded"}));
        assert_eq!(summary(run(quota, &["a.log"])).1, Provenance::Mock);

        let other = RawUpstreamReply::Json(json!({"error": "invalid chatflow id"}));
        assert_eq!(run(other, &["a.log"]), Reconciled::Error("invalid chatflow id".into()));

        let blank = RawUpstreamReply::Json(json!({"error": "", "text": "fine"}));
        assert_eq!(run(blank, &[]), Reconciled::Message("fine".into()));
    }

    #[test]
    fn quota_signature_is_configurable() {
        let policy = ReconcilePolicy {
            quota_signature: "rate limited".to_string(),
        };
        let reply = RawUpstreamReply::TransportError("HTTP 429: rate limited".to_string());
        let result = reconcile(&reply, &names(&["a.txt"]), &policy);
        assert_eq!(summary(result).1, Provenance::Mock);

        let default_sig = RawUpstreamReply::TransportError("Predictions limit exceeded".into());
        assert!(matches!(
            reconcile(&default_sig, &names(&["a.txt"]), &policy),
            Reconciled::Error(_)
        ));
    }

    #[test]
    fn accepts_direct_array_body() {
        let reply = RawUpstreamReply::Json(json!([
            {"filename": "auth.log", "type": "Log File", "contents": "Brute force attempts"}
        ]));
        let (items, provenance) = summary(run(reply, &["auth.log"]));
        assert_eq!(provenance, Provenance::Upstream);
        assert_eq!(items, vec![EvidenceItem::new("auth.log", "Log File", "Brute force attempts")]);
    }

    #[test]
    fn accepts_top_level_summary_field() {
        let reply = RawUpstreamReply::Json(json!({
            "evidenceSummary": [{"filename": "a.txt", "type": "Text File", "contents": "memo"}],
            "text": "ignored"
        }));
        let (items, _) = summary(run(reply, &[]));
        assert_eq!(items[0].contents, "memo");
    }

    #[test]
    fn tries_text_then_answer() {
        let encoded = r#"{"evidenceSummary":[{"filename":"b.exe","type":"Executable","contents":"packed"}]}"#;
        let reply = RawUpstreamReply::Json(json!({"text": "plain prose", "answer": encoded}));
        let (items, provenance) = summary(run(reply, &["b.exe"]));
        assert_eq!(provenance, Provenance::Upstream);
        assert_eq!(items[0].contents, "packed");
    }

    #[test]
    fn strips_markdown_fence_around_encoded_json() {
        let text = "```json\n{\"evidenceSummary\":[{\"filename\":\"a\",\"type\":\"b\",\"contents\":\"c\"}]}\n```";
        let reply = RawUpstreamReply::Json(json!({"text": text}));
        let (items, _) = summary(run(reply, &["a"]));
        assert_eq!(items, vec![EvidenceItem::new("a", "b", "c")]);
    }

    #[test]
    fn one_line_fence_with_language_tag_still_parses() {
        let text = "```json{\"evidenceSummary\":[{\"filename\":\"a\",\"type\":\"b\",\"contents\":\"c\"}]}```";
        let reply = RawUpstreamReply::Json(json!({"answer": text}));
        let (items, provenance) = summary(run(reply, &["a"]));
        assert_eq!(provenance, Provenance::Upstream);
        assert_eq!(items, vec![EvidenceItem::new("a", "b", "c")]);
    }

    #[test]
    fn invalid_upstream_items_fall_through_to_next_shape() {
        let reply = RawUpstreamReply::Json(json!({
            "evidenceSummary": [{"filename": "a.txt", "type": null, "contents": "x"}],
            "text": "{\"evidenceSummary\":[{\"filename\":\"a.txt\",\"type\":\"Text File\",\"contents\":\"ok\"}]}"
        }));
        let (items, provenance) = summary(run(reply, &["a.txt"]));
        assert_eq!(provenance, Provenance::Upstream);
        assert_eq!(items[0].contents, "ok");
    }

    #[test]
    fn plain_content_is_a_chat_message() {
        let reply = RawUpstreamReply::Json(json!({
            "message": {"content": "Chain of custody documents every transfer."}
        }));
        assert_eq!(
            run(reply, &["a.txt"]),
            Reconciled::Message("Chain of custody documents every transfer.".to_string())
        );

        let reply = RawUpstreamReply::Json(json!({"text": "   ", "answer": "From answer"}));
        assert_eq!(run(reply, &[]), Reconciled::Message("From answer".to_string()));
    }

    #[test]
    fn unknown_shapes_and_unparseable_bodies_are_repaired() {
        let reply = RawUpstreamReply::Json(json!({"status": "ok", "data": 42}));
        let (items, provenance) = summary(run(reply, &["photo.JPG"]));
        assert_eq!(provenance, Provenance::Repaired);
        assert_eq!(items, vec![EvidenceItem::new("photo.JPG", "JPEG Image", "JPEG Image")]);

        let reply = RawUpstreamReply::Unparseable("<html>oops</html>".to_string());
        let (items, _) = summary(run(reply, &["mystery.bin2"]));
        assert_eq!(items[0].file_type, "Unknown File Type");
    }

    #[test]
    fn never_invents_entries_without_requested_files() {
        let replies = [
            RawUpstreamReply::Json(json!({"message": {"content": "{\"evidenceSummary\":[]}"}})),
            RawUpstreamReply::Json(json!(null)),
            RawUpstreamReply::Json(json!(17)),
            RawUpstreamReply::Unparseable(String::new()),
            RawUpstreamReply::TransportError("Predictions limit exceeded".to_string()),
        ];
        for reply in replies {
            let (items, _) = summary(run(reply, &[]));
            assert!(items.is_empty());
        }
    }

    #[test]
    fn accepted_summary_survives_encoding_as_message_content() {
        let original = vec![
            EvidenceItem::new("a.txt", "Text File", "Ransom note"),
            EvidenceItem::new("a.txt", "Text File", "Duplicate kept"),
            EvidenceItem::new("c.pcap", "Packet Capture", "Beaconing to 10.0.0.5"),
        ];
        let encoded = serde_json::to_string(&json!({ "evidenceSummary": original })).unwrap();
        let reply = RawUpstreamReply::Json(json!({"message": {"content": encoded}}));
        let (items, provenance) = summary(run(reply, &["a.txt", "c.pcap"]));
        assert_eq!(provenance, Provenance::Upstream);
        assert_eq!(items, original);
    }

    #[test]
    fn fence_stripping() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("```[]```"), "[]");
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\n\"a\":1}\n```"), "{\n\"a\":1}");
    }
}
