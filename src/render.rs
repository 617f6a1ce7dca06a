use crate::evidence::{EvidenceSummary, Provenance, Reconciled};
use crate::session::UploadStatus;

const EMPTY_SUMMARY: &str = "No evidence files to summarise.";

/// Markdown bullet list, one line per item.
pub fn render_summary(items: &EvidenceSummary) -> String {
    if items.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }
    items
        .iter()
        .map(|item| format!("- **{}** ({}): {}", item.filename, item.file_type, item.contents))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_outcome(outcome: &Reconciled) -> String {
    match outcome {
        Reconciled::Summary { items, provenance } => {
            let body = render_summary(items);
            match provenance {
                Provenance::Mock => format!(
                    "_Prediction quota exceeded; showing placeholder results._\n\n{body}"
                ),
                Provenance::Upstream | Provenance::Repaired => body,
            }
        }
        Reconciled::Message(text) => text.clone(),
        Reconciled::Error(text) => format!("⚠️ Error: {text}"),
    }
}

pub fn render_upload(status: &UploadStatus) -> String {
    match status {
        UploadStatus::Accepted { archive, files } => {
            format!("Loaded {files} evidence file(s) from {archive}.")
        }
        UploadStatus::Rejected { archive, reason } => {
            format!("⚠️ Could not read {archive}: {reason}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::EvidenceItem;

    #[test]
    fn summary_renders_as_bullets() {
        let items = vec![
            EvidenceItem::new("a.txt", "Text File", "memo"),
            EvidenceItem::new("b.exe", "Executable", "packed"),
        ];
        assert_eq!(
            render_summary(&items),
            "- **a.txt** (Text File): memo\n- **b.exe** (Executable): packed"
        );
        assert_eq!(render_summary(&Vec::new()), EMPTY_SUMMARY);
    }

    #[test]
    fn outcome_variants() {
        let mock = Reconciled::Summary {
            items: vec![EvidenceItem::new("x.zip", "MockType", "placeholder")],
            provenance: Provenance::Mock,
        };
        assert!(render_outcome(&mock).starts_with("_Prediction quota exceeded"));
        assert_eq!(render_outcome(&Reconciled::Message("hi".into())), "hi");
        assert_eq!(
            render_outcome(&Reconciled::Error("HTTP 500".into())),
            "⚠️ Error: HTTP 500"
        );
    }

    #[test]
    fn upload_status_lines() {
        let ok = UploadStatus::Accepted {
            archive: "case.zip".into(),
            files: 3,
        };
        assert_eq!(render_upload(&ok), "Loaded 3 evidence file(s) from case.zip.");
        let bad = UploadStatus::Rejected {
            archive: "x.zip".into(),
            reason: "bad".into(),
        };
        assert!(render_upload(&bad).contains("x.zip: bad"));
    }
}
