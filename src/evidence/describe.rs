use super::schema::{EvidenceSet, UploadedFileMetadata};
use std::fmt::Write;

/// One-line status for an uploaded file, chosen by its MIME class.
pub fn describe_upload(meta: &UploadedFileMetadata) -> String {
    let mime = meta.mime.as_str();
    if mime.starts_with("image/") {
        "Image file ready for metadata analysis".to_string()
    } else if is_archive_mime(mime) {
        "Archive detected - contains multiple evidence files".to_string()
    } else if let Some(preview) = &meta.preview {
        let lines = meta
            .line_count
            .unwrap_or_else(|| preview.split('\n').count() as u64);
        format!("Text file ({lines} lines of potential evidence)")
    } else {
        "File ready for analysis".to_string()
    }
}

/// The "Files Analyzed" block appended to answers when evidence is present.
/// Empty string when the set has no files.
pub fn describe_set(set: &EvidenceSet) -> String {
    if set.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n\n**Files Analyzed:**\n");
    for meta in &set.files {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "- {} ({:.2} KB): {}",
            meta.filename,
            meta.size_bytes as f64 / 1024.0,
            describe_upload(meta)
        );
    }
    out
}

fn is_archive_mime(mime: &str) -> bool {
    matches!(
        mime,
        "application/zip"
            | "application/vnd.rar"
            | "application/x-7z-compressed"
            | "application/x-tar"
            | "application/gzip"
            | "application/x-bzip2"
            | "application/x-xz"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::classify::classify_by_extension;

    fn meta(name: &str, size: u64, preview: Option<&str>) -> UploadedFileMetadata {
        let (file_type, mime) = classify_by_extension(name);
        UploadedFileMetadata {
            filename: name.to_string(),
            path: name.to_string(),
            file_type: file_type.to_string(),
            size_bytes: size,
            mime: mime.to_string(),
            preview: preview.map(str::to_string),
            line_count: None,
        }
    }

    #[test]
    fn describes_by_mime_class() {
        assert_eq!(
            describe_upload(&meta("cam.jpg", 10, None)),
            "Image file ready for metadata analysis"
        );
        assert_eq!(
            describe_upload(&meta("nested.zip", 10, None)),
            "Archive detected - contains multiple evidence files"
        );
        assert_eq!(
            describe_upload(&meta("auth.log", 10, Some("a\nb\nc"))),
            "Text file (3 lines of potential evidence)"
        );
        assert_eq!(describe_upload(&meta("disk.e01", 10, None)), "File ready for analysis");
    }

    #[test]
    fn line_count_covers_the_whole_file_not_the_preview() {
        let mut big = meta("big.log", 50_000, Some(&"x".repeat(500)));
        big.line_count = Some(10_001);
        assert_eq!(
            describe_upload(&big),
            "Text file (10001 lines of potential evidence)"
        );
    }

    #[test]
    fn archive_read_text_reports_full_line_count() {
        use crate::evidence::archive::{read_archive, tests::build_zip, ArchiveOptions};

        let body = "GET /index.html 200\n".repeat(2_000);
        let data = build_zip(&[("access.log", body.as_bytes())]);
        let files = read_archive(&data, &ArchiveOptions::default()).unwrap();
        assert_eq!(
            describe_upload(&files[0]),
            "Text file (2001 lines of potential evidence)"
        );
    }

    #[test]
    fn set_block_lists_sizes_in_kilobytes() {
        let set = EvidenceSet::new("case.zip", vec![meta("auth.log", 2048, Some("one line"))]);
        let block = describe_set(&set);
        assert!(block.starts_with("\n\n**Files Analyzed:**\n"));
        assert!(block.contains("- auth.log (2.00 KB): Text file (1 lines of potential evidence)"));
    }

    #[test]
    fn empty_set_has_no_block() {
        assert_eq!(describe_set(&EvidenceSet::new("empty.zip", Vec::new())), "");
    }
}
