/// Label for extensions with no entry in the type table.
pub const UNKNOWN_FILE_TYPE: &str = "Unknown File Type";

/// MIME for extensions with no entry in the MIME table.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Extensions whose contents are decoded for a text preview.
const TEXT_LIKE_EXTENSIONS: &[&str] = &[
    "txt", "log", "csv", "tsv", "json", "xml", "html", "htm", "md", "markdown", "ini", "cfg",
    "conf", "yaml", "yml", "eml", "sql",
];

/// Lowercased extension: the text after the last `.`, or the whole name when
/// there is no dot.
pub fn extension_of(filename: &str) -> String {
    filename.rsplit('.').next().unwrap_or("").to_lowercase()
}

/// Classify a filename by extension into `(type label, MIME type)`.
///
/// Total and deterministic; unknown extensions yield [`UNKNOWN_FILE_TYPE`]
/// and [`UNKNOWN_MIME`].
pub fn classify_by_extension(filename: &str) -> (&'static str, &'static str) {
    let ext = extension_of(filename);
    (type_label(&ext), mime_type(&ext))
}

pub fn is_text_like(ext: &str) -> bool {
    TEXT_LIKE_EXTENSIONS.contains(&ext)
}

fn type_label(ext: &str) -> &'static str {
    match ext {
        // Office documents
        "doc" => "Microsoft Word Document",
        "docx" => "Microsoft Word Document (OpenXML)",
        "xls" => "Microsoft Excel Spreadsheet",
        "xlsx" => "Microsoft Excel Spreadsheet (OpenXML)",
        "ppt" => "Microsoft PowerPoint Presentation",
        "pptx" => "Microsoft PowerPoint Presentation (OpenXML)",
        "odt" => "OpenDocument Text",
        "ods" => "OpenDocument Spreadsheet",
        "rtf" => "Rich Text Document",
        "pdf" => "PDF Document",

        // Forensic evidence containers
        "e01" | "ex01" => "EnCase Evidence File",
        "l01" | "lx01" => "EnCase Logical Evidence File",
        "aff" | "aff4" => "Advanced Forensic Format Image",
        "ad1" => "FTK Logical Image",
        "dd" | "raw" => "Raw Disk Image",
        "img" => "Disk Image",
        "iso" => "ISO Disc Image",
        "vmdk" => "VMware Virtual Disk",
        "vhd" | "vhdx" => "Virtual Hard Disk",
        "mem" | "vmem" => "Memory Dump",
        "dmp" => "Crash Dump",
        "pcap" => "Packet Capture",
        "pcapng" => "Packet Capture (Next Generation)",

        // Archives
        "zip" => "ZIP Archive",
        "rar" => "RAR Archive",
        "7z" => "7-Zip Archive",
        "tar" => "TAR Archive",
        "gz" | "tgz" => "GZIP Archive",
        "bz2" => "BZIP2 Archive",
        "xz" => "XZ Archive",

        // Images
        "jpg" | "jpeg" => "JPEG Image",
        "png" => "PNG Image",
        "gif" => "GIF Image",
        "bmp" => "Bitmap Image",
        "tif" | "tiff" => "TIFF Image",
        "webp" => "WebP Image",
        "heic" => "HEIC Image",
        "svg" => "SVG Image",

        // Text and structured data
        "txt" => "Text File",
        "md" | "markdown" => "Markdown Document",
        "csv" => "CSV File",
        "tsv" => "TSV File",
        "json" => "JSON File",
        "xml" => "XML File",
        "html" | "htm" => "HTML Document",
        "yaml" | "yml" => "YAML File",
        "ini" | "cfg" | "conf" => "Configuration File",
        "sql" => "SQL Script",
        "db" | "sqlite" | "sqlite3" => "SQLite Database",
        "eml" => "Email Message",
        "msg" => "Outlook Message",
        "pst" | "ost" => "Outlook Data File",

        // Logs
        "log" => "Log File",
        "evtx" => "Windows Event Log",
        "evt" => "Windows Event Log (Legacy)",
        "etl" => "Event Trace Log",

        // Executables and scripts
        "exe" => "Executable",
        "dll" => "Dynamic Link Library",
        "sys" => "System Driver",
        "msi" => "Windows Installer Package",
        "bin" => "Binary File",
        "elf" | "so" => "ELF Binary",
        "apk" => "Android Package",
        "bat" | "cmd" => "Batch Script",
        "ps1" => "PowerShell Script",
        "sh" => "Shell Script",
        "py" => "Python Script",
        "js" => "JavaScript File",

        // Windows artifacts
        "lnk" => "Windows Shortcut",
        "pf" => "Windows Prefetch File",
        "reg" => "Registry Export",
        "dat" => "Data File",

        _ => UNKNOWN_FILE_TYPE,
    }
}

fn mime_type(ext: &str) -> &'static str {
    match ext {
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "rtf" => "application/rtf",
        "pdf" => "application/pdf",
        "iso" => "application/x-iso9660-image",
        "pcap" | "pcapng" => "application/vnd.tcpdump.pcap",
        "zip" => "application/zip",
        "rar" => "application/vnd.rar",
        "7z" => "application/x-7z-compressed",
        "tar" => "application/x-tar",
        "gz" | "tgz" => "application/gzip",
        "bz2" => "application/x-bzip2",
        "xz" => "application/x-xz",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "svg" => "image/svg+xml",
        "txt" | "log" | "ini" | "cfg" | "conf" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        "json" => "application/json",
        "xml" => "application/xml",
        "html" | "htm" => "text/html",
        "yaml" | "yml" => "application/yaml",
        "sql" => "application/sql",
        "db" | "sqlite" | "sqlite3" => "application/vnd.sqlite3",
        "eml" => "message/rfc822",
        "msg" => "application/vnd.ms-outlook",
        "evtx" | "evt" => "application/x-ms-evtx",
        "exe" | "dll" | "sys" => "application/vnd.microsoft.portable-executable",
        "msi" => "application/x-msi",
        "elf" | "so" => "application/x-elf",
        "apk" => "application/vnd.android.package-archive",
        "sh" => "application/x-sh",
        "py" => "text/x-python",
        "js" => "text/javascript",
        "bat" | "cmd" => "application/x-bat",
        "ps1" => "text/plain",
        _ => UNKNOWN_MIME,
    }
}
