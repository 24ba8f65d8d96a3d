//! Text versus binary classification for candidate files.
//!
//! Classification is a cheap heuristic applied in three steps: a MIME guess from
//! the extension, a fixed allow-list of text extensions, and finally a sniff of
//! the first bytes of the file. It never fails; anything that cannot be decided
//! is treated as binary.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Number of leading bytes inspected when sniffing content.
pub const SNIFF_LEN: usize = 512;

/// Extension to MIME type registry, bundled because no system registry is
/// guaranteed to exist. Only the top-level category is ever consulted.
static MIME_TYPES: &[(&str, &str)] = &[
    ("bat", "text/plain"),
    ("c", "text/plain"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("etx", "text/x-setext"),
    ("h", "text/plain"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ics", "text/calendar"),
    ("js", "text/javascript"),
    ("ksh", "text/plain"),
    ("markdown", "text/markdown"),
    ("md", "text/markdown"),
    ("mjs", "text/javascript"),
    ("pl", "text/plain"),
    ("py", "text/x-python"),
    ("rtx", "text/richtext"),
    ("sgm", "text/x-sgml"),
    ("sgml", "text/x-sgml"),
    ("srt", "text/plain"),
    ("text", "text/plain"),
    ("tsv", "text/tab-separated-values"),
    ("txt", "text/plain"),
    ("vcf", "text/x-vcard"),
    ("xml", "text/xml"),
    ("7z", "application/x-7z-compressed"),
    ("avi", "video/x-msvideo"),
    ("bin", "application/octet-stream"),
    ("bmp", "image/bmp"),
    ("bz2", "application/x-bzip2"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("exe", "application/octet-stream"),
    ("gif", "image/gif"),
    ("gz", "application/gzip"),
    ("ico", "image/vnd.microsoft.icon"),
    ("jar", "application/java-archive"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("o", "application/octet-stream"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("so", "application/octet-stream"),
    ("svg", "image/svg+xml"),
    ("tar", "application/x-tar"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("wav", "audio/x-wav"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("zip", "application/zip"),
];

/// Extensions always treated as text, matched case-insensitively.
static TEXT_EXTENSIONS: &[&str] = &[
    "txt", "py", "js", "html", "css", "json", "xml", "yaml", "yml", "md", "rst", "csv", "log",
    "ini", "cfg", "conf", "sh", "bash", "c", "cpp", "h", "hpp", "java", "r", "m", "mat", "dat",
];

/// How a file was classified, and by which step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The MIME guess has a `text/` top-level type.
    TextMime,
    /// The extension is on the text allow-list.
    TextExtension,
    /// The first bytes contain no NUL and decode as UTF-8.
    TextContent,
    /// Sniffing found a NUL byte.
    BinaryNul,
    /// Sniffing found bytes that are not valid UTF-8.
    BinaryEncoding,
    /// The file could not be opened or read.
    Unreadable,
}

impl Classification {
    /// Whether this classification makes the file eligible for rewriting.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Classification::TextMime | Classification::TextExtension | Classification::TextContent
        )
    }
}

/// Returns `true` if `path` should be treated as a text file.
pub fn is_text(path: &Path) -> bool {
    let class = classify(path);
    debug!(path = %path.display(), ?class, "classified");
    class.is_text()
}

/// Classifies `path`, trying each heuristic in priority order.
pub fn classify(path: &Path) -> Classification {
    if mime_type(path).is_some_and(|mime| mime.starts_with("text/")) {
        return Classification::TextMime;
    }
    if has_text_extension(path) {
        return Classification::TextExtension;
    }
    sniff(path)
}

/// Guesses a MIME type from the file's extension using the bundled registry.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = lowercase_extension(path)?;
    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Checks the file's extension against the text allow-list.
pub fn has_text_extension(path: &Path) -> bool {
    lowercase_extension(path)
        .map(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Inspects up to `SNIFF_LEN` leading bytes of the file.
pub fn sniff(path: &Path) -> Classification {
    let mut chunk = Vec::with_capacity(SNIFF_LEN);
    let read = File::open(path).and_then(|f| f.take(SNIFF_LEN as u64).read_to_end(&mut chunk));
    if let Err(e) = read {
        debug!(path = %path.display(), error = %e, "sniff failed");
        return Classification::Unreadable;
    }
    classify_bytes(&chunk)
}

/// Applies the content heuristic to an in-memory sample.
pub fn classify_bytes(chunk: &[u8]) -> Classification {
    if chunk.contains(&0) {
        Classification::BinaryNul
    } else if std::str::from_utf8(chunk).is_ok() {
        Classification::TextContent
    } else {
        Classification::BinaryEncoding
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|os| os.to_str())
        .map(|s| s.to_lowercase())
}
