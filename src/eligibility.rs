//! Entry filtering and identifier derivation
//!
//! Decides which archive entries are uploaded and maps each to the identifier
//! used to address the remote resource. Filtering excludes directories, hidden
//! files, system-metadata paths, and anything without a recognized image
//! extension. Identifier derivation is structurally infallible: the filename
//! stem is passed through even when empty or odd-looking, and the remote's
//! rejection becomes that item's error outcome.

use crate::archive::PhotoArchive;
use crate::error::Result;
use tracing::debug;

/// Recognized image extensions, matched case-insensitively
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Path segments that mark OS metadata trees inside archives
const SYSTEM_MARKER_SEGMENTS: [&str; 1] = ["__MACOSX"];

/// Fallback MIME type when the extension is not recognized
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// One eligible archive entry, queued for upload
///
/// Content is intentionally not read at planning time: a corrupt entry must
/// fail at the item level, after `total` is fixed, not during planning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedUpload {
    /// Index of the entry within the archive
    pub index: usize,
    /// Identifier derived from the filename stem (e.g., employee ID)
    pub identifier: String,
    /// Final path segment, sent as the multipart filename
    pub display_name: String,
    /// MIME hint for the multipart part, keyed off the extension
    pub mime_type: &'static str,
}

/// Final path segment, or the whole path when it has no separator
fn final_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Lowercased extension of the final path segment, if any
fn extension(path: &str) -> Option<String> {
    final_segment(path)
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Whether an entry qualifies for upload
///
/// Exclusion rules, applied in order: directory entries, hidden files
/// (final segment starts with `.`), paths under a system-metadata marker
/// segment, and files without a recognized image extension.
pub fn is_eligible(path: &str, is_directory: bool) -> bool {
    if is_directory {
        return false;
    }
    let name = final_segment(path);
    if name.starts_with('.') {
        return false;
    }
    if path
        .split('/')
        .any(|segment| SYSTEM_MARKER_SEGMENTS.contains(&segment))
    {
        return false;
    }
    match extension(path) {
        Some(ext) => IMAGE_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// Derive the upload identifier from an entry path
///
/// Takes the final path segment, then the substring before the first `.`.
/// Always returns a string; it may be empty, which is deliberately not
/// rejected here.
pub fn identifier_from_path(path: &str) -> String {
    let name = final_segment(path);
    name.split('.').next().unwrap_or(name).to_string()
}

/// Display name for an entry: its final path segment
pub fn display_name(path: &str) -> &str {
    final_segment(path)
}

/// MIME type for an entry path, defaulting when the extension is unrecognized
pub fn mime_for_path(path: &str) -> &'static str {
    match extension(path).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// Enumerate the archive and build the ordered eligible set
pub fn plan_uploads(archive: &mut PhotoArchive) -> Result<Vec<PlannedUpload>> {
    let mut planned = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.entry(index)?;
        if !is_eligible(&entry.path, entry.is_directory) {
            debug!(path = %entry.path, "skipping ineligible entry");
            continue;
        }
        planned.push(PlannedUpload {
            index,
            identifier: identifier_from_path(&entry.path),
            display_name: display_name(&entry.path).to_string(),
            mime_type: mime_for_path(&entry.path),
        });
    }
    debug!(eligible = planned.len(), "planned uploads");
    Ok(planned)
}
