//! Optional decorative assets.

use std::path::Path;

/// Read a text asset if it exists. Any failure is logged and skipped.
pub fn load_optional_text(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "optional asset skipped");
            None
        }
    }
}
