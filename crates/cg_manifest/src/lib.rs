use std::path::Path;

mod error;
mod mainspec;

pub use error::ManifestError;
pub use mainspec::{descend, MainSpec};
pub use serde_json::Value as Manifest;

/// Outcome of probing a directory for one configured manifest filename.
///
/// A read failure (including "not found") is never fatal and simply
/// advances to the next candidate manifest; only a JSON parse failure
/// is fatal.
pub enum ManifestOutcome {
    Missing,
    Malformed(ManifestError),
    Found(Manifest),
}

/// Reads and parses `<directory>/<filename>`.
///
/// Any I/O error reading the file (not just "not found") is treated as
/// [`ManifestOutcome::Missing`] so resolution can fall through to the
/// next manifest name; errors other than not-found are logged rather
/// than silently dropped.
pub fn read_manifest(directory: &Path, filename: &str) -> ManifestOutcome {
    let path = directory.join(filename);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %err, "manifest read failed; treating as missing");
            }
            return ManifestOutcome::Missing;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => ManifestOutcome::Found(value),
        Err(source) => ManifestOutcome::Malformed(ManifestError::Malformed { path, source }),
    }
}
