use std::sync::Arc;

use require_scanner::ImportDescriptor;

use crate::record::FileRecord;

/// Parses `file`'s contents and runs the scanner over the result.
///
/// A file that isn't valid UTF-8 or doesn't parse is logged and treated
/// as contributing zero descriptors rather than aborting the walk — one
/// malformed file should not prevent the rest of the graph from being
/// built.
pub(crate) fn descriptors_for(file: &Arc<FileRecord>) -> Vec<ImportDescriptor> {
    let source = match std::str::from_utf8(file.contents()) {
        Ok(source) => source,
        Err(err) => {
            tracing::warn!(path = %file.path().display(), error = %err, "file is not valid UTF-8; scanning as empty");
            return Vec::new();
        }
    };

    match swc_utils_parse::try_parse_ecma_src_with_file(file.path().display().to_string(), source) {
        Ok((source_file, module)) => require_scanner::scan(&source_file, &module),
        Err(errors) => {
            tracing::warn!(path = %file.path().display(), ?errors, "parse failed; scanning as empty");
            Vec::new()
        }
    }
}
