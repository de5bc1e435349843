use std::sync::Arc;

use require_scanner::Reference;

/// The well-known error recorded on every dynamic-import edge. A
/// `require(...)` call whose argument isn't a string literal can't be
/// resolved without evaluating the program, which this crate never does.
pub const UNRESOLVABLE_DYNAMIC_IMPORT: &str = "unresolvable dynamic import";

/// File identity and contents, annotated in place (exactly once) with the
/// dependency list a [`crate::Grapher`] walk produces.
pub type FileRecord = node_resolver::FileRecord<DependencyRecord>;

/// The process-wide path-keyed cache backing [`FileRecord`] identity.
pub type FileCache = node_resolver::FileCache<DependencyRecord>;

/// A [`node_resolver::Resolver`] specialized to this crate's dependency
/// record type, so a [`crate::Grapher`] and its `Resolver` share one cache.
pub type Resolver = node_resolver::Resolver<DependencyRecord>;

/// The resolved view of one Import Descriptor from one File Record's
/// perspective. Exactly one of `file`/`error` is populated once resolution
/// for this edge has terminated.
#[derive(Debug, Clone)]
pub struct DependencyRecord {
    pub path: String,
    pub is_static: bool,
    pub references: Vec<Reference>,
    pub file: Option<Arc<FileRecord>>,
    pub error: Option<String>,
}
