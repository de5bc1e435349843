/// Fatal, top-level failures of [`crate::Cartographer::analyze`].
/// Per-edge failures (dynamic imports, unresolvable dependencies) never
/// surface here — they live on the individual `DependencyRecord`s of the
/// returned file.
#[derive(Debug, thiserror::Error)]
pub enum CartographerError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error(transparent)]
    Resolve(#[from] node_resolver::ResolveError),
}
