/// Fatal resolver failures. Everything else (missing file, missing
/// directory, exhausted module walk) is the absent outcome, not an error —
/// see `Resolver::resolve`.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("specifier must not be empty")]
    EmptySpecifier,
    #[error(transparent)]
    MalformedManifest(#[from] cg_manifest::ManifestError),
}
