use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::file_record::{FileCache, FileRecord};

/// Pure(-ish) mapping from `(specifier, base, config)` to either a resolved
/// file or the absent outcome, with reads routed through a shared,
/// process-wide path-keyed cache.
///
/// Generic over `D`, the dependency-record type a graph walker attaches to
/// each `FileRecord` — this crate has no opinion on what a dependency looks
/// like, only on how a file is found and cached.
pub struct Resolver<D> {
    config: ResolverConfig,
    cache: Arc<FileCache<D>>,
}

impl<D> Resolver<D> {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_cache(config, Arc::new(FileCache::new()))
    }

    /// Builds a resolver sharing an existing cache, e.g. with a grapher
    /// that resolves many files against the same process-wide state.
    pub fn with_cache(config: ResolverConfig, cache: Arc<FileCache<D>>) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<FileCache<D>> {
        &self.cache
    }

    /// Resolves `specifier` against `base` (the process working directory
    /// if omitted). Returns `Ok(None)` for the absent outcome — a missing
    /// file or directory is not an error. Only an empty specifier or a
    /// malformed manifest encountered along the way is fatal.
    pub fn resolve(
        &self,
        specifier: &str,
        base: Option<&Path>,
    ) -> Result<Option<Arc<FileRecord<D>>>, ResolveError> {
        if specifier.is_empty() {
            return Err(ResolveError::EmptySpecifier);
        }
        let base = match base {
            Some(base) => base.to_path_buf(),
            None => std::env::current_dir().expect("process working directory must be available"),
        };

        debug!(specifier, base = %base.display(), "resolving specifier");

        if is_relative(specifier) {
            let force_directory = specifier.ends_with('/');
            let joined = abspath::join_abspath(&base, Path::new(specifier))
                .expect("base directory passed to the resolver must be absolute");
            self.resolve_file_then_directory(&joined, force_directory)
        } else {
            self.resolve_module(&base, specifier)
        }
    }

    /// Attempts file resolution first (unless `force_directory`, e.g. a
    /// trailing `/` on the original specifier), then directory resolution
    /// at the same path. Returns the first success.
    fn resolve_file_then_directory(
        &self,
        path: &Path,
        force_directory: bool,
    ) -> Result<Option<Arc<FileRecord<D>>>, ResolveError> {
        if !force_directory {
            if let Some(file) = self.load_file(path) {
                return Ok(Some(file));
            }
        }
        self.load_directory(path)
    }

    /// For each configured extension in order, forms `path + ext` (the
    /// empty extension yields `path` unchanged) and attempts a read,
    /// consulting and populating the shared path-keyed cache. A read
    /// failure — including a simple miss — advances to the next extension;
    /// only the cache's identity invariant is load-bearing here, not
    /// whether this particular call is a cache hit.
    fn load_file(&self, path: &Path) -> Option<Arc<FileRecord<D>>> {
        for ext in &self.config.extensions {
            let candidate = append_suffix(path, ext);
            trace!(candidate = %candidate.display(), "trying file candidate");
            if let Some(record) = self.cache.get_or_read(&candidate, || read_file(&candidate)) {
                return Some(record);
            }
        }
        None
    }

    /// Walks `self.config.packages` in order looking for a manifest whose
    /// chosen entry point resolves. A malformed manifest aborts the whole
    /// resolution (fatal); a manifest that parses but whose entry point
    /// cannot be located stops the loop at that manifest rather than
    /// trying later ones (step 6's bug-compatible policy — see below).
    fn load_directory(&self, dir: &Path) -> Result<Option<Arc<FileRecord<D>>>, ResolveError> {
        for manifest_name in &self.config.packages {
            match cg_manifest::read_manifest(dir, manifest_name) {
                cg_manifest::ManifestOutcome::Missing => continue,
                cg_manifest::ManifestOutcome::Malformed(err) => return Err(err.into()),
                cg_manifest::ManifestOutcome::Found(manifest) => {
                    let entry = self
                        .config
                        .mains
                        .iter()
                        .find_map(|spec| cg_manifest::descend(&manifest, spec))
                        .unwrap_or_else(|| self.config.index.clone());

                    let entry_path = dir.join(&entry);
                    if let Some(file) = self.load_file(&entry_path) {
                        return Ok(Some(file));
                    }
                    if let Some(file) = self.load_file(&entry_path.join(&self.config.index)) {
                        return Ok(Some(file));
                    }

                    // Step 6: this manifest was chosen and its entry point
                    // failed to resolve past file- and index-fallback.
                    // Deliberately do not try later manifests — fall
                    // straight through to the bare directory index probe.
                    return Ok(self.load_file(&dir.join(&self.config.index)));
                }
            }
        }
        Ok(self.load_file(&dir.join(&self.config.index)))
    }

    /// Walks `base` and each of its ancestors, probing `<ancestor>/<moduleDir>/<name>`
    /// for every configured module directory before moving up, until the
    /// filesystem root is passed or a candidate resolves.
    fn resolve_module(
        &self,
        base: &Path,
        name: &str,
    ) -> Result<Option<Arc<FileRecord<D>>>, ResolveError> {
        let force_directory = name.ends_with('/');
        let trimmed = name.trim_end_matches('/');
        let mut current = base.to_path_buf();
        loop {
            for module_dir in &self.config.modules {
                let candidate = current.join(module_dir).join(trimmed);
                trace!(candidate = %candidate.display(), "trying module candidate");
                if let Some(file) = self.resolve_file_then_directory(&candidate, force_directory)? {
                    return Ok(Some(file));
                }
            }
            if !current.pop() {
                return Ok(None);
            }
        }
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('/') || specifier.starts_with("./") || specifier.starts_with("../")
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }
    let mut combined = path.as_os_str().to_os_string();
    combined.push(suffix);
    PathBuf::from(combined)
}

fn read_file(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(contents) => Some(contents),
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %err, "file read failed; treating as missing candidate");
            }
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_tmpdir::test_tmpdir;

    fn resolver() -> Resolver<()> {
        Resolver::new(ResolverConfig::default())
    }

    #[test]
    fn empty_specifier_is_fatal() {
        let err = resolver().resolve("", None).unwrap_err();
        assert!(matches!(err, ResolveError::EmptySpecifier));
    }

    #[test]
    fn relative_file_resolves_with_extension_probing() {
        let dir = test_tmpdir! {
            "a/main.js" => "require('./b')",
            "a/b.js" => "module.exports = 1;",
        };
        let record = resolver()
            .resolve("./b", Some(&dir.root().join("a")))
            .unwrap()
            .unwrap();
        assert_eq!(record.path(), dir.root().join("a/b.js"));
    }

    #[test]
    fn missing_relative_file_is_absent_not_an_error() {
        let dir = test_tmpdir! {
            "a/main.js" => "",
        };
        let result = resolver().resolve("./missing", Some(&dir.root().join("a"))).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn package_manifest_entry_resolves() {
        let dir = test_tmpdir! {
            "a/lib/package.json" => r#"{"main": "entry.js"}"#,
            "a/lib/entry.js" => "module.exports = 1;",
        };
        let record = resolver()
            .resolve("./lib", Some(&dir.root().join("a")))
            .unwrap()
            .unwrap();
        assert_eq!(record.path(), dir.root().join("a/lib/entry.js"));
    }

    #[test]
    fn directory_index_fallback_without_manifest() {
        let dir = test_tmpdir! {
            "a/lib/index.js" => "module.exports = 1;",
        };
        let record = resolver()
            .resolve("./lib", Some(&dir.root().join("a")))
            .unwrap()
            .unwrap();
        assert_eq!(record.path(), dir.root().join("a/lib/index.js"));
    }

    #[test]
    fn malformed_manifest_is_fatal() {
        let dir = test_tmpdir! {
            "a/lib/package.json" => "{ not json",
        };
        let err = resolver().resolve("./lib", Some(&dir.root().join("a"))).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedManifest(_)));
    }

    #[test]
    fn step_six_skips_later_manifests_once_one_is_chosen() {
        let dir = test_tmpdir! {
            "a/lib/package.json" => r#"{"main": "missing-entry.js"}"#,
            "a/lib/bower.json" => r#"{"main": "entry.js"}"#,
            "a/lib/entry.js" => "module.exports = 1;",
            "a/lib/index.js" => "module.exports = 2;",
        };
        let mut config = ResolverConfig::default();
        config.packages = vec!["package.json".to_owned(), "bower.json".to_owned()];
        let record = Resolver::<()>::new(config)
            .resolve("./lib", Some(&dir.root().join("a")))
            .unwrap()
            .unwrap();
        // package.json was chosen first and its entry failed to resolve, so
        // bower.json's perfectly valid entry is never tried: falls through
        // straight to the bare directory index.
        assert_eq!(record.path(), dir.root().join("a/lib/index.js"));
    }

    #[test]
    fn trailing_slash_forces_directory_resolution() {
        // Without the trailing slash, extension probing for "./lib" would
        // find `a/lib.js` first. The trailing slash must skip file
        // resolution entirely so only the directory's index can satisfy it.
        let dir = test_tmpdir! {
            "a/lib.js" => "must not be picked",
            "a/lib/index.js" => "module.exports = 2;",
        };
        let record = resolver()
            .resolve("./lib/", Some(&dir.root().join("a")))
            .unwrap()
            .unwrap();
        assert_eq!(record.path(), dir.root().join("a/lib/index.js"));
    }

    #[test]
    fn bare_module_walks_up_ancestors() {
        let dir = test_tmpdir! {
            "a/node_modules/x/index.js" => "module.exports = 1;",
            "a/b/c/main.js" => "require('x')",
        };
        let record = resolver()
            .resolve("x", Some(&dir.root().join("a/b/c")))
            .unwrap()
            .unwrap();
        assert_eq!(record.path(), dir.root().join("a/node_modules/x/index.js"));
    }

    #[test]
    fn bare_module_exhausted_is_absent() {
        let dir = test_tmpdir! {
            "a/b/main.js" => "require('nope')",
        };
        let result = resolver().resolve("nope", Some(&dir.root().join("a/b"))).unwrap();
        assert!(result.is_none());
    }

    #[test]
    #[tracing_test::traced_test]
    fn non_not_found_io_error_reading_a_file_candidate_is_logged() {
        use tracing_test::logs_contain;

        // "./lib" is itself a directory; with the empty-string extension,
        // `load_file` tries to read it directly and gets something other
        // than NotFound back. Resolution still falls through to directory
        // resolution (there's no index here either, so the overall result
        // is absent), but the non-NotFound read failure must be logged.
        let dir = test_tmpdir! {
            "a/lib/placeholder.txt" => "",
        };
        let result = resolver().resolve("./lib", Some(&dir.root().join("a"))).unwrap();
        assert!(result.is_none());
        assert!(logs_contain("file read failed"));
    }

    #[test]
    fn sibling_requests_share_the_same_file_record() {
        let dir = test_tmpdir! {
            "a/b.js" => "module.exports = 1;",
        };
        let r = resolver();
        let first = r.resolve("./b", Some(&dir.root().join("a"))).unwrap().unwrap();
        let second = r.resolve("./b", Some(&dir.root().join("a"))).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
