use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

use ahashmap::{AHashMap, AHashSet};

use crate::record::{DependencyRecord, FileRecord, Resolver, UNRESOLVABLE_DYNAMIC_IMPORT};

#[derive(Clone)]
struct CachedOutcome {
    file: Option<Arc<FileRecord>>,
    error: Option<String>,
}

/// Orchestrates the scanner and resolver over the transitive closure of
/// imports reachable from a root file.
///
/// Owns two pieces of state distinct from the resolver's own process-wide
/// file cache: the per-directory resolution cache (keyed by directory,
/// not file, since resolution only depends on the starting directory)
/// and the set of paths currently on the active recursion stack, which
/// catches a cycle before `FileRecord`'s own "already assigned"
/// short-circuit ever gets the chance to (see its doc comment).
pub struct Grapher {
    resolver: Resolver,
    directory_cache: RefCell<AHashMap<(PathBuf, String), CachedOutcome>>,
    active: RefCell<AHashSet<PathBuf>>,
}

impl Grapher {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            directory_cache: RefCell::new(AHashMap::default()),
            active: RefCell::new(AHashSet::default()),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Populates `file`'s dependency tree in place. Idempotent: a file
    /// whose dependency list is already assigned returns immediately
    /// without rescanning. A file already on the active recursion stack
    /// (a cycle) also returns immediately, leaving its Dependency Record on
    /// the far side of the cycle pointing at this partially-built record —
    /// this is the intended cycle representation.
    pub fn analyze(&self, file: &Arc<FileRecord>) {
        if file.dependencies().is_some() {
            return;
        }

        let path = file.path().to_path_buf();
        if !self.active.borrow_mut().insert(path.clone()) {
            return;
        }

        let directory = file.directory().to_path_buf();
        let descriptors = crate::scanner::descriptors_for(file);
        let mut records = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if !descriptor.is_static {
                records.push(DependencyRecord {
                    path: descriptor.path,
                    is_static: false,
                    references: descriptor.references,
                    file: None,
                    error: Some(UNRESOLVABLE_DYNAMIC_IMPORT.to_owned()),
                });
                continue;
            }

            let key = (directory.clone(), descriptor.path.clone());
            let outcome = match self.directory_cache.borrow().get(&key).cloned() {
                Some(cached) => cached,
                None => {
                    let resolved = self.resolve_descriptor(&descriptor.path, &directory);
                    self.directory_cache.borrow_mut().insert(key, resolved.clone());
                    resolved
                }
            };

            if let Some(child) = &outcome.file {
                self.analyze(child);
            }

            records.push(DependencyRecord {
                path: descriptor.path,
                is_static: true,
                references: descriptor.references,
                file: outcome.file,
                error: outcome.error,
            });
        }

        // Losing this race (another thread finished first) is fine: we
        // simply discard our own computation and trust the winner's list.
        let _ = file.set_dependencies(records);
        self.active.borrow_mut().remove(&path);
    }

    fn resolve_descriptor(&self, specifier: &str, directory: &std::path::Path) -> CachedOutcome {
        match self.resolver.resolve(specifier, Some(directory)) {
            Ok(Some(file)) => CachedOutcome { file: Some(file), error: None },
            Ok(None) => CachedOutcome {
                file: None,
                error: Some(format!("unable to locate dependency: {specifier}")),
            },
            Err(err) => {
                tracing::warn!(specifier, directory = %directory.display(), error = %err, "dependency resolution failed");
                CachedOutcome { file: None, error: Some(err.to_string()) }
            }
        }
    }
}
