use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

/// The unit of disk content, identified by its absolute path. Contents and
/// path are fixed at construction; the dependency list is assigned exactly
/// once, later, by whatever walks the graph (generic here — this crate has
/// no opinion on what a "dependency" is beyond a value of type `D`).
///
/// The `OnceLock` gives an immutable record the same "already assigned,
/// short-circuit" check a mutable, mutation-based cycle sentinel would:
/// a second `set_dependencies` call is rejected rather than silently
/// overwriting the first.
#[derive(Debug)]
pub struct FileRecord<D> {
    path: PathBuf,
    contents: Vec<u8>,
    dependencies: OnceLock<Vec<D>>,
}

impl<D> FileRecord<D> {
    pub fn new(path: PathBuf, contents: Vec<u8>) -> Self {
        Self {
            path,
            contents,
            dependencies: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// `Some` once a graph walk has assigned this record's dependency list.
    pub fn dependencies(&self) -> Option<&[D]> {
        self.dependencies.get().map(Vec::as_slice)
    }

    /// Assigns the dependency list. Returns the rejected list back to the
    /// caller if one was already assigned — callers that lose this race
    /// should discard their own computation and trust whichever list won.
    pub fn set_dependencies(&self, dependencies: Vec<D>) -> Result<(), Vec<D>> {
        self.dependencies.set(dependencies)
    }
}

/// Process-wide mapping from absolute candidate path to `FileRecord`,
/// shared across every resolver/grapher instance that is handed the same
/// cache. Invariant: at most one record exists per path for the cache's
/// lifetime — matching on `DashMap::entry`'s `Occupied`/`Vacant` variants
/// keeps the read-or-insert atomic per shard, so concurrent first-readers
/// of the same path all observe the same winning record.
#[derive(Debug, Default)]
pub struct FileCache<D> {
    inner: DashMap<PathBuf, Arc<FileRecord<D>>>,
}

impl<D> FileCache<D> {
    pub fn new() -> Self {
        Self { inner: DashMap::new() }
    }

    pub fn get(&self, path: &Path) -> Option<Arc<FileRecord<D>>> {
        self.inner.get(path).map(|entry| entry.clone())
    }

    /// Returns the cached record at `path`, or reads it via `read` and
    /// inserts it if absent. `read` returning `None` means "not found" and
    /// is never cached, so a later attempt can retry the read.
    pub fn get_or_read(
        &self,
        path: &Path,
        read: impl FnOnce() -> Option<Vec<u8>>,
    ) -> Option<Arc<FileRecord<D>>> {
        if let Some(existing) = self.get(path) {
            return Some(existing);
        }
        match self.inner.entry(path.to_owned()) {
            dashmap::mapref::entry::Entry::Occupied(occupied) => Some(occupied.get().clone()),
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                let contents = read()?;
                let record = Arc::new(FileRecord::new(path.to_owned(), contents));
                vacant.insert(record.clone());
                Some(record)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dependencies_assigned_exactly_once() {
        let record: FileRecord<u32> = FileRecord::new(PathBuf::from("/a/b.js"), b"x".to_vec());
        assert!(record.dependencies().is_none());
        assert!(record.set_dependencies(vec![1, 2]).is_ok());
        assert_eq!(record.dependencies(), Some(&[1, 2][..]));
        let rejected = record.set_dependencies(vec![3]);
        assert_eq!(rejected, Err(vec![3]));
        assert_eq!(record.dependencies(), Some(&[1, 2][..]));
    }

    #[test]
    fn directory_is_derived_from_path() {
        let record: FileRecord<u32> = FileRecord::new(PathBuf::from("/a/b/c.js"), Vec::new());
        assert_eq!(record.directory(), Path::new("/a/b"));
    }

    #[test]
    fn cache_reads_once_and_shares_the_record() {
        let cache: FileCache<u32> = FileCache::new();
        let mut reads = 0;
        let first = cache
            .get_or_read(Path::new("/a/b.js"), || {
                reads += 1;
                Some(b"one".to_vec())
            })
            .unwrap();
        let second = cache
            .get_or_read(Path::new("/a/b.js"), || {
                reads += 1;
                Some(b"two".to_vec())
            })
            .unwrap();
        assert_eq!(reads, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_read_is_not_cached() {
        let cache: FileCache<u32> = FileCache::new();
        let result = cache.get_or_read(Path::new("/a/missing.js"), || None);
        assert!(result.is_none());
        assert!(cache.get(Path::new("/a/missing.js")).is_none());
    }
}
