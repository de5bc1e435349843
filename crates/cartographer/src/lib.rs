//! The public entry point: resolves an entry specifier against the process
//! working directory, then walks the transitive dependency tree rooted at
//! it.
//!
//! ```ignore
//! let cartographer = Cartographer::new(ResolverConfig::default());
//! let root = cartographer.analyze("./src/index")?;
//! for dep in root.dependencies().unwrap() {
//!     // dep.file, dep.error
//! }
//! ```

mod error;

use std::sync::Arc;

use dependency_graph::{FileRecord, Grapher, Resolver};
pub use dependency_graph::{DependencyRecord, UNRESOLVABLE_DYNAMIC_IMPORT};
pub use error::CartographerError;
pub use node_resolver::ResolverConfig;

pub struct Cartographer {
    grapher: Grapher,
}

impl Cartographer {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_grapher(Grapher::new(Resolver::new(config)))
    }

    /// Builds a facade around a pre-built `Grapher` (and, through it, the
    /// `Resolver` it shares caches with) — the separately-instantiable,
    /// swappable components the facade is allowed to accept.
    pub fn with_grapher(grapher: Grapher) -> Self {
        Self { grapher }
    }

    pub fn resolver(&self) -> &Resolver {
        self.grapher.resolver()
    }

    /// Resolves `specifier` against the process working directory, then
    /// walks its transitive dependency tree. Returns the root file, its
    /// dependency list populated in place.
    pub fn analyze(&self, specifier: &str) -> Result<Arc<FileRecord>, CartographerError> {
        match self.grapher.resolver().resolve(specifier, None)? {
            Some(file) => {
                self.grapher.analyze(&file);
                Ok(file)
            }
            None => Err(CartographerError::FileNotFound(specifier.to_owned())),
        }
    }
}
