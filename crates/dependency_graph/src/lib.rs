//! Orchestrates the source scanner and the resolver over the transitive
//! closure of `require(...)` imports reachable from an entry file.

mod graph;
mod record;
mod scanner;

pub use graph::Grapher;
pub use record::{DependencyRecord, FileCache, FileRecord, Resolver, UNRESOLVABLE_DYNAMIC_IMPORT};
