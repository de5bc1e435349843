//! Configurable node-style specifier resolution.
//!
//! A [`Resolver`] maps a textual specifier plus a base directory to a
//! concrete [`FileRecord`] on disk, generalizing the classic node module
//! resolution algorithm (extension probing, package-manifest entry-point
//! lookup, directory-index fallback, upward module-directory search) over
//! a fully configurable [`ResolverConfig`] rather than hardcoding any of it.

mod config;
mod error;
mod file_record;
mod resolver;

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use file_record::{FileCache, FileRecord};
pub use resolver::Resolver;
