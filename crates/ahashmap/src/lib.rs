//! `HashMap`/`HashSet` aliases hashed with `ahash` instead of `SipHash`.
//!
//! Every cache in this workspace (resolver path cache, per-directory
//! resolution cache, scanner descriptor folding) is keyed by a path or
//! specifier string and never exposed across a trust boundary, so the
//! DoS-resistance of the default hasher buys nothing and ahash is
//! meaningfully faster.

#[cfg(feature = "ahash")]
pub type AHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
#[cfg(feature = "ahash")]
pub type AHashSet<K> = std::collections::HashSet<K, ahash::RandomState>;

#[cfg(not(feature = "ahash"))]
pub type AHashMap<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "ahash"))]
pub type AHashSet<K> = std::collections::HashSet<K>;
