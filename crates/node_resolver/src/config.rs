use cg_manifest::MainSpec;
use serde::Deserialize;

/// The resolver's tunable knobs, deserializable from a host-supplied JSON
/// file but defaulting to node-style resolution out of the box.
///
/// Every field matches one row of the resolver configuration table: a
/// candidate list consulted strictly in declared order, first success wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
    #[serde(default = "default_mains")]
    pub mains: Vec<MainSpec>,
    #[serde(default = "default_index")]
    pub index: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            modules: default_modules(),
            packages: default_packages(),
            mains: default_mains(),
            index: default_index(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec![String::new(), ".js".to_owned()]
}

fn default_modules() -> Vec<String> {
    vec!["node_modules".to_owned()]
}

fn default_packages() -> Vec<String> {
    vec!["package.json".to_owned()]
}

fn default_mains() -> Vec<MainSpec> {
    vec![MainSpec::Leaf("main".to_owned())]
}

fn default_index() -> String {
    "index".to_owned()
}
