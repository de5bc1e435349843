use serde::Deserialize;
use serde_json::Value;

/// A single entry of the `mains` resolver configuration key: either a
/// single manifest key (`"main"`) or an ordered path of nested keys
/// (`["browser", "main"]`) to descend into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MainSpec {
    Leaf(String),
    Path(Vec<String>),
}

impl MainSpec {
    fn keys(&self) -> &[String] {
        match self {
            MainSpec::Leaf(key) => std::slice::from_ref(key),
            MainSpec::Path(keys) => keys,
        }
    }
}

/// Descends into `manifest` following `spec`'s key path, level by level,
/// and returns the leaf as a string if it is present and JS-truthy.
///
/// A leaf counts as truthy unless it is JSON `null`, `false`, `0`, `""`,
/// or absent, matching a dynamic language's truthiness check rather than
/// a plain `Option::is_some`.
pub fn descend(manifest: &Value, spec: &MainSpec) -> Option<String> {
    let mut current = manifest;
    for key in spec.keys() {
        current = current.as_object()?.get(key.as_str())?;
    }
    if is_truthy(current) {
        current.as_str().map(|s| s.to_owned())
    } else {
        None
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn leaf_spec_reads_top_level_key() {
        let manifest = json!({"main": "entry.js"});
        let result = descend(&manifest, &MainSpec::Leaf("main".to_owned()));
        assert_eq!(result, Some("entry.js".to_owned()));
    }

    #[test]
    fn path_spec_descends_nested_keys() {
        let manifest = json!({"browser": {"main": "browser-entry.js"}});
        let spec = MainSpec::Path(vec!["browser".to_owned(), "main".to_owned()]);
        assert_eq!(descend(&manifest, &spec), Some("browser-entry.js".to_owned()));
    }

    #[test]
    fn falsy_leaf_is_skipped() {
        let manifest = json!({"main": false});
        assert_eq!(descend(&manifest, &MainSpec::Leaf("main".to_owned())), None);
    }

    #[test]
    fn empty_string_leaf_is_skipped() {
        let manifest = json!({"main": ""});
        assert_eq!(descend(&manifest, &MainSpec::Leaf("main".to_owned())), None);
    }

    #[test]
    fn missing_key_returns_none() {
        let manifest = json!({"module": "mod.js"});
        assert_eq!(descend(&manifest, &MainSpec::Leaf("main".to_owned())), None);
    }

    #[test]
    fn non_string_leaf_returns_none_via_as_str() {
        let manifest = json!({"main": 42});
        assert_eq!(descend(&manifest, &MainSpec::Leaf("main".to_owned())), None);
    }
}
