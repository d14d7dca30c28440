//! Option-name to parameter-name rename table

use crate::interaction::OptionTree;

/// Per-node rename table mapping api option names to parameter names.
///
/// Renames apply in registration order, so `a -> b` followed by `b -> c`
/// moves `a` all the way to `c`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connectors {
    renames: Vec<(String, String)>,
}

impl Connectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rename from `api_name` to `param_name`
    pub fn with(mut self, api_name: impl Into<String>, param_name: impl Into<String>) -> Self {
        self.insert(api_name, param_name);
        self
    }

    /// Add or replace a rename; a replaced rename keeps its original position
    pub fn insert(&mut self, api_name: impl Into<String>, param_name: impl Into<String>) {
        let api_name = api_name.into();
        let param_name = param_name.into();
        match self.renames.iter_mut().find(|(api, _)| *api == api_name) {
            Some((_, param)) => *param = param_name,
            None => self.renames.push((api_name, param_name)),
        }
    }

    pub fn get(&self, api_name: &str) -> Option<&str> {
        self.renames
            .iter()
            .find(|(api, _)| api == api_name)
            .map(|(_, param)| param.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    /// Move every present api-named value to its parameter name
    pub fn apply(&self, args: &mut OptionTree) {
        for (api_name, param_name) in &self.renames {
            if let Some(value) = args.remove(api_name.as_str()) {
                args.insert(param_name.clone(), value);
            }
        }
    }

    /// Non-mutating variant of [`Connectors::apply`]
    pub fn renamed(&self, args: &OptionTree) -> OptionTree {
        let mut out = args.clone();
        self.apply(&mut out);
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Connectors
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut connectors = Self::new();
        for (api_name, param_name) in iter {
            connectors.insert(api_name, param_name);
        }
        connectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> OptionTree {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_apply_renames_present_keys() {
        let connectors = Connectors::new().with("x", "value");
        let mut map = args(json!({"x": 5, "y": 1}));
        connectors.apply(&mut map);
        assert_eq!(map, args(json!({"value": 5, "y": 1})));
        assert!(!map.contains_key("x"));
    }

    #[test]
    fn test_apply_ignores_missing_keys() {
        let connectors = Connectors::new().with("absent", "param");
        let mut map = args(json!({"y": 1}));
        connectors.apply(&mut map);
        assert_eq!(map, args(json!({"y": 1})));
    }

    #[test]
    fn test_renamed_leaves_input_untouched() {
        let connectors: Connectors = [("new-name", "new_name")].into_iter().collect();
        let map = args(json!({"new-name": "ferris"}));
        let out = connectors.renamed(&map);
        assert_eq!(out, args(json!({"new_name": "ferris"})));
        assert!(map.contains_key("new-name"));
    }

    #[test]
    fn test_renames_chain_in_registration_order() {
        let forward = Connectors::new().with("a", "b").with("b", "c");
        let backward = Connectors::new().with("b", "c").with("a", "b");

        assert_eq!(forward.renamed(&args(json!({"a": 1}))), args(json!({"c": 1})));
        assert_eq!(backward.renamed(&args(json!({"a": 1}))), args(json!({"b": 1})));
    }

    #[test]
    fn test_reinsert_replaces_target_in_place() {
        let mut connectors = Connectors::new().with("x", "first").with("y", "other");
        connectors.insert("x", "second");

        assert_eq!(connectors.len(), 2);
        assert_eq!(connectors.get("x"), Some("second"));
        let mut map = args(json!({"x": 1}));
        connectors.apply(&mut map);
        assert_eq!(map, args(json!({"second": 1})));
    }

    #[test]
    fn test_empty_table_is_identity() {
        let connectors = Connectors::new();
        assert!(connectors.is_empty());
        let map = args(json!({"x": 5}));
        assert_eq!(connectors.renamed(&map), map);
    }
}
