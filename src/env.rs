use serde_json::{Map, Value};

/// Overlay environment variables onto matching top-level config keys.
///
/// A key is replaced only when it already exists in the config; environment
/// variables never introduce new keys, and nested keys are never consulted.
/// The replacement is the variable's raw string — typed coercion is reserved
/// for CLI overrides, which sit above the environment in precedence.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn merge_env(
    config: &Map<String, Value>,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Map<String, Value> {
    let vars: std::collections::HashMap<String, String> = vars.into_iter().collect();

    config
        .iter()
        .map(|(key, value)| match vars.get(key) {
            Some(raw) => {
                tracing::debug!(%key, "environment variable overrides config key");
                (key.clone(), Value::String(raw.clone()))
            }
            None => (key.clone(), value.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn config(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn matching_key_replaced_with_raw_string() {
        let cfg = config(&[("port", json!(3000))]);
        let merged = merge_env(&cfg, vars(&[("port", "8080")]));
        // Always a string: the environment carries no type information.
        assert_eq!(merged["port"], json!("8080"));
    }

    #[test]
    fn unmatched_env_keys_ignored() {
        let cfg = config(&[("a", json!(1)), ("b", json!(2))]);
        let merged = merge_env(&cfg, vars(&[("a", "x"), ("c", "y")]));
        assert_eq!(merged["a"], json!("x"));
        assert_eq!(merged["b"], json!(2));
        assert!(!merged.contains_key("c"));
    }

    #[test]
    fn nested_keys_never_considered() {
        let cfg = config(&[("server", json!({"port": 3000}))]);
        let merged = merge_env(&cfg, vars(&[("port", "9999")]));
        assert_eq!(merged["server"], json!({"port": 3000}));
    }

    #[test]
    fn whole_nested_value_replaced_when_top_level_matches() {
        let cfg = config(&[("server", json!({"port": 3000}))]);
        let merged = merge_env(&cfg, vars(&[("server", "disabled")]));
        assert_eq!(merged["server"], json!("disabled"));
    }

    #[test]
    fn empty_environment_is_identity() {
        let cfg = config(&[("a", json!(1))]);
        let merged = merge_env(&cfg, vars(&[]));
        assert_eq!(merged, cfg);
    }

    #[test]
    fn input_mapping_unchanged() {
        let cfg = config(&[("port", json!(3000))]);
        let _ = merge_env(&cfg, vars(&[("port", "8080")]));
        assert_eq!(cfg["port"], json!(3000));
    }
}
