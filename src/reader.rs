//! Extracting the config mapping from raw file text.

use serde_json::{Map, Value};

use crate::error::EnvServeError;
use crate::format::Format;
use crate::literal;
use crate::splice;

/// Extract the configuration mapping from `raw` for the given format.
///
/// - `json`: the whole text is parsed; the top level must be an object.
/// - `js`/`html`: the `<global_name> = { ... }` assignment is located and its
///   object literal parsed under the relaxed grammar — never executed.
pub fn read_config(
    format: Format,
    raw: &str,
    global_name: &str,
) -> Result<Map<String, Value>, EnvServeError> {
    if format.is_embedded() {
        let region =
            splice::locate(raw, global_name)?.ok_or_else(|| EnvServeError::ConfigNotFound {
                global_name: global_name.to_string(),
            })?;
        return literal::parse_object_literal(region.as_str(raw));
    }

    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(EnvServeError::ConfigFormat {
            reason: format!("expected a JSON object at the top level, found {}", kind(&other)),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{HTML_DOC, JS_DOC};
    use serde_json::json;

    #[test]
    fn json_whole_file() {
        let map = read_config(Format::Json, r#"{"port": 3000, "debug": true}"#, "appConfig").unwrap();
        assert_eq!(map["port"], json!(3000));
        assert_eq!(map["debug"], json!(true));
    }

    #[test]
    fn json_malformed_is_parse_error() {
        let err = read_config(Format::Json, "{not json", "appConfig").unwrap_err();
        assert!(matches!(err, EnvServeError::Parse(_)));
    }

    #[test]
    fn json_non_object_top_level_rejected() {
        let err = read_config(Format::Json, "[1, 2, 3]", "appConfig").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn js_embedded_literal() {
        let map = read_config(Format::Js, JS_DOC, "appConfig").unwrap();
        assert_eq!(map["apiUrl"], json!("https://api.example.com"));
        assert_eq!(map["retries"], json!(3));
        assert_eq!(map["features"]["darkMode"], json!(false));
    }

    #[test]
    fn html_treated_like_js() {
        let map = read_config(Format::Html, HTML_DOC, "appConfig").unwrap();
        assert_eq!(map["apiUrl"], json!("/api"));
    }

    #[test]
    fn custom_global_name() {
        let raw = "window.settings = {theme: 'dark'};";
        let map = read_config(Format::Js, raw, "settings").unwrap();
        assert_eq!(map["theme"], json!("dark"));
    }

    #[test]
    fn missing_assignment_is_config_not_found() {
        let err = read_config(Format::Js, "console.log('hi');", "appConfig").unwrap_err();
        assert!(matches!(
            err,
            EnvServeError::ConfigNotFound { global_name } if global_name == "appConfig"
        ));
    }

    #[test]
    fn non_literal_body_is_format_error() {
        let raw = "appConfig = {port: getPort()};";
        let err = read_config(Format::Js, raw, "appConfig").unwrap_err();
        assert!(matches!(err, EnvServeError::ConfigFormat { .. }));
    }

    #[test]
    fn unbalanced_braces_is_format_error() {
        let raw = "appConfig = {a: {b: 1};";
        let err = read_config(Format::Js, raw, "appConfig").unwrap_err();
        assert!(matches!(err, EnvServeError::ConfigFormat { .. }));
    }
}
