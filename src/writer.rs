//! Serializing the merged mapping back into the original document.
//!
//! For JSON the rendered mapping replaces the whole file. For js/html the
//! assignment region is re-located against the supplied text and only the
//! object-literal substring is replaced; every byte outside the region is
//! preserved exactly. The locator runs again here rather than reusing the
//! reader's span — the two steps must not assume they saw identical text.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::error::EnvServeError;
use crate::format::Format;
use crate::splice;

/// Pretty-print a config mapping with the 4-space indent the resolved file
/// carries on disk. The output is valid under the relaxed object-literal
/// grammar by construction.
pub fn to_pretty_json(config: &Map<String, Value>) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    config
        .serialize(&mut serializer)
        .expect("serializing a config mapping to memory cannot fail");
    String::from_utf8(buf).expect("serde_json emits UTF-8")
}

/// Produce the new file contents for `format`, given the original raw text
/// and the merged mapping.
pub fn write_config(
    raw: &str,
    config: &Map<String, Value>,
    format: Format,
    global_name: &str,
) -> Result<String, EnvServeError> {
    let rendered = to_pretty_json(config);

    if !format.is_embedded() {
        return Ok(rendered + "\n");
    }

    let region = splice::locate(raw, global_name)?.ok_or_else(|| EnvServeError::ConfigFormat {
        reason: format!("no '{global_name} = {{ ... }}' assignment to splice into"),
    })?;

    let mut output = String::with_capacity(raw.len() + rendered.len());
    output.push_str(&raw[..region.start]);
    output.push_str(&rendered);
    output.push_str(&raw[region.end..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::JS_DOC;
    use crate::reader::read_config;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test config must be an object"),
        }
    }

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let rendered = to_pretty_json(&map(json!({"server": {"port": 8080}})));
        assert!(rendered.contains("\n    \"server\": {\n        \"port\": 8080\n    }"));
    }

    #[test]
    fn json_replaces_whole_file() {
        let out = write_config("{\"old\": 1}", &map(json!({"new": 2})), Format::Json, "appConfig")
            .unwrap();
        assert!(!out.contains("old"));
        assert!(out.contains("\"new\": 2"));
    }

    #[test]
    fn json_round_trips() {
        let cfg = map(json!({"a": 1, "b": {"c": [true, null, "x"]}}));
        let out = write_config("", &cfg, Format::Json, "appConfig").unwrap();
        let reread = read_config(Format::Json, &out, "appConfig").unwrap();
        assert_eq!(reread, cfg);
    }

    #[test]
    fn js_splice_preserves_surrounding_bytes() {
        let cfg = map(json!({"apiUrl": "https://prod.example.com"}));
        let out = write_config(JS_DOC, &cfg, Format::Js, "appConfig").unwrap();

        let region = crate::splice::locate(JS_DOC, "appConfig").unwrap().unwrap();
        let new_region = crate::splice::locate(&out, "appConfig").unwrap().unwrap();
        assert_eq!(&out[..new_region.start], &JS_DOC[..region.start]);
        assert_eq!(&out[new_region.end..], &JS_DOC[region.end..]);
    }

    #[test]
    fn js_splice_round_trips() {
        let cfg = map(json!({"apiUrl": "/v2", "retries": 5}));
        let out = write_config(JS_DOC, &cfg, Format::Js, "appConfig").unwrap();
        let reread = read_config(Format::Js, &out, "appConfig").unwrap();
        assert_eq!(reread, cfg);
    }

    #[test]
    fn js_splice_works_against_a_different_snapshot() {
        // The writer re-locates the region in whatever text it is handed.
        let other = "/* banner */ appConfig = {stale: true}; tail();";
        let out = write_config(other, &map(json!({"fresh": 1})), Format::Js, "appConfig").unwrap();
        assert!(out.starts_with("/* banner */ appConfig = {"));
        assert!(out.ends_with("; tail();"));
        assert!(out.contains("\"fresh\": 1"));
        assert!(!out.contains("stale"));
    }

    #[test]
    fn js_without_assignment_is_format_error() {
        let err =
            write_config("no config here", &map(json!({})), Format::Js, "appConfig").unwrap_err();
        assert!(matches!(err, EnvServeError::ConfigFormat { .. }));
    }

    #[test]
    fn html_spliced_like_js() {
        let raw = "<script>appConfig = {a: 1};</script>";
        let out = write_config(raw, &map(json!({"a": 2})), Format::Html, "appConfig").unwrap();
        assert!(out.starts_with("<script>appConfig = {"));
        assert!(out.ends_with(";</script>"));
        assert!(out.contains("\"a\": 2"));
    }
}
