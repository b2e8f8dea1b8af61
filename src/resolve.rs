//! Core resolution pipeline: extract, merge, and re-render the config.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! precedence chain testable with synthetic inputs. Steps:
//!
//! 1. Extract the config mapping from the raw text (reader)
//! 2. Overlay environment variables onto matching top-level keys
//! 3. Apply CLI overrides (highest priority)
//! 4. Render the merged mapping back into the original text (writer)
//!
//! Precedence is strict and total: CLI override > environment variable >
//! file-declared value.

use std::path::Path;

use serde_json::{Map, Value};

use crate::env::merge_env;
use crate::error::EnvServeError;
use crate::format::Format;
use crate::overrides::apply_overrides;
use crate::persist;
use crate::reader::read_config;
use crate::writer::write_config;

/// All pre-loaded data needed to resolve a config. No I/O happens here.
pub struct ResolveInput {
    /// Raw config file contents.
    pub raw: String,
    pub format: Format,
    /// Identifier the embedded literal is assigned to (js/html formats).
    pub global_name: String,
    /// Raw environment pairs (pass `std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Raw `key.path=value` override strings, applied in order.
    pub overrides: Vec<String>,
}

/// A fully resolved configuration plus the file contents that carry it.
pub struct Resolved {
    pub config: Map<String, Value>,
    /// New file contents: the original text with the merged config spliced in.
    pub output: String,
}

/// Resolve configuration from pre-loaded inputs.
pub fn resolve(input: &ResolveInput) -> Result<Resolved, EnvServeError> {
    let file_config = read_config(input.format, &input.raw, &input.global_name)?;
    let with_env = merge_env(&file_config, input.env_vars.iter().cloned());
    let config = apply_overrides(with_env, &input.overrides);
    let output = write_config(&input.raw, &config, input.format, &input.global_name)?;
    Ok(Resolved { config, output })
}

/// Resolve the config file at `path` and write the result back to the same
/// path — the file is both source and sink.
///
/// Composes format detection and the persistence gate around [`resolve`].
/// Runs once, synchronously, at startup, strictly before any listener
/// exists; a failure at any step leaves the file untouched.
pub fn resolve_and_persist(
    path: &Path,
    global_name: &str,
    env_vars: Vec<(String, String)>,
    overrides: Vec<String>,
) -> Result<Map<String, Value>, EnvServeError> {
    let format = Format::from_path(path)?;
    let raw = persist::load_raw(path)?;
    let resolved = resolve(&ResolveInput {
        raw,
        format,
        global_name: global_name.to_string(),
        env_vars,
        overrides,
    })?;
    persist::write_back(path, &resolved.output)?;
    tracing::info!(path = %path.display(), "resolved configuration written back");
    Ok(resolved.config)
}
