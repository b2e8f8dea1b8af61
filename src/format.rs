use std::path::Path;

use crate::error::EnvServeError;

/// Config file format, detected from the substring after the final `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// The whole file is the serialized config.
    Json,
    /// The config is an object literal assigned to a global variable.
    Js,
    /// Same as [`Js`](Format::Js); the assignment lives somewhere in the markup.
    Html,
}

impl Format {
    /// Detect the format from a file path's extension.
    ///
    /// Only the extension is consulted — no file I/O happens here, so an
    /// unsupported format is reported before the file is ever touched.
    pub fn from_path(path: &Path) -> Result<Self, EnvServeError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "json" => Ok(Format::Json),
            "js" => Ok(Format::Js),
            "html" => Ok(Format::Html),
            other => Err(EnvServeError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Whether the config is embedded in surrounding text rather than being
    /// the entire file.
    pub fn is_embedded(self) -> bool {
        matches!(self, Format::Js | Format::Html)
    }
}
