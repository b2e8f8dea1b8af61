use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvServeError {
    #[error("Unsupported config format '{extension}' — expected json, js, or html")]
    UnsupportedFormat { extension: String },

    #[error("Can't find config file under path {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse JSON configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Can not find a '{global_name} = {{ ... }}' assignment in the config file")]
    ConfigNotFound { global_name: String },

    #[error("Wrong configuration format: {reason}")]
    ConfigFormat { reason: String },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("For an HTTPS server at least a cert and key must be provided (or --self-signed)")]
    MissingTlsMaterial,

    #[error("Certificate error: {reason}")]
    Certificate { reason: String },

    #[error("Server error: {0}")]
    Server(std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_the_extension() {
        let err = EnvServeError::UnsupportedFormat {
            extension: "yaml".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("yaml"));
        assert!(msg.contains("json"));
    }

    #[test]
    fn file_not_found_includes_path() {
        let err = EnvServeError::FileNotFound {
            path: "/srv/site/index.html".into(),
        };
        assert!(err.to_string().contains("/srv/site/index.html"));
    }

    #[test]
    fn config_not_found_names_the_global() {
        let err = EnvServeError::ConfigNotFound {
            global_name: "appConfig".into(),
        };
        assert!(err.to_string().contains("appConfig = { ... }"));
    }

    #[test]
    fn missing_tls_material_mentions_self_signed() {
        let err = EnvServeError::MissingTlsMaterial;
        assert!(err.to_string().contains("--self-signed"));
    }
}
