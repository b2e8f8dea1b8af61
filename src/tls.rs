//! Certificate acquisition: PEM files from disk or a generated self-signed pair.
//!
//! Acquisition completes before the listener binds — the startup sequence
//! suspends here and only then hands the material to the TLS listener. The
//! original tool also fed an OpenSSL cipher string to its TLS layer; rustls
//! does not accept cipher strings and ships curated defaults, so no cipher
//! knob exists here (see DESIGN.md).

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;
use rcgen::{CertifiedKey, generate_simple_self_signed};
use tokio::task;

use crate::error::EnvServeError;

/// Where the server certificate comes from.
#[derive(Debug, Clone)]
pub enum CertSource {
    /// PEM `cert` and `key` files, with an optional `ca` appended to the chain.
    Files {
        cert: PathBuf,
        key: PathBuf,
        ca: Option<PathBuf>,
    },
    /// A throwaway self-signed pair for `localhost`.
    SelfSigned,
}

impl CertSource {
    /// Decide the certificate source from CLI-style flags.
    ///
    /// Plain HTTP needs no source. Self-signing wins over file paths; HTTPS
    /// without self-signing requires both cert and key.
    pub fn from_flags(
        https: bool,
        self_signed: bool,
        cert: Option<PathBuf>,
        key: Option<PathBuf>,
        ca: Option<PathBuf>,
    ) -> Result<Option<Self>, EnvServeError> {
        if !https && !self_signed {
            return Ok(None);
        }
        if self_signed {
            return Ok(Some(CertSource::SelfSigned));
        }
        match (cert, key) {
            (Some(cert), Some(key)) => Ok(Some(CertSource::Files { cert, key, ca })),
            _ => Err(EnvServeError::MissingTlsMaterial),
        }
    }
}

/// PEM-encoded certificate material ready for the TLS listener.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    pub cert_pem: String,
    pub key_pem: String,
}

/// Acquire certificate material from `source`.
///
/// Self-signed generation runs on a blocking task; file loading reads the
/// PEM documents as-is.
pub async fn acquire(source: &CertSource) -> Result<TlsMaterial, EnvServeError> {
    match source {
        CertSource::Files { cert, key, ca } => {
            let mut cert_pem = read_pem(cert)?;
            if let Some(ca) = ca {
                if !cert_pem.ends_with('\n') {
                    cert_pem.push('\n');
                }
                cert_pem.push_str(&read_pem(ca)?);
            }
            let key_pem = read_pem(key)?;
            tracing::info!(cert = %cert.display(), key = %key.display(), "loaded certificate material");
            Ok(TlsMaterial { cert_pem, key_pem })
        }
        CertSource::SelfSigned => {
            let material = task::spawn_blocking(generate_self_signed)
                .await
                .map_err(|e| EnvServeError::Certificate {
                    reason: e.to_string(),
                })??;
            tracing::info!("generated self-signed certificate for localhost");
            Ok(material)
        }
    }
}

/// Build the rustls listener config from PEM material.
pub async fn rustls_config(material: &TlsMaterial) -> Result<RustlsConfig, EnvServeError> {
    RustlsConfig::from_pem(
        material.cert_pem.clone().into_bytes(),
        material.key_pem.clone().into_bytes(),
    )
    .await
    .map_err(|e| EnvServeError::Certificate {
        reason: e.to_string(),
    })
}

fn generate_self_signed() -> Result<TlsMaterial, EnvServeError> {
    let CertifiedKey { cert, signing_key } =
        generate_simple_self_signed(vec!["localhost".to_string()]).map_err(|e| {
            EnvServeError::Certificate {
                reason: e.to_string(),
            }
        })?;
    Ok(TlsMaterial {
        cert_pem: cert.pem(),
        key_pem: signing_key.serialize_pem(),
    })
}

fn read_pem(path: &Path) -> Result<String, EnvServeError> {
    std::fs::read_to_string(path).map_err(|e| EnvServeError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
