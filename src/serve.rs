//! Static file serving over HTTP or HTTPS.
//!
//! The startup routine binds the listener and returns an owned
//! [`ServerHandle`]; shutdown goes through that handle rather than any
//! process-wide state. The config pipeline has already run (and written the
//! file back) by the time this module is invoked.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::EnvServeError;
use crate::tls::{self, TlsMaterial};

/// Everything the listener needs.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Directory whose contents are served.
    pub root: PathBuf,
    pub port: u16,
    /// PEM material for HTTPS; `None` serves plain HTTP.
    pub tls: Option<TlsMaterial>,
}

/// Owned handle to a running server.
///
/// Dropping the handle does not stop the server; stopping requires an
/// explicit [`shutdown`](ServerHandle::shutdown).
#[derive(Debug)]
pub struct ServerHandle {
    handle: Handle,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// Address the listener actually bound (useful with port 0 in tests).
    pub async fn bound_addr(&self) -> Option<SocketAddr> {
        self.handle.listening().await
    }

    /// Gracefully stop the server and wait for the serve task to finish.
    pub async fn shutdown(self) {
        self.handle.graceful_shutdown(Some(Duration::from_secs(5)));
        let _ = self.task.await;
    }
}

/// Bind the listener and start serving `options.root`.
///
/// Returns once the listener is bound; a bind failure is surfaced from the
/// serve task as [`EnvServeError::Server`].
pub async fn start(options: ServeOptions) -> Result<ServerHandle, EnvServeError> {
    let app = Router::new()
        .fallback_service(ServeDir::new(&options.root))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], options.port));
    let handle = Handle::new();

    let task = match &options.tls {
        Some(material) => {
            let config = tls::rustls_config(material).await?;
            let server = axum_server::bind_rustls(addr, config).handle(handle.clone());
            tokio::spawn(server.serve(app.into_make_service()))
        }
        None => {
            let server = axum_server::bind(addr).handle(handle.clone());
            tokio::spawn(server.serve(app.into_make_service()))
        }
    };

    // `listening()` resolves to None when binding failed; recover the actual
    // error from the finished serve task.
    match handle.listening().await {
        Some(bound) => {
            tracing::info!(%bound, root = %options.root.display(), "serving static files");
            Ok(ServerHandle { handle, task })
        }
        None => {
            let err = match task.await {
                Ok(Err(e)) => e,
                Ok(Ok(())) => std::io::Error::other("server exited before binding"),
                Err(join) => std::io::Error::other(join),
            };
            Err(EnvServeError::Server(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::TcpStream;
    use tempfile::TempDir;

    fn options(root: &TempDir, port: u16) -> ServeOptions {
        ServeOptions {
            root: root.path().to_path_buf(),
            port,
            tls: None,
        }
    }

    #[tokio::test]
    async fn binds_and_reports_address() {
        let root = TempDir::new().unwrap();
        let server = start(options(&root, 0)).await.unwrap();
        let addr = server.bound_addr().await.unwrap();
        assert_ne!(addr.port(), 0);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn serves_files_from_root() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("hello.txt"), "hi there").unwrap();

        let server = start(options(&root, 0)).await.unwrap();
        let addr = server.bound_addr().await.unwrap();

        let response = tokio::task::spawn_blocking(move || {
            let mut stream = TcpStream::connect(("127.0.0.1", addr.port())).unwrap();
            stream
                .write_all(b"GET /hello.txt HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                .unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).unwrap();
            response
        })
        .await
        .unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("hi there"));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_a_server_error() {
        let root = TempDir::new().unwrap();
        let first = start(options(&root, 0)).await.unwrap();
        let port = first.bound_addr().await.unwrap().port();

        let err = start(options(&root, port)).await.unwrap_err();
        assert!(matches!(err, EnvServeError::Server(_)));
        first.shutdown().await;
    }

    #[tokio::test]
    async fn https_listener_starts_with_self_signed_material() {
        let root = TempDir::new().unwrap();
        let material = crate::tls::acquire(&crate::tls::CertSource::SelfSigned)
            .await
            .unwrap();
        let server = start(ServeOptions {
            root: root.path().to_path_buf(),
            port: 0,
            tls: Some(material),
        })
        .await
        .unwrap();
        assert!(server.bound_addr().await.is_some());
        server.shutdown().await;
    }
}
