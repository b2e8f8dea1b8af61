//! Command-line surface.
//!
//! One flat command: resolve the config file, then serve. Flags mirror the
//! tool's two halves — the config pipeline (`--global`, `--config-file`,
//! `--override`) and the listener (`--port`, `--root`, the TLS group).

use std::path::PathBuf;

use clap::Parser;

/// Static file server that resolves embedded runtime configuration from
/// file, environment variables, and CLI overrides — writing the result back
/// into the file it came from.
#[derive(Debug, Parser)]
#[command(name = "env-serve", version)]
pub struct Cli {
    /// Global variable name the config literal is assigned to, eg. window.yourName.
    #[arg(short = 'g', long = "global", value_name = "NAME", default_value = "appConfig")]
    pub global_name: String,

    /// File where config exists; also receives the resolved config.
    #[arg(short = 'f', long, value_name = "FILE", default_value = "index.html")]
    pub config_file: PathBuf,

    /// Override a config value; dotted keys address nested paths (repeatable).
    #[arg(short = 'o', long = "override", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Port to listen on.
    #[arg(short = 'p', long, default_value_t = 3000)]
    pub port: u16,

    /// Directory to serve.
    #[arg(short = 'r', long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Serve over HTTPS.
    #[arg(short = 'S', long)]
    pub https: bool,

    /// Path to cert file.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub cert: Option<PathBuf>,

    /// Path to cert key file.
    #[arg(short = 'k', long = "cert-key", value_name = "FILE")]
    pub cert_key: Option<PathBuf>,

    /// Path to ca file, appended to the served chain.
    #[arg(short = 'C', long, value_name = "FILE")]
    pub ca: Option<PathBuf>,

    /// Generate a self-signed certificate for the server (implies HTTPS).
    #[arg(short = 's', long)]
    pub self_signed: bool,
}

impl Cli {
    /// HTTPS is on when requested explicitly or implied by self-signing.
    pub fn is_https(&self) -> bool {
        self.https || self.self_signed
    }
}
