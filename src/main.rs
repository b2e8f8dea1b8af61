use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use env_serve::cli::Cli;
use env_serve::error::EnvServeError;
use env_serve::resolve::resolve_and_persist;
use env_serve::serve::{self, ServeOptions};
use env_serve::tls::{self, CertSource};
use env_serve::writer::to_pretty_json;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "env_serve=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), EnvServeError> {
    let config = resolve_and_persist(
        &cli.config_file,
        &cli.global_name,
        std::env::vars().collect(),
        cli.overrides.clone(),
    )?;

    // From here on the config file is already rewritten; a certificate or
    // bind failure below does not roll that back (matches the original tool).
    let source = CertSource::from_flags(
        cli.https,
        cli.self_signed,
        cli.cert.clone(),
        cli.cert_key.clone(),
        cli.ca.clone(),
    )?;
    let material = match &source {
        Some(source) => Some(tls::acquire(source).await?),
        None => None,
    };

    let scheme = if cli.is_https() { "https" } else { "http" };
    let server = serve::start(ServeOptions {
        root: cli.root.clone(),
        port: cli.port,
        tls: material,
    })
    .await?;

    println!("Server url: {scheme}://localhost:{}", cli.port);
    println!("Config:\n{}", to_pretty_json(&config));

    tokio::signal::ctrl_c()
        .await
        .map_err(EnvServeError::Server)?;
    tracing::info!("shutdown signal received");
    server.shutdown().await;
    Ok(())
}
