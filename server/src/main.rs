use anyhow::Result;
use axum::Router;
use boolir_core::corpus::PREVIEW_CHARS;
use boolir_core::Corpus;
use boolir_server::{build_app, ServerConfig};
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory of .txt documents to load at startup
    #[arg(long)]
    docs: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Characters of each document shown in results
    #[arg(long, default_value_t = PREVIEW_CHARS)]
    preview_chars: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let corpus = match &args.docs {
        Some(dir) => Corpus::from_dir(dir)?,
        None => Corpus::new(),
    };
    let config = ServerConfig { preview_chars: args.preview_chars, ..ServerConfig::from_env() };
    let app: Router = build_app(corpus, config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
