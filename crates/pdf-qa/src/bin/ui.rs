//! PDF Q&A chat UI binary
//!
//! Run with: cargo run -p pdf-qa --bin pdf-qa-ui

use clap::Parser;
use pdf_qa::{config::RagConfig, ui};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pdf-qa-ui", version, about = "Browser UI for the PDF Q&A server")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "PDF_QA_CONFIG")]
    config: Option<PathBuf>,

    /// Port to serve the UI on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_qa=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.ui.port = port;
    }

    println!("\nUI: http://{}:{}", config.ui.host, config.ui.port);
    println!("API: {}\n", config.ui.api_base_url);

    ui::serve(&config.ui).await?;

    Ok(())
}
