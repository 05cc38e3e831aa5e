//! Resort map tool server binary
//!
//! ## Usage
//!
//! ```bash
//! # Run over stdio against a local hotel API
//! resort-map-mcp
//!
//! # Point at another API and serve the map widget
//! RESORT_MAP_API_BASE_URL=http://api.internal:8080 resort-map-mcp --widget-html public/resort-map.html
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use map_client::config::{ENV_BASE_URL, ENV_TIMEOUT_S};
use map_client::{ClientConfig, HttpResortApi};
use map_mcp::McpServer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "resort-map-mcp", version, about = "Hotel map tool server over stdio")]
struct Args {
    /// Base URL of the hotel REST API
    #[arg(long, env = ENV_BASE_URL)]
    api_base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_S)]
    timeout_s: Option<f64>,

    /// HTML document served as the map widget resource
    #[arg(long)]
    widget_html: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs to stderr so they never mix with protocol output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resort_map_mcp=info,map_mcp=info,map_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    tracing::info!("Starting resort map tool server v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = args.api_base_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = args.timeout_s {
        if !(secs.is_finite() && secs > 0.0) {
            return Err(format!("--timeout-s must be positive: {}", secs).into());
        }
        config = config.with_timeout(Duration::from_secs_f64(secs));
    }
    tracing::info!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "hotel API");

    let api = HttpResortApi::new(config)?;
    let mut server = McpServer::new(Arc::new(api))?;

    if let Some(path) = args.widget_html {
        let html = tokio::fs::read_to_string(&path).await?;
        tracing::info!(path = %path.display(), "serving map widget");
        server = server.with_widget_html(html);
    }

    tracing::info!("Tool server ready, listening on stdio");
    server.run_stdio().await?;

    Ok(())
}
