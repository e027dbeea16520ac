use anyhow::bail;
use clap::Parser;
use dominant_color::{ColorPipeline, PipelineConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Derive UI accent colors for one or more image URLs.
#[derive(Debug, Parser)]
#[command(name = "color_probe", version)]
struct Args {
    /// Override the median-cut split depth (ACCENT_MAX_DEPTH).
    #[arg(long)]
    depth: Option<usize>,

    /// Image URLs to probe.
    #[arg(required = true)]
    urls: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // --- 1. Configuration ---
    let mut config = PipelineConfig::from_env();
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    let pipeline = ColorPipeline::new(config)?;
    info!(config = ?pipeline.config(), "starting color probe");

    // --- 2. Ctrl-C cancels in-flight fetches ---
    let (cancel_tx, cancel_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    // --- 3. Derive and report ---
    let results = pipeline.derive_many(&args.urls, cancel_rx).await;
    let mut failures = 0usize;
    for (url, result) in args.urls.iter().zip(results) {
        match result {
            Ok(color) => println!("{url}\t{color}"),
            Err(e) => {
                failures += 1;
                error!(url, error = ?e, "color derivation failed");
                println!("{url}\terror: {}", e.user_message());
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} urls failed", args.urls.len());
    }
    Ok(())
}
