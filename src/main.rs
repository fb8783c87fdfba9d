use std::time::Duration;

use anyhow::{Context, Result};

use dataset_gallery::app::GalleryApp;
use dataset_gallery::config::ClientConfig;

const USAGE: &str = "\
Usage: dsgallery [--url <URL>] [--timeout <SECS>] [DATASET]

Browse, select and delete the images of a dataset.

Options:
  --url <URL>        dataset server (default: $DSGALLERY_URL or http://localhost:8675)
  --timeout <SECS>   per-request timeout (default: $DSGALLERY_TIMEOUT_SECS or 30)
  -h, --help         show this help
";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dataset_gallery=info".parse()?),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        return Ok(());
    }

    let mut config = ClientConfig::from_env().context("Failed to read configuration")?;
    if let Some(url) = args.opt_value_from_str::<_, String>("--url")? {
        config = config.with_base_url(&url);
    }
    if let Some(secs) = args.opt_value_from_str::<_, u64>("--timeout")? {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let dataset = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok())
        .unwrap_or_default();

    let app = GalleryApp::connect(config)?;
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    app.run(&dataset, input, &mut std::io::stdout()).await
}
