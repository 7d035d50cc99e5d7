use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pinned_client::ReqwestFetcher;
use pinned_core::pipeline::PinnedRepoService;

#[derive(Parser)]
#[command(
    name = "pinned",
    version,
    about = "Fetch a GitHub profile's pinned repositories as JSON"
)]
struct Cli {
    /// Profile to look up
    username: String,

    /// Fetch timeout in seconds
    #[arg(long, env = "PINNED_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pinned=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let fetcher = ReqwestFetcher::with_timeout(Duration::from_secs(cli.timeout_secs))?;
    let service = PinnedRepoService::new(fetcher);

    let records = service.extract(&cli.username).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{output}");

    Ok(())
}
