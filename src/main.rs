//! Event Hub - Binary Entry Point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use event_hub::server;
use event_hub::{Args, Config, EventHubResult};

#[tokio::main]
async fn main() -> EventHubResult<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = Config::from_args(args)?;
    tracing::info!(
        name = event_hub::NAME,
        version = event_hub::VERSION,
        data_file = %config.data_file.display(),
        "starting"
    );

    server::run(config).await
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
