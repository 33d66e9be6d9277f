use clap::Parser;
use go_exec::GoExecutor;
use go_exec_server::{create_app, run_server};
use std::{net::SocketAddr, time::Duration};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    addr: SocketAddr,

    /// Per-command time ceiling in seconds
    #[arg(short, long, default_value = "60")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = GoExecutor::default().check_tools() {
        warn!("{}; executions will fail until it is installed", e);
    }

    let app = create_app(Duration::from_secs(args.timeout));
    run_server(app, args.addr).await?;

    Ok(())
}
