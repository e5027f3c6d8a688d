//! dashboard_agent: serves host telemetry snapshots over HTTP.

use dashboard_agent::collector::LiveCollector;
use dashboard_agent::config::{parse_args, AgentConfig, CliAction, USAGE};
use dashboard_agent::http::router;
use dashboard_agent::state::AppState;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_port = match parse_args(std::env::args()) {
        CliAction::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        CliAction::Run(port) => port,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dashboard_agent=info")),
        )
        .init();

    let cfg = AgentConfig::from_env(cli_port);
    info!(
        cpu_interval_ms = cfg.collector.cpu_interval.as_millis() as u64,
        df_timeout_ms = cfg.collector.df_timeout.as_millis() as u64,
        mount = %cfg.collector.mount_point,
        proc_root = %cfg.collector.proc_root.display(),
        "collector configured"
    );

    let state = AppState::new(LiveCollector::live(cfg.collector));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("dashboard agent listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
