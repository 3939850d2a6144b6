use clap::Parser;
use hermes_dns_domain::CliOverrides;
use hermes_dns_jobs::{JobRunner, PoolMonitorJob};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "hermes-dns")]
#[command(version = "0.1.0")]
#[command(about = "Hermes DNS - Authoritative DNS server backed by SQLite zone data")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Hermes DNS Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let shutdown = CancellationToken::new();

    let repos = di::Repositories::new(pool.clone());
    repos.log_zone_inventory().await?;
    let dns_services = di::DnsServices::new(&config, &repos, shutdown.clone());

    JobRunner::new()
        .with_pool_monitor(PoolMonitorJob::from_config(pool.clone(), &config.jobs))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let dns_addr = config.server.dns_addr()?;
    let listener_options = server::ListenerOptions::from(&config.server);
    let server_shutdown = shutdown.clone();
    let dns_task = tokio::spawn(async move {
        let result = server::start_dns_server(
            dns_addr,
            dns_services.handler,
            listener_options,
            server_shutdown.clone(),
        )
        .await;
        if let Err(e) = &result {
            error!(error = %e, "DNS server error");
        }
        server_shutdown.cancel();
        result
    });

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        _ = shutdown.cancelled() => {}
    }

    shutdown.cancel();
    let server_result = match dns_task.await {
        Ok(result) => result,
        Err(e) => Err(anyhow::anyhow!("DNS server task failed: {e}")),
    };
    pool.close().await;

    info!("Server shutdown complete");
    server_result
}
