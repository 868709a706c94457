pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use clap::Parser;
use cli::{CacheCommands, CachingCommands, Cli, Commands, ResolveArgs};
pub use config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("config.toml already exists, left untouched.");
        }
        return Ok(());
    }

    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = init_metrics(&config)?;
    init_tracing(&config)?;

    match cli.command {
        None | Some(Commands::Serve) => run_server(config, prometheus_handle).await,

        Some(Commands::Resolve {
            name,
            address,
            website,
            place_id,
            skip_cache,
            types,
        }) => {
            let args = ResolveArgs {
                name: name.join(" "),
                address,
                website,
                place_id,
                skip_cache,
                types,
            };
            cli::cmd_resolve(config, args).await
        }

        Some(Commands::Classify { name, types }) => {
            cli::cmd_classify(&name.join(" "), &types);
            Ok(())
        }

        Some(Commands::Cache { command }) => match command {
            CacheCommands::Purge => cli::cmd_cache_purge(&config).await,
            CacheCommands::Clear => cli::cmd_cache_clear(&config).await,
        },

        Some(Commands::Caching { command }) => match command {
            CachingCommands::On => cli::cmd_caching_set(&config, true).await,
            CachingCommands::Off => cli::cmd_caching_set(&config, false).await,
            CachingCommands::Status => cli::cmd_caching_status(&config).await,
        },

        Some(Commands::Init) => Ok(()),
    }
}

fn init_metrics(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let mut log_level = config.general.log_level.clone();
    if config.general.suppress_connection_errors {
        log_level.push_str(",reqwest::retry=off,hyper_util=off");
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "presence-resolver")?
            .extra_field("env", "production")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "presence-resolver v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    if !config.server.enabled {
        anyhow::bail!("server.enabled is false in config, nothing to serve");
    }

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);

    let strategies = shared.resolver.strategies();
    info!(
        search = strategies.search_configured,
        ai = ?strategies.ai_providers,
        "Discovery strategies configured"
    );

    let api_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(api_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 API running at http://0.0.0.0:{}", port);
    info!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("Error listening for shutdown: {}", e),
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
