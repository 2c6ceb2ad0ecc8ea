use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use topicwatch::{
    config::{LookupOpts, ResourceOpts},
    AlwaysExists, ExistenceCache, ExistenceChecker,
};

#[derive(Parser)]
#[command(version, author = "Lach", about = "Mirrors which topics exist in cluster")]
struct Opts {
    #[command(flatten)]
    resource: ResourceOpts,
    #[command(flatten)]
    lookup: LookupOpts,
    /// Seconds to wait for initial listing before answering
    #[arg(long, default_value_t = 30)]
    sync_timeout: u64,
    #[command(subcommand)]
    sub: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Check whether given topics exist, `name` or `namespace/name`
    Check {
        #[arg(required = true)]
        topics: Vec<String>,
    },
    /// Keep watching and log changes until interrupted
    Watch,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        // never resolve, watch lives until process exit
        futures::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts: Opts = Opts::parse();

    let cache = if opts.lookup.disable_existence_check {
        log::warn!("Existence check disabled, every topic is assumed to exist");
        None
    } else {
        let kind = opts.resource.resource_kind()?;
        let cache = ExistenceCache::try_default(&kind, shutdown_signal())
            .await
            .context("failed to connect to cluster")?;
        Some(cache)
    };
    let checker: Arc<dyn ExistenceChecker> = match &cache {
        Some(cache) => cache.clone(),
        None => Arc::new(AlwaysExists),
    };

    match opts.sub {
        SubCommand::Check { topics } => {
            if let Some(cache) = &cache {
                let timeout = Duration::from_secs(opts.sync_timeout);
                if tokio::time::timeout(timeout, cache.wait_synced())
                    .await
                    .is_err()
                {
                    log::warn!(
                        "Initial listing not finished in {:?}, answers may be incomplete",
                        timeout
                    );
                }
            }
            for topic in topics {
                let (namespace, name) = opts
                    .lookup
                    .resolve(&topic)
                    .with_context(|| format!("bad topic reference {:?}", topic))?;
                let state = if checker.exists(&namespace, &name) {
                    "exists"
                } else {
                    "missing"
                };
                println!("{}/{}: {}", namespace, name, state);
            }
        }
        SubCommand::Watch => {
            shutdown_signal().await;
            if let Some(cache) = &cache {
                log::info!("Stopped, {} topics were known", cache.len());
            }
        }
    }
    Ok(())
}
