use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::sync::watch;
use tracing::{info, warn};

use prombench_core::ScalerConfig;
use prombench_k8s::{KubeCluster, TargetSet};
use prombench_scaler::Oscillator;

use super::settings::Settings;

#[derive(Debug, Args)]
pub struct ScaleArgs {
    /// YAML file or folder that describes the deployments (repeatable)
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// Substitute `{{ .KEY }}` placeholders in the manifests (repeatable)
    #[arg(short = 'v', long = "vars", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Optional scaler.toml providing defaults for every other argument
    #[arg(long, env = "PROMBENCH_SCALER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Field manager recorded by server-side apply
    #[arg(long)]
    pub field_manager: Option<String>,

    /// Number of replicas to scale up to
    pub max: Option<i32>,

    /// Number of replicas to scale down to
    pub min: Option<i32>,

    /// Time to wait before changing the number of replicas, e.g. 15m
    pub interval: Option<String>,

    /// Scaling pattern: burst or step [default: burst]
    pub pattern: Option<String>,

    /// Step height for the step pattern [default: max / 10]
    pub step_factor: Option<i32>,
}

pub async fn run(args: ScaleArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ScalerConfig::from_file(path)?,
        None => ScalerConfig::default(),
    };
    let settings = Settings::resolve(&args, &config)?;

    let targets =
        TargetSet::load(&settings.paths, &settings.vars).context("error parsing manifests")?;
    if targets.deployment_count() == 0 {
        warn!(paths = ?settings.paths, "no deployments found, nothing will be scaled");
    }

    let client = KubeCluster::try_default(settings.field_manager.as_str())
        .await
        .context("error creating k8s client")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    Oscillator::new(client, targets, settings.command)
        .run(shutdown_rx)
        .await;
    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
