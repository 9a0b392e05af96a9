//! Oscillator — drives replica counts of a target set on a fixed cadence.
//!
//! Each cycle rewrites the deployments in the target set to the next count
//! from the [`ReplicaSchedule`], applies them through the cluster client,
//! and sleeps for the configured interval. The actual apply is delegated to
//! a [`ClusterClient`].

use tokio::sync::watch;
use tracing::{error, info, warn};

use prombench_core::{Pattern, ScaleCommand};
use prombench_k8s::{ClusterClient, ManifestFile, TargetSet};

use crate::schedule::{ReplicaSchedule, resolve_step_factor};

/// Copy of `targets` holding only deployments, each scaled to `replicas`.
///
/// Files without any deployment are dropped.
pub fn set_replicas(targets: &TargetSet, replicas: i32) -> TargetSet {
    let files = targets
        .files()
        .iter()
        .filter_map(|file| {
            let objects: Vec<_> = file
                .objects
                .iter()
                .filter_map(|object| object.with_replicas(replicas))
                .collect();
            (!objects.is_empty()).then(|| ManifestFile {
                file_name: file.file_name.clone(),
                objects,
            })
        })
        .collect();
    TargetSet::new(files)
}

/// Precomputed max/min copies for the burst pattern.
struct BurstSnapshots {
    high: TargetSet,
    low: TargetSet,
}

/// Scales a target set up and down until told to stop.
pub struct Oscillator<C> {
    client: C,
    targets: TargetSet,
    command: ScaleCommand,
}

impl<C: ClusterClient> Oscillator<C> {
    pub fn new(client: C, targets: TargetSet, command: ScaleCommand) -> Self {
        Self {
            client,
            targets,
            command,
        }
    }

    pub fn command(&self) -> &ScaleCommand {
        &self.command
    }

    /// Apply one scaled copy. Failures are logged and reported as `false`.
    pub async fn apply(&self, replicas: i32, scaled: &TargetSet) -> bool {
        info!(replicas, "scaling deployments");
        match self.client.apply(scaled.files()).await {
            Ok(()) => true,
            Err(e) => {
                error!(replicas, error = %e, "error scaling deployments");
                false
            }
        }
    }

    /// Run the oscillation loop.
    ///
    /// Returns the number of cycles completed once `shutdown` fires (or its
    /// sender is dropped).
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let cmd = &self.command;
        let schedule = self.schedule();

        info!(
            pattern = %cmd.pattern,
            max = cmd.max,
            min = cmd.min,
            interval = ?cmd.interval,
            deployments = self.targets.deployment_count(),
            "starting prombench scaler"
        );

        let burst = match cmd.pattern {
            Pattern::Burst => Some(BurstSnapshots {
                high: set_replicas(&self.targets, cmd.max),
                low: set_replicas(&self.targets, cmd.min),
            }),
            Pattern::Step => None,
        };

        let mut cycles = 0;
        for replicas in schedule {
            if *shutdown.borrow() {
                break;
            }

            let stepped;
            let scaled = match &burst {
                Some(snapshots) if replicas == cmd.max => &snapshots.high,
                Some(snapshots) => &snapshots.low,
                None => {
                    stepped = set_replicas(&self.targets, replicas);
                    &stepped
                }
            };
            self.apply(replicas, scaled).await;
            cycles += 1;

            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(cmd.interval) => {}
            }
        }

        info!(cycles, "prombench scaler shutting down");
        cycles
    }

    fn schedule(&self) -> ReplicaSchedule {
        let cmd = &self.command;
        if cmd.pattern == Pattern::Step {
            let factor = resolve_step_factor(cmd.max, cmd.step_factor);
            if cmd.step_factor != Some(factor) {
                warn!(
                    requested = ?cmd.step_factor,
                    max = cmd.max,
                    step_factor = factor,
                    "step factor unset or out of range, derived from max"
                );
            }
            info!(step_factor = factor, "step pattern");
        }
        ReplicaSchedule::for_command(cmd)
    }
}
