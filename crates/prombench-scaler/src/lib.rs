//! prombench-scaler — replica oscillation for benchmark deployments.
//!
//! Rewrites the replica count of every deployment in a [`TargetSet`] and
//! applies it to the cluster on a fixed interval, following one of two
//! patterns.
//!
//! # Patterns
//!
//! ```text
//! burst: max, min, max, min, ...
//!
//! step:  factor = step_factor if 0 < step_factor < max else max / 10
//!        min, min + factor, min + 2 * factor, ..., max, max, ...
//! ```
//!
//! Each count is applied, then the loop sleeps for `interval`. Failed
//! applies are logged and the next cycle proceeds as normal. The loop only
//! ends when the shutdown channel fires.
//!
//! [`TargetSet`]: prombench_k8s::TargetSet

pub mod oscillator;
pub mod schedule;

pub use oscillator::{Oscillator, set_replicas};
pub use schedule::{ReplicaSchedule, resolve_step_factor};
