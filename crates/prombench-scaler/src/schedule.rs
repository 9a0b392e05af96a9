//! Replica schedules — the infinite sequence of counts each pattern applies.

use prombench_core::{Pattern, ScaleCommand};

/// Pick the step height for a ramp up to `max`.
///
/// A requested factor is used as-is when it is positive and below `max`.
/// Otherwise the ramp is split into ten steps (`max / 10`). For `max < 10`
/// that leaves a factor of zero and the schedule holds at `min`.
pub fn resolve_step_factor(max: i32, requested: Option<i32>) -> i32 {
    match requested {
        Some(factor) if factor > 0 && factor < max => factor,
        _ => max / 10,
    }
}

/// Infinite iterator of replica counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicaSchedule {
    Burst { high: i32, low: i32, next_high: bool },
    Step { current: i32, factor: i32, max: i32 },
}

impl ReplicaSchedule {
    pub fn burst(max: i32, min: i32) -> Self {
        Self::Burst {
            high: max,
            low: min,
            next_high: true,
        }
    }

    pub fn step(max: i32, min: i32, factor: i32) -> Self {
        Self::Step {
            current: min,
            factor,
            max,
        }
    }

    pub fn for_command(command: &ScaleCommand) -> Self {
        match command.pattern {
            Pattern::Burst => Self::burst(command.max, command.min),
            Pattern::Step => Self::step(
                command.max,
                command.min,
                resolve_step_factor(command.max, command.step_factor),
            ),
        }
    }
}

impl Iterator for ReplicaSchedule {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        match self {
            Self::Burst {
                high,
                low,
                next_high,
            } => {
                let count = if *next_high { *high } else { *low };
                *next_high = !*next_high;
                Some(count)
            }
            Self::Step {
                current,
                factor,
                max,
            } => {
                let count = *current;
                *current = current.saturating_add(*factor).min(*max);
                Some(count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn command(pattern: Pattern, max: i32, min: i32, step_factor: Option<i32>) -> ScaleCommand {
        ScaleCommand::new(pattern, max, min, Duration::from_secs(1), step_factor).unwrap()
    }

    #[test]
    fn burst_alternates() {
        let counts: Vec<_> = ReplicaSchedule::for_command(&command(Pattern::Burst, 20, 1, None))
            .take(6)
            .collect();
        assert_eq!(counts, [20, 1, 20, 1, 20, 1]);
    }

    #[test]
    fn step_ramps_then_holds() {
        let counts: Vec<_> = ReplicaSchedule::for_command(&command(Pattern::Step, 100, 0, None))
            .take(14)
            .collect();
        assert_eq!(
            counts,
            [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 100, 100, 100]
        );
    }

    #[test]
    fn step_clamps_overshoot() {
        let counts: Vec<_> = ReplicaSchedule::step(100, 5, 30).take(6).collect();
        assert_eq!(counts, [5, 35, 65, 95, 100, 100]);
    }

    #[test]
    fn step_factor_resolution() {
        assert_eq!(resolve_step_factor(100, None), 10);
        assert_eq!(resolve_step_factor(100, Some(0)), 10);
        assert_eq!(resolve_step_factor(100, Some(-3)), 10);
        assert_eq!(resolve_step_factor(100, Some(100)), 10);
        assert_eq!(resolve_step_factor(100, Some(250)), 10);
        assert_eq!(resolve_step_factor(100, Some(25)), 25);
        assert_eq!(resolve_step_factor(7, None), 0);
        assert_eq!(resolve_step_factor(0, None), 0);
    }

    #[test]
    fn step_below_ten_holds_at_min() {
        let counts: Vec<_> = ReplicaSchedule::for_command(&command(Pattern::Step, 5, 0, None))
            .take(7)
            .collect();
        assert_eq!(counts, [0; 7]);

        let counts: Vec<_> = ReplicaSchedule::for_command(&command(Pattern::Step, 9, 3, Some(12)))
            .take(4)
            .collect();
        assert_eq!(counts, [3; 4]);
    }

    #[test]
    fn counts_stay_within_bounds() {
        let commands = [
            command(Pattern::Burst, 20, 1, None),
            command(Pattern::Burst, 3, 3, None),
            command(Pattern::Step, 100, 0, None),
            command(Pattern::Step, 100, 95, Some(7)),
            command(Pattern::Step, 9, 2, Some(50)),
            command(Pattern::Step, 5, 0, None),
            command(Pattern::Step, i32::MAX, 0, Some(i32::MAX - 1)),
        ];
        for cmd in &commands {
            for count in ReplicaSchedule::for_command(cmd).take(50) {
                assert!(
                    (cmd.min..=cmd.max).contains(&count),
                    "{count} outside [{}, {}] for {cmd:?}",
                    cmd.min,
                    cmd.max
                );
            }
        }
    }
}
