use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::{Property, model::Medium},
};

use super::{PointId, Process, SolveError, SolverConfig, points::Points};

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// Every property of every point is known.
    Solved,
    /// A fixed point was reached with some properties still unknown.
    UnderDetermined,
}

/// A property that the solver could not determine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unknown {
    pub point: PointId,
    /// Name of the point, for display.
    pub name: String,
    pub property: Property,
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} ({})", self.property, self.name, self.point)
    }
}

/// Outcome of a successful [`Cycle::solve`](super::Cycle::solve).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    pub status: Status,

    /// Number of passes performed.
    pub passes: usize,

    /// Total known-property count before the first pass and after each pass.
    pub history: Vec<usize>,

    /// Properties left unknown; empty when [`Status::Solved`].
    pub unknown: Vec<Unknown>,
}

impl Solution {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == Status::Solved
    }
}

/// Runs solve passes until a fixed point or the pass ceiling.
///
/// One pass calls [`Process::compute`] on every process in traversal order.
///
/// # Errors
///
/// Returns [`SolveError::InvalidConfig`] if `config.max_passes` is zero,
/// [`SolveError::Process`] as soon as a process fails, and
/// [`SolveError::NonConvergence`] if passes are still making progress when
/// `config.max_passes` is reached.
pub(super) fn solve(
    points: &mut Points,
    processes: &[Process],
    medium: &Medium,
    config: &SolverConfig,
) -> Result<Solution, SolveError> {
    StrictlyPositive::check(&config.max_passes).map_err(|source| SolveError::InvalidConfig {
        field: "max_passes",
        source,
    })?;

    let mut previous = points.known_count();
    let mut history = vec![previous];

    for pass in 1..=config.max_passes {
        for (index, process) in processes.iter().enumerate() {
            process
                .compute(points, medium, config.tolerance)
                .map_err(|source| SolveError::Process {
                    index,
                    kind: process.kind(),
                    source,
                })?;
        }

        let known = points.known_count();
        history.push(known);
        debug!(pass, known, gained = known.saturating_sub(previous), "solve pass");

        if points.is_complete() {
            info!(passes = pass, "cycle solved");
            return Ok(Solution {
                status: Status::Solved,
                passes: pass,
                history,
                unknown: Vec::new(),
            });
        }

        if known == previous {
            let unknown = unknowns(points);
            info!(passes = pass, unknown = unknown.len(), "cycle is under-determined");
            return Ok(Solution {
                status: Status::UnderDetermined,
                passes: pass,
                history,
                unknown,
            });
        }

        previous = known;
    }

    let unknown = unknowns(points);
    warn!(
        passes = config.max_passes,
        unknown = unknown.len(),
        "pass limit reached before a fixed point"
    );
    Err(SolveError::NonConvergence {
        passes: config.max_passes,
        unknown,
    })
}

fn unknowns(points: &Points) -> Vec<Unknown> {
    points
        .iter()
        .flat_map(|(id, point)| {
            point.unknown().map(move |property| Unknown {
                point: id,
                name: point.name().to_string(),
                property,
            })
        })
        .collect()
}
