use thiserror::Error;

use crate::support::{
    constraint::ConstraintError,
    thermo::{Inconsistency, LookupError, Property, ResolveError},
};

use super::{PointId, ProcessKind, Unknown};

/// Errors raised by a single process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    /// The data at the endpoints contradicts the process or the medium.
    #[error(transparent)]
    Inconsistent(#[from] Inconsistency),

    /// The real-fluid table cannot resolve an endpoint.
    #[error("property lookup failed at point {point:?}")]
    Lookup {
        point: String,
        #[source]
        source: LookupError,
    },

    /// Both endpoints are the same point.
    #[error("process starts and ends at the same point {point}")]
    SameEndpoint { point: PointId },

    /// The process refers to a point that is not part of the cycle.
    #[error("unknown point {0}")]
    UnknownPoint(PointId),

    /// A polytropic exponent that is `NaN` or infinite.
    #[error("polytropic exponent must be finite, got {n}")]
    InvalidExponent { n: f64 },

    /// An isentropic efficiency outside `(0, 1]`.
    #[error("isentropic efficiency must be in (0, 1], got {efficiency}")]
    InvalidEfficiency { efficiency: f64 },
}

impl From<ResolveError> for ProcessError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::Inconsistent(inconsistency) => Self::Inconsistent(inconsistency),
            ResolveError::Lookup { point, source } => Self::Lookup { point, source },
        }
    }
}

/// Errors raised while assembling a cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CycleError {
    /// A process does not start where the previous one ended.
    #[error("process {index} starts at {found}, but the previous process ends at {expected}")]
    NotAdjacent {
        index: usize,
        expected: PointId,
        found: PointId,
    },

    /// The last process does not end where the first one starts.
    #[error("cycle is not closed: starts at {start}, ends at {end}")]
    NotClosed { start: PointId, end: PointId },

    /// The cycle has no processes.
    #[error("cycle has no processes")]
    Empty,

    /// A handle that does not belong to this cycle.
    #[error("unknown point {0}")]
    UnknownPoint(PointId),

    /// An external constraint targets a property the user already supplied.
    #[error("{property} at point {point} was already supplied")]
    AlreadySupplied { point: PointId, property: Property },

    /// An external constraint is `NaN` or infinite.
    #[error("{property} at point {point} must be finite, got {value}")]
    NotFinite {
        point: PointId,
        property: Property,
        value: f64,
    },

    /// A process rejected its endpoints when it was added.
    #[error("process {index} is invalid")]
    Process {
        index: usize,
        #[source]
        source: ProcessError,
    },
}

/// Errors that abort [`Cycle::solve`](super::Cycle::solve).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A process failed while propagating values.
    #[error("{kind} process {index} failed")]
    Process {
        index: usize,
        kind: ProcessKind,
        #[source]
        source: ProcessError,
    },

    /// A solver setting is out of range.
    #[error("invalid solver setting `{field}`")]
    InvalidConfig {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The pass ceiling was reached while passes were still making progress.
    #[error("no fixed point after {passes} passes ({} properties still unknown)", .unknown.len())]
    NonConvergence { passes: usize, unknown: Vec<Unknown> },

    /// The cycle cannot be solved in its current shape.
    #[error(transparent)]
    Assembly(#[from] CycleError),
}
