#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::support::numeric::Tolerance;

/// Solver configuration for [`Cycle::solve`](super::Cycle::solve).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Maximum number of passes over the process ring.
    ///
    /// A ring of `N` processes needs at most about `N` passes when every
    /// process contributes one new fact per pass, so the default is generous.
    /// Must be at least one.
    pub max_passes: usize,

    /// Tolerance for deciding whether two values of a property agree.
    pub tolerance: Tolerance,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_passes: 100,
            tolerance: Tolerance::default(),
        }
    }
}
