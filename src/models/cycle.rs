//! Closed thermodynamic cycles.
//!
//! A [`Cycle`] owns a set of state points and an ordered ring of processes
//! connecting them. [`Cycle::solve`] propagates whatever is known around the
//! ring, one process at a time, until every point is fully determined or no
//! pass makes further progress.
//!
//! Propagation is purely local substitution. A cycle whose unknowns can only
//! be found by solving several process relations simultaneously will stop
//! with [`Status::UnderDetermined`] rather than iterate.
//!
//! # Example
//!
//! An air-standard Otto cycle with a compression ratio of about 12.25:
//!
//! ```
//! use cycle_models::models::cycle::{Cycle, ProcessKind};
//! use cycle_models::support::thermo::{Point, Property, fluid::Air, model::IdealGas};
//!
//! let mut cycle = Cycle::new(IdealGas::of::<Air>().unwrap());
//!
//! let p1 = cycle.add_point(
//!     Point::new("1")
//!         .with(Property::Temperature, 300.0)
//!         .with(Property::Pressure, 100_000.0),
//! );
//! let p2 = cycle.add_point(Point::new("2").with(Property::SpecificVolume, 0.0703));
//! let p3 = cycle.add_point(Point::new("3").with(Property::Temperature, 1600.0));
//! let p4 = cycle.add_point(Point::new("4"));
//!
//! cycle.add_process(ProcessKind::Isentropic, p1, p2).unwrap();
//! cycle.add_process(ProcessKind::Isochoric, p2, p3).unwrap();
//! cycle.add_process(ProcessKind::Isentropic, p3, p4).unwrap();
//! cycle.add_process(ProcessKind::Isochoric, p4, p1).unwrap();
//!
//! let solution = cycle.solve().unwrap();
//! assert!(solution.is_solved());
//!
//! let eta = cycle.report().efficiency().unwrap();
//! assert!((eta - 0.6329).abs() < 1e-4);
//! ```

mod config;
mod diagram;
mod error;
mod points;
mod process;
mod report;
mod solve;

pub use config::SolverConfig;
pub use diagram::Segment;
pub use error::{CycleError, ProcessError, SolveError};
pub use points::PointId;
pub use process::{Process, ProcessKind};
pub use report::{PointRow, ProcessRow, Report};
pub use solve::{Solution, Status, Unknown};

use tracing::debug;
use uom::si::available_energy::joule_per_kilogram;

use crate::support::{
    thermo::{Point, Property, model::Medium},
    units::{SpecificHeatTransfer, SpecificWork},
};

use points::Points;

/// An ordered, closed ring of processes over a shared set of points.
#[derive(Debug)]
pub struct Cycle {
    medium: Medium,
    config: SolverConfig,
    points: Points,
    processes: Vec<Process>,
}

impl Cycle {
    /// Creates an empty cycle whose processes all use `medium`.
    pub fn new(medium: impl Into<Medium>) -> Self {
        Self {
            medium: medium.into(),
            config: SolverConfig::default(),
            points: Points::default(),
            processes: Vec::new(),
        }
    }

    /// Returns this cycle with a custom solver configuration.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[must_use]
    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    /// Adds a state point, returning the handle used to wire processes.
    pub fn add_point(&mut self, point: Point) -> PointId {
        self.points.insert(point)
    }

    /// Appends a process in traversal order, returning its index.
    ///
    /// The process must start where the previous one ended. Its constrained
    /// property is back-filled into whichever endpoint lacks it.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if a handle is unknown, the process is not
    /// adjacent to the previous one, or its endpoints are inconsistent.
    pub fn add_process(
        &mut self,
        kind: ProcessKind,
        start: PointId,
        end: PointId,
    ) -> Result<usize, CycleError> {
        for id in [start, end] {
            if !self.points.contains(id) {
                return Err(CycleError::UnknownPoint(id));
            }
        }

        let index = self.processes.len();
        if let Some(previous) = self.processes.last() {
            if previous.end() != start {
                return Err(CycleError::NotAdjacent {
                    index,
                    expected: previous.end(),
                    found: start,
                });
            }
        }

        let process = Process::new(kind, start, end, &mut self.points, self.config.tolerance)
            .map_err(|source| CycleError::Process { index, source })?;

        debug!(index, %kind, %start, %end, "added process");
        self.processes.push(process);
        Ok(index)
    }

    /// Returns the point behind `id`.
    #[must_use]
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// All points, in the order they were added.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.points.iter()
    }

    #[must_use]
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Returns `true` if the last process ends where the first one starts.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.processes.first(), self.processes.last()) {
            (Some(first), Some(last)) => last.end() == first.start(),
            _ => false,
        }
    }

    /// Solves for every derivable property.
    ///
    /// Solving an already converged cycle changes nothing. Derived values
    /// from earlier solves are kept; call [`Cycle::reset_derived`] first to
    /// start over from the supplied data.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] if the cycle is empty or not closed, a process
    /// finds inconsistent data or fails a table lookup, or the pass ceiling
    /// is reached while passes still make progress.
    pub fn solve(&mut self) -> Result<Solution, SolveError> {
        let (Some(first), Some(last)) = (self.processes.first(), self.processes.last()) else {
            return Err(CycleError::Empty.into());
        };
        if last.end() != first.start() {
            return Err(CycleError::NotClosed {
                start: first.start(),
                end: last.end(),
            }
            .into());
        }

        solve::solve(&mut self.points, &self.processes, &self.medium, &self.config)
    }

    /// Clears every derived value, keeping only supplied data.
    ///
    /// Constrained properties that [`Cycle::add_process`] back-filled are
    /// derived values too, and are restored by the next solve.
    pub fn reset_derived(&mut self) {
        self.points.reset_derived();
    }

    /// Supplies an additional known value before re-solving.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::AlreadySupplied`] if `property` was already
    /// supplied at that point, [`CycleError::NotFinite`] for a `NaN` or
    /// infinite value, or [`CycleError::UnknownPoint`].
    pub fn supply(&mut self, id: PointId, property: Property, value: f64) -> Result<(), CycleError> {
        let point = self.points.get_mut(id).ok_or(CycleError::UnknownPoint(id))?;
        if !value.is_finite() {
            return Err(CycleError::NotFinite {
                point: id,
                property,
                value,
            });
        }
        if point.supply(property, value) {
            Ok(())
        } else {
            Err(CycleError::AlreadySupplied { point: id, property })
        }
    }

    /// Specific work delivered by the fluid in process `index`.
    ///
    /// Positive for expansion, negative for compression.
    #[must_use]
    pub fn work(&self, index: usize) -> Option<SpecificWork> {
        let work = self.processes.get(index)?.work(&self.points)?;
        Some(SpecificWork::new::<joule_per_kilogram>(work))
    }

    /// Specific heat added to the fluid in process `index`.
    #[must_use]
    pub fn heat(&self, index: usize) -> Option<SpecificHeatTransfer> {
        let heat = self.processes.get(index)?.heat(&self.points)?;
        Some(SpecificHeatTransfer::new::<joule_per_kilogram>(heat))
    }

    /// Net specific work of the whole cycle, if every process work is known.
    #[must_use]
    pub fn net_work(&self) -> Option<SpecificWork> {
        let work: Option<f64> = self
            .processes
            .iter()
            .map(|process| process.work(&self.points))
            .sum();
        work.map(SpecificWork::new::<joule_per_kilogram>)
    }

    /// Each process with its endpoint states, for plotting.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.processes
            .iter()
            .enumerate()
            .filter_map(|(index, process)| {
                Some(Segment {
                    index,
                    kind: process.kind(),
                    start: self.points.get(process.start())?,
                    end: self.points.get(process.end())?,
                    tolerance: self.config.tolerance,
                })
            })
    }

    /// Tabulates every point and process.
    #[must_use]
    pub fn report(&self) -> Report {
        let name = |id| self.points.get(id).map_or_else(String::new, |p| p.name().to_string());

        let points = self
            .points
            .iter()
            .map(|(_, point)| PointRow {
                name: point.name().to_string(),
                values: Property::ALL.map(|property| point.get(property)),
            })
            .collect();

        let processes = self
            .processes
            .iter()
            .map(|process| ProcessRow {
                kind: process.kind(),
                start: name(process.start()),
                end: name(process.end()),
                work: process.work(&self.points),
                heat: process.heat(&self.points),
            })
            .collect();

        Report { points, processes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        constraint::ConstraintError,
        thermo::{fluid::Air, model::IdealGas},
    };

    fn air_cycle() -> Cycle {
        Cycle::new(IdealGas::of::<Air>().unwrap())
    }

    #[test]
    fn rejects_non_adjacent_processes() {
        let mut cycle = air_cycle();
        let a = cycle.add_point(Point::new("A"));
        let b = cycle.add_point(Point::new("B"));
        let c = cycle.add_point(Point::new("C"));

        cycle.add_process(ProcessKind::Isobaric, a, b).unwrap();
        assert_eq!(
            cycle.add_process(ProcessKind::Isochoric, c, a),
            Err(CycleError::NotAdjacent {
                index: 1,
                expected: b,
                found: c
            })
        );
    }

    #[test]
    fn open_and_empty_cycles_do_not_solve() {
        let mut cycle = air_cycle();
        assert!(matches!(
            cycle.solve(),
            Err(SolveError::Assembly(CycleError::Empty))
        ));

        let a = cycle.add_point(Point::new("A"));
        let b = cycle.add_point(Point::new("B"));
        cycle.add_process(ProcessKind::Isobaric, a, b).unwrap();

        assert!(!cycle.is_closed());
        assert!(matches!(
            cycle.solve(),
            Err(SolveError::Assembly(CycleError::NotClosed { .. }))
        ));
    }

    #[test]
    fn inconsistent_endpoints_are_reported_with_index() {
        let mut cycle = air_cycle();
        let a = cycle.add_point(Point::new("A").with(Property::Pressure, 1.0e5));
        let b = cycle.add_point(Point::new("B").with(Property::Pressure, 2.0e5));

        let err = cycle.add_process(ProcessKind::Isobaric, a, b).unwrap_err();
        assert!(matches!(
            err,
            CycleError::Process {
                index: 0,
                source: ProcessError::Inconsistent(_)
            }
        ));
        assert!(cycle.processes().is_empty());
    }

    #[test]
    fn rectangle_cycle_needs_a_second_pass() {
        let build = |max_passes| {
            let mut cycle = air_cycle().with_config(SolverConfig {
                max_passes,
                ..SolverConfig::default()
            });
            let p1 = cycle.add_point(Point::new("1").with(Property::Temperature, 300.0));
            let p2 = cycle.add_point(Point::new("2"));
            let p3 = cycle.add_point(Point::new("3").with(Property::Temperature, 800.0));
            let p4 = cycle.add_point(
                Point::new("4")
                    .with(Property::Temperature, 400.0)
                    .with(Property::Pressure, 2.0e5),
            );
            cycle.add_process(ProcessKind::Isobaric, p1, p2).unwrap();
            cycle.add_process(ProcessKind::Isochoric, p2, p3).unwrap();
            cycle.add_process(ProcessKind::Isobaric, p3, p4).unwrap();
            cycle.add_process(ProcessKind::Isochoric, p4, p1).unwrap();
            (cycle, p2)
        };

        let (mut cycle, _) = build(1);
        let Err(SolveError::NonConvergence { passes, unknown }) = cycle.solve() else {
            panic!("expected non-convergence");
        };
        assert_eq!(passes, 1);
        assert!(unknown.iter().all(|u| u.name == "2"));
        assert!(!unknown.is_empty());

        let (mut cycle, p2) = build(2);
        let solution = cycle.solve().unwrap();
        assert_eq!(solution.status, Status::Solved);
        assert_eq!(solution.passes, 2);

        let p2 = cycle.point(p2).unwrap();
        assert_relative_eq!(p2.get(Property::Pressure).unwrap(), 1.5e5, max_relative = 1e-9);
        assert_relative_eq!(p2.get(Property::Temperature).unwrap(), 600.0, max_relative = 1e-9);
    }

    #[test]
    fn zero_pass_ceiling_is_rejected() {
        let mut cycle = air_cycle().with_config(SolverConfig {
            max_passes: 0,
            ..SolverConfig::default()
        });
        let a = cycle.add_point(Point::new("A").with(Property::Temperature, 300.0));
        let b = cycle.add_point(Point::new("B"));
        cycle.add_process(ProcessKind::Isothermal, a, b).unwrap();
        cycle.add_process(ProcessKind::Isothermal, b, a).unwrap();

        assert_eq!(
            cycle.solve(),
            Err(SolveError::InvalidConfig {
                field: "max_passes",
                source: ConstraintError::Zero,
            })
        );
        assert!(!cycle.point(b).unwrap().is_known(Property::Pressure));
    }

    #[test]
    fn supply_and_reset() {
        let mut cycle = air_cycle();
        let a = cycle.add_point(Point::new("A").with(Property::Temperature, 300.0));
        let b = cycle.add_point(Point::new("B"));
        cycle.add_process(ProcessKind::Isothermal, a, b).unwrap();
        cycle.add_process(ProcessKind::Isothermal, b, a).unwrap();

        assert!(cycle.point(b).unwrap().is_known(Property::Temperature));

        assert_eq!(
            cycle.supply(a, Property::Temperature, 310.0),
            Err(CycleError::AlreadySupplied {
                point: a,
                property: Property::Temperature
            })
        );
        assert!(matches!(
            cycle.supply(a, Property::Pressure, f64::NAN),
            Err(CycleError::NotFinite { property: Property::Pressure, .. })
        ));
        cycle.supply(a, Property::Pressure, 1.0e5).unwrap();

        cycle.reset_derived();
        assert!(!cycle.point(b).unwrap().is_known(Property::Temperature));

        let solution = cycle.solve().unwrap();
        assert_eq!(solution.status, Status::UnderDetermined);
        assert!(cycle.point(a).unwrap().is_complete());
        assert_relative_eq!(
            cycle.point(b).unwrap().get(Property::Temperature).unwrap(),
            300.0
        );
    }
}
