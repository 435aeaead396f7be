//! Tabular summary of a cycle.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::Property,
};

use super::ProcessKind;

/// Final property values of one point, in SI and [`Property::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRow {
    pub name: String,
    pub values: [Option<f64>; Property::COUNT],
}

impl PointRow {
    #[must_use]
    pub fn get(&self, property: Property) -> Option<f64> {
        self.values[property.index()]
    }
}

/// Energy transfers of one process, in J/kg.
///
/// Work is positive when delivered by the fluid, heat is positive when
/// added to the fluid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcessRow {
    pub kind: ProcessKind,
    pub start: String,
    pub end: String,
    pub work: Option<f64>,
    pub heat: Option<f64>,
}

/// Snapshot of every point and process of a cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Report {
    pub points: Vec<PointRow>,
    pub processes: Vec<ProcessRow>,
}

impl Report {
    /// Net specific work of the cycle, or `None` if any process work is unknown.
    #[must_use]
    pub fn net_work(&self) -> Option<f64> {
        self.processes.iter().map(|row| row.work).sum()
    }

    /// Sum of the positive process heats, or `None` if any heat is unknown.
    #[must_use]
    pub fn heat_added(&self) -> Option<f64> {
        self.processes
            .iter()
            .map(|row| row.heat.map(|q| q.max(0.0)))
            .sum()
    }

    /// Thermal efficiency `net work / heat added`.
    ///
    /// Returns `None` if either is unknown or no heat is added.
    #[must_use]
    pub fn efficiency(&self) -> Option<f64> {
        let added = StrictlyPositive::admit(self.heat_added()?)?;
        Some(self.net_work()? / added)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}", "point")?;
        for property in Property::ALL {
            write!(f, " {:>16}", format!("{} [{}]", property.symbol(), property.unit()))?;
        }
        writeln!(f)?;

        for row in &self.points {
            write!(f, "{:<8}", row.name)?;
            for value in row.values {
                write!(f, " {:>16}", Cell(value))?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:<24} {:>8} {:>8} {:>16} {:>16}",
            "process", "from", "to", "w [J/kg]", "q [J/kg]"
        )?;
        for row in &self.processes {
            writeln!(
                f,
                "{:<24} {:>8} {:>8} {:>16} {:>16}",
                row.kind.to_string(),
                row.start,
                row.end,
                Cell(row.work),
                Cell(row.heat)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "net work:   {}", Cell(self.net_work()))?;
        writeln!(f, "heat added: {}", Cell(self.heat_added()))?;
        match self.efficiency() {
            Some(eta) => write!(f, "efficiency: {:.2}%", eta * 100.0),
            None => write!(f, "efficiency: -"),
        }
    }
}

/// A value or a dash, right-aligned by the caller's width.
struct Cell(Option<f64>);

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => f.pad(&format!("{value:.4}")),
            None => f.pad("-"),
        }
    }
}
