//! Processes: the physical laws linking consecutive state points.

mod kind;

pub use kind::ProcessKind;

use tracing::{trace, warn};

use crate::support::{
    constraint::{Constraint, NonZero, StrictlyPositive},
    numeric::Tolerance,
    thermo::{Inconsistency, Point, Property, model::Medium},
};

use super::{PointId, ProcessError, points::Points};

/// A transition between two state points of a cycle.
///
/// A process does not own its endpoints. It holds handles into the cycle's
/// point arena, shared with the neighboring processes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Process {
    kind: ProcessKind,
    start: PointId,
    end: PointId,
}

impl Process {
    /// Creates a process and immediately back-fills its constrained property
    /// into whichever endpoint lacks it.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] if the endpoints coincide or are unknown, if
    /// the polytropic exponent is not finite or the isentropic efficiency is
    /// outside `(0, 1]`, or if both endpoints already hold disagreeing values
    /// of the constrained property.
    pub(crate) fn new(
        kind: ProcessKind,
        start: PointId,
        end: PointId,
        points: &mut Points,
        tolerance: Tolerance,
    ) -> Result<Self, ProcessError> {
        match kind {
            ProcessKind::Polytropic { n } if !n.is_finite() => {
                return Err(ProcessError::InvalidExponent { n });
            }
            ProcessKind::Adiabatic { efficiency }
                if StrictlyPositive::admit(efficiency)
                    .filter(|&e| e <= 1.0)
                    .is_none() =>
            {
                return Err(ProcessError::InvalidEfficiency { efficiency });
            }
            _ => {}
        }

        if start == end {
            return Err(ProcessError::SameEndpoint { point: start });
        }

        let process = Self { kind, start, end };
        let (a, b) = process.endpoints_mut(points)?;
        process.equalize(a, b, tolerance).inspect_err(|error| {
            warn!(%kind, %error, "rejected process with inconsistent endpoints");
        })?;

        Ok(process)
    }

    #[must_use]
    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    #[must_use]
    pub fn start(&self) -> PointId {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> PointId {
        self.end
    }

    /// Pushes known values across the process until nothing new appears.
    ///
    /// Each round applies the constrained-property equality, completes both
    /// endpoints through `medium`, and (for an ideal gas) applies the
    /// process's endpoint relation. A non-ideal adiabatic process instead
    /// sets the end enthalpy from its efficiency. Insufficient data is not
    /// an error.
    ///
    /// Returns the number of properties that became known.
    pub(crate) fn compute(
        &self,
        points: &mut Points,
        medium: &Medium,
        tolerance: Tolerance,
    ) -> Result<usize, ProcessError> {
        let (a, b) = self.endpoints_mut(points)?;
        let mut filled = 0;

        loop {
            let mut step = self.equalize(a, b, tolerance)?;
            step += medium.complete(a, tolerance)?;
            step += medium.complete(b, tolerance)?;

            if let Some(gas) = medium.ideal_gas() {
                step += self.relate(a, b, gas.gamma(), tolerance)?;
            }
            if let ProcessKind::Adiabatic { efficiency } = self.kind {
                step += Self::apply_efficiency(a, b, medium, efficiency, tolerance)?;
            }

            if step == 0 {
                break;
            }
            filled += step;
        }

        Ok(filled)
    }

    /// Specific work delivered by the fluid, in J/kg.
    ///
    /// Positive when the fluid does work on its surroundings (expansion),
    /// negative when work is done on the fluid (compression). Returns `None`
    /// while a required endpoint property is unknown.
    ///
    /// | Kind         | Work                          |
    /// |--------------|-------------------------------|
    /// | `Isentropic` | `−(u_B − u_A)`                |
    /// | `Isobaric`   | `p_A·(v_B − v_A)`             |
    /// | `Isochoric`  | `0`                           |
    /// | `Isothermal` | `T_A·(s_B − s_A) − (u_B − u_A)` |
    /// | `Polytropic` | `(p_B·v_B − p_A·v_A)/(1 − n)` |
    /// | `Adiabatic`  | `−(u_B − u_A)`                |
    pub(crate) fn work(&self, points: &Points) -> Option<f64> {
        let a = points.get(self.start)?;
        let b = points.get(self.end)?;
        let delta = |property| Some(b.get(property)? - a.get(property)?);

        match self.kind {
            ProcessKind::Isentropic | ProcessKind::Adiabatic { .. } => {
                Some(-delta(Property::InternalEnergy)?)
            }
            ProcessKind::Isobaric => {
                Some(a.get(Property::Pressure)? * delta(Property::SpecificVolume)?)
            }
            ProcessKind::Isochoric => Some(0.0),
            ProcessKind::Isothermal => Some(
                a.get(Property::Temperature)? * delta(Property::Entropy)?
                    - delta(Property::InternalEnergy)?,
            ),
            ProcessKind::Polytropic { n } => {
                let pv = |point: &Point| {
                    Some(point.get(Property::Pressure)? * point.get(Property::SpecificVolume)?)
                };
                Some((pv(b)? - pv(a)?) / NonZero::admit(1.0 - n)?)
            }
        }
    }

    /// Specific heat added to the fluid, in J/kg, from `q = Δu + w`.
    pub(crate) fn heat(&self, points: &Points) -> Option<f64> {
        let a = points.get(self.start)?;
        let b = points.get(self.end)?;
        let delta_u = b.get(Property::InternalEnergy)? - a.get(Property::InternalEnergy)?;
        Some(delta_u + self.work(points)?)
    }

    fn endpoints_mut<'p>(
        &self,
        points: &'p mut Points,
    ) -> Result<(&'p mut Point, &'p mut Point), ProcessError> {
        if !points.contains(self.start) {
            return Err(ProcessError::UnknownPoint(self.start));
        }
        if !points.contains(self.end) {
            return Err(ProcessError::UnknownPoint(self.end));
        }
        points
            .pair_mut(self.start, self.end)
            .ok_or(ProcessError::SameEndpoint { point: self.start })
    }

    /// Copies the constrained property to whichever endpoint lacks it.
    fn equalize(
        &self,
        a: &mut Point,
        b: &mut Point,
        tolerance: Tolerance,
    ) -> Result<usize, Inconsistency> {
        let Some(property) = self.kind.constrained() else {
            return Ok(0);
        };

        let mut filled = 0;
        if let Some(value) = a.get(property) {
            filled += usize::from(b.reconcile(property, value, tolerance)?);
        }
        if let Some(value) = b.get(property) {
            filled += usize::from(a.reconcile(property, value, tolerance)?);
        }
        Ok(filled)
    }

    /// Applies the ideal-gas endpoint relation `X_A / X_B = ρ^e`.
    ///
    /// `ρ` comes from the first property (in priority order) known and
    /// positive at both ends. Every other property then follows from
    /// whichever end knows it.
    fn relate(
        &self,
        a: &mut Point,
        b: &mut Point,
        gamma: f64,
        tolerance: Tolerance,
    ) -> Result<usize, Inconsistency> {
        let Some(exponents) = self.kind.ratio_exponents(gamma) else {
            return Ok(0);
        };

        let ratio = exponents.iter().find_map(|&(property, e)| {
            let e = NonZero::admit(e)?;
            let x_a = StrictlyPositive::admit(a.get(property)?)?;
            let x_b = StrictlyPositive::admit(b.get(property)?)?;
            Some((x_a / x_b).powf(1.0 / e))
        });
        let Some(ratio) = ratio else {
            return Ok(0);
        };

        let mut filled = 0;
        for (property, e) in exponents {
            if NonZero::admit(e).is_none() {
                continue;
            }
            let factor = ratio.powf(e);

            if let Some(x_b) = b.get(property) {
                if a.reconcile(property, x_b * factor, tolerance)? {
                    trace!(point = a.name(), property = property.symbol(), ratio, "related");
                    filled += 1;
                }
            }
            if let Some(x_a) = a.get(property) {
                if b.reconcile(property, x_a / factor, tolerance)? {
                    trace!(point = b.name(), property = property.symbol(), ratio, "related");
                    filled += 1;
                }
            }
        }

        Ok(filled)
    }

    /// Sets the end enthalpy of a non-ideal adiabatic process.
    ///
    /// Needs `h` and `s` at the start and `p` at the end. The ideal end
    /// state at `p_B` and `s_A` is resolved through `medium`, and its
    /// enthalpy scaled by `efficiency`: divided for compression, multiplied
    /// for expansion.
    fn apply_efficiency(
        a: &Point,
        b: &mut Point,
        medium: &Medium,
        efficiency: f64,
        tolerance: Tolerance,
    ) -> Result<usize, ProcessError> {
        let (Some(h_a), Some(s_a), Some(p_b)) = (
            a.get(Property::Enthalpy),
            a.get(Property::Entropy),
            b.get(Property::Pressure),
        ) else {
            return Ok(0);
        };

        let mut ideal = Point::new(format!("{}s", b.name()))
            .with(Property::Pressure, p_b)
            .with(Property::Entropy, s_a);
        medium.complete(&mut ideal, tolerance)?;
        let Some(h_s) = ideal.get(Property::Enthalpy) else {
            return Ok(0);
        };

        let h_b = if h_s >= h_a {
            h_a + (h_s - h_a) / efficiency
        } else {
            h_a - efficiency * (h_a - h_s)
        };

        let filled = b.reconcile(Property::Enthalpy, h_b, tolerance)?;
        if filled {
            trace!(point = b.name(), h_s, h_b, efficiency, "applied isentropic efficiency");
        }
        Ok(usize::from(filled))
    }
}
