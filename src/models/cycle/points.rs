//! Arena of state points shared between processes.

use std::{fmt, num::NonZeroUsize};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::support::thermo::Point;

/// Handle to a point stored in a [`Cycle`](super::Cycle).
///
/// Adjacent processes refer to the same handle, so a value derived by one
/// process is immediately visible to its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointId(NonZeroUsize);

impl PointId {
    fn from_index(index: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(index))
    }

    pub(crate) fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every point of a cycle.
#[derive(Debug, Clone, Default)]
pub(crate) struct Points {
    points: Vec<Point>,
}

impl Points {
    /// Stores `point`, returning its handle.
    pub(crate) fn insert(&mut self, point: Point) -> PointId {
        let id = PointId::from_index(self.points.len());
        self.points.push(point);
        id
    }

    pub(crate) fn get(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.index())
    }

    pub(crate) fn contains(&self, id: PointId) -> bool {
        id.index() < self.points.len()
    }

    /// Borrows two distinct points mutably at once.
    pub(crate) fn pair_mut(&mut self, a: PointId, b: PointId) -> Option<(&mut Point, &mut Point)> {
        let (i, j) = (a.index(), b.index());
        if i == j || i.max(j) >= self.points.len() {
            return None;
        }

        if i < j {
            let (head, tail) = self.points.split_at_mut(j);
            Some((&mut head[i], &mut tail[0]))
        } else {
            let (head, tail) = self.points.split_at_mut(i);
            Some((&mut tail[0], &mut head[j]))
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, point)| (PointId::from_index(i), point))
    }

    /// Total number of known properties across all points.
    pub(crate) fn known_count(&self) -> usize {
        self.points.iter().map(Point::known_count).sum()
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.points.iter().all(Point::is_complete)
    }

    pub(crate) fn reset_derived(&mut self) {
        self.points.iter_mut().for_each(Point::reset_derived);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::thermo::Property;

    #[test]
    fn ids_are_one_based_and_stable() {
        let mut points = Points::default();
        let a = points.insert(Point::new("A"));
        let b = points.insert(Point::new("B"));

        assert_eq!(a.to_string(), "#1");
        assert_eq!(b.index(), 1);
        assert_eq!(points.get(b).unwrap().name(), "B");
        assert!(!points.contains(PointId::from_index(2)));
    }

    #[test]
    fn pair_mut_in_either_order() {
        let mut points = Points::default();
        let a = points.insert(Point::new("A"));
        let b = points.insert(Point::new("B"));

        let (pb, pa) = points.pair_mut(b, a).unwrap();
        pb.set(Property::Pressure, 2.0);
        pa.set(Property::Pressure, 1.0);

        assert_eq!(points.get(a).unwrap().get(Property::Pressure), Some(1.0));
        assert_eq!(points.get(b).unwrap().get(Property::Pressure), Some(2.0));
        assert!(points.pair_mut(a, a).is_none());
    }

    #[test]
    fn known_count_and_reset() {
        let mut points = Points::default();
        let a = points.insert(Point::new("A").with(Property::Temperature, 300.0));
        points.get_mut(a).unwrap().set(Property::Pressure, 1.0e5);

        assert_eq!(points.known_count(), 2);
        points.reset_derived();
        assert_eq!(points.known_count(), 1);
        assert!(!points.is_complete());
    }
}
