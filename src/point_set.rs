//! Brute-force point set with the same surface as [`KdTree`](crate::KdTree).
//!
//! Every query is a linear scan. Serves as the correctness oracle and the
//! performance baseline for the tree.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::geometry::{Point, Rect};

/// Set of distinct points ordered lexicographically, queried by linear scan.
///
/// # Examples
/// ```
/// use kdset::{Point, PointSet, Rect};
///
/// let mut set = PointSet::new();
/// set.insert(Point::new(0.2, 0.3))?;
/// set.insert(Point::new(0.2, 0.3))?;
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.range(&Rect::new(0.0, 0.0, 0.5, 0.5)?)?.len(), 1);
/// # Ok::<(), kdset::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: BTreeSet<Point>,
}

impl PointSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `points`.
    ///
    /// # Errors
    /// Stops at the first point with a non-finite coordinate.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut set = Self::new();
        for p in points {
            set.insert(p)?;
        }
        Ok(set)
    }

    /// Number of distinct points stored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when no point is stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adds `p`; duplicates are ignored.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `p` has a
    /// non-finite coordinate.
    pub fn insert(&mut self, p: Point) -> Result<()> {
        let _ = self.points.insert(p.validate()?);
        Ok(())
    }

    /// Returns `true` if `p` is stored.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `p` has a
    /// non-finite coordinate.
    pub fn contains(&self, p: Point) -> Result<bool> {
        Ok(self.points.contains(&p.validate()?))
    }

    /// Returns every stored point inside `rect`, boundaries inclusive.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `rect` has
    /// a NaN bound or inverted bounds.
    pub fn range(&self, rect: &Rect) -> Result<BTreeSet<Point>> {
        let rect = rect.validate()?;
        Ok(self
            .points
            .iter()
            .copied()
            .filter(|&p| rect.contains(p))
            .collect())
    }

    /// Returns a stored point closest to `p`, or `None` when empty.
    /// On exact ties the lexicographically smallest point wins.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `p` has a
    /// non-finite coordinate.
    pub fn nearest(&self, p: Point) -> Result<Option<Point>> {
        let p = p.validate()?;
        let mut best: Option<(Point, f64)> = None;
        for &candidate in &self.points {
            let distance_sq = candidate.distance_squared_to(p);
            if best.is_none_or(|(_, d)| distance_sq < d) {
                best = Some((candidate, distance_sq));
            }
        }
        Ok(best.map(|(point, _)| point))
    }

    /// Iterates over stored points in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}
