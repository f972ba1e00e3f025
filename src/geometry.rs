//! Plane geometry primitives: points and axis-aligned rectangles.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// The unit square `[0, 1] x [0, 1]`, default domain of a [`KdTree`](crate::KdTree).
pub const UNIT_SQUARE: Rect = Rect {
    xmin: 0.0,
    ymin: 0.0,
    xmax: 1.0,
    ymax: 1.0,
};

/// An immutable point in the plane.
///
/// Equality is exact coordinate equality. Ordering is lexicographic by `(x, y)`,
/// which gives query result sets a deterministic iteration order.
/// Negative zero is stored as positive zero so that equality, ordering and hashing agree.
/// Equality is defined through the total order, so a point with a NaN coordinate
/// still equals itself and can live in a `BTreeSet` or `HashSet`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        // `+ 0.0` folds -0.0 into 0.0
        Self { x: x + 0.0, y: y + 0.0 }
    }

    /// X coordinate.
    #[inline]
    pub fn x(self) -> f64 {
        self.x
    }

    /// Y coordinate.
    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared_to(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// Returns `true` when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rejects points that cannot be placed in or compared against a tree.
    pub(crate) fn validate(self) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(Error::InvalidArgument(format!(
                "point {self} has a non-finite coordinate"
            )))
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An immutable axis-aligned rectangle `[xmin, xmax] x [ymin, ymax]`.
///
/// Invariants:
/// - `xmin <= xmax` and `ymin <= ymax`.
/// - No bound is NaN. Infinite bounds are allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Rect {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Rect {
    /// Creates a rectangle from its bounds (`xmin`, `ymin`, `xmax`, `ymax`).
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if a bound is NaN or a minimum exceeds its maximum.
    ///
    /// # Examples
    /// ```
    /// use kdset::Rect;
    ///
    /// assert!(Rect::new(0.0, 0.0, 0.5, 0.5).is_ok());
    /// assert!(Rect::new(0.6, 0.0, 0.5, 0.5).is_err());
    /// ```
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
        .validate()
    }

    /// Builds a rectangle without checking bounds. Used for derived node regions,
    /// which may come out inverted when points lie outside the tree's domain.
    #[inline]
    pub(crate) const fn from_bounds(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub(crate) fn validate(self) -> Result<Self> {
        let Self {
            xmin,
            ymin,
            xmax,
            ymax,
        } = self;
        if xmin.is_nan() || ymin.is_nan() || xmax.is_nan() || ymax.is_nan() {
            return Err(Error::InvalidArgument(format!(
                "rectangle {self} has a NaN bound"
            )));
        }
        if xmin > xmax || ymin > ymax {
            return Err(Error::InvalidArgument(format!(
                "rectangle {self} has a minimum greater than its maximum"
            )));
        }
        Ok(self)
    }

    /// Minimum x bound.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Minimum y bound.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// Maximum x bound.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Maximum y bound.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Returns `true` if `p` lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Returns `true` if the rectangles overlap (inclusive on touching edges).
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.xmax < other.xmin
            || self.xmin > other.xmax
            || self.ymax < other.ymin
            || self.ymin > other.ymax)
    }

    /// Squared distance from `p` to the closest point of the rectangle; zero if `p` is inside.
    #[inline]
    pub fn distance_squared_to(&self, p: Point) -> f64 {
        let dx = axis_distance(p.x, self.xmin, self.xmax);
        let dy = axis_distance(p.y, self.ymin, self.ymax);
        dx * dx + dy * dy
    }

    /// Distance from `p` to the closest point of the rectangle.
    pub fn distance_to(&self, p: Point) -> f64 {
        self.distance_squared_to(p).sqrt()
    }
}

impl TryFrom<[f64; 4]> for Rect {
    type Error = Error;

    fn try_from([xmin, ymin, xmax, ymax]: [f64; 4]) -> Result<Self> {
        Self::new(xmin, ymin, xmax, ymax)
    }
}

impl From<Rect> for [f64; 4] {
    fn from(r: Rect) -> Self {
        [r.xmin, r.ymin, r.xmax, r.ymax]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

/// Distance along one axis from `coordinate` to the interval `[min, max]`.
#[inline]
fn axis_distance(coordinate: f64, min: f64, max: f64) -> f64 {
    if coordinate < min {
        min - coordinate
    } else if coordinate > max {
        coordinate - max
    } else {
        0.0
    }
}
