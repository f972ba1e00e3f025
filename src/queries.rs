//! Range and nearest-neighbor queries for [`KdTree`].
//!
//! Both walk the arena with an explicit stack and prune subtrees by geometry:
//! range compares the query rectangle against each splitting line, nearest
//! compares the best distance so far against the distance to a child's region.

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::kd_tree::{KdTree, Node, NodeId, Orientation, Side};

/// Position of a query rectangle relative to a splitting line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LinePosition {
    /// Entirely on the left child's side.
    Left,
    /// Entirely on the right child's side.
    Right,
    /// Touches or crosses the line; both children may hold matches.
    Straddles,
}

impl LinePosition {
    fn of(rect: &Rect, node: &Node) -> Self {
        match node.orientation {
            Orientation::Vertical => {
                if rect.xmax() < node.point.x() {
                    Self::Left
                } else if rect.xmin() > node.point.x() {
                    Self::Right
                } else {
                    Self::Straddles
                }
            }
            // Left child holds the points above the line.
            Orientation::Horizontal => {
                if rect.ymin() > node.point.y() {
                    Self::Left
                } else if rect.ymax() < node.point.y() {
                    Self::Right
                } else {
                    Self::Straddles
                }
            }
        }
    }
}

/// Child to search first for a nearest-neighbor query at `p`.
/// A query point lying on the line prefers the left child.
#[inline]
fn preferred_side(node: &Node, p: Point) -> Side {
    let left = match node.orientation {
        Orientation::Vertical => p.x() <= node.point.x(),
        Orientation::Horizontal => p.y() >= node.point.y(),
    };
    if left { Side::Left } else { Side::Right }
}

/// Best candidate found so far by a nearest-neighbor search.
#[derive(Clone, Copy, Debug)]
struct Nearest {
    point: Option<Point>,
    distance_sq: f64,
}

impl Nearest {
    fn new() -> Self {
        Self {
            point: None,
            distance_sq: f64::INFINITY,
        }
    }

    #[inline]
    fn offer(&mut self, candidate: Point, distance_sq: f64) {
        if distance_sq < self.distance_sq {
            self.point = Some(candidate);
            self.distance_sq = distance_sq;
        }
    }
}

/// Pending work for the nearest-neighbor walk.
#[derive(Clone, Copy, Debug)]
enum Visit {
    /// Search this subtree unconditionally.
    Subtree(NodeId),
    /// Search this subtree only if its region may hold something closer than the best so far.
    /// Evaluated after the sibling subtree has been fully searched.
    IfCloser(NodeId),
}

impl KdTree {
    /// Returns every stored point inside `rect` (boundaries inclusive), in
    /// lexicographic `(x, y)` order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `rect` has
    /// a NaN bound or inverted bounds.
    ///
    /// # Examples
    /// ```
    /// use kdset::{KdTree, Point, Rect, UNIT_SQUARE};
    ///
    /// let tree = KdTree::from_points([Point::new(0.1, 0.1), Point::new(0.9, 0.9)])?;
    /// assert_eq!(tree.range(&UNIT_SQUARE)?.len(), 2);
    /// assert!(tree.range(&Rect::new(0.4, 0.4, 0.6, 0.6)?)?.is_empty());
    /// # Ok::<(), kdset::Error>(())
    /// ```
    pub fn range(&self, rect: &Rect) -> Result<BTreeSet<Point>> {
        self.range_visited(rect).map(|(found, _)| found)
    }

    /// [`range`](Self::range) plus the number of nodes the walk examined.
    pub(crate) fn range_visited(&self, rect: &Rect) -> Result<(BTreeSet<Point>, usize)> {
        let rect = rect.validate()?;
        let mut found = BTreeSet::new();
        let mut visited = 0usize;

        let mut stack: Vec<NodeId> = self.root().into_iter().collect();
        while let Some(id) = stack.pop() {
            visited += 1;
            let node = &self.nodes[id];
            if rect.contains(node.point) {
                let _ = found.insert(node.point);
            }
            match LinePosition::of(&rect, node) {
                LinePosition::Left => stack.extend(node.left),
                LinePosition::Right => stack.extend(node.right),
                LinePosition::Straddles => {
                    stack.extend(node.left);
                    stack.extend(node.right);
                }
            }
        }

        trace!(visited, found = found.len(), "range query");
        Ok((found, visited))
    }

    /// Returns a stored point closest to `p`, or `None` if the tree is empty.
    ///
    /// Ties on exact distance go to whichever point the walk reaches first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `p` has a
    /// non-finite coordinate.
    ///
    /// # Examples
    /// ```
    /// use kdset::{KdTree, Point};
    ///
    /// let tree = KdTree::from_points([Point::new(0.1, 0.1), Point::new(0.9, 0.9)])?;
    /// assert_eq!(tree.nearest(Point::new(0.7, 0.6))?, Some(Point::new(0.9, 0.9)));
    /// assert_eq!(KdTree::new().nearest(Point::new(0.5, 0.5))?, None);
    /// # Ok::<(), kdset::Error>(())
    /// ```
    pub fn nearest(&self, p: Point) -> Result<Option<Point>> {
        self.nearest_visited(p).map(|(best, _)| best)
    }

    /// [`nearest`](Self::nearest) plus the number of nodes the walk examined.
    pub(crate) fn nearest_visited(&self, p: Point) -> Result<(Option<Point>, usize)> {
        let p = p.validate()?;
        let mut best = Nearest::new();
        let mut visited = 0usize;

        let mut stack: Vec<Visit> = self.root().map(Visit::Subtree).into_iter().collect();
        while let Some(visit) = stack.pop() {
            let id = match visit {
                Visit::Subtree(id) => id,
                Visit::IfCloser(id) => {
                    if self.nodes[id].region.distance_squared_to(p) < best.distance_sq {
                        id
                    } else {
                        continue;
                    }
                }
            };
            visited += 1;

            let node = &self.nodes[id];
            best.offer(node.point, node.point.distance_squared_to(p));

            let (first, second) = match preferred_side(node, p) {
                Side::Left => (node.left, node.right),
                Side::Right => (node.right, node.left),
            };
            // LIFO: the preferred subtree is exhausted before the sibling check runs.
            stack.extend(second.map(Visit::IfCloser));
            stack.extend(first.map(Visit::Subtree));
        }

        trace!(visited, distance_sq = best.distance_sq, "nearest query");
        Ok((best.point, visited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64, orientation: Orientation) -> Node {
        Node {
            point: Point::new(x, y),
            region: crate::UNIT_SQUARE,
            orientation,
            left: None,
            right: None,
        }
    }

    #[test]
    fn test_line_position_vertical() {
        let n = node(0.5, 0.5, Orientation::Vertical);
        let left = Rect::new(0.0, 0.0, 0.4, 1.0).unwrap();
        let right = Rect::new(0.6, 0.0, 1.0, 1.0).unwrap();
        let touching = Rect::new(0.5, 0.0, 0.7, 1.0).unwrap();
        assert_eq!(LinePosition::of(&left, &n), LinePosition::Left);
        assert_eq!(LinePosition::of(&right, &n), LinePosition::Right);
        assert_eq!(LinePosition::of(&touching, &n), LinePosition::Straddles);
    }

    #[test]
    fn test_line_position_horizontal_left_is_above() {
        let n = node(0.5, 0.5, Orientation::Horizontal);
        let above = Rect::new(0.0, 0.6, 1.0, 1.0).unwrap();
        let below = Rect::new(0.0, 0.0, 1.0, 0.4).unwrap();
        let crossing = Rect::new(0.0, 0.4, 1.0, 0.6).unwrap();
        assert_eq!(LinePosition::of(&above, &n), LinePosition::Left);
        assert_eq!(LinePosition::of(&below, &n), LinePosition::Right);
        assert_eq!(LinePosition::of(&crossing, &n), LinePosition::Straddles);
    }

    #[test]
    fn test_preferred_side_on_line_goes_left() {
        let v = node(0.5, 0.5, Orientation::Vertical);
        assert_eq!(preferred_side(&v, Point::new(0.5, 0.9)), Side::Left);
        assert_eq!(preferred_side(&v, Point::new(0.6, 0.9)), Side::Right);

        let h = node(0.5, 0.5, Orientation::Horizontal);
        assert_eq!(preferred_side(&h, Point::new(0.1, 0.5)), Side::Left);
        assert_eq!(preferred_side(&h, Point::new(0.1, 0.7)), Side::Left);
        assert_eq!(preferred_side(&h, Point::new(0.1, 0.3)), Side::Right);
    }

    #[test]
    fn test_nearest_accumulator_keeps_first_on_tie() {
        let mut best = Nearest::new();
        best.offer(Point::new(0.1, 0.1), 0.5);
        best.offer(Point::new(0.2, 0.2), 0.5);
        assert_eq!(best.point, Some(Point::new(0.1, 0.1)), "strictly closer replaces only");
        best.offer(Point::new(0.3, 0.3), 0.25);
        assert_eq!(best.point, Some(Point::new(0.3, 0.3)));
    }
}
