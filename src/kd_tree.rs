//! 2d-tree storage: node arena, insertion, membership and introspection.
//!
//! Nodes live in a single `Vec` and link to their children by index. A node is
//! appended exactly once, when its point is first inserted, and afterwards only
//! gains child links. Every traversal is iterative, so a degenerate (list-shaped)
//! tree built from sorted input cannot overflow the call stack.
//!
//! Range and nearest-neighbor queries live in the `queries` module.

use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::{Point, Rect, UNIT_SQUARE};

/// Index of a node in the arena.
pub(crate) type NodeId = usize;

/// Orientation of a node's splitting line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Line `x = point.x`; the left child holds smaller x.
    Vertical,
    /// Line `y = point.y`; the left child holds greater y.
    Horizontal,
}

impl Orientation {
    /// Orientation used one level deeper.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// Which child of a node a point or query belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) point: Point,
    /// Every point in this subtree lies within `region`.
    pub(crate) region: Rect,
    pub(crate) orientation: Orientation,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl Node {
    /// Branch taken by `p` when descending through this node.
    ///
    /// Vertical: x < split goes left. Horizontal: y > split goes left.
    #[inline]
    pub(crate) fn side_of(&self, p: Point) -> Side {
        let goes_left = match self.orientation {
            Orientation::Vertical => p.x() < self.point.x(),
            Orientation::Horizontal => p.y() > self.point.y(),
        };
        if goes_left { Side::Left } else { Side::Right }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Region owned by the child on `side`: this node's region clipped at its splitting line.
    pub(crate) fn child_region(&self, side: Side) -> Rect {
        let r = &self.region;
        let (x, y) = (self.point.x(), self.point.y());
        match (self.orientation, side) {
            (Orientation::Vertical, Side::Left) => Rect::from_bounds(r.xmin(), r.ymin(), x, r.ymax()),
            (Orientation::Vertical, Side::Right) => Rect::from_bounds(x, r.ymin(), r.xmax(), r.ymax()),
            (Orientation::Horizontal, Side::Left) => Rect::from_bounds(r.xmin(), y, r.xmax(), r.ymax()),
            (Orientation::Horizontal, Side::Right) => Rect::from_bounds(r.xmin(), r.ymin(), r.xmax(), y),
        }
    }
}

/// A splitting line segment: the part of a node's line inside its region.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct SplittingLine {
    /// The node's point, which the line passes through.
    pub point: Point,
    /// Vertical or horizontal.
    pub orientation: Orientation,
    /// Lower (vertical) or leftmost (horizontal) end.
    pub from: Point,
    /// Upper (vertical) or rightmost (horizontal) end.
    pub to: Point,
}

/// 2d-tree over a rectangular domain (the unit square by default).
///
/// The root splits vertically and orientation alternates with depth. Shape is
/// fixed by insertion order; there is no rebalancing, so sorted input degrades
/// queries to linear time.
///
/// Queries take `&self` and may run from several threads at once. Insertion
/// takes `&mut self`, so the borrow checker serializes it against everything else.
///
/// # Examples
/// ```
/// use kdset::{KdTree, Point, Rect};
///
/// let mut tree = KdTree::new();
/// tree.insert(Point::new(0.2, 0.3))?;
/// tree.insert(Point::new(0.5, 0.5))?;
/// tree.insert(Point::new(0.8, 0.1))?;
///
/// assert!(tree.contains(Point::new(0.8, 0.1))?);
/// assert_eq!(tree.nearest(Point::new(0.5, 0.49))?, Some(Point::new(0.5, 0.5)));
///
/// let found = tree.range(&Rect::new(0.0, 0.0, 0.6, 0.6)?)?;
/// assert_eq!(found.len(), 2);
/// # Ok::<(), kdset::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct KdTree {
    /// Node arena; index 0 is the root when non-empty.
    pub(crate) nodes: Vec<Node>,
    /// Region of the root.
    pub(crate) domain: Rect,
}

const ROOT: NodeId = 0;

impl KdTree {
    /// Creates an empty tree over the unit square.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree over the unit square with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            domain: UNIT_SQUARE,
        }
    }

    /// Creates an empty tree whose root region is `domain`.
    ///
    /// Points outside the domain are still accepted, but region pruning is only
    /// exact for points inside it.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `domain`
    /// has a NaN bound or inverted bounds.
    pub fn with_domain(domain: Rect) -> Result<Self> {
        Ok(Self {
            nodes: Vec::new(),
            domain: domain.validate()?,
        })
    }

    /// Builds a tree over the unit square by inserting `points` in order.
    ///
    /// # Errors
    /// Stops at the first point with a non-finite coordinate.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        Self::from_points_in(UNIT_SQUARE, points)
    }

    /// Builds a tree whose root region is `domain` by inserting `points` in order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `domain`
    /// is invalid, or stops at the first point with a non-finite coordinate.
    ///
    /// # Examples
    /// ```
    /// use kdset::{KdTree, Point, Rect};
    ///
    /// let domain = Rect::new(-10.0, -10.0, 10.0, 10.0)?;
    /// let tree = KdTree::from_points_in(domain, [Point::new(-5.0, 2.0), Point::new(7.5, -3.0)])?;
    /// assert_eq!(tree.domain(), domain);
    /// assert_eq!(tree.nearest(Point::new(6.0, -1.0))?, Some(Point::new(7.5, -3.0)));
    /// # Ok::<(), kdset::Error>(())
    /// ```
    pub fn from_points_in<I>(domain: Rect, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let points = points.into_iter();
        let mut tree = Self::with_domain(domain)?;
        tree.nodes.reserve(points.size_hint().0);
        for p in points {
            tree.insert(p)?;
        }
        debug!(len = tree.len(), height = tree.height(), "built tree from points");
        Ok(tree)
    }

    /// Number of distinct points stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no point is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Region of the root node.
    pub fn domain(&self) -> Rect {
        self.domain
    }

    /// Adds `p` to the tree. Inserting a point that is already present does nothing.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `p` has a
    /// non-finite coordinate; the tree is left untouched.
    pub fn insert(&mut self, p: Point) -> Result<()> {
        let p = p.validate()?;

        if self.nodes.is_empty() {
            self.push_node(p, self.domain, Orientation::Vertical);
            trace!(x = p.x(), y = p.y(), depth = 0, "created root");
            return Ok(());
        }

        let mut current = ROOT;
        let mut depth = 0usize;
        loop {
            let node = &self.nodes[current];
            if node.point == p {
                trace!(x = p.x(), y = p.y(), "duplicate point ignored");
                return Ok(());
            }
            let side = node.side_of(p);
            depth += 1;
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let region = node.child_region(side);
                    let orientation = node.orientation.flip();
                    let id = self.push_node(p, region, orientation);
                    let parent = &mut self.nodes[current];
                    match side {
                        Side::Left => parent.left = Some(id),
                        Side::Right => parent.right = Some(id),
                    }
                    trace!(x = p.x(), y = p.y(), depth, "created node");
                    return Ok(());
                }
            }
        }
    }

    /// Returns `true` if `p` is stored in the tree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `p` has a
    /// non-finite coordinate.
    pub fn contains(&self, p: Point) -> Result<bool> {
        let p = p.validate()?;
        let mut cursor = self.root();
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            if node.point == p {
                return Ok(true);
            }
            cursor = node.child(node.side_of(p));
        }
        Ok(false)
    }

    /// Iterates over stored points in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(|n| n.point)
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root().map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }
        height
    }

    /// Every node's splitting segment, clipped to the node's region, in insertion order.
    pub fn splitting_lines(&self) -> impl Iterator<Item = SplittingLine> + '_ {
        self.nodes.iter().map(|n| {
            let (from, to) = match n.orientation {
                Orientation::Vertical => (
                    Point::new(n.point.x(), n.region.ymin()),
                    Point::new(n.point.x(), n.region.ymax()),
                ),
                Orientation::Horizontal => (
                    Point::new(n.region.xmin(), n.point.y()),
                    Point::new(n.region.xmax(), n.point.y()),
                ),
            };
            SplittingLine {
                point: n.point,
                orientation: n.orientation,
                from,
                to,
            }
        })
    }

    // --- Private helpers ---

    #[inline]
    pub(crate) fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() { None } else { Some(ROOT) }
    }

    fn push_node(&mut self, point: Point, region: Rect, orientation: Orientation) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            point,
            region,
            orientation,
            left: None,
            right: None,
        });
        id
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}
