//! # kdset - 2d-tree Spatial Index
//!
//! A Rust library providing a 2d-tree (a k-d tree with k = 2) over the unit
//! square for point insertion, membership tests, rectangle range search and
//! nearest-neighbor search.
//!
//! ## Features
//!
//! - **Alternating splits**: the root splits on x, its children on y, and so on
//! - **Region pruning**: range and nearest queries skip subtrees whose region cannot contribute
//! - **Brute-force oracle**: [`PointSet`] answers the same queries by linear scan
//! - **No recursion**: nodes live in an arena and every walk uses an explicit stack
//!
//! ## Quick Start
//!
//! ```rust
//! use kdset::prelude::*;
//!
//! let mut tree = KdTree::new();
//! tree.insert(Point::new(0.2, 0.3))?;
//! tree.insert(Point::new(0.5, 0.5))?;
//! tree.insert(Point::new(0.8, 0.1))?;
//! tree.insert(Point::new(0.5, 0.5))?; // duplicate, ignored
//! assert_eq!(tree.len(), 3);
//!
//! // All points inside a rectangle, in (x, y) order
//! let found = tree.range(&Rect::new(0.0, 0.0, 0.6, 0.6)?)?;
//! assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![Point::new(0.2, 0.3), Point::new(0.5, 0.5)]);
//!
//! // Closest stored point
//! assert_eq!(tree.nearest(Point::new(0.5, 0.49))?, Some(Point::new(0.5, 0.5)));
//! assert!(!tree.contains(Point::new(0.8, 0.2))?);
//! # Ok::<(), kdset::Error>(())
//! ```
//!
//! ## How It Works
//!
//! Each node stores a point, the rectangle it is responsible for, and the
//! orientation of the line through its point. A vertical line sends smaller x
//! to the left child; a horizontal line sends greater y to the left child.
//! Child rectangles are clipped from the parent's at insertion time.
//!
//! Range search descends into a child only when the query rectangle reaches
//! that side of the splitting line. Nearest search visits the child on the
//! query point's side first, then enters the other child only if its rectangle
//! is strictly closer than the best point found so far.
//!
//! The tree is not rebalanced. Inserting points in sorted order produces a
//! list-shaped tree and linear-time queries.

pub mod error;
pub mod geometry;
pub mod kd_tree;
pub mod point_set;
pub mod prelude;
mod queries;


pub use error::{Error, Result};
pub use geometry::{Point, Rect, UNIT_SQUARE};
pub use kd_tree::{KdTree, Orientation, SplittingLine};
pub use point_set::PointSet;
