//! Property tests: the tree agrees with the linear-scan set on every query.

use std::collections::BTreeSet;

use kdset::{KdTree, Point, PointSet, Rect, UNIT_SQUARE};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (0.0..=1.0_f64, 0.0..=1.0_f64).prop_map(Point::from)
}

/// Coordinates on a tenth grid, so duplicates and shared split lines are common.
fn grid_point() -> impl Strategy<Value = Point> {
    (0..=10_u8, 0..=10_u8).prop_map(|(x, y)| Point::new(f64::from(x) / 10.0, f64::from(y) / 10.0))
}

fn rect() -> impl Strategy<Value = Rect> {
    (0.0..=1.0_f64, 0.0..=1.0_f64, 0.0..=1.0_f64, 0.0..=1.0_f64).prop_map(|(a, b, c, d)| {
        Rect::new(a.min(c), b.min(d), a.max(c), b.max(d)).expect("ordered bounds")
    })
}

fn points() -> impl Strategy<Value = Vec<Point>> {
    prop_oneof![
        prop::collection::vec(point(), 0..200),
        prop::collection::vec(grid_point(), 0..200),
    ]
}

proptest! {
    #[test]
    fn size_counts_distinct_points(pts in points()) {
        let tree = KdTree::from_points(pts.iter().copied()).unwrap();
        let distinct: BTreeSet<Point> = pts.iter().copied().collect();
        prop_assert_eq!(tree.len(), distinct.len());
        prop_assert_eq!(tree.is_empty(), distinct.is_empty());
    }

    #[test]
    fn inserted_points_stay_contained(pts in points(), extra in points()) {
        let mut tree = KdTree::new();
        for &p in &pts {
            tree.insert(p).unwrap();
            prop_assert!(tree.contains(p).unwrap());
        }
        for &p in &extra {
            tree.insert(p).unwrap();
        }
        for &p in &pts {
            prop_assert!(tree.contains(p).unwrap(), "{} lost after later insertions", p);
        }
    }

    #[test]
    fn contains_agrees_with_reference(pts in points(), probes in points()) {
        let tree = KdTree::from_points(pts.iter().copied()).unwrap();
        let set = PointSet::from_points(pts.iter().copied()).unwrap();
        for &q in probes.iter().chain(&pts) {
            prop_assert_eq!(tree.contains(q).unwrap(), set.contains(q).unwrap());
        }
    }

    #[test]
    fn range_agrees_with_reference(pts in points(), queries in prop::collection::vec(rect(), 1..20)) {
        let tree = KdTree::from_points(pts.iter().copied()).unwrap();
        let set = PointSet::from_points(pts.iter().copied()).unwrap();
        for r in &queries {
            prop_assert_eq!(tree.range(r).unwrap(), set.range(r).unwrap());
        }
        prop_assert_eq!(tree.range(&UNIT_SQUARE).unwrap().len(), set.len());
    }

    #[test]
    fn nearest_agrees_with_reference(pts in points(), queries in prop::collection::vec(point(), 1..20)) {
        let tree = KdTree::from_points(pts.iter().copied()).unwrap();
        let set = PointSet::from_points(pts.iter().copied()).unwrap();
        for &q in &queries {
            let a = tree.nearest(q).unwrap();
            let b = set.nearest(q).unwrap();
            prop_assert_eq!(a.is_some(), b.is_some());
            if let (Some(a), Some(b)) = (a, b) {
                prop_assert_eq!(a.distance_squared_to(q), b.distance_squared_to(q));
            }
        }
    }

    #[test]
    fn double_insertion_is_idempotent(pts in points(), r in rect(), q in point()) {
        let once = KdTree::from_points(pts.iter().copied()).unwrap();
        let twice = KdTree::from_points(pts.iter().chain(&pts).copied()).unwrap();
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(once.range(&r).unwrap(), twice.range(&r).unwrap());
        prop_assert_eq!(once.nearest(q).unwrap(), twice.nearest(q).unwrap());
    }

    #[test]
    fn degenerate_rect_finds_exactly_that_point(pts in prop::collection::vec(point(), 1..100), pick in any::<prop::sample::Index>()) {
        let tree = KdTree::from_points(pts.iter().copied()).unwrap();
        let target = pts[pick.index(pts.len())];
        let r = Rect::new(target.x(), target.y(), target.x(), target.y()).unwrap();
        let found: Vec<Point> = tree.range(&r).unwrap().into_iter().collect();
        prop_assert_eq!(found, vec![target]);
    }

    #[test]
    fn every_node_lies_on_its_splitting_line(pts in points()) {
        let tree = KdTree::from_points(pts.iter().copied()).unwrap();
        for line in tree.splitting_lines() {
            match line.orientation {
                kdset::Orientation::Vertical => {
                    prop_assert_eq!(line.from.x(), line.point.x());
                    prop_assert!(line.from.y() <= line.point.y() && line.point.y() <= line.to.y());
                }
                kdset::Orientation::Horizontal => {
                    prop_assert_eq!(line.from.y(), line.point.y());
                    prop_assert!(line.from.x() <= line.point.x() && line.point.x() <= line.to.x());
                }
            }
        }
    }
}

#[test]
fn empty_tree_has_no_nearest() {
    assert_eq!(KdTree::new().nearest(Point::new(0.3, 0.3)).unwrap(), None);
}
