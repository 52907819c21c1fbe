// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use core::fmt;

use kurbo::Point;
use understory_polygon::points;

use crate::PointerKey;

/// Contact positions keyed by [`PointerKey`].
///
/// Iteration follows key order, so every derived quantity is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointMap {
    points: BTreeMap<PointerKey, Point>,
}

impl PointMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of `key`, if present.
    #[must_use]
    pub fn get(&self, key: PointerKey) -> Option<Point> {
        self.points.get(&key).copied()
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: PointerKey) -> bool {
        self.points.contains_key(&key)
    }

    /// Sets the position of `key`, returning the previous one.
    pub fn insert(&mut self, key: PointerKey, point: Point) -> Option<Point> {
        self.points.insert(key, point)
    }

    /// Removes `key`, returning its position.
    pub fn remove(&mut self, key: PointerKey) -> Option<Point> {
        self.points.remove(&key)
    }

    /// Removes every contact.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = PointerKey> + '_ {
        self.points.keys().copied()
    }

    /// Positions in key order.
    pub fn values(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.values().copied()
    }

    /// `(key, position)` pairs in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.points.iter(),
        }
    }

    /// Centroid of all contacts, or `None` if the map is empty.
    #[must_use]
    pub fn mean(&self) -> Option<Point> {
        points::centroid(self.values())
    }

    /// The two keys whose contacts are farthest apart.
    ///
    /// Pairs are scanned in key order and only a strictly larger distance
    /// replaces the current best, so among equally distant pairs the one with
    /// the lowest keys wins. The first key of the result is always the lower
    /// one. Returns `None` for fewer than two contacts.
    #[must_use]
    pub fn farthest_keys(&self) -> Option<(PointerKey, PointerKey)> {
        farthest_pair(self.iter())
    }

    /// Positions of the pair chosen by [`PointMap::farthest_keys`].
    #[must_use]
    pub fn farthests(&self) -> Option<(Point, Point)> {
        let (a, b) = self.farthest_keys()?;
        Some((self.get(a)?, self.get(b)?))
    }
}

/// O(n²) scan for the most distant pair among `entries`, see
/// [`PointMap::farthest_keys`].
pub(crate) fn farthest_pair(
    entries: impl Iterator<Item = (PointerKey, Point)> + Clone,
) -> Option<(PointerKey, PointerKey)> {
    let mut best: Option<(PointerKey, PointerKey, f64)> = None;
    for (i, (ka, pa)) in entries.clone().enumerate() {
        for (kb, pb) in entries.clone().skip(i + 1) {
            let d = pa.distance(pb);
            if best.is_none_or(|(_, _, bd)| d > bd) {
                best = Some((ka, kb, d));
            }
        }
    }
    best.map(|(a, b, _)| (a, b))
}

impl fmt::Display for PointMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[PointMap")?;
        for (i, (key, p)) in self.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{key}:{{x:{}, y:{}}}", p.x, p.y)?;
        }
        f.write_str("]")
    }
}

impl FromIterator<(PointerKey, Point)> for PointMap {
    fn from_iter<I: IntoIterator<Item = (PointerKey, Point)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<(PointerKey, Point)> for PointMap {
    fn extend<I: IntoIterator<Item = (PointerKey, Point)>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PointMap {
    type Item = (PointerKey, Point);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, position)` pairs of a [`PointMap`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, PointerKey, Point>,
}

impl Iterator for Iter<'_> {
    type Item = (PointerKey, Point);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, p)| (*k, *p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn map(points: &[(i64, f64, f64)]) -> PointMap {
        points
            .iter()
            .map(|&(id, x, y)| (PointerKey::Id(id), Point::new(x, y)))
            .collect()
    }

    #[test]
    fn farthests_picks_global_maximum() {
        let m = map(&[(1, 0.0, 0.0), (2, 5.0, 0.0), (3, 10.0, 0.0)]);
        assert_eq!(m.farthest_keys(), Some((PointerKey::Id(1), PointerKey::Id(3))));
        assert_eq!(
            m.farthests(),
            Some((Point::new(0.0, 0.0), Point::new(10.0, 0.0)))
        );
    }

    #[test]
    fn farthests_needs_two_points() {
        assert_eq!(PointMap::new().farthests(), None);
        assert_eq!(map(&[(7, 1.0, 1.0)]).farthests(), None);
        assert_eq!(
            map(&[(7, 1.0, 1.0), (9, 4.0, 5.0)]).farthest_keys(),
            Some((PointerKey::Id(7), PointerKey::Id(9)))
        );
    }

    #[test]
    fn farthests_ties_go_to_lowest_keys() {
        // A unit square: both diagonals are equally long.
        let m = map(&[(4, 0.0, 0.0), (3, 1.0, 0.0), (2, 1.0, 1.0), (1, 0.0, 1.0)]);
        // Diagonals are (4, 2) and (3, 1); in key order the pair (1, 3) comes first.
        assert_eq!(m.farthest_keys(), Some((PointerKey::Id(1), PointerKey::Id(3))));
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(PointMap::new().mean(), None);
        assert_eq!(
            map(&[(1, 0.0, 0.0), (2, 10.0, 20.0)]).mean(),
            Some(Point::new(5.0, 10.0))
        );
    }

    #[test]
    fn clone_is_independent() {
        let mut a = map(&[(1, 0.0, 0.0)]);
        let b = a.clone();
        a.insert(PointerKey::Id(1), Point::new(3.0, 3.0));
        assert_eq!(b.get(PointerKey::Id(1)), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn display_lists_keys_in_order() {
        let mut m = map(&[(3, 1.0, 2.0)]);
        m.insert(PointerKey::Mouse, Point::new(0.5, 0.0));
        assert_eq!(
            m.to_string(),
            "[PointMap mouse:{x:0.5, y:0}, 3:{x:1, y:2}]"
        );
        assert_eq!(PointMap::new().to_string(), "[PointMap]");
    }
}
