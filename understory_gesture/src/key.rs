// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Identifies one active contact.
///
/// Keys are ordered `Mouse < Stylus < Id(..)`, ids by value. This order is
/// what [`PointMap`](crate::PointMap) iterates in and what decides ties in
/// [`PointMap::farthests`](crate::PointMap::farthests).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKey {
    /// The (single) mouse pointer while a button is held.
    Mouse,
    /// A stylus touch. All stylus contacts share this key.
    Stylus,
    /// A pointer id or touch identifier.
    Id(i64),
}

impl PointerKey {
    /// Returns `true` for [`PointerKey::Stylus`].
    #[must_use]
    pub fn is_stylus(self) -> bool {
        self == Self::Stylus
    }
}

impl fmt::Display for PointerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mouse => f.write_str("mouse"),
            Self::Stylus => f.write_str("stylus"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for PointerKey {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}
