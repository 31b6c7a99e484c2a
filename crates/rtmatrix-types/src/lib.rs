//! Core value types for rtmatrix.
//!
//! Everything here is a small immutable value: ordered version enumerations
//! ([`ApiLevel`], [`CfVm`], [`DexVersion`]) that share the [`Ordinal`]
//! comparison vocabulary, and the [`Runtime`] sum type that the parameter
//! builder selects over.

pub mod api_level;
pub mod runtime;

use std::ops::Bound;

pub use api_level::ApiLevel;
pub use runtime::{CfVm, DexKind, DexVersion, DexVm, Runtime};

/// A value from a fixed, statically known sequence.
///
/// The total order is the declaration order of [`Ordinal::ALL`] and agrees with
/// the type's `Ord` implementation.
pub trait Ordinal: Copy + Ord + 'static {
    /// Every value, in declaration order.
    const ALL: &'static [Self];

    /// Zero-based position of this value in [`Ordinal::ALL`].
    fn rank(self) -> usize;

    #[must_use]
    fn first() -> Self {
        Self::ALL[0]
    }

    #[must_use]
    fn is_older_than(self, other: Self) -> bool {
        self < other
    }

    #[must_use]
    fn is_older_than_or_equal(self, other: Self) -> bool {
        self <= other
    }

    #[must_use]
    fn is_newer_than(self, other: Self) -> bool {
        self > other
    }

    #[must_use]
    fn is_newer_than_or_equal(self, other: Self) -> bool {
        self >= other
    }

    /// Whether `start <= self <= end`.
    #[must_use]
    fn is_in_range_inclusive(self, start: Self, end: Self) -> bool {
        debug_assert!(start <= end, "inverted ordinal range");
        start <= self && self <= end
    }
}

/// A contiguous range over an [`Ordinal`] type.
///
/// Ranges are plain descriptors so filters built from them stay inspectable
/// and comparable, unlike closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalRange<T> {
    start: Bound<T>,
    end: Bound<T>,
}

impl<T: Ordinal> OrdinalRange<T> {
    /// Every value.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }

    /// Only `value`.
    #[must_use]
    pub const fn exactly(value: T) -> Self {
        Self {
            start: Bound::Included(value),
            end: Bound::Included(value),
        }
    }

    /// `start ..= end`.
    #[must_use]
    pub const fn between(start: T, end: T) -> Self {
        Self {
            start: Bound::Included(start),
            end: Bound::Included(end),
        }
    }

    /// `start ..`.
    #[must_use]
    pub const fn at_least(start: T) -> Self {
        Self {
            start: Bound::Included(start),
            end: Bound::Unbounded,
        }
    }

    /// Strictly after `start`.
    #[must_use]
    pub const fn above(start: T) -> Self {
        Self {
            start: Bound::Excluded(start),
            end: Bound::Unbounded,
        }
    }

    /// `..= end`.
    #[must_use]
    pub const fn at_most(end: T) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Included(end),
        }
    }

    /// `.. end`.
    #[must_use]
    pub const fn below(end: T) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Excluded(end),
        }
    }

    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        let after_start = match self.start {
            Bound::Unbounded => true,
            Bound::Included(start) => start <= value,
            Bound::Excluded(start) => start < value,
        };
        let before_end = match self.end {
            Bound::Unbounded => true,
            Bound::Included(end) => value <= end,
            Bound::Excluded(end) => value < end,
        };
        after_start && before_end
    }

    /// The values of [`Ordinal::ALL`] inside this range, ascending.
    pub fn values(self) -> impl Iterator<Item = T> {
        T::ALL.iter().copied().filter(move |value| self.contains(*value))
    }
}
