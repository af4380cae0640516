//! Pitch arithmetic, scales and chords
//!
//! Layering, leaves first: [`temperament`] → [`chromatic`] → [`note`] /
//! [`pitch_class`] / [`interval`] → [`scale`] / [`chord`]. Every value is
//! immutable; operations that look like mutation return new values.

pub mod chord;
pub mod chromatic;
pub mod interval;
pub mod note;
pub mod pitch_class;
pub mod scale;
pub mod tables;
pub mod temperament;

use crate::error::Result;

/// Fallible comparison against a value of another kind.
///
/// Used where the comparison itself can be ill-formed (an unknown name, a
/// collection of the wrong length or mixed content), which `PartialEq`
/// cannot report.
pub trait Matches<T: ?Sized> {
    /// Whether `self` is equivalent to `other`
    fn matches(&self, other: &T) -> Result<bool>;
}

/// Fallible membership test.
pub trait Contains<T: ?Sized> {
    /// Whether `item` is part of `self`
    fn contains(&self, item: &T) -> Result<bool>;
}
