//! Named distances between notes

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use super::note::Note;
use super::pitch_class::PitchClass;
use super::tables::{interval_table, IntervalNames};
use super::Matches;
use crate::error::{Error, Result};

/// Anything an [`Interval`] can be built from.
#[derive(Clone, Debug)]
pub enum IntervalSource {
    /// Distance in steps, must not be negative
    Distance(i64),
    /// Long name, short name or alias ("perfect_fifth", "P5", "tritone")
    Name(String),
}

impl From<i64> for IntervalSource {
    fn from(d: i64) -> Self {
        IntervalSource::Distance(d)
    }
}

impl From<i32> for IntervalSource {
    fn from(d: i32) -> Self {
        IntervalSource::Distance(d as i64)
    }
}

impl From<u32> for IntervalSource {
    fn from(d: u32) -> Self {
        IntervalSource::Distance(d as i64)
    }
}

impl From<&str> for IntervalSource {
    fn from(s: &str) -> Self {
        IntervalSource::Name(s.to_string())
    }
}

impl From<String> for IntervalSource {
    fn from(s: String) -> Self {
        IntervalSource::Name(s)
    }
}

/// Labeled distance between two pitches.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    distance: u32,
    step_count: u32,
    names: &'static IntervalNames,
}

impl Interval {
    /// Interval in 12-TET
    pub fn new(source: impl Into<IntervalSource>) -> Result<Interval> {
        Self::with_step_count(source, 12)
    }

    /// Interval in a temperament of `step_count` steps per octave
    pub fn with_step_count(source: impl Into<IntervalSource>, step_count: u32) -> Result<Interval> {
        let table = interval_table(step_count)?;

        let distance = match source.into() {
            IntervalSource::Distance(d) if d < 0 => return Err(Error::NegativeInterval(d)),
            IntervalSource::Distance(d) => {
                u32::try_from(d).map_err(|_| Error::IntervalOutOfRange(u32::MAX))?
            }
            IntervalSource::Name(name) => table
                .iter()
                .position(|e| e.names.contains(&name.as_str()))
                .ok_or(Error::UnknownInterval(name))? as u32,
        };

        let names = table
            .get(distance as usize)
            .ok_or(Error::IntervalOutOfRange(distance))?;

        Ok(Interval {
            distance,
            step_count,
            names,
        })
    }

    /// Absolute interval between two notes, in the temperament of `a`
    pub fn between(a: &Note, b: &Note) -> Result<Interval> {
        let d = (a.distance() as i64 - b.distance() as i64).abs();
        Self::with_step_count(d, a.scale().step_count())
    }

    /// Distance in steps
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Display name, e.g. "perfect_fifth" or "tritone"
    pub fn name(&self) -> &'static str {
        self.names.names[self.names.canonical]
    }

    /// The two short names, e.g. ("M3", "d4")
    pub fn short_names(&self) -> (&'static str, &'static str) {
        (self.names.names[1], self.names.names[2])
    }

    /// Every accepted name for this distance
    pub fn aliases(&self) -> &'static [&'static str] {
        self.names.names
    }

    /// Wider than one octave
    pub fn is_compound(&self) -> bool {
        self.distance > self.step_count
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Interval) -> bool {
        self.step_count == other.step_count && self.name() == other.name()
    }
}

impl PartialEq<u32> for Interval {
    fn eq(&self, other: &u32) -> bool {
        self.distance == *other
    }
}

impl PartialEq<i32> for Interval {
    fn eq(&self, other: &i32) -> bool {
        self.distance as i64 == *other as i64
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Interval) -> Option<Ordering> {
        Some(self.distance.cmp(&other.distance))
    }
}

impl PartialOrd<u32> for Interval {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        Some(self.distance.cmp(other))
    }
}

/// Order-independent distance between exactly two notes
impl Matches<[Note]> for Interval {
    fn matches(&self, notes: &[Note]) -> Result<bool> {
        match notes {
            [a, b] => Ok((a.distance() as i64 - b.distance() as i64).unsigned_abs()
                == self.distance as u64),
            _ => Err(Error::ComparisonShape(format!(
                "an interval compares to exactly two notes, got {}",
                notes.len()
            ))),
        }
    }
}

impl Add<Interval> for Note {
    type Output = Note;

    fn add(self, interval: Interval) -> Note {
        self + interval.distance as i32
    }
}

impl Add<Interval> for &Note {
    type Output = Note;

    fn add(self, interval: Interval) -> Note {
        self + interval.distance as i32
    }
}

/// Wraps around the octave
impl Add<Interval> for PitchClass {
    type Output = PitchClass;

    fn add(self, interval: Interval) -> PitchClass {
        PitchClass::from_index(self.numeric() + interval.distance, self.scale())
    }
}

impl Add<Interval> for &PitchClass {
    type Output = PitchClass;

    fn add(self, interval: Interval) -> PitchClass {
        PitchClass::from_index(self.numeric() + interval.distance, self.scale())
    }
}
