//! Notes: single pitches on a chromatic scale

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::sync::Arc;

use log::trace;
use num_traits::ToPrimitive;

use super::chromatic::ChromaticScale;
use crate::error::{Error, Result};

/// Anything a [`Note`] can be built from.
#[derive(Clone, Debug)]
pub enum NoteSource {
    /// Distance to C0 in steps
    Distance(i32),
    /// Frequency in Hz, must exactly match an entry of the octave table
    Frequency(f64),
    /// Scientific Pitch Notation, e.g. "c#4"
    Spn(String),
    /// Another note, re-anchored on the target chromatic scale
    Note(Note),
}

impl From<i32> for NoteSource {
    fn from(d: i32) -> Self {
        NoteSource::Distance(d)
    }
}

impl From<f64> for NoteSource {
    fn from(f: f64) -> Self {
        NoteSource::Frequency(f)
    }
}

impl From<&str> for NoteSource {
    fn from(s: &str) -> Self {
        NoteSource::Spn(s.to_string())
    }
}

impl From<String> for NoteSource {
    fn from(s: String) -> Self {
        NoteSource::Spn(s)
    }
}

impl From<Note> for NoteSource {
    fn from(n: Note) -> Self {
        NoteSource::Note(n)
    }
}

impl From<&Note> for NoteSource {
    fn from(n: &Note) -> Self {
        NoteSource::Note(n.clone())
    }
}

/// A single pitch: a step distance to C0 on a given chromatic scale.
///
/// Name and frequency are derived from the distance. Notes compare equal
/// when their names match and are ordered by distance.
#[derive(Clone, Debug)]
pub struct Note {
    distance: i32,
    name: String,
    scale: Arc<ChromaticScale>,
}

impl Note {
    /// Build a note on the standard chromatic scale (A4 = 440 Hz, 12-TET)
    pub fn new(source: impl Into<NoteSource>) -> Result<Note> {
        Self::with_scale(source, &ChromaticScale::standard())
    }

    /// Build a note on `scale`
    pub fn with_scale(source: impl Into<NoteSource>, scale: &Arc<ChromaticScale>) -> Result<Note> {
        let distance = match source.into() {
            NoteSource::Distance(d) => d,
            NoteSource::Spn(spn) => scale.distance_of(&spn)?,
            NoteSource::Note(note) => note.distance,
            NoteSource::Frequency(f) => {
                let d = scale.find_frequency(f).ok_or(Error::NoMatchingNote(f))?;
                trace!("NOTE: frequency {}Hz matched distance {}", f, d);
                d
            }
        };

        Ok(Self::from_distance(distance, scale))
    }

    /// Note `distance` steps above C0 on `scale`
    pub fn from_distance(distance: i32, scale: &Arc<ChromaticScale>) -> Note {
        Note {
            distance,
            name: scale.name_of(distance),
            scale: scale.clone(),
        }
    }

    /// SPN name, canonical spelling
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every enharmonic SPN spelling, canonical first
    pub fn spellings(&self) -> Vec<String> {
        self.scale.spellings_of(self.distance)
    }

    /// Distance to C0 in steps
    pub fn distance(&self) -> i32 {
        self.distance
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.scale.frequency_of(self.distance)
    }

    /// Octave number in SPN
    pub fn octave(&self) -> i32 {
        self.distance.div_euclid(self.scale.step_count() as i32)
    }

    /// Position inside the octave, `0..step_count`
    pub fn pitch_class_index(&self) -> u32 {
        self.distance.rem_euclid(self.scale.step_count() as i32) as u32
    }

    /// Chromatic scale the note lives on
    pub fn scale(&self) -> &Arc<ChromaticScale> {
        &self.scale
    }

    /// Signed distance from `self` up to `other`
    pub fn distance_to(&self, other: &Note) -> i32 {
        other.distance - self.distance
    }

    /// Transpose up by `factor - 1` octaves (`note * factor`).
    ///
    /// Factors between 0 and 1 transpose down by `1 / factor - 1` octaves.
    pub fn octave_mul<K: ToPrimitive>(&self, factor: K) -> Result<Note> {
        let k = positive_factor(factor)?;
        if k >= 1.0 {
            self.shift_octaves(k - 1.0)
        } else {
            self.octave_div(1.0 / k)
        }
    }

    /// Transpose down by `factor - 1` octaves (`note / factor`).
    ///
    /// Factors between 0 and 1 transpose up by `1 / factor - 1` octaves.
    pub fn octave_div<K: ToPrimitive>(&self, factor: K) -> Result<Note> {
        let k = positive_factor(factor)?;
        if k >= 1.0 {
            self.shift_octaves(1.0 - k)
        } else {
            self.octave_mul(1.0 / k)
        }
    }

    /// Transpose by `steps`, failing when the result leaves the `i32`
    /// distance range.
    pub fn transpose(&self, steps: i32) -> Result<Note> {
        self.at_distance(i64::from(self.distance) + i64::from(steps))
    }

    fn at_distance(&self, distance: i64) -> Result<Note> {
        let distance =
            i32::try_from(distance).map_err(|_| Error::DistanceOutOfRange(distance as f64))?;
        Ok(Note::from_distance(distance, &self.scale))
    }

    // Exact for every distance an i32 can hold.
    fn shift_octaves(&self, octaves: f64) -> Result<Note> {
        let n = self.scale.step_count() as f64;
        let distance = (self.distance as f64 + octaves * n).trunc();
        if !(distance >= i32::MIN as f64 && distance <= i32::MAX as f64) {
            return Err(Error::DistanceOutOfRange(distance));
        }
        Ok(Note::from_distance(distance as i32, &self.scale))
    }
}

// Overflow panics like integer arithmetic does; `Note::transpose` reports it.
fn transposed(note: &Note, distance: i64) -> Note {
    match note.at_distance(distance) {
        Ok(n) => n,
        Err(e) => panic!("{}", e),
    }
}

fn positive_factor<K: ToPrimitive>(factor: K) -> Result<f64> {
    let k = factor.to_f64().unwrap_or(f64::NAN);
    if k > 0.0 && k.is_finite() {
        Ok(k)
    } else {
        Err(Error::NonPositiveFactor(k))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Note) -> bool {
        self.name == other.name
    }
}

/// Distance match, falling back to a frequency match
impl PartialEq<i32> for Note {
    fn eq(&self, other: &i32) -> bool {
        self.distance == *other || self.frequency() == *other as f64
    }
}

impl PartialEq<f64> for Note {
    fn eq(&self, other: &f64) -> bool {
        self.frequency() == *other
    }
}

/// Case-insensitive match against any spelling
impl PartialEq<str> for Note {
    fn eq(&self, other: &str) -> bool {
        let other = other.trim().to_lowercase();
        self.name == other || self.spellings().iter().any(|s| *s == other)
    }
}

impl PartialEq<&str> for Note {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<Note> for &str {
    fn eq(&self, other: &Note) -> bool {
        other == *self
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Note) -> Option<Ordering> {
        Some(self.distance.cmp(&other.distance))
    }
}

impl PartialOrd<i32> for Note {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        Some(self.distance.cmp(other))
    }
}

impl PartialOrd<f64> for Note {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.frequency().partial_cmp(other)
    }
}

/// Unparseable names are unordered
impl PartialOrd<&str> for Note {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        let d = self.scale.distance_of(other).ok()?;
        Some(self.distance.cmp(&d))
    }
}

/// # Panics
///
/// Panics when the result leaves the `i32` distance range.
impl Add<i32> for Note {
    type Output = Note;

    fn add(self, steps: i32) -> Note {
        &self + steps
    }
}

impl Add<i32> for &Note {
    type Output = Note;

    fn add(self, steps: i32) -> Note {
        transposed(self, i64::from(self.distance) + i64::from(steps))
    }
}

impl Sub<i32> for Note {
    type Output = Note;

    fn sub(self, steps: i32) -> Note {
        &self - steps
    }
}

impl Sub<i32> for &Note {
    type Output = Note;

    fn sub(self, steps: i32) -> Note {
        transposed(self, i64::from(self.distance) - i64::from(steps))
    }
}
