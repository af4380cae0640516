//! Scales generated from step patterns

use std::fmt;
use std::sync::Arc;

use log::debug;

use super::chord::Chord;
use super::chromatic::{ChromaticScale, OCTAVE_COUNT};
use super::interval::Interval;
use super::note::Note;
use super::pitch_class::PitchClass;
use super::tables::{scale_names, scale_steps};
use super::Contains;
use crate::error::{Error, Result};

/// A root pitch class walked through a step pattern.
#[derive(Clone, Debug)]
pub struct Scale {
    name: String,
    root: PitchClass,
    steps: Vec<u32>,
    indices: Vec<u32>,
}

impl Scale {
    /// Named scale on the standard chromatic scale, e.g. `Scale::new("c", "major")`
    pub fn new(root: &str, pattern: &str) -> Result<Scale> {
        Self::with_root(PitchClass::new(root)?, pattern)
    }

    /// Named scale from the pattern table of the root's temperament
    pub fn with_root(root: PitchClass, pattern: &str) -> Result<Scale> {
        let steps = scale_steps(root.scale().step_count(), pattern)?;
        Self::from_steps(root, pattern, steps.to_vec())
    }

    /// Scale from an explicit step pattern. The steps must be positive and
    /// add up to exactly one octave.
    pub fn from_steps(root: PitchClass, name: &str, steps: Vec<u32>) -> Result<Scale> {
        let step_count = root.scale().step_count();
        let sum: u64 = steps.iter().map(|&s| u64::from(s)).sum();
        if sum != u64::from(step_count) || steps.contains(&0) {
            return Err(Error::InvalidStepPattern {
                name: name.to_string(),
                sum,
                step_count,
            });
        }

        let indices = walk(root.numeric(), &steps, step_count);

        debug!(
            "SCALE: {} {} -> indices {:?}",
            root.name(),
            name,
            indices
        );

        Ok(Scale {
            name: name.to_string(),
            root,
            steps,
            indices,
        })
    }

    /// Names of the scale patterns available for `step_count`
    pub fn pattern_names(step_count: u32) -> Result<Vec<&'static str>> {
        scale_names(step_count)
    }

    /// Pattern name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root pitch class
    pub fn root(&self) -> &PitchClass {
        &self.root
    }

    /// Step pattern
    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    /// Pitch class positions in pattern order, starting at the root
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn chromatic(&self) -> &Arc<ChromaticScale> {
        self.root.scale()
    }

    /// Pitch classes of the scale, in pattern order
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.indices
            .iter()
            .map(|&i| PitchClass::from_index(i, self.chromatic()))
            .collect()
    }

    /// Frequencies of one pass through the pattern, starting on the root in
    /// `start_octave`
    pub fn frequencies(&self, start_octave: i32) -> Vec<f64> {
        let n = self.chromatic().step_count() as i32;
        let root = self.root.numeric() as i32 + n * start_octave;

        // offsets accumulate from the root so rounding never compounds
        let mut offset = 0;
        self.steps
            .iter()
            .map(|step| {
                let f = self.chromatic().frequency_of(root + offset);
                offset += *step as i32;
                f
            })
            .collect()
    }

    /// The scale's notes in `octave`, sorted by pitch
    pub fn octave(&self, octave: i32) -> Vec<Note> {
        let n = self.chromatic().step_count() as i32;
        let mut indices = self.indices.clone();
        indices.sort_unstable();
        indices
            .into_iter()
            .map(|i| Note::from_distance(octave * n + i as i32, self.chromatic()))
            .collect()
    }

    /// The scale's notes in every octave of the chromatic table
    pub fn octaves(&self) -> Vec<Vec<Note>> {
        (0..OCTAVE_COUNT as i32).map(|o| self.octave(o)).collect()
    }
}

fn walk(root: u32, steps: &[u32], step_count: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(steps.len());
    let mut i = root;
    for step in steps {
        indices.push(i);
        i = (i + step) % step_count;
    }
    indices
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.pitch_classes().iter().map(|pc| pc.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl Contains<PitchClass> for Scale {
    fn contains(&self, pc: &PitchClass) -> Result<bool> {
        Ok(self.indices.contains(&pc.numeric()))
    }
}

impl Contains<Interval> for Scale {
    fn contains(&self, interval: &Interval) -> Result<bool> {
        let target = (self.root.numeric() + interval.distance()) % self.chromatic().step_count();
        Ok(self.indices.contains(&target))
    }
}

/// A note is in the scale when it appears among the scale's notes of its
/// own octave
impl Contains<Note> for Scale {
    fn contains(&self, note: &Note) -> Result<bool> {
        Ok(self.octave(note.octave()).iter().any(|n| n == note))
    }
}

impl Contains<Chord> for Scale {
    fn contains(&self, chord: &Chord) -> Result<bool> {
        for note in chord.notes() {
            if !self.contains(&note)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
