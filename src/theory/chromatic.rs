//! Chromatic scale anchored to a reference pitch
//!
//! Binds a [`Temperament`] to a concrete frequency (A4 = 440 Hz by default)
//! and converts between the three coordinate systems of a pitch: its step
//! distance to C0, its Scientific Pitch Notation name and its frequency.

use std::sync::{Arc, OnceLock};

use log::debug;

use super::note::Note;
use super::temperament::Temperament;
use crate::error::{Error, Result};

/// Number of octaves in the precomputed frequency table (C0 up to C9)
pub const OCTAVE_COUNT: u32 = 9;

/// Split a SPN name ("c#4", "Bb-1") into its lower-cased pitch class name
/// and octave number.
pub fn split_spn(spn: &str) -> Result<(String, i32)> {
    let lower = spn.trim().to_lowercase();
    let bad = || Error::BadNoteName(spn.to_string());

    let digits_at = lower
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .ok_or_else(bad)?;

    let (head, digits) = lower.split_at(digits_at);
    let (name, negative) = match head.strip_suffix('-') {
        Some(name) => (name, true),
        None => (head, false),
    };

    let mut chars = name.chars();
    match chars.next() {
        Some('a'..='g') => {}
        _ => return Err(bad()),
    }
    if !chars.all(|c| c == '#' || c == 'b') {
        return Err(bad());
    }

    let octave: i32 = digits.parse().map_err(|_| bad())?;
    let octave = if negative { -octave } else { octave };

    Ok((name.to_string(), octave))
}

/// A temperament bound to an anchor pitch.
#[derive(Clone, Debug)]
pub struct ChromaticScale {
    temperament: Arc<Temperament>,
    anchor_frequency: f64,
    anchor_distance: i32,
    octaves: Vec<Vec<f64>>,
}

impl Default for ChromaticScale {
    fn default() -> Self {
        Self::build(Arc::new(Temperament::twelve_tet()), 4 * 12 + 9, 440.0)
    }
}

impl ChromaticScale {
    /// Anchor `temperament` so that the note `anchor_name` sounds at
    /// `anchor_frequency`.
    pub fn new(
        temperament: Arc<Temperament>,
        anchor_name: &str,
        anchor_frequency: f64,
    ) -> Result<Self> {
        let bad_anchor = || Error::BadAnchor {
            name: anchor_name.to_string(),
            frequency: anchor_frequency,
        };

        if !anchor_frequency.is_finite() || anchor_frequency <= 0.0 {
            return Err(bad_anchor());
        }

        let tolerance = 0.5 * 10f64.powi(-(temperament.precision() as i32)) + f64::EPSILON;
        let octave_up = temperament.frequency_at(anchor_frequency, temperament.step_count() as i32);
        if !octave_up.is_finite() || (octave_up - anchor_frequency * 2.0).abs() > tolerance {
            return Err(bad_anchor());
        }

        let anchor_distance = spn_to_distance(&temperament, anchor_name)?;

        debug!(
            "CHROMATIC: anchoring {} at {}={}Hz (distance {})",
            temperament.name(),
            anchor_name,
            anchor_frequency,
            anchor_distance
        );

        Ok(Self::build(temperament, anchor_distance, anchor_frequency))
    }

    /// A4 = 440 Hz in 12-TET, shared by every value built without an
    /// explicit chromatic scale.
    pub fn standard() -> Arc<ChromaticScale> {
        static STANDARD: OnceLock<Arc<ChromaticScale>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Arc::new(ChromaticScale::default()))
            .clone()
    }

    fn build(temperament: Arc<Temperament>, anchor_distance: i32, anchor_frequency: f64) -> Self {
        let n = temperament.step_count() as i32;
        let octaves = (0..OCTAVE_COUNT as i32)
            .map(|octave| {
                (0..=n)
                    .map(|i| {
                        temperament.frequency_at(anchor_frequency, n * octave - anchor_distance + i)
                    })
                    .collect()
            })
            .collect();

        Self {
            temperament,
            anchor_frequency,
            anchor_distance,
            octaves,
        }
    }

    /// Temperament this scale is built on
    pub fn temperament(&self) -> &Arc<Temperament> {
        &self.temperament
    }

    /// Steps per octave
    pub fn step_count(&self) -> u32 {
        self.temperament.step_count()
    }

    /// Anchor as (SPN, frequency)
    pub fn anchor(&self) -> (String, f64) {
        (self.name_of(self.anchor_distance), self.anchor_frequency)
    }

    /// Distance of the anchor note to C0
    pub fn anchor_distance(&self) -> i32 {
        self.anchor_distance
    }

    /// Frequency of the note `distance` steps above C0
    pub fn frequency_of(&self, distance: i32) -> f64 {
        self.temperament
            .frequency_at(self.anchor_frequency, distance - self.anchor_distance)
    }

    /// Distance to C0 of a SPN name
    pub fn distance_of(&self, spn: &str) -> Result<i32> {
        spn_to_distance(&self.temperament, spn)
    }

    /// SPN name of `distance`, using the canonical spelling
    pub fn name_of(&self, distance: i32) -> String {
        let n = self.step_count() as i32;
        format!(
            "{}{}",
            self.temperament.primary_name(distance),
            distance.div_euclid(n)
        )
    }

    /// Every SPN spelling of `distance`, canonical first
    pub fn spellings_of(&self, distance: i32) -> Vec<String> {
        let octave = distance.div_euclid(self.step_count() as i32);
        self.temperament
            .names_of(distance)
            .iter()
            .map(|name| format!("{name}{octave}"))
            .collect()
    }

    /// Frequencies of every octave, each from C(n) to C(n+1) inclusive
    pub fn octave_table(&self) -> &[Vec<f64>] {
        &self.octaves
    }

    /// Frequencies of one octave, C(n) to C(n+1) inclusive
    pub fn octave(&self, octave: u32) -> Option<&[f64]> {
        self.octaves.get(octave as usize).map(|o| o.as_slice())
    }

    /// Distance of the table entry exactly matching `frequency`
    pub fn find_frequency(&self, frequency: f64) -> Option<i32> {
        let n = self.step_count() as i32;
        self.octaves.iter().enumerate().find_map(|(octave, row)| {
            row.iter()
                .position(|f| *f == frequency)
                .map(|i| octave as i32 * n + i as i32)
        })
    }

    /// Every note of the octave table, C0 up to B8
    pub fn notes(self: &Arc<Self>) -> impl Iterator<Item = Note> + '_ {
        let count = (OCTAVE_COUNT * self.step_count()) as i32;
        (0..count).map(move |d| Note::from_distance(d, self))
    }
}

fn spn_to_distance(temperament: &Temperament, spn: &str) -> Result<i32> {
    let (name, octave) = split_spn(spn)?;
    let pc = temperament
        .name_to_distance(&name)
        .map_err(|_| Error::BadNoteName(spn.to_string()))?;
    Ok(octave * temperament.step_count() as i32 + pc as i32)
}
