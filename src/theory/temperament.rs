// Copyright 2025 trallala contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.
//
// See http://creativecommons.org/licenses/MIT/ for more information.

//! Equal-step temperaments
//!
//! A temperament fixes how many steps make up an octave and which pitch
//! class names sit on each step. Frequencies are derived by scaling a root
//! frequency by `2^(steps / step_count)`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of decimal places frequencies are rounded to by default
pub const DEFAULT_PRECISION: u32 = 2;

const TWELVE_TET_SPELLINGS: [&[&str]; 12] = [
    &["c"],
    &["c#", "db"],
    &["d"],
    &["d#", "eb"],
    &["e"],
    &["f"],
    &["f#", "gb"],
    &["g"],
    &["g#", "ab"],
    &["a"],
    &["a#", "bb"],
    &["b"],
];

const NINETEEN_TET_SPELLINGS: [&[&str]; 19] = [
    &["c"],
    &["c#"],
    &["db"],
    &["d"],
    &["d#"],
    &["eb"],
    &["e"],
    &["e#", "fb"],
    &["f"],
    &["f#"],
    &["gb"],
    &["g"],
    &["g#"],
    &["ab"],
    &["a"],
    &["a#"],
    &["bb"],
    &["b"],
    &["b#"],
];

/// Largest precision an f64 frequency can be rounded to
pub const MAX_PRECISION: u32 = 15;

/// Round `value` to `precision` decimal places
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Serializable description of a temperament, used to load custom tunings
/// from configuration files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemperamentDef {
    /// Registry name, e.g. "12TET"
    pub name: String,
    /// Steps per octave
    pub step_count: u32,
    /// Decimal places of rendered frequencies
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Pitch class names for every step, first entry is the canonical one
    pub spellings: Vec<Vec<String>>,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

// Same grammar the SPN parser splits off before the octave number.
fn is_pitch_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('a'..='g')) && chars.all(|c| c == '#' || c == 'b')
}

/// An equal-step tuning system together with its pitch class names.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "TemperamentDef", into = "TemperamentDef")]
pub struct Temperament {
    name: String,
    step_count: u32,
    precision: u32,
    spellings: Vec<Vec<String>>,
    distances: BTreeMap<String, u32>,
}

impl PartialEq for Temperament {
    fn eq(&self, other: &Self) -> bool {
        self.step_count == other.step_count && self.spellings == other.spellings
    }
}

impl Temperament {
    /// Create a temperament from a list of spellings per step.
    ///
    /// Every step needs at least one name and every name must be unique
    /// (compared case-insensitively). Names are a letter from `a` to `g`
    /// followed by any number of `#` and `b` accidentals, and `precision`
    /// is at most [`MAX_PRECISION`].
    pub fn new(
        name: &str,
        step_count: u32,
        precision: u32,
        spellings: Vec<Vec<String>>,
    ) -> Result<Self> {
        if step_count == 0 {
            return Err(Error::InvalidTemperament(format!(
                "{name}: an octave needs at least one step"
            )));
        }

        if precision > MAX_PRECISION {
            return Err(Error::InvalidTemperament(format!(
                "{name}: precision {precision} exceeds {MAX_PRECISION} decimal places"
            )));
        }

        if spellings.len() != step_count as usize {
            return Err(Error::InvalidTemperament(format!(
                "{name}: {} spellings for {} steps",
                spellings.len(),
                step_count
            )));
        }

        let mut distances = BTreeMap::new();
        let mut normalized = Vec::with_capacity(spellings.len());
        for (distance, names) in spellings.into_iter().enumerate() {
            if names.is_empty() {
                return Err(Error::InvalidTemperament(format!(
                    "{name}: step {distance} has no name"
                )));
            }

            let names: Vec<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();
            for n in &names {
                if n.is_empty() {
                    return Err(Error::InvalidTemperament(format!(
                        "{name}: empty name on step {distance}"
                    )));
                }
                if !is_pitch_name(n) {
                    return Err(Error::InvalidTemperament(format!(
                        "{name}: invalid pitch name \"{n}\" on step {distance}"
                    )));
                }
                if distances.insert(n.clone(), distance as u32).is_some() {
                    return Err(Error::InvalidTemperament(format!(
                        "{name}: pitch name \"{n}\" used twice"
                    )));
                }
            }
            normalized.push(names);
        }

        Ok(Self {
            name: name.to_string(),
            step_count,
            precision,
            spellings: normalized,
            distances,
        })
    }

    /// Standard 12-tone equal temperament
    pub fn twelve_tet() -> Self {
        Self::from_static("12TET", &TWELVE_TET_SPELLINGS)
    }

    /// 19-tone equal temperament, sharps and flats on separate steps
    pub fn nineteen_tet() -> Self {
        Self::from_static("19TET", &NINETEEN_TET_SPELLINGS)
    }

    fn from_static(name: &str, table: &[&[&str]]) -> Self {
        let mut distances = BTreeMap::new();
        let spellings: Vec<Vec<String>> = table
            .iter()
            .map(|names| names.iter().map(|n| n.to_string()).collect())
            .collect();
        for (distance, names) in spellings.iter().enumerate() {
            for n in names {
                distances.insert(n.clone(), distance as u32);
            }
        }

        Self {
            name: name.to_string(),
            step_count: table.len() as u32,
            precision: DEFAULT_PRECISION,
            spellings,
            distances,
        }
    }

    /// Registry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Steps per octave
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Decimal places used when rounding frequencies
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Frequency `steps` away from `root`, rounded to the temperament's
    /// precision.
    pub fn frequency_at(&self, root: f64, steps: i32) -> f64 {
        self.frequency_at_precision(root, steps, self.precision)
    }

    /// Frequency `steps` away from `root`, rounded to `precision` decimals.
    ///
    /// Whole octaves are applied as exact powers of two so only the
    /// remaining fraction of an octave goes through `powf`.
    pub fn frequency_at_precision(&self, root: f64, steps: i32, precision: u32) -> f64 {
        let n = self.step_count as i32;
        let octaves = steps.div_euclid(n);
        let rest = steps.rem_euclid(n);

        let mut ratio = 2f64.powi(octaves);
        if rest != 0 {
            ratio *= 2f64.powf(rest as f64 / n as f64);
        }

        round_to(root * ratio, precision)
    }

    /// Step distance of a pitch class name (case-insensitive)
    pub fn name_to_distance(&self, name: &str) -> Result<u32> {
        let key = name.trim().to_lowercase();
        self.distances
            .get(&key)
            .copied()
            .ok_or(Error::UnknownPitchName(key))
    }

    /// All names sharing `distance`, canonical spelling first
    pub fn distance_to_names(&self, distance: u32) -> Option<&[String]> {
        self.spellings.get(distance as usize).map(|v| v.as_slice())
    }

    /// Names of the pitch class `distance` belongs to (wraps around the octave)
    pub fn names_of(&self, distance: i32) -> &[String] {
        let pc = distance.rem_euclid(self.step_count as i32) as usize;
        &self.spellings[pc]
    }

    /// Canonical name of the pitch class `distance` belongs to
    pub fn primary_name(&self, distance: i32) -> &str {
        &self.names_of(distance)[0]
    }
}

impl TryFrom<TemperamentDef> for Temperament {
    type Error = Error;

    fn try_from(def: TemperamentDef) -> Result<Self> {
        Temperament::new(&def.name, def.step_count, def.precision, def.spellings)
    }
}

impl From<Temperament> for TemperamentDef {
    fn from(t: Temperament) -> Self {
        TemperamentDef {
            name: t.name,
            step_count: t.step_count,
            precision: t.precision,
            spellings: t.spellings,
        }
    }
}

/// Caller-owned collection of temperaments, keyed by name.
#[derive(Clone, Debug)]
pub struct TemperamentRegistry {
    temperaments: BTreeMap<String, Arc<Temperament>>,
}

impl Default for TemperamentRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Temperament::twelve_tet());
        registry.register(Temperament::nineteen_tet());
        registry
    }
}

impl TemperamentRegistry {
    /// A registry without any temperament
    pub fn empty() -> Self {
        Self {
            temperaments: BTreeMap::new(),
        }
    }

    /// Add a temperament, returning the one previously stored under its name
    pub fn register(&mut self, temperament: Temperament) -> Option<Arc<Temperament>> {
        self.temperaments
            .insert(temperament.name().to_string(), Arc::new(temperament))
    }

    /// Look up a temperament by name
    pub fn get(&self, name: &str) -> Result<Arc<Temperament>> {
        self.temperaments
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTemperament(name.to_string()))
    }

    /// Names of all registered temperaments
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.temperaments.keys().map(|k| k.as_str())
    }
}
