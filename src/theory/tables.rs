//! Compiled-in naming tables
//!
//! Interval names, scale step patterns and chord templates, keyed by the
//! number of steps per octave of the temperament they belong to. Only
//! 12-step temperaments ship with tables; scales and chords in other
//! temperaments are built from explicit steps and offsets.

use crate::error::{Error, Result};

/// Names of one interval distance.
///
/// `names[0]` is the long name, `names[1..3]` the short names and anything
/// after that extra aliases. `canonical` selects the display name.
#[derive(Debug, PartialEq, Eq)]
pub struct IntervalNames {
    /// Long name, short names and aliases
    pub names: &'static [&'static str],
    /// Index of the display name in `names`
    pub canonical: usize,
}

const fn entry(names: &'static [&'static str]) -> IntervalNames {
    IntervalNames {
        names,
        canonical: 0,
    }
}

// Distances 6 and 18 have no long name of their own and are displayed by
// one of their aliases.
const fn entry_at(names: &'static [&'static str], canonical: usize) -> IntervalNames {
    IntervalNames { names, canonical }
}

/// Interval names for 12-TET, two octaves
pub static TWELVE_TET_INTERVALS: [IntervalNames; 25] = [
    entry(&["perfect_unison", "P1", "d2", "root"]),
    entry(&["minor_second", "m2", "A1", "semitone"]),
    entry(&["major_second", "M2", "d3", "tone"]),
    entry(&["minor_third", "m3", "A2"]),
    entry(&["major_third", "M3", "d4"]),
    entry(&["perfect_fourth", "P4", "A3"]),
    entry_at(&["unnamed_interval_6", "d5", "A4", "tritone", "unnamed Interval 6"], 3),
    entry(&["perfect_fifth", "P5", "d6"]),
    entry(&["minor_sixth", "m6", "A5"]),
    entry(&["major_sixth", "M6", "d7"]),
    entry(&["minor_seventh", "m7", "A6"]),
    entry(&["major_seventh", "M7", "d8"]),
    entry(&["perfect_octave", "P8", "A7", "d9"]),
    entry(&["minor_ninth", "m9", "A8"]),
    entry(&["major_ninth", "M9", "d10"]),
    entry(&["minor_tenth", "m10", "A9"]),
    entry(&["major_tenth", "M10", "d11"]),
    entry(&["perfect_eleventh", "P11", "A10"]),
    entry_at(&["unnamed_interval_18", "d12", "A11", "unnamed Interval 18"], 2),
    entry(&["perfect_twelfth", "P12", "d13", "tritave"]),
    entry(&["minor_thirteenth", "m13", "A12"]),
    entry(&["major_thirteenth", "M13", "d14"]),
    entry(&["minor_fourteenth", "m14", "A13"]),
    entry(&["major_fourteenth", "M14", "d15"]),
    entry(&["perfect_fifteenth", "P15", "A14", "double_octave"]),
];

/// Scale step patterns for 12-TET. Every pattern sums to 12.
pub static TWELVE_TET_SCALES: [(&str, &[u32]); 22] = [
    ("major", &[2, 2, 1, 2, 2, 2, 1]),
    ("ionian", &[2, 2, 1, 2, 2, 2, 1]),
    ("dorian", &[2, 1, 2, 2, 2, 1, 2]),
    ("phrygian", &[1, 2, 2, 2, 1, 2, 2]),
    ("lydian", &[2, 2, 2, 1, 2, 2, 1]),
    ("mixolydian", &[2, 2, 1, 2, 2, 1, 2]),
    ("aeolian", &[2, 1, 2, 2, 1, 2, 2]),
    ("locrian", &[1, 2, 2, 1, 2, 2, 2]),
    ("harmonic_major", &[2, 2, 1, 2, 1, 3, 1]),
    ("melodic_major", &[2, 2, 1, 2, 1, 2, 2]),
    ("minor", &[2, 1, 2, 2, 1, 2, 2]),
    ("natural_minor", &[2, 1, 2, 2, 1, 2, 2]),
    ("harmonic_minor", &[2, 1, 2, 2, 1, 3, 1]),
    ("ascending_melodic_minor", &[2, 1, 2, 2, 2, 2, 1]),
    ("descending_melodic_minor", &[2, 2, 1, 2, 2, 1, 2]),
    ("minor_pentatonic", &[3, 2, 2, 3, 2]),
    ("major_pentatonic", &[2, 2, 3, 2, 3]),
    ("japanese_pentatonic", &[2, 3, 2, 2, 3]),
    ("major_blues", &[2, 1, 1, 3, 2, 3]),
    ("minor_blues_b5", &[3, 2, 1, 1, 3, 2]),
    ("minor_blues_M3", &[3, 1, 2, 1, 3, 2]),
    ("minor_blues_M7", &[3, 2, 2, 3, 1, 1]),
];

/// Chord templates for 12-TET (semitone offsets from the root)
pub static TWELVE_TET_CHORDS: [(&str, &[u32]); 26] = [
    ("powerchord", &[0, 7]),
    ("powerchord2", &[0, 7, 12]),
    ("major", &[0, 4, 7]),
    ("major6", &[0, 4, 7, 9]),
    ("major7", &[0, 4, 7, 11]),
    ("major9", &[0, 4, 7, 11, 14]),
    ("major11", &[0, 4, 7, 11, 14, 17]),
    ("major13", &[0, 4, 7, 11, 14, 17, 21]),
    ("sus2", &[0, 2, 7]),
    ("sus4", &[0, 5, 7]),
    ("dominant7", &[0, 4, 7, 10]),
    ("dominant9", &[0, 4, 7, 10, 14]),
    ("dominant11", &[0, 4, 7, 10, 14, 17]),
    ("dominant13", &[0, 4, 7, 10, 14, 17, 21]),
    ("minor", &[0, 3, 7]),
    ("minor6", &[0, 3, 7, 9]),
    ("minor7", &[0, 3, 7, 10]),
    ("minorM7", &[0, 3, 7, 11]),
    ("minor9", &[0, 3, 7, 10, 14]),
    ("minor11", &[0, 3, 7, 10, 14, 17]),
    ("diminished", &[0, 3, 6]),
    ("diminished7", &[0, 3, 6, 9]),
    ("half_diminished7", &[0, 3, 6, 10]),
    ("augmented", &[0, 4, 8]),
    ("augmented7", &[0, 4, 8, 10]),
    ("dominant7sus4", &[0, 5, 7, 10]),
];

/// Interval table for a temperament with `step_count` steps
pub fn interval_table(step_count: u32) -> Result<&'static [IntervalNames]> {
    match step_count {
        12 => Ok(&TWELVE_TET_INTERVALS),
        _ => Err(Error::MissingTable {
            table: "interval",
            step_count,
        }),
    }
}

fn scale_table(step_count: u32) -> Result<&'static [(&'static str, &'static [u32])]> {
    match step_count {
        12 => Ok(&TWELVE_TET_SCALES),
        _ => Err(Error::MissingTable {
            table: "scale",
            step_count,
        }),
    }
}

fn chord_table(step_count: u32) -> Result<&'static [(&'static str, &'static [u32])]> {
    match step_count {
        12 => Ok(&TWELVE_TET_CHORDS),
        _ => Err(Error::MissingTable {
            table: "chord",
            step_count,
        }),
    }
}

/// Step pattern of the scale named `name`
pub fn scale_steps(step_count: u32, name: &str) -> Result<&'static [u32]> {
    scale_table(step_count)?
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, steps)| *steps)
        .ok_or_else(|| Error::UnknownScale(name.to_string()))
}

/// Names of all scale patterns, in table order
pub fn scale_names(step_count: u32) -> Result<Vec<&'static str>> {
    Ok(scale_table(step_count)?.iter().map(|(n, _)| *n).collect())
}

/// Offsets of the chord template named `name`
pub fn chord_template(step_count: u32, name: &str) -> Result<&'static [u32]> {
    chord_table(step_count)?
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, offsets)| *offsets)
        .ok_or_else(|| Error::UnknownChord(name.to_string()))
}

/// Names of all chord templates, in table order
pub fn chord_names(step_count: u32) -> Result<Vec<&'static str>> {
    Ok(chord_table(step_count)?.iter().map(|(n, _)| *n).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_patterns_sum_to_octave() {
        for (name, steps) in TWELVE_TET_SCALES.iter() {
            assert_eq!(steps.iter().sum::<u32>(), 12, "scale {} does not close", name);
        }
    }

    #[test]
    fn test_chord_templates_sorted_from_root() {
        for (name, offsets) in TWELVE_TET_CHORDS.iter() {
            assert_eq!(offsets[0], 0, "chord {} must start on the root", name);
            assert!(
                offsets.windows(2).all(|w| w[0] < w[1]),
                "chord {} offsets not ascending",
                name
            );
        }
    }

    #[test]
    fn test_interval_names_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for e in TWELVE_TET_INTERVALS.iter() {
            assert!(e.names.len() >= 3);
            for n in e.names {
                assert!(seen.insert(*n), "interval name {} listed twice", n);
            }
        }
    }

    #[test]
    fn test_display_name_overrides() {
        assert_eq!(TWELVE_TET_INTERVALS[6].names[TWELVE_TET_INTERVALS[6].canonical], "tritone");
        assert_eq!(TWELVE_TET_INTERVALS[18].names[TWELVE_TET_INTERVALS[18].canonical], "A11");
        assert_eq!(TWELVE_TET_INTERVALS[7].canonical, 0);
    }

    #[test]
    fn test_unnamed_distances_keep_both_spellings() {
        for (distance, long) in [(6, "unnamed Interval 6"), (18, "unnamed Interval 18")] {
            let names = TWELVE_TET_INTERVALS[distance].names;
            assert!(names.contains(&long));
            assert!(names.contains(&long.replace(" I", "_i").as_str()));
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(scale_steps(12, "major").unwrap(), &[2, 2, 1, 2, 2, 2, 1]);
        assert_eq!(
            scale_steps(12, "bebop"),
            Err(Error::UnknownScale("bebop".to_string()))
        );
        assert_eq!(chord_template(12, "major7").unwrap(), &[0, 4, 7, 11]);
        assert!(matches!(
            chord_template(19, "major"),
            Err(Error::MissingTable { table: "chord", step_count: 19 })
        ));
        assert_eq!(scale_names(12).unwrap().len(), 22);
        assert_eq!(chord_names(12).unwrap()[0], "powerchord");
    }
}
