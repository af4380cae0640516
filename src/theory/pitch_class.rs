//! Pitch classes: all notes sharing a position inside the octave

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use super::chromatic::{ChromaticScale, OCTAVE_COUNT};
use super::note::{Note, NoteSource};
use super::{Contains, Matches};
use crate::error::Result;

/// Every note at the same position modulo the octave, e.g. "all Cs".
///
/// Keeps one representative note per octave of the chromatic scale's
/// table, in ascending order.
#[derive(Clone, Debug)]
pub struct PitchClass {
    numeric: u32,
    names: Vec<String>,
    notes: Vec<Note>,
    scale: Arc<ChromaticScale>,
}

impl PitchClass {
    /// Pitch class on the standard chromatic scale.
    ///
    /// Accepts anything a [`Note`] accepts plus bare names without an
    /// octave ("c#").
    pub fn new(source: impl Into<NoteSource>) -> Result<PitchClass> {
        Self::with_scale(source, &ChromaticScale::standard())
    }

    /// Pitch class on `scale`
    pub fn with_scale(
        source: impl Into<NoteSource>,
        scale: &Arc<ChromaticScale>,
    ) -> Result<PitchClass> {
        let source = source.into();
        let note = match Note::with_scale(source.clone(), scale) {
            Ok(note) => note,
            Err(err) => match source {
                // a bare name resolves through octave 0
                NoteSource::Spn(name) => {
                    Note::with_scale(format!("{}0", name.trim()), scale).map_err(|_| err)?
                }
                _ => return Err(err),
            },
        };

        Ok(Self::from_index(note.pitch_class_index(), scale))
    }

    /// Pitch class at `numeric` (wrapped into the octave)
    pub fn from_index(numeric: u32, scale: &Arc<ChromaticScale>) -> PitchClass {
        let n = scale.step_count();
        let numeric = numeric % n;
        let notes = (0..OCTAVE_COUNT)
            .map(|octave| Note::from_distance((numeric + octave * n) as i32, scale))
            .collect();

        PitchClass {
            numeric,
            names: scale.temperament().names_of(numeric as i32).to_vec(),
            notes,
            scale: scale.clone(),
        }
    }

    /// Canonical name without octave, e.g. "c#"
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// All enharmonic names, canonical first
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position inside the octave, `0..step_count`
    pub fn numeric(&self) -> u32 {
        self.numeric
    }

    /// Chromatic scale the pitch class lives on
    pub fn scale(&self) -> &Arc<ChromaticScale> {
        &self.scale
    }

    /// Representative notes, one per octave
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Note of this pitch class in `octave`
    pub fn get(&self, octave: usize) -> Option<&Note> {
        self.notes.get(octave)
    }

    /// Iterate the representative notes in ascending octave order
    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl Note {
    /// Pitch class of this note
    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::from_index(self.pitch_class_index(), self.scale())
    }
}

impl Index<usize> for PitchClass {
    type Output = Note;

    fn index(&self, octave: usize) -> &Note {
        &self.notes[octave]
    }
}

impl<'a> IntoIterator for &'a PitchClass {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join("/"))
    }
}

impl PartialEq for PitchClass {
    fn eq(&self, other: &PitchClass) -> bool {
        self.numeric == other.numeric
    }
}

/// Compare against a pitch class name without octave
impl Matches<str> for PitchClass {
    fn matches(&self, other: &str) -> Result<bool> {
        let distance = self.scale.temperament().name_to_distance(other)?;
        Ok(distance == self.numeric)
    }
}

impl Contains<Note> for PitchClass {
    fn contains(&self, note: &Note) -> Result<bool> {
        Ok(note.pitch_class_index() == self.numeric)
    }
}

impl Contains<str> for PitchClass {
    fn contains(&self, spn: &str) -> Result<bool> {
        self.contains(&Note::with_scale(spn, &self.scale)?)
    }
}

impl Contains<f64> for PitchClass {
    fn contains(&self, frequency: &f64) -> Result<bool> {
        self.contains(&Note::with_scale(*frequency, &self.scale)?)
    }
}

impl Contains<i32> for PitchClass {
    fn contains(&self, distance: &i32) -> Result<bool> {
        self.contains(&Note::with_scale(*distance, &self.scale)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_iteration() {
        let pc_a = PitchClass::new("A").unwrap();
        assert_eq!(pc_a.notes().len(), OCTAVE_COUNT as usize);
        for (i, note) in pc_a.iter().enumerate() {
            assert_eq!(note.name(), format!("a{}", i));
            assert_eq!(pc_a[i], *note);
        }
        // a second pass yields the same notes
        let again: Vec<_> = (&pc_a).into_iter().map(|n| n.distance()).collect();
        assert_eq!(again[0], 9);
        assert_eq!(again.len(), 9);
    }

    #[test]
    fn test_construction() {
        let from_note = PitchClass::new(Note::new("c#5").unwrap()).unwrap();
        let from_name = PitchClass::new("db").unwrap();
        let from_spn = PitchClass::new("C#2").unwrap();
        let from_distance = PitchClass::new(13).unwrap();
        let from_freq = PitchClass::new(277.18).unwrap();
        for pc in [&from_note, &from_name, &from_spn, &from_distance, &from_freq] {
            assert_eq!(pc.numeric(), 1);
            assert_eq!(pc.name(), "c#");
            assert_eq!(pc.names(), ["c#", "db"]);
        }
        assert_eq!(from_name.to_string(), "c#/db");

        assert!(matches!(PitchClass::new("h"), Err(Error::BadNoteName(_))));
    }

    #[test]
    fn test_membership() {
        let pc_a = PitchClass::new("A").unwrap();
        let pc_d = PitchClass::new("d").unwrap();
        let a4 = Note::new("a4").unwrap();
        assert!(pc_a.contains(&a4).unwrap());
        assert!(!pc_d.contains(&a4).unwrap());
        assert!(pc_a.contains("a7").unwrap());
        assert!(pc_a.contains(&440.0).unwrap());
        assert!(pc_a.contains(&(12 * 3 + 9i32)).unwrap());
        assert!(pc_d.contains("x4").is_err());

        assert!(pc_a.matches("A").unwrap());
        assert!(!pc_a.matches("d").unwrap());
        assert!(pc_a.matches("q").is_err());
        assert_eq!(a4.pitch_class(), pc_a);
    }
}
