//! Chords: offsets from a root pitch class, optionally voiced

use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use log::debug;

use super::chromatic::ChromaticScale;
use super::interval::Interval;
use super::note::Note;
use super::pitch_class::PitchClass;
use super::tables::{chord_names, chord_template};
use super::{Contains, Matches};
use crate::error::{Error, Result};

/// Octave the lowest tone of an unvoiced chord is placed in
const DEFAULT_OCTAVE: i32 = 4;

/// One element of an explicit chord definition or of a comparison.
#[derive(Clone, Debug)]
pub enum ChordComponent {
    /// Steps above the root
    Offset(i64),
    /// Interval above the root
    Interval(Interval),
    /// A rendered note name ("e4"), only meaningful in comparisons
    Name(String),
}

impl From<i64> for ChordComponent {
    fn from(d: i64) -> Self {
        ChordComponent::Offset(d)
    }
}

impl From<u32> for ChordComponent {
    fn from(d: u32) -> Self {
        ChordComponent::Offset(d as i64)
    }
}

impl From<i32> for ChordComponent {
    fn from(d: i32) -> Self {
        ChordComponent::Offset(d as i64)
    }
}

impl From<Interval> for ChordComponent {
    fn from(i: Interval) -> Self {
        ChordComponent::Interval(i)
    }
}

impl From<&str> for ChordComponent {
    fn from(s: &str) -> Self {
        ChordComponent::Name(s.to_string())
    }
}

/// What a chord is built from.
#[derive(Clone, Debug)]
pub enum ChordDefinition {
    /// Name of a chord template ("major7")
    Template(String),
    /// Explicit offsets and/or intervals above the root
    Components(Vec<ChordComponent>),
}

impl From<&str> for ChordDefinition {
    fn from(s: &str) -> Self {
        ChordDefinition::Template(s.to_string())
    }
}

impl From<String> for ChordDefinition {
    fn from(s: String) -> Self {
        ChordDefinition::Template(s)
    }
}

impl From<Vec<ChordComponent>> for ChordDefinition {
    fn from(c: Vec<ChordComponent>) -> Self {
        ChordDefinition::Components(c)
    }
}

impl From<&[u32]> for ChordDefinition {
    fn from(offsets: &[u32]) -> Self {
        ChordDefinition::Components(offsets.iter().map(|&o| o.into()).collect())
    }
}

impl From<Vec<u32>> for ChordDefinition {
    fn from(offsets: Vec<u32>) -> Self {
        offsets.as_slice().into()
    }
}

impl From<Vec<Interval>> for ChordDefinition {
    fn from(intervals: Vec<Interval>) -> Self {
        ChordDefinition::Components(intervals.into_iter().map(ChordComponent::Interval).collect())
    }
}

/// A set of offsets above a root pitch class.
///
/// Offsets are kept sorted. Without a voicing the chord is rendered in
/// close position from octave 4; with a voicing, entry `i` is the octave
/// of chord tone `i`.
#[derive(Clone, Debug)]
pub struct Chord {
    root: PitchClass,
    offsets: Vec<u32>,
    voicing: Option<Vec<i32>>,
    name: Option<String>,
}

impl Chord {
    /// Chord from a template on the standard chromatic scale, e.g.
    /// `Chord::new("c", "major")`
    pub fn new(root: &str, template: &str) -> Result<Chord> {
        Self::with_root(PitchClass::new(root)?, template, None)
    }

    /// Chord on `scale`
    pub fn with_scale(
        root: &str,
        definition: impl Into<ChordDefinition>,
        voicing: Option<Vec<i32>>,
        scale: &Arc<ChromaticScale>,
    ) -> Result<Chord> {
        Self::with_root(PitchClass::with_scale(root, scale)?, definition, voicing)
    }

    /// Chord above `root`
    pub fn with_root(
        root: PitchClass,
        definition: impl Into<ChordDefinition>,
        voicing: Option<Vec<i32>>,
    ) -> Result<Chord> {
        let step_count = root.scale().step_count();
        let (offsets, name) = match definition.into() {
            ChordDefinition::Template(name) => {
                (chord_template(step_count, &name)?.to_vec(), Some(name))
            }
            ChordDefinition::Components(components) => (resolve(&components, &root)?, None),
        };

        if offsets.is_empty() {
            return Err(Error::MalformedChord("a chord needs at least one tone".to_string()));
        }

        let (offsets, voicing) = sorted(offsets, voicing)?;

        debug!(
            "CHORD: root={} offsets={:?} voicing={:?}",
            root.name(),
            offsets,
            voicing
        );

        Ok(Chord {
            root,
            offsets,
            voicing,
            name,
        })
    }

    /// Names of the chord templates available for `step_count`
    pub fn template_names(step_count: u32) -> Result<Vec<&'static str>> {
        chord_names(step_count)
    }

    /// Root pitch class
    pub fn root(&self) -> &PitchClass {
        &self.root
    }

    /// Template name, if the chord was built from one and not composed since
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sorted offsets above the root
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Octave of every chord tone, if voiced
    pub fn voicing(&self) -> Option<&[i32]> {
        self.voicing.as_deref()
    }

    /// Same chord with the voicing replaced (or removed with `None`)
    pub fn with_voicing(&self, voicing: Option<Vec<i32>>) -> Result<Chord> {
        if let Some(v) = &voicing {
            check_voicing(self.offsets.len(), v)?;
        }
        Ok(Chord {
            voicing,
            ..self.clone()
        })
    }

    fn chromatic(&self) -> &Arc<ChromaticScale> {
        self.root.scale()
    }

    fn step_count(&self) -> u32 {
        self.chromatic().step_count()
    }

    /// Rendered notes, one per offset
    pub fn notes(&self) -> Vec<Note> {
        let n = self.step_count() as i32;
        let root = self.root.numeric() as i32;

        match &self.voicing {
            Some(voicing) => self
                .offsets
                .iter()
                .zip(voicing)
                .map(|(&o, &octave)| {
                    let pc = (root + o as i32).rem_euclid(n);
                    Note::from_distance(pc + n * octave, self.chromatic())
                })
                .collect(),
            None => self
                .offsets
                .iter()
                .map(|&o| Note::from_distance(root + DEFAULT_OCTAVE * n + o as i32, self.chromatic()))
                .collect(),
        }
    }

    /// Chord tone `i`
    pub fn note(&self, i: usize) -> Option<Note> {
        self.notes().into_iter().nth(i)
    }

    /// Pitch classes of the rendered notes
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.notes().iter().map(Note::pitch_class).collect()
    }

    /// Frequencies of the rendered notes
    pub fn frequencies(&self) -> Vec<f64> {
        self.notes().iter().map(Note::frequency).collect()
    }

    /// Lowest note and the intervals from it to every other chord tone
    pub fn intervals(&self) -> Result<(Note, Vec<Interval>)> {
        let notes = self.notes();
        let (lowest, rest) = notes
            .split_first()
            .ok_or_else(|| Error::MalformedChord("empty chord".to_string()))?;
        let intervals = rest
            .iter()
            .map(|n| Interval::between(lowest, n))
            .collect::<Result<Vec<_>>>()?;
        Ok((lowest.clone(), intervals))
    }

    /// Offset of `pc` above the root, inside one octave
    fn offset_of(&self, pc: u32) -> u32 {
        let n = self.step_count();
        (pc + n - self.root.numeric() % n) % n
    }

    fn root_octave(&self) -> Option<i32> {
        self.voicing.as_ref().and_then(|v| v.first().copied())
    }

    fn with_tone(&self, offset: u32, octave: Option<i32>) -> Chord {
        if self.offsets.contains(&offset) {
            return self.clone();
        }

        let mut offsets = self.offsets.clone();
        offsets.push(offset);
        let voicing = match (&self.voicing, octave) {
            (Some(v), Some(octave)) => {
                let mut v = v.clone();
                v.push(octave);
                Some(v)
            }
            _ => None,
        };

        // lengths match by construction
        let (offsets, voicing) = sort_pairs(offsets, voicing);

        debug!(
            "CHORD: {} + offset {} -> {:?} voicing={:?}",
            self.root.name(),
            offset,
            offsets,
            voicing
        );

        Chord {
            root: self.root.clone(),
            offsets,
            voicing,
            name: None,
        }
    }

    /// Add a note in its own octave. Requires a voicing.
    pub fn add_note(&self, note: &Note) -> Result<Chord> {
        if self.voicing.is_none() {
            return Err(Error::VoicingRequired("add a note"));
        }
        let offset = self.offset_of(note.pitch_class_index());
        Ok(self.with_tone(offset, Some(note.octave())))
    }

    /// Add a pitch class, voiced in the root's octave
    pub fn add_pitch_class(&self, pc: &PitchClass) -> Chord {
        let offset = self.offset_of(pc.numeric());
        self.with_tone(offset, self.root_octave())
    }

    /// Add an interval above the root, voiced one octave up for every
    /// octave boundary the interval crosses
    pub fn add_interval(&self, interval: &Interval) -> Chord {
        let n = self.step_count();
        let crossed = (self.root.numeric() + interval.distance()) / n;
        let octave = self.root_octave().map(|o| o + crossed as i32);
        self.with_tone(interval.distance(), octave)
    }
}

// Offsets must stay renderable in close position above `root`.
fn resolve(components: &[ChordComponent], root: &PitchClass) -> Result<Vec<u32>> {
    let n = i64::from(root.scale().step_count());
    let max = i64::from(i32::MAX) - (i64::from(root.numeric()) + i64::from(DEFAULT_OCTAVE) * n);
    let checked = |d: i64| {
        if d < 0 || d > max {
            Err(Error::MalformedChord(format!(
                "offset {} is not a step count between 0 and {}",
                d, max
            )))
        } else {
            Ok(d as u32)
        }
    };

    components
        .iter()
        .map(|c| match c {
            ChordComponent::Offset(d) => checked(*d),
            ChordComponent::Interval(i) => checked(i64::from(i.distance())),
            ChordComponent::Name(s) => Err(Error::MalformedChord(format!(
                "\"{}\" is neither an offset nor an interval",
                s
            ))),
        })
        .collect()
}

fn check_voicing(expected: usize, voicing: &[i32]) -> Result<()> {
    if voicing.len() != expected {
        return Err(Error::VoicingLength {
            expected,
            got: voicing.len(),
        });
    }
    Ok(())
}

fn sorted(offsets: Vec<u32>, voicing: Option<Vec<i32>>) -> Result<(Vec<u32>, Option<Vec<i32>>)> {
    if let Some(v) = &voicing {
        check_voicing(offsets.len(), v)?;
    }
    Ok(sort_pairs(offsets, voicing))
}

/// Sort offsets, carrying each voicing entry along with its offset
fn sort_pairs(offsets: Vec<u32>, voicing: Option<Vec<i32>>) -> (Vec<u32>, Option<Vec<i32>>) {
    match voicing {
        Some(voicing) => {
            let mut pairs: Vec<(u32, i32)> = offsets.into_iter().zip(voicing).collect();
            pairs.sort_by_key(|&(o, _)| o);
            let (offsets, voicing) = pairs.into_iter().unzip();
            (offsets, Some(voicing))
        }
        None => {
            let mut offsets = offsets;
            offsets.sort_unstable();
            (offsets, None)
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.pitch_classes().iter().map(|pc| pc.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Same rendered notes
impl PartialEq for Chord {
    fn eq(&self, other: &Chord) -> bool {
        self.notes() == other.notes()
    }
}

impl PartialEq<[u32]> for Chord {
    fn eq(&self, other: &[u32]) -> bool {
        self.offsets == other
    }
}

impl PartialEq<Vec<u32>> for Chord {
    fn eq(&self, other: &Vec<u32>) -> bool {
        self.offsets == *other
    }
}

/// Compare against offsets, intervals above the root or rendered note
/// names. All components must be of the same kind.
impl Matches<[ChordComponent]> for Chord {
    fn matches(&self, other: &[ChordComponent]) -> Result<bool> {
        let Some(first) = other.first() else {
            return Ok(self.offsets.is_empty());
        };

        match first {
            ChordComponent::Offset(_) => {
                let mut offsets = Vec::with_capacity(other.len());
                for c in other {
                    match c {
                        ChordComponent::Offset(d) => offsets.push(*d),
                        _ => return Err(Error::MixedComparison),
                    }
                }
                Ok(self.offsets.iter().map(|&o| o as i64).eq(offsets))
            }
            ChordComponent::Interval(_) => {
                let mut distances = Vec::with_capacity(other.len());
                for c in other {
                    match c {
                        ChordComponent::Interval(i) => distances.push(i.distance()),
                        _ => return Err(Error::MixedComparison),
                    }
                }
                Ok(self.offsets == distances)
            }
            ChordComponent::Name(_) => {
                let mut names = Vec::with_capacity(other.len());
                for c in other {
                    match c {
                        ChordComponent::Name(s) => names.push(s.as_str()),
                        _ => return Err(Error::MixedComparison),
                    }
                }
                let notes = self.notes();
                Ok(notes.len() == names.len() && notes.iter().zip(names).all(|(n, s)| n == s))
            }
        }
    }
}

impl Contains<Note> for Chord {
    fn contains(&self, note: &Note) -> Result<bool> {
        if self.voicing.is_none() {
            return Err(Error::VoicingRequired("test note membership"));
        }
        Ok(self.notes().iter().any(|n| n == note))
    }
}

/// Voicing independent
impl Contains<PitchClass> for Chord {
    fn contains(&self, pc: &PitchClass) -> Result<bool> {
        let n = self.step_count();
        let offset = self.offset_of(pc.numeric());
        Ok(self.offsets.iter().any(|&o| o % n == offset))
    }
}

/// Distance from the lowest tone to any other tone
impl Contains<Interval> for Chord {
    fn contains(&self, interval: &Interval) -> Result<bool> {
        let Some((&lowest, rest)) = self.offsets.split_first() else {
            return Ok(false);
        };
        Ok(rest.iter().any(|&o| o - lowest == interval.distance()))
    }
}

impl Contains<f64> for Chord {
    fn contains(&self, frequency: &f64) -> Result<bool> {
        if self.voicing.is_none() {
            return Err(Error::VoicingRequired("test frequency membership"));
        }
        Ok(self.frequencies().contains(frequency))
    }
}

/// Integers are matched against the frequencies, like floats
impl Contains<i32> for Chord {
    fn contains(&self, frequency: &i32) -> Result<bool> {
        self.contains(&(*frequency as f64))
    }
}

impl Add<PitchClass> for Chord {
    type Output = Chord;

    fn add(self, pc: PitchClass) -> Chord {
        self.add_pitch_class(&pc)
    }
}

impl Add<&PitchClass> for &Chord {
    type Output = Chord;

    fn add(self, pc: &PitchClass) -> Chord {
        self.add_pitch_class(pc)
    }
}

impl Add<Interval> for Chord {
    type Output = Chord;

    fn add(self, interval: Interval) -> Chord {
        self.add_interval(&interval)
    }
}

impl Add<Interval> for &Chord {
    type Output = Chord;

    fn add(self, interval: Interval) -> Chord {
        self.add_interval(&interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_major() {
        let c = Chord::new("c", "major").unwrap();
        assert_eq!(names(&c.notes()), ["c4", "e4", "g4"]);
        assert_eq!(c.frequencies(), [261.63, 329.63, 392.0]);
        assert_eq!(c.name(), Some("major"));
        assert_eq!(c.to_string(), "c, e, g");

        let c7 = Chord::new("c", "major7").unwrap();
        assert_eq!(c7.frequencies(), [261.63, 329.63, 392.0, 493.88]);
    }

    #[test]
    fn test_root_is_applied() {
        let a = Chord::new("a", "minor").unwrap();
        assert_eq!(names(&a.notes()), ["a4", "c5", "e5"]);
        assert_eq!(a.note(1).unwrap(), "c5");
        assert!(a.note(3).is_none());
    }

    #[test]
    fn test_explicit_definitions() {
        let standard = ChromaticScale::standard();
        let from_ints = Chord::with_scale("c", vec![7u32, 0, 4], None, &standard).unwrap();
        assert_eq!(from_ints.offsets(), [0, 4, 7]);
        assert_eq!(from_ints, Chord::new("c", "major").unwrap());

        let intervals = vec![
            Interval::new(0).unwrap(),
            Interval::new("m3").unwrap(),
            Interval::new("P5").unwrap(),
        ];
        let from_intervals = Chord::with_scale("a", intervals, None, &standard).unwrap();
        assert_eq!(from_intervals, Chord::new("a", "minor").unwrap());

        let bad = Chord::with_scale(
            "c",
            vec![ChordComponent::Offset(0), ChordComponent::Name("e".to_string())],
            None,
            &standard,
        );
        assert!(matches!(bad, Err(Error::MalformedChord(_))));
        assert!(matches!(
            Chord::with_scale("c", vec![ChordComponent::Offset(-3)], None, &standard),
            Err(Error::MalformedChord(_))
        ));
        assert!(matches!(
            Chord::with_scale("c", vec![0u32, u32::MAX], None, &standard),
            Err(Error::MalformedChord(_))
        ));
        assert_eq!(
            Chord::new("c", "major13#11b9").unwrap_err(),
            Error::UnknownChord("major13#11b9".to_string())
        );
    }

    #[test]
    fn test_voicing() {
        let standard = ChromaticScale::standard();
        let c = Chord::with_scale("c", "major", Some(vec![3, 4, 5]), &standard).unwrap();
        assert_eq!(names(&c.notes()), ["c3", "e4", "g5"]);
        assert_eq!(c.voicing(), Some([3, 4, 5].as_slice()));

        assert_eq!(
            c.with_voicing(Some(vec![4, 4])).unwrap_err(),
            Error::VoicingLength {
                expected: 3,
                got: 2
            }
        );
        let unvoiced = c.with_voicing(None).unwrap();
        assert_eq!(names(&unvoiced.notes()), ["c4", "e4", "g4"]);

        // voicing entries travel with their offsets
        let shuffled = Chord::with_scale("c", vec![7u32, 0, 4], Some(vec![5, 3, 4]), &standard).unwrap();
        assert_eq!(shuffled, c);
    }

    #[test]
    fn test_add_pitch_class() {
        let c = Chord::new("c", "major").unwrap();
        let b = PitchClass::new("b").unwrap();
        let cmaj7 = &c + &b;
        assert_eq!(cmaj7.offsets(), [0, 4, 7, 11]);
        assert_eq!(cmaj7, Chord::new("c", "major7").unwrap());
        assert_eq!(cmaj7.name(), None);
        assert_eq!(&cmaj7 + &b, cmaj7);

        // offsets are relative to the root
        let a = Chord::new("a", "minor").unwrap();
        let am7 = a + PitchClass::new("g").unwrap();
        assert_eq!(am7.offsets(), [0, 3, 7, 10]);
    }

    #[test]
    fn test_add_interval() {
        let standard = ChromaticScale::standard();
        let a = Chord::with_scale("a", "minor", Some(vec![3, 4, 4]), &standard).unwrap();
        let with_seventh = &a + Interval::new("m7").unwrap();
        assert_eq!(names(&with_seventh.notes()), ["a3", "c4", "e4", "g4"]);

        let c = Chord::with_scale("c", "major", Some(vec![4, 4, 4]), &standard).unwrap();
        let with_ninth = c + Interval::new("M9").unwrap();
        assert_eq!(with_ninth.offsets(), [0, 4, 7, 14]);
        assert_eq!(names(&with_ninth.notes()), ["c4", "e4", "g4", "d5"]);
    }

    #[test]
    fn test_add_note() {
        let c = Chord::new("c", "major").unwrap();
        let b4 = Note::new("b4").unwrap();
        assert_eq!(c.add_note(&b4).unwrap_err(), Error::VoicingRequired("add a note"));

        let voiced = c.with_voicing(Some(vec![4, 4, 4])).unwrap();
        let cmaj7 = voiced.add_note(&b4).unwrap();
        assert_eq!(names(&cmaj7.notes()), ["c4", "e4", "g4", "b4"]);
        assert_eq!(cmaj7.add_note(&b4).unwrap(), cmaj7);
    }

    #[test]
    fn test_comparisons() {
        let c = Chord::new("c", "major").unwrap();
        assert!(c == [0u32, 4, 7][..]);
        assert!(c == vec![0u32, 4, 7]);

        let offsets: Vec<ChordComponent> = vec![0.into(), 4.into(), 7.into()];
        assert!(c.matches(offsets.as_slice()).unwrap());

        let intervals: Vec<ChordComponent> = ["P1", "M3", "P5"]
            .iter()
            .map(|n| Interval::new(*n).unwrap().into())
            .collect();
        assert!(c.matches(intervals.as_slice()).unwrap());

        let names: Vec<ChordComponent> = vec!["c4".into(), "E4".into(), "g4".into()];
        assert!(c.matches(names.as_slice()).unwrap());

        let mixed: Vec<ChordComponent> = vec![0.into(), "e4".into()];
        assert_eq!(c.matches(mixed.as_slice()).unwrap_err(), Error::MixedComparison);
    }

    #[test]
    fn test_membership() {
        let c = Chord::new("c", "major").unwrap();
        assert!(c.contains(&PitchClass::new("e").unwrap()).unwrap());
        assert!(!c.contains(&PitchClass::new("f").unwrap()).unwrap());
        assert!(c.contains(&Interval::new("P5").unwrap()).unwrap());
        assert!(!c.contains(&Interval::new("P4").unwrap()).unwrap());
        assert!(matches!(
            c.contains(&Note::new("e4").unwrap()),
            Err(Error::VoicingRequired(_))
        ));
        assert!(c.contains(&261.63).is_err());

        let voiced = c.with_voicing(Some(vec![4, 4, 4])).unwrap();
        assert!(voiced.contains(&Note::new("e4").unwrap()).unwrap());
        assert!(!voiced.contains(&Note::new("e5").unwrap()).unwrap());
        assert!(voiced.contains(&392.0).unwrap());
        assert!(voiced.contains(&392i32).unwrap());
        assert!(!voiced.contains(&440i32).unwrap());
    }

    #[test]
    fn test_intervals() {
        let c = Chord::new("c", "major7").unwrap();
        let (root, intervals) = c.intervals().unwrap();
        assert_eq!(root, "c4");
        let names: Vec<_> = intervals.iter().map(|i| i.name()).collect();
        assert_eq!(names, ["major_third", "perfect_fifth", "major_seventh"]);
    }
}
