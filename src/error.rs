//! Error type shared by every part of the theory engine

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while naming, building or comparing
/// musical values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No step of the temperament carries this pitch class name
    #[error("Unknown pitch name \"{0}\": name of a pitch class required")]
    UnknownPitchName(String),
    /// Not a pitch class name followed by an octave number
    #[error("Bad note name \"{0}\": note name in SPN required")]
    BadNoteName(String),
    /// No interval goes by this name
    #[error("Unknown interval \"{0}\"")]
    UnknownInterval(String),
    /// No scale pattern goes by this name
    #[error("Unknown scale \"{0}\"")]
    UnknownScale(String),
    /// No chord template goes by this name
    #[error("Unknown chord \"{0}\"")]
    UnknownChord(String),
    /// Name not present in the registry
    #[error("Unknown temperament \"{0}\"")]
    UnknownTemperament(String),
    /// Only 12-step temperaments ship with naming tables
    #[error("No {table} table for a temperament with {step_count} steps")]
    MissingTable {
        /// "interval", "scale" or "chord"
        table: &'static str,
        /// Steps per octave of the temperament asked for
        step_count: u32,
    },

    /// Steps are not all positive or do not add up to one octave
    #[error("Sum of steps in {name}: {sum} != {step_count}")]
    InvalidStepPattern {
        /// Pattern name
        name: String,
        /// Sum of all steps
        sum: u64,
        /// Steps per octave the pattern must add up to
        step_count: u32,
    },
    /// Voicing has a different number of entries than the chord has tones
    #[error("len(voicing) {got} != len(chord) {expected}")]
    VoicingLength {
        /// Number of chord tones
        expected: usize,
        /// Number of voicing entries
        got: usize,
    },
    /// Chord components that are not offsets or intervals above the root
    #[error("Malformed chord definition: {0}")]
    MalformedChord(String),
    /// Temperament definition that cannot name or tune its steps
    #[error("Invalid temperament: {0}")]
    InvalidTemperament(String),

    /// Anchor frequency that is not positive or does not double per octave
    #[error("Bad anchor {name}={frequency}Hz: one octave does not double the frequency")]
    BadAnchor {
        /// SPN name of the anchor
        name: String,
        /// Frequency given for it
        frequency: f64,
    },
    /// Intervals are unsigned
    #[error("Interval cannot be created from negative distance {0}")]
    NegativeInterval(i64),
    /// Distance beyond the interval table
    #[error("No interval named for distance {0}")]
    IntervalOutOfRange(u32),
    /// Octave factor that is not a positive finite number
    #[error("Multiplication or division of a note by {0} is not allowed (factor must be > 0)")]
    NonPositiveFactor(f64),
    /// Frequency that is not an entry of the octave table
    #[error("Frequency {0}Hz does not match any note in the chromatic scale")]
    NoMatchingNote(f64),
    /// Note distance that does not fit an `i32`
    #[error("Distance {0} from c0 is outside the range of representable notes")]
    DistanceOutOfRange(f64),

    /// Operation needs the octave of every chord tone
    #[error("Cannot {0} without a voicing set on the chord")]
    VoicingRequired(&'static str),
    /// Comparison against a value of the wrong shape
    #[error("Unsupported comparison: {0}")]
    ComparisonShape(String),
    /// Collection mixing offsets, intervals and note names
    #[error("Chords can only be compared to collections of a single kind (offsets, intervals or names)")]
    MixedComparison,
}
