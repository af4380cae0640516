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

//! Music theory engine: temperaments, notes, intervals, scales and chords.
//!
//! Three coordinate systems are kept consistent with each other: the step
//! distance to C0, the Scientific Pitch Notation name ("c#4") and the
//! frequency in Hz. Scales and chords are step patterns projected through
//! a [`ChromaticScale`].
//!
//! ```
//! use trallala::{Chord, Scale};
//!
//! let chord = Chord::new("c", "major").unwrap();
//! assert_eq!(chord.frequencies(), [261.63, 329.63, 392.0]);
//!
//! let scale = Scale::new("c#", "minor").unwrap();
//! assert_eq!(scale.to_string(), "c#/db, d#/eb, e, f#/gb, g#/ab, a, b");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod theory;

pub use error::{Error, Result};
pub use theory::chord::{Chord, ChordComponent, ChordDefinition};
pub use theory::chromatic::ChromaticScale;
pub use theory::interval::{Interval, IntervalSource};
pub use theory::note::{Note, NoteSource};
pub use theory::pitch_class::PitchClass;
pub use theory::scale::Scale;
pub use theory::temperament::{Temperament, TemperamentDef, TemperamentRegistry};
pub use theory::{Contains, Matches};
