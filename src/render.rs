//! Plain text output of the command line

use trallala::{ChromaticScale, Chord, Interval, Note, Scale};

/// One `name : frequency` line per scale tone, starting in `octave`
pub fn scale(scale: &Scale, octave: i32) -> String {
    let mut out = String::new();
    for (pc, f) in scale.pitch_classes().iter().zip(scale.frequencies(octave)) {
        out.push_str(&format!("{:<6} : {}\n", pc.to_string(), f));
    }
    out
}

/// Notes, frequencies and intervals of a chord
pub fn chord(chord: &Chord) -> String {
    let notes: Vec<String> = chord.notes().iter().map(|n| n.to_string()).collect();
    let freqs: Vec<String> = chord.frequencies().iter().map(|f| f.to_string()).collect();

    let mut out = String::new();
    out.push_str(&format!("notes       : {}\n", notes.join(", ")));
    out.push_str(&format!("frequencies : {}\n", freqs.join(", ")));

    // temperaments without an interval table have nothing to name
    if let Ok((lowest, intervals)) = chord.intervals() {
        let names: Vec<&str> = intervals.iter().map(|i| i.name()).collect();
        out.push_str(&format!("intervals   : {} + {}\n", lowest, names.join(", ")));
    }
    out
}

/// Spellings, distance, frequency and pitch class of a note
pub fn note(note: &Note) -> String {
    let mut out = String::new();
    out.push_str(&format!("name        : {}\n", note.spellings().join(" / ")));
    out.push_str(&format!("distance    : {}\n", note.distance()));
    out.push_str(&format!("frequency   : {}\n", note.frequency()));
    out.push_str(&format!("pitch class : {}\n", note.pitch_class()));
    out
}

/// Display name, distance, short names and aliases of an interval
pub fn interval(interval: &Interval) -> String {
    let (short, alt) = interval.short_names();
    let mut out = String::new();
    out.push_str(&format!("name     : {}\n", interval.name()));
    out.push_str(&format!("distance : {}\n", interval.distance()));
    out.push_str(&format!("short    : {} / {}\n", short, alt));
    out.push_str(&format!("aliases  : {}\n", interval.aliases().join(", ")));
    out
}

/// The octave table, one row per octave with the row's first note name
pub fn octaves(scale: &ChromaticScale) -> String {
    let n = scale.step_count() as i32;
    let mut out = String::new();
    for (octave, row) in scale.octave_table().iter().enumerate() {
        let freqs: Vec<String> = row.iter().map(|f| f.to_string()).collect();
        out.push_str(&format!(
            "{:<4} : {}\n",
            scale.name_of(octave as i32 * n),
            freqs.join(" ")
        ));
    }
    out
}

/// One name per line
pub fn list(names: &[&str]) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(&format!("{}\n", name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_lines() {
        let s = Scale::new("c", "major").unwrap();
        let text = scale(&s, 4);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "c      : 261.63");
        assert_eq!(lines[5], "a      : 440");
    }

    #[test]
    fn test_chord_report() {
        let c = Chord::new("c", "major").unwrap();
        let text = chord(&c);
        assert!(text.contains("notes       : c4, e4, g4"));
        assert!(text.contains("frequencies : 261.63, 329.63, 392"));
        assert!(text.contains("intervals   : c4 + major_third, perfect_fifth"));
    }

    #[test]
    fn test_note_report() {
        let text = note(&Note::new("db4").unwrap());
        assert!(text.contains("name        : c#4 / db4"));
        assert!(text.contains("pitch class : c#/db"));
    }

    #[test]
    fn test_interval_report() {
        let text = interval(&Interval::new("unnamed Interval 6").unwrap());
        assert!(text.starts_with("name     : tritone\n"));
        assert!(text.contains("short    : d5 / A4\n"));
        assert!(text.ends_with("aliases  : unnamed_interval_6, d5, A4, tritone, unnamed Interval 6\n"));
    }

    #[test]
    fn test_octaves() {
        let text = octaves(&ChromaticScale::standard());
        assert_eq!(text.lines().count(), 9);
        assert!(text.lines().next().unwrap().starts_with("c0   : 16.35"));
    }
}
