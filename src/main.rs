use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use trallala::{Chord, Interval, IntervalSource, Note, NoteSource, PitchClass, Scale};

mod config;
mod render;

/// Notes, intervals, scales and chords under a configurable temperament
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Note the anchor frequency belongs to
    #[arg(long, global = true, default_value = "a4")]
    anchor: String,

    /// Frequency of the anchor note in Hz
    #[arg(long, global = true, default_value_t = 440.0)]
    anchor_freq: f64,

    /// Built-in temperament (12TET, 19TET)
    #[arg(long, global = true, default_value = "12TET")]
    temperament: String,

    /// TOML file describing a custom temperament
    #[arg(long, global = true)]
    temperament_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the named scale patterns
    Scales,
    /// List the named chord templates
    Chords,
    /// Print the frequencies of a scale
    Scale {
        /// Root pitch class, e.g. "c#"
        root: String,

        /// Scale pattern name, e.g. "minor"
        pattern: String,

        /// Octave of the root
        #[arg(long, default_value_t = 4, allow_hyphen_values = true)]
        octave: i32,
    },
    /// Print the notes, frequencies and intervals of a chord
    Chord {
        /// Root pitch class, e.g. "a"
        root: String,

        /// Chord template name, e.g. "minor7"
        template: String,

        /// Octave of every chord tone, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        voicing: Option<Vec<i32>>,
    },
    /// Describe a note given as SPN, distance to C0 or frequency
    Note {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Describe an interval given by name or distance
    Interval { value: String },
    /// Print the octave table of the chromatic scale
    Octaves,
}

fn note_source(value: &str) -> NoteSource {
    if let Ok(d) = value.parse::<i32>() {
        NoteSource::Distance(d)
    } else if let Ok(f) = value.parse::<f64>() {
        NoteSource::Frequency(f)
    } else {
        NoteSource::Spn(value.to_string())
    }
}

fn interval_source(value: &str) -> IntervalSource {
    match value.parse::<i64>() {
        Ok(d) => IntervalSource::Distance(d),
        Err(_) => IntervalSource::Name(value.to_string()),
    }
}

fn run(args: Args) -> Result<()> {
    let chromatic = config::chromatic_scale(
        &args.temperament,
        args.temperament_file.as_deref(),
        &args.anchor,
        args.anchor_freq,
    )?;
    let step_count = chromatic.step_count();

    match args.command {
        Commands::Scales => {
            print!("{}", render::list(&Scale::pattern_names(step_count)?));
        }
        Commands::Chords => {
            print!("{}", render::list(&Chord::template_names(step_count)?));
        }
        Commands::Scale {
            root,
            pattern,
            octave,
        } => {
            let root = PitchClass::with_scale(root.as_str(), &chromatic)
                .with_context(|| format!("scale root '{}'", root))?;
            let scale = Scale::with_root(root, &pattern)?;
            print!("{}", render::scale(&scale, octave));
        }
        Commands::Chord {
            root,
            template,
            voicing,
        } => {
            let chord = Chord::with_scale(&root, template.as_str(), voicing, &chromatic)
                .with_context(|| format!("chord {} {}", root, template))?;
            print!("{}", render::chord(&chord));
        }
        Commands::Note { value } => {
            let note = Note::with_scale(note_source(&value), &chromatic)
                .with_context(|| format!("note '{}'", value))?;
            print!("{}", render::note(&note));
        }
        Commands::Interval { value } => {
            let interval = Interval::with_step_count(interval_source(&value), step_count)
                .with_context(|| format!("interval '{}'", value))?;
            print!("{}", render::interval(&interval));
        }
        Commands::Octaves => {
            print!("{}", render::octaves(&chromatic));
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_source() {
        assert!(matches!(note_source("57"), NoteSource::Distance(57)));
        assert!(matches!(note_source("-3"), NoteSource::Distance(-3)));
        assert!(matches!(note_source("440.0"), NoteSource::Frequency(f) if f == 440.0));
        assert!(matches!(note_source("c#4"), NoteSource::Spn(s) if s == "c#4"));
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "trallala",
            "chord",
            "a",
            "minor",
            "--voicing",
            "3,4,4",
            "--anchor-freq",
            "432",
        ])
        .unwrap();
        assert_eq!(args.anchor_freq, 432.0);
        match args.command {
            Commands::Chord { voicing, .. } => assert_eq!(voicing, Some(vec![3, 4, 4])),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
