//! Musical context for the command line: temperament and anchor

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use trallala::{ChromaticScale, Temperament, TemperamentRegistry};

/// Read a temperament definition from a TOML file.
///
/// ```toml
/// name = "6TET"
/// step_count = 6
/// spellings = [["c"], ["d"], ["e"], ["f#", "gb"], ["g#", "ab"], ["a#", "bb"]]
/// ```
pub fn load_temperament(path: &Path) -> Result<Temperament> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading temperament file '{}'", path.display()))?;
    parse_temperament(&text)
        .with_context(|| format!("parsing temperament file '{}'", path.display()))
}

/// Parse a temperament definition from TOML text
pub fn parse_temperament(text: &str) -> Result<Temperament> {
    let temperament: Temperament = toml::from_str(text)?;
    Ok(temperament)
}

/// Build the chromatic scale the commands work on.
///
/// A temperament file takes precedence over a registry name.
pub fn chromatic_scale(
    temperament_name: &str,
    temperament_file: Option<&Path>,
    anchor: &str,
    anchor_frequency: f64,
) -> Result<Arc<ChromaticScale>> {
    let temperament = match temperament_file {
        Some(path) => Arc::new(load_temperament(path)?),
        None => TemperamentRegistry::default().get(temperament_name)?,
    };

    debug!(
        "CONFIG: temperament {} ({} steps), anchor {}={}Hz",
        temperament.name(),
        temperament.step_count(),
        anchor,
        anchor_frequency
    );

    let scale = ChromaticScale::new(temperament, anchor, anchor_frequency)
        .with_context(|| format!("anchoring at {}={}Hz", anchor, anchor_frequency))?;
    Ok(Arc::new(scale))
}
