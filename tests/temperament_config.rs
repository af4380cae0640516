use std::sync::Arc;

use anyhow::Result;
use trallala::{ChromaticScale, Note, Scale, Temperament, TemperamentDef, TemperamentRegistry};

mod common;
use common::pc_names;

const WHOLE_TONE: &str = r#"
name = "6TET"
step_count = 6
precision = 3
spellings = [["c", "b#"], ["d"], ["e", "fb"], ["f#", "gb"], ["g#", "ab"], ["a#", "bb"]]
"#;

#[test]
fn test_load_from_toml() -> Result<()> {
    let temperament: Temperament = toml::from_str(WHOLE_TONE)?;

    assert_eq!(temperament.name(), "6TET");
    assert_eq!(temperament.step_count(), 6);
    assert_eq!(temperament.precision(), 3);
    assert_eq!(temperament.name_to_distance("Bb")?, 5);
    assert_eq!(temperament.frequency_at(440.0, 1), 493.883);

    Ok(())
}

#[test]
fn test_invalid_definitions_are_rejected() {
    let duplicate = r#"
name = "broken"
step_count = 2
spellings = [["c"], ["C"]]
"#;
    assert!(toml::from_str::<Temperament>(duplicate).is_err());

    let missing_step = r#"
name = "broken"
step_count = 3
spellings = [["c"], ["d"]]
"#;
    assert!(toml::from_str::<Temperament>(missing_step).is_err());
}

#[test]
fn test_quarter_tone_names_are_rejected() {
    let quarter = r#"
name = "24TET"
step_count = 2
spellings = [["c"], ["c+"]]
"#;
    let err = toml::from_str::<Temperament>(quarter).unwrap_err();
    assert!(err.to_string().contains("c+"), "{}", err);
}

#[test]
fn test_precision_is_bounded() {
    let too_fine = r#"
name = "too_fine"
step_count = 6
precision = 400
spellings = [["c"], ["d"], ["e"], ["f#"], ["g#"], ["a#"]]
"#;
    assert!(toml::from_str::<Temperament>(too_fine).is_err());

    let finest = too_fine.replace("precision = 400", "precision = 15");
    let temperament: Temperament = toml::from_str(&finest).unwrap();
    let scale = ChromaticScale::new(Arc::new(temperament), "c4", 256.0).unwrap();
    assert!(scale.octave_table().iter().flatten().all(|f| f.is_finite()));
}

#[test]
fn test_serialized_form_loads_back() -> Result<()> {
    let original = Temperament::nineteen_tet();
    let text = toml::to_string(&original)?;
    let loaded: Temperament = toml::from_str(&text)?;

    assert_eq!(loaded, original);
    assert_eq!(loaded.name(), "19TET");

    let def: TemperamentDef = toml::from_str(&text)?;
    assert_eq!(def.spellings.len(), 19);

    Ok(())
}

#[test]
fn test_scales_on_a_loaded_temperament() -> Result<()> {
    let temperament: Temperament = toml::from_str(WHOLE_TONE)?;
    let chromatic = Arc::new(ChromaticScale::new(Arc::new(temperament), "c4", 256.0)?);

    let c4 = Note::with_scale("c4", &chromatic)?;
    assert_eq!(c4.frequency(), 256.0);
    assert_eq!(Note::with_scale("g#4", &chromatic)?.frequency(), 406.375);
    assert!(Note::with_scale("a4", &chromatic).is_err());

    let root = trallala::PitchClass::with_scale("e", &chromatic)?;
    let scale = Scale::from_steps(root, "whole_tone", vec![1; 6])?;
    assert_eq!(
        pc_names(&scale.pitch_classes()),
        ["e", "f#", "g#", "a#", "c", "d"]
    );

    Ok(())
}

#[test]
fn test_registry_holds_custom_temperaments() -> Result<()> {
    let mut registry = TemperamentRegistry::default();
    assert!(registry.register(toml::from_str(WHOLE_TONE)?).is_none());

    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        ["12TET", "19TET", "6TET"]
    );
    assert_eq!(registry.get("6TET")?.step_count(), 6);

    // registering under the same name replaces the previous entry
    let replaced = registry.register(Temperament::twelve_tet());
    assert!(replaced.is_some());

    Ok(())
}
