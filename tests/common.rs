#![allow(dead_code)]

use std::sync::Arc;

use trallala::{ChromaticScale, Note, PitchClass, Temperament};

/// Names of rendered notes, for comparing against string literals
pub fn names(notes: &[Note]) -> Vec<String> {
    notes.iter().map(|n| n.name().to_string()).collect()
}

/// Canonical names of pitch classes
pub fn pc_names(pcs: &[PitchClass]) -> Vec<String> {
    pcs.iter().map(|pc| pc.name().to_string()).collect()
}

/// Display form of pitch classes, enharmonics joined with "/"
pub fn pc_labels(pcs: &[PitchClass]) -> Vec<String> {
    pcs.iter().map(|pc| pc.to_string()).collect()
}

/// 19-TET anchored at A4 = 440 Hz
pub fn nineteen_tet() -> Arc<ChromaticScale> {
    Arc::new(
        ChromaticScale::new(Arc::new(Temperament::nineteen_tet()), "a4", 440.0)
            .expect("19-TET anchors at a4"),
    )
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{} is not within {} of {}",
        actual,
        tolerance,
        expected
    );
}
