//! Sample datasets: the built-in reference drive and JSON loading.
//!
//! A dataset is any non-empty, ordered list of [`Sample`]s. JSON files may
//! use either layout:
//!
//! ```json
//! [{"speed": 0, "temperature": 70}, {"speed": 12, "temperature": 70.5}]
//! ```
//!
//! ```json
//! {"speed": [0, 12], "temperature": [70, 70.5]}
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::Sample;

// ---------------------------------------------------------------------------
// Reference drive
// ---------------------------------------------------------------------------

/// Number of points in the built-in reference drive.
pub const REFERENCE_LEN: usize = 50;

/// Speed trace (km/h): pulls away, crosses the limit, slows through
/// traffic, then a second longer overspeed episode before coming to rest.
const REFERENCE_SPEED: [f64; REFERENCE_LEN] = [
    0.0, 10.0, 20.0, 30.0, 45.0, 55.0, 60.0, 65.0, 70.0, 75.0, //
    78.0, 80.0, 82.0, 85.0, 88.0, 90.0, 86.0, 83.0, 79.0, 76.0, //
    72.0, 70.0, 68.0, 65.0, 62.0, 60.0, 64.0, 70.0, 76.0, 81.0, //
    85.0, 90.0, 95.0, 98.0, 100.0, 97.0, 92.0, 87.0, 82.0, 78.0, //
    74.0, 70.0, 65.0, 60.0, 55.0, 50.0, 40.0, 30.0, 20.0, 10.0,
];

/// Engine temperature trace (°C): slow warm-up, a steep climb during the
/// second overspeed episode, then cool-down.
const REFERENCE_TEMPERATURE: [f64; REFERENCE_LEN] = [
    70.0, 70.5, 71.0, 71.5, 72.0, 72.5, 73.0, 73.5, 74.0, 75.0, //
    76.0, 77.0, 78.0, 79.0, 80.0, 81.0, 82.0, 82.5, 83.0, 83.0, //
    83.5, 84.0, 84.0, 84.5, 85.0, 85.0, 85.5, 86.0, 87.0, 88.0, //
    89.0, 91.0, 93.0, 95.0, 97.0, 98.0, 99.0, 99.5, 100.0, 100.0, //
    99.5, 99.0, 98.0, 97.0, 96.0, 95.0, 94.0, 93.0, 92.0, 91.0,
];

/// The built-in 50-point reference drive.
pub fn reference_samples() -> Vec<Sample> {
    REFERENCE_SPEED
        .iter()
        .zip(REFERENCE_TEMPERATURE.iter())
        .map(|(&speed, &temperature)| Sample::new(speed, temperature))
        .collect()
}

// ---------------------------------------------------------------------------
// Building from parallel series
// ---------------------------------------------------------------------------

/// Pair two parallel series into samples.
///
/// Both series must be non-empty and of equal length.
pub fn from_series(speed: &[f64], temperature: &[f64]) -> Result<Vec<Sample>, CoreError> {
    if speed.len() != temperature.len() {
        return Err(CoreError::Validation(format!(
            "speed and temperature series differ in length ({} vs {})",
            speed.len(),
            temperature.len()
        )));
    }
    let samples: Vec<Sample> = speed
        .iter()
        .zip(temperature)
        .map(|(&s, &t)| Sample::new(s, t))
        .collect();
    ensure_not_empty(&samples)?;
    Ok(samples)
}

fn ensure_not_empty(samples: &[Sample]) -> Result<(), CoreError> {
    if samples.is_empty() {
        return Err(CoreError::Validation(
            "dataset must contain at least one sample".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loading
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Records(Vec<Sample>),
    Series {
        speed: Vec<f64>,
        temperature: Vec<f64>,
    },
}

/// Parse a dataset from a JSON document.
pub fn parse_json(json: &str) -> Result<Vec<Sample>, CoreError> {
    let file: DatasetFile = serde_json::from_str(json).map_err(|e| {
        CoreError::Dataset(format!(
            "expected an array of samples or parallel speed/temperature arrays: {e}"
        ))
    })?;

    match file {
        DatasetFile::Records(samples) => {
            ensure_not_empty(&samples)?;
            Ok(samples)
        }
        DatasetFile::Series { speed, temperature } => from_series(&speed, &temperature),
    }
}

/// Read and parse a JSON dataset file.
pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<Sample>, CoreError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let samples = parse_json(&json)?;
    tracing::debug!(path = %path.display(), samples = samples.len(), "Dataset loaded");
    Ok(samples)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
