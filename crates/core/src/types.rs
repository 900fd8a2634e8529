use serde::{Deserialize, Serialize};

/// Vehicle speed in km/h.
pub type Speed = f64;

/// Engine temperature in degrees Celsius.
pub type Temperature = f64;

/// A single telemetry reading.
///
/// Values are taken as-is; nothing here rejects negative or otherwise
/// implausible readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub speed: Speed,
    pub temperature: Temperature,
}

impl Sample {
    pub fn new(speed: Speed, temperature: Temperature) -> Self {
        Self { speed, temperature }
    }
}

impl From<(Speed, Temperature)> for Sample {
    fn from((speed, temperature): (Speed, Temperature)) -> Self {
        Self::new(speed, temperature)
    }
}
