use crate::domain::Measurement;
use serde::{Deserialize, Serialize};

/// Sensor and soil-test values the recommendation endpoint expects.
///
/// Field names are the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    /// Degrees Celsius.
    pub temperature: Measurement,
    /// Relative humidity, percent.
    pub humidity: Measurement,
    /// Soil moisture, percent.
    pub moisture: Measurement,
    pub soil_type: String,
    pub crop_type: String,
    pub nitrogen: u32,
    pub potassium: u32,
    pub phosphorous: u32,
}
