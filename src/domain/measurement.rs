use serde::{Deserialize, Serialize, Serializer};

/// A sensor value. Whole numbers go on the wire as JSON integers
/// (`25`, not `25.0`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Measurement(f64);

// Beyond 2^53 an f64 no longer holds every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Measurement {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Serialize for Measurement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}
