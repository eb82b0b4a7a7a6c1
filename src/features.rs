//! Fixed-order feature schema and the derivation of model inputs from a reading.
//!
//! The classifier was trained on eight columns in a fixed order. [`Feature`] is
//! the single source of that order: vector construction, artifact validation and
//! the importance chart labels all go through it.

use serde::{Deserialize, Serialize};

use crate::sensor::SensorReading;

/// Number of values in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 8;

/// One column of the model input, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Encoded product grade.
    Type,
    /// Air temperature [K].
    AirTemp,
    /// Process temperature [K].
    ProcessTemp,
    /// Rotational speed [RPM].
    RotationalSpeed,
    /// Torque [Nm].
    Torque,
    /// Tool wear [min].
    ToolWear,
    /// Process minus air temperature [K].
    TempDiff,
    /// Torque times rotational speed.
    Power,
}

impl Feature {
    /// All features in vector order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Type,
        Feature::AirTemp,
        Feature::ProcessTemp,
        Feature::RotationalSpeed,
        Feature::Torque,
        Feature::ToolWear,
        Feature::TempDiff,
        Feature::Power,
    ];

    /// Position of the feature in the vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label shown on the importance chart.
    pub fn display_name(self) -> &'static str {
        match self {
            Feature::Type => "Type",
            Feature::AirTemp => "Air T",
            Feature::ProcessTemp => "Proc T",
            Feature::RotationalSpeed => "RPM",
            Feature::Torque => "Torque",
            Feature::ToolWear => "Wear",
            Feature::TempDiff => "Δ Temp",
            Feature::Power => "Power",
        }
    }

    /// Column key recorded in model artifacts.
    pub fn key(self) -> &'static str {
        match self {
            Feature::Type => "type",
            Feature::AirTemp => "air_temp_k",
            Feature::ProcessTemp => "process_temp_k",
            Feature::RotationalSpeed => "rotational_speed_rpm",
            Feature::Torque => "torque_nm",
            Feature::ToolWear => "tool_wear_min",
            Feature::TempDiff => "temp_diff_k",
            Feature::Power => "power",
        }
    }

    /// Artifact keys in vector order.
    pub fn keys() -> [&'static str; FEATURE_COUNT] {
        Self::ALL.map(Feature::key)
    }
}

/// Model input vector, ordered as [`Feature::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wrap raw values that are already in schema order.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Value of a single feature.
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// Values in schema order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pair each value with its feature.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

/// Build the model input from an encoded grade and a reading.
///
/// Derived columns are computed here on every call: `temp_diff = process - air`
/// and `power = torque * rpm`.
pub fn derive(encoded_grade: u32, reading: &SensorReading) -> FeatureVector {
    let temp_diff = reading.process_temp_k - reading.air_temp_k;
    let power = reading.torque_nm * reading.rotational_speed_rpm;
    FeatureVector([
        f64::from(encoded_grade),
        reading.air_temp_k,
        reading.process_temp_k,
        reading.rotational_speed_rpm,
        reading.torque_nm,
        reading.tool_wear_min,
        temp_diff,
        power,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::ProductGrade;

    fn reading() -> SensorReading {
        SensorReading {
            grade: ProductGrade::M,
            air_temp_k: 300.0,
            process_temp_k: 310.0,
            rotational_speed_rpm: 1500.0,
            torque_nm: 40.0,
            tool_wear_min: 100.0,
        }
    }

    #[test]
    fn derive_keeps_training_column_order() {
        let vector = derive(2, &reading());
        assert_eq!(
            vector.as_slice(),
            &[2.0, 300.0, 310.0, 1500.0, 40.0, 100.0, 10.0, 60000.0]
        );
        assert_eq!(vector.as_slice().len(), FEATURE_COUNT);
    }

    #[test]
    fn schema_positions_match_vector_layout() {
        let vector = derive(7, &reading());
        assert_eq!(vector.get(Feature::Type), 7.0);
        assert_eq!(vector.get(Feature::AirTemp), 300.0);
        assert_eq!(vector.get(Feature::ProcessTemp), 310.0);
        assert_eq!(vector.get(Feature::RotationalSpeed), 1500.0);
        assert_eq!(vector.get(Feature::Torque), 40.0);
        assert_eq!(vector.get(Feature::ToolWear), 100.0);
        assert_eq!(vector.get(Feature::TempDiff), 10.0);
        assert_eq!(vector.get(Feature::Power), 60000.0);
        for (idx, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), idx);
        }
    }

    #[test]
    fn derived_columns_are_exact() {
        let odd = SensorReading {
            air_temp_k: 297.3,
            process_temp_k: 308.9,
            rotational_speed_rpm: 2861.0,
            torque_nm: 4.2,
            ..reading()
        };
        let vector = derive(0, &odd);
        assert_eq!(vector.get(Feature::TempDiff), 308.9 - 297.3);
        assert_eq!(vector.get(Feature::Power), 4.2 * 2861.0);
    }

    #[test]
    fn derived_columns_follow_the_current_reading() {
        let first = derive(1, &reading());
        let changed = derive(
            1,
            &SensorReading {
                torque_nm: 20.0,
                air_temp_k: 305.0,
                ..reading()
            },
        );
        assert_eq!(first.get(Feature::Power), 60000.0);
        assert_eq!(changed.get(Feature::Power), 30000.0);
        assert_eq!(changed.get(Feature::TempDiff), 5.0);
    }

    #[test]
    fn display_names_follow_schema() {
        let names: Vec<_> = Feature::ALL.iter().map(|f| f.display_name()).collect();
        assert_eq!(
            names,
            ["Type", "Air T", "Proc T", "RPM", "Torque", "Wear", "Δ Temp", "Power"]
        );
        assert_eq!(Feature::keys()[7], "power");
    }
}
