//! Raw machine sensor readings and the bounds the input controls enforce.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product quality grade of the machined part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductGrade {
    /// Low quality variant.
    #[default]
    L,
    /// Medium quality variant.
    M,
    /// High quality variant.
    H,
}

impl ProductGrade {
    /// Every grade, in the order the selector offers them.
    pub const ALL: [ProductGrade; 3] = [ProductGrade::L, ProductGrade::M, ProductGrade::H];

    /// Label used by the encoder vocabulary and the UI.
    pub fn label(self) -> &'static str {
        match self {
            ProductGrade::L => "L",
            ProductGrade::M => "M",
            ProductGrade::H => "H",
        }
    }
}

impl fmt::Display for ProductGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing a grade label outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown product grade {0:?} (expected L, M or H)")]
pub struct ParseGradeError(pub String);

impl FromStr for ProductGrade {
    type Err = ParseGradeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "L" | "l" => Ok(ProductGrade::L),
            "M" | "m" => Ok(ProductGrade::M),
            "H" | "h" => Ok(ProductGrade::H),
            other => Err(ParseGradeError(other.to_string())),
        }
    }
}

/// Inclusive range and default position of one numeric input control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// Control label.
    pub label: &'static str,
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
    /// Initial control position.
    pub default: f64,
}

impl Bound {
    /// Range accepted by the control.
    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Pull `value` into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Bounds of the five numeric inputs.
pub struct SensorBounds;

impl SensorBounds {
    /// Ambient air temperature in kelvin.
    pub const AIR_TEMP_K: Bound = Bound {
        label: "Air Temp [K]",
        min: 295.0,
        max: 305.0,
        default: 300.0,
    };
    /// Process temperature in kelvin.
    pub const PROCESS_TEMP_K: Bound = Bound {
        label: "Process Temp [K]",
        min: 305.0,
        max: 315.0,
        default: 310.0,
    };
    /// Spindle speed in revolutions per minute.
    pub const ROTATIONAL_SPEED_RPM: Bound = Bound {
        label: "Rotational Speed [RPM]",
        min: 1100.0,
        max: 2900.0,
        default: 1500.0,
    };
    /// Torque in newton metres.
    pub const TORQUE_NM: Bound = Bound {
        label: "Torque [Nm]",
        min: 3.0,
        max: 80.0,
        default: 40.0,
    };
    /// Accumulated tool wear in minutes.
    pub const TOOL_WEAR_MIN: Bound = Bound {
        label: "Tool Wear [min]",
        min: 0.0,
        max: 260.0,
        default: 100.0,
    };
}

/// A reading is outside the range its control allows.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{label} must be within {min}..={max}, got {value}")]
pub struct OutOfRange {
    /// Control label of the offending field.
    pub label: &'static str,
    /// Value that was rejected.
    pub value: f64,
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
}

/// Snapshot of the six inputs for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Product grade of the part being machined.
    pub grade: ProductGrade,
    /// Air temperature [K].
    pub air_temp_k: f64,
    /// Process temperature [K].
    pub process_temp_k: f64,
    /// Rotational speed [RPM].
    pub rotational_speed_rpm: f64,
    /// Torque [Nm].
    pub torque_nm: f64,
    /// Tool wear [min].
    pub tool_wear_min: f64,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            grade: ProductGrade::default(),
            air_temp_k: SensorBounds::AIR_TEMP_K.default,
            process_temp_k: SensorBounds::PROCESS_TEMP_K.default,
            rotational_speed_rpm: SensorBounds::ROTATIONAL_SPEED_RPM.default,
            torque_nm: SensorBounds::TORQUE_NM.default,
            tool_wear_min: SensorBounds::TOOL_WEAR_MIN.default,
        }
    }
}

impl SensorReading {
    fn fields(&self) -> [(Bound, f64); 5] {
        [
            (SensorBounds::AIR_TEMP_K, self.air_temp_k),
            (SensorBounds::PROCESS_TEMP_K, self.process_temp_k),
            (SensorBounds::ROTATIONAL_SPEED_RPM, self.rotational_speed_rpm),
            (SensorBounds::TORQUE_NM, self.torque_nm),
            (SensorBounds::TOOL_WEAR_MIN, self.tool_wear_min),
        ]
    }

    /// Copy of the reading with every numeric field pulled into its bounds.
    pub fn clamped(&self) -> Self {
        Self {
            grade: self.grade,
            air_temp_k: SensorBounds::AIR_TEMP_K.clamp(self.air_temp_k),
            process_temp_k: SensorBounds::PROCESS_TEMP_K.clamp(self.process_temp_k),
            rotational_speed_rpm: SensorBounds::ROTATIONAL_SPEED_RPM
                .clamp(self.rotational_speed_rpm),
            torque_nm: SensorBounds::TORQUE_NM.clamp(self.torque_nm),
            tool_wear_min: SensorBounds::TOOL_WEAR_MIN.clamp(self.tool_wear_min),
        }
    }

    /// Reject the first field outside its bounds (NaN is never in bounds).
    pub fn validate(&self) -> Result<(), OutOfRange> {
        for (bound, value) in self.fields() {
            if !bound.contains(value) {
                return Err(OutOfRange {
                    label: bound.label,
                    value,
                    min: bound.min,
                    max: bound.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sit_inside_bounds() {
        let reading = SensorReading::default();
        assert_eq!(reading.grade, ProductGrade::L);
        assert_eq!(reading.air_temp_k, 300.0);
        assert_eq!(reading.process_temp_k, 310.0);
        assert_eq!(reading.rotational_speed_rpm, 1500.0);
        assert_eq!(reading.torque_nm, 40.0);
        assert_eq!(reading.tool_wear_min, 100.0);
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let reading = SensorReading {
            grade: ProductGrade::H,
            air_temp_k: 280.0,
            process_temp_k: 400.0,
            rotational_speed_rpm: 0.0,
            torque_nm: 100.0,
            tool_wear_min: -5.0,
        }
        .clamped();
        assert_eq!(reading.air_temp_k, 295.0);
        assert_eq!(reading.process_temp_k, 315.0);
        assert_eq!(reading.rotational_speed_rpm, 1100.0);
        assert_eq!(reading.torque_nm, 80.0);
        assert_eq!(reading.tool_wear_min, 0.0);
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn validate_names_offending_field() {
        let reading = SensorReading {
            torque_nm: 81.0,
            ..SensorReading::default()
        };
        let err = reading.validate().unwrap_err();
        assert_eq!(err.label, "Torque [Nm]");
        assert_eq!(err.value, 81.0);

        let nan = SensorReading {
            air_temp_k: f64::NAN,
            ..SensorReading::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn grade_parses_fixed_vocabulary_only() {
        assert_eq!("M".parse::<ProductGrade>().unwrap(), ProductGrade::M);
        assert_eq!(" h ".parse::<ProductGrade>().unwrap(), ProductGrade::H);
        assert!("X".parse::<ProductGrade>().is_err());
        let labels: Vec<_> = ProductGrade::ALL.iter().map(|g| g.label()).collect();
        assert_eq!(labels, ["L", "M", "H"]);
    }
}
