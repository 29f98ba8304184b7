//! Temperature export layout detection

use crate::constants::temperature::{
    DUAL_SENSOR_PREFIX, LAYOUT_PROBE_COLUMN, MIN_COLUMNS, SINGLE_SENSOR_PREFIX,
};
use crate::app::models::Measurement;
use crate::{Error, Result};

/// Sensor arrangement of a temperature export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureLayout {
    /// Dissolved oxygen in column 2, temperature in column 3
    DualSensor,
    /// Temperature in column 2
    SingleSensor,
}

impl TemperatureLayout {
    /// Detect the layout from the header row
    pub fn detect(header: &csv::StringRecord, file: &str) -> Result<Self> {
        if header.len() < MIN_COLUMNS {
            return Err(Error::structural_format(
                file,
                format!(
                    "header has {} columns, expected at least {}",
                    header.len(),
                    MIN_COLUMNS
                ),
            ));
        }

        let probe = header.get(LAYOUT_PROBE_COLUMN).unwrap_or("").trim_start();
        if probe.starts_with(DUAL_SENSOR_PREFIX) {
            Ok(TemperatureLayout::DualSensor)
        } else if probe.starts_with(SINGLE_SENSOR_PREFIX) {
            Ok(TemperatureLayout::SingleSensor)
        } else {
            Err(Error::structural_format(
                file,
                format!("unrecognized measurement column '{}'", probe),
            ))
        }
    }

    /// Source column of each measurement this layout carries
    pub fn measurement_columns(self) -> &'static [(Measurement, usize)] {
        match self {
            TemperatureLayout::DualSensor => &[
                (Measurement::Temperature, 3),
                (Measurement::DissolvedOxygen, 2),
            ],
            TemperatureLayout::SingleSensor => &[(Measurement::Temperature, 2)],
        }
    }
}
