// ── Measurement units and display conversion ──
//
// Data-size and data-rate sensors are reported in bytes by the router
// and converted to the user's selected unit before display. Count-like
// EdgeOS units are always shown as integers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::entity::{SensorDeviceClass, SensorHints};

/// Units of measurement carried by entity descriptors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
)]
pub enum MeasurementUnit {
    #[serde(rename = "%")]
    #[strum(serialize = "%")]
    Percentage,
    #[serde(rename = "s")]
    #[strum(serialize = "s")]
    Seconds,
    Errors,
    Dropped,
    Packets,
    Devices,
}

impl MeasurementUnit {
    /// Router-specific count units, always rendered without decimals.
    pub fn is_count(self) -> bool {
        matches!(
            self,
            Self::Errors | Self::Dropped | Self::Packets | Self::Devices
        )
    }
}

/// User-selectable unit for traffic sensors.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[default]
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl Unit {
    /// Option labels for the unit select entity, in display order.
    pub const NAMES: &'static [&'static str] = &["Bytes", "Kilobytes", "Megabytes", "Gigabytes"];

    const fn exponent(self) -> i32 {
        match self {
            Self::Bytes => 0,
            Self::Kilobytes => 1,
            Self::Megabytes => 2,
            Self::Gigabytes => 3,
        }
    }

    /// Unit label for data-size sensors.
    pub fn information_unit(self) -> &'static str {
        match self {
            Self::Bytes => "B",
            Self::Kilobytes => "kB",
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
        }
    }

    /// Unit label for data-rate sensors.
    pub fn rate_unit(self) -> &'static str {
        match self {
            Self::Bytes => "B/s",
            Self::Kilobytes => "kB/s",
            Self::Megabytes => "MB/s",
            Self::Gigabytes => "GB/s",
        }
    }

    /// Convert a byte value (or bytes/sec) into this unit.
    pub fn convert(self, bytes: f64) -> f64 {
        bytes / 1024_f64.powi(self.exponent())
    }

    /// Decimal places shown for converted values.
    pub fn precision(self) -> usize {
        if self == Self::Bytes { 0 } else { 3 }
    }
}

/// How a sensor's raw state is turned into a displayed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFormat {
    pub unit: Option<&'static str>,
    pub precision: Option<usize>,
    convert: Option<Unit>,
}

impl SensorFormat {
    /// Resolve the display rules for a sensor under the selected traffic unit.
    pub fn for_sensor(hints: &SensorHints, unit: Unit) -> Self {
        let mut format = Self {
            unit: hints.unit.map(<&'static str>::from),
            precision: hints.unit.filter(|u| u.is_count()).map(|_| 0),
            convert: None,
        };

        match hints.device_class {
            Some(SensorDeviceClass::DataSize) => {
                format.unit = Some(unit.information_unit());
                format.precision = Some(unit.precision());
                format.convert = Some(unit);
            }
            Some(SensorDeviceClass::DataRate) => {
                format.unit = Some(unit.rate_unit());
                format.precision = Some(unit.precision());
                format.convert = Some(unit);
            }
            Some(SensorDeviceClass::Timestamp) | None => {}
        }

        format
    }

    /// Apply conversion and rounding to a raw state value.
    pub fn apply(&self, raw: f64) -> f64 {
        let value = self.convert.map_or(raw, |unit| unit.convert(raw));
        match self.precision {
            Some(digits) => round_to(value, digits),
            None => value,
        }
    }

    /// Render a raw state value with unit label, e.g. `"1.500 MB"`.
    pub fn render(&self, raw: f64) -> String {
        let value = self.apply(raw);
        let number = match self.precision {
            Some(digits) => format!("{value:.digits$}"),
            None => format!("{value}"),
        };
        match self.unit {
            Some(unit) => format!("{number} {unit}"),
            None => number,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::as_conversions)]
fn round_to(value: f64, digits: usize) -> f64 {
    let factor = 10_f64.powi(digits as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::entity::StateClass;
    use strum::IntoEnumIterator;

    fn hints(
        device_class: Option<SensorDeviceClass>,
        unit: Option<MeasurementUnit>,
    ) -> SensorHints {
        SensorHints {
            unit,
            device_class,
            state_class: Some(StateClass::Measurement),
        }
    }

    #[test]
    fn names_match_variants() {
        let names: Vec<String> = Unit::iter().map(|u| u.to_string()).collect();
        assert_eq!(names, Unit::NAMES);
        assert_eq!("megabytes".parse::<Unit>().unwrap(), Unit::Megabytes);
    }

    #[test]
    fn converts_by_powers_of_1024() {
        assert_eq!(Unit::Bytes.convert(2048.0), 2048.0);
        assert_eq!(Unit::Kilobytes.convert(2048.0), 2.0);
        assert_eq!(Unit::Megabytes.convert(1_572_864.0), 1.5);
        assert_eq!(Unit::Gigabytes.convert(1_073_741_824.0), 1.0);
    }

    #[test]
    fn data_size_uses_selected_unit() {
        let format = SensorFormat::for_sensor(
            &hints(Some(SensorDeviceClass::DataSize), None),
            Unit::Megabytes,
        );
        assert_eq!(format.unit, Some("MB"));
        assert_eq!(format.render(1_572_864.0), "1.500 MB");
    }

    #[test]
    fn data_rate_in_bytes_is_integral() {
        let format = SensorFormat::for_sensor(
            &hints(Some(SensorDeviceClass::DataRate), None),
            Unit::Bytes,
        );
        assert_eq!(format.unit, Some("B/s"));
        assert_eq!(format.apply(10.6), 11.0);
        assert_eq!(format.render(10.6), "11 B/s");
    }

    #[test]
    fn count_units_ignore_selected_unit() {
        let format = SensorFormat::for_sensor(
            &hints(None, Some(MeasurementUnit::Packets)),
            Unit::Gigabytes,
        );
        assert_eq!(format.unit, Some("Packets"));
        assert_eq!(format.render(1234.4), "1234 Packets");
    }

    #[test]
    fn percentage_is_passed_through() {
        let format = SensorFormat::for_sensor(
            &hints(None, Some(MeasurementUnit::Percentage)),
            Unit::Kilobytes,
        );
        assert_eq!(format.precision, None);
        assert_eq!(format.render(42.5), "42.5 %");
    }
}
