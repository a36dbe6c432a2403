//! Text presentation of pressures and altitudes.
//!
//! Pressures in inches of mercury always print with a two digit, zero padded fraction, so 2902
//! hundredths is "29.02". Altitudes print as whole feet with thousands separators.

use crate::{
    converter::AltitudeReading,
    pressure::{PressureUnit, Qnh},
};
use itertools::Itertools;
use metfor::{Feet, Quantity};

/// Shown in place of a value that is missing or cannot be formatted.
pub const PLACEHOLDER: &str = "--";

/// Format hundredths of an inch of mercury.
///
/// # Examples
///
/// ```rust
/// use altimetry::format_inhg;
///
/// assert_eq!(format_inhg(2992), "29.92");
/// assert_eq!(format_inhg(2902), "29.02");
/// assert_eq!(format_inhg(3000), "30.00");
/// assert_eq!(format_inhg(-5), "-0.05");
/// ```
pub fn format_inhg(hundredths: i32) -> String {
    let sign = if hundredths < 0 { "-" } else { "" };
    let magnitude = i64::from(hundredths).abs();

    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}

/// Format a pressure in inches of mercury, rounded to the nearest hundredth.
///
/// ```rust
/// use altimetry::format::format_inhg_f64;
///
/// assert_eq!(format_inhg_f64(29.921_272_5), "29.92");
/// assert_eq!(format_inhg_f64(29.02), "29.02");
/// assert_eq!(format_inhg_f64(f64::NAN), "--");
/// ```
pub fn format_inhg_f64(inhg: f64) -> String {
    if !inhg.is_finite() {
        return PLACEHOLDER.to_owned();
    }

    let hundredths = (inhg * 100.0).round();
    if hundredths.abs() > f64::from(i32::MAX) {
        return PLACEHOLDER.to_owned();
    }

    format_inhg(hundredths as i32)
}

/// Format an altimeter setting.
#[inline]
pub fn format_qnh(qnh: Qnh) -> String {
    format_inhg(qnh.hundredths())
}

/// Format an altitude in feet as a whole number with thousands separators.
///
/// The value is truncated toward zero. Negative altitudes show as "0" and values that are not
/// finite show the placeholder.
///
/// ```rust
/// use altimetry::format_altitude;
///
/// assert_eq!(format_altitude(12_345.9), "12,345");
/// assert_eq!(format_altitude(999.0), "999");
/// assert_eq!(format_altitude(-5.0), "0");
/// assert_eq!(format_altitude(f64::INFINITY), "--");
/// ```
pub fn format_altitude(feet: f64) -> String {
    if !feet.is_finite() {
        return PLACEHOLDER.to_owned();
    }

    if feet < 0.0 {
        return "0".to_owned();
    }

    group_thousands(feet.trunc() as u64)
}

/// Format an altitude that may be missing.
///
/// ```rust
/// use altimetry::format_altitude_opt;
/// use metfor::Feet;
///
/// assert_eq!(format_altitude_opt(Some(Feet(1_500.2))), "1,500");
/// assert_eq!(format_altitude_opt(None), "--");
/// ```
pub fn format_altitude_opt(feet: Option<Feet>) -> String {
    feet.map_or_else(|| PLACEHOLDER.to_owned(), |ft| format_altitude(ft.unpack()))
}

/// Format the pressure carried by a reading in the requested unit.
///
/// ```rust
/// use altimetry::{format::format_pressure, AltitudeConverter, PressureUnit};
///
/// let reading = AltitudeConverter::new().ingest_sample(97.5);
/// assert_eq!(format_pressure(&reading, PressureUnit::KiloPascal), "97.50");
/// assert_eq!(format_pressure(&reading, PressureUnit::InHg), "28.79");
/// assert_eq!(format_pressure(&reading, PressureUnit::Millibar), "975.00");
/// ```
pub fn format_pressure(reading: &AltitudeReading, unit: PressureUnit) -> String {
    let value = reading.pressure_in(unit);

    match unit {
        PressureUnit::InHg => format_inhg_f64(value),
        PressureUnit::KiloPascal | PressureUnit::Millibar if value.is_finite() => {
            format!("{:.2}", value)
        }
        _ => PLACEHOLDER.to_owned(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits: Vec<char> = value.to_string().chars().collect();

    digits
        .rchunks(3)
        .rev()
        .map(|group| group.iter().collect::<String>())
        .join(",")
}
