//! Pressure samples, the altimeter setting (QNH), and the formulas relating pressure to altitude.

use metfor::{Feet, HectoPascal, Quantity};
use std::fmt::Display;
use strum_macros::{AsRefStr, EnumIter};

/// Standard sea level pressure in kilopascals.
pub const STANDARD_PRESSURE_KPA: f64 = 101.325;

/// Standard sea level pressure in millibars (hPa).
pub const STANDARD_PRESSURE_MB: HectoPascal = HectoPascal(1013.25);

/// Standard altimeter setting, 29.92 inHg, in hundredths of an inch of mercury.
pub const STANDARD_QNH: i32 = 2992;

const INHG_PER_KPA: f64 = 0.2953;
const MB_PER_INHG: f64 = 33.8639;
const FEET_PER_INHG: f64 = 1000.0;

// ICAO standard atmosphere, pressure to altitude in feet.
const PALT_SCALE_FT: f64 = 145_366.45;
const PALT_EXPONENT: f64 = 0.190_284;

/// A raw barometer measurement in kilopascals.
///
/// Values are not validated, the sensor only ever reports non-negative pressures.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PressureSample(f64);

impl PressureSample {
    /// Wrap a pressure in kilopascals.
    #[inline]
    pub fn new(kpa: f64) -> Self {
        PressureSample(kpa)
    }

    /// The pressure in kilopascals.
    #[inline]
    pub fn kpa(self) -> f64 {
        self.0
    }

    /// The pressure in inches of mercury.
    #[inline]
    pub fn inhg(self) -> f64 {
        kpa_to_inhg(self.0)
    }
}

impl From<f64> for PressureSample {
    fn from(kpa: f64) -> Self {
        PressureSample(kpa)
    }
}

/// An altimeter setting stored as hundredths of an inch of mercury, so 29.92 inHg is `Qnh(2992)`.
///
/// No range checking is done. Values outside roughly 2500-3200 are accepted and simply produce
/// implausible altitudes.
///
/// # Examples
///
/// ```rust
/// use altimetry::Qnh;
///
/// let qnh = Qnh::new(2992);
/// assert_eq!(qnh.hundredths(), 2992);
/// assert!((qnh.inhg() - 29.92).abs() < 1.0e-12);
/// assert_eq!(qnh.to_string(), "29.92");
/// assert_eq!(Qnh::default(), qnh);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qnh(i32);

impl Qnh {
    /// Create a setting from hundredths of an inch of mercury.
    #[inline]
    pub const fn new(hundredths: i32) -> Self {
        Qnh(hundredths)
    }

    /// Create a setting from a value in inches of mercury, rounded to the nearest hundredth.
    ///
    /// ```rust
    /// use altimetry::Qnh;
    ///
    /// assert_eq!(Qnh::from_inhg(29.85), Qnh::new(2985));
    /// assert_eq!(Qnh::from_inhg(30.006), Qnh::new(3001));
    /// ```
    #[inline]
    pub fn from_inhg(inhg: f64) -> Self {
        Qnh((inhg * 100.0).round() as i32)
    }

    /// Hundredths of an inch of mercury.
    #[inline]
    pub fn hundredths(self) -> i32 {
        self.0
    }

    /// The setting in inches of mercury.
    #[inline]
    pub fn inhg(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Offset this setting by a number of hundredths.
    #[inline]
    pub fn offset(self, hundredths: i32) -> Self {
        Qnh(self.0.saturating_add(hundredths))
    }
}

impl Default for Qnh {
    fn default() -> Self {
        Qnh(STANDARD_QNH)
    }
}

impl From<i32> for Qnh {
    fn from(hundredths: i32) -> Self {
        Qnh(hundredths)
    }
}

impl Display for Qnh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::format::format_inhg(self.0))
    }
}

/// Units a pressure can be presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum PressureUnit {
    /// Kilopascals, as delivered by the sensor.
    #[strum(serialize = "kPa")]
    KiloPascal,
    /// Inches of mercury.
    #[strum(serialize = "inHg")]
    InHg,
    /// Millibars, numerically the same as hectopascals.
    #[strum(serialize = "mb")]
    Millibar,
}

/// Convert kilopascals to inches of mercury.
#[inline]
pub fn kpa_to_inhg(kpa: f64) -> f64 {
    kpa * INHG_PER_KPA
}

/// Convert inches of mercury to kilopascals, the exact inverse of `kpa_to_inhg`.
#[inline]
pub fn inhg_to_kpa(inhg: f64) -> f64 {
    inhg / INHG_PER_KPA
}

/// Convert kilopascals to millibars.
#[inline]
pub fn kpa_to_mb(kpa: f64) -> HectoPascal {
    HectoPascal(kpa * 10.0)
}

/// Convert inches of mercury to millibars.
#[inline]
pub fn inhg_to_mb(inhg: f64) -> HectoPascal {
    HectoPascal(inhg * MB_PER_INHG)
}

/// Convert millibars to inches of mercury.
#[inline]
pub fn mb_to_inhg(mb: HectoPascal) -> f64 {
    mb.unpack() / MB_PER_INHG
}

/// Indicated altitude using the rule of thumb of 1000 feet per inch of mercury below the setting.
///
/// ```rust
/// use altimetry::{pressure::indicated_altitude, Qnh};
///
/// let alt = indicated_altitude(Qnh::new(3000), 29.0);
/// assert!((alt.0 - 1000.0).abs() < 1.0e-9);
/// ```
#[inline]
pub fn indicated_altitude(qnh: Qnh, inhg: f64) -> Feet {
    Feet((qnh.inhg() - inhg) * FEET_PER_INHG)
}

/// Pressure altitude from the ICAO standard atmosphere, independent of the altimeter setting.
///
/// ```rust
/// use altimetry::pressure::pressure_altitude;
///
/// // 29.92 inHg is within a couple of feet of the standard datum.
/// assert!(pressure_altitude(29.92).0.abs() < 2.0);
/// ```
#[inline]
pub fn pressure_altitude(inhg: f64) -> Feet {
    let mb = inhg_to_mb(inhg);
    let ratio = mb.unpack() / STANDARD_PRESSURE_MB.unpack();

    Feet(PALT_SCALE_FT * (1.0 - ratio.powf(PALT_EXPONENT)))
}


#[cfg(test)]
mod test {
    use super::test_tools::*;
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kpa_to_inhg() {
        assert!(approx_equal(kpa_to_inhg(101.325), 29.921_272_5, 1.0e-9));
        assert!(approx_equal(kpa_to_inhg(0.0), 0.0, 1.0e-12));
        assert!(approx_equal(inhg_to_kpa(kpa_to_inhg(87.3)), 87.3, 1.0e-9));
    }

    #[test]
    fn test_mb_conversions() {
        assert!(approx_equal(kpa_to_mb(101.325).unpack(), 1013.25, 1.0e-9));
        assert!(approx_equal(inhg_to_mb(29.92).unpack(), 1013.207_888, 1.0e-6));
        assert!(approx_equal(mb_to_inhg(inhg_to_mb(30.12)), 30.12, 1.0e-9));
    }

    #[test]
    fn test_indicated_altitude() {
        assert!(approx_equal(indicated_altitude(Qnh::new(2992), 29.92).unpack(), 0.0, 1.0e-9));
        assert!(approx_equal(indicated_altitude(Qnh::new(2992), 28.92).unpack(), 1000.0, 1.0e-9));
        assert!(approx_equal(indicated_altitude(Qnh::new(2992), 30.42).unpack(), -500.0, 1.0e-9));
    }

    #[test]
    fn test_pressure_altitude() {
        // 700 mb is close to 10,000 feet in the standard atmosphere.
        let alt = pressure_altitude(mb_to_inhg(HectoPascal(700.0)));
        assert!(approx_equal(alt.unpack(), 9_882.0, 10.0));

        // Higher pressure than standard gives a negative pressure altitude.
        assert!(pressure_altitude(31.0).unpack() < 0.0);
    }

    #[test]
    fn test_qnh_rounding_and_offset() {
        assert_eq!(Qnh::from_inhg(29.85).hundredths(), 2985);
        assert_eq!(Qnh::from_inhg(30.01).hundredths(), 3001);
        assert_eq!(Qnh::new(2992).offset(-12), Qnh::new(2980));
        assert_eq!(Qnh::new(i32::MAX).offset(1), Qnh::new(i32::MAX));
    }

    #[test]
    fn test_unit_labels() {
        let labels: Vec<String> = PressureUnit::iter().map(|u| u.as_ref().to_owned()).collect();
        assert_eq!(labels, vec!["kPa", "inHg", "mb"]);
    }
}
