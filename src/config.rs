//! Settings for the weather report search and the setting selector.

use crate::{
    error::{AltimetryError, Result},
    geo::GeoPosition,
    pressure::Qnh,
    qnh_dial::{QnhDial, QnhRange, DEFAULT_MIN_DELTA},
    selector::StationSelector,
};
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Default source of METARs.
pub const DEFAULT_ENDPOINT: &str = "https://aviationweather.gov/api/data/metar";

/// Application settings. Keys missing from a settings file take their default values.
///
/// # Examples
///
/// ```rust
/// use altimetry::Settings;
///
/// let settings = Settings::from_json_str(r#"{"search_radius_nm": 35.0}"#).unwrap();
/// assert_eq!(settings.search_radius_nm, 35.0);
/// assert_eq!(settings.hours_before_now, 1);
///
/// assert!(Settings::from_json_str(r#"{"qnh_min": 3100, "qnh_max": 2800}"#).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where to search for weather reports and measure station distance from.
    pub origin: GeoPosition,
    /// Search radius in nautical miles.
    pub search_radius_nm: f64,
    /// How far back to look for reports.
    pub hours_before_now: u32,
    /// URL of the METAR data service.
    pub endpoint: String,
    /// Give up on a weather request after this many seconds.
    pub fetch_timeout_secs: u64,
    /// Lowest selectable setting, hundredths of an inch of mercury.
    pub qnh_min: i32,
    /// Highest selectable setting, hundredths of an inch of mercury.
    pub qnh_max: i32,
    /// Smallest accumulated rotation that changes the setting.
    pub crown_min_delta: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            origin: GeoPosition::new(32.82, -117.27),
            search_radius_nm: 20.0,
            hours_before_now: 1,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            fetch_timeout_secs: 10,
            qnh_min: 2810,
            qnh_max: 3100,
            crown_min_delta: DEFAULT_MIN_DELTA,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(text).map_err(|err| AltimetryError::Config(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| AltimetryError::Config(format!("{}: {}", path.display(), err)))?;

        Self::from_json_str(&text)
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.search_radius_nm > 0.0) {
            return Err(AltimetryError::Config(
                "search_radius_nm must be positive".to_owned(),
            ));
        }

        if self.qnh_min > self.qnh_max {
            return Err(AltimetryError::Config(
                "qnh_min must not exceed qnh_max".to_owned(),
            ));
        }

        if !(self.crown_min_delta > 0.0) {
            return Err(AltimetryError::Config(
                "crown_min_delta must be positive".to_owned(),
            ));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(AltimetryError::Config(
                "endpoint must start with http:// or https://".to_owned(),
            ));
        }

        Ok(())
    }

    /// Request timeout.
    #[inline]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Selectable settings.
    #[inline]
    pub fn qnh_range(&self) -> QnhRange {
        QnhRange::new(Qnh::new(self.qnh_min), Qnh::new(self.qnh_max))
    }

    /// A dial with the configured sensitivity.
    #[inline]
    pub fn dial(&self) -> QnhDial {
        QnhDial::with_min_delta(self.crown_min_delta)
    }

    /// A station selector centered on the configured origin.
    #[inline]
    pub fn selector(&self) -> StationSelector {
        StationSelector::new(self.origin)
    }
}
