//! Parsed aviation routine weather reports (METARs).

use crate::{geo::GeoPosition, pressure::Qnh};
use chrono::NaiveDateTime;
use metfor::{Celsius, Knots, Meters, StatuteMiles, WindSpdDir};
use optional::{Noned, Optioned};

pub mod json;

/// One station's report.
///
/// Station, observation time, position and altimeter setting are required, everything else is
/// carried along for display.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    station: String,
    // Kept as text, later reports compare greater.
    observation_time: String,
    position: GeoPosition,
    altimeter_inhg: f64,

    raw: Option<String>,
    temperature: Optioned<Celsius>,
    dew_point: Optioned<Celsius>,
    wind_direction: Optioned<f64>,
    wind_speed: Optioned<Knots>,
    visibility: Optioned<StatuteMiles>,
    elevation: Optioned<Meters>,
}

impl WeatherReport {
    /// Create a report from its required fields.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use altimetry::{GeoPosition, Qnh, WeatherReport};
    /// use metfor::{Celsius, Knots};
    ///
    /// let report = WeatherReport::new("KSAN", "2019-02-06T18:51:00Z", GeoPosition::new(32.73, -117.19), 30.01)
    ///     .with_temperature(Celsius(17.0))
    ///     .with_wind(Some(290.0), Knots(8.0));
    ///
    /// assert_eq!(report.station(), "KSAN");
    /// assert_eq!(report.qnh(), Qnh::new(3001));
    /// assert!(report.wind().is_some());
    /// assert!(report.dew_point().is_none());
    /// ```
    pub fn new<S, T>(station: S, observation_time: T, position: GeoPosition, altimeter_inhg: f64) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        WeatherReport {
            station: station.into(),
            observation_time: observation_time.into(),
            position,
            altimeter_inhg,
            raw: None,
            temperature: Optioned::none(),
            dew_point: Optioned::none(),
            wind_direction: Optioned::none(),
            wind_speed: Optioned::none(),
            visibility: Optioned::none(),
            elevation: Optioned::none(),
        }
    }

    /// Builder method for the raw report text.
    #[inline]
    pub fn with_raw_text<S>(mut self, raw: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.raw = Option::from(raw);
        self
    }

    /// Builder method for the temperature.
    #[inline]
    pub fn with_temperature<T>(mut self, temperature: T) -> Self
    where
        Optioned<Celsius>: From<T>,
    {
        self.temperature = Optioned::from(temperature);
        self
    }

    /// Builder method for the dew point.
    #[inline]
    pub fn with_dew_point<T>(mut self, dew_point: T) -> Self
    where
        Optioned<Celsius>: From<T>,
    {
        self.dew_point = Optioned::from(dew_point);
        self
    }

    /// Builder method for the wind. A `None` direction means variable.
    #[inline]
    pub fn with_wind<T>(mut self, direction: Option<f64>, speed: T) -> Self
    where
        Optioned<Knots>: From<T>,
    {
        self.wind_direction = Optioned::<f64>::from(direction);
        self.wind_speed = Optioned::from(speed);
        self
    }

    /// Builder method for the visibility.
    #[inline]
    pub fn with_visibility<T>(mut self, visibility: T) -> Self
    where
        Optioned<StatuteMiles>: From<T>,
    {
        self.visibility = Optioned::from(visibility);
        self
    }

    /// Builder method for the station elevation.
    #[inline]
    pub fn with_elevation<T, U>(mut self, elevation: T) -> Self
    where
        Optioned<U>: From<T>,
        U: Noned + metfor::Length,
        Meters: From<U>,
    {
        let elevation: Optioned<U> = Optioned::from(elevation);
        self.elevation = elevation.map_t(Meters::from);
        self
    }

    /// Station identifier, e.g. "KSAN".
    #[inline]
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Observation time as reported.
    #[inline]
    pub fn observation_time(&self) -> &str {
        &self.observation_time
    }

    /// Observation time, if it is in one of the ISO-8601 forms the provider uses.
    ///
    /// ```rust
    /// use altimetry::{GeoPosition, WeatherReport};
    /// use chrono::{NaiveDate, Timelike};
    ///
    /// let report = WeatherReport::new("KNKX", "2019-02-06T18:55:00Z", GeoPosition::new(32.87, -117.14), 30.0);
    /// let time = report.observed_at().unwrap();
    /// assert_eq!(time.date(), NaiveDate::from_ymd_opt(2019, 2, 6).unwrap());
    /// assert_eq!(time.minute(), 55);
    /// ```
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&self.observation_time, fmt).ok())
    }

    /// Station position.
    #[inline]
    pub fn position(&self) -> GeoPosition {
        self.position
    }

    /// Altimeter setting in inches of mercury, as reported.
    #[inline]
    pub fn altimeter_inhg(&self) -> f64 {
        self.altimeter_inhg
    }

    /// Altimeter setting rounded to hundredths of an inch.
    #[inline]
    pub fn qnh(&self) -> Qnh {
        Qnh::from_inhg(self.altimeter_inhg)
    }

    /// Raw report text.
    #[inline]
    pub fn raw_text(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Temperature.
    #[inline]
    pub fn temperature(&self) -> Optioned<Celsius> {
        self.temperature
    }

    /// Dew point.
    #[inline]
    pub fn dew_point(&self) -> Optioned<Celsius> {
        self.dew_point
    }

    /// Wind direction in degrees, missing when variable or not reported.
    #[inline]
    pub fn wind_direction(&self) -> Optioned<f64> {
        self.wind_direction
    }

    /// Wind speed.
    #[inline]
    pub fn wind_speed(&self) -> Optioned<Knots> {
        self.wind_speed
    }

    /// Wind speed and direction, when both are known.
    pub fn wind(&self) -> Optioned<WindSpdDir<Knots>> {
        match (self.wind_speed.into_option(), self.wind_direction.into_option()) {
            (Some(speed), Some(direction)) => Optioned::some(WindSpdDir { speed, direction }),
            _ => Optioned::none(),
        }
    }

    /// Visibility.
    #[inline]
    pub fn visibility(&self) -> Optioned<StatuteMiles> {
        self.visibility
    }

    /// Station elevation.
    #[inline]
    pub fn elevation(&self) -> Optioned<Meters> {
        self.elevation
    }

    /// Great-circle distance from `origin` in nautical miles.
    #[inline]
    pub fn distance_from(&self, origin: &GeoPosition) -> f64 {
        origin.distance_to(&self.position)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use metfor::Feet;
    use optional::some;

    fn report() -> WeatherReport {
        WeatherReport::new("KMYF", "2019-02-06T18:47:00Z", GeoPosition::new(32.82, -117.14), 29.85)
    }

    #[test]
    fn test_required_fields() {
        let rpt = report();

        assert_eq!(rpt.station(), "KMYF");
        assert_eq!(rpt.observation_time(), "2019-02-06T18:47:00Z");
        assert_eq!(rpt.position(), GeoPosition::new(32.82, -117.14));
        assert_eq!(rpt.qnh(), Qnh::new(2985));
        assert!(rpt.raw_text().is_none());
    }

    #[test]
    fn test_builders() {
        let rpt = report()
            .with_raw_text("KMYF 061847Z 28008KT 10SM CLR 17/06 A2985".to_owned())
            .with_temperature(Celsius(17.0))
            .with_dew_point(some(Celsius(6.0)))
            .with_wind(None, Knots(3.0))
            .with_visibility(StatuteMiles(10.0))
            .with_elevation(Feet(427.0));

        assert_eq!(rpt.raw_text(), Some("KMYF 061847Z 28008KT 10SM CLR 17/06 A2985"));
        assert_eq!(rpt.temperature().unpack(), Celsius(17.0));
        assert_eq!(rpt.dew_point().unpack(), Celsius(6.0));
        assert!(rpt.wind_direction().is_none());
        assert_eq!(rpt.wind_speed().unpack(), Knots(3.0));
        assert!(rpt.wind().is_none());
        assert_eq!(rpt.visibility().unpack(), StatuteMiles(10.0));

        let elev = rpt.elevation().unpack();
        assert!((elev.0 - 130.15).abs() < 0.01);
    }

    #[test]
    fn test_observed_at_formats() {
        let rpt = report();
        assert!(rpt.observed_at().is_some());

        let rpt = WeatherReport::new("KMYF", "2024-01-01T01:00", GeoPosition::new(0.0, 0.0), 30.0);
        assert!(rpt.observed_at().is_some());

        let rpt = WeatherReport::new("KMYF", "061847Z", GeoPosition::new(0.0, 0.0), 30.0);
        assert!(rpt.observed_at().is_none());
    }
}
