//! Decode the JSON METAR listing served by the aviation weather data API.
//!
//! The provider sends an array of objects. Numbers that can't be represented as numbers, a
//! variable wind direction ("VRB") or an open ended visibility ("10+"), arrive as strings.

use crate::{
    error::{AltimetryError, Result},
    geo::GeoPosition,
    metar::WeatherReport,
    pressure::mb_to_inhg,
};
use chrono::{NaiveDateTime, TimeZone, Utc};
use log::warn;
use metfor::{Celsius, HectoPascal, Knots, Meters, StatuteMiles};
use serde::Deserialize;

/// Decode a response body, dropping any entries missing a required field.
///
/// An empty body means no reports.
///
/// # Examples
///
/// ```rust
/// use altimetry::metar::json::decode_reports;
///
/// let body = r#"[
///   {"icaoId": "KSAN", "obsTime": 1549479060, "lat": 32.73, "lon": -117.19, "altim": 1016.3},
///   {"icaoId": "KNKX", "lat": 32.87, "lon": -117.14, "altim": 1016.0}
/// ]"#;
///
/// let reports = decode_reports(body).unwrap();
/// assert_eq!(reports.len(), 1);
/// assert_eq!(reports[0].station(), "KSAN");
/// assert_eq!(reports[0].observation_time(), "2019-02-06T18:51:00Z");
/// assert_eq!(reports[0].qnh().hundredths(), 3001);
/// ```
pub fn decode_reports(body: &str) -> Result<Vec<WeatherReport>> {
    if body.trim().is_empty() {
        return Ok(vec![]);
    }

    let entries: Vec<ProviderMetar> = serde_json::from_str(body)?;

    let reports = entries
        .into_iter()
        .filter_map(|entry| match entry.into_report() {
            Ok(report) => Some(report),
            Err(err) => {
                warn!("dropping METAR: {}", err);
                None
            }
        })
        .collect();

    Ok(reports)
}

/// Decode one provider entry, failing on missing required fields.
pub fn decode_report(entry: &str) -> Result<WeatherReport> {
    let entry: ProviderMetar = serde_json::from_str(entry)?;
    entry.into_report()
}

// Every observation time is written in this one form so they compare correctly as text.
const OBSERVATION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// reportTime is "2019-02-06 18:51:00" in the listing, sometimes ISO-8601.
fn parse_report_time(text: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.fZ",
    ];

    let text = text.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_number(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(val) => Some(*val),
            NumberOrText::Text(txt) => txt.trim().trim_end_matches('+').parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderMetar {
    icao_id: Option<String>,
    obs_time: Option<i64>,
    report_time: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    // hPa
    altim: Option<f64>,
    temp: Option<f64>,
    dewp: Option<f64>,
    wdir: Option<NumberOrText>,
    wspd: Option<f64>,
    visib: Option<NumberOrText>,
    // meters
    elev: Option<f64>,
    raw_ob: Option<String>,
}

impl ProviderMetar {
    fn into_report(self) -> Result<WeatherReport> {
        let ProviderMetar {
            icao_id,
            obs_time,
            report_time,
            lat,
            lon,
            altim,
            temp,
            dewp,
            wdir,
            wspd,
            visib,
            elev,
            raw_ob,
        } = self;

        let station = icao_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(AltimetryError::MissingField("station"))?;

        let observation_time = obs_time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .map(|time| time.naive_utc())
            .or_else(|| report_time.as_deref().and_then(parse_report_time))
            .map(|time| time.format(OBSERVATION_TIME_FORMAT).to_string())
            .ok_or(AltimetryError::MissingField("observation time"))?;

        let lat = lat.ok_or(AltimetryError::MissingField("latitude"))?;
        let lon = lon.ok_or(AltimetryError::MissingField("longitude"))?;
        let altim = altim.ok_or(AltimetryError::MissingField("altimeter"))?;

        let wind_direction = wdir.as_ref().and_then(NumberOrText::as_number);
        let visibility = visib.as_ref().and_then(NumberOrText::as_number);

        let report = WeatherReport::new(
            station,
            observation_time,
            GeoPosition::new(lat, lon),
            mb_to_inhg(HectoPascal(altim)),
        )
        .with_raw_text(raw_ob)
        .with_temperature(temp.map(Celsius))
        .with_dew_point(dewp.map(Celsius))
        .with_wind(wind_direction, wspd.map(Knots))
        .with_visibility(visibility.map(StatuteMiles))
        .with_elevation::<_, Meters>(elev.map(Meters));

        Ok(report)
    }
}
