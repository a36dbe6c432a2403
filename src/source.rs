//! The boundary with the weather report provider.

use crate::{
    config::Settings,
    converter::{AltitudeReading, SharedConverter},
    error::{AltimetryError, Result},
    geo::{search_box, GeoPosition},
    metar::{json::decode_reports, WeatherReport},
    selector::StationSelector,
};
use log::{debug, warn};
use std::{
    io::Read,
    sync::{mpsc, Arc},
    thread,
    time::Duration,
};

/// Something that can list the current weather reports around a position.
pub trait ReportSource {
    /// Reports from stations within `radius_nm` nautical miles of `center`.
    fn fetch(&self, center: GeoPosition, radius_nm: f64) -> Result<Vec<WeatherReport>>;
}

impl<S: ReportSource + ?Sized> ReportSource for Arc<S> {
    fn fetch(&self, center: GeoPosition, radius_nm: f64) -> Result<Vec<WeatherReport>> {
        (**self).fetch(center, radius_nm)
    }
}

/// Build the METAR query for a search around `center`.
///
/// The service takes a latitude/longitude box, so the box is sized to hold the whole radius.
///
/// # Examples
///
/// ```rust
/// use altimetry::{source::request_url, GeoPosition};
///
/// let url = request_url("https://aviationweather.gov/api/data/metar", &GeoPosition::new(32.82, -117.27), 20.0, 1);
/// assert!(url.starts_with("https://aviationweather.gov/api/data/metar?format=json&hours=1&bbox="));
/// ```
pub fn request_url(endpoint: &str, center: &GeoPosition, radius_nm: f64, hours: u32) -> String {
    let bbox = search_box(center, radius_nm);

    format!(
        "{}?format=json&hours={}&bbox={:.4},{:.4},{:.4},{:.4}",
        endpoint, hours, bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
    )
}

/// METARs from the aviation weather data service over HTTP.
pub struct AviationWeather {
    endpoint: String,
    hours: u32,
    agent: ureq::Agent,
}

impl AviationWeather {
    /// A client using the endpoint, look-back window and timeout from `settings`.
    pub fn new(settings: &Settings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(settings.fetch_timeout())
            .user_agent(concat!("altimetry/", env!("CARGO_PKG_VERSION")))
            .build();

        AviationWeather {
            endpoint: settings.endpoint.clone(),
            hours: settings.hours_before_now,
            agent,
        }
    }
}

impl ReportSource for AviationWeather {
    fn fetch(&self, center: GeoPosition, radius_nm: f64) -> Result<Vec<WeatherReport>> {
        let url = request_url(&self.endpoint, &center, radius_nm, self.hours);
        debug!("requesting METARs: {}", url);

        let body = match self.agent.get(&url).call() {
            Ok(response) => read_body(response.into_reader())?,
            Err(ureq::Error::Status(code, _)) => {
                warn!("METAR request returned status {}", code);
                return Err(AltimetryError::Http(format!("status {}", code)));
            }
            Err(ureq::Error::Transport(err)) => {
                warn!("METAR request failed: {}", err);
                return Err(AltimetryError::Http(err.to_string()));
            }
        };

        let reports = decode_reports(&body)?;
        debug!("received {} METARs", reports.len());

        Ok(within_radius(reports, &center, radius_nm))
    }
}

/// Responses larger than this are truncated, and will then fail to decode.
const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

fn read_body<R: Read>(reader: R) -> Result<String> {
    let mut body = String::new();

    reader
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .map_err(|err| {
            warn!("unable to read METAR response: {}", err);
            AltimetryError::Http(format!("reading response body: {}", err))
        })?;

    Ok(body)
}

/// Keep only the reports from stations within `radius_nm` nautical miles of `center`.
///
/// The provider is queried with a box, and the corners of the box are farther away than the
/// radius.
pub fn within_radius<I>(reports: I, center: &GeoPosition, radius_nm: f64) -> Vec<WeatherReport>
where
    I: IntoIterator<Item = WeatherReport>,
{
    reports
        .into_iter()
        .filter(|rpt| rpt.distance_from(center) <= radius_nm)
        .collect()
}

/// Run a fetch on a worker thread, giving up with `Timeout` if it takes longer than `timeout`.
///
/// A fetch that outlives the timeout finishes on its own and its result is discarded.
pub fn fetch_with_timeout<S>(
    source: Arc<S>,
    center: GeoPosition,
    radius_nm: f64,
    timeout: Duration,
) -> Result<Vec<WeatherReport>>
where
    S: ReportSource + Send + Sync + ?Sized + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        // The receiver is gone if we already timed out.
        let _ = tx.send(source.fetch(center, radius_nm));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!("METAR request timed out after {:?}", timeout);
            Err(AltimetryError::Timeout)
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            warn!("METAR request worker stopped without a result");
            Err(AltimetryError::Http("request abandoned".to_owned()))
        }
    }
}

/// Fetch reports, pick the nearest station and make its altimeter setting the reference.
///
/// Returns the chosen report and the new reading, or `None` when no station reported. The
/// converter is untouched on failure or when nothing was found.
///
/// # Examples
///
/// ```rust
/// use altimetry::source::{update_reference, ReportSource};
/// use altimetry::{GeoPosition, Qnh, SharedConverter, StationSelector, WeatherReport};
///
/// struct Fixed;
///
/// impl ReportSource for Fixed {
///     fn fetch(&self, _: GeoPosition, _: f64) -> altimetry::Result<Vec<WeatherReport>> {
///         Ok(vec![WeatherReport::new("KMYF", "2019-02-06T18:47:00Z", GeoPosition::new(32.82, -117.14), 29.85)])
///     }
/// }
///
/// let converter = SharedConverter::default();
/// let selector = StationSelector::new(GeoPosition::new(32.82, -117.27));
///
/// let (report, reading) = update_reference(&Fixed, &selector, 20.0, &converter).unwrap().unwrap();
/// assert_eq!(report.station(), "KMYF");
/// assert_eq!(reading.qnh(), Qnh::new(2985));
/// ```
pub fn update_reference<S>(
    source: &S,
    selector: &StationSelector,
    radius_nm: f64,
    converter: &SharedConverter,
) -> Result<Option<(WeatherReport, AltitudeReading)>>
where
    S: ReportSource + ?Sized,
{
    let reports = source.fetch(selector.origin(), radius_nm)?;

    let nearest = match selector.pick_nearest(reports) {
        Some(report) => report,
        None => {
            debug!("no METARs within {} nm", radius_nm);
            return Ok(None);
        }
    };

    debug!(
        "nearest METAR {} at {:.1} nm, altimeter {}",
        nearest.station(),
        nearest.distance_from(&selector.origin()),
        nearest.qnh()
    );

    let reading = converter.set_reference_pressure(nearest.qnh());
    Ok(Some((nearest, reading)))
}
