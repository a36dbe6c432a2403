//! Choose which weather report should supply the altimeter setting.
//!
//! Ties are broken by order of appearance. A station reported twice with the same observation
//! time keeps the first copy, and of two stations at exactly the same distance the one that
//! appeared first is chosen.

use crate::{geo::GeoPosition, metar::WeatherReport};
use itertools::Itertools;
use std::collections::HashMap;

/// Picks the nearest station to a fixed origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationSelector {
    origin: GeoPosition,
}

impl StationSelector {
    /// Create a selector measuring distance from `origin`.
    #[inline]
    pub fn new(origin: GeoPosition) -> Self {
        StationSelector { origin }
    }

    /// The position distances are measured from.
    #[inline]
    pub fn origin(&self) -> GeoPosition {
        self.origin
    }

    /// The nearest report after keeping only the latest report from each station.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use altimetry::{GeoPosition, StationSelector, WeatherReport};
    ///
    /// let selector = StationSelector::new(GeoPosition::new(32.82, -117.27));
    /// assert!(selector.pick_nearest(vec![]).is_none());
    ///
    /// let reports = vec![
    ///     WeatherReport::new("KSAN", "2019-02-06T18:51:00Z", GeoPosition::new(32.73, -117.19), 30.01),
    ///     WeatherReport::new("KMYF", "2019-02-06T18:47:00Z", GeoPosition::new(32.82, -117.14), 29.85),
    /// ];
    /// assert_eq!(selector.pick_nearest(reports).unwrap().station(), "KMYF");
    /// ```
    pub fn pick_nearest<I>(&self, reports: I) -> Option<WeatherReport>
    where
        I: IntoIterator<Item = WeatherReport>,
    {
        pick_nearest(reports, &self.origin)
    }

    /// The latest report from each station paired with its distance, nearest first.
    ///
    /// Equal distances keep their order of appearance.
    pub fn rank<I>(&self, reports: I) -> Vec<(WeatherReport, f64)>
    where
        I: IntoIterator<Item = WeatherReport>,
    {
        let origin = self.origin;

        dedup_latest(reports)
            .into_iter()
            .map(|rpt| {
                let dist = rpt.distance_from(&origin);
                (rpt, dist)
            })
            .sorted_by(|(_, d0), (_, d1)| d0.total_cmp(d1))
            .collect()
    }
}

/// Keep one report per station, the one with the greatest observation time string.
///
/// Each surviving report sits where its station first appeared in the input.
///
/// ```rust
/// use altimetry::{selector::dedup_latest, GeoPosition, WeatherReport};
///
/// let pos = GeoPosition::new(32.82, -117.14);
/// let reports = vec![
///     WeatherReport::new("KXYZ", "2024-01-01T00:00", pos, 29.90),
///     WeatherReport::new("KABC", "2024-01-01T00:30", pos, 29.95),
///     WeatherReport::new("KXYZ", "2024-01-01T01:00", pos, 29.92),
/// ];
///
/// let latest = dedup_latest(reports);
/// assert_eq!(latest.len(), 2);
/// assert_eq!(latest[0].observation_time(), "2024-01-01T01:00");
/// assert_eq!(latest[1].station(), "KABC");
/// ```
pub fn dedup_latest<I>(reports: I) -> Vec<WeatherReport>
where
    I: IntoIterator<Item = WeatherReport>,
{
    let mut kept: Vec<WeatherReport> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for rpt in reports {
        match slots.get(rpt.station()) {
            Some(&idx) => {
                if rpt.observation_time() > kept[idx].observation_time() {
                    kept[idx] = rpt;
                }
            }
            None => {
                slots.insert(rpt.station().to_owned(), kept.len());
                kept.push(rpt);
            }
        }
    }

    kept
}

/// The nearest of the latest reports per station, or `None` if there are none.
pub fn pick_nearest<I>(reports: I, origin: &GeoPosition) -> Option<WeatherReport>
where
    I: IntoIterator<Item = WeatherReport>,
{
    let mut candidates = dedup_latest(reports);

    let nearest = candidates
        .iter()
        .map(|rpt| rpt.distance_from(origin))
        .position_min_by(|d0, d1| d0.total_cmp(d1))?;

    Some(candidates.swap_remove(nearest))
}
