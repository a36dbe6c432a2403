#[macro_use]
mod utils;

use crate::utils::*;
use altimetry::{
    feed::{self, ChannelFeed},
    format_altitude_opt,
    source::{update_reference, ReportSource},
    AltitudeConverter, GeoPosition, Qnh, SharedConverter, StationSelector, WeatherReport,
};
use metfor::Quantity;

struct Fixed(Vec<WeatherReport>);

impl ReportSource for Fixed {
    fn fetch(&self, _center: GeoPosition, _radius_nm: f64) -> altimetry::Result<Vec<WeatherReport>> {
        Ok(self.0.clone())
    }
}

fn two_stations() -> Vec<WeatherReport> {
    vec![
        report("KFAR", "2024-01-01T01:00:00Z", north_of(&ORIGIN, 12.0), 30.01),
        report("KNEAR", "2024-01-01T01:00:00Z", north_of(&ORIGIN, 5.0), 29.85),
    ]
}

#[test]
fn test_nearest_station_sets_reference() {
    let selector = StationSelector::new(ORIGIN);

    let nearest = selector.pick_nearest(two_stations()).unwrap();
    assert_eq!(nearest.station(), "KNEAR");
    assert_approx!(nearest.distance_from(&ORIGIN), 5.0, 1.0e-6);

    let mut altimeter = AltitudeConverter::new();
    altimeter.ingest_sample(101.325);
    let reading = altimeter.set_reference_pressure(nearest.qnh());

    assert_eq!(reading.qnh(), Qnh::new(2985));
    assert_approx!(reading.indicated_altitude().unwrap().unpack(), -71.2725, 1.0e-6);
    assert_eq!(format_altitude_opt(reading.indicated_altitude()), "0");
}

#[test]
fn test_update_reference_then_feed() {
    let converter = SharedConverter::default();
    let selector = StationSelector::new(ORIGIN);

    let (report, _) = update_reference(&Fixed(two_stations()), &selector, 20.0, &converter)
        .unwrap()
        .unwrap();
    assert_eq!(report.station(), "KNEAR");

    let (sender, pressure_feed) = ChannelFeed::new();
    sender.send(98.0);
    sender.send(97.0);
    drop(sender);

    let mut readings = Vec::new();
    let count = feed::run(&pressure_feed, &converter, |r| readings.push(r)).unwrap();

    assert_eq!(count, 2);
    assert!(readings.iter().all(|r| r.qnh() == Qnh::new(2985)));

    let last = readings.last().unwrap();
    assert_approx!(
        last.indicated_altitude().unwrap().unpack(),
        (29.85 - 97.0 * 0.2953) * 1000.0,
        1.0e-6
    );
    assert!(last.pressure_altitude().unwrap().unpack() > 0.0);
}

#[test]
fn test_no_stations_keeps_standard_setting() {
    let converter = SharedConverter::default();
    converter.ingest_sample(100.0);

    let result = update_reference(&Fixed(vec![]), &StationSelector::new(ORIGIN), 20.0, &converter);
    assert_eq!(result, Ok(None));
    assert_eq!(converter.reading().qnh(), Qnh::new(2992));
}
