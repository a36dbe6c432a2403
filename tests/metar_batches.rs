#[macro_use]
mod utils;

use crate::utils::*;
use altimetry::{
    metar::json::decode_reports, selector::dedup_latest, Qnh, StationSelector,
};
use metfor::Quantity;

#[test]
fn test_decode_batch() {
    let body = load_test_file("san_diego_metars.json");
    let reports = decode_reports(&body).unwrap();

    // KCRQ has no altimeter and is dropped.
    let stations: Vec<&str> = reports.iter().map(|r| r.station()).collect();
    assert_eq!(stations, vec!["KMYF", "KSAN", "KMYF", "KNKX"]);

    let ksan = &reports[1];
    assert_eq!(ksan.observation_time(), "2019-02-06T18:51:00Z");
    assert_eq!(ksan.qnh(), Qnh::new(3001));
    assert_approx!(ksan.temperature().unpack().unpack(), 16.1, 1.0e-9);
    assert_approx!(ksan.wind_speed().unpack().unpack(), 10.0, 1.0e-9);
    assert!(ksan.raw_text().unwrap().ends_with("A3001"));

    assert!(reports[2].wind_direction().is_none());
}

#[test]
fn test_dedup_batch() {
    let body = load_test_file("san_diego_metars.json");
    let latest = dedup_latest(decode_reports(&body).unwrap());

    assert_eq!(latest.len(), 3);
    assert_eq!(latest[0].station(), "KMYF");
    assert_eq!(latest[0].observation_time(), "2019-02-06T18:47:00Z");
    assert_eq!(latest[0].qnh(), Qnh::new(2985));
}

#[test]
fn test_pick_from_batch() {
    let body = load_test_file("san_diego_metars.json");
    let selector = StationSelector::new(ORIGIN);

    let ranked = selector.rank(decode_reports(&body).unwrap());
    let stations: Vec<&str> = ranked.iter().map(|(r, _)| r.station()).collect();
    assert_eq!(stations, vec!["KMYF", "KSAN", "KNKX"]);

    let nearest = selector.pick_nearest(decode_reports(&body).unwrap()).unwrap();
    assert_eq!(nearest.station(), "KMYF");
    assert_eq!(nearest.qnh(), Qnh::new(2985));
    assert_approx!(nearest.distance_from(&ORIGIN), 6.585, 0.01);
}

#[test]
fn test_empty_batch() {
    assert_eq!(decode_reports("").unwrap().len(), 0);
    assert_eq!(decode_reports("[]").unwrap().len(), 0);
    assert!(decode_reports("<html>").is_err());
}
