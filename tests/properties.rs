use altimetry::{
    format_altitude, great_circle_distance,
    pressure::{kpa_to_inhg, pressure_altitude},
    AltitudeConverter, GeoPosition, Qnh,
};
use metfor::Quantity;
use proptest::prelude::*;

fn position() -> impl Strategy<Value = GeoPosition> {
    (-89.0..89.0f64, -180.0..180.0f64).prop_map(GeoPosition::from)
}

proptest! {
    #[test]
    fn prop_inhg_tracks_kpa(kpa in 50.0..110.0f64, qnh in 2810..3100i32) {
        let mut altimeter = AltitudeConverter::with_reference_pressure(Qnh::new(qnh));
        let reading = altimeter.ingest_sample(kpa);

        prop_assert!((reading.pressure_inhg() - kpa * 0.2953).abs() < 1e-12);
        prop_assert_eq!(reading.pressure_kpa(), kpa);
    }

    #[test]
    fn prop_pressure_altitude_ignores_setting(kpa in 50.0..110.0f64, q0 in 2810..3100i32, q1 in 2810..3100i32) {
        let mut altimeter = AltitudeConverter::new();
        altimeter.ingest_sample(kpa);

        let a = altimeter.set_reference_pressure(q0).pressure_altitude().unwrap().unpack();
        let b = altimeter.set_reference_pressure(q1).pressure_altitude().unwrap().unpack();

        prop_assert_eq!(a, b);
        prop_assert_eq!(a, pressure_altitude(kpa_to_inhg(kpa)).unpack());
    }

    #[test]
    fn prop_setting_is_idempotent(kpa in 50.0..110.0f64, qnh in 2810..3100i32) {
        let mut altimeter = AltitudeConverter::new();
        altimeter.ingest_sample(kpa);

        let first = altimeter.set_reference_pressure(qnh);
        let second = altimeter.set_reference_pressure(qnh);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_calibration_zeroes_indicated(kpa in 50.0..110.0f64, qnh in 2810..3100i32) {
        let mut altimeter = AltitudeConverter::new();
        altimeter.ingest_sample(kpa);

        let reading = altimeter.set_reference_from_indicated_inhg(qnh);
        prop_assert!(reading.indicated_altitude().unwrap().unpack().abs() < 1e-6);
        prop_assert_eq!(reading.qnh(), Qnh::new(qnh));
    }

    #[test]
    fn prop_distance_symmetric(a in position(), b in position()) {
        let ab = great_circle_distance(&a, &b);
        let ba = great_circle_distance(&b, &a);

        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert_eq!(great_circle_distance(&a, &a), 0.0);
    }

    #[test]
    fn prop_altitude_text_never_negative(feet in -1e6..1e6f64) {
        let text = format_altitude(feet);
        prop_assert!(!text.starts_with('-'));
        prop_assert_eq!(text.replace(',', "").parse::<u64>().unwrap(), feet.max(0.0).trunc() as u64);
    }
}
