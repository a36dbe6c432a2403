use altimetry::{GeoPosition, WeatherReport};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Default search origin, over Mission Bay in San Diego.
#[allow(dead_code)]
pub const ORIGIN: GeoPosition = GeoPosition::new(32.82, -117.27);

#[allow(unused_macros)] // False alarm
macro_rules! assert_approx {
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < $eps,
            "{} and {} differ by more than {}",
            left,
            right,
            $eps
        );
    }};
}

/// A position `distance_nm` due north of `origin`.
#[allow(dead_code)]
pub fn north_of(origin: &GeoPosition, distance_nm: f64) -> GeoPosition {
    let dlat = (distance_nm / altimetry::geo::EARTH_RADIUS_NM).to_degrees();
    GeoPosition::new(origin.latitude + dlat, origin.longitude)
}

#[allow(dead_code)]
pub fn report(station: &str, time: &str, position: GeoPosition, inhg: f64) -> WeatherReport {
    WeatherReport::new(station, time, position, inhg)
}

#[allow(dead_code)]
pub fn load_test_file(fname: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(fname);

    let mut f = File::open(&path).unwrap_or_else(|_| panic!("Error opening file: {:?}", path));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .unwrap_or_else(|_| panic!("Error reading file: {:?}", path));

    contents
}
