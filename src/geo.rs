//! Positions on the Earth and great-circle distance in nautical miles.

use serde::Deserialize;

/// Mean radius of the Earth in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.277;

/// A latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeoPosition {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPosition {
    /// Create a new position.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPosition {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another position in nautical miles.
    #[inline]
    pub fn distance_to(&self, to: &GeoPosition) -> f64 {
        great_circle_distance(self, to)
    }
}

impl From<(f64, f64)> for GeoPosition {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        GeoPosition::new(latitude, longitude)
    }
}

/// Great-circle distance in nautical miles by the spherical law of cosines.
///
/// Rounding can push the cosine of the central angle just past 1 for nearby points, so it is
/// clamped to keep the result finite. Identical positions are exactly zero apart.
///
/// # Examples
///
/// ```rust
/// use altimetry::{great_circle_distance, GeoPosition};
///
/// let san_diego = GeoPosition::new(32.73, -117.19);
/// let los_angeles = GeoPosition::new(33.94, -118.41);
///
/// let dist = great_circle_distance(&san_diego, &los_angeles);
/// assert!((dist - 95.0).abs() < 0.5);
/// assert_eq!(great_circle_distance(&san_diego, &san_diego), 0.0);
/// ```
pub fn great_circle_distance(from: &GeoPosition, to: &GeoPosition) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos();

    cos_angle.max(-1.0).min(1.0).acos() * EARTH_RADIUS_NM
}

/// A latitude/longitude bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBox {
    /// Southern edge.
    pub min_lat: f64,
    /// Western edge.
    pub min_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
}

/// The smallest latitude/longitude box that holds every point within `radius_nm` of `center`.
///
/// Near the poles, or for radii wide enough to wrap, the box spans all longitudes.
pub fn search_box(center: &GeoPosition, radius_nm: f64) -> SearchBox {
    let dlat = (radius_nm / EARTH_RADIUS_NM).to_degrees();

    let min_lat = (center.latitude - dlat).max(-90.0);
    let max_lat = (center.latitude + dlat).min(90.0);

    let widest_lat = min_lat.abs().max(max_lat.abs());
    let cos_lat = widest_lat.to_radians().cos();

    let (min_lon, max_lon) = if widest_lat >= 90.0 || cos_lat <= 0.0 {
        (-180.0, 180.0)
    } else {
        let dlon = dlat / cos_lat;
        if dlon >= 180.0 {
            (-180.0, 180.0)
        } else {
            (center.longitude - dlon, center.longitude + dlon)
        }
    };

    SearchBox {
        min_lat,
        min_lon,
        max_lat,
        max_lon,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pressure::test_tools::approx_equal;

    #[test]
    fn test_distance_symmetric() {
        let a = GeoPosition::new(32.82, -117.27);
        let b = GeoPosition::new(47.45, -122.31);

        assert!(approx_equal(a.distance_to(&b), b.distance_to(&a), 1.0e-9));
        assert_eq!(a.distance_to(&a), 0.0);
        assert_eq!(b.distance_to(&b), 0.0);
    }

    #[test]
    fn test_distance_along_meridian() {
        // One degree of latitude is 60 nautical miles on this sphere, near enough.
        let a = GeoPosition::new(10.0, 20.0);
        let b = GeoPosition::new(11.0, 20.0);

        let expected = 1.0_f64.to_radians() * EARTH_RADIUS_NM;
        assert!(approx_equal(a.distance_to(&b), expected, 1.0e-6));
    }

    #[test]
    fn test_antipodes() {
        let a = GeoPosition::new(0.0, 0.0);
        let b = GeoPosition::new(0.0, 180.0);

        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_NM;
        assert!(approx_equal(a.distance_to(&b), half_circumference, 1.0e-6));
    }

    #[test]
    fn test_search_box_holds_radius() {
        let center = GeoPosition::new(32.82, -117.27);
        let bbox = search_box(&center, 20.0);

        let north = GeoPosition::new(bbox.max_lat, center.longitude);
        let east = GeoPosition::new(center.latitude, bbox.max_lon);

        assert!(approx_equal(center.distance_to(&north), 20.0, 1.0e-6));
        assert!(center.distance_to(&east) >= 20.0);
        assert!(bbox.min_lat < center.latitude && bbox.min_lon < center.longitude);
    }

    #[test]
    fn test_search_box_near_pole() {
        let bbox = search_box(&GeoPosition::new(89.9, 10.0), 60.0);

        assert_eq!(bbox.max_lat, 90.0);
        assert_eq!(bbox.min_lon, -180.0);
        assert_eq!(bbox.max_lon, 180.0);
    }
}
