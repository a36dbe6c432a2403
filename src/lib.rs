#![warn(missing_docs)]
/*!
Barometric altimetry: indicated altitude and pressure altitude from raw barometer samples, and the
altimeter setting (QNH) from the nearest aviation weather report (METAR).

The core is two small pieces. An [`AltitudeConverter`] holds the altimeter setting and the latest
pressure sample and produces an [`AltitudeReading`] every time either changes. A
[`StationSelector`] takes a batch of [`WeatherReport`]s, keeps the latest from each station, and
picks the one nearest a fixed origin to supply a new setting.

Everything around them is a thin boundary. The [`feed`] module carries samples from a sensor to
the converter, the [`source`] module fetches reports from the aviation weather data service, and
[`Settings`] configures both.

```rust
use altimetry::{AltitudeConverter, GeoPosition, Qnh, StationSelector, WeatherReport};
use metfor::Quantity;

let mut altimeter = AltitudeConverter::new();
altimeter.ingest_sample(101.325);

let selector = StationSelector::new(GeoPosition::new(32.82, -117.27));
let reports = vec![
    WeatherReport::new("KNKX", "2019-02-06T18:55:00Z", GeoPosition::new(32.87, -117.14), 30.01),
    WeatherReport::new("KMYF", "2019-02-06T18:47:00Z", GeoPosition::new(32.82, -117.14), 29.85),
];

let nearest = selector.pick_nearest(reports).unwrap();
let reading = altimeter.set_reference_pressure(nearest.qnh());

assert_eq!(reading.qnh(), Qnh::new(2985));
let feet = reading.indicated_altitude().unwrap().unpack();
assert!((feet - (29.85 - 101.325 * 0.2953) * 1000.0).abs() < 1.0e-6);
```
*/

//
// API
//
pub use crate::{
    config::Settings,
    converter::{AltitudeConverter, AltitudeReading, SharedConverter},
    error::{AltimetryError, Result},
    format::{format_altitude, format_altitude_opt, format_inhg, format_pressure},
    geo::{great_circle_distance, GeoPosition},
    metar::WeatherReport,
    pressure::{PressureSample, PressureUnit, Qnh},
    qnh_dial::{QnhDial, QnhRange},
    selector::StationSelector,
};

pub mod config;
pub mod converter;
pub mod feed;
pub mod format;
pub mod geo;
pub mod metar;
pub mod pressure;
pub mod qnh_dial;
pub mod selector;
pub mod source;

//
// Internal use only
//
mod error;
