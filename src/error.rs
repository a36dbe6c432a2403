//! Error types for the altimetry crate.
use std::{error::Error, fmt::Display};

/// Error type for the crate.
///
/// Nothing in the conversion or station-selection core returns an error; these all originate at
/// the boundaries with the pressure sensor, the weather report provider, or the settings file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AltimetryError {
    /// The pressure sensor is not present or cannot be subscribed to.
    SensorUnavailable,
    /// The sensor feed closed before delivering a value.
    FeedClosed,
    /// A weather report lacked a field the core requires.
    MissingField(&'static str),
    /// A transport or HTTP status failure while fetching weather reports.
    Http(String),
    /// The weather report request did not resolve in time.
    Timeout,
    /// The provider response could not be decoded.
    Decode(String),
    /// The settings could not be read or are invalid.
    Config(String),
}

impl Display for AltimetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use AltimetryError::*;

        match self {
            SensorUnavailable => write!(f, "barometric pressure sensor not available"),
            FeedClosed => write!(f, "pressure feed closed"),
            MissingField(name) => write!(f, "weather report missing required field: {}", name),
            Http(msg) => write!(f, "weather report request failed: {}", msg),
            Timeout => write!(f, "weather report request timed out"),
            Decode(msg) => write!(f, "unable to decode weather reports: {}", msg),
            Config(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl Error for AltimetryError {}

impl From<serde_json::Error> for AltimetryError {
    fn from(err: serde_json::Error) -> Self {
        AltimetryError::Decode(err.to_string())
    }
}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, AltimetryError>;
