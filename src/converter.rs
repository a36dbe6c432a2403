//! Turn raw barometer samples and an altimeter setting into altitudes.

use crate::pressure::{
    indicated_altitude, inhg_to_kpa, kpa_to_inhg, kpa_to_mb, pressure_altitude, PressureSample,
    PressureUnit, Qnh, STANDARD_PRESSURE_KPA,
};
use metfor::{Feet, Quantity};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Everything derived from one recomputation.
///
/// The altitudes are missing until the converter has seen its first pressure sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeReading {
    qnh: Qnh,
    pressure_kpa: f64,
    pressure_inhg: f64,
    // NaN is a possible altitude for a bad sample, so not Optioned.
    indicated_altitude: Option<Feet>,
    pressure_altitude: Option<Feet>,
}

impl AltitudeReading {
    /// The altimeter setting used for this reading.
    #[inline]
    pub fn qnh(&self) -> Qnh {
        self.qnh
    }

    /// Pressure in kilopascals.
    #[inline]
    pub fn pressure_kpa(&self) -> f64 {
        self.pressure_kpa
    }

    /// Pressure in inches of mercury.
    #[inline]
    pub fn pressure_inhg(&self) -> f64 {
        self.pressure_inhg
    }

    /// Pressure in the requested unit.
    pub fn pressure_in(&self, unit: PressureUnit) -> f64 {
        match unit {
            PressureUnit::KiloPascal => self.pressure_kpa,
            PressureUnit::InHg => self.pressure_inhg,
            PressureUnit::Millibar => kpa_to_mb(self.pressure_kpa).unpack(),
        }
    }

    /// Altitude relative to the altimeter setting, 1000 feet per inch of mercury.
    #[inline]
    pub fn indicated_altitude(&self) -> Option<Feet> {
        self.indicated_altitude
    }

    /// Altitude in the standard atmosphere.
    #[inline]
    pub fn pressure_altitude(&self) -> Option<Feet> {
        self.pressure_altitude
    }
}

/// Holds the altimeter setting and the latest pressure sample.
///
/// Every operation recomputes and returns a fresh `AltitudeReading`.
///
/// # Examples
///
/// ```rust
/// use altimetry::{AltitudeConverter, Qnh};
/// use metfor::Quantity;
///
/// let mut altimeter = AltitudeConverter::new();
/// assert!(altimeter.reading().indicated_altitude().is_none());
///
/// let reading = altimeter.ingest_sample(98.0);
/// assert!(reading.indicated_altitude().is_some());
///
/// let reading = altimeter.set_reference_pressure(Qnh::new(3010));
/// assert_eq!(reading.qnh(), Qnh::new(3010));
/// assert!((reading.pressure_kpa() - 98.0).abs() < 1.0e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AltitudeConverter {
    reference: Qnh,
    last_sample: Option<PressureSample>,
}

impl AltitudeConverter {
    /// Create a converter set to standard pressure with no sample yet.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with an initial altimeter setting.
    #[inline]
    pub fn with_reference_pressure(qnh: Qnh) -> Self {
        AltitudeConverter {
            reference: qnh,
            last_sample: None,
        }
    }

    /// The current altimeter setting.
    #[inline]
    pub fn reference_pressure(&self) -> Qnh {
        self.reference
    }

    /// The most recent pressure sample, if any has arrived.
    #[inline]
    pub fn last_sample(&self) -> Option<PressureSample> {
        self.last_sample
    }

    /// Store a new pressure sample in kilopascals and recompute.
    ///
    /// The value is not validated, a negative or NaN value propagates into the reading.
    pub fn ingest_sample<P>(&mut self, kpa: P) -> AltitudeReading
    where
        PressureSample: From<P>,
    {
        self.last_sample = Some(PressureSample::from(kpa));
        self.reading()
    }

    /// Change the altimeter setting and recompute. The value is not range checked.
    pub fn set_reference_pressure<Q>(&mut self, qnh: Q) -> AltitudeReading
    where
        Qnh: From<Q>,
    {
        self.reference = Qnh::from(qnh);
        self.reading()
    }

    /// Set the altimeter setting and force the current sample to the same pressure.
    ///
    /// Used to calibrate against a known pressure, the indicated altitude afterwards is zero.
    ///
    /// ```rust
    /// use altimetry::AltitudeConverter;
    /// use metfor::Quantity;
    ///
    /// let mut altimeter = AltitudeConverter::new();
    /// altimeter.ingest_sample(95.0);
    ///
    /// let reading = altimeter.set_reference_from_indicated_inhg(2992);
    /// assert!(reading.indicated_altitude().unwrap().unpack().abs() < 1.0e-9);
    /// ```
    pub fn set_reference_from_indicated_inhg<Q>(&mut self, inhg: Q) -> AltitudeReading
    where
        Qnh: From<Q>,
    {
        let qnh = Qnh::from(inhg);
        self.reference = qnh;
        self.last_sample = Some(PressureSample::new(inhg_to_kpa(qnh.inhg())));
        self.reading()
    }

    /// Recompute without changing anything.
    ///
    /// Before the first sample the pressure fields show the standard atmosphere and both
    /// altitudes are missing.
    pub fn reading(&self) -> AltitudeReading {
        match self.last_sample {
            Some(sample) => self.convert(sample),
            None => {
                let kpa = STANDARD_PRESSURE_KPA;
                AltitudeReading {
                    qnh: self.reference,
                    pressure_kpa: kpa,
                    pressure_inhg: kpa_to_inhg(kpa),
                    indicated_altitude: None,
                    pressure_altitude: None,
                }
            }
        }
    }

    fn convert(&self, sample: PressureSample) -> AltitudeReading {
        let inhg = sample.inhg();

        AltitudeReading {
            qnh: self.reference,
            pressure_kpa: sample.kpa(),
            pressure_inhg: inhg,
            indicated_altitude: Some(indicated_altitude(self.reference, inhg)),
            pressure_altitude: Some(pressure_altitude(inhg)),
        }
    }
}

/// A converter that can be shared between the sensor feed and whatever changes the setting.
///
/// Each operation holds the lock for the whole recomputation, so a reading never pairs a new
/// setting with a stale sample.
#[derive(Debug, Clone, Default)]
pub struct SharedConverter {
    inner: Arc<Mutex<AltitudeConverter>>,
}

impl SharedConverter {
    /// Wrap a converter for sharing.
    pub fn new(converter: AltitudeConverter) -> Self {
        SharedConverter {
            inner: Arc::new(Mutex::new(converter)),
        }
    }

    /// See `AltitudeConverter::ingest_sample`.
    pub fn ingest_sample<P>(&self, kpa: P) -> AltitudeReading
    where
        PressureSample: From<P>,
    {
        self.lock().ingest_sample(kpa)
    }

    /// See `AltitudeConverter::set_reference_pressure`.
    pub fn set_reference_pressure<Q>(&self, qnh: Q) -> AltitudeReading
    where
        Qnh: From<Q>,
    {
        self.lock().set_reference_pressure(qnh)
    }

    /// See `AltitudeConverter::set_reference_from_indicated_inhg`.
    pub fn set_reference_from_indicated_inhg<Q>(&self, inhg: Q) -> AltitudeReading
    where
        Qnh: From<Q>,
    {
        self.lock().set_reference_from_indicated_inhg(inhg)
    }

    /// See `AltitudeConverter::reading`.
    pub fn reading(&self) -> AltitudeReading {
        self.lock().reading()
    }

    /// A copy of the converter state at this moment.
    pub fn snapshot(&self) -> AltitudeConverter {
        *self.lock()
    }

    // The state is two plain values, a panic elsewhere can't leave it half written.
    fn lock(&self) -> MutexGuard<'_, AltitudeConverter> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<AltitudeConverter> for SharedConverter {
    fn from(converter: AltitudeConverter) -> Self {
        SharedConverter::new(converter)
    }
}
