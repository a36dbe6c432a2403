//! The boundary with the barometric pressure sensor.
//!
//! A sensor delivers samples on its own schedule and thread. Implementations of `PressureFeed`
//! push them into a channel, and `run` drains that channel through a shared converter.

use crate::{
    converter::{AltitudeReading, SharedConverter},
    error::{AltimetryError, Result},
    pressure::PressureSample,
};
use log::{debug, warn};
use std::{
    sync::{
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
        Mutex, PoisonError,
    },
    time::Duration,
};

/// Something that produces barometer samples in kilopascals.
pub trait PressureFeed {
    /// Start receiving samples. Fails with `SensorUnavailable` if there is no sensor.
    fn subscribe(&self) -> Result<Subscription>;
}

/// A stream of samples from one subscription. It ends when the sensor side hangs up.
#[derive(Debug)]
pub struct Subscription {
    samples: Receiver<PressureSample>,
}

impl Subscription {
    /// Wrap the receiving half of a sample channel.
    pub fn new(samples: Receiver<PressureSample>) -> Self {
        Subscription { samples }
    }

    /// Block for the next sample, `None` once the feed has closed.
    pub fn next_sample(&self) -> Option<PressureSample> {
        self.samples.recv().ok()
    }

    /// Wait up to `timeout` for the next sample.
    ///
    /// `Ok(None)` means nothing arrived in time, `FeedClosed` that nothing ever will.
    pub fn next_sample_timeout(&self, timeout: Duration) -> Result<Option<PressureSample>> {
        match self.samples.recv_timeout(timeout) {
            Ok(sample) => Ok(Some(sample)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(AltimetryError::FeedClosed),
        }
    }

    /// The next sample if one is already waiting.
    pub fn try_next_sample(&self) -> Option<PressureSample> {
        self.samples.try_recv().ok()
    }
}

impl Iterator for Subscription {
    type Item = PressureSample;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_sample()
    }
}

/// The sending side of a `ChannelFeed`, handed to whatever reads the hardware.
#[derive(Debug, Clone)]
pub struct SampleSender {
    tx: Sender<PressureSample>,
}

impl SampleSender {
    /// Deliver a sample. Returns false once the subscriber has gone away.
    pub fn send<P>(&self, kpa: P) -> bool
    where
        PressureSample: From<P>,
    {
        self.tx.send(PressureSample::from(kpa)).is_ok()
    }
}

/// An in-process feed backed by a channel.
///
/// It may be subscribed to once, later subscriptions fail with `FeedClosed`.
///
/// # Examples
///
/// ```rust
/// use altimetry::feed::{ChannelFeed, PressureFeed};
///
/// let (sender, feed) = ChannelFeed::new();
/// let subscription = feed.subscribe().unwrap();
///
/// assert!(sender.send(100.2));
/// drop(sender);
///
/// let samples: Vec<f64> = subscription.map(|s| s.kpa()).collect();
/// assert_eq!(samples, vec![100.2]);
/// ```
#[derive(Debug)]
pub struct ChannelFeed {
    samples: Mutex<Option<Receiver<PressureSample>>>,
    available: bool,
}

impl ChannelFeed {
    /// A new feed and the sender that supplies it.
    pub fn new() -> (SampleSender, ChannelFeed) {
        let (tx, rx) = mpsc::channel();

        let feed = ChannelFeed {
            samples: Mutex::new(Some(rx)),
            available: true,
        };

        (SampleSender { tx }, feed)
    }

    /// A feed for a device without a barometer.
    pub fn unavailable() -> ChannelFeed {
        ChannelFeed {
            samples: Mutex::new(None),
            available: false,
        }
    }
}

impl PressureFeed for ChannelFeed {
    fn subscribe(&self) -> Result<Subscription> {
        if !self.available {
            return Err(AltimetryError::SensorUnavailable);
        }

        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(Subscription::new)
            .ok_or(AltimetryError::FeedClosed)
    }
}

/// Subscribe to `feed` and pass a fresh reading to `listener` for every sample until the feed
/// closes. Returns the number of samples processed.
///
/// The current reading, the standard atmosphere if no sample has been seen yet, is delivered
/// as soon as the subscription starts.
///
/// # Examples
///
/// ```rust
/// use altimetry::feed::{self, ChannelFeed};
/// use altimetry::{AltitudeConverter, SharedConverter};
///
/// let (sender, pressure_feed) = ChannelFeed::new();
/// sender.send(99.0);
/// sender.send(98.5);
/// drop(sender);
///
/// let converter = SharedConverter::new(AltitudeConverter::new());
/// let mut readings = Vec::new();
/// let count = feed::run(&pressure_feed, &converter, |r| readings.push(r)).unwrap();
///
/// assert_eq!(count, 2);
/// assert_eq!(readings.len(), 3);
/// assert!(readings[0].indicated_altitude().is_none());
/// assert!(readings[2].indicated_altitude().is_some());
/// ```
pub fn run<F, L>(feed: &F, converter: &SharedConverter, mut listener: L) -> Result<usize>
where
    F: PressureFeed + ?Sized,
    L: FnMut(AltitudeReading),
{
    let subscription = feed.subscribe().map_err(|err| {
        warn!("unable to subscribe to pressure feed: {}", err);
        err
    })?;
    debug!("pressure feed subscribed");

    listener(converter.reading());

    let mut count = 0;
    for sample in subscription {
        listener(converter.ingest_sample(sample));
        count += 1;
    }

    debug!("pressure feed closed after {} samples", count);
    Ok(count)
}
