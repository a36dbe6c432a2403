//! Adjusting the altimeter setting from a rotary input and a fixed list of settings.

use crate::pressure::{Qnh, STANDARD_QNH};
use std::convert::TryFrom;

/// Rotation smaller than this, accumulated, is ignored.
pub const DEFAULT_MIN_DELTA: f64 = 0.02;

/// Turns rotary deltas into steps of the altimeter setting.
///
/// Deltas accumulate until their sum reaches the minimum. The step is then sized from the
/// magnitude of the delta that crossed it, so faster turns move the setting further, and the
/// accumulator starts over.
///
/// # Examples
///
/// ```rust
/// use altimetry::{QnhDial, Qnh};
///
/// let mut dial = QnhDial::new();
/// assert_eq!(dial.rotate(0.01, Qnh::new(2992)), None);
/// assert_eq!(dial.rotate(0.015, Qnh::new(2992)), Some(Qnh::new(2993)));
/// assert_eq!(dial.rotate(-0.1, Qnh::new(2993)), Some(Qnh::new(2983)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QnhDial {
    cumulative: f64,
    min_delta: f64,
}

impl Default for QnhDial {
    fn default() -> Self {
        QnhDial::with_min_delta(DEFAULT_MIN_DELTA)
    }
}

impl QnhDial {
    /// A dial with the default sensitivity.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dial that ignores accumulated rotation below `min_delta`.
    #[inline]
    pub fn with_min_delta(min_delta: f64) -> Self {
        QnhDial {
            cumulative: 0.0,
            min_delta,
        }
    }

    /// Rotation accumulated since the last step.
    #[inline]
    pub fn pending(&self) -> f64 {
        self.cumulative
    }

    /// Feed one rotation delta, returning the signed step in hundredths once the accumulated
    /// rotation is large enough.
    pub fn step(&mut self, delta: f64) -> Option<i32> {
        self.cumulative += delta;

        if self.cumulative.abs() < self.min_delta {
            return None;
        }

        self.cumulative = 0.0;

        let magnitude = delta.abs();
        let amount = if magnitude < self.min_delta {
            1
        } else if magnitude < 0.03 {
            2
        } else if magnitude < 0.04 {
            (magnitude * 20.0) as i32
        } else if magnitude < 0.06 {
            (magnitude * 50.0) as i32
        } else {
            (magnitude * 100.0) as i32
        };

        if delta < 0.0 {
            Some(-amount)
        } else {
            Some(amount)
        }
    }

    /// Feed one rotation delta and apply any resulting step to `current`.
    pub fn rotate(&mut self, delta: f64, current: Qnh) -> Option<Qnh> {
        self.step(delta).map(|amount| current.offset(amount))
    }
}

/// The inclusive range of settings offered for selection.
///
/// ```rust
/// use altimetry::{Qnh, QnhRange};
///
/// let range = QnhRange::default();
/// assert_eq!(range.len(), 291);
/// assert_eq!(range.default_index(), Some(182));
/// assert_eq!(range.value_at(182), Some(Qnh::new(2992)));
/// assert_eq!(range.index_of(Qnh::new(2810)), Some(0));
/// assert_eq!(range.value_at(291), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QnhRange {
    min: Qnh,
    max: Qnh,
}

impl Default for QnhRange {
    fn default() -> Self {
        QnhRange::new(Qnh::new(2810), Qnh::new(3100))
    }
}

impl QnhRange {
    /// A range from `min` to `max`, both included. Reversed bounds are swapped.
    pub fn new(min: Qnh, max: Qnh) -> Self {
        if min <= max {
            QnhRange { min, max }
        } else {
            QnhRange { min: max, max: min }
        }
    }

    /// Lowest setting offered.
    #[inline]
    pub fn min(&self) -> Qnh {
        self.min
    }

    /// Highest setting offered.
    #[inline]
    pub fn max(&self) -> Qnh {
        self.max
    }

    /// Number of settings.
    pub fn len(&self) -> usize {
        (i64::from(self.max.hundredths()) - i64::from(self.min.hundredths()) + 1) as usize
    }

    /// Always false, a range holds at least one setting.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `qnh` can be selected.
    pub fn contains(&self, qnh: Qnh) -> bool {
        self.min <= qnh && qnh <= self.max
    }

    /// Every setting in ascending order.
    pub fn values(&self) -> impl Iterator<Item = Qnh> {
        (self.min.hundredths()..=self.max.hundredths()).map(Qnh::new)
    }

    /// The setting at a selection index.
    pub fn value_at(&self, index: usize) -> Option<Qnh> {
        if index >= self.len() {
            return None;
        }

        let value = i64::from(self.min.hundredths()) + i64::try_from(index).ok()?;
        i32::try_from(value).ok().map(Qnh::new)
    }

    /// The selection index of a setting.
    pub fn index_of(&self, qnh: Qnh) -> Option<usize> {
        if self.contains(qnh) {
            Some((i64::from(qnh.hundredths()) - i64::from(self.min.hundredths())) as usize)
        } else {
            None
        }
    }

    /// The index of standard pressure, if the range includes it.
    pub fn default_index(&self) -> Option<usize> {
        self.index_of(Qnh::new(STANDARD_QNH))
    }
}
