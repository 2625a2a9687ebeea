//! Sensor State
//!
//! Holds everything the sampling loop and the echo capture share:
//! - the sliding window of recent round-trip samples
//! - the last median round-trip time
//! - the registered threshold observers
//!
//! # Window policy
//! The window keeps [`WINDOW_CAPACITY`] samples at the start of each sampling
//! step, plus room for one echo captured between steps. Echoes arriving while
//! that extra slot is taken are dropped. The window is never empty: it starts
//! out with one "nothing in range" sample.
//!
//! # Sampling step
//! 1. If the newest sample is older than the echo timeout, a sample with the
//!    maximum travel time is appended (the echo went missing).
//! 2. The oldest samples are dropped down to [`WINDOW_CAPACITY`].
//! 3. The median is recomputed.
//! 4. Observers are evaluated against the new median.

use crate::system::config::{Config, WINDOW_CAPACITY};
use crate::system::error::Error;
use crate::system::median::lower_median;
use crate::system::observer::{Observer, ObserverRegistry};
use embassy_time::{Duration, Instant};
use heapless::{Deque, Vec};

/// Storage for the window, one slot more than the filter uses
pub const SAMPLE_SLOTS: usize = WINDOW_CAPACITY + 1;

/// One echo round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundTripSample {
    pub timestamp: Instant,
    /// Round-trip time in microseconds
    pub duration: u32,
}

/// Shared state of one ultrasonic sensor
#[derive(Debug)]
pub struct SensorState {
    trigger_wired: bool,
    window: Deque<RoundTripSample, SAMPLE_SLOTS>,
    median_round_trip: u32,
    observers: ObserverRegistry,
    max_travel_time: u32,
    echo_timeout: Duration,
}

impl SensorState {
    pub fn new(config: &Config) -> Self {
        let max_travel_time = config.max_travel_time();
        let mut window = Deque::new();
        // an empty deque always has room
        let _ = window.push_back(RoundTripSample {
            timestamp: Instant::from_ticks(0),
            duration: max_travel_time,
        });
        Self {
            trigger_wired: false,
            window,
            median_round_trip: max_travel_time,
            observers: ObserverRegistry::new(),
            max_travel_time,
            echo_timeout: config.echo_timeout(),
        }
    }

    /// Marks the trigger pin as connected. Returns `false` if it already was.
    pub fn wire_trigger(&mut self) -> bool {
        !core::mem::replace(&mut self.trigger_wired, true)
    }

    pub fn is_trigger_wired(&self) -> bool {
        self.trigger_wired
    }

    /// Last median round-trip time in microseconds
    pub fn median_round_trip(&self) -> u32 {
        self.median_round_trip
    }

    /// Samples in the window, oldest first
    pub fn window(&self) -> impl Iterator<Item = &RoundTripSample> {
        self.window.iter()
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn observers(&self) -> impl Iterator<Item = &Observer> {
        self.observers.iter()
    }

    /// Registers an observer and returns its slot
    pub fn register_observer(&mut self, threshold: u32) -> Result<usize, Error> {
        self.observers.register(threshold)
    }

    /// Takes one pending detection of the observer in `slot`, returning its threshold
    pub fn take_detection(&mut self, slot: usize) -> Option<u32> {
        self.observers.take_pending(slot)
    }

    /// Records a completed echo pulse.
    ///
    /// Returns `false` if the echo was discarded, either because it is too
    /// long to be a valid reading or because the window is already full.
    pub fn record_echo(&mut self, now: Instant, duration: u32) -> bool {
        if duration >= self.max_travel_time {
            trace!("discarding echo of {} us", duration);
            return false;
        }
        if self.window.len() > WINDOW_CAPACITY {
            trace!("window full, dropping echo of {} us", duration);
            return false;
        }
        self.push(RoundTripSample {
            timestamp: now,
            duration,
        });
        true
    }

    /// Runs one sampling step at `now` and returns the new median.
    ///
    /// `notify` is called with the slot and threshold of every observer that fired.
    pub fn sample(&mut self, now: Instant, notify: impl FnMut(usize, u32)) -> u32 {
        self.inject_timeout(now);
        self.trim();

        let mut durations: Vec<u32, SAMPLE_SLOTS> = self.window.iter().map(|s| s.duration).collect();
        if let Some(median) = lower_median(&mut durations) {
            self.median_round_trip = median;
        }

        self.observers.evaluate(self.median_round_trip, notify);
        self.median_round_trip
    }

    fn inject_timeout(&mut self, now: Instant) {
        let Some(deadline) = now.checked_sub(self.echo_timeout) else {
            return;
        };
        let missing = self
            .window
            .back()
            .map_or(true, |newest| newest.timestamp < deadline);
        if missing {
            trace!("no echo, assuming out of range");
            self.push(RoundTripSample {
                timestamp: now,
                duration: self.max_travel_time,
            });
        }
    }

    fn trim(&mut self) {
        while self.window.len() > WINDOW_CAPACITY {
            self.window.pop_front();
        }
    }

    fn push(&mut self, sample: RoundTripSample) {
        if self.window.is_full() {
            self.window.pop_front();
        }
        // room was made above
        let _ = self.window.push_back(sample);
    }
}
