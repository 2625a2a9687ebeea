//! Rangefinder handle
//!
//! Owns the state of one ultrasonic sensor and is the entry point for
//! everything a caller does with it:
//! - [`connect`](Rangefinder::connect) wires the pins and hands out the ranging loop
//! - [`get_distance`](Rangefinder::get_distance) and friends query the filtered distance
//! - [`on_object_detected`](Rangefinder::on_object_detected) registers a detection threshold
//!
//! The handle is `const` constructible, so firmware can keep one in a
//! `static` and share it between tasks:
//!
//! ```ignore
//! static RANGEFINDER: Rangefinder<CriticalSectionRawMutex> = Rangefinder::new(Config::DEFAULT);
//! ```
//!
//! The sensor state is created on the first `connect` or
//! `on_object_detected`. Before that, queries return their "not configured"
//! values.

use crate::system::config::{Config, MAX_OBSERVERS};
use crate::system::error::Error;
use crate::system::event::DetectionSubscriber;
use crate::system::state::SensorState;
use crate::system::unit::DistanceUnit;
use crate::task::ranging::Ranging;
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::digital::Wait;
use heapless::Vec;

/// One ultrasonic sensor
pub struct Rangefinder<M: RawMutex> {
    config: Config,
    state: Mutex<M, RefCell<Option<SensorState>>>,
    /// Wake-up per observer slot, raised when that observer fires
    detections: [Signal<M, ()>; MAX_OBSERVERS],
    stop: Signal<M, ()>,
}

impl<M: RawMutex> Rangefinder<M> {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            state: Mutex::new(RefCell::new(None)),
            detections: [const { Signal::new() }; MAX_OBSERVERS],
            stop: Signal::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Connects the sensor pins.
    ///
    /// Returns the ranging loop on the first call; the caller runs it with
    /// [`Ranging::run`]. Later calls leave the existing wiring alone and
    /// return `None`.
    pub fn connect<T, E, D>(&self, trigger: T, echo: E, delay: D) -> Option<Ranging<'_, M, T, E, D>>
    where
        T: OutputPin,
        E: Wait,
        D: DelayNs,
    {
        if !self.with_state(SensorState::wire_trigger) {
            debug!("ultrasonic sensor already connected");
            return None;
        }
        self.stop.reset();
        info!(
            "ultrasonic sensor connected, max range {} cm",
            self.config.max_distance_cm
        );
        Some(Ranging::new(self, trigger, echo, delay))
    }

    /// Whether a sensor has been connected
    pub fn is_connected(&self) -> bool {
        self.read_state(SensorState::is_trigger_wired).unwrap_or(false)
    }

    /// Registers a detection threshold at `distance`.
    ///
    /// The returned subscriber yields a [`Detection`] each time the filtered
    /// distance comes within `distance`. It fires again only after the object
    /// has moved out past `distance` first. Detections wait for the subscriber
    /// until taken, and every subscriber only sees its own observer, even when
    /// several share a threshold. A non-positive distance registers nothing
    /// and returns `Ok(None)`.
    pub fn on_object_detected(
        &self,
        distance: i32,
        unit: DistanceUnit,
    ) -> Result<Option<DetectionSubscriber<'_, M>>, Error> {
        let threshold = unit.to_round_trip(distance);
        if threshold == 0 {
            debug!("ignoring observer at non-positive distance {}", distance);
            return Ok(None);
        }

        let slot = self.with_state(|state| state.register_observer(threshold))?;

        info!("observer {} armed at {} us", slot, threshold);
        Ok(Some(DetectionSubscriber::new(self, slot, threshold)))
    }

    /// Filtered distance, or `None` before the sensor is configured.
    ///
    /// The maximum distance means nothing was detected within range.
    pub fn distance(&self, unit: DistanceUnit) -> Option<u32> {
        self.median_round_trip()
            .map(|median| unit.from_round_trip(median))
    }

    /// Filtered distance, or `-1` before the sensor is configured
    pub fn get_distance(&self, unit: DistanceUnit) -> i32 {
        self.distance(unit).map_or(-1, |distance| distance as i32)
    }

    /// Whether the filtered distance is below `distance`. `false` before the
    /// sensor is configured.
    pub fn is_distance_less_than(&self, distance: i32, unit: DistanceUnit) -> bool {
        self.distance(unit)
            .is_some_and(|current| (current as i64) < distance as i64)
    }

    /// Median round-trip time in microseconds
    pub fn median_round_trip(&self) -> Option<u32> {
        self.read_state(SensorState::median_round_trip)
    }

    /// Stops a running ranging loop
    pub fn stop(&self) {
        self.stop.signal(());
    }

    pub(crate) async fn stopped(&self) {
        self.stop.wait().await
    }

    pub(crate) fn record_echo(&self, now: Instant, duration: u32) -> bool {
        self.with_state(|state| state.record_echo(now, duration))
    }

    /// Runs one sampling step and wakes the subscribers of every observer that fired
    pub(crate) fn sample(&self, now: Instant) -> u32 {
        let mut fired: Vec<(usize, u32), MAX_OBSERVERS> = Vec::new();
        let median = self.with_state(|state| {
            state.sample(now, |slot, threshold| {
                // at most one entry per observer
                let _ = fired.push((slot, threshold));
            })
        });

        for (slot, threshold) in fired {
            info!("object within {} us (median {} us)", threshold, median);
            self.detections[slot].signal(());
        }
        median
    }

    pub(crate) fn take_detection(&self, slot: usize) -> Option<u32> {
        self.with_state(|state| state.take_detection(slot))
    }

    pub(crate) async fn detection_raised(&self, slot: usize) {
        self.detections[slot].wait().await
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SensorState) -> R) -> R {
        self.state.lock(|cell| {
            let mut state = cell.borrow_mut();
            f(state.get_or_insert_with(|| SensorState::new(&self.config)))
        })
    }

    fn read_state<R>(&self, f: impl FnOnce(&SensorState) -> R) -> Option<R> {
        self.state.lock(|cell| cell.borrow().as_ref().map(f))
    }
}
