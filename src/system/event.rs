//! Detection events
//!
//! Every observer slot of a rangefinder has its own wake-up [`Signal`]. The
//! sampling loop counts a detection on the observer that fired and signals
//! its slot. The matching [`DetectionSubscriber`] then takes the detections
//! one at a time, so observers never share a queue and a detection stays
//! pending until its own handler gets to it.
//!
//! [`Signal`]: embassy_sync::signal::Signal

use crate::system::rangefinder::Rangefinder;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// An object came within an observer's threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Detection {
    /// Threshold of the observer that fired, as round-trip time in microseconds
    pub threshold: u32,
}

/// Receives the detections of a single observer
pub struct DetectionSubscriber<'a, M: RawMutex> {
    rangefinder: &'a Rangefinder<M>,
    slot: usize,
    threshold: u32,
}

impl<'a, M: RawMutex> DetectionSubscriber<'a, M> {
    pub(crate) fn new(rangefinder: &'a Rangefinder<M>, slot: usize, threshold: u32) -> Self {
        Self {
            rangefinder,
            slot,
            threshold,
        }
    }

    /// Threshold this subscriber listens for, as round-trip time in microseconds
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Waits for the next detection of this observer
    pub async fn wait(&mut self) -> Detection {
        loop {
            if let Some(detection) = self.try_next() {
                return detection;
            }
            // a signal raised after the check above is kept until this wait
            self.rangefinder.detection_raised(self.slot).await;
        }
    }

    /// Returns a pending detection of this observer, if any
    pub fn try_next(&mut self) -> Option<Detection> {
        self.rangefinder
            .take_detection(self.slot)
            .map(|threshold| Detection { threshold })
    }
}
