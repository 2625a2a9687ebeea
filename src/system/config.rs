//! Ranging configuration
//!
//! # Timing
//! - A trigger pulse is sent every 145ms. The HC-SR04 needs at least 60ms
//!   between cycles, the extra time lets echoes from far walls die out.
//! - An echo is considered missing once the newest sample is older than one
//!   pulse interval plus 10ms of grace.
//!
//! # Range
//! - Echoes longer than the round trip for 300cm are discarded.
//! - Missing echoes are recorded as exactly that round trip, so "no object"
//!   reads as the maximum distance.

use crate::system::unit::DistanceUnit;
use embassy_time::Duration;

/// Number of samples the median filter runs over (3 rejects a single outlier
/// while following real changes within two pulses)
pub const WINDOW_CAPACITY: usize = 3;

/// Maximum number of detection thresholds per sensor
pub const MAX_OBSERVERS: usize = 8;

/// Sensor timing and range settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Time between trigger pulses
    pub pulse_interval: Duration,
    /// Extra time allowed for an echo before it counts as missing
    pub echo_grace: Duration,
    /// Maximum supported range in centimeters
    pub max_distance_cm: u32,
}

impl Config {
    pub const DEFAULT: Config = Config {
        pulse_interval: Duration::from_millis(145),
        echo_grace: Duration::from_millis(10),
        max_distance_cm: 300,
    };

    /// Round-trip time in microseconds for the maximum range
    pub const fn max_travel_time(&self) -> u32 {
        self.max_distance_cm
            .saturating_mul(DistanceUnit::Centimeters.round_trip_micros())
    }

    /// Age after which the newest sample means the last echo went missing
    pub fn echo_timeout(&self) -> Duration {
        self.pulse_interval + self.echo_grace
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
