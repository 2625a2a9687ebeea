//! Continuous ultrasonic ranging for HC-SR04 style sensors
//!
//! A [`Rangefinder`] triggers the sensor every pulse interval, collects echo
//! round-trip times in a small sliding window and keeps the median of that
//! window as its distance estimate. Missing echoes count as "out of range",
//! so the estimate decays to the maximum distance when nothing is in front of
//! the sensor.
//!
//! Callers can query the current distance at any time, or register a
//! threshold with [`Rangefinder::on_object_detected`] and wait for detection
//! events. Each threshold fires once per approach and re-arms only after the
//! object has moved back out of range.
//!
//! ```ignore
//! static RANGEFINDER: Rangefinder<CriticalSectionRawMutex> = Rangefinder::new(Config::DEFAULT);
//!
//! if let Some(ranging) = RANGEFINDER.connect(trigger, echo, Delay) {
//!     ranging.run().await;
//! }
//! ```

#![cfg_attr(not(test), no_std)]

// must be first so the log macros are visible to the modules below
mod fmt;

pub mod system;
pub mod task;

pub use system::config::Config;
pub use system::error::Error;
pub use system::event::{Detection, DetectionSubscriber};
pub use system::rangefinder::Rangefinder;
pub use system::unit::DistanceUnit;
pub use task::ranging::Ranging;
