//! Distance sensor handling
//!
//! Owns the board's single rangefinder and runs its ranging loop.
//!
//! # Sensor Operation
//! - Trigger pulse every 145ms
//! - Echo pulses measured with GPIO edge interrupts
//! - Median over the last 3 round trips
//! - Missing echoes count as nothing within 300cm

use crate::board::resources::DistanceSensorResources;
use defmt::info;
use echo_ranger::{Config, Rangefinder};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;

/// The board's ultrasonic sensor, shared by all tasks
pub static RANGEFINDER: Rangefinder<CriticalSectionRawMutex> = Rangefinder::new(Config::DEFAULT);

/// Connects the HC-SR04 and measures until the rangefinder is stopped
#[embassy_executor::task]
pub async fn ranging(r: DistanceSensorResources) {
    // Trigger idles low, echo is driven by the sensor so no pull is needed
    let trigger = Output::new(r.trigger_pin, Level::Low);
    let echo = Input::new(r.echo_pin, Pull::None);

    match RANGEFINDER.connect(trigger, echo, Delay) {
        Some(ranging) => {
            ranging.run().await;
        }
        None => info!("Distance sensor already connected"),
    }
}
