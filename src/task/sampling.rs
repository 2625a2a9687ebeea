//! Sampling loop
//!
//! Once per pulse interval:
//! 1. Update the window and median, evaluate observers (see [`SensorState::sample`])
//! 2. Send the next trigger pulse
//! 3. Sleep until the next interval
//!
//! The sleep is the only point where the loop yields, so echo capture and
//! other tasks run in between.
//!
//! [`SensorState::sample`]: crate::system::state::SensorState::sample

use crate::system::rangefinder::Rangefinder;
use crate::task::pulse_trigger::trigger_pulse;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Instant, Timer};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

pub async fn sample_loop<M, T, D>(rangefinder: &Rangefinder<M>, trigger: &mut T, delay: &mut D)
where
    M: RawMutex,
    T: OutputPin,
    D: DelayNs,
{
    let interval = rangefinder.config().pulse_interval;
    loop {
        let median = rangefinder.sample(Instant::now());
        trace!("median round trip {} us", median);

        if trigger_pulse(trigger, delay).is_err() {
            warn!("failed to drive trigger pin");
        }

        Timer::after(interval).await;
    }
}
