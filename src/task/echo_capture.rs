//! Echo capture
//!
//! The echo pin goes high when the burst leaves the sensor and low again
//! when the reflection comes back (or the sensor gives up after ~38ms). The
//! length of that high pulse is the round-trip time.
//!
//! Only complete pulses count: capture waits for a rising edge, so a pulse
//! that was already in progress when capture started is skipped.

use crate::system::rangefinder::Rangefinder;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::digital::Wait;

/// Back-off after an echo pin error
const ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// Waits for one complete high pulse and returns its length in microseconds
pub async fn measure_pulse<E: Wait>(echo: &mut E) -> Result<u32, E::Error> {
    echo.wait_for_rising_edge().await?;
    let start = Instant::now();
    echo.wait_for_falling_edge().await?;
    let elapsed = Instant::now() - start;
    Ok(u32::try_from(elapsed.as_micros()).unwrap_or(u32::MAX))
}

/// Feeds every echo pulse into the rangefinder's sample window
pub async fn echo_capture<M: RawMutex, E: Wait>(rangefinder: &Rangefinder<M>, echo: &mut E) {
    loop {
        match measure_pulse(echo).await {
            Ok(duration) => {
                rangefinder.record_echo(Instant::now(), duration);
            }
            Err(_) => {
                warn!("echo pin read failed");
                Timer::after(ERROR_BACKOFF).await;
            }
        }
    }
}
