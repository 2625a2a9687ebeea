//! Trigger pulse
//!
//! The HC-SR04 starts a ranging cycle on a high pulse of at least 10µs on its
//! trigger pin. The pin is pulled low first so the rising edge is clean.
//!
//! ```text
//!          ┌──────────┐
//!   ───────┘  10µs    └──────
//!     2µs
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Low time before the pulse
const RESET_HOLD_US: u32 = 2;

/// High time of the pulse
const PULSE_HOLD_US: u32 = 10;

/// Emits one trigger pulse. Busy-waits for the pulse timing.
pub fn trigger_pulse<T, D>(trigger: &mut T, delay: &mut D) -> Result<(), T::Error>
where
    T: OutputPin,
    D: DelayNs,
{
    trigger.set_low()?;
    delay.delay_us(RESET_HOLD_US);

    trigger.set_high()?;
    delay.delay_us(PULSE_HOLD_US);
    trigger.set_low()
}
