//! Ranging
//!
//! The running half of a connected rangefinder. Sampling and echo capture
//! run side by side in one future, so firmware needs only a single task:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn ranging(trigger: Output<'static>, echo: Input<'static>) {
//!     if let Some(ranging) = RANGEFINDER.connect(trigger, echo, Delay) {
//!         ranging.run().await;
//!     }
//! }
//! ```
//!
//! Ranging runs until [`Rangefinder::stop`] is called.

use crate::system::rangefinder::Rangefinder;
use crate::task::echo_capture::echo_capture;
use crate::task::sampling::sample_loop;
use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::digital::Wait;

/// Pins and timing of a connected sensor, ready to run
pub struct Ranging<'a, M: RawMutex, T, E, D> {
    rangefinder: &'a Rangefinder<M>,
    trigger: T,
    echo: E,
    delay: D,
}

impl<'a, M, T, E, D> Ranging<'a, M, T, E, D>
where
    M: RawMutex,
    T: OutputPin,
    E: Wait,
    D: DelayNs,
{
    pub(crate) fn new(rangefinder: &'a Rangefinder<M>, trigger: T, echo: E, delay: D) -> Self {
        Self {
            rangefinder,
            trigger,
            echo,
            delay,
        }
    }

    /// Measures continuously until the rangefinder is stopped.
    ///
    /// Returns the pins so they can be reused after a stop.
    pub async fn run(self) -> (T, E) {
        let Self {
            rangefinder,
            mut trigger,
            mut echo,
            mut delay,
        } = self;

        info!("ranging started");
        match select3(
            rangefinder.stopped(),
            sample_loop(rangefinder, &mut trigger, &mut delay),
            echo_capture(rangefinder, &mut echo),
        )
        .await
        {
            Either3::First(()) => info!("ranging stopped"),
            Either3::Second(()) | Either3::Third(()) => {}
        }

        // leave the sensor idle
        let _ = trigger.set_low();
        (trigger, echo)
    }
}
