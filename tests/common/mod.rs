//! Fake sensor pins for running the ranging loop on the host
#![allow(dead_code)]

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use embassy_time::{Duration, Timer};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::digital::Wait;

/// Trigger pin that counts the pulses it sends
#[derive(Clone, Default)]
pub struct CountingTrigger {
    pulses: Rc<Cell<usize>>,
    high: Rc<Cell<bool>>,
}

impl CountingTrigger {
    pub fn pulses(&self) -> usize {
        self.pulses.get()
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }
}

impl ErrorType for CountingTrigger {
    type Error = Infallible;
}

impl OutputPin for CountingTrigger {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high.get() {
            self.pulses.set(self.pulses.get() + 1);
        }
        self.high.set(true);
        Ok(())
    }
}

/// Echo pin that answers with a fixed pulse length at a fixed period,
/// or never answers at all
pub struct ScriptedEcho {
    echo: Option<(Duration, Duration)>,
}

impl ScriptedEcho {
    /// No object in front of the sensor
    pub fn silent() -> Self {
        Self { echo: None }
    }

    /// An object reflecting a pulse of `micros` every `period_ms`
    pub fn every(period_ms: u64, micros: u64) -> Self {
        Self {
            echo: Some((Duration::from_millis(period_ms), Duration::from_micros(micros))),
        }
    }
}

impl ErrorType for ScriptedEcho {
    type Error = Infallible;
}

impl Wait for ScriptedEcho {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.wait_for_rising_edge().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.wait_for_falling_edge().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        match self.echo {
            Some((period, _)) => {
                Timer::after(period).await;
                Ok(())
            }
            None => core::future::pending().await,
        }
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        match self.echo {
            Some((_, pulse)) => {
                Timer::after(pulse).await;
                Ok(())
            }
            None => core::future::pending().await,
        }
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_rising_edge().await
    }
}

/// Delay that returns immediately
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
