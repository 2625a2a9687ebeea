//! Ranging errors
//!
//! The sensor itself never fails: missing or bogus echoes are folded into
//! the measurement. Errors only come from running out of the fixed-size
//! storage used for detection observers.

use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// All observer slots are taken
    #[error("observer registry is full ({capacity} thresholds)")]
    ObserverCapacity { capacity: usize },
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ObserverCapacity { capacity } => {
                defmt::write!(fmt, "observer registry is full ({} thresholds)", capacity)
            }
        }
    }
}
