//! Threshold observers
//!
//! Each observer watches the filtered round-trip time against one threshold:
//!
//! ```text
//!            median <= threshold (notify)
//!   Armed ─────────────────────────────────▶ Notified
//!     ▲                                         │
//!     └─────────────────────────────────────────┘
//!            median > threshold (silent)
//! ```
//!
//! An object hovering around the threshold therefore produces one detection
//! per approach instead of one per measurement.
//!
//! Every Armed → Notified transition is counted on the observer itself until
//! its subscriber takes it, so a handler that falls behind never loses one.

use crate::system::config::MAX_OBSERVERS;
use crate::system::error::Error;
use heapless::Vec;

/// Detection state of an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObserverState {
    /// Waiting for the object to come within the threshold
    Armed,
    /// Already fired, waiting for the object to leave again
    Notified,
}

/// A detection threshold with hysteresis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Observer {
    threshold: u32,
    state: ObserverState,
    pending: u16,
}

impl Observer {
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            state: ObserverState::Armed,
            pending: 0,
        }
    }

    /// Threshold as round-trip time in microseconds
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn state(&self) -> ObserverState {
        self.state
    }

    /// Detections not yet taken by the subscriber
    pub fn pending(&self) -> u16 {
        self.pending
    }

    /// Takes one pending detection
    pub fn take_pending(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    /// Feeds the latest median round-trip time.
    ///
    /// Returns `true` exactly on the Armed → Notified transition.
    pub fn update(&mut self, median_round_trip: u32) -> bool {
        match self.state {
            ObserverState::Armed if median_round_trip > 0 && median_round_trip <= self.threshold => {
                self.state = ObserverState::Notified;
                true
            }
            ObserverState::Notified if median_round_trip > self.threshold => {
                debug!("observer at {} us re-armed", self.threshold);
                self.state = ObserverState::Armed;
                false
            }
            _ => false,
        }
    }
}

/// Registered observers, in registration order
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    observers: Vec<Observer, MAX_OBSERVERS>,
}

impl ObserverRegistry {
    pub const fn new() -> Self {
        Self { observers: Vec::new() }
    }

    /// Adds an armed observer for `threshold` microseconds and returns its slot
    pub fn register(&mut self, threshold: u32) -> Result<usize, Error> {
        let slot = self.observers.len();
        self.observers
            .push(Observer::new(threshold))
            .map_err(|_| Error::ObserverCapacity { capacity: MAX_OBSERVERS })?;
        Ok(slot)
    }

    /// Updates every observer and calls `notify` with the slot and threshold
    /// of each one that fired
    pub fn evaluate(&mut self, median_round_trip: u32, mut notify: impl FnMut(usize, u32)) {
        for (slot, observer) in self.observers.iter_mut().enumerate() {
            if observer.update(median_round_trip) {
                observer.pending = observer.pending.saturating_add(1);
                notify(slot, observer.threshold());
            }
        }
    }

    /// Takes one pending detection of the observer in `slot`
    pub fn take_pending(&mut self, slot: usize) -> Option<u32> {
        let observer = self.observers.get_mut(slot)?;
        observer.take_pending().then(|| observer.threshold())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observer> {
        self.observers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u32 = 1160;

    fn fired(observer: &mut Observer, medians: &[u32]) -> usize {
        medians.iter().filter(|&&m| observer.update(m)).count()
    }

    #[test]
    fn fires_once_per_approach() {
        let mut observer = Observer::new(T);
        assert!(!observer.update(T + 1));
        assert!(observer.update(T));
        assert!(!observer.update(T - 1));
        assert!(!observer.update(T + 1));
        assert_eq!(observer.state(), ObserverState::Armed);
    }

    #[test]
    fn refires_after_leaving_range() {
        let mut observer = Observer::new(T);
        assert_eq!(fired(&mut observer, &[T, T - 5, T, T + 1, T - 1, T - 2]), 2);
        assert_eq!(observer.state(), ObserverState::Notified);
    }

    #[test]
    fn lingering_at_threshold_does_not_refire() {
        let mut observer = Observer::new(T);
        assert_eq!(fired(&mut observer, &[T; 10]), 1);
    }

    #[test]
    fn zero_median_never_fires() {
        let mut observer = Observer::new(T);
        assert!(!observer.update(0));
        assert_eq!(observer.state(), ObserverState::Armed);
    }

    #[test]
    fn registry_notifies_only_crossed_thresholds() {
        let mut registry = ObserverRegistry::new();
        registry.register(580).unwrap();
        registry.register(1160).unwrap();
        registry.register(5800).unwrap();

        let mut notified = std::vec::Vec::new();
        registry.evaluate(1000, |slot, threshold| notified.push((slot, threshold)));
        assert_eq!(notified, [(1, 1160), (2, 5800)]);

        notified.clear();
        registry.evaluate(500, |slot, threshold| notified.push((slot, threshold)));
        assert_eq!(notified, [(0, 580)]);

        let states: std::vec::Vec<_> = registry.iter().map(Observer::state).collect();
        assert_eq!(states, [ObserverState::Notified; 3]);
    }

    #[test]
    fn pending_detections_accumulate_until_taken() {
        let mut registry = ObserverRegistry::new();
        let slot = registry.register(T).unwrap();

        // two approaches before anyone looks
        for median in [T, T + 1, T - 1] {
            registry.evaluate(median, |_, _| {});
        }
        assert_eq!(registry.iter().next().map(Observer::pending), Some(2));
        assert_eq!(registry.take_pending(slot), Some(T));
        assert_eq!(registry.take_pending(slot), Some(T));
        assert_eq!(registry.take_pending(slot), None);
        assert_eq!(registry.take_pending(slot + 1), None);
    }

    #[test]
    fn shared_threshold_keeps_separate_slots() {
        let mut registry = ObserverRegistry::new();
        let first = registry.register(T).unwrap();
        let second = registry.register(T).unwrap();
        assert_ne!(first, second);

        registry.evaluate(T, |_, _| {});
        assert_eq!(registry.take_pending(first), Some(T));
        assert_eq!(registry.take_pending(first), None);
        assert_eq!(registry.take_pending(second), Some(T));
    }

    #[test]
    fn registry_is_bounded() {
        let mut registry = ObserverRegistry::new();
        for i in 0..MAX_OBSERVERS {
            assert_eq!(registry.register(100 + i as u32), Ok(i));
        }
        assert_eq!(
            registry.register(42),
            Err(Error::ObserverCapacity { capacity: MAX_OBSERVERS })
        );
        assert_eq!(registry.iter().count(), MAX_OBSERVERS);
    }
}
