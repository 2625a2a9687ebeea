//! Distance units
//!
//! Distances are derived from echo round-trip times, assuming the speed of
//! sound at sea level and 20°C (343 m/s).

/// Unit of a reported or configured distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceUnit {
    Centimeters,
    Inches,
}

impl DistanceUnit {
    /// Echo round-trip time in microseconds for one unit of distance
    pub const fn round_trip_micros(self) -> u32 {
        match self {
            DistanceUnit::Centimeters => 58,
            DistanceUnit::Inches => 148,
        }
    }

    /// Converts a round-trip time to a distance, truncating
    pub const fn from_round_trip(self, micros: u32) -> u32 {
        micros / self.round_trip_micros()
    }

    /// Converts a distance to its round-trip time. Non-positive distances map to 0.
    pub const fn to_round_trip(self, distance: i32) -> u32 {
        if distance <= 0 {
            return 0;
        }
        (distance as u32).saturating_mul(self.round_trip_micros())
    }

    /// Largest distance reportable for a given maximum travel time.
    ///
    /// A reading equal to this value means nothing was detected in range.
    pub const fn max_distance(self, max_travel_time: u32) -> u32 {
        self.from_round_trip(max_travel_time)
    }
}
