//! Hardware Resource Management
//!
//! Assigns the RP2350 pins used by the firmware.
//!
//! # Resource Groups
//! - Distance Sensor: HC-SR04 trigger and echo pins
//!
//! The HC-SR04 runs on 5V. The echo pin must go through a voltage divider
//! before reaching the 3.3V GPIO, the trigger pin can be driven directly.

use assign_resources::assign_resources;
use embassy_rp::peripherals;

assign_resources! {
    /// HC-SR04 ultrasonic distance sensor pins
    distance_sensor: DistanceSensorResources {
       trigger_pin: PIN_15,
       echo_pin: PIN_14,
    },
}
