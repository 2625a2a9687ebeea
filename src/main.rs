//! Ranging firmware entry point
//!
//! Initializes the RP2350, wires the HC-SR04 and spawns the ranging tasks.

#![no_std]
#![no_main]

use crate::board::{
    distance_report::distance_report, obstacle_watch::obstacle_watch, ranging::ranging,
    resources::{AssignedResources, DistanceSensorResources},
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Pin assignment and firmware tasks
mod board;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task
    let r = split_resources!(p);

    // Register the obstacle observer first so it is armed before the first measurement
    spawner.spawn(obstacle_watch()).unwrap();
    spawner.spawn(ranging(r.distance_sensor)).unwrap();
    spawner.spawn(distance_report()).unwrap();
}
