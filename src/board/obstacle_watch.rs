//! Obstacle Detection
//!
//! Watches for objects coming closer than a fixed distance and logs each
//! approach. Thanks to the observer hysteresis an object standing right at
//! the threshold is reported once, not on every measurement.

use crate::board::ranging::RANGEFINDER;
use defmt::{info, warn};
use echo_ranger::DistanceUnit;

/// Distance at which obstacles are reported (22cm gives a robot time to react)
const OBSTACLE_DISTANCE_CM: i32 = 22;

#[embassy_executor::task]
pub async fn obstacle_watch() {
    let mut detections = match RANGEFINDER.on_object_detected(OBSTACLE_DISTANCE_CM, DistanceUnit::Centimeters) {
        Ok(Some(detections)) => detections,
        Ok(None) => {
            warn!("Obstacle distance must be positive");
            return;
        }
        Err(e) => {
            warn!("Cannot watch for obstacles: {}", e);
            return;
        }
    };

    info!("Watching for obstacles within {} cm", OBSTACLE_DISTANCE_CM);
    loop {
        detections.wait().await;
        info!(
            "Obstacle detected at {} cm",
            RANGEFINDER.get_distance(DistanceUnit::Centimeters)
        );
    }
}
