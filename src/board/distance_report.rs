//! Periodic distance logging

use crate::board::ranging::RANGEFINDER;
use defmt::info;
use echo_ranger::DistanceUnit;
use embassy_time::{Duration, Timer};

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[embassy_executor::task]
pub async fn distance_report() {
    let out_of_range = DistanceUnit::Centimeters.max_distance(RANGEFINDER.config().max_travel_time());
    loop {
        Timer::after(REPORT_INTERVAL).await;
        match RANGEFINDER.distance(DistanceUnit::Centimeters) {
            None => info!("Distance sensor not connected"),
            Some(cm) if cm >= out_of_range => info!("Nothing within {} cm", out_of_range),
            Some(cm) => {
                let inch = RANGEFINDER.get_distance(DistanceUnit::Inches);
                info!("Distance: {} cm / {} in", cm, inch);
            }
        }
    }
}
