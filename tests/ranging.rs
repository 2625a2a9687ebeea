//! Runs the full ranging loop against fake pins on the host clock

mod common;

use common::{CountingTrigger, NoDelay, ScriptedEcho};
use echo_ranger::{Config, Detection, DistanceUnit, Rangefinder};
use embassy_futures::block_on;
use embassy_futures::join::join;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Timer};

fn rangefinder() -> Rangefinder<CriticalSectionRawMutex> {
    Rangefinder::new(Config::DEFAULT)
}

/// Runs `future` next to ranging, then stops ranging
fn run_for<F: core::future::Future>(
    rangefinder: &Rangefinder<CriticalSectionRawMutex>,
    trigger: CountingTrigger,
    echo: ScriptedEcho,
    future: F,
) -> F::Output {
    let ranging = rangefinder
        .connect(trigger, echo, NoDelay)
        .expect("first connect wires the sensor");

    let (_, output) = block_on(join(ranging.run(), async {
        let output = future.await;
        rangefinder.stop();
        output
    }));
    output
}

#[test]
fn silent_echo_reads_max_range() {
    let rangefinder = rangefinder();
    let trigger = CountingTrigger::default();

    run_for(
        &rangefinder,
        trigger.clone(),
        ScriptedEcho::silent(),
        Timer::after(Duration::from_millis(600)),
    );

    assert!(trigger.pulses() >= 3, "only {} pulses", trigger.pulses());
    assert!(!trigger.is_high());
    assert_eq!(rangefinder.get_distance(DistanceUnit::Centimeters), 300);
    assert!(!rangefinder.is_distance_less_than(300, DistanceUnit::Centimeters));
}

#[test]
fn steady_echo_is_measured_and_detected() {
    let rangefinder = rangefinder();
    let mut subscriber = rangefinder
        .on_object_detected(100, DistanceUnit::Centimeters)
        .unwrap()
        .unwrap();

    // an object at ~20 cm, echoing every 50 ms
    let detected = run_for(
        &rangefinder,
        CountingTrigger::default(),
        ScriptedEcho::every(50, 1160),
        async {
            match select(subscriber.wait(), Timer::after(Duration::from_secs(2))).await {
                Either::First(detection) => Some(detection),
                Either::Second(()) => None,
            }
        },
    );

    assert_eq!(detected, Some(Detection { threshold: 100 * 58 }));
    let distance = rangefinder.get_distance(DistanceUnit::Centimeters);
    assert!((20..100).contains(&distance), "distance {distance} cm");
    assert!(rangefinder.is_distance_less_than(100, DistanceUnit::Centimeters));
    // still within range, so no second detection
    assert_eq!(subscriber.try_next(), None);
}

#[test]
fn stopped_sensor_stays_wired() {
    let rangefinder = rangefinder();
    run_for(
        &rangefinder,
        CountingTrigger::default(),
        ScriptedEcho::silent(),
        Timer::after(Duration::from_millis(50)),
    );

    assert!(rangefinder.is_connected());
    assert!(rangefinder
        .connect(CountingTrigger::default(), ScriptedEcho::silent(), NoDelay)
        .is_none());
    assert_eq!(rangefinder.get_distance(DistanceUnit::Inches), 117);
}
