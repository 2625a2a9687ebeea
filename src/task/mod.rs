//! Ranging tasks
pub mod echo_capture;
pub mod pulse_trigger;
pub mod ranging;
pub mod sampling;
