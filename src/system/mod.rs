//! Core ranging state, filtering and detection events
pub mod config;
pub mod error;
pub mod event;
pub mod median;
pub mod observer;
pub mod rangefinder;
pub mod state;
pub mod unit;
