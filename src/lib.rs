// JumpWatch — Core Library
//
// Hardware-independent part of the jump-counter firmware: calibration, jump
// detection, environmental smoothing, BME280 compensation, and screen
// layout. Everything here builds and tests on the host; the ESP-IDF binary
// (`src/main.rs`) plugs real drivers into the traits in [`hal`].

pub mod app;
pub mod bme280;
pub mod calibration;
pub mod config;
pub mod events;
pub mod hal;
pub mod jump;
pub mod ring_buffer;
pub mod smoothing;
pub mod ui;
