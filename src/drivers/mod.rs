// JumpWatch — Device Drivers
//
// All three I2C devices hang off one bus, shared through a `'static` mutex.

pub mod bme280;
pub mod display;
pub mod haptic;
pub mod imu;

use std::sync::{Mutex, MutexGuard};

use esp_idf_hal::i2c::I2cDriver;

/// Thread-safe handle to a shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

/// Lock the bus, turning a poisoned mutex into an error instead of a panic.
pub fn lock(bus: SharedBus) -> anyhow::Result<MutexGuard<'static, I2cDriver<'static>>> {
    bus.lock().map_err(|_| anyhow::anyhow!("I2C bus mutex poisoned"))
}
