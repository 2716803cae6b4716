// JumpWatch — Vibration Motor Driver
//
// Simple GPIO-driven vibration motor.

use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use jumpwatch::hal::Actuator;

pub struct HapticDriver<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> HapticDriver<'d> {
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>) -> Self {
        Self { pin }
    }
}

impl Actuator for HapticDriver<'_> {
    /// Vibrate for `duration` (blocks the calling thread).
    fn pulse(&mut self, duration: Duration) -> anyhow::Result<()> {
        self.pin.set_high()?;
        thread::sleep(duration);
        self.pin.set_low()?;
        Ok(())
    }
}
