// JumpWatch — Environmental Smoothing
//
// Temperature and humidity each get a zero-initialised ring of the last
// `MOVING_AVERAGE_SIZE` readings. The average is always taken over the full
// ring, so the first few updates after boot are pulled towards zero.

use crate::config::*;
use crate::events::{EnvAverage, EnvReading};
use crate::ring_buffer::RingBuffer;

#[derive(Debug, Clone, Default)]
pub struct EnvironmentalSmoother {
    temperature: RingBuffer<f32, MOVING_AVERAGE_SIZE>,
    humidity: RingBuffer<f32, MOVING_AVERAGE_SIZE>,
}

impl EnvironmentalSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one reading and return the averages over both rings.
    pub fn update(&mut self, reading: EnvReading) -> EnvAverage {
        self.temperature.push(reading.temperature);
        self.humidity.push(reading.humidity);
        self.average()
    }

    pub fn average(&self) -> EnvAverage {
        EnvAverage {
            temperature: self.temperature.mean(),
            humidity: self.humidity.mean(),
        }
    }
}

/// Decides when the environment sensor is due for another read.
///
/// Starts at 0, so the first check at or after `interval_ms` since boot fires.
#[derive(Debug, Clone)]
pub struct EnvUpdateGate {
    interval_ms: u32,
    last_ms: u32,
}

impl Default for EnvUpdateGate {
    fn default() -> Self {
        Self::new(ENV_UPDATE_INTERVAL_MS)
    }
}

impl EnvUpdateGate {
    pub fn new(interval_ms: u32) -> Self {
        Self { interval_ms, last_ms: 0 }
    }

    /// `true` when the interval has elapsed; the gate then restarts from `now_ms`.
    pub fn due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}
