// JumpWatch — Device Seams
//
// The polling loop only talks to hardware through these traits. The firmware
// binary implements them on top of ESP-IDF drivers; tests implement them with
// scripted fakes.

use std::time::Duration;

use crate::events::{EnvAverage, EnvReading, Vector3};

/// Anything that can hand out one raw acceleration sample in m/s².
pub trait AccelSource {
    fn read_accel(&mut self) -> anyhow::Result<Vector3>;
}

/// Temperature / humidity sensor.
pub trait EnvSource {
    fn read_env(&mut self) -> anyhow::Result<EnvReading>;
}

/// Status screen. Each call redraws only its own region.
pub trait PresentationAdapter {
    /// Greeting, goal label, and zeroed placeholders.
    fn render_boot(&mut self, goal: u32) -> anyhow::Result<()>;
    fn render_jump_count(&mut self, count: u32) -> anyhow::Result<()>;
    fn render_environment(&mut self, avg: EnvAverage) -> anyhow::Result<()>;
}

/// Vibration motor.
pub trait Actuator {
    /// Switch on, hold for `duration` (blocking), switch off.
    fn pulse(&mut self, duration: Duration) -> anyhow::Result<()>;
}
