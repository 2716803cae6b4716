// JumpWatch — Sensor Samples & Detector Events

use core::ops::Sub;

// ---------------------------------------------------------------------------
// Acceleration sample (m/s², sensor frame)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ---------------------------------------------------------------------------
// Environment samples
// ---------------------------------------------------------------------------

/// One raw BME280 reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvReading {
    /// Degrees Celsius.
    pub temperature: f32,
    /// Relative humidity, percent.
    pub humidity: f32,
}

/// Moving average over the last few [`EnvReading`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvAverage {
    pub temperature: f32,
    pub humidity: f32,
}

// ---------------------------------------------------------------------------
// Jump Events — returned by the detector, acted on by the polling loop
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpEvent {
    /// A jump was confirmed; `count` is the running total since the last goal.
    JumpCompleted { count: u32 },
    /// The confirmed jump hit the goal. The counter is already back at zero.
    GoalReached,
}
