// JumpWatch — Accelerometer Bias Calibration
//
// Averages a burst of samples taken while the device lies still and turns the
// mean into a per-axis offset. The z offset keeps one g out of the mean, so a
// flat, resting device reads (0, 0, 1 g) once the offset is subtracted.
//
// Nothing checks that the device really was still: a calibration taken while
// moving simply produces a wrong offset.

use std::thread;
use std::time::Duration;

use crate::config::*;
use crate::events::Vector3;
use crate::hal::AccelSource;

/// Per-axis bias, computed once at boot and never changed afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalibrationOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CalibrationOffset {
    /// Mean of each axis, with `gravity` taken off the z mean.
    ///
    /// An empty sample set yields the zero offset.
    pub fn from_samples<I>(samples: I, gravity: f32) -> Self
    where
        I: IntoIterator<Item = Vector3>,
    {
        let mut sum = Vector3::default();
        let mut n: usize = 0;
        for s in samples {
            sum.x += s.x;
            sum.y += s.y;
            sum.z += s.z;
            n += 1;
        }

        if n == 0 {
            return Self::default();
        }

        let n = n as f32;
        Self {
            x: sum.x / n,
            y: sum.y / n,
            z: sum.z / n - gravity,
        }
    }

    /// Subtract the bias from a raw sample.
    pub fn apply(&self, raw: Vector3) -> Vector3 {
        raw - Vector3::new(self.x, self.y, self.z)
    }
}

pub struct Calibrator {
    sample_delay: Duration,
    gravity: f32,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(Duration::from_millis(CALIBRATION_SAMPLE_DELAY_MS), STANDARD_GRAVITY)
    }
}

impl Calibrator {
    pub fn new(sample_delay: Duration, gravity: f32) -> Self {
        Self { sample_delay, gravity }
    }

    /// Read `sample_count` samples (blocking `sample_delay` after each) and
    /// average them. Only a bus error can make this fail.
    pub fn calibrate<S: AccelSource + ?Sized>(
        &self,
        source: &mut S,
        sample_count: usize,
    ) -> anyhow::Result<CalibrationOffset> {
        let mut samples = Vec::with_capacity(sample_count);
        for _ in 0..sample_count {
            samples.push(source.read_accel()?);
            if !self.sample_delay.is_zero() {
                thread::sleep(self.sample_delay);
            }
        }

        let offset = CalibrationOffset::from_samples(samples, self.gravity);
        log::debug!(
            "Calibration offset x={:.3} y={:.3} z={:.3} ({} samples)",
            offset.x,
            offset.y,
            offset.z,
            sample_count
        );
        Ok(offset)
    }
}
