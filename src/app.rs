// JumpWatch — Polling Loop State
//
// Owns every piece of mutable state the device has (calibration offset, jump
// detector, smoothing rings, interval gate) plus the four devices, and steps
// them once per loop iteration. Order inside one step is fixed: accelerometer
// first, then the environment interval check, both against the same `now`.

use std::time::Duration;

use crate::calibration::CalibrationOffset;
use crate::config::*;
use crate::events::{EnvAverage, JumpEvent};
use crate::hal::{AccelSource, Actuator, EnvSource, PresentationAdapter};
use crate::jump::JumpDetector;
use crate::smoothing::{EnvUpdateGate, EnvironmentalSmoother};

/// What a single [`JumpWatch::poll`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PollOutcome {
    pub jump: Option<JumpEvent>,
    pub env: Option<EnvAverage>,
}

pub struct JumpWatch<A, E, P, V> {
    accel: A,
    env: E,
    display: P,
    motor: V,

    offset: CalibrationOffset,
    detector: JumpDetector,
    smoother: EnvironmentalSmoother,
    env_gate: EnvUpdateGate,
    vibration: Duration,
}

impl<A, E, P, V> JumpWatch<A, E, P, V>
where
    A: AccelSource,
    E: EnvSource,
    P: PresentationAdapter,
    V: Actuator,
{
    pub fn new(accel: A, env: E, display: P, motor: V, offset: CalibrationOffset) -> Self {
        Self {
            accel,
            env,
            display,
            motor,
            offset,
            detector: JumpDetector::default(),
            smoother: EnvironmentalSmoother::new(),
            env_gate: EnvUpdateGate::default(),
            vibration: Duration::from_millis(VIBRATION_DURATION_MS),
        }
    }

    pub fn offset(&self) -> CalibrationOffset {
        self.offset
    }

    pub fn detector(&self) -> &JumpDetector {
        &self.detector
    }

    /// Draw the static boot screen.
    pub fn show_boot_screen(&mut self) -> anyhow::Result<()> {
        self.display.render_boot(self.detector.goal())
    }

    /// One loop iteration at `now_ms`.
    pub fn poll(&mut self, now_ms: u32) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        // ---- Jump detection ----
        match self.accel.read_accel() {
            Ok(raw) => {
                let z = self.offset.apply(raw).z;
                outcome.jump = self.detector.on_sample(z, now_ms);
                match outcome.jump {
                    Some(JumpEvent::JumpCompleted { count }) => {
                        log::info!("Jump detected! Total jumps: {}", count);
                        self.show_jumps(count);
                    }
                    Some(JumpEvent::GoalReached) => self.celebrate(),
                    None => {}
                }
            }
            Err(e) => log::warn!("IMU read error: {}", e),
        }

        // ---- Environment ----
        if self.env_gate.due(now_ms) {
            match self.env.read_env() {
                Ok(reading) => {
                    let avg = self.smoother.update(reading);
                    if let Err(e) = self.display.render_environment(avg) {
                        log::error!("Display error: {}", e);
                    }
                    log::info!(
                        "Temperature: {:.1} C, Humidity: {:.1} %",
                        avg.temperature,
                        avg.humidity
                    );
                    outcome.env = Some(avg);
                }
                Err(e) => log::warn!("BME280 read error: {}", e),
            }
        }

        outcome
    }

    /// Goal hit: show the full count, buzz (blocking), then show zero.
    fn celebrate(&mut self) {
        let goal = self.detector.goal();
        log::info!("Jump detected! Total jumps: {}", goal);
        self.show_jumps(goal);

        log::info!("Goal of {} jumps reached, vibrating", goal);
        if let Err(e) = self.motor.pulse(self.vibration) {
            log::error!("Vibration motor error: {}", e);
        }

        self.show_jumps(0);
    }

    fn show_jumps(&mut self, count: u32) {
        if let Err(e) = self.display.render_jump_count(count) {
            log::error!("Display error: {}", e);
        }
    }
}
