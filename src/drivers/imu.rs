// JumpWatch — MPU6050 IMU Driver
//
// Register-level driver over the shared I2C bus. Only the accelerometer is
// used; readings come out in m/s².

use anyhow::Context;

use jumpwatch::config::*;
use jumpwatch::events::Vector3;
use jumpwatch::hal::AccelSource;

use super::{lock, SharedBus};

// MPU6050 register addresses
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_CONFIG: u8 = 0x1A;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 6-byte accelerometer burst
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

pub struct Mpu6050 {
    bus: SharedBus,
}

impl Mpu6050 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let Ok(mut bus) = lock(self.bus) else {
            return false;
        };
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_MPU6050, &[REG_WHO_AM_I], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == WHO_AM_I_EXPECTED,
            Err(_) => false,
        }
    }

    /// Probe, wake the sensor, and select the ±8 g range.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if !self.is_connected() {
            anyhow::bail!("Failed to find MPU6050 chip");
        }

        let mut bus = lock(self.bus)?;

        // Wake up (clear SLEEP bit)
        bus.write(I2C_ADDR_MPU6050, &[REG_PWR_MGMT_1, 0x00], I2C_TIMEOUT_TICKS)
            .context("MPU6050 wake")?;

        // DLPF bandwidth 260 Hz: keep the jump spikes sharp
        bus.write(I2C_ADDR_MPU6050, &[REG_CONFIG, 0x00], I2C_TIMEOUT_TICKS)?;

        // Accelerometer: ±8 g
        bus.write(I2C_ADDR_MPU6050, &[REG_ACCEL_CONFIG, 0x10], I2C_TIMEOUT_TICKS)?;

        log::info!("MPU6050 initialised (±8g, DLPF 260Hz)");
        Ok(())
    }
}

impl AccelSource for Mpu6050 {
    /// Burst-read the three accelerometer axes and convert to m/s².
    fn read_accel(&mut self) -> anyhow::Result<Vector3> {
        let mut bus = lock(self.bus)?;
        let mut raw = [0u8; 6];
        bus.write_read(
            I2C_ADDR_MPU6050,
            &[REG_ACCEL_XOUT_H],
            &mut raw,
            I2C_TIMEOUT_TICKS,
        )?;

        let axis = |hi: u8, lo: u8| i16::from_be_bytes([hi, lo]) as f32 / ACCEL_SCALE_8G * STANDARD_GRAVITY;
        Ok(Vector3::new(
            axis(raw[0], raw[1]),
            axis(raw[2], raw[3]),
            axis(raw[4], raw[5]),
        ))
    }
}
