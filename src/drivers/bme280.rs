// JumpWatch — BME280 Environment Sensor Driver
//
// Reads the factory trim once at init, then converts each measurement burst
// with the compensation code in `jumpwatch::bme280`.

use std::thread;
use std::time::Duration;

use anyhow::Context;

use jumpwatch::bme280::{
    parse_raw, Bme280Calibration, CALIB_BLOCK_A_LEN, CALIB_BLOCK_B_LEN, RAW_BURST_LEN,
};
use jumpwatch::config::*;
use jumpwatch::events::EnvReading;
use jumpwatch::hal::EnvSource;

use super::{lock, SharedBus};

// BME280 register addresses
const REG_CALIB_A: u8 = 0x88;
const REG_CHIP_ID: u8 = 0xD0;
const REG_RESET: u8 = 0xE0;
const REG_CALIB_B: u8 = 0xE1;
const REG_CTRL_HUM: u8 = 0xF2;
const REG_STATUS: u8 = 0xF3;
const REG_CTRL_MEAS: u8 = 0xF4;
const REG_CONFIG: u8 = 0xF5;
const REG_DATA: u8 = 0xF7; // Start of 8-byte press/temp/hum burst

const CHIP_ID_EXPECTED: u8 = 0x60;
const RESET_COMMAND: u8 = 0xB6;
const STATUS_IM_UPDATE: u8 = 0x01;

pub struct Bme280 {
    bus: SharedBus,
    calibration: Bme280Calibration,
}

impl Bme280 {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            calibration: Bme280Calibration::default(),
        }
    }

    fn read_register(&self, reg: u8, buf: &mut [u8]) -> anyhow::Result<()> {
        let mut bus = lock(self.bus)?;
        bus.write_read(I2C_ADDR_BME280, &[reg], buf, I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    fn write_register(&self, reg: u8, value: u8) -> anyhow::Result<()> {
        let mut bus = lock(self.bus)?;
        bus.write(I2C_ADDR_BME280, &[reg, value], I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    /// Probe, reset, load trim, and start continuous measurement.
    pub fn init(&mut self) -> anyhow::Result<()> {
        let mut id = [0u8; 1];
        self.read_register(REG_CHIP_ID, &mut id)
            .context("Could not find a valid BME280 sensor, check wiring!")?;
        if id[0] != CHIP_ID_EXPECTED {
            anyhow::bail!("BME280 chip id 0x{:02X}, expected 0x{:02X}", id[0], CHIP_ID_EXPECTED);
        }

        self.write_register(REG_RESET, RESET_COMMAND)?;
        thread::sleep(Duration::from_millis(10));

        // Wait for the NVM trim copy to finish.
        let mut status = [STATUS_IM_UPDATE];
        while status[0] & STATUS_IM_UPDATE != 0 {
            thread::sleep(Duration::from_millis(1));
            self.read_register(REG_STATUS, &mut status)?;
        }

        let mut block_a = [0u8; CALIB_BLOCK_A_LEN];
        let mut block_b = [0u8; CALIB_BLOCK_B_LEN];
        self.read_register(REG_CALIB_A, &mut block_a)?;
        self.read_register(REG_CALIB_B, &mut block_b)?;
        self.calibration = Bme280Calibration::parse(&block_a, &block_b);

        // Humidity ×1 (only latched by the following ctrl_meas write)
        self.write_register(REG_CTRL_HUM, 0x01)?;
        // Standby 1000 ms, IIR filter off
        self.write_register(REG_CONFIG, 0xA0)?;
        // Temperature ×1, pressure ×1, normal mode
        self.write_register(REG_CTRL_MEAS, 0x27)?;

        log::info!("BME280 initialised (T×1, H×1, normal mode)");
        Ok(())
    }
}

impl EnvSource for Bme280 {
    fn read_env(&mut self) -> anyhow::Result<EnvReading> {
        let mut burst = [0u8; RAW_BURST_LEN];
        self.read_register(REG_DATA, &mut burst)?;

        let raw = parse_raw(&burst);
        let (temperature, t_fine) = self.calibration.compensate_temperature(raw.adc_t);
        let humidity = self.calibration.compensate_humidity(raw.adc_h, t_fine);

        Ok(EnvReading { temperature, humidity })
    }
}
