// JumpWatch — Firmware Entry Point
//
// Boot sequence:
//   1. Give the serial monitor a second to attach, then start logging.
//   2. Bring up the shared I2C bus.
//   3. Initialise the MPU6050 and calibrate it (device must lie still).
//   4. Initialise the BME280 and the SSD1306.
//   5. Draw the boot screen and start the jump loop.
//
// Any failure in steps 2-5 is fatal: the error is logged and the firmware
// halts forever. There is no retry and no degraded mode.

#[cfg(target_os = "espidf")]
mod drivers;
#[cfg(target_os = "espidf")]
mod tasks;

#[cfg(target_os = "espidf")]
use std::{sync::Mutex, thread, time::Duration};

#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::{OutputPin, PinDriver};
#[cfg(target_os = "espidf")]
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
#[cfg(target_os = "espidf")]
use esp_idf_hal::prelude::*;

#[cfg(target_os = "espidf")]
use jumpwatch::{app::JumpWatch, calibration::Calibrator, config::*};

#[cfg(target_os = "espidf")]
use crate::drivers::{
    bme280::Bme280, display::OledDisplay, haptic::HapticDriver, imu::Mpu6050, SharedBus,
};

// ---------------------------------------------------------------------------
// Utility: milliseconds since boot (wraps at ~49 days — callers use wrapping_sub)
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
pub fn now_ms() -> u32 {
    unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    thread::sleep(Duration::from_millis(SERIAL_SETTLE_MS));
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("JumpWatch firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = or_halt(Peripherals::take().map_err(Into::into), "Peripherals");

    // ---- I2C bus (shared between MPU6050, BME280 and OLED) ----------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = or_halt(
        I2cDriver::new(
            peripherals.i2c0,
            peripherals.pins.gpio4, // SDA
            peripherals.pins.gpio5, // SCL
            &i2c_config,
        )
        .map_err(Into::into),
        "I2C bus init",
    );
    // The bus lives for the whole programme (embedded firmware never exits).
    let i2c_bus: SharedBus = Box::leak(Box::new(Mutex::new(i2c)));

    // ---- Accelerometer + calibration --------------------------------------
    let mut imu = Mpu6050::new(i2c_bus);
    or_halt(imu.init(), "MPU6050 init");

    log::info!("Calibrating — keep the device still");
    let offset = or_halt(
        Calibrator::default().calibrate(&mut imu, CALIBRATION_SAMPLES),
        "MPU6050 calibration",
    );
    log::info!(
        "Calibration offsets: x={:.3} y={:.3} z={:.3}",
        offset.x,
        offset.y,
        offset.z
    );

    // ---- Environment sensor -----------------------------------------------
    let mut bme = Bme280::new(i2c_bus);
    or_halt(bme.init(), "BME280 init");

    // ---- Display ----------------------------------------------------------
    let mut display = OledDisplay::new(i2c_bus);
    or_halt(display.init(), "SSD1306 init");

    // ---- Vibration motor --------------------------------------------------
    let motor_pin = PinDriver::output(peripherals.pins.gpio1.downgrade_output())?;
    let motor = HapticDriver::new(motor_pin);

    // ---- Boot screen + loop -----------------------------------------------
    let mut watch = JumpWatch::new(imu, bme, display, motor, offset);
    or_halt(watch.show_boot_screen(), "Boot screen");
    log::info!("Boot complete — entering jump loop");

    // The main task stack is too small for the frame buffer plus formatting.
    thread::Builder::new()
        .name("jump".into())
        .stack_size(STACK_JUMP_LOOP)
        .spawn(move || tasks::jump_loop::jump_loop(watch))?;

    // Main thread has nothing left to do — park it forever.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// ---------------------------------------------------------------------------
// Boot helpers
// ---------------------------------------------------------------------------

/// Unwrap a boot step or halt with its error logged.
#[cfg(target_os = "espidf")]
fn or_halt<T>(result: anyhow::Result<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::error!("{} failed: {:#}", what, e);
            halt();
        }
    }
}

/// Stop here forever. Only a power cycle gets the device out.
#[cfg(target_os = "espidf")]
fn halt() -> ! {
    loop {
        thread::sleep(Duration::from_millis(HALT_POLL_MS));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!(
        "jumpwatch is ESP32-C3 firmware; build it for an ESP-IDF target \
         (e.g. --target riscv32imc-esp-espidf). The core library tests run on the host."
    );
}
