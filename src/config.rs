// JumpWatch — Hardware & System Configuration
// Target: ESP32-C3 (RISC-V), MPU6050 + BME280 + SSD1306 on one I2C bus.
//
// Every threshold is fixed at compile time; nothing here is tunable at runtime.

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_I2C_SDA: i32 = 4;    // I2C data line (shared by all three devices)
pub const PIN_I2C_SCL: i32 = 5;    // I2C clock line
pub const PIN_VIBRATION: i32 = 1;  // Vibration motor driver (active HIGH)

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_MPU6050: u8 = 0x68;
pub const I2C_ADDR_BME280: u8 = 0x76;
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_BAUDRATE_KHZ: u32 = 400;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024
pub const DISPLAY_ROTATED: bool = true; // panel is mounted upside down
pub const GREETING: &str = "Hello! Jingyi";

// ---------------------------------------------------------------------------
// Jump Detection
// ---------------------------------------------------------------------------
pub const JUMP_THRESHOLD: f32 = 1.5;    // m/s², compared against calibrated z
pub const DEBOUNCE_TIME_MS: u32 = 500;  // quiet window after a confirmed jump
pub const JUMP_GOAL: u32 = 5;           // jumps per vibration reward

// ---------------------------------------------------------------------------
// Calibration
// ---------------------------------------------------------------------------
pub const CALIBRATION_SAMPLES: usize = 100;
pub const CALIBRATION_SAMPLE_DELAY_MS: u64 = 10; // ~1 second total
pub const STANDARD_GRAVITY: f32 = 9.81;          // m/s²

// ---------------------------------------------------------------------------
// Environment (BME280)
// ---------------------------------------------------------------------------
pub const ENV_UPDATE_INTERVAL_MS: u32 = 2000;
pub const MOVING_AVERAGE_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const VIBRATION_DURATION_MS: u64 = 4000; // loop is suspended while the motor runs
pub const SERIAL_SETTLE_MS: u64 = 1000;
pub const HALT_POLL_MS: u64 = 10;
pub const LOOP_POLL_MS: u64 = 10;            // ~100 Hz accelerometer polling

// ---------------------------------------------------------------------------
// MPU6050 Sensor Scale Factors
// ---------------------------------------------------------------------------
pub const ACCEL_SCALE_8G: f32 = 4096.0; // LSB/g at ±8 g

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_JUMP_LOOP: usize = 8192;
