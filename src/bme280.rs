// JumpWatch — BME280 Register Decoding & Compensation
//
// Bus-independent half of the BME280 driver: turns the factory trim registers
// and a raw measurement burst into °C and %RH using the floating-point
// formulas from the Bosch datasheet. Pressure is never read.

/// Trim block 0x88..=0xA1 (T1..T3, P1..P9, H1).
pub const CALIB_BLOCK_A_LEN: usize = 26;
/// Trim block 0xE1..=0xE7 (H2..H6).
pub const CALIB_BLOCK_B_LEN: usize = 7;
/// Measurement burst 0xF7..=0xFE (press, temp, hum).
pub const RAW_BURST_LEN: usize = 8;

/// Factory trim values needed for temperature and humidity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bme280Calibration {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    pub dig_h4: i16,
    pub dig_h5: i16,
    pub dig_h6: i8,
}

/// Uncompensated ADC values from one measurement burst.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawMeasurement {
    pub adc_t: i32,
    pub adc_h: i32,
}

impl Bme280Calibration {
    pub fn parse(a: &[u8; CALIB_BLOCK_A_LEN], b: &[u8; CALIB_BLOCK_B_LEN]) -> Self {
        Self {
            dig_t1: u16::from_le_bytes([a[0], a[1]]),
            dig_t2: i16::from_le_bytes([a[2], a[3]]),
            dig_t3: i16::from_le_bytes([a[4], a[5]]),
            // a[6..24] = pressure trim — unused
            dig_h1: a[25],
            dig_h2: i16::from_le_bytes([b[0], b[1]]),
            dig_h3: b[2],
            // H4/H5 are 12-bit signed values sharing the nibbles of 0xE5.
            dig_h4: ((b[3] as i8 as i16) << 4) | (b[4] & 0x0F) as i16,
            dig_h5: ((b[5] as i8 as i16) << 4) | (b[4] >> 4) as i16,
            dig_h6: b[6] as i8,
        }
    }

    /// Returns (°C, t_fine). `t_fine` feeds the humidity formula.
    pub fn compensate_temperature(&self, adc_t: i32) -> (f32, f64) {
        let adc_t = adc_t as f64;
        let t1 = self.dig_t1 as f64;

        let var1 = (adc_t / 16384.0 - t1 / 1024.0) * self.dig_t2 as f64;
        let d = adc_t / 131072.0 - t1 / 8192.0;
        let var2 = d * d * self.dig_t3 as f64;
        let t_fine = var1 + var2;

        ((t_fine / 5120.0) as f32, t_fine)
    }

    /// Relative humidity in percent, clamped to 0..=100.
    pub fn compensate_humidity(&self, adc_h: i32, t_fine: f64) -> f32 {
        let h = t_fine - 76800.0;
        let h = (adc_h as f64 - (self.dig_h4 as f64 * 64.0 + self.dig_h5 as f64 / 16384.0 * h))
            * (self.dig_h2 as f64 / 65536.0
                * (1.0
                    + self.dig_h6 as f64 / 67108864.0
                        * h
                        * (1.0 + self.dig_h3 as f64 / 67108864.0 * h)));
        let h = h * (1.0 - self.dig_h1 as f64 * h / 524288.0);

        h.clamp(0.0, 100.0) as f32
    }
}

pub fn parse_raw(burst: &[u8; RAW_BURST_LEN]) -> RawMeasurement {
    // burst[0..3] = pressure — unused
    let adc_t = ((burst[3] as i32) << 12) | ((burst[4] as i32) << 4) | ((burst[5] as i32) >> 4);
    let adc_h = ((burst[6] as i32) << 8) | burst[7] as i32;
    RawMeasurement { adc_t, adc_h }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_calibration() -> Bme280Calibration {
        Bme280Calibration {
            dig_t1: 27504,
            dig_t2: 26435,
            dig_t3: -1000,
            dig_h1: 75,
            dig_h2: 362,
            dig_h3: 0,
            dig_h4: 313,
            dig_h5: 50,
            dig_h6: 30,
        }
    }

    #[test]
    fn temperature_matches_datasheet_example() {
        let (t, t_fine) = sample_calibration().compensate_temperature(519888);
        assert!((t - 25.08).abs() < 0.01, "t = {}", t);
        assert!((t_fine - 128422.3).abs() < 1.0);
    }

    #[test]
    fn humidity_in_expected_range() {
        let cal = sample_calibration();
        let (_, t_fine) = cal.compensate_temperature(519888);
        let h = cal.compensate_humidity(28000, t_fine);
        assert!((h - 43.86).abs() < 0.05, "h = {}", h);
    }

    #[test]
    fn humidity_is_clamped() {
        let cal = sample_calibration();
        let (_, t_fine) = cal.compensate_temperature(519888);
        assert_eq!(cal.compensate_humidity(0, t_fine), 0.0);
        assert_eq!(cal.compensate_humidity(0xFFFF, t_fine), 100.0);
    }

    #[test]
    fn parses_trim_registers() {
        let mut a = [0u8; CALIB_BLOCK_A_LEN];
        a[0..2].copy_from_slice(&27504u16.to_le_bytes());
        a[2..4].copy_from_slice(&26435i16.to_le_bytes());
        a[4..6].copy_from_slice(&(-1000i16).to_le_bytes());
        a[25] = 75;

        // H4 = 0x139 (313), H5 = 0x032 (50)
        let b = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];

        assert_eq!(Bme280Calibration::parse(&a, &b), sample_calibration());
    }

    #[test]
    fn parses_negative_h4_h5() {
        let a = [0u8; CALIB_BLOCK_A_LEN];
        // H4 = 0xFF << 4 | 0xE = -2, H5 = 0xFF << 4 | 0xF = -1
        let b = [0, 0, 0, 0xFF, 0xFE, 0xFF, 0x80];
        let cal = Bme280Calibration::parse(&a, &b);
        assert_eq!(cal.dig_h4, -2);
        assert_eq!(cal.dig_h5, -1);
        assert_eq!(cal.dig_h6, -128);
    }

    #[test]
    fn parses_measurement_burst() {
        // adc_T = 0x7EED0 (519888), adc_H = 0x6D60 (28000)
        let burst = [0x50, 0x00, 0x00, 0x7E, 0xED, 0x00, 0x6D, 0x60];
        assert_eq!(parse_raw(&burst), RawMeasurement { adc_t: 519888, adc_h: 28000 });
    }
}
