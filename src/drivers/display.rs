// JumpWatch — SSD1306 OLED Driver
//
// Drawing goes into a `FrameBuffer`; every render call then streams the
// whole 1 KiB buffer to the panel in horizontal addressing mode.

use anyhow::Context;

use jumpwatch::config::*;
use jumpwatch::events::EnvAverage;
use jumpwatch::hal::PresentationAdapter;
use jumpwatch::ui::FrameBuffer;

use super::{lock, SharedBus};

// First byte of every I2C transfer selects commands or display RAM.
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const DATA_CHUNK: usize = 32;

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;
const CMD_COLUMN_ADDR: u8 = 0x21;
const CMD_PAGE_ADDR: u8 = 0x22;

/// 128×64, internal charge pump, horizontal addressing.
const INIT_SEQUENCE: &[u8] = &[
    CMD_DISPLAY_OFF,
    0xD5, 0x80, // clock divide / oscillator
    0xA8, 0x3F, // multiplex ratio 64
    0xD3, 0x00, // display offset 0
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // segment remap
    0xC8,       // COM scan descending
    0xDA, 0x12, // COM pins, alternative config
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0x2E,       // scrolling off
    0xA4,       // resume from RAM
    0xA6,       // normal (not inverted)
    CMD_DISPLAY_ON,
];

pub struct OledDisplay {
    bus: SharedBus,
    frame: FrameBuffer,
}

impl OledDisplay {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            frame: FrameBuffer::new(DISPLAY_ROTATED),
        }
    }

    /// Send the power-up command sequence.
    pub fn init(&mut self) -> anyhow::Result<()> {
        self.command(INIT_SEQUENCE).context("SSD1306 allocation failed")?;
        log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    fn command(&self, cmds: &[u8]) -> anyhow::Result<()> {
        let mut bus = lock(self.bus)?;
        for &cmd in cmds {
            bus.write(I2C_ADDR_OLED, &[CONTROL_COMMAND, cmd], I2C_TIMEOUT_TICKS)?;
        }
        Ok(())
    }

    /// Push the frame buffer to display RAM.
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.command(&[
            CMD_COLUMN_ADDR,
            0,
            (SCREEN_WIDTH - 1) as u8,
            CMD_PAGE_ADDR,
            0,
            (SCREEN_HEIGHT / 8 - 1) as u8,
        ])?;

        let mut bus = lock(self.bus)?;
        let mut packet = [0u8; DATA_CHUNK + 1];
        packet[0] = CONTROL_DATA;
        for chunk in self.frame.as_bytes().chunks(DATA_CHUNK) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            bus.write(I2C_ADDR_OLED, &packet[..=chunk.len()], I2C_TIMEOUT_TICKS)?;
        }
        Ok(())
    }
}

impl PresentationAdapter for OledDisplay {
    fn render_boot(&mut self, goal: u32) -> anyhow::Result<()> {
        self.frame.render_boot(goal)?;
        self.flush()
    }

    fn render_jump_count(&mut self, count: u32) -> anyhow::Result<()> {
        self.frame.render_jump_count(count)?;
        self.flush()
    }

    fn render_environment(&mut self, avg: EnvAverage) -> anyhow::Result<()> {
        self.frame.render_environment(avg)?;
        self.flush()
    }
}
