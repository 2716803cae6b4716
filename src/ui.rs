// JumpWatch — Screen Layout & Frame Buffer
//
// Drawing happens into an in-RAM 1 bpp frame buffer laid out the way the
// SSD1306 expects it (8-pixel vertical pages). The OLED driver only has to
// push the bytes. Layout, top to bottom:
//
//   y= 0  Hello! Jingyi
//   y=10  Goal: 5
//   y=20  Jumps: 3          <- jump region, rows 20..30
//   y=30  Temp: 23.4 C      <- environment region, rows 30..48
//   y=40  Hum: 45.1%

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::config::*;
use crate::events::EnvAverage;
use crate::hal::PresentationAdapter;

const TEXT_X: i32 = 10;
const ROW_GREETING: i32 = 0;
const ROW_GOAL: i32 = 10;
const ROW_JUMPS: i32 = 20;
const ROW_TEMP: i32 = 30;
const ROW_HUM: i32 = 40;

const JUMP_REGION_HEIGHT: u32 = 10;
const ENV_REGION_HEIGHT: u32 = 18;

// ---------------------------------------------------------------------------
// Frame buffer
// ---------------------------------------------------------------------------

pub struct FrameBuffer {
    buf: [u8; DISPLAY_BUFFER_SIZE],
    rotated: bool,
}

impl FrameBuffer {
    /// Blank buffer. `rotated` flips the image 180° for an upside-down panel.
    pub fn new(rotated: bool) -> Self {
        Self {
            buf: [0; DISPLAY_BUFFER_SIZE],
            rotated,
        }
    }

    /// Raw bytes in SSD1306 page order, ready to stream to the panel.
    pub fn as_bytes(&self) -> &[u8; DISPLAY_BUFFER_SIZE] {
        &self.buf
    }

    /// Pixel state in screen (pre-rotation) coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        match self.index(x, y) {
            Some((i, bit)) => self.buf[i] & bit != 0,
            None => false,
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let (x, y) = if self.rotated {
            (SCREEN_WIDTH - 1 - x, SCREEN_HEIGHT - 1 - y)
        } else {
            (x, y)
        };
        let i = x as usize + (y as usize / 8) * SCREEN_WIDTH as usize;
        Some((i, 1 << (y % 8)))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 {
                continue;
            }
            if let Some((i, bit)) = self.index(p.x as u32, p.y as u32) {
                match color {
                    BinaryColor::On => self.buf[i] |= bit,
                    BinaryColor::Off => self.buf[i] &= !bit,
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl PresentationAdapter for FrameBuffer {
    fn render_boot(&mut self, goal: u32) -> anyhow::Result<()> {
        draw_boot(self, goal)?;
        Ok(())
    }

    fn render_jump_count(&mut self, count: u32) -> anyhow::Result<()> {
        draw_jump_count(self, count)?;
        Ok(())
    }

    fn render_environment(&mut self, avg: EnvAverage) -> anyhow::Result<()> {
        draw_environment(self, avg)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_5X8, BinaryColor::On)
}

fn draw_line<D>(target: &mut D, row: i32, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(text, Point::new(TEXT_X, row), text_style(), Baseline::Top)
        .draw(target)?;
    Ok(())
}

fn clear_rows<D>(target: &mut D, row: i32, height: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(0, row), Size::new(SCREEN_WIDTH, height))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(target)
}

/// Full-screen boot layout with zeroed placeholders.
pub fn draw_boot<D>(target: &mut D, goal: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    draw_line(target, ROW_GREETING, GREETING)?;
    draw_line(target, ROW_GOAL, &format!("Goal: {}", goal))?;
    draw_line(target, ROW_JUMPS, "Jumps: 0")?;
    draw_line(target, ROW_TEMP, "Temp: ")?;
    draw_line(target, ROW_HUM, "Hum: ")?;
    Ok(())
}

/// Redraw the jump line only.
pub fn draw_jump_count<D>(target: &mut D, count: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    clear_rows(target, ROW_JUMPS, JUMP_REGION_HEIGHT)?;
    draw_line(target, ROW_JUMPS, &format!("Jumps: {}", count))
}

/// Redraw the temperature and humidity lines only.
pub fn draw_environment<D>(target: &mut D, avg: EnvAverage) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    clear_rows(target, ROW_TEMP, ENV_REGION_HEIGHT)?;
    draw_line(target, ROW_TEMP, &format!("Temp: {:.1} C", avg.temperature))?;
    draw_line(target, ROW_HUM, &format!("Hum: {:.1}%", avg.humidity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_lit(fb: &FrameBuffer, rows: core::ops::Range<u32>) -> usize {
        rows.flat_map(|y| (0..SCREEN_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.pixel(x, y))
            .count()
    }

    fn env(temperature: f32, humidity: f32) -> EnvAverage {
        EnvAverage { temperature, humidity }
    }

    #[test]
    fn boot_screen_has_text_in_every_line() {
        let mut fb = FrameBuffer::new(false);
        fb.render_boot(JUMP_GOAL).unwrap();
        for row in [ROW_GREETING, ROW_GOAL, ROW_JUMPS, ROW_TEMP, ROW_HUM] {
            let row = row as u32;
            assert!(rows_lit(&fb, row..row + 8) > 0, "row {} empty", row);
        }
        assert_eq!(rows_lit(&fb, 50..SCREEN_HEIGHT), 0);
    }

    #[test]
    fn jump_count_is_idempotent() {
        let mut fb = FrameBuffer::new(false);
        fb.render_boot(JUMP_GOAL).unwrap();
        fb.render_jump_count(3).unwrap();
        let once = *fb.as_bytes();
        fb.render_jump_count(3).unwrap();
        assert_eq!(fb.as_bytes(), &once);
    }

    #[test]
    fn jump_count_overwrites_previous_value() {
        let mut direct = FrameBuffer::new(false);
        direct.render_boot(JUMP_GOAL).unwrap();
        direct.render_jump_count(4).unwrap();

        let mut redrawn = FrameBuffer::new(false);
        redrawn.render_boot(JUMP_GOAL).unwrap();
        redrawn.render_jump_count(188).unwrap();
        redrawn.render_jump_count(4).unwrap();

        assert_eq!(direct.as_bytes(), redrawn.as_bytes());
    }

    #[test]
    fn regions_do_not_clobber_each_other() {
        let mut fb = FrameBuffer::new(false);
        fb.render_boot(JUMP_GOAL).unwrap();
        fb.render_environment(env(21.3, 40.0)).unwrap();
        let jump_rows: Vec<bool> = (20..30)
            .flat_map(|y| (0..SCREEN_WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| fb.pixel(x, y))
            .collect();

        fb.render_environment(env(-5.0, 99.9)).unwrap();
        let after: Vec<bool> = (20..30)
            .flat_map(|y| (0..SCREEN_WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| fb.pixel(x, y))
            .collect();
        assert_eq!(jump_rows, after);

        let env_before = rows_lit(&fb, 30..48);
        fb.render_jump_count(2).unwrap();
        assert_eq!(rows_lit(&fb, 30..48), env_before);
    }

    #[test]
    fn environment_is_idempotent() {
        let mut fb = FrameBuffer::new(true);
        fb.render_environment(env(23.44, 45.06)).unwrap();
        let once = *fb.as_bytes();
        fb.render_environment(env(23.44, 45.06)).unwrap();
        assert_eq!(fb.as_bytes(), &once);
    }

    #[test]
    fn rotation_flips_storage() {
        let mut fb = FrameBuffer::new(true);
        Pixel(Point::new(0, 0), BinaryColor::On).draw(&mut fb).unwrap();
        assert!(fb.pixel(0, 0));
        // Stored at the bottom-right corner: last page, last column, bit 7.
        assert_eq!(fb.as_bytes()[DISPLAY_BUFFER_SIZE - 1], 0x80);
    }

    #[test]
    fn page_layout() {
        let mut fb = FrameBuffer::new(false);
        Pixel(Point::new(3, 9), BinaryColor::On).draw(&mut fb).unwrap();
        assert_eq!(fb.as_bytes()[3 + SCREEN_WIDTH as usize], 0b10);
    }

    #[test]
    fn out_of_bounds_pixels_are_dropped() {
        let mut fb = FrameBuffer::new(false);
        Pixel(Point::new(-1, 5), BinaryColor::On).draw(&mut fb).unwrap();
        Pixel(Point::new(200, 5), BinaryColor::On).draw(&mut fb).unwrap();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }
}
