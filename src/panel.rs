use {
    crate::axis::CursorPosition,
    display_interface::DisplayError,
    embassy_rp::{
        i2c::{Blocking, I2c},
        peripherals::I2C1,
    },
    embedded_graphics::{
        pixelcolor::BinaryColor,
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    },
    ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*},
};

pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 64;

/// The cursor dot lives in an 8x8 cell; erasing the cell wipes the old dot.
pub const CURSOR_CELL: u32 = 8;

/// Clamp bounds for the cursor cell's top-left corner. They keep the whole
/// cell inside the border frame.
pub const MARGIN_LOW: i32 = 6;
pub const MARGIN_X_HIGH: i32 = 116;
pub const MARGIN_Y_HIGH: i32 = 52;

/// Outer border, drawn once.
const FRAME: Rectangle = Rectangle::new(Point::new(3, 3), Size::new(122, 60));
/// Highlight just inside the border, stroked on or off with the green LED.
const HIGHLIGHT: Rectangle = Rectangle::new(Point::new(6, 6), Size::new(117, 54));

pub type PanelI2c = I2c<'static, I2C1, Blocking>;

/// Bordered frame with a moving cursor dot on the 128x64 OLED.
///
/// The display is not double-buffered by region, so the previous cursor cell
/// must be erased before the dot is drawn at its next position.
pub struct Panel {
    display: Ssd1306<
        I2CInterface<PanelI2c>,
        DisplaySize128x64,
        BufferedGraphicsMode<DisplaySize128x64>,
    >,
    cursor: CursorPosition,
}

impl Panel {
    /// Bring up the display and draw the initial frame: the border, with the
    /// cursor resting at the center cell.
    pub fn new(i2c: PanelI2c) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init()?;

        let mut panel = Self {
            display,
            cursor: CursorPosition {
                x: (WIDTH / 2 - CURSOR_CELL / 2) as i32,
                y: (HEIGHT / 2 - CURSOR_CELL / 2) as i32,
            },
        };
        panel.display.clear_buffer();
        FRAME
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut panel.display)
            .ok();
        panel.draw_dot();
        panel.flush()?;
        Ok(panel)
    }

    /// Erase the old cursor cell and draw the dot at `next`.
    pub fn move_cursor(&mut self, next: CursorPosition) {
        Rectangle::new(
            Point::new(self.cursor.x, self.cursor.y),
            Size::new(CURSOR_CELL, CURSOR_CELL),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(&mut self.display)
        .ok();
        self.cursor = next;
        self.draw_dot();
    }

    /// Stroke the highlight rectangle on or off. Re-stroking every frame also
    /// repairs any pixels a cursor erase took out of it at the clamp edges.
    pub fn set_border_highlight(&mut self, on: bool) {
        let color = if on { BinaryColor::On } else { BinaryColor::Off };
        HIGHLIGHT
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.display)
            .ok();
    }

    /// Transfer the whole framebuffer over the bus. Blocking by design.
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        self.display.flush()
    }

    fn draw_dot(&mut self) {
        Rectangle::new(
            Point::new(self.cursor.x + 3, self.cursor.y + 3),
            Size::new(2, 2),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(&mut self.display)
        .ok();
    }
}
