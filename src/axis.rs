use {
    crate::panel,
    libm::{fabsf, fmaxf, fminf},
};

/// Joystick resting value on both axes. Measured, and NOT the midpoint of the
/// 12-bit range: the stick rests closer to the high extreme than the low one.
pub const JOY_CENTER: f32 = 1990.0;
/// Displacement below this still counts as rest, filtering the jitter the
/// stick produces when untouched.
pub const DEAD_RADIUS: f32 = 100.0;
/// Nominal full-scale sample; measured travel is [20, 4087].
pub const ADC_FULL_SCALE: f32 = 4095.0;

/// Half of the 8x8 cursor cell, subtracted so the dot lands centered on the
/// mapped point.
const CURSOR_HALF: f32 = 4.0;

/// Per-axis duty-cycle calibration.
///
/// Because the resting center is off-midpoint, a single divisor would
/// saturate one side long before the other reaches full travel; each side of
/// center gets its own divisor, measured against that side's extreme.
pub struct AxisCal {
    pub center: f32,
    pub dead_radius: f32,
    /// Normalization when the sample falls below center.
    pub low_divisor: f32,
    /// Normalization when the sample falls at or above center.
    pub high_divisor: f32,
}

/// X axis (GPIO27 / ADC1), driving the red LED channel.
pub const X_AXIS: AxisCal = AxisCal {
    center: JOY_CENTER,
    dead_radius: DEAD_RADIUS,
    low_divisor: 1873.0,
    high_divisor: 1994.0,
};

/// Y axis (GPIO26 / ADC0), driving the blue LED channel.
pub const Y_AXIS: AxisCal = AxisCal {
    center: JOY_CENTER,
    dead_radius: DEAD_RADIUS,
    low_divisor: 1864.0,
    high_divisor: 2003.0,
};

/// Top-left corner of the 8x8 cursor cell, already clamped inside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorPosition {
    pub x: i32,
    pub y: i32,
}

impl AxisCal {
    /// Map one raw sample to a PWM duty cycle in [0.0, 1.0]: zero inside the
    /// dead zone, otherwise displacement over the divisor for whichever side
    /// of center the sample fell on, saturating at full duty.
    #[inline]
    pub fn duty_cycle(&self, sample: u16) -> f32 {
        let offset = self.center - sample as f32;
        if fabsf(offset) < self.dead_radius {
            return 0.0;
        }
        let divisor = if (sample as f32) < self.center {
            self.low_divisor
        } else {
            self.high_divisor
        };
        fminf(fabsf(offset) / divisor, 1.0)
    }
}

/// Map a sample pair to the cursor cell. A higher Y sample sits higher on the
/// screen, so the Y axis inverts before scaling; both coordinates clamp to
/// the margins that keep the cell clear of the border frame.
#[inline]
pub fn cursor_position(x_sample: u16, y_sample: u16) -> CursorPosition {
    let px = panel::WIDTH as f32 * (x_sample as f32 / ADC_FULL_SCALE) - CURSOR_HALF;
    let py = panel::HEIGHT as f32 * (1.0 - y_sample as f32 / ADC_FULL_SCALE) - CURSOR_HALF;
    CursorPosition {
        x: fmaxf(panel::MARGIN_LOW as f32, fminf(px, panel::MARGIN_X_HIGH as f32)) as i32,
        y: fmaxf(panel::MARGIN_LOW as f32, fminf(py, panel::MARGIN_Y_HIGH as f32)) as i32,
    }
}
