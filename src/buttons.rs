use {
    core::sync::atomic::Ordering,
    portable_atomic::AtomicBool,
    embassy_rp::gpio::{Input, Output},
    embassy_time::{Duration, Instant},
};

/// Edges arriving within this window of the last accepted press are bounce.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Two-state edge gate: armed (the next edge will be accepted) or cooling
/// (still inside the window opened by the last accepted edge). There is no
/// timer behind the cooling state; every edge just compares against the
/// stored instant, and rejected edges leave it untouched.
pub struct Debounce {
    window: Duration,
    last_accepted: Instant,
}

impl Debounce {
    /// Starts cooling at `now`, so a press bouncing off power-up is filtered
    /// the same way as any other.
    #[inline]
    pub fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            last_accepted: now,
        }
    }

    /// True iff the edge at `now` is accepted. Accepting restarts the window.
    #[inline]
    pub fn accept(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_accepted) > self.window {
            self.last_accepted = now;
            true
        } else {
            false
        }
    }
}

/// The only state shared between the button tasks and the main loop.
///
/// One writer per flag (the button task that owns it); the main loop only
/// reads. Word-sized atomics are enough on the single core, and SeqCst makes
/// a toggle visible to the very next loop iteration.
pub struct PanelState {
    led_green: AtomicBool,
    pwm_enabled: AtomicBool,
}

impl PanelState {
    #[inline]
    pub const fn new() -> Self {
        Self {
            led_green: AtomicBool::new(false),
            pwm_enabled: AtomicBool::new(true),
        }
    }

    /// Flip the green-LED flag and return the new value.
    #[inline]
    pub fn toggle_led_green(&self) -> bool {
        !self.led_green.fetch_xor(true, Ordering::SeqCst)
    }

    #[inline]
    pub fn led_green(&self) -> bool {
        self.led_green.load(Ordering::SeqCst)
    }

    /// Flip the PWM-enabled flag and return the new value.
    #[inline]
    pub fn toggle_pwm_enabled(&self) -> bool {
        !self.pwm_enabled.fetch_xor(true, Ordering::SeqCst)
    }

    #[inline]
    pub fn pwm_enabled(&self) -> bool {
        self.pwm_enabled.load(Ordering::SeqCst)
    }
}

/// Joystick pushbutton: each debounced press toggles the green LED, written
/// here to the pin this task owns. The border highlight follows from the
/// shared flag on the main loop's next frame.
#[embassy_executor::task]
pub async fn joystick_button_task(
    mut button: Input<'static>,
    mut led_green: Output<'static>,
    state: &'static PanelState,
) {
    defmt::info!("Joystick button task started");
    let mut debounce = Debounce::new(DEBOUNCE_WINDOW, Instant::now());
    loop {
        button.wait_for_falling_edge().await;
        if !debounce.accept(Instant::now()) {
            continue;
        }
        let on = state.toggle_led_green();
        if on {
            led_green.set_high();
        } else {
            led_green.set_low();
        }
        defmt::info!("Green LED {}", if on { "on" } else { "off" });
    }
}

/// Pushbutton A: each debounced press toggles the PWM mute. The main loop
/// consumes the flag and holds both compare levels at zero while muted.
#[embassy_executor::task]
pub async fn mute_button_task(mut button: Input<'static>, state: &'static PanelState) {
    defmt::info!("Mute button task started");
    let mut debounce = Debounce::new(DEBOUNCE_WINDOW, Instant::now());
    loop {
        button.wait_for_falling_edge().await;
        if !debounce.accept(Instant::now()) {
            continue;
        }
        let enabled = state.toggle_pwm_enabled();
        defmt::info!("PWM {}", if enabled { "enabled" } else { "muted" });
    }
}

/// Recovery pushbutton: reboots into the USB mass-storage loader on any
/// falling edge. Deliberately not debounced; the ROM call never returns, so
/// there is no state to keep consistent.
#[embassy_executor::task]
pub async fn recovery_button_task(mut button: Input<'static>) {
    defmt::info!("Recovery button task started");
    loop {
        button.wait_for_falling_edge().await;
        defmt::info!("Entering USB boot");
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    }
}
