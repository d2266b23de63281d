#![no_std]
#![no_main]

use {
    defmt_rtt as _,
    embassy_executor::Spawner,
    embassy_rp::{
        adc::{self, Adc, Channel},
        bind_interrupts,
        gpio::{Input, Level, Output, Pull},
        i2c,
        peripherals::USB,
        pwm::SetDutyCycle as _,
        usb,
    },
    embassy_time::{Duration, Ticker, Timer},
    joystick_cursor_panel::{
        axis,
        buttons::{self, PanelState},
        panel::Panel,
        pwm,
    },
    panic_probe as _,
    static_cell::StaticCell,
};

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
});

/// One full sample -> compute -> render -> actuate cycle per period.
const LOOP_PERIOD_MS: u64 = 100;

/// SSD1306 bus speed.
const DISPLAY_I2C_FREQ: u32 = 400_000;

// Program metadata for `picotool info`.
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"joystick-cursor-panel"),
    embassy_rp::binary_info::rp_program_description!(
        c"Joystick-driven LED dimmer and OLED cursor"
    ),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

static STATE: StaticCell<PanelState> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    {
        // USB background task:
        #[embassy_executor::task]
        pub async fn task(driver: usb::Driver<'static, USB>) {
            embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver);
        }
        let () = match spawner.spawn(task(usb::Driver::new(p.USB, Irqs))) {
            Ok(()) => defmt::info!("Spawned USB task"),
            Err(e) => {
                log::error!("Error spawning USB task");
                Timer::after(Duration::from_secs(1)).await;
                defmt::panic!("Error spawning USB task: {}", e);
            }
        };
    }

    // Joystick analog inputs: X on ADC1, Y on ADC0.
    let mut adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let mut joy_x = Channel::new_pin(p.PIN_27, Pull::None);
    let mut joy_y = Channel::new_pin(p.PIN_26, Pull::None);

    // The red and blue LEDs share PWM slice 6 (channels B and A).
    let (mut led_blue, mut led_red) = pwm::init_slice(p.PWM_SLICE6, p.PIN_12, p.PIN_13).await;

    // The green LED is plain digital, owned by the joystick button task.
    let led_green = Output::new(p.PIN_11, Level::Low);

    let state: &'static PanelState = STATE.init(PanelState::new());

    let joy_button = Input::new(p.PIN_22, Pull::Up);
    let button_a = Input::new(p.PIN_5, Pull::Up);
    let recovery = Input::new(p.PIN_6, Pull::Up);

    spawner
        .spawn(buttons::joystick_button_task(joy_button, led_green, state))
        .unwrap();
    spawner
        .spawn(buttons::mute_button_task(button_a, state))
        .unwrap();
    spawner
        .spawn(buttons::recovery_button_task(recovery))
        .unwrap();

    // SSD1306 on I2C1. The flush is a plain blocking transfer.
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_FREQ;
    let display_i2c = i2c::I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);

    let mut panel = match Panel::new(display_i2c) {
        Ok(ok) => ok,
        Err(e) => {
            let mut ticker = Ticker::every(Duration::from_secs(1));
            loop {
                let () = log::error!("Couldn't initialize the display: {e:?}");
                let () = ticker.next().await;
            }
        }
    };

    defmt::info!("Entering main loop");
    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));
    loop {
        let x_sample = match adc.read(&mut joy_x).await {
            Ok(ok) => ok,
            Err(e) => {
                log::error!("X axis read failed: {e:?}");
                let () = ticker.next().await;
                continue;
            }
        };
        let y_sample = match adc.read(&mut joy_y).await {
            Ok(ok) => ok,
            Err(e) => {
                log::error!("Y axis read failed: {e:?}");
                let () = ticker.next().await;
                continue;
            }
        };

        let duty_red = axis::X_AXIS.duty_cycle(x_sample);
        let duty_blue = axis::Y_AXIS.duty_cycle(y_sample);

        panel.move_cursor(axis::cursor_position(x_sample, y_sample));
        panel.set_border_highlight(state.led_green());
        match panel.flush() {
            Ok(()) => {}
            Err(e) => log::error!("Display flush failed: {e:?}"),
        }

        // While muted, both channels hold at zero until toggled back.
        let (level_red, level_blue) = if state.pwm_enabled() {
            (pwm::level(duty_red), pwm::level(duty_blue))
        } else {
            (0, 0)
        };
        match led_red.set_duty_cycle(level_red) {
            Ok(()) => {}
            Err(e) => log::error!("Couldn't set red duty cycle: {e:?}"),
        }
        match led_blue.set_duty_cycle(level_blue) {
            Ok(()) => {}
            Err(e) => log::error!("Couldn't set blue duty cycle: {e:?}"),
        }

        let () = ticker.next().await;
    }
}
