#![no_std]
#![no_main]

use {
    defmt_rtt as _,
    embassy_executor::Spawner,
    embassy_rp::{bind_interrupts, peripherals::USB, pwm::SetDutyCycle as _, usb},
    embassy_time::{Duration, Ticker, Timer},
    joystick_cursor_panel::{axis, pwm},
    panic_probe as _,
};

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
});

const STEP_PERIOD_MS: u16 = 10;
const STEP: u16 = 15;

// Sweeps synthetic samples across the full sensor range and pushes the mapped
// duty cycles onto the real LEDs: both should sit dark through the dead zone
// and ramp toward full brightness at either extreme.
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

    let (mut led_blue, mut led_red) = pwm::init_slice(p.PWM_SLICE6, p.PIN_12, p.PIN_13).await;

    let mut sample: u16 = 0;
    let mut ticker = Ticker::every(Duration::from_millis(STEP_PERIOD_MS as _));
    loop {
        let duty_red = axis::X_AXIS.duty_cycle(sample);
        let duty_blue = axis::Y_AXIS.duty_cycle(sample);

        match led_red.set_duty_cycle(pwm::level(duty_red)) {
            Ok(()) => {}
            Err(e) => log::error!("Couldn't set red duty cycle: {e:?}"),
        }
        match led_blue.set_duty_cycle(pwm::level(duty_blue)) {
            Ok(()) => {}
            Err(e) => log::error!("Couldn't set blue duty cycle: {e:?}"),
        }

        if sample % 510 == 0 {
            let () = log::info!("sample {sample}: red {duty_red:?}, blue {duty_blue:?}");
        }

        sample = if sample >= 4095 { 0 } else { sample + STEP };
        let () = ticker.next().await;
    }
}
