#![no_std]
#![no_main]

use {
    defmt_rtt as _,
    embassy_executor::Spawner,
    embassy_rp::{
        bind_interrupts,
        gpio::{Input, Level, Output, Pull},
        peripherals::USB,
        usb,
    },
    embassy_time::{Duration, Instant, Timer},
    joystick_cursor_panel::buttons::{DEBOUNCE_WINDOW, Debounce},
    panic_probe as _,
};

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
});

// Exercises the debounce gate against the real joystick button: every edge
// is reported, bounce is called out, and accepted presses toggle the green
// LED so the filtering is visible without a logger attached.
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

    let mut button = Input::new(p.PIN_22, Pull::Up);
    let mut led_green = Output::new(p.PIN_11, Level::Low);

    let mut debounce = Debounce::new(DEBOUNCE_WINDOW, Instant::now());
    let mut accepted: u32 = 0;
    let mut rejected: u32 = 0;
    loop {
        button.wait_for_falling_edge().await;
        if debounce.accept(Instant::now()) {
            accepted += 1;
            led_green.toggle();
            let () = log::info!("Press accepted ({accepted} accepted, {rejected} bounced)");
        } else {
            rejected += 1;
            let () = log::info!("Bounce filtered ({accepted} accepted, {rejected} bounced)");
        }
    }
}
