use {
    embassy_rp::{
        Peripheral,
        pwm::{self, Config, Pwm, PwmOutput},
    },
    embassy_sync::once_lock::OnceLock,
    embassy_time::{Duration, Ticker},
    fixed::{FixedU16, FixedU32, traits::LosslessTryFrom, types::extra::U4},
};

// From <https://docs.embassy.dev/embassy-rp/git/rp2040/pwm/struct.Config.html>:
// "the period in clock cycles of a slice can be computed as `(top + 1) * (phase_correct ? 1 : 2) * divider`."
// We can obtain `clock_hz`, the number of clock cycles in one second, from the system.
// Here `top` is pinned to `WRAP` so one compare step equals one ADC count,
// and phase-correct mode is off, so the period is `(WRAP + 1) * divider` cycles.
// We want a carrier period of `clock_hz / CARRIER_FREQ_HZ` cycles, so
// `divider = clock_hz / (CARRIER_FREQ_HZ * (WRAP + 1))`.

/// Counter wrap value. The 12-bit ADC range maps onto compare levels 1:1.
pub const WRAP: u16 = 4095;
/// LED carrier frequency. Far above flicker, and the divider it needs at any
/// plausible system clock stays well inside the 8.4 fixed-point field.
pub const CARRIER_FREQ_HZ: u32 = 1_000;

#[inline]
pub async fn get_or_init<T, F: AsyncFnOnce() -> T>(lock: &OnceLock<T>, f: F) -> &T {
    if let Some(t) = lock.try_get() {
        return t;
    }
    let _: Result<(), T> = lock.init(f().await);
    lock.try_get().unwrap()
}

#[inline]
pub async fn clock_frequency() -> u32 {
    static LOCK: OnceLock<u32> = OnceLock::new();

    *get_or_init(&LOCK, async || {
        let clk_hz: u32 = embassy_rp::clocks::clk_sys_freq();
        let () = log::info!("Clock frequency: {clk_hz:?} Hz");
        clk_hz
    })
    .await
}

#[inline]
pub async fn clock_frequency_fp() -> FixedU32<U4> {
    static LOCK: OnceLock<FixedU32<U4>> = OnceLock::new();

    *get_or_init(&LOCK, async || {
        let clock_hz = clock_frequency().await;
        let Some(clock_hz) = FixedU32::<U4>::checked_from_num(clock_hz) else {
            let mut ticker = Ticker::every(Duration::from_secs(1));
            loop {
                let () = log::error!("Clock frequency too large: {clock_hz:#?}");
                let () = ticker.next().await;
            }
        };
        clock_hz
    })
    .await
}

#[inline]
pub async fn clock_divider() -> FixedU16<U4> {
    static LOCK: OnceLock<FixedU16<U4>> = OnceLock::new();

    *get_or_init(&LOCK, async || {
        let divider = {
            let denominator = CARRIER_FREQ_HZ * (WRAP as u32 + 1);
            let Some(denominator) = FixedU32::<U4>::checked_from_num(denominator) else {
                let mut ticker = Ticker::every(Duration::from_secs(1));
                loop {
                    let () = log::error!(
                        "Clock divider intermediate computation too large: {denominator:#?}"
                    );
                    let () = ticker.next().await;
                }
            };
            (clock_frequency_fp().await / denominator) + FixedU32::<U4>::from_bits(1)
        };
        let () = log::info!("Clock divider: {divider:?}");
        let Some(divider) = FixedU16::<U4>::lossless_try_from(divider) else {
            let mut ticker = Ticker::every(Duration::from_secs(1));
            loop {
                let () = log::error!("Clock divider too large: {divider:#?}");
                let () = ticker.next().await;
            }
        };
        divider
    })
    .await
}

/// Convert a duty cycle in [0.0, 1.0] to a compare level. Full duty maps to
/// `WRAP + 1`, the slice's always-on level.
#[inline]
pub fn level(duty: f32) -> u16 {
    (duty * (WRAP as f32 + 1.0)) as u16
}

/// Configure one slice for a pair of LED channels and hand back its split
/// outputs, running with both compare levels at zero.
#[inline]
pub async fn init_slice<'d, Slice: pwm::Slice>(
    slice: impl Peripheral<P = Slice> + 'd,
    a: impl Peripheral<P = impl pwm::ChannelAPin<Slice>> + 'd,
    b: impl Peripheral<P = impl pwm::ChannelBPin<Slice>> + 'd,
) -> (PwmOutput<'d>, PwmOutput<'d>) {
    let (a, b) = Pwm::new_output_ab(slice, a, b, {
        let mut cfg = Config::default();
        cfg.compare_a = 0;
        cfg.compare_b = 0;
        cfg.divider = clock_divider().await;
        cfg.enable = true;
        cfg.phase_correct = false;
        cfg.top = WRAP;
        cfg
    })
    .split();

    let Some(a) = a else {
        let mut ticker = Ticker::every(Duration::from_secs(1));
        loop {
            let () = log::error!("PWM slice did not allow an A channel");
            let () = ticker.next().await;
        }
    };

    let Some(b) = b else {
        let mut ticker = Ticker::every(Duration::from_secs(1));
        loop {
            let () = log::error!("PWM slice did not allow a B channel");
            let () = ticker.next().await;
        }
    };

    (a, b)
}
