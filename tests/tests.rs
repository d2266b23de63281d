#![no_std]
#![no_main]

use {defmt_rtt as _, libm::fabsf, panic_probe as _};

fn close(a: f32, b: f32) -> bool {
    fabsf(a - b) < 1e-3
}

#[defmt_test::tests]
mod tests {
    use {
        super::close,
        defmt::{assert, assert_eq, info},
        embassy_time::{Duration, Instant},
        joystick_cursor_panel::{axis, buttons::Debounce, pwm},
    };

    #[init]
    fn init() {
        info!("Axis mapper and debounce tests");
        let _ = embassy_rp::init(Default::default());
    }

    #[test]
    fn rest_position_is_dead() {
        assert_eq!(axis::X_AXIS.duty_cycle(1990), 0.0);
        assert_eq!(axis::Y_AXIS.duty_cycle(1990), 0.0);
    }

    #[test]
    fn dead_zone_covers_both_sides() {
        // 99 counts of displacement is still rest; 100 is not.
        assert_eq!(axis::X_AXIS.duty_cycle(1891), 0.0);
        assert_eq!(axis::X_AXIS.duty_cycle(2089), 0.0);
        assert!(axis::X_AXIS.duty_cycle(1890) > 0.0);
        assert!(axis::X_AXIS.duty_cycle(2090) > 0.0);
    }

    #[test]
    fn per_side_normalization_matches_measurements() {
        assert!(close(axis::X_AXIS.duty_cycle(1000), 990.0 / 1873.0));
        assert!(close(axis::X_AXIS.duty_cycle(3000), 1010.0 / 1994.0));
        assert!(close(axis::Y_AXIS.duty_cycle(1000), 990.0 / 1864.0));
        assert!(close(axis::Y_AXIS.duty_cycle(3000), 1010.0 / 2003.0));
    }

    #[test]
    fn duty_grows_with_displacement_on_each_side() {
        let mut previous = 0.0;
        for sample in [1890u16, 1500, 1000, 500, 100] {
            let duty = axis::X_AXIS.duty_cycle(sample);
            assert!(duty > previous);
            previous = duty;
        }
        previous = 0.0;
        for sample in [2090u16, 2500, 3000, 3500, 4095] {
            let duty = axis::X_AXIS.duty_cycle(sample);
            assert!(duty > previous);
            previous = duty;
        }
    }

    #[test]
    fn full_deflection_saturates_at_one() {
        // Measured travel reaches past the divisors on both sides; the duty
        // cycle stops at 1.0 instead of overrunning the counter wrap.
        assert_eq!(axis::X_AXIS.duty_cycle(0), 1.0);
        assert_eq!(axis::X_AXIS.duty_cycle(4095), 1.0);
        assert_eq!(pwm::level(1.0), pwm::WRAP + 1);
        assert_eq!(pwm::level(0.0), 0);
    }

    #[test]
    fn cursor_tracks_and_clamps() {
        // Low extremes land on the bottom-left clamp corner.
        let bottom_left = axis::cursor_position(0, 0);
        assert_eq!(bottom_left.x, 6);
        assert_eq!(bottom_left.y, 52);

        // High extremes on the top-right corner.
        let top_right = axis::cursor_position(4095, 4095);
        assert_eq!(top_right.x, 116);
        assert_eq!(top_right.y, 6);

        // The resting center maps inside the frame, untouched by the clamp.
        let center = axis::cursor_position(1990, 1990);
        assert_eq!(center.x, 58);
        assert_eq!(center.y, 28);
    }

    #[test]
    fn mapping_is_idempotent() {
        assert_eq!(axis::X_AXIS.duty_cycle(1200), axis::X_AXIS.duty_cycle(1200));
        let first = axis::cursor_position(300, 3900);
        let second = axis::cursor_position(300, 3900);
        assert_eq!(first.x, second.x);
        assert_eq!(first.y, second.y);
    }

    #[test]
    fn debounce_filters_the_bounce_train() {
        let origin = Instant::from_millis(0);
        let mut debounce = Debounce::new(Duration::from_millis(200), origin);

        // Still inside the window opened at construction: filtered.
        assert!(!debounce.accept(origin + Duration::from_millis(150)));
        // The rejected edge must not have restarted the window.
        assert!(debounce.accept(origin + Duration::from_millis(201)));
        // Bounce right behind the accepted press: filtered, twice.
        assert!(!debounce.accept(origin + Duration::from_millis(230)));
        assert!(!debounce.accept(origin + Duration::from_millis(390)));
        // Accepted again once the window has fully passed.
        assert!(debounce.accept(origin + Duration::from_millis(402)));
    }
}
