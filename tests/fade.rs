mod tests {
    use embassy_time::Duration;
    use gridlight_composer::color::Rgb;
    use gridlight_composer::fade::{FadeStep, FadeTable};

    const PRESS: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    const BASE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    fn step(elapsed_ms: u64) -> FadeStep {
        FadeStep {
            cooldown: Duration::from_millis(500),
            elapsed: Duration::from_millis(elapsed_ms),
        }
    }

    #[test]
    fn test_press_shows_press_color() {
        let mut fade: FadeTable = FadeTable::new();
        assert_eq!(fade.resolve(3, Some(PRESS), BASE, step(80)), Some(PRESS));
        let entry = fade.entry(3).unwrap();
        assert_eq!(entry.remaining_ms, 500);
        assert_eq!(entry.hit, PRESS);
    }

    #[test]
    fn test_release_blends_between_colors() {
        let mut fade: FadeTable = FadeTable::new();
        fade.resolve(3, Some(PRESS), BASE, step(0));

        let color = fade.resolve(3, None, BASE, step(80)).unwrap();
        assert_ne!(color, PRESS);
        assert_ne!(color, BASE);
        assert_eq!(color, Rgb::new(214, 214, 255));
    }

    #[test]
    fn test_release_converges_to_base() {
        let mut fade: FadeTable = FadeTable::new();
        fade.resolve(3, Some(PRESS), BASE, step(0));

        let mut color = PRESS;
        for _ in 0..7 {
            color = fade.resolve(3, None, BASE, step(80)).unwrap();
        }
        assert_eq!(color, BASE);
        assert_eq!(fade.entry(3).unwrap().remaining_ms, 0);
    }

    #[test]
    fn test_untouched_position_shows_base() {
        let mut fade: FadeTable = FadeTable::new();
        assert_eq!(fade.resolve(42, None, BASE, step(80)), Some(BASE));
    }

    #[test]
    fn test_out_of_range_position_is_ignored() {
        let mut fade: FadeTable = FadeTable::new();
        assert_eq!(fade.resolve(100, Some(PRESS), BASE, step(80)), None);
        assert_eq!(fade.blend(250, BASE, Duration::from_millis(500)), None);
        assert!(fade.entry(100).is_none());
    }

    #[test]
    fn test_zero_cooldown_never_fades() {
        let mut fade: FadeTable = FadeTable::new();
        let instant = FadeStep {
            cooldown: Duration::from_millis(0),
            elapsed: Duration::from_millis(80),
        };
        fade.resolve(1, Some(PRESS), BASE, instant);
        assert_eq!(fade.resolve(1, None, BASE, instant), Some(BASE));
    }
}
