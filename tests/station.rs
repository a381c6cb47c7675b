mod tests {
    use embassy_time::Duration;
    use gridlight_composer::bounds::blank_frame;
    use gridlight_composer::clock::{Clock, ManualClock};
    use gridlight_composer::color::Rgb;
    use gridlight_composer::effect::AnimationId;
    use gridlight_composer::frame_scheduler::FrameScheduler;
    use gridlight_composer::options::{OptionsStore, SharedOptions};
    use gridlight_composer::pixel::{Pixel, mask};
    use gridlight_composer::station::AnimationStation;
    use gridlight_composer::OutputDriver;

    fn board() -> Vec<Pixel> {
        vec![
            Pixel::new(0, mask::B1, &[0]),
            Pixel::new(1, mask::B2, &[1]),
            Pixel::new(2, mask::B3, &[2]),
            Pixel::new(3, mask::DU, &[3]),
        ]
    }

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for &mut RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    #[test]
    fn test_animation_id_round_trip() {
        for raw in 0..5 {
            let id = AnimationId::from_raw(raw).unwrap();
            assert_eq!(id as u8, raw);
            assert_eq!(AnimationId::parse_from_str(id.as_str()), Some(id));
        }
        assert_eq!(AnimationId::from_raw(5), None);
        assert_eq!(AnimationId::parse_from_str("rainbow"), None);
    }

    #[test]
    fn test_animation_id_cycles() {
        assert_eq!(AnimationId::Off.next(), AnimationId::GridSweep);
        assert_eq!(AnimationId::GridDrift.next(), AnimationId::Off);
        assert_eq!(AnimationId::Off.previous(), AnimationId::GridDrift);
        assert_eq!(AnimationId::GridWave.previous(), AnimationId::GridSweep);
    }

    #[test]
    fn test_off_clears_frame() {
        let options = SharedOptions::default();
        let clock = ManualClock::default();
        let mut station = AnimationStation::new(&options, &clock, &board(), AnimationId::Off);
        let mut frame = [Rgb::new(9, 9, 9); gridlight_composer::FRAME_SIZE];

        assert!(station.animate(&mut frame));
        assert!(frame.iter().all(|&color| color == Rgb::default()));
    }

    #[test]
    fn test_parameter_cycling_uses_animation_range() {
        let options = SharedOptions::default();
        let clock = ManualClock::default();
        let pixels = board();
        let mut station = AnimationStation::new(&options, &clock, &pixels, AnimationId::GridSweep);

        station.parameter_up();
        assert_eq!(options.load().speed, 2);
        station.parameter_up();
        assert_eq!(options.load().speed, 4);
        station.parameter_up();
        assert_eq!(options.load().speed, 3);
        station.parameter_down();
        assert_eq!(options.load().speed, 4);

        station.set_animation(AnimationId::GridWave, &pixels);
        // Very fast is outside the basic list, so cycling restarts from normal
        station.parameter_up();
        assert_eq!(options.load().speed, 2);
        station.parameter_up();
        assert_eq!(options.load().speed, 0);
        station.parameter_down();
        assert_eq!(options.load().speed, 2);
    }

    #[test]
    fn test_off_ignores_parameter_changes() {
        let options = SharedOptions::default();
        options.update(|stored| stored.speed = 4);
        let clock = ManualClock::default();
        let pixels = board();
        let mut station = AnimationStation::new(&options, &clock, &pixels, AnimationId::Off);

        station.parameter_up();
        assert_eq!(options.load().speed, 4);
        station.parameter_down();
        assert_eq!(options.load().speed, 4);

        // The sweep still sees its very fast setting afterwards
        station.next_animation(&pixels);
        station.parameter_up();
        assert_eq!(options.load().speed, 3);
    }

    #[test]
    fn test_switching_keeps_pending_fades() {
        let options = SharedOptions::default();
        options.update(|stored| stored.gradient_colors = [0x0000FF; 4]);
        let clock = ManualClock::default();
        let pixels = board();
        let mut station = AnimationStation::new(&options, &clock, &pixels, AnimationId::GridSweep);
        let mut frame = blank_frame();

        station.set_pressed([&pixels[1]]);
        assert!(station.animate(&mut frame));
        assert_eq!(frame[1], Rgb::new(255, 255, 255));
        station.set_pressed(pixels.iter().take(0));

        clock.advance(Duration::from_millis(80));
        station.next_animation(&pixels);
        assert_eq!(station.animation_id(), AnimationId::GridWave);
        assert_eq!(station.fade().entry(1).unwrap().remaining_ms, 500);

        // Due right away, and the fade counts the time since the last frame
        assert!(station.animate(&mut frame));
        assert_eq!(frame[1], Rgb::new(214, 214, 255));
        assert_eq!(station.fade().entry(1).unwrap().remaining_ms, 420);

        station.previous_animation(&pixels);
        station.previous_animation(&pixels);
        assert_eq!(station.animation_id(), AnimationId::Off);
        assert!(station.animation().grid().is_none());
    }

    fn columns(station: &AnimationStation<&SharedOptions, &ManualClock>) -> Vec<(u32, u8)> {
        station
            .animation()
            .grid()
            .unwrap()
            .layout()
            .elements()
            .iter()
            .map(|element| (element.mask, element.column))
            .collect()
    }

    #[test]
    fn test_layout_preset_applies_on_switch() {
        let options = SharedOptions::default();
        let clock = ManualClock::default();
        let pixels = board();
        let mut station = AnimationStation::new(&options, &clock, &pixels, AnimationId::GridWheel);
        assert_eq!(
            columns(&station),
            vec![(mask::B1, 0), (mask::B3, 0), (mask::B2, 1)]
        );

        options.update(|stored| stored.layout_preset = 1);
        assert_eq!(columns(&station).len(), 3);
        station.set_animation(AnimationId::GridWheel, &pixels);
        assert_eq!(
            columns(&station),
            vec![(mask::B3, 0), (mask::B1, 0), (mask::B2, 1)]
        );
    }

    #[test]
    fn test_scheduler_writes_rendered_frames_only() {
        let options = SharedOptions::default();
        let clock = ManualClock::default();
        let pixels = board();
        let station = AnimationStation::new(&options, &clock, &pixels, AnimationId::GridSweep);
        let mut driver = RecordingDriver::default();

        {
            let mut scheduler =
                FrameScheduler::with_poll_duration(station, &mut driver, Duration::from_millis(5));

            let result = scheduler.tick();
            assert!(result.rendered);
            assert_eq!(result.sleep_duration, Duration::from_millis(5));

            clock.advance(Duration::from_millis(5));
            let result = scheduler.tick();
            assert!(!result.rendered);

            clock.advance(Duration::from_millis(75));
            let result = scheduler.tick();
            assert!(result.rendered);
            assert_eq!(scheduler.frame()[0], Rgb::new(0, 0, 255));
        }

        assert_eq!(driver.frames.len(), 2);
        assert_eq!(driver.frames[0].len(), gridlight_composer::FRAME_SIZE);
    }

    #[test]
    fn test_scheduler_skips_backlog_after_stall() {
        let options = SharedOptions::default();
        let clock = ManualClock::default();
        let pixels = board();
        let station = AnimationStation::new(&options, &clock, &pixels, AnimationId::Off);
        let mut driver = RecordingDriver::default();
        let mut scheduler =
            FrameScheduler::with_poll_duration(station, &mut driver, Duration::from_millis(5));

        scheduler.tick();
        clock.advance(Duration::from_millis(100));
        let result = scheduler.tick();
        assert_eq!(result.next_deadline, clock.now() + Duration::from_millis(5));
        assert_eq!(result.sleep_duration, Duration::from_millis(5));
    }
}
