mod tests {
    use gridlight_composer::layout::{GridLayout, LayoutPreset};
    use gridlight_composer::pixel::{NO_PIXEL, Pixel, mask};

    fn board() -> Vec<Pixel> {
        let masks = [
            mask::A2,
            mask::B1,
            mask::B2,
            mask::R1,
            mask::L1,
            mask::B3,
            mask::B4,
            mask::R2,
            mask::L2,
            mask::L3,
            mask::R3,
            mask::DU,
            mask::DD,
            mask::DL,
            mask::DR,
        ];
        masks
            .iter()
            .enumerate()
            .map(|(index, &mask)| Pixel::new(index as i32, mask, &[index as u8]))
            .collect()
    }

    fn order(layout: &GridLayout) -> Vec<u32> {
        layout.elements().iter().map(|element| element.mask).collect()
    }

    #[test]
    fn test_touchpad_grid_is_column_major() {
        let layout = GridLayout::discover(&board(), LayoutPreset::TouchpadGrid);
        assert_eq!(
            order(&layout),
            vec![
                mask::A2,
                mask::B1,
                mask::B3,
                mask::L3,
                mask::B2,
                mask::B4,
                mask::R3,
                mask::R1,
                mask::R2,
                mask::L1,
                mask::L2,
            ]
        );
        for (index, element) in layout.elements().iter().enumerate() {
            assert_eq!(usize::from(element.order), index);
        }
        assert_eq!(layout.columns(), 4);
    }

    #[test]
    fn test_missing_pixels_are_dropped() {
        let mut pixels: Vec<Pixel> = board()
            .into_iter()
            .filter(|pixel| pixel.mask != mask::A2 && pixel.mask != mask::R3)
            .collect();
        pixels.push(NO_PIXEL);
        pixels.push(Pixel::new(-1, mask::A2, &[50]));
        pixels.push(Pixel::new(20, mask::R3, &[]));

        let layout = GridLayout::discover(&pixels, LayoutPreset::TouchpadGrid);
        assert_eq!(layout.elements().len(), 9);
        assert!(!order(&layout).contains(&mask::A2));
        assert!(!order(&layout).contains(&mask::R3));
        assert_eq!(layout.elements()[0].mask, mask::B1);
        assert_eq!(layout.elements()[0].order, 0);
    }

    #[test]
    fn test_shared_mask_fans_out() {
        let mut pixels = board();
        pixels.push(Pixel::new(30, mask::B1, &[40, 41]));
        pixels.push(Pixel::new(31, mask::B1, &[1, 120]));

        let layout = GridLayout::discover(&pixels, LayoutPreset::TouchpadGrid);
        let b1 = &layout.elements()[1];
        assert_eq!(b1.mask, mask::B1);
        assert_eq!(b1.positions.as_slice(), &[1, 40, 41]);
    }

    #[test]
    fn test_report_order_does_not_matter() {
        let forward = GridLayout::discover(&board(), LayoutPreset::TouchpadGrid);
        let mut reversed_pixels = board();
        reversed_pixels.reverse();
        let reversed = GridLayout::discover(&reversed_pixels, LayoutPreset::TouchpadGrid);

        assert_eq!(forward.elements(), reversed.elements());
        assert_eq!(forward.levers(), reversed.levers());
    }

    #[test]
    fn test_levers_follow_direction_order() {
        let layout = GridLayout::discover(&board(), LayoutPreset::TouchpadGrid);
        let levers: Vec<(u32, &[u8])> = layout
            .levers()
            .iter()
            .map(|lever| (lever.mask, lever.positions.as_slice()))
            .collect();
        let expected: Vec<(u32, &[u8])> = vec![
            (mask::DU, &[11]),
            (mask::DD, &[12]),
            (mask::DL, &[13]),
            (mask::DR, &[14]),
        ];
        assert_eq!(levers, expected);
    }

    #[test]
    fn test_fightstick_rows() {
        let layout = GridLayout::discover(&board(), LayoutPreset::Fightstick);
        assert_eq!(
            order(&layout),
            vec![
                mask::B3,
                mask::B1,
                mask::B4,
                mask::B2,
                mask::R1,
                mask::R2,
                mask::L1,
                mask::L2,
            ]
        );
    }

    #[test]
    fn test_preset_resolve() {
        assert_eq!(LayoutPreset::resolve(0), LayoutPreset::TouchpadGrid);
        assert_eq!(LayoutPreset::resolve(1), LayoutPreset::Fightstick);
        assert_eq!(LayoutPreset::resolve(7), LayoutPreset::TouchpadGrid);
        assert_eq!(LayoutPreset::resolve(-1), LayoutPreset::TouchpadGrid);
    }

    #[test]
    fn test_empty_board() {
        let layout = GridLayout::discover(&[], LayoutPreset::TouchpadGrid);
        assert!(layout.elements().is_empty());
        assert!(layout.levers().is_empty());
    }
}
