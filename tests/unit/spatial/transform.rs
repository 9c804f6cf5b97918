//! Tests for structural grid operations

#[cfg(test)]
mod tests {
    use crate::grid;
    use gridgolf::spatial::grid::Grid;
    use gridgolf::spatial::transform::{
        ColorMap, Margins, anti_transpose, concatenate, content_bounds, crop, crop_to_content,
        flip_horizontal, flip_vertical, histogram, overlay, pad, remap, rotate90, rotate180,
        rotate270, sample, scale_down, scale_up, tile, transpose, unique_colors,
    };
    use ndarray::Axis;

    fn sample_grid() -> Grid {
        grid(&[&[1, 2, 3], &[4, 5, 6]])
    }

    #[test]
    fn test_rotate90_clockwise() {
        assert_eq!(
            rotate90(&grid(&[&[1, 2], &[3, 4]])),
            grid(&[&[3, 1], &[4, 2]])
        );
        assert_eq!(
            rotate90(&sample_grid()),
            grid(&[&[4, 1], &[5, 2], &[6, 3]])
        );
    }

    // Tests four quarter turns return the original grid
    // Verified by swapping slice order in rotate90
    #[test]
    fn test_rotation_four_cycle() {
        let g = sample_grid();
        let turned = rotate90(&rotate90(&rotate90(&rotate90(&g))));
        assert_eq!(turned, g);
        assert_eq!(rotate90(&rotate90(&g)), rotate180(&g));
        assert_eq!(rotate90(&rotate180(&g)), rotate270(&g));
    }

    #[test]
    fn test_flips_and_transposes_are_involutions() {
        let g = sample_grid();
        assert_eq!(flip_horizontal(&flip_horizontal(&g)), g);
        assert_eq!(flip_vertical(&flip_vertical(&g)), g);
        assert_eq!(transpose(&transpose(&g)), g);
        assert_eq!(anti_transpose(&anti_transpose(&g)), g);
        assert_eq!(flip_horizontal(&g), grid(&[&[3, 2, 1], &[6, 5, 4]]));
        assert_eq!(flip_vertical(&g), grid(&[&[4, 5, 6], &[1, 2, 3]]));
        assert_eq!(transpose(&g), grid(&[&[1, 4], &[2, 5], &[3, 6]]));
        assert_eq!(anti_transpose(&g), grid(&[&[6, 3], &[5, 2], &[4, 1]]));
    }

    #[test]
    fn test_geometry_of_empty_grid() {
        let empty = Grid::empty();
        assert_eq!(rotate90(&empty), empty);
        assert_eq!(transpose(&empty), empty);
        assert_eq!(tile(&empty, 3, 2), empty);
    }

    #[test]
    fn test_tile() {
        let g = grid(&[&[1, 2]]);
        assert_eq!(tile(&g, 1, 1), g);
        assert_eq!(tile(&g, 2, 2), grid(&[&[1, 2, 1, 2], &[1, 2, 1, 2]]));
        assert_eq!(tile(&g, 0, 3), Grid::empty());
    }

    // Tests scale-up followed by scale-down restores the grid
    #[test]
    fn test_scale_round_trip() {
        let g = sample_grid();
        for factor in 1..=4 {
            let scaled = scale_up(&g, factor).expect("positive factor");
            assert_eq!(scaled.dims(), (2 * factor, 3 * factor));
            assert_eq!(scale_down(&scaled, factor).expect("divisible"), g);
        }
    }

    // Tests scale-down rejects shapes the factor does not divide
    // Verified by removing the divisibility check
    #[test]
    fn test_scale_down_requires_divisibility() {
        assert!(scale_down(&sample_grid(), 2).is_err());
        assert!(scale_down(&sample_grid(), 0).is_err());
        assert!(scale_up(&sample_grid(), 0).is_err());
    }

    #[test]
    fn test_sample_steps() {
        let g = grid(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        assert_eq!(
            sample(&g, 1, 2).expect("positive steps"),
            grid(&[&[1, 3], &[4, 6], &[7, 9]])
        );
        assert_eq!(
            sample(&g, 2, 1).expect("positive steps"),
            grid(&[&[1, 2, 3], &[7, 8, 9]])
        );
        assert!(sample(&g, 0, 1).is_err());
    }

    // Tests padding then cropping the same margins restores the grid
    #[test]
    fn test_pad_then_crop_round_trip() {
        let g = sample_grid();
        for margins in [
            Margins::uniform(1),
            Margins::vertical(2),
            Margins::horizontal(3),
            Margins {
                top: 1,
                bottom: 0,
                left: 2,
                right: 1,
            },
        ] {
            let padded = pad(&g, margins, 7).expect("valid color");
            assert_eq!(crop(&padded, margins).expect("margins fit"), g);
        }
    }

    #[test]
    fn test_pad_fills_border_color() {
        let padded = pad(&grid(&[&[5]]), Margins::uniform(1), 2).expect("valid color");
        assert_eq!(padded, grid(&[&[2, 2, 2], &[2, 5, 2], &[2, 2, 2]]));
        assert!(pad(&grid(&[&[5]]), Margins::uniform(1), 10).is_err());
    }

    #[test]
    fn test_crop_rejects_oversized_margins() {
        assert!(crop(&sample_grid(), Margins::vertical(2)).is_err());
        assert_eq!(
            crop(&sample_grid(), Margins::vertical(1)).expect("margins fit"),
            Grid::empty()
        );
    }

    #[test]
    fn test_concatenate() {
        let top = grid(&[&[1, 2]]);
        let bottom = grid(&[&[3, 4]]);
        assert_eq!(
            concatenate(&top, &bottom, Axis(0)).expect("same width"),
            grid(&[&[1, 2], &[3, 4]])
        );
        assert_eq!(
            concatenate(&top, &bottom, Axis(1)).expect("same height"),
            grid(&[&[1, 2, 3, 4]])
        );
        assert!(concatenate(&top, &sample_grid(), Axis(0)).is_err());
        assert_eq!(
            concatenate(&Grid::empty(), &top, Axis(0)).expect("empty side"),
            top
        );
    }

    #[test]
    fn test_color_map() {
        let map = ColorMap::from_pairs(&[(1, 2), (2, 1), (1, 3)]).expect("valid colors");
        assert_eq!(map.apply(1), 3);
        assert_eq!(map.apply(2), 1);
        assert_eq!(map.apply(4), 4);
        assert_eq!(ColorMap::default(), ColorMap::identity());
        assert!(ColorMap::identity().with(10, 1).is_err());
        assert!(ColorMap::identity().with(1, 10).is_err());

        assert_eq!(
            remap(&grid(&[&[1, 2], &[0, 1]]), &map),
            grid(&[&[3, 1], &[0, 3]])
        );
    }

    #[test]
    fn test_content_bounds_and_crop_to_content() {
        let g = grid(&[&[0, 0, 0, 0], &[0, 3, 0, 0], &[0, 0, 4, 0]]);
        assert_eq!(content_bounds(&g, 0), Some((1, 1, 2, 2)));
        assert_eq!(crop_to_content(&g, 0), Some(grid(&[&[3, 0], &[0, 4]])));
        assert_eq!(crop_to_content(&grid(&[&[0, 0]]), 0), None);
        assert_eq!(crop_to_content(&grid(&[&[5, 5]]), 5), None);
    }

    // Tests overlay keeps base cells under transparent cells
    #[test]
    fn test_overlay() {
        let base = grid(&[&[1, 1], &[1, 1]]);
        let top_layer = grid(&[&[0, 2], &[3, 0]]);
        assert_eq!(overlay(&base, &top_layer, 0), grid(&[&[1, 2], &[3, 1]]));
        assert_eq!(overlay(&base, &grid(&[&[9]]), 0), grid(&[&[9, 1], &[1, 1]]));
    }

    #[test]
    fn test_histogram_and_unique_colors() {
        let g = grid(&[&[0, 3, 3], &[9, 0, 0]]);
        let counts = histogram(&g);
        assert_eq!(counts, [3, 0, 0, 2, 0, 0, 0, 0, 0, 1]);
        assert_eq!(counts.iter().sum::<usize>(), 6);
        assert_eq!(unique_colors(&g), vec![0, 3, 9]);
        assert!(unique_colors(&Grid::empty()).is_empty());
    }
}
