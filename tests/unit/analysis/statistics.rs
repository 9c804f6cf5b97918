//! Tests for color distributions over one or many grids

#[cfg(test)]
mod tests {
    use crate::grid;
    use gridgolf::analysis::statistics::ColorDistribution;
    use gridgolf::spatial::grid::Grid;

    #[test]
    fn test_counts_of_single_grid() {
        let colors = ColorDistribution::of(&grid(&[&[0, 2, 2], &[5, 2, 0]]));

        assert_eq!(colors.count(2), 3);
        assert_eq!(colors.count(9), 0);
        assert_eq!(colors.count(42), 0);
        assert_eq!(colors.total(), 6);
        assert_eq!(colors.present(), vec![0, 2, 5]);
        assert_eq!(colors.counts().iter().sum::<usize>(), colors.total());
    }

    // Tests accumulation over several grids equals pairwise merging
    #[test]
    fn test_over_many_grids() {
        let first = grid(&[&[1, 1]]);
        let second = grid(&[&[1], &[3]]);

        let accumulated = ColorDistribution::over([&first, &second]);
        let merged = ColorDistribution::of(&first).merged(&ColorDistribution::of(&second));

        assert_eq!(accumulated, merged);
        assert_eq!(accumulated.count(1), 3);
        assert_eq!(accumulated.count(3), 1);
        assert_eq!(
            ColorDistribution::over(std::iter::empty::<&Grid>()),
            ColorDistribution::default()
        );
    }

    // Tests the smallest color wins a frequency tie
    // Verified by dropping the reversal before max_by_key
    #[test]
    fn test_dominant_color() {
        assert_eq!(
            ColorDistribution::of(&grid(&[&[4, 4, 7, 7, 1]])).dominant(),
            Some(4)
        );
        assert_eq!(ColorDistribution::of(&grid(&[&[8, 3, 8]])).dominant(), Some(8));
        assert_eq!(ColorDistribution::of(&Grid::empty()).dominant(), None);
    }

    #[test]
    fn test_frequency() {
        let colors = ColorDistribution::of(&grid(&[&[1, 0, 0, 0]]));
        assert!((colors.frequency(0) - 0.75).abs() < f64::EPSILON);
        assert!((colors.frequency(1) - 0.25).abs() < f64::EPSILON);
        assert!(ColorDistribution::default().frequency(0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_absent_from() {
        let input = ColorDistribution::of(&grid(&[&[1, 2, 3]]));
        let output = ColorDistribution::of(&grid(&[&[3, 4, 0]]));

        assert_eq!(output.absent_from(&input), vec![0, 4]);
        assert_eq!(input.absent_from(&output), vec![1, 2]);
        assert!(input.absent_from(&input).is_empty());
    }
}
