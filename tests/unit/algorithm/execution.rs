//! Tests for candidate execution and per-example faults

#[cfg(test)]
mod tests {
    use crate::grid;
    use gridgolf::algorithm::execution::{FaultKind, RawGrid, execute};
    use gridgolf::algorithm::library::{Aggregate, MirrorAxis, MirrorSource, Side, Template};
    use gridgolf::spatial::grid::{Grid, MalformedGrid};

    fn run(template: Template, rows: &[&[u8]]) -> Grid {
        execute(template, &grid(rows))
            .expect("no fault")
            .validate()
            .expect("well-formed output")
    }

    fn fault(template: Template, input: &Grid) -> FaultKind {
        execute(template, input).expect_err("expected a fault").kind
    }

    #[test]
    fn test_rotate90_clockwise() {
        assert_eq!(
            run(Template::Rotate90, &[&[1, 2], &[3, 4]]),
            grid(&[&[3, 1], &[4, 2]])
        );
    }

    // Tests self-similar tiling gated by the input's own cells
    // Verified by swapping the gate and source indices
    #[test]
    fn test_conditional_tile_fixed_size() {
        let expected = grid(&[
            &[0, 0, 0, 0, 7, 7, 0, 7, 7],
            &[0, 0, 0, 7, 7, 7, 7, 7, 7],
            &[0, 0, 0, 0, 7, 7, 0, 7, 7],
            &[0, 7, 7, 0, 7, 7, 0, 7, 7],
            &[7, 7, 7, 7, 7, 7, 7, 7, 7],
            &[0, 7, 7, 0, 7, 7, 0, 7, 7],
            &[0, 0, 0, 0, 7, 7, 0, 7, 7],
            &[0, 0, 0, 7, 7, 7, 7, 7, 7],
            &[0, 0, 0, 0, 7, 7, 0, 7, 7],
        ]);
        let input: &[&[u8]] = &[&[0, 7, 7], &[7, 7, 7], &[0, 7, 7]];
        assert_eq!(run(Template::ConditionalTile { size: 3 }, input), expected);
        assert_eq!(run(Template::ConditionalTileGeneric, input), expected);
    }

    #[test]
    fn test_conditional_tile_reads_past_small_input() {
        assert_eq!(
            fault(Template::ConditionalTile { size: 3 }, &grid(&[&[1, 1], &[1, 1]])),
            FaultKind::Index
        );
    }

    // Tests a bounding box over no non-zero cells raises like an empty min
    #[test]
    fn test_crop_to_content() {
        assert_eq!(
            run(Template::CropToContent, &[&[0, 0, 0], &[0, 5, 6], &[0, 0, 0]]),
            grid(&[&[5, 6]])
        );
        let blank = grid(&[&[0, 0], &[0, 0]]);
        assert_eq!(fault(Template::CropToContent, &blank), FaultKind::Value);
    }

    #[test]
    fn test_modulo_by_zero() {
        assert_eq!(
            fault(Template::Modulo { modulus: 0 }, &grid(&[&[3]])),
            FaultKind::ZeroDivision
        );
        assert_eq!(
            execute(Template::Modulo { modulus: 0 }, &Grid::empty()),
            Ok(RawGrid::default())
        );
        assert_eq!(
            run(Template::Modulo { modulus: 3 }, &[&[7, 8, 9]]),
            grid(&[&[1, 2, 0]])
        );
    }

    // Tests programs that read the first row fault on an empty grid
    #[test]
    fn test_first_row_access_on_empty_grid() {
        let empty = Grid::empty();
        assert_eq!(fault(Template::PadRows, &empty), FaultKind::Index);
        assert_eq!(fault(Template::PadBorder { color: 3 }, &empty), FaultKind::Index);
        assert_eq!(fault(Template::Fill { color: 1 }, &empty), FaultKind::Index);
        assert_eq!(execute(Template::PadColumns, &empty), Ok(RawGrid::default()));
    }

    #[test]
    fn test_narrow_crop_leaves_empty_rows() {
        let raw = execute(Template::CropColumns, &grid(&[&[1, 2], &[3, 4]])).expect("no fault");
        assert_eq!(raw, RawGrid::empty_rows(2));
        assert_eq!(raw.validate(), Err(MalformedGrid::EmptyRows { rows: 2 }));

        assert_eq!(
            execute(Template::CropRows, &grid(&[&[1], &[2]])),
            Ok(RawGrid::default())
        );
        assert_eq!(
            run(Template::CropBorder, &[&[1, 1, 1], &[1, 5, 1], &[1, 1, 1]]),
            grid(&[&[5]])
        );
    }

    #[test]
    fn test_guarded_arithmetic() {
        let row: &[&[u8]] = &[&[0, 4, 8]];
        assert_eq!(run(Template::ShiftUp { amount: 3 }, row), grid(&[&[3, 7, 8]]));
        assert_eq!(run(Template::ShiftDown { amount: 5 }, row), grid(&[&[0, 4, 3]]));
        assert_eq!(run(Template::Multiply { factor: 3 }, row), grid(&[&[0, 2, 4]]));
        assert_eq!(run(Template::AddModulo { amount: 3 }, row), grid(&[&[3, 7, 1]]));
        assert_eq!(run(Template::Invert, row), grid(&[&[9, 5, 1]]));
        assert_eq!(run(Template::Binarize, row), grid(&[&[0, 1, 1]]));
    }

    // Tests scale-down drops the remainder rows and columns
    #[test]
    fn test_truncating_scale_down() {
        let g: &[&[u8]] = &[&[1, 1, 2], &[1, 1, 2], &[3, 3, 4]];
        assert_eq!(run(Template::ScaleDown { factor: 2 }, g), grid(&[&[1]]));
        assert_eq!(
            execute(Template::ScaleDown { factor: 4 }, &grid(g)),
            Ok(RawGrid::default())
        );
        assert_eq!(
            run(Template::ScaleUp { factor: 2 }, &[&[1, 2]]),
            grid(&[&[1, 1, 2, 2], &[1, 1, 2, 2]])
        );
    }

    #[test]
    fn test_halves_of_odd_width() {
        let g: &[&[u8]] = &[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]];
        assert_eq!(run(Template::Half { side: Side::Left }, g), grid(&[&[1], &[4], &[7]]));
        assert_eq!(
            run(Template::Half { side: Side::Right }, g),
            grid(&[&[2, 3], &[5, 6], &[8, 9]])
        );
        assert_eq!(run(Template::Half { side: Side::Top }, g), grid(&[&[1, 2, 3]]));
        assert_eq!(
            run(Template::Half { side: Side::Bottom }, g),
            grid(&[&[4, 5, 6], &[7, 8, 9]])
        );
        assert_eq!(
            execute(Template::Half { side: Side::Left }, &grid(&[&[1], &[2]])),
            Ok(RawGrid::empty_rows(2))
        );
    }

    #[test]
    fn test_value_selection() {
        let g: &[&[u8]] = &[&[1, 3, 2], &[3, 0, 1]];
        assert_eq!(run(Template::KeepMax, g), grid(&[&[0, 3, 0], &[3, 0, 0]]));
        assert_eq!(run(Template::KeepMin, g), grid(&[&[0, 0, 0], &[0, 0, 0]]));
        assert_eq!(
            run(Template::KeepColor { color: 1 }, g),
            grid(&[&[1, 0, 0], &[0, 0, 1]])
        );
        assert_eq!(
            run(Template::SwapColors { first: 1, second: 3 }, g),
            grid(&[&[3, 1, 2], &[1, 0, 3]])
        );
        assert_eq!(
            run(Template::Recolor { from: 3, to: 5 }, g),
            grid(&[&[1, 5, 2], &[5, 0, 1]])
        );
    }

    #[test]
    fn test_mirrors() {
        let g: &[&[u8]] = &[&[1, 2], &[3, 4]];
        assert_eq!(
            run(Template::MirrorAppend { axis: MirrorAxis::Vertical }, g),
            grid(&[&[1, 2], &[3, 4], &[3, 4], &[1, 2]])
        );
        assert_eq!(
            run(Template::MirrorAppend { axis: MirrorAxis::Both }, g),
            grid(&[&[1, 2, 2, 1], &[3, 4, 4, 3], &[3, 4, 4, 3], &[1, 2, 2, 1]])
        );
        assert_eq!(
            run(
                Template::MirrorCompletion { source: MirrorSource::TopToBottom },
                &[&[1, 2], &[0, 0], &[5, 5]]
            ),
            grid(&[&[1, 2], &[0, 0], &[1, 2]])
        );
    }

    #[test]
    fn test_row_aggregates_and_window_sum() {
        let g: &[&[u8]] = &[&[5, 6, 0], &[1, 1, 1]];
        assert_eq!(
            run(Template::RowAggregate { aggregate: Aggregate::Sum }, g),
            grid(&[&[1, 1, 1], &[3, 3, 3]])
        );
        assert_eq!(
            run(Template::RowAggregate { aggregate: Aggregate::Count }, g),
            grid(&[&[2, 2, 2], &[3, 3, 3]])
        );
        assert_eq!(
            run(Template::WindowSum { size: 2 }, g),
            grid(&[&[3, 8]])
        );
        assert_eq!(
            execute(Template::WindowSum { size: 3 }, &grid(g)),
            Ok(RawGrid::default())
        );
    }

    // Tests out-of-range values pass through execution and fail validation
    #[test]
    fn test_raw_grid_validation() {
        let raw = RawGrid::new(vec![vec![1, 12]]);
        assert!(matches!(
            raw.validate(),
            Err(MalformedGrid::ValueOutOfRange { value: 12, .. })
        ));
        assert_eq!(
            RawGrid::from(grid(&[&[4]])).rows(),
            &[vec![4_i64]]
        );
    }

    #[test]
    fn test_constant_ignores_input() {
        assert_eq!(
            run(Template::Constant { rows: 2, cols: 3, color: 1 }, &[&[9]]),
            grid(&[&[1, 1, 1], &[1, 1, 1]])
        );
        assert_eq!(
            run(Template::Checkerboard, &[&[5, 5], &[5, 5]]),
            grid(&[&[0, 1], &[1, 0]])
        );
    }
}
