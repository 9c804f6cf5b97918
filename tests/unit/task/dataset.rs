//! Tests for dataset construction and validation

#[cfg(test)]
mod tests {
    use crate::{dataset, grid, pair};
    use gridgolf::SolverError;
    use gridgolf::spatial::grid::Grid;
    use gridgolf::task::dataset::{RawExample, RawTask, TaskDataset};
    use gridgolf::task::example::{ExampleGroup, ExamplePair};

    fn raw(input: Vec<Vec<i64>>, output: Vec<Vec<i64>>) -> RawExample {
        RawExample { input, output }
    }

    #[test]
    fn test_groups_and_labels() {
        let ds = dataset(
            vec![pair(&[&[1]], &[&[1]]), pair(&[&[2]], &[&[2]])],
            vec![pair(&[&[3]], &[&[3]])],
            vec![pair(&[&[4]], &[&[4]])],
        );

        assert_eq!(ds.name(), "task");
        assert_eq!(ds.train().len(), 2);
        assert_eq!(ds.group(ExampleGroup::Test).len(), 1);
        assert_eq!(ds.pair_count(), 4);

        let labels: Vec<(ExampleGroup, usize)> = ds
            .labeled_pairs()
            .map(|(group, index, _)| (group, index))
            .collect();
        assert_eq!(
            labels,
            vec![
                (ExampleGroup::Train, 0),
                (ExampleGroup::Train, 1),
                (ExampleGroup::Test, 0),
                (ExampleGroup::ArcGen, 0),
            ]
        );
    }

    // Tests an empty selection group is a dataset error
    // Verified by removing the empty train check
    #[test]
    fn test_empty_train_rejected() {
        let result = TaskDataset::new("empty", vec![], vec![pair(&[&[1]], &[&[1]])], vec![]);
        assert!(matches!(result, Err(SolverError::Dataset { ref task, .. }) if task == "empty"));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let big = Grid::filled(31, 2, 0).expect("valid color");
        let result = TaskDataset::new(
            "big",
            vec![ExamplePair::new(grid(&[&[1]]), grid(&[&[1]]))],
            vec![],
            vec![ExamplePair::new(big, grid(&[&[1]]))],
        );
        let error = result.expect_err("31 rows exceed the limit");
        assert!(error.to_string().contains("arc-gen pair 0 input is 31x2"));

        let limit = Grid::filled(30, 30, 0).expect("valid color");
        assert!(
            TaskDataset::new("edge", vec![ExamplePair::new(limit.clone(), limit)], vec![], vec![])
                .is_ok()
        );
    }

    #[test]
    fn test_from_raw_converts_every_group() {
        let task = RawTask {
            train: vec![raw(vec![vec![1, 2]], vec![vec![2, 1]])],
            test: vec![raw(vec![vec![3]], vec![vec![3]])],
            arc_gen: vec![],
        };
        let ds = TaskDataset::from_raw("raw", &task).expect("valid task");

        assert_eq!(ds.train().first().map(|p| p.output.clone()), Some(grid(&[&[2, 1]])));
        assert_eq!(ds.group(ExampleGroup::Test).len(), 1);
        assert!(ds.group(ExampleGroup::ArcGen).is_empty());
    }

    // Tests malformed rows surface as dataset errors naming the pair
    #[test]
    fn test_from_raw_reports_malformed_pair() {
        let ragged = RawTask {
            train: vec![raw(vec![vec![1]], vec![vec![1]])],
            test: vec![raw(vec![vec![1, 2], vec![3]], vec![vec![1]])],
            arc_gen: vec![],
        };
        let error = TaskDataset::from_raw("ragged", &ragged).expect_err("ragged input");
        assert!(error.is_task_local());
        assert!(error.to_string().contains("test pair 0 input"));

        let out_of_range = RawTask {
            train: vec![raw(vec![vec![1]], vec![vec![12]])],
            ..RawTask::default()
        };
        let error = TaskDataset::from_raw("range", &out_of_range).expect_err("value 12");
        assert!(error.to_string().contains("train pair 0 output"));
    }
}
