//! Unit tests mirroring the `src/` tree, compiled as a single test target

mod analysis;

use gridgolf::spatial::grid::Grid;
use gridgolf::task::dataset::TaskDataset;
use gridgolf::task::example::ExamplePair;

// Grid from literal rows
fn grid(rows: &[&[u8]]) -> Grid {
    let rows: Vec<Vec<u8>> = rows.iter().map(|row| row.to_vec()).collect();
    Grid::from_rows(&rows).expect("literal rows form a grid")
}

// Example pair from literal rows
fn pair(input: &[&[u8]], output: &[&[u8]]) -> ExamplePair {
    ExamplePair::new(grid(input), grid(output))
}

// Dataset named "task" from train, test and arc-gen pairs
fn dataset(
    train: Vec<ExamplePair>,
    test: Vec<ExamplePair>,
    arc_gen: Vec<ExamplePair>,
) -> TaskDataset {
    TaskDataset::new("task", train, test, arc_gen).expect("valid dataset")
}
