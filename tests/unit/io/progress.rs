//! Tests for batch progress tracking

#[cfg(test)]
mod tests {
    use crate::{dataset, pair};
    use gridgolf::algorithm::library::standard_library;
    use gridgolf::algorithm::search::SearchController;
    use gridgolf::io::error::dataset_error;
    use gridgolf::io::progress::ProgressManager;
    use std::path::Path;

    // Tests ProgressManager construction
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_idle() {
        let pm = ProgressManager::new();
        pm.start_task(Path::new("task.json"));
        pm.complete_task(&Err(dataset_error(&"task", &"bad")));
        assert_eq!(pm.tally(), (0, 0));
        pm.finish();

        assert_eq!(ProgressManager::default().tally(), (0, 0));
    }

    // Tests the tally counts solved tasks among finished ones
    // Verified by counting every finished task as solved
    #[test]
    fn test_tally_tracks_solved() {
        let mut pm = ProgressManager::new();
        pm.initialize(3);

        let controller = SearchController::new(standard_library());
        let solved = controller.search(&dataset(vec![pair(&[&[1]], &[&[1]])], vec![], vec![]));
        let unsolved = controller.search(&dataset(
            vec![pair(&[&[1, 2]], &[&[3, 3, 3, 3, 3, 3, 3]])],
            vec![],
            vec![],
        ));

        pm.start_task(Path::new("a.json"));
        pm.complete_task(&Ok(solved));
        pm.start_task(Path::new("b.json"));
        pm.complete_task(&Ok(unsolved));
        pm.start_task(Path::new("c.json"));
        pm.complete_task(&Err(dataset_error(&"c", &"empty train")));

        assert_eq!(pm.tally(), (1, 3));
        pm.finish();
    }
}
