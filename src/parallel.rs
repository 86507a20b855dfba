use rayon::prelude::*;

use crate::config::ExecutionMode;

/// Applies a function to every item and returns results aligned with the
/// input, whatever order the items actually complete in.
pub trait Parallelizer: Sync {
    fn run<T, R, F>(
        &self,
        items: Vec<T>,
        f: F,
        num_workers: usize,
        mode: ExecutionMode,
    ) -> eyre::Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync;
}

/// Runs items on a dedicated rayon pool sized to `num_workers`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RayonParallelizer;

impl Parallelizer for RayonParallelizer {
    fn run<T, R, F>(
        &self,
        items: Vec<T>,
        f: F,
        num_workers: usize,
        mode: ExecutionMode,
    ) -> eyre::Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        if mode == ExecutionMode::Serial || num_workers == 1 {
            return SerialParallelizer.run(items, f, num_workers, mode);
        }

        // rayon picks one thread per core when given zero
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .build()?;

        log::debug!(
            "running {} items on {} threads",
            items.len(),
            pool.current_num_threads()
        );

        let results = pool.install(|| items.into_par_iter().map(f).collect::<Vec<_>>());
        Ok(results)
    }
}

/// Runs every item on the calling thread, in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialParallelizer;

impl Parallelizer for SerialParallelizer {
    fn run<T, R, F>(
        &self,
        items: Vec<T>,
        f: F,
        _num_workers: usize,
        _mode: ExecutionMode,
    ) -> eyre::Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        Ok(items.into_iter().map(f).collect())
    }
}

/// Drops failure markers, keeping survivors in their original order.
pub fn strip_none<T>(results: Vec<Option<T>>) -> Vec<T> {
    results.into_iter().flatten().collect()
}
