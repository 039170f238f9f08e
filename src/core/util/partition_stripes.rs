use crate::core::data::grid_size::GridSize;
use crate::core::data::task::{Axis, Task};
use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::warn;

/// Most tasks a single partition may hold.
pub const MAX_TASKS: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    #[error("{thread_count} threads x {granularity} tasks per thread overflows the task count")]
    CountOverflow {
        thread_count: usize,
        granularity: usize,
    },
    #[error("{task_count} tasks exceed the limit of {limit}")]
    TooManyTasks { task_count: usize, limit: usize },
}

/// Cuts the grid into `thread_count * granularity` stripes along `axis`.
pub fn partition_stripes(
    size: GridSize,
    thread_count: NonZeroUsize,
    granularity: NonZeroUsize,
    axis: Axis,
) -> Result<Vec<Task>, PartitionError> {
    let task_count = thread_count
        .checked_mul(granularity)
        .ok_or(PartitionError::CountOverflow {
            thread_count: thread_count.get(),
            granularity: granularity.get(),
        })?;

    partition_by_count(size, task_count, axis)
}

/// Cuts the grid into exactly `task_count` stripes along `axis`.
///
/// Every stripe is `ceil(extent / task_count)` thick except the last ones,
/// which are clipped to the grid edge. Rounding the thickness up can leave
/// trailing tasks empty, as can asking for more tasks than rows (or
/// columns); empty tasks are kept so the list always has `task_count`
/// entries.
pub fn partition_by_count(
    size: GridSize,
    task_count: NonZeroUsize,
    axis: Axis,
) -> Result<Vec<Task>, PartitionError> {
    let count = task_count.get();
    if count > MAX_TASKS {
        return Err(PartitionError::TooManyTasks {
            task_count: count,
            limit: MAX_TASKS,
        });
    }

    let extent = axis.extent(size) as usize;
    let thickness = extent.div_ceil(count);

    let tasks: Vec<Task> = (0..count)
        .map(|index| {
            let start = index.saturating_mul(thickness).min(extent);
            let end = start.saturating_add(thickness).min(extent);

            Task::new(axis, start as u32, (end - start) as u32)
        })
        .collect();

    let empty = tasks.iter().filter(|task| task.is_empty()).count();
    if empty > 0 {
        warn!(
            task_count = count,
            empty,
            extent,
            %axis,
            "InvalidPartition: {empty} of {count} tasks cover no {axis} and will be skipped"
        );
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn bounds(tasks: &[Task]) -> Vec<(u32, u32)> {
        tasks.iter().map(|task| (task.start(), task.end())).collect()
    }

    fn assert_exact_cover(size: GridSize, tasks: &[Task]) {
        let mut seen = HashSet::new();
        let mut total = 0;

        for task in tasks {
            for point in task.points(size) {
                assert!(size.contains_point(point), "{point} outside {size}");
                assert!(seen.insert(point), "{point} covered twice");
                total += 1;
            }
        }

        assert_eq!(total, size.cell_count());
    }

    #[test]
    fn test_more_tasks_than_rows_leaves_trailing_empty_task() {
        let size = GridSize::new(10, 3).unwrap();

        let tasks = partition_by_count(size, nz(4), Axis::Row).unwrap();

        assert_eq!(bounds(&tasks), vec![(0, 1), (1, 2), (2, 3), (3, 3)]);
        assert!(tasks[3].is_empty());
        assert_exact_cover(size, &tasks);
    }

    #[test]
    fn test_uneven_split_clips_last_stripe() {
        let size = GridSize::new(7, 10).unwrap();

        let tasks = partition_by_count(size, nz(3), Axis::Row).unwrap();

        assert_eq!(bounds(&tasks), vec![(0, 4), (4, 8), (8, 10)]);
        assert_exact_cover(size, &tasks);
    }

    #[test]
    fn test_thickness_rounding_can_empty_several_trailing_tasks() {
        let size = GridSize::new(5, 10).unwrap();

        let tasks = partition_by_count(size, nz(4), Axis::Column).unwrap();

        assert_eq!(bounds(&tasks), vec![(0, 2), (2, 4), (4, 5), (5, 5)]);
        assert!(tasks.iter().all(|task| task.axis() == Axis::Column));
        assert_exact_cover(size, &tasks);
    }

    #[test]
    fn test_task_count_is_threads_times_granularity() {
        let size = GridSize::new(64, 48).unwrap();

        let tasks = partition_stripes(size, nz(3), nz(4), Axis::Row).unwrap();

        assert_eq!(tasks.len(), 12);
        assert_exact_cover(size, &tasks);
    }

    #[test]
    fn test_single_task_covers_whole_grid() {
        let size = GridSize::new(9, 4).unwrap();

        let tasks = partition_stripes(size, nz(1), nz(1), Axis::Column).unwrap();

        assert_eq!(tasks, vec![Task::new(Axis::Column, 0, 9)]);
    }

    #[test]
    fn test_exact_cover_across_many_shapes() {
        for width in 1..=12 {
            for height in 1..=12 {
                let size = GridSize::new(width, height).unwrap();
                for threads in 1..=5 {
                    for granularity in 1..=3 {
                        for axis in [Axis::Row, Axis::Column] {
                            let tasks =
                                partition_stripes(size, nz(threads), nz(granularity), axis)
                                    .unwrap();

                            assert_eq!(tasks.len(), threads * granularity);
                            assert_exact_cover(size, &tasks);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_partition_is_deterministic() {
        let size = GridSize::new(31, 17).unwrap();

        let first = partition_stripes(size, nz(4), nz(3), Axis::Row).unwrap();
        let second = partition_stripes(size, nz(4), nz(3), Axis::Row).unwrap();

        assert_eq!(first, second);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn partition_logs(size: GridSize, task_count: usize, axis: Axis) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            partition_by_count(size, nz(task_count), axis).unwrap();
        });

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_warns_when_rounding_leaves_an_empty_tail() {
        let logs = partition_logs(GridSize::new(5, 10).unwrap(), 4, Axis::Column);

        assert!(logs.contains("InvalidPartition"), "{logs}");
        assert!(logs.contains("empty=1"), "{logs}");
    }

    #[test]
    fn test_warns_when_tasks_outnumber_rows() {
        let logs = partition_logs(GridSize::new(10, 3).unwrap(), 4, Axis::Row);

        assert!(logs.contains("InvalidPartition"), "{logs}");
    }

    #[test]
    fn test_even_split_does_not_warn() {
        let logs = partition_logs(GridSize::new(8, 8).unwrap(), 4, Axis::Row);

        assert!(!logs.contains("InvalidPartition"), "{logs}");
    }

    #[test]
    fn test_task_count_above_limit_is_rejected() {
        let size = GridSize::new(4, 4).unwrap();

        let result = partition_by_count(size, nz(MAX_TASKS + 1), Axis::Row);

        assert_eq!(
            result,
            Err(PartitionError::TooManyTasks {
                task_count: MAX_TASKS + 1,
                limit: MAX_TASKS
            })
        );
    }

    #[test]
    fn test_overflowing_threads_times_granularity_is_rejected() {
        let size = GridSize::new(4, 4).unwrap();

        let result = partition_stripes(size, nz(2), nz(usize::MAX / 2 + 1), Axis::Row);

        assert_eq!(
            result,
            Err(PartitionError::CountOverflow {
                thread_count: 2,
                granularity: usize::MAX / 2 + 1
            })
        );
    }
}
