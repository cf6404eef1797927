use crate::error::RunError;

/// A fixed group of scoped worker threads, one per task.
///
/// Every task gets its own named thread inside a `crossbeam::thread::scope`, so
/// tasks may borrow from the caller. `execute` blocks until every thread has
/// returned; there is no timeout. A task that panics or returns an error is
/// reported to the caller instead of being lost, but the remaining tasks still
/// run to completion before `execute` returns.
pub struct TaskGroup {
    name: &'static str,
}

impl TaskGroup {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Run `processor` once per `(task_id, item)` pair, each on its own thread.
    ///
    /// Results come back in the order the tasks were given. If any task failed,
    /// the first failure in task order is returned.
    pub fn execute<T, R, F>(&self, tasks: Vec<(usize, T)>, processor: F) -> Result<Vec<R>, RunError>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R, RunError> + Sync,
    {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let processor = &processor;
        let task_count = tasks.len();

        crossbeam::thread::scope(|s| {
            let mut handles = Vec::with_capacity(task_count);
            let mut first_error = None;

            for (task_id, item) in tasks {
                let spawned = s
                    .builder()
                    .name(format!("{}-{}", self.name, task_id))
                    .spawn(move |_| processor(item));

                match spawned {
                    Ok(handle) => handles.push((task_id, handle)),
                    Err(source) => {
                        tracing::error!("Failed to spawn {}-{}: {}", self.name, task_id, source);
                        first_error.get_or_insert(RunError::Spawn {
                            worker_id: task_id,
                            source,
                        });
                        break;
                    }
                }
            }

            tracing::debug!("{} {} thread(s) running", handles.len(), self.name);

            let mut results = Vec::with_capacity(handles.len());
            for (task_id, handle) in handles {
                match handle.join() {
                    Ok(Ok(result)) => results.push(result),
                    Ok(Err(error)) => {
                        tracing::error!("{}-{} failed: {}", self.name, task_id, error);
                        first_error.get_or_insert(error);
                    }
                    Err(_) => {
                        tracing::error!("{}-{} panicked", self.name, task_id);
                        first_error.get_or_insert(RunError::WorkerPanicked { worker_id: task_id });
                    }
                }
            }

            match first_error {
                Some(error) => Err(error),
                None => Ok(results),
            }
        })
        .map_err(|_| RunError::ScopePanicked)?
    }
}
