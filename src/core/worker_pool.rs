// src/core/worker_pool.rs

//! A bounded, reusable pool of worker threads.
//!
//! The pool is built once, reused for any number of `run_all` rounds and released
//! exactly once, either explicitly through `release` or implicitly when dropped.
//! Every round blocks the caller until all of its tasks have completed.

use std::panic::{self, AssertUnwindSafe};

use log::{debug, trace};
use rayon::prelude::*;

use crate::core::error::{Result, SieveError};
use crate::core::threads::resolve_worker_count;

pub struct WorkerPool {
    label: &'static str,
    threads: usize,
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    /// Creates a pool with `requested` workers (non-positive means hardware default).
    pub fn new(label: &'static str, requested: isize) -> Result<Self> {
        let threads = resolve_worker_count(requested);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{}-worker-{}", label, i))
            .build()?;
        debug!("Created worker pool '{}' with {} threads", label, threads);
        Ok(WorkerPool {
            label,
            threads,
            pool: Some(pool),
        })
    }

    /// Runs `body` with a fresh pool and releases the pool on every exit path.
    pub fn scoped<T, F>(label: &'static str, requested: isize, body: F) -> Result<T>
    where
        F: FnOnce(&WorkerPool) -> Result<T>,
    {
        let mut pool = WorkerPool::new(label, requested)?;
        let outcome = body(&pool);
        pool.release()?;
        outcome
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_released(&self) -> bool {
        self.pool.is_none()
    }

    /// Fails with `PoolReleased` once the pool has been torn down.
    pub fn ensure_open(&self) -> Result<()> {
        if self.is_released() {
            return Err(SieveError::PoolReleased { pool: self.label });
        }
        Ok(())
    }

    /// Submits every task and waits for all of them.
    ///
    /// Results come back in submission order. A task that panics aborts the whole
    /// round with `ComputationFailed`; partial results are never returned.
    pub fn run_all<T, F>(&self, stage: &'static str, tasks: Vec<F>) -> Result<Vec<T>>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        let pool = self
            .pool
            .as_ref()
            .ok_or(SieveError::PoolReleased { pool: self.label })?;
        trace!("Pool '{}' running {} tasks for {}", self.label, tasks.len(), stage);

        panic::catch_unwind(AssertUnwindSafe(|| {
            pool.install(|| tasks.into_par_iter().map(|task| task()).collect())
        }))
        .map_err(|payload| SieveError::from_panic(stage, payload))
    }

    /// Tears the worker threads down. Releasing twice is an error.
    pub fn release(&mut self) -> Result<()> {
        match self.pool.take() {
            Some(pool) => {
                drop(pool);
                debug!("Released worker pool '{}'", self.label);
                Ok(())
            }
            None => Err(SieveError::PoolReleased { pool: self.label }),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.pool.take().is_some() {
            debug!("Released worker pool '{}' on drop", self.label);
        }
    }
}
