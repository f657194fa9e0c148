//! Execution engine for running record operations with configurable parallelism.
//!
//! This module sits "above" [`crate::processing`] and provides:
//!
//! - Parallel (chunked) execution for filter/map, and a parallel stable sort
//! - Resource limits / throttling (in-flight chunks)
//! - Real-time metrics + observer hooks for monitoring
//!
//! Results always come back in the same order the sequential functions would produce.

mod observer;
mod semaphore;

use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::error::{OpsError, OpsResult};
use crate::processing::{reduce, ReduceOp};
use crate::types::Value;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, StdErrExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of records per chunk.
    pub chunk_size: usize,
    /// Upper bound on concurrently executing chunks, on top of `num_threads`.
    pub max_in_flight_chunks: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
            chunk_size: 4_096,
            max_in_flight_chunks: n.max(1),
        }
    }
}

/// A configurable execution engine for in-memory record collections.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidOptions`] if `chunk_size == 0`, `max_in_flight_chunks == 0`,
    /// or `num_threads == Some(0)`, and [`OpsError::ThreadPool`] if the pool cannot be built.
    pub fn new(opts: ExecutionOptions) -> OpsResult<Self> {
        if opts.chunk_size == 0 {
            return Err(invalid("chunk_size must be > 0"));
        }
        if opts.max_in_flight_chunks == 0 {
            return Err(invalid("max_in_flight_chunks must be > 0"));
        }
        if opts.num_threads == Some(0) {
            return Err(invalid("num_threads must be > 0 when set"));
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.opts
    }

    /// Parallel [`crate::processing::filter`].
    pub fn filter_parallel<F>(&self, items: &[Value], predicate: F) -> Vec<Value>
    where
        F: Fn(&Value) -> bool + Send + Sync,
    {
        self.run_chunked(items, &|chunk: &[Value]| {
            chunk.iter().filter(|v| predicate(v)).cloned().collect()
        })
    }

    /// Parallel [`crate::processing::map`].
    pub fn map_parallel<F>(&self, items: &[Value], mapper: F) -> Vec<Value>
    where
        F: Fn(&Value) -> Value + Send + Sync,
    {
        self.run_chunked(items, &|chunk: &[Value]| chunk.iter().map(&mapper).collect())
    }

    /// Parallel stable sort; equivalent to [`crate::processing::sort`].
    pub fn sort_parallel<F>(&self, items: &[Value], comparator: F) -> Vec<Value>
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync,
    {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);
        self.emit(ExecutionEvent::SortStarted {
            row_count: items.len(),
        });

        let mut out = items.to_vec();
        self.pool.install(|| out.par_sort_by(|a, b| comparator(a, b)));
        self.metrics.on_rows_processed(out.len());
        self.metrics.on_rows_emitted(out.len());

        self.finish_run(start);
        out
    }

    /// Reduce a field using the built-in reduce operation.
    ///
    /// This is sequential, but is tracked via the observer/metrics hooks.
    pub fn reduce(&self, items: &[Value], field: &str, op: ReduceOp) -> Value {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);
        self.emit(ExecutionEvent::ReduceStarted {
            field: field.to_string(),
            op,
        });

        let out = reduce(items, field, op);
        self.metrics.on_rows_processed(items.len());

        self.emit(ExecutionEvent::ReduceFinished { result: out.clone() });
        self.finish_run(start);
        out
    }

    fn run_chunked(
        &self,
        items: &[Value],
        per_chunk: &(dyn Fn(&[Value]) -> Vec<Value> + Send + Sync),
    ) -> Vec<Value> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted);

        let sem = Semaphore::new(self.opts.max_in_flight_chunks);
        let ranges = chunk_ranges(items.len(), self.opts.chunk_size);

        let chunks: Vec<Vec<Value>> = self.pool.install(|| {
            ranges
                .into_par_iter()
                .map(|range| {
                    let permit = sem.acquire();
                    let waited = permit.waited();
                    if waited > Duration::ZERO {
                        self.metrics.on_throttle_wait(waited);
                        self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                    }

                    self.metrics.on_chunk_start();
                    self.emit(ExecutionEvent::ChunkStarted {
                        start_row: range.start,
                        row_count: range.len(),
                    });

                    let chunk = &items[range];
                    self.metrics.on_rows_processed(chunk.len());
                    let out = per_chunk(chunk);
                    self.metrics.on_rows_emitted(out.len());

                    self.emit(ExecutionEvent::ChunkFinished {
                        output_rows: out.len(),
                    });
                    self.metrics.on_chunk_end();
                    drop(permit);
                    out
                })
                .collect()
        });

        let out = chunks.into_iter().flatten().collect::<Vec<_>>();
        self.finish_run(start);
        out
    }

    fn finish_run(&self, start: Instant) {
        let elapsed = start.elapsed();
        self.metrics.end_run(elapsed);
        self.emit(ExecutionEvent::RunFinished {
            elapsed,
            metrics: self.metrics.snapshot(),
        });
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn invalid(message: &str) -> OpsError {
    OpsError::InvalidOptions {
        message: message.to_string(),
    }
}

fn chunk_ranges(row_count: usize, chunk_size: usize) -> Vec<Range<usize>> {
    (0..row_count)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(row_count))
        .collect()
}
