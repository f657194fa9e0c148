//! Sequential pipelines of collection-to-collection stages.
//!
//! [`apply_operations`] folds a collection through an ordered list of [`Operation`]s. Only
//! [`Operation::Stage`] entries are invoked; [`Operation::Inert`] entries (values that are not
//! callable, e.g. a `null` that ended up in an operation list) are skipped.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::execution::{ExecutionEvent, ExecutionObserver};
use crate::types::Value;

/// A collection-to-collection transformation.
pub type Stage = Arc<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>;

/// One entry of an operation list.
#[derive(Clone)]
pub enum Operation {
    /// An invokable stage.
    Stage(Stage),
    /// A non-invokable entry. Never called; the collection passes through unchanged.
    Inert(Value),
}

impl Operation {
    /// Wrap a closure as a stage.
    pub fn stage<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Vec<Value> + Send + Sync + 'static,
    {
        Operation::Stage(Arc::new(f))
    }

    /// Stage keeping only the items accepted by `predicate`.
    pub fn filter<P>(predicate: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::stage(move |mut items| {
            items.retain(|v| predicate(v));
            items
        })
    }

    /// Stage sorting items (stably) with `comparator`.
    pub fn sort<C>(comparator: C) -> Self
    where
        C: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        Self::stage(move |mut items| {
            items.sort_by(|a, b| comparator(a, b));
            items
        })
    }

    /// Stage replacing every item with `mapper(item)`.
    pub fn map<M>(mapper: M) -> Self
    where
        M: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::stage(move |items| items.iter().map(|v| mapper(v)).collect())
    }

    pub fn is_invokable(&self) -> bool {
        matches!(self, Operation::Stage(_))
    }
}

impl From<Value> for Operation {
    fn from(v: Value) -> Self {
        Operation::Inert(v)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Stage(_) => f.write_str("Stage(..)"),
            Operation::Inert(v) => f.debug_tuple("Inert").field(v).finish(),
        }
    }
}

/// Thread `data` through `operations` in order.
///
/// - If `data` is not a [`Value::List`], returns an empty vector without running anything.
/// - [`Operation::Inert`] entries are skipped.
/// - With no invokable operations, returns the original items unchanged.
pub fn apply_operations<I>(data: Value, operations: I) -> Vec<Value>
where
    I: IntoIterator<Item = Operation>,
{
    let Value::List(items) = data else {
        return Vec::new();
    };
    operations
        .into_iter()
        .fold(items, |current, operation| match operation {
            Operation::Stage(stage) => stage(current),
            Operation::Inert(_) => current,
        })
}

/// A reusable, ordered list of operations with optional event reporting.
///
/// ```rust
/// use record_ops::processing::{create_filter, create_mapper, create_sorter, Pipeline, SortOrder};
/// use record_ops::types::{Record, Value};
///
/// let data = Value::List(vec![
///     Value::from(Record::new().with("name", "A").with("rating", 3)),
///     Value::from(Record::new().with("name", "B").with("rating", 5)),
///     Value::from(Record::new().with("name", "C").with("rating", 4)),
/// ]);
///
/// let top = Pipeline::new()
///     .filter(create_filter("rating", ">=", Value::from(4)))
///     .sort(create_sorter("rating", SortOrder::Desc))
///     .map(create_mapper(&["name"]))
///     .run(data);
///
/// assert_eq!(
///     top,
///     vec![
///         Value::from(Record::new().with("name", "B")),
///         Value::from(Record::new().with("name", "C")),
///     ]
/// );
/// ```
#[derive(Clone, Default)]
pub struct Pipeline {
    operations: Vec<Operation>,
    observer: Option<Arc<dyn ExecutionObserver>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn push(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn stage<F>(self, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Vec<Value> + Send + Sync + 'static,
    {
        self.push(Operation::stage(f))
    }

    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.push(Operation::filter(predicate))
    }

    pub fn sort<C>(self, comparator: C) -> Self
    where
        C: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.push(Operation::sort(comparator))
    }

    pub fn map<M>(self, mapper: M) -> Self
    where
        M: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.push(Operation::map(mapper))
    }

    /// Append a non-invokable entry; it is skipped when the pipeline runs.
    pub fn inert(self, value: impl Into<Value>) -> Self {
        self.push(Operation::Inert(value.into()))
    }

    /// Attach an observer for per-stage events.
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Run the pipeline. Same semantics as [`apply_operations`].
    pub fn run(&self, data: Value) -> Vec<Value> {
        let Some(observer) = self.observer.as_ref() else {
            return apply_operations(data, self.operations.iter().cloned());
        };

        let start = Instant::now();
        let items = match data {
            Value::List(items) => items,
            other => {
                observer.on_event(&ExecutionEvent::InputRejected { kind: other.kind() });
                return Vec::new();
            }
        };

        let mut current = items;
        for (index, operation) in self.operations.iter().enumerate() {
            match operation {
                Operation::Stage(stage) => {
                    let input_rows = current.len();
                    current = stage(current);
                    observer.on_event(&ExecutionEvent::StageApplied {
                        index,
                        input_rows,
                        output_rows: current.len(),
                    });
                }
                Operation::Inert(_) => {
                    observer.on_event(&ExecutionEvent::StageSkipped { index });
                }
            }
        }

        observer.on_event(&ExecutionEvent::PipelineFinished {
            elapsed: start.elapsed(),
            output_rows: current.len(),
        });
        current
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("operations", &self.operations)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}
