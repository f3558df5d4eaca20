use crate::error::ChartError;
use parking_lot::Mutex;
use std::any::{type_name, Any, TypeId};
use std::collections::VecDeque;
use std::sync::Arc;

/// A mutation of a data source's item list.
///
/// Prefer the validating constructors; the diff engine re-checks the same
/// invariants for values built directly.
#[derive(Clone, Debug, PartialEq)]
pub enum DataSourceOperation<T> {
    Reset(Vec<T>),
    Add { items: Vec<T>, at_front: bool },
    SlidingWindow(Vec<T>),
    Remove { count: usize, at_front: bool },
    Clear,
}

impl<T> DataSourceOperation<T> {
    pub fn reset(items: Vec<T>) -> Result<Self, ChartError> {
        non_empty(&items)?;
        Ok(Self::Reset(items))
    }

    pub fn add(items: Vec<T>, at_front: bool) -> Result<Self, ChartError> {
        non_empty(&items)?;
        Ok(Self::Add { items, at_front })
    }

    pub fn sliding_window(items: Vec<T>) -> Result<Self, ChartError> {
        non_empty(&items)?;
        Ok(Self::SlidingWindow(items))
    }

    pub fn remove(count: usize, at_front: bool) -> Result<Self, ChartError> {
        if count == 0 {
            return Err(ChartError::ZeroCount);
        }
        Ok(Self::Remove { count, at_front })
    }

    pub fn clear() -> Self {
        Self::Clear
    }

    /// Incoming items carried by the operation (empty for `Remove`/`Clear`).
    pub fn items(&self) -> &[T] {
        match self {
            Self::Reset(items) | Self::Add { items, .. } | Self::SlidingWindow(items) => items,
            Self::Remove { .. } | Self::Clear => &[],
        }
    }

    /// Item count after applying the operation to `current` items.
    pub fn count_after(&self, current: usize) -> Result<usize, ChartError> {
        match self {
            Self::Reset(items) => Ok(items.len()),
            Self::Add { items, .. } => Ok(current + items.len()),
            Self::SlidingWindow(items) => {
                Ok(current - current.min(items.len()) + items.len())
            }
            Self::Remove { count, .. } => {
                if *count > current {
                    return Err(ChartError::RemoveExceedsCount {
                        requested: *count,
                        available: current,
                    });
                }
                Ok(current - count)
            }
            Self::Clear => Ok(0),
        }
    }
}

impl<T: Clone> DataSourceOperation<T> {
    /// Applies the operation to a plain item list.
    pub fn apply_to(&self, target: &mut Vec<T>) -> Result<(), ChartError> {
        self.count_after(target.len())?;
        match self {
            Self::Reset(items) => *target = items.clone(),
            Self::Add { items, at_front: true } => {
                let tail = std::mem::replace(target, items.clone());
                target.extend(tail);
            }
            Self::Add { items, at_front: false } => target.extend(items.iter().cloned()),
            Self::SlidingWindow(items) => {
                let drop = target.len().min(items.len());
                target.drain(..drop);
                target.extend(items.iter().cloned());
            }
            Self::Remove { count, at_front: true } => {
                target.drain(..*count);
            }
            Self::Remove { count, at_front: false } => {
                let keep = target.len() - count;
                target.truncate(keep);
            }
            Self::Clear => target.clear(),
        }
        Ok(())
    }
}

fn non_empty<T>(items: &[T]) -> Result<(), ChartError> {
    if items.is_empty() {
        Err(ChartError::EmptyItems)
    } else {
        Ok(())
    }
}

/// A type-erased operation as delivered on the event bus.
///
/// `item_type` is the tag a series checks before downcasting.
#[derive(Clone)]
pub struct ErasedOperation {
    item_type: TypeId,
    item_type_name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl ErasedOperation {
    pub fn new<T: Send + Sync + 'static>(operation: DataSourceOperation<T>) -> Self {
        Self {
            item_type: TypeId::of::<T>(),
            item_type_name: type_name::<T>(),
            payload: Arc::new(operation),
        }
    }

    pub fn item_type_name(&self) -> &'static str {
        self.item_type_name
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.item_type == TypeId::of::<T>()
    }

    pub fn downcast<T: 'static>(&self) -> Option<&DataSourceOperation<T>> {
        self.payload.downcast_ref::<DataSourceOperation<T>>()
    }
}

impl std::fmt::Debug for ErasedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedOperation")
            .field("item_type", &self.item_type_name)
            .finish()
    }
}

struct SourceState<T> {
    items: Vec<T>,
    pending: VecDeque<DataSourceOperation<T>>,
}

/// Caller-facing handle to a named data source.
///
/// Operations are validated and applied to a local mirror immediately, then
/// queued until the next full layout pass drains them.
pub struct DataSource<T> {
    name: Arc<str>,
    state: Arc<Mutex<SourceState<T>>>,
}

impl<T> Clone for DataSource<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> DataSource<T> {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(SourceState {
                items: Vec::new(),
                pending: VecDeque::new(),
            })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current items.
    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    pub fn reset(&self, items: Vec<T>) -> Result<(), ChartError> {
        self.push(DataSourceOperation::reset(items)?)
    }

    pub fn add(&self, items: Vec<T>, at_front: bool) -> Result<(), ChartError> {
        self.push(DataSourceOperation::add(items, at_front)?)
    }

    pub fn sliding_window(&self, items: Vec<T>) -> Result<(), ChartError> {
        self.push(DataSourceOperation::sliding_window(items)?)
    }

    pub fn remove(&self, count: usize, at_front: bool) -> Result<(), ChartError> {
        self.push(DataSourceOperation::remove(count, at_front)?)
    }

    pub fn clear(&self) -> Result<(), ChartError> {
        self.push(DataSourceOperation::clear())
    }

    fn push(&self, operation: DataSourceOperation<T>) -> Result<(), ChartError> {
        let mut state = self.state.lock();
        operation.apply_to(&mut state.items)?;
        state.pending.push_back(operation);
        tracing::trace!(source = %self.name, pending = state.pending.len(), "queued operation");
        Ok(())
    }
}

/// Object-safe view of a [`DataSource`] used by the orchestrator.
pub trait ErasedSource {
    fn name(&self) -> &str;

    /// `true` while operations are queued.
    fn is_dirty(&self) -> bool;

    /// Takes the queued operations in order.
    fn drain(&self) -> Vec<ErasedOperation>;

    /// Drops the queue and describes the current items as one operation.
    fn snapshot(&self) -> ErasedOperation;
}

impl<T: Clone + Send + Sync + 'static> ErasedSource for DataSource<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_dirty(&self) -> bool {
        !self.state.lock().pending.is_empty()
    }

    fn drain(&self) -> Vec<ErasedOperation> {
        let mut state = self.state.lock();
        state.pending.drain(..).map(ErasedOperation::new).collect()
    }

    fn snapshot(&self) -> ErasedOperation {
        let mut state = self.state.lock();
        state.pending.clear();
        if state.items.is_empty() {
            ErasedOperation::new(DataSourceOperation::<T>::Clear)
        } else {
            ErasedOperation::new(DataSourceOperation::Reset(state.items.clone()))
        }
    }
}
