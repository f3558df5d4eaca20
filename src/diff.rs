//! Incremental diffing of data-source operations.
//!
//! [`diff`] turns an operation plus the current item count into an ordered
//! list of enter/live/exit transitions without touching any visual state.
//! [`reduce`] then walks that list and hands each transition to a
//! [`TransitionHandler`], which is where elements get created, recycled or
//! retired.

use crate::data_types::{DataSourceOperation, ItemStatus, TransitionEdge};
use crate::error::ChartError;

/// Where a transition's item comes from.
#[derive(Debug, PartialEq)]
pub enum Slot<'a, T> {
    /// Existing item at this position of the current list.
    Current(usize),
    /// Item carried by the operation.
    Incoming(&'a T),
}

impl<T> Clone for Slot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<'_, T> {}

/// One emitted `(status, item)` pair.
///
/// `index` is the item's position after the operation for `Enter`/`Live`,
/// and its position before the operation for `Exit`.
#[derive(Debug, PartialEq)]
pub struct Transition<'a, T> {
    pub status: ItemStatus,
    pub edge: TransitionEdge,
    pub index: usize,
    pub slot: Slot<'a, T>,
}

impl<T> Clone for Transition<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Transition<'_, T> {}

impl<'a, T> Transition<'a, T> {
    fn current(status: ItemStatus, edge: TransitionEdge, index: usize, from: usize) -> Self {
        Self {
            status,
            edge,
            index,
            slot: Slot::Current(from),
        }
    }

    fn enter(edge: TransitionEdge, index: usize, item: &'a T) -> Self {
        Self {
            status: ItemStatus::Enter,
            edge,
            index,
            slot: Slot::Incoming(item),
        }
    }
}

/// Computes the transitions that take `current_len` live items to the state
/// described by `operation`.
pub fn diff<T>(
    current_len: usize,
    operation: &DataSourceOperation<T>,
) -> Result<Vec<Transition<'_, T>>, ChartError> {
    use ItemStatus::{Exit, Live};
    use TransitionEdge::{Head, Tail};

    let n = current_len;
    let mut out = Vec::new();

    match operation {
        DataSourceOperation::Reset(items) => {
            non_empty(items)?;
            out.extend((0..n).map(|i| Transition::current(Exit, Tail, i, i)));
            out.extend(items.iter().enumerate().map(|(j, item)| Transition::enter(Tail, j, item)));
        }
        DataSourceOperation::Clear => {
            out.extend((0..n).map(|i| Transition::current(Exit, Tail, i, i)));
        }
        DataSourceOperation::Add { items, at_front: true } => {
            non_empty(items)?;
            let k = items.len();
            // Reversed so each head insertion leaves the input order intact.
            out.extend(items.iter().enumerate().rev().map(|(j, item)| Transition::enter(Head, j, item)));
            out.extend((0..n).map(|i| Transition::current(Live, Head, i + k, i)));
        }
        DataSourceOperation::Add { items, at_front: false } => {
            non_empty(items)?;
            out.extend((0..n).map(|i| Transition::current(Live, Tail, i, i)));
            out.extend(items.iter().enumerate().map(|(j, item)| Transition::enter(Tail, n + j, item)));
        }
        DataSourceOperation::SlidingWindow(items) => {
            non_empty(items)?;
            let k = items.len();
            let exiting = k.min(n);
            let live = n - exiting;
            out.extend((0..exiting).map(|i| Transition::current(Exit, Head, i, i)));
            out.extend((exiting..n).map(|i| Transition::current(Live, Head, i - exiting, i)));
            out.extend(items.iter().enumerate().map(|(j, item)| Transition::enter(Tail, live + j, item)));
        }
        DataSourceOperation::Remove { count, at_front } => {
            let count = *count;
            if count == 0 {
                return Err(ChartError::ZeroCount);
            }
            if count > n {
                return Err(ChartError::RemoveExceedsCount {
                    requested: count,
                    available: n,
                });
            }
            if *at_front {
                out.extend((0..count).map(|i| Transition::current(Exit, Head, i, i)));
                out.extend((count..n).map(|i| Transition::current(Live, Head, i - count, i)));
            } else {
                let keep = n - count;
                out.extend((0..keep).map(|i| Transition::current(Live, Tail, i, i)));
                out.extend((keep..n).map(|i| Transition::current(Exit, Tail, i, i)));
            }
        }
    }

    Ok(out)
}

fn non_empty<T>(items: &[T]) -> Result<(), ChartError> {
    if items.is_empty() {
        Err(ChartError::EmptyItems)
    } else {
        Ok(())
    }
}

/// Number of transitions per status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffCounts {
    pub enter: usize,
    pub live: usize,
    pub exit: usize,
}

impl DiffCounts {
    pub fn of<T>(transitions: &[Transition<'_, T>]) -> Self {
        transitions.iter().fold(Self::default(), |mut acc, t| {
            match t.status {
                ItemStatus::Enter => acc.enter += 1,
                ItemStatus::Live => acc.live += 1,
                ItemStatus::Exit => acc.exit += 1,
            }
            acc
        })
    }

    /// Item count once the transitions are applied.
    pub fn resulting(&self) -> usize {
        self.enter + self.live
    }
}

/// Receives each transition while [`reduce`] walks a diff.
pub trait TransitionHandler<S, T> {
    fn live_item(&mut self, new_index: usize, edge: TransitionEdge, item: S) -> S;
    fn entering_item(&mut self, new_index: usize, edge: TransitionEdge, item: &T) -> S;
    fn exiting_item(&mut self, index: usize, edge: TransitionEdge, item: S);
}

/// Applies `transitions` to `current`, returning the new list ordered by index.
pub fn reduce<S, T, H>(current: Vec<S>, transitions: &[Transition<'_, T>], handler: &mut H) -> Vec<S>
where
    H: TransitionHandler<S, T> + ?Sized,
{
    let mut current: Vec<Option<S>> = current.into_iter().map(Some).collect();
    let mut next: Vec<(usize, S)> = Vec::with_capacity(transitions.len());

    for t in transitions {
        match (t.status, t.slot) {
            (ItemStatus::Enter, Slot::Incoming(item)) => {
                next.push((t.index, handler.entering_item(t.index, t.edge, item)));
            }
            (ItemStatus::Live, Slot::Current(from)) => {
                if let Some(item) = current.get_mut(from).and_then(Option::take) {
                    next.push((t.index, handler.live_item(t.index, t.edge, item)));
                }
            }
            (ItemStatus::Exit, Slot::Current(from)) => {
                if let Some(item) = current.get_mut(from).and_then(Option::take) {
                    handler.exiting_item(t.index, t.edge, item);
                }
            }
            (status, _) => {
                tracing::warn!(?status, index = t.index, "transition with mismatched slot ignored");
            }
        }
    }

    next.sort_by_key(|(index, _)| *index);
    next.into_iter().map(|(_, item)| item).collect()
}
