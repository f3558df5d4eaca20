//! Reuse pool for drawable handles.

use std::collections::VecDeque;

/// Hands out previously rendered handles before asking a factory for new ones.
///
/// The `unused` pool is drained FIFO. Whatever is still unused once a pass is
/// over must be removed from the scene; everything in `created` must be added.
/// A handle never appears in both lists of a [`RecycleOutcome`].
#[derive(Debug)]
pub struct Recycler<H> {
    unused: VecDeque<H>,
    created: Vec<H>,
    reused: usize,
}

impl<H> Default for Recycler<H> {
    fn default() -> Self {
        Self {
            unused: VecDeque::new(),
            created: Vec::new(),
            reused: 0,
        }
    }
}

/// What a finished recycler leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecycleOutcome<H> {
    pub unused: Vec<H>,
    pub created: Vec<H>,
    pub reused: usize,
}

impl<H> RecycleOutcome<H> {
    pub fn is_noop(&self) -> bool {
        self.unused.is_empty() && self.created.is_empty()
    }
}

impl<H: Clone> Recycler<H> {
    pub fn new(unused: impl IntoIterator<Item = H>) -> Self {
        Self {
            unused: unused.into_iter().collect(),
            created: Vec::new(),
            reused: 0,
        }
    }

    /// Returns `(created, handle)`; `created` is `false` for a reused handle.
    pub fn next<A: ?Sized>(&mut self, arg: &A, factory: impl FnOnce(&A) -> H) -> (bool, H) {
        if let Some(handle) = self.unused.pop_front() {
            self.reused += 1;
            return (false, handle);
        }
        let handle = factory(arg);
        self.created.push(handle.clone());
        (true, handle)
    }

    /// Returns a handle to the pool so a later request in the same pass can reuse it.
    pub fn recycle(&mut self, handle: H) {
        self.unused.push_back(handle);
    }

    pub fn unused(&self) -> impl Iterator<Item = &H> {
        self.unused.iter()
    }

    pub fn created(&self) -> &[H] {
        &self.created
    }

    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Handles created and recycled again within the same pass were never
    /// placed, so they are dropped from both lists.
    pub fn finish(self) -> RecycleOutcome<H>
    where
        H: PartialEq,
    {
        let mut unused: Vec<H> = self.unused.into();
        let mut created = self.created;
        created.retain(|handle| match unused.iter().position(|u| u == handle) {
            Some(slot) => {
                unused.remove(slot);
                false
            }
            None => true,
        });
        RecycleOutcome {
            unused,
            created,
            reused: self.reused,
        }
    }
}
