use core::fmt;

use thiserror::Error;

/// Error types for `GrowVec` and `FixedVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum VecError {
    /// Allocation or reallocation failed; the vector is unchanged and still
    /// usable at its previous capacity
    #[error("Out of memory: could not allocate storage for {requested} elements")]
    OutOfMemory {
        /// Capacity (in elements) that could not be allocated
        requested: usize,
    },
    /// A fixed-capacity vector is full and cannot grow
    #[error("Capacity exceeded: fixed vector holds at most {capacity} elements")]
    CapacityExceeded {
        /// Capacity of the fixed vector
        capacity: usize,
    },
    /// A `try_pop` was attempted on an empty vector
    #[error("Pop from an empty vector")]
    Empty,
    /// `set_capacity` was asked to shrink below the current length
    #[error("Cannot set capacity {requested} below current length {len}")]
    CapacityBelowLength {
        /// Requested capacity
        requested: usize,
        /// Current number of live elements
        len: usize,
    },
}

/// A failed push. The rejected element rides along in the error so the
/// caller keeps ownership and can retry, stash it, or drop it — the vector
/// never destroys a value it refused to store.
#[derive(Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct PushError<T> {
    /// The element that could not be stored
    pub value: T,
    /// Why the push failed
    #[source]
    pub error: VecError,
}

impl<T> PushError<T> {
    /// Returns the rejected element, discarding the error.
    pub fn into_value(self) -> T {
        self.value
    }
}

// Not derived: the rejected element need not implement Debug, and the error
// is what matters in failure output.
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Discards the rejected element; lets `?` propagate a failed push as a
/// plain [`VecError`] when the value is not worth keeping.
impl<T> From<PushError<T>> for VecError {
    fn from(err: PushError<T>) -> Self {
        err.error
    }
}
