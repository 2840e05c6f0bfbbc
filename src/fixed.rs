use core::fmt;
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut};
use core::slice;

use crate::error::{PushError, VecError};

/// A vector over caller-supplied storage. Never allocates, never grows,
/// never frees.
///
/// The storage is a borrowed slice of [`MaybeUninit<T>`], typically declared
/// on the stack or in a static, so an upper bound known at construction time
/// removes dynamic allocation entirely. The capacity is the storage length
/// and is immutable: there is no `grow` or `set_capacity` here, so growing a
/// fixed vector is a compile error rather than a runtime failure. The one
/// place exhaustion can still surface is pushing into a full vector, which
/// fails with [`VecError::CapacityExceeded`].
///
/// Dropping the vector drops the live elements; the storage memory itself
/// stays with the caller.
///
/// ```
/// use core::mem::MaybeUninit;
/// use growvec::FixedVec;
///
/// let mut storage = [MaybeUninit::<u32>::uninit(); 4];
/// let mut vec = FixedVec::new(&mut storage);
/// assert_eq!(vec.capacity(), 4);
/// assert_eq!(vec.push(7)?, 0);
/// assert_eq!(vec.pop(), Some(7));
/// # Ok::<(), growvec::VecError>(())
/// ```
pub struct FixedVec<'a, T> {
    storage: &'a mut [MaybeUninit<T>],
    len: usize,
}

impl<'a, T> FixedVec<'a, T> {
    /// Creates an empty vector over `storage`. The capacity is
    /// `storage.len()` and cannot change. Construction cannot fail.
    pub fn new(storage: &'a mut [MaybeUninit<T>]) -> Self {
        Self { storage, len: 0 }
    }

    /// Creates a vector over `storage` pre-filled with clones of `init`, so
    /// the initial length is `init.len()`.
    ///
    /// # Errors
    ///
    /// Returns `VecError::CapacityExceeded` if `init` has more elements than
    /// the storage can hold. Elements cloned before the failure are dropped.
    pub fn with_contents(
        storage: &'a mut [MaybeUninit<T>],
        init: &[T],
    ) -> Result<Self, VecError>
    where
        T: Clone,
    {
        let mut vec = Self::new(storage);
        for value in init {
            vec.push(value.clone())?;
        }
        Ok(vec)
    }

    /// Returns the number of live elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the fixed capacity (the length of the caller's storage).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value`, returning the index it was written to.
    ///
    /// # Errors
    ///
    /// Returns a [`PushError`] wrapping `VecError::CapacityExceeded` if the
    /// vector is full. The vector is unchanged and the error carries `value`
    /// back to the caller, who can retry after making room.
    pub fn push(&mut self, value: T) -> Result<usize, PushError<T>> {
        if self.len == self.storage.len() {
            return Err(PushError {
                value,
                error: VecError::CapacityExceeded {
                    capacity: self.storage.len(),
                },
            });
        }

        let index = self.len;
        self.storage[index].write(value);
        self.len = index + 1;
        Ok(index)
    }

    /// Appends every element of `values` with a plain byte copy.
    ///
    /// Returns the index of the first appended element.
    ///
    /// Like [`GrowVec::extend_from_copy_slice`](crate::GrowVec::extend_from_copy_slice),
    /// the bulk path **never invokes `Clone`**, hence the `T: Copy` bound.
    ///
    /// # Errors
    ///
    /// Returns `VecError::CapacityExceeded` if the remaining room is too
    /// small; the vector is unchanged (nothing is partially appended).
    pub fn extend_from_copy_slice(&mut self, values: &[T]) -> Result<usize, VecError>
    where
        T: Copy,
    {
        let capacity = self.storage.len();
        if values.len() > capacity - self.len {
            return Err(VecError::CapacityExceeded { capacity });
        }

        let start = self.len;
        for (slot, value) in self.storage[start..start + values.len()]
            .iter_mut()
            .zip(values)
        {
            slot.write(*value);
        }
        self.len = start + values.len();
        Ok(start)
    }

    /// Removes the last element and returns it, or `None` if the vector is
    /// empty. Ownership transfers to the caller.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: the slot held a live element; after the decrement it is
        // treated as uninitialized again.
        Some(unsafe { self.storage[self.len].assume_init_read() })
    }

    /// Fallible form of [`pop`](FixedVec::pop).
    ///
    /// # Errors
    ///
    /// Returns `VecError::Empty` if the vector has no elements.
    pub fn try_pop(&mut self) -> Result<T, VecError> {
        self.pop().ok_or(VecError::Empty)
    }

    /// Returns a reference to the last element, or `None` if the vector is
    /// empty.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Drops every live element and sets the length to 0.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shortens the vector to `new_len` elements, dropping the abandoned
    /// tail. Does nothing if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: the slot held a live element and is dropped exactly
            // once; the length was already decremented past it.
            unsafe { self.storage[self.len].assume_init_drop() };
        }
    }

    /// Sets the length directly, without dropping or initializing anything.
    ///
    /// # Safety
    ///
    /// - `new_len` must not exceed [`capacity`](FixedVec::capacity).
    /// - The first `new_len` storage slots must hold initialized values of
    ///   `T`.
    /// - Shrinking this way leaks the abandoned elements; use
    ///   [`truncate`](FixedVec::truncate) to drop them.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.storage.len());
        self.len = new_len;
    }

    /// Returns the unused storage slots, for manual initialization followed
    /// by [`set_len`](FixedVec::set_len).
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        &mut self.storage[self.len..]
    }

    /// Returns the live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len slots are initialized.
        unsafe { slice::from_raw_parts(self.storage.as_ptr().cast::<T>(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for as_slice; the mutable borrow of self guarantees
        // exclusive access.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr().cast::<T>(), self.len) }
    }
}

impl<T> Drop for FixedVec<'_, T> {
    fn drop(&mut self) {
        // Drop the live elements only; the storage belongs to the caller.
        self.clear();
    }
}

impl<T> Deref for FixedVec<'_, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for FixedVec<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for FixedVec<'_, T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for FixedVec<'_, T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: PartialEq> PartialEq for FixedVec<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for FixedVec<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for FixedVec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
