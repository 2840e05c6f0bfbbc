use core::cmp;
use core::fmt;
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use crate::error::{PushError, VecError};
use crate::raw::RawBuf;

/// Capacity reserved by [`GrowVec::new`].
const DEFAULT_CAPACITY: usize = 8;

/// Growth rate applied whenever a resize is needed (3/2).
const GROWTH_NUMERATOR: usize = 3;
const GROWTH_DENOMINATOR: usize = 2;

/// A heap-backed growable vector whose allocating operations are fallible.
///
/// Unlike [`Vec`](https://doc.rust-lang.org/std/vec/struct.Vec.html), every
/// operation that may allocate returns a [`Result`]: out-of-memory is treated
/// as a recoverable condition. After any `Err`, the vector is unchanged and
/// remains usable at its previous capacity.
///
/// The vector starts with room for 8 elements and grows by a factor of 3/2
/// when full (8 → 12 → 18 → 27 → …), always making progress even at tiny
/// capacities.
///
/// Element lifecycle follows normal Rust ownership: pushing moves the value
/// in, popping moves it out to the caller, and removal paths that discard
/// elements ([`clear`](GrowVec::clear), [`truncate`](GrowVec::truncate),
/// dropping the vector) run each element's `Drop` implementation.
///
/// ```
/// use growvec::GrowVec;
///
/// let mut vec = GrowVec::new().unwrap();
/// assert_eq!(vec.push(1)?, 0);
/// assert_eq!(vec.push(2)?, 1);
/// assert_eq!(vec.pop(), Some(2));
/// assert_eq!(vec.as_slice(), &[1]);
/// # Ok::<(), growvec::VecError>(())
/// ```
pub struct GrowVec<T> {
    pub(crate) buf: RawBuf<T>,
    pub(crate) len: usize,
}

impl<T> GrowVec<T> {
    /// Creates a vector with the default initial capacity (8).
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` if the initial allocation fails.
    pub fn new() -> Result<Self, VecError> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a vector with room for exactly `cap` elements.
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` if the allocation fails.
    pub fn with_capacity(cap: usize) -> Result<Self, VecError> {
        Ok(Self {
            buf: RawBuf::with_capacity(cap)?,
            len: 0,
        })
    }

    /// Returns the number of live elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of allocated element slots. The capacity is exactly
    /// the value produced by construction, growth, or
    /// [`set_capacity`](GrowVec::set_capacity); nothing rounds it up.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value`, growing the vector if it is full.
    ///
    /// Returns the index the element was written to.
    ///
    /// # Errors
    ///
    /// Returns a [`PushError`] wrapping `VecError::OutOfMemory` if a required
    /// growth fails. The vector is unchanged and the error carries `value`
    /// back to the caller, who can retry once memory is available.
    ///
    /// ```
    /// # use growvec::GrowVec;
    /// let mut vec = GrowVec::new().unwrap();
    /// assert_eq!(vec.push("a")?, 0);
    /// assert_eq!(vec.push("b")?, 1);
    /// # Ok::<(), growvec::VecError>(())
    /// ```
    pub fn push(&mut self, value: T) -> Result<usize, PushError<T>> {
        if self.len == self.capacity() {
            if let Err(error) = self.grow() {
                return Err(PushError { value, error });
            }
        }

        let index = self.len;
        // SAFETY: index < capacity after the growth check, so the slot is
        // allocated and unoccupied.
        unsafe { self.buf.ptr().add(index).write(value) };
        self.len = index + 1;
        Ok(index)
    }

    /// Appends every element of `values` with a single raw byte copy.
    ///
    /// Returns the index of the first appended element.
    ///
    /// This is the bulk fast path: it copies bytes and **never invokes
    /// `Clone`**, which is why it requires `T: Copy`. Types with a custom
    /// clone must be pushed individually through [`push`](GrowVec::push).
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` if a required growth fails; the vector
    /// is unchanged (nothing is partially appended).
    pub fn extend_from_copy_slice(&mut self, values: &[T]) -> Result<usize, VecError>
    where
        T: Copy,
    {
        let required = self
            .len
            .checked_add(values.len())
            .ok_or(VecError::OutOfMemory { requested: usize::MAX })?;
        self.grow_for(required)?;

        let start = self.len;
        // SAFETY: capacity >= len + values.len() after grow_for, and the
        // ranges cannot overlap because `values` is borrowed for the whole
        // call while the destination is owned by self.
        unsafe {
            ptr::copy_nonoverlapping(
                values.as_ptr(),
                self.buf.ptr().add(start).as_ptr(),
                values.len(),
            );
        }
        self.len = required;
        Ok(start)
    }

    /// Removes the last element and returns it, or `None` if the vector is
    /// empty. Ownership transfers to the caller, who becomes responsible for
    /// dropping the value.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: the slot held a live element; after the decrement nothing
        // else will read or drop it.
        Some(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Fallible form of [`pop`](GrowVec::pop).
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

    /// Drops every live element and sets the length to 0. Capacity and
    /// storage are retained.
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
            unsafe { ptr::drop_in_place(self.buf.ptr().add(self.len).as_ptr()) };
        }
    }

    /// Sets the length directly, without dropping or initializing anything.
    ///
    /// # Safety
    ///
    /// - `new_len` must not exceed [`capacity`](GrowVec::capacity).
    /// - The first `new_len` slots must hold initialized values of `T`;
    ///   extending past the current length exposes whatever the caller wrote
    ///   into [`spare_capacity_mut`](GrowVec::spare_capacity_mut).
    /// - Shrinking this way leaks the abandoned elements; use
    ///   [`truncate`](GrowVec::truncate) to drop them.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Returns the unused slots between the length and the capacity, for
    /// manual initialization followed by [`set_len`](GrowVec::set_len).
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: slots len..capacity are allocated and permitted to hold
        // uninitialized values behind MaybeUninit.
        unsafe {
            slice::from_raw_parts_mut(
                self.buf.ptr().add(self.len).as_ptr().cast::<MaybeUninit<T>>(),
                self.capacity() - self.len,
            )
        }
    }

    /// Resizes the vector to `new_len` elements. Shrinking drops the tail;
    /// extending appends clones of `value`, growing the capacity as needed.
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` if a required growth fails; the vector
    /// is unchanged.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), VecError>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.grow_for(new_len)?;
        while self.len < new_len {
            // SAFETY: capacity >= new_len after grow_for, so the slot is
            // allocated and unoccupied.
            unsafe { self.buf.ptr().add(self.len).write(value.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Reallocates to exactly `new_cap` element slots. No-op when the
    /// capacity already matches. The buffer address may change; existing
    /// elements and the length are preserved.
    ///
    /// # Errors
    ///
    /// - `VecError::CapacityBelowLength` if `new_cap` is less than the
    ///   current length (shrinking below the live range would discard
    ///   elements silently).
    /// - `VecError::OutOfMemory` if the reallocation fails; capacity and
    ///   contents are unchanged.
    pub fn set_capacity(&mut self, new_cap: usize) -> Result<(), VecError> {
        if new_cap < self.len {
            return Err(VecError::CapacityBelowLength {
                requested: new_cap,
                len: self.len,
            });
        }
        self.buf.realloc(new_cap)
    }

    /// Grows the capacity by one growth-rate step (3/2, minimum +1).
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` if the reallocation fails; capacity
    /// and contents are unchanged.
    pub fn grow(&mut self) -> Result<(), VecError> {
        self.buf.realloc(Self::next_capacity(self.capacity()))
    }

    /// Returns the live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len slots are initialized, and len * size_of::<T>()
        // fits in isize::MAX by the allocation layout checks.
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for as_slice; the mutable borrow of self guarantees
        // exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Fallible deep copy: allocates a new vector with the same capacity and
    /// clones every element into it.
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` if the allocation fails.
    pub fn try_clone(&self) -> Result<Self, VecError>
    where
        T: Clone,
    {
        let mut clone = Self::with_capacity(self.capacity())?;
        for value in self.as_slice() {
            clone.push(value.clone())?;
        }
        Ok(clone)
    }

    /// Grows until `capacity >= required`, applying the growth rate
    /// repeatedly so the reallocation happens at most once.
    fn grow_for(&mut self, required: usize) -> Result<(), VecError> {
        let mut target = self.capacity();
        while target < required {
            target = Self::next_capacity(target);
        }
        self.buf.realloc(target)
    }

    /// floor(cap * 3/2), with a minimum increment of 1 so growth always makes
    /// progress at capacities 0 and 1.
    fn next_capacity(cap: usize) -> usize {
        cmp::max(
            cap.saturating_mul(GROWTH_NUMERATOR) / GROWTH_DENOMINATOR,
            cap.saturating_add(1),
        )
    }
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        // Drop the live elements; RawBuf releases the allocation.
        self.clear();
    }
}

impl<T> Deref for GrowVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for GrowVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

// SAFETY: GrowVec owns its buffer through a unique pointer, so sending it
// between threads is sound whenever the elements themselves can be sent.
unsafe impl<T: Send> Send for GrowVec<T> {}
// SAFETY: the safe API provides no interior mutability; shared references
// only hand out &T.
unsafe impl<T: Sync> Sync for GrowVec<T> {}

impl<T: Clone> Clone for GrowVec<T> {
    /// # Panics
    ///
    /// Panics on allocation failure; use [`GrowVec::try_clone`] for the
    /// checked form.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(clone) => clone,
            Err(_) => panic!("allocation failed while cloning a GrowVec"),
        }
    }
}

impl<T: PartialEq> PartialEq for GrowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
