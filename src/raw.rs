use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use alloc::alloc;

use crate::error::VecError;

/// Owned, resizable element buffer backing a `GrowVec`.
///
/// `RawBuf` manages the allocation only; it never reads, drops, or initializes
/// elements. The owning vector tracks which slots are live.
///
/// Allocation failure is reported as `VecError::OutOfMemory` rather than
/// aborting, leaving the previous buffer intact so the owner stays usable.
///
/// Zero-sized element types never allocate; the capacity is tracked logically
/// over a dangling pointer.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// Allocates a buffer with room for exactly `cap` elements.
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` if the allocator refuses the request or
    /// the layout would exceed `isize::MAX` bytes.
    pub(crate) fn with_capacity(cap: usize) -> Result<Self, VecError> {
        if mem::size_of::<T>() == 0 || cap == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        let layout = Self::layout_for(cap)?;
        // SAFETY: the layout has non-zero size; zero-sized types and a zero
        // capacity are handled above.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr =
            NonNull::new(raw.cast::<T>()).ok_or(VecError::OutOfMemory { requested: cap })?;

        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    pub(crate) const fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    /// Resizes the buffer to exactly `new_cap` elements, moving it if the
    /// allocator relocates the block. No-op when the capacity is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `VecError::OutOfMemory` on allocation failure; the existing
    /// buffer and capacity are left untouched.
    pub(crate) fn realloc(&mut self, new_cap: usize) -> Result<(), VecError> {
        if mem::size_of::<T>() == 0 || new_cap == self.cap {
            self.cap = new_cap;
            return Ok(());
        }

        if self.cap == 0 {
            *self = Self::with_capacity(new_cap)?;
            return Ok(());
        }

        if new_cap == 0 {
            let layout = Self::layout_for(self.cap)?;
            // SAFETY: the buffer was allocated in the global allocator with
            // this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return Ok(());
        }

        let old_layout = Self::layout_for(self.cap)?;
        let new_layout = Self::layout_for(new_cap)?;
        // SAFETY: the pointer came from the global allocator with
        // `old_layout`, and the new size is non-zero and fits in `isize::MAX`
        // (checked by `layout_for`).
        let raw = unsafe {
            alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size())
        };
        let ptr =
            NonNull::new(raw.cast::<T>()).ok_or(VecError::OutOfMemory { requested: new_cap })?;

        self.ptr = ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn layout_for(cap: usize) -> Result<Layout, VecError> {
        Layout::array::<T>(cap).map_err(|_| VecError::OutOfMemory { requested: cap })
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if mem::size_of::<T>() == 0 || self.cap == 0 {
            return;
        }

        // The layout matches the live allocation, so this cannot fail.
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            // SAFETY: the buffer was allocated in the global allocator with
            // this exact layout, and elements were already dropped (or moved
            // out) by the owner.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}
