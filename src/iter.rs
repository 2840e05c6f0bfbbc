use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ptr;

use crate::fixed::FixedVec;
use crate::grow::GrowVec;
use crate::raw::RawBuf;

/// Owning iterator over the elements of a [`GrowVec`].
///
/// Yields elements front to back by value. Dropping the iterator drops any
/// elements that were not consumed, then releases the vector's allocation.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIterator for GrowVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        let end = this.len;
        // SAFETY: `this` is never dropped, so ownership of the buffer (and of
        // the live elements in it) moves into the iterator exactly once.
        let buf = unsafe { ptr::read(&this.buf) };
        IntoIter { buf, start: 0, end }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        // SAFETY: start < end, so the slot holds a live element; advancing
        // start ensures it is read exactly once.
        let value = unsafe { self.buf.ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.start;
        (left, Some(left))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        // SAFETY: start <= end after the decrement, so the slot holds a live
        // element that no other read will touch.
        Some(unsafe { self.buf.ptr().add(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Drop whatever was not consumed; RawBuf releases the allocation.
        for i in self.start..self.end {
            // SAFETY: slots start..end still hold live elements, each dropped
            // exactly once.
            unsafe { ptr::drop_in_place(self.buf.ptr().add(i).as_ptr()) };
        }
    }
}

// SAFETY: same reasoning as for GrowVec; the iterator owns the buffer through
// a unique pointer.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: the iterator API never hands out shared mutable state.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<'a, 's, T> IntoIterator for &'a FixedVec<'s, T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, 's, T> IntoIterator for &'a mut FixedVec<'s, T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
