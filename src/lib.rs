#![no_std]

//! Type-generic vectors with explicit, recoverable allocation failure.
//!
//! This crate provides two contiguous vector types sharing one operation
//! surface:
//!
//! - [`GrowVec<T>`] is heap-backed and resizable. Construction reserves 8
//!   slots and growth multiplies the capacity by 3/2 (8 → 12 → 18 → …).
//!   Every operation that may allocate returns a [`Result`]; on
//!   [`VecError::OutOfMemory`] the vector is left in its last valid state, so
//!   the caller decides whether to retry, shrink demand, or give up.
//! - [`FixedVec<'a, T>`](FixedVec) lives entirely in caller-supplied storage
//!   (a `&mut [MaybeUninit<T>]`, typically on the stack or in a static). It
//!   never allocates, never grows, and never frees the storage. Exhaustion
//!   surfaces as [`VecError::CapacityExceeded`]; growth operations do not
//!   exist on this type at all.
//!
//! Element lifecycle is expressed through the language rather than function
//! pointers: pushing moves a value in, popping moves it out to the caller,
//! and every removal path that discards elements (`clear`, `truncate`,
//! dropping the vector) runs `Drop` on each discarded element. A rejected
//! `push` hands the element back inside a [`PushError`], so a failure never
//! destroys the caller's value.
//!
//! # Heap-backed usage
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut vec = GrowVec::new().unwrap();
//! for i in 1..=10 {
//!     vec.push(i).unwrap();
//! }
//! assert_eq!(vec.len(), 10);
//! assert_eq!(vec.capacity(), 12); // one growth step past the initial 8
//! assert_eq!(vec.iter().sum::<i32>(), 55);
//! ```
//!
//! # Fixed-capacity usage
//!
//! ```
//! use core::mem::MaybeUninit;
//! use growvec::{FixedVec, VecError};
//!
//! let mut storage = [MaybeUninit::<u8>::uninit(); 3];
//! let mut vec = FixedVec::new(&mut storage);
//!
//! vec.push(1).unwrap();
//! vec.push(2).unwrap();
//! vec.push(3).unwrap();
//!
//! // A full vector rejects the push and returns the element, untouched.
//! let rejected = vec.push(4).unwrap_err();
//! assert_eq!(rejected.error, VecError::CapacityExceeded { capacity: 3 });
//! assert_eq!(rejected.value, 4);
//! assert_eq!(vec.as_slice(), &[1, 2, 3]);
//! ```
//!
//! # Bulk append
//!
//! Both types offer `extend_from_copy_slice`, a bulk fast path that copies
//! raw bytes and **never invokes `Clone`** — which is why it is restricted to
//! `T: Copy`. Types with a custom clone must go through `push` one element at
//! a time.
//!
//! # Iteration
//!
//! Both types deref to `[T]`, so slice iterators provide borrowed iteration
//! and the borrow checker enforces that no mutation happens while an
//! iterator is live. [`GrowVec`] additionally has an owning [`IntoIter`].
//!
//! # Concurrency
//!
//! A vector is exclusively owned by whoever holds it; there is no internal
//! locking. `GrowVec<T>` is `Send`/`Sync` exactly when `T` is, and the usual
//! ownership rules serialize access.
//!
//! # `no_std`
//!
//! The crate is `no_std`. [`FixedVec`] needs neither `std` nor `alloc`;
//! [`GrowVec`] uses the global allocator through the `alloc` crate. Enable
//! the `std` feature to get `std::error::Error` integration via
//! `thiserror/std`.

extern crate alloc;

mod error;
mod fixed;
mod grow;
mod iter;
mod raw;

pub use error::{PushError, VecError};
pub use fixed::FixedVec;
pub use grow::GrowVec;
pub use iter::IntoIter;
