use core::mem::MaybeUninit;

use growvec::{FixedVec, VecError};

#[test]
fn test_new_over_storage() {
    let mut storage = [MaybeUninit::<u32>::uninit(); 8];
    let vec = FixedVec::new(&mut storage);

    assert_eq!(vec.len(), 0);
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 8);
}

#[test]
fn test_fills_to_capacity_then_fails() {
    const CAP: usize = 5;
    let mut storage = [MaybeUninit::<u32>::uninit(); CAP];
    let mut vec = FixedVec::new(&mut storage);

    for i in 0..CAP {
        assert_eq!(vec.push(i as u32).unwrap(), i);
    }
    assert_eq!(vec.len(), CAP);

    // The (C+1)-th push fails, hands the element back, and the length
    // stays at C.
    let rejected = vec.push(99).unwrap_err();
    assert_eq!(rejected.error, VecError::CapacityExceeded { capacity: CAP });
    assert_eq!(rejected.value, 99);
    assert_eq!(vec.len(), CAP);
    assert_eq!(vec.as_slice(), &[0, 1, 2, 3, 4]);
}

#[test]
fn test_with_contents_sets_length() {
    let mut storage = [MaybeUninit::<u8>::uninit(); 6];
    let vec = FixedVec::with_contents(&mut storage, &[7, 8, 9]).unwrap();

    assert_eq!(vec.len(), 3);
    assert_eq!(vec.capacity(), 6);
    assert_eq!(vec.as_slice(), &[7, 8, 9]);
}

#[test]
fn test_with_contents_too_large_fails() {
    let mut storage = [MaybeUninit::<u8>::uninit(); 2];
    let result = FixedVec::with_contents(&mut storage, &[1, 2, 3]);

    assert_eq!(result.unwrap_err(), VecError::CapacityExceeded { capacity: 2 });
}

#[test]
fn test_pop_round_trips_pushed_values() {
    let mut storage = [MaybeUninit::<u64>::uninit(); 4];
    let mut vec = FixedVec::new(&mut storage);

    vec.push(0xAAAA_BBBB_CCCC_DDDD).unwrap();
    vec.push(42).unwrap();

    assert_eq!(vec.pop(), Some(42));
    assert_eq!(vec.pop(), Some(0xAAAA_BBBB_CCCC_DDDD));
    assert_eq!(vec.pop(), None);
    assert_eq!(vec.try_pop(), Err(VecError::Empty));
}

#[test]
fn test_extend_from_copy_slice_all_or_nothing() {
    let mut storage = [MaybeUninit::<u16>::uninit(); 4];
    let mut vec = FixedVec::new(&mut storage);
    vec.push(1).unwrap();

    // Does not fit: nothing is appended.
    assert_eq!(
        vec.extend_from_copy_slice(&[2, 3, 4, 5]),
        Err(VecError::CapacityExceeded { capacity: 4 })
    );
    assert_eq!(vec.as_slice(), &[1]);

    // Fits exactly.
    let start = vec.extend_from_copy_slice(&[2, 3, 4]).unwrap();
    assert_eq!(start, 1);
    assert_eq!(vec.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_clear_and_reuse() {
    let mut storage = [MaybeUninit::<u32>::uninit(); 3];
    let mut vec = FixedVec::new(&mut storage);

    vec.push(1).unwrap();
    vec.push(2).unwrap();
    vec.clear();

    assert_eq!(vec.len(), 0);
    assert_eq!(vec.capacity(), 3);

    vec.push(9).unwrap();
    assert_eq!(vec.as_slice(), &[9]);
}

#[test]
fn test_truncate() {
    let mut storage = [MaybeUninit::<u32>::uninit(); 8];
    let mut vec = FixedVec::with_contents(&mut storage, &[1, 2, 3, 4, 5]).unwrap();

    vec.truncate(2);
    assert_eq!(vec.as_slice(), &[1, 2]);

    vec.truncate(5);
    assert_eq!(vec.len(), 2);
}

#[test]
fn test_last() {
    let mut storage = [MaybeUninit::<&str>::uninit(); 2];
    let mut vec = FixedVec::new(&mut storage);

    assert_eq!(vec.last(), None);
    vec.push("bottom").unwrap();
    vec.push("top").unwrap();
    assert_eq!(vec.last(), Some(&"top"));
}

#[test]
fn test_spare_capacity_then_set_len() {
    let mut storage = [MaybeUninit::<u32>::uninit(); 4];
    let mut vec = FixedVec::new(&mut storage);
    vec.push(10).unwrap();

    let spare = vec.spare_capacity_mut();
    assert_eq!(spare.len(), 3);
    spare[0].write(20);

    // SAFETY: slots 0..2 are initialized.
    unsafe { vec.set_len(2) };
    assert_eq!(vec.as_slice(), &[10, 20]);
}

#[test]
fn test_slice_access_through_deref() {
    let mut storage = [MaybeUninit::<i32>::uninit(); 4];
    let mut vec = FixedVec::with_contents(&mut storage, &[4, 2, 3]).unwrap();

    assert_eq!(vec[1], 2);
    vec.sort_unstable();
    assert_eq!(vec.as_slice(), &[2, 3, 4]);
}

#[test]
fn test_failed_push_leaves_vector_usable() {
    let mut storage = [MaybeUninit::<u8>::uninit(); 1];
    let mut vec = FixedVec::new(&mut storage);

    vec.push(1).unwrap();
    assert!(vec.push(2).is_err());

    // The vector is still fully usable after the failure.
    assert_eq!(vec.pop(), Some(1));
    vec.push(3).unwrap();
    assert_eq!(vec.as_slice(), &[3]);
}
