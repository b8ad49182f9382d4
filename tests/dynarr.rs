use std::{cell::RefCell, rc::Rc};

use dynarr::{dynarr, DynArr, DynArrError, DynamicArray, TryReserveError};

#[test]
fn push_pop_scenario() {
    let mut arr: DynamicArray<i32> = DynamicArray::new();
    assert_eq!(arr.capacity(), 0);

    for value in [1, 2, 3] {
        arr.push_back(value).unwrap();
    }
    assert_eq!(arr.size(), 3);
    assert_eq!(arr.at(0), Ok(&1));
    assert_eq!(arr.at(1), Ok(&2));
    assert_eq!(arr.at(2), Ok(&3));
    assert_eq!(arr.at(3), Err(DynArrError::OutOfRange { index: 3, len: 3 }));

    let cap = arr.capacity();
    assert_eq!(arr.pop_back(), Ok(3));
    assert_eq!(arr.size(), 2);
    assert_eq!(arr.capacity(), cap);
}

#[test]
fn empty_container_errors() {
    let mut arr = DynArr::<String>::new();
    assert_eq!(arr.front(), Err(DynArrError::EmptyContainer));
    assert_eq!(arr.back(), Err(DynArrError::EmptyContainer));
    assert_eq!(arr.pop_back(), Err(DynArrError::EmptyContainer));
}

#[test]
fn capacity_errors() {
    let err = DynArr::<u32>::with_capacity(usize::MAX).unwrap_err();
    assert!(matches!(err, DynArrError::CapacityExceeded(TryReserveError::CapacityOverflow { .. })));

    let mut arr = dynarr![1u32, 2];
    let err = arr.reserve(arr.max_size() + 1).unwrap_err();
    assert!(matches!(err, DynArrError::CapacityExceeded(_)));
    assert_eq!(arr, [1, 2]);
}

#[test]
fn reserve_then_shrink() {
    let mut arr = DynArr::from_sequence(&[1, 2, 3, 4, 5]).unwrap();
    arr.reserve(100).unwrap();
    assert_eq!(arr.capacity(), 100);
    arr.shrink_to_fit().unwrap();
    assert_eq!(arr.capacity(), 5);
    assert_eq!(arr, [1, 2, 3, 4, 5]);
}

#[test]
fn copies_do_not_share_elements() {
    let shared = Rc::new(RefCell::new(Vec::new()));
    let original = dynarr![shared.clone()];
    let copy = original.clone();

    // The elements are cloned handles, the arrays themselves are disjoint
    assert_eq!(Rc::strong_count(&shared), 3);
    drop(original);
    assert_eq!(Rc::strong_count(&shared), 2);
    copy.at(0).unwrap().borrow_mut().push(1);
    assert_eq!(*shared.borrow(), [1]);
    drop(copy);
    assert_eq!(Rc::strong_count(&shared), 1);
}

#[test]
fn swap_and_take() {
    let mut a = dynarr![1, 2, 3];
    let mut b = dynarr![4];
    a.swap(&mut b);
    assert_eq!(a, [4]);
    assert_eq!(b, [1, 2, 3]);

    let c = b.take();
    assert_eq!(c, [1, 2, 3]);
    assert_eq!(b.size(), 0);
}

#[test]
fn arrays_can_be_sent() {
    let arr = dynarr![String::from("a"), String::from("b")];
    let joined = std::thread::spawn(move || arr.as_slice().concat()).join().unwrap();
    assert_eq!(joined, "ab");
}
