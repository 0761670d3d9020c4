//! End-to-end scenarios across the public API: plain collection, observable
//! collection with a recording listener, and the recycling pool.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ftui_collections::prelude::*;

fn recorder<T: Clone + 'static>(
    list: &ObservableCollection<T>,
) -> (Rc<RefCell<Vec<ListChange<T>>>>, ListenerId) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let id = list
        .changed()
        .subscribe(move |_, change: &ListChange<T>| sink.borrow_mut().push(change.clone()));
    (log, id)
}

#[test]
fn append_then_lookup() {
    let mut list = Collection::new();
    list.add(1);
    list.add(2);
    assert_eq!(list.to_vec(), vec![1, 2]);
    assert_eq!(list.index_of(&2), Some(1));
}

#[test]
fn rejected_insert_leaves_contents() {
    let mut list = Collection::from(vec![1, 2]);
    let err = list.insert(5, 9).unwrap_err();
    assert_eq!(
        err,
        CollectionError::IndexOutOfBounds {
            index: 5,
            count: 0,
            len: 2
        }
    );
    assert_eq!(list.to_vec(), vec![1, 2]);
}

#[test]
fn observable_set_emits_replace() {
    let mut list = ObservableCollection::from(vec!["a", "b"]);
    let (log, _) = recorder(&list);

    list.set(0, "x").unwrap();

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    let (action, index, removed, added) = log[0].clone().into_parts();
    assert_eq!(action, ChangeAction::Replace);
    assert_eq!(index, 0);
    assert_eq!(removed, vec!["a"]);
    assert_eq!(added, vec!["x"]);
    assert_eq!(list.get(0), Ok(&"x"));
}

#[test]
fn observable_empty_set_items_is_silent() {
    let mut list = ObservableCollection::<&str>::new();
    let (log, _) = recorder(&list);
    list.set_items(Vec::new());
    assert!(log.borrow().is_empty());
}

#[test]
fn observable_remove_range_emits_remove() {
    let mut list = ObservableCollection::from(vec!["a", "b", "c"]);
    let (log, _) = recorder(&list);

    assert_eq!(list.remove_range(1, 2), Ok(vec!["b", "c"]));

    assert_eq!(
        *log.borrow(),
        vec![ListChange::new(1, vec!["b", "c"], vec![]).unwrap()]
    );
    assert_eq!(log.borrow()[0].action(), ChangeAction::Remove);
    assert_eq!(list.to_vec(), vec!["a"]);
}

#[test]
fn pool_recycles_last_released() {
    let built = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&built);
    let mut pool = Pool::from_fn(move || {
        counter.set(counter.get() + 1);
        counter.get()
    });

    let first = pool.acquire();
    let second = pool.acquire();
    assert_ne!(first, second);
    assert_eq!(built.get(), 2);

    pool.release(first);
    assert_eq!(pool.acquire(), first);
    assert_eq!(built.get(), 2);
}

#[test]
fn listeners_run_in_registration_order_and_can_leave() {
    let mut list: ObservableCollection<u8> = ObservableCollection::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let a = Rc::clone(&order);
    let first = list.changed().subscribe(move |_, _| a.borrow_mut().push("first"));
    let b = Rc::clone(&order);
    let _second = list.changed().subscribe(move |_, _| b.borrow_mut().push("second"));

    list.add(1u8);
    assert!(list.changed().unsubscribe(first));
    list.add(2u8);

    assert_eq!(*order.borrow(), vec!["first", "second", "second"]);
}

#[test]
fn guarded_listener_stops_after_drop() {
    let mut list = ObservableCollection::new();
    let hits = Rc::new(Cell::new(0u32));
    let sink = Rc::clone(&hits);

    let guard = list
        .changed()
        .subscribe_guarded(move |_, _: &ListChange<u8>| sink.set(sink.get() + 1));
    list.add(1);
    drop(guard);
    list.add(2);

    assert_eq!(hits.get(), 1);
}

#[test]
fn mirror_stays_in_sync_through_changes() {
    let mut list = ObservableCollection::from(vec![1, 2, 3]);
    let mirror = Rc::new(RefCell::new(list.to_vec()));
    let sink = Rc::clone(&mirror);
    list.changed().subscribe(move |_, change: &ListChange<i32>| {
        change
            .apply_to(&mut sink.borrow_mut())
            .expect("change fits mirror");
    });

    list.insert_range(1, vec![7, 8]).unwrap();
    list.replace_range(0, 2, vec![0]).unwrap();
    list.remove(&3);
    list.set(0, 5).unwrap();
    list.add_range(vec![9, 9]);
    list.set_items(vec![4, 4, 4]);
    list.remove_at(1).unwrap();

    assert_eq!(*mirror.borrow(), list.to_vec());
    assert_eq!(list.to_vec(), vec![4, 4]);
}

#[test]
fn generic_code_over_both_collections() {
    fn fill<C: OrderedCollection<char>>(list: &mut C) {
        list.add_range(vec!['a', 'b', 'c']);
        list.replace_range(1, 1, vec!['x']).unwrap();
    }

    let mut plain: Collection<char> = Collection::new();
    let mut observed: ObservableCollection<char> = ObservableCollection::new();
    fill(&mut plain);
    fill(&mut observed);

    assert_eq!(plain.as_slice(), observed.as_slice());
    assert_eq!(plain, *observed.as_collection());
}
