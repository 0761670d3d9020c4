//! Property-based invariant tests for the event registry.
//!
//! 1. Dispatch order equals registration order of the live listeners.
//! 2. `unsubscribe` succeeds exactly once per registered id.
//! 3. `listener_count` tracks the model after any op sequence.

use ftui_reactive::{Event, ListenerId};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Op {
    Subscribe,
    /// Unsubscribe the n-th id ever handed out (modulo).
    Unsubscribe(usize),
    Trigger,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Subscribe),
        2 => (0usize..32).prop_map(Op::Unsubscribe),
        2 => Just(Op::Trigger),
    ]
}

proptest! {
    #[test]
    fn registry_matches_model(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let event: Event<(), ()> = Event::new();
        let log: Rc<RefCell<Vec<ListenerId>>> = Rc::new(RefCell::new(Vec::new()));
        let mut issued: Vec<ListenerId> = Vec::new();
        let mut live: Vec<ListenerId> = Vec::new();

        for op in ops {
            match op {
                Op::Subscribe => {
                    let log = Rc::clone(&log);
                    let slot: Rc<RefCell<Option<ListenerId>>> = Rc::new(RefCell::new(None));
                    let slot_clone = Rc::clone(&slot);
                    let id = event.subscribe(move |_, _| {
                        if let Some(id) = *slot_clone.borrow() {
                            log.borrow_mut().push(id);
                        }
                    });
                    *slot.borrow_mut() = Some(id);
                    issued.push(id);
                    live.push(id);
                }
                Op::Unsubscribe(n) => {
                    if issued.is_empty() {
                        continue;
                    }
                    let id = issued[n % issued.len()];
                    let expected = live.contains(&id);
                    prop_assert_eq!(event.unsubscribe(id), expected);
                    live.retain(|l| *l != id);
                }
                Op::Trigger => {
                    log.borrow_mut().clear();
                    event.trigger(&(), &());
                    prop_assert_eq!(&*log.borrow(), &live);
                }
            }
            prop_assert_eq!(event.listener_count(), live.len());
        }
    }
}
