//! One emit reaches every kind of subscriber exactly once.

use lazy_static::lazy_static;
use std::{rc::Rc, sync::Mutex};
use tidings::Event;

lazy_static! {
    static ref STATE: Mutex<[i32; 6]> = Mutex::new([0; 6]);
}

fn set(slot: usize) {
    STATE.lock().unwrap()[slot] = 1;
}

fn func1() {
    set(0);
}

fn func2() {
    set(1);
}

struct StaticExample;

impl StaticExample {
    fn mem1() {
        set(2);
    }

    fn mem2() {
        set(3);
    }
}

struct ObjExample {
    idx: usize,
}

impl ObjExample {
    fn mem(&self) {
        set(self.idx);
    }
}

#[test]
fn test_event_notifies_all_subscribers() {
    *STATE.lock().unwrap() = [0; 6];
    let obj1 = Rc::new(ObjExample { idx: 4 });
    let obj2 = Rc::new(ObjExample { idx: 5 });

    let mut event = Event::<fn()>::new();
    event.attach(func1);
    event.attach(func2);
    event.attach(StaticExample::mem1);
    event.attach(StaticExample::mem2);
    event.attach_method(&obj1, ObjExample::mem);
    event.attach_method(&obj2, ObjExample::mem);
    assert_eq!(event.len(), 6);

    event.notify().unwrap();

    assert_eq!(*STATE.lock().unwrap(), [1, 1, 1, 1, 1, 1]);
}
