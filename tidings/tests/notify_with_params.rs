//! Arguments reach every subscriber; the last subscriber's result wins.

use std::{cell::Cell, rc::Rc};
use tidings::Event;

mod common;
use common::{ObjExample, StaticExample, double};

thread_local! {
    static DOUBLED: Cell<Option<i32>> = const { Cell::new(None) };
}

fn double_and_remember(val: i32) -> i32 {
    DOUBLED.with(|slot| slot.set(Some(val * 2)));
    val * 2
}

#[test]
fn test_function_subscriber() {
    let mut event = Event::<fn(i32) -> i32>::new();
    event.attach(double);
    assert_eq!(event.notify(3).unwrap(), 6);
}

#[test]
fn test_last_subscriber_result_wins() {
    let mut event = Event::<fn(i32) -> i32>::new();
    event.attach(double_and_remember);
    assert_eq!(event.notify(3).unwrap(), 6);

    event.attach(StaticExample::triple);
    assert_eq!(event.notify(4).unwrap(), 12);

    // the first subscriber still ran
    assert_eq!(DOUBLED.with(Cell::get), Some(8));
}

#[test]
fn test_member_function_subscriber() {
    let obj = Rc::new(ObjExample::default());
    let mut event = Event::<fn(i32) -> i32>::new();
    event.attach_method(&obj, ObjExample::half);

    assert_eq!(event.notify(8).unwrap(), 4);
    assert_eq!(obj.calls.get(), 1);
}

#[test]
fn test_multiple_arguments() {
    fn join(prefix: String, count: usize, sep: char) -> String {
        vec![prefix; count].join(&sep.to_string())
    }

    let mut event = Event::<fn(String, usize, char) -> String>::new();
    event.attach(join);
    assert_eq!(event.notify("ab".to_string(), 3, '-').unwrap(), "ab-ab-ab");
}

#[test]
fn test_owned_arguments_cloned_per_subscriber() {
    fn len(items: Vec<u8>) -> usize {
        items.len()
    }

    fn sum(items: Vec<u8>) -> usize {
        items.iter().map(|&item| usize::from(item)).sum()
    }

    let mut event = Event::<fn(Vec<u8>) -> usize>::new();
    event.attach(len);
    event.attach(sum);
    assert_eq!(event.notify(vec![1, 2, 3]).unwrap(), 6);
}
