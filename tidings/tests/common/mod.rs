#![allow(dead_code)]

use std::cell::Cell;

// ============================================================================
// Free and associated functions
// ============================================================================

pub fn double(val: i32) -> i32 {
    val * 2
}

pub fn triple(val: i32) -> i32 {
    val * 3
}

pub struct StaticExample;

impl StaticExample {
    pub fn triple(val: i32) -> i32 {
        val * 3
    }
}

// ============================================================================
// Receivers
// ============================================================================

#[derive(Default)]
pub struct ObjExample {
    pub calls: Cell<u32>,
}

impl ObjExample {
    pub fn half(&self, val: i32) -> i32 {
        self.calls.set(self.calls.get() + 1);
        val / 2
    }
}

/// A "base" type whose methods are bound through a wrapping receiver.
pub struct Counter {
    pub hits: Cell<u32>,
}

impl Counter {
    pub fn hit(&self) {
        self.hits.set(self.hits.get() + 1);
    }

    pub fn add(&self, amount: u32) -> u32 {
        self.hits.set(self.hits.get() + amount);
        self.hits.get()
    }
}

/// A receiver that exposes its inner [`Counter`].
pub struct Button {
    pub label: &'static str,
    pub counter: Counter,
}

impl Button {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            counter: Counter { hits: Cell::new(0) },
        }
    }

    pub fn hits(&self) -> u32 {
        self.counter.hits.get()
    }
}

impl AsRef<Counter> for Button {
    fn as_ref(&self) -> &Counter {
        &self.counter
    }
}
