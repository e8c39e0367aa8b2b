//! Timer scheduling: the browser's `setTimeout` / `setInterval`, and a
//! virtual-time queue that runs the same callbacks deterministically.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::{CardError, Result};

pub type Task = Box<dyn FnOnce()>;
pub type RepeatingTask = Box<dyn FnMut()>;

/// Single-threaded timer source. Callbacks run to completion, one at a time.
pub trait Scheduler {
    /// Run `task` once, `delay_ms` from now.
    fn after(&self, delay_ms: u32, task: Task) -> Result<()>;

    /// Run `task` every `period_ms`, first one period from now. Never cancelled.
    fn every(&self, period_ms: u32, task: RepeatingTask) -> Result<()>;
}

/// Timers backed by `window.setTimeout` / `window.setInterval`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Task) -> Result<()> {
        let win = window().ok_or(CardError::NoWindow)?;
        let cb = Closure::once_into_js(move || task());
        win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            clamp_ms(delay_ms),
        )?;
        Ok(())
    }

    fn every(&self, period_ms: u32, task: RepeatingTask) -> Result<()> {
        let win = window().ok_or(CardError::NoWindow)?;
        let closure = Closure::wrap(task);
        win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            clamp_ms(period_ms),
        )?;
        // Page-lifetime interval: the closure must outlive this call.
        closure.forget();
        Ok(())
    }
}

fn clamp_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

// --- Virtual time -------------------------------------------------------------

enum Job {
    Once(Task),
    Every { period_ms: u64, task: RepeatingTask },
}

struct Entry {
    due_ms: u64,
    seq: u64,
    job: Job,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // BinaryHeap is a max-heap; reverse so the earliest (due, seq) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        (other.due_ms, other.seq).cmp(&(self.due_ms, self.seq))
    }
}

#[derive(Default)]
struct Queue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Queue {
    fn push(&mut self, due_ms: u64, job: Job) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due_ms, seq, job });
    }
}

/// Deterministic event queue driven by explicit calls to [`advance_to`].
///
/// Tasks due at the same instant run in the order they were scheduled.
/// Tasks may schedule further tasks; those run in the same `advance_to`
/// call if they fall due before its target time.
///
/// [`advance_to`]: VirtualScheduler::advance_to
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    now_ms: Rc<Cell<u64>>,
    queue: Rc<RefCell<Queue>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Number of tasks waiting to run, recurring ones included.
    pub fn pending(&self) -> usize {
        self.queue.borrow().heap.len()
    }

    /// Advance by `delta_ms`, running everything that falls due.
    pub fn advance_by(&self, delta_ms: u64) -> usize {
        self.advance_to(self.now_ms.get() + delta_ms)
    }

    /// Run every task due at or before `target_ms`, then set the clock to it.
    /// Returns how many callbacks ran.
    pub fn advance_to(&self, target_ms: u64) -> usize {
        let mut ran = 0;
        loop {
            let entry = {
                let mut q = self.queue.borrow_mut();
                match q.heap.peek() {
                    Some(top) if top.due_ms <= target_ms => q.heap.pop(),
                    _ => None,
                }
            };
            let Some(entry) = entry else { break };
            self.now_ms.set(entry.due_ms.max(self.now_ms.get()));
            ran += 1;
            // The queue borrow is released so the callback can schedule more work.
            match entry.job {
                Job::Once(task) => task(),
                Job::Every { period_ms, mut task } => {
                    task();
                    self.queue.borrow_mut().push(
                        entry.due_ms + period_ms,
                        Job::Every { period_ms, task },
                    );
                }
            }
        }
        self.now_ms.set(target_ms.max(self.now_ms.get()));
        ran
    }
}

impl Scheduler for VirtualScheduler {
    fn after(&self, delay_ms: u32, task: Task) -> Result<()> {
        let due = self.now_ms.get() + u64::from(delay_ms);
        self.queue.borrow_mut().push(due, Job::Once(task));
        Ok(())
    }

    fn every(&self, period_ms: u32, task: RepeatingTask) -> Result<()> {
        if period_ms == 0 {
            return Err(CardError::Config("interval period must be positive".into()));
        }
        let period_ms = u64::from(period_ms);
        let due = self.now_ms.get() + period_ms;
        self.queue
            .borrow_mut()
            .push(due, Job::Every { period_ms, task });
        Ok(())
    }
}
