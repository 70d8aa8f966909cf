//! Deferred-callback scheduler
//!
//! Periodic components never call themselves back. Each tick returns whether
//! it wants to run again and the owner schedules the next one here, so
//! stopping a component is a matter of cancelling its timer. Time is virtual
//! (milliseconds) and only moves when the owner advances it.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// Periodic work the game loop dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    Scroll,
    BirdFall,
    BirdAscend,
    Tubes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: u64,
    id: TimerId, // Insertion order breaks ties
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    queue: BinaryHeap<Reverse<Entry>>,
    cancelled: HashSet<TimerId>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `task` to run `delay_ms` after the current instant
    pub fn schedule(&mut self, task: Task, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry {
            due: self.now + delay_ms,
            id,
            task,
        }));
        id
    }

    /// Drop a queued timer. Cancelling one that already ran is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        if self.queue.iter().any(|Reverse(entry)| entry.id == id) {
            self.cancelled.insert(id);
        }
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Whether a live timer for `task` is queued
    pub fn pending(&self, task: Task) -> bool {
        self.queue
            .iter()
            .any(|Reverse(entry)| entry.task == task && !self.cancelled.contains(&entry.id))
    }

    pub fn len(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to it
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        while let Some(Reverse(entry)) = self.queue.peek().copied() {
            if entry.due > until {
                return None;
            }
            self.queue.pop();
            if self.cancelled.remove(&entry.id) {
                continue;
            }
            self.now = self.now.max(entry.due);
            return Some(entry.task);
        }
        None
    }

    /// Move the clock forward once nothing before `until` is left to run
    pub fn advance(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
