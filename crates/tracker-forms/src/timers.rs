// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Deadlines as data. Nothing here sleeps or spawns; the host polls
//! [`TimerQueue::drain_due`] with the current time.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Monotonic page time, measured from an arbitrary origin such as page load.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// At most one pending deadline per key.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    pending: BTreeMap<K, Duration>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deadline for `key`, returning the deadline it replaced.
    pub fn schedule(&mut self, key: K, deadline: Duration) -> Option<Duration> {
        self.pending.insert(key, deadline)
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    pub fn deadline(&self, key: &K) -> Option<Duration> {
        self.pending.get(key).copied()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes every key whose deadline is at or before `now` and returns
    /// them by deadline, ties in key order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<K> {
        let mut due: Vec<(Duration, K)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, deadline)| (*deadline, key.clone()))
            .collect();
        due.sort_by(|left, right| left.0.cmp(&right.0).then_with(|| left.1.cmp(&right.1)));
        for (_, key) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(_, key)| key).collect()
    }
}
