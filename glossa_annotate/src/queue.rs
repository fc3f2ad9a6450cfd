// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Work queue and cooperative scheduling.
//!
//! The queue never runs work by itself. When it goes from idle to having work it asks the
//! host for one idle callback through [`IdleScheduler::request_idle`]; the host later calls
//! back into the engine, which takes at most one batch and, if work remains, asks again.
//! At most one callback is outstanding at any time.

use std::collections::VecDeque;

use glossa_doc::NodeId;

/// Default number of runs processed per idle callback.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Host hook for scheduling one idle-time callback.
pub trait IdleScheduler {
    /// Arrange for the engine's idle handler to run once, at the host's next idle
    /// opportunity.
    fn request_idle(&mut self);
}

/// A scheduler that only counts requests; the host loop polls it.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pending: usize,
    total: usize,
}

impl ManualScheduler {
    /// A scheduler with nothing requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one outstanding request, if any.
    pub fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    /// Number of requests not yet consumed.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Number of requests ever made.
    pub fn total_requests(&self) -> usize {
        self.total
    }
}

impl IdleScheduler for ManualScheduler {
    fn request_idle(&mut self) {
        self.pending += 1;
        self.total += 1;
    }
}

/// FIFO of text runs awaiting annotation.
#[derive(Clone, Debug)]
pub struct WorkQueue {
    items: VecDeque<NodeId>,
    batch_size: usize,
    draining: bool,
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl WorkQueue {
    /// Create a queue draining `batch_size` runs per turn (at least one).
    pub fn new(batch_size: usize) -> Self {
        Self {
            items: VecDeque::new(),
            batch_size: batch_size.max(1),
            draining: false,
        }
    }

    /// Append runs in order. Starts draining if the queue was idle and anything was added.
    ///
    /// Returns the number of runs added.
    pub fn enqueue(
        &mut self,
        runs: impl IntoIterator<Item = NodeId>,
        scheduler: &mut dyn IdleScheduler,
    ) -> usize {
        let before = self.items.len();
        self.items.extend(runs);
        let added = self.items.len() - before;
        if added > 0 && !self.draining {
            self.draining = true;
            scheduler.request_idle();
        }
        added
    }

    /// Start an idle turn: take up to one batch from the front.
    ///
    /// The outstanding callback is considered consumed; call [`finish_turn`](Self::finish_turn)
    /// afterwards to reschedule if work remains.
    pub fn begin_turn(&mut self) -> Vec<NodeId> {
        self.draining = false;
        let n = self.batch_size.min(self.items.len());
        self.items.drain(..n).collect()
    }

    /// Consume the outstanding callback without taking any work.
    ///
    /// Pending runs stay queued; the next [`enqueue`](Self::enqueue) or
    /// [`finish_turn`](Self::finish_turn) requests a new callback.
    pub fn release_turn(&mut self) {
        self.draining = false;
    }

    /// End an idle turn, requesting another callback if the queue is not empty.
    pub fn finish_turn(&mut self, scheduler: &mut dyn IdleScheduler) {
        if !self.items.is_empty() && !self.draining {
            self.draining = true;
            scheduler.request_idle();
        }
    }

    /// Drop all pending runs. An outstanding callback stays outstanding and finds nothing.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of pending runs.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no runs are pending.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true while an idle callback is outstanding.
    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Runs per turn.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}
