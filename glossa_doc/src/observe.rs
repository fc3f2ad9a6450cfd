// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation observation: structural change records batched per observer.
//!
//! ## Model
//!
//! An observer watches the subtree under its root. Every structural change whose parent
//! lies inside that subtree appends one [`MutationRecord`] to the observer's pending list.
//! Nothing is delivered eagerly: the host decides when its "mutation callback" runs and
//! drains the batch with [`Document::take_records`], the same way a platform observer
//! coalesces changes until the next callback.
//!
//! Changes made to detached nodes are not recorded, so a replacement can be assembled
//! off-tree and attached in a single step that produces a single record.

use alloc::vec::Vec;

use crate::tree::Document;
use crate::types::NodeId;

/// Handle of a registered observer.
///
/// Slots of disconnected observers are reused; the generation keeps an old handle from
/// reaching the observer that took its slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObserverId(u32, u32);

impl ObserverId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One structural change under an observed root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    /// The parent whose child list changed.
    pub target: NodeId,
    /// Nodes inserted into `target`, in order.
    pub added: Vec<NodeId>,
    /// Nodes removed from `target`. These ids may already be stale.
    pub removed: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub(crate) struct Observer {
    root: NodeId,
    records: Vec<MutationRecord>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ObserverSlot {
    generation: u32,
    pub(crate) observer: Option<Observer>,
}

impl Document {
    /// Start observing structural changes under `root` (inclusive).
    pub fn observe(&mut self, root: NodeId) -> ObserverId {
        let observer = Observer {
            root,
            records: Vec::new(),
        };
        let idx = match self.observers.iter().position(|slot| slot.observer.is_none()) {
            Some(idx) => idx,
            None => {
                self.observers.push(ObserverSlot::default());
                self.observers.len() - 1
            }
        };
        let slot = &mut self.observers[idx];
        slot.generation = slot.generation.wrapping_add(1);
        slot.observer = Some(observer);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Observer handles store 32-bit indices."
        )]
        ObserverId(idx as u32, slot.generation)
    }

    /// Stop observing. Pending records are dropped.
    pub fn disconnect(&mut self, id: ObserverId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.observer = None;
        }
    }

    /// Returns true if `id` is still connected.
    pub fn is_observing(&self, id: ObserverId) -> bool {
        self.observer(id).is_some()
    }

    /// Drain the records accumulated for `id` since the last call.
    pub fn take_records(&mut self, id: ObserverId) -> Vec<MutationRecord> {
        self.slot_mut(id)
            .and_then(|slot| slot.observer.as_mut())
            .map(|o| core::mem::take(&mut o.records))
            .unwrap_or_default()
    }

    /// Returns true if records are waiting for `id`.
    pub fn has_pending_records(&self, id: ObserverId) -> bool {
        self.observer(id).is_some_and(|o| !o.records.is_empty())
    }

    fn observer(&self, id: ObserverId) -> Option<&Observer> {
        let slot = self.observers.get(id.idx())?;
        (slot.generation == id.1).then_some(slot.observer.as_ref()).flatten()
    }

    fn slot_mut(&mut self, id: ObserverId) -> Option<&mut ObserverSlot> {
        let slot = self.observers.get_mut(id.idx())?;
        (slot.generation == id.1).then_some(slot)
    }

    pub(crate) fn record(&mut self, target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) {
        if added.is_empty() && removed.is_empty() {
            return;
        }
        let record = MutationRecord {
            target,
            added,
            removed,
        };
        for i in 0..self.observers.len() {
            let Some(root) = self.observers[i].observer.as_ref().map(|o| o.root) else {
                continue;
            };
            if !self.contains(root, target) {
                continue;
            }
            if let Some(observer) = self.observers[i].observer.as_mut() {
                observer.records.push(record.clone());
            }
        }
    }
}
