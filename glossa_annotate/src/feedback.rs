// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation feedback: turn observer records into newly eligible runs.

use std::collections::HashSet;

use glossa_doc::{Document, MutationRecord, NodeFlags, NodeId};

use crate::script::contains_target_script;
use crate::traverse::{inside_opaque, text_runs};

/// Eligible runs introduced by the structural changes in `records`, deduplicated, in
/// discovery order.
///
/// Inserted elements are rescanned as subtrees; inserted text with target-script content
/// triggers a rescan of its parent, since it may have landed among annotated siblings.
/// Engine-owned insertions, nodes that have since been removed, and insertions into opaque
/// regions are ignored.
pub fn collect(doc: &Document, records: &[MutationRecord]) -> Vec<NodeId> {
    let mut scan_roots: Vec<NodeId> = Vec::new();
    for record in records {
        for &added in &record.added {
            if !doc.is_attached(added) || doc.flags(added).contains(NodeFlags::ENGINE_OWNED) {
                continue;
            }
            let root = if let Some(text) = doc.text(added) {
                if !contains_target_script(text) {
                    continue;
                }
                match doc.parent(added) {
                    Some(parent) => parent,
                    None => continue,
                }
            } else {
                added
            };
            if inside_opaque(doc, root) || scan_roots.contains(&root) {
                continue;
            }
            scan_roots.push(root);
        }
    }

    let mut seen = HashSet::new();
    let mut runs = Vec::new();
    for root in scan_roots {
        for run in text_runs(doc, root) {
            if seen.insert(run) {
                runs.push(run);
            }
        }
    }
    runs
}
