// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reversion of annotation structure and renormalization of text runs.

use glossa_doc::{Document, NodeFlags, NodeId};

use crate::render::{SEGMENT_ATTR, is_annotation_unit};

/// Replace every annotation unit under `root` with plain text and merge adjacent text.
///
/// Each unit becomes a text node holding its recorded original segment, not its rendered
/// content. Verbatim text emitted by the renderer loses its ownership flag. Returns the
/// number of units removed.
pub fn revert(doc: &mut Document, root: NodeId) -> usize {
    let units: Vec<NodeId> = doc
        .descendants(root)
        .filter(|&id| is_annotation_unit(doc, id))
        .collect();
    for &unit in &units {
        let original = match doc.attribute(unit, SEGMENT_ATTR) {
            Some(segment) => segment.to_owned(),
            None => doc.text_content(unit),
        };
        let text = doc.create_text(&original);
        doc.replace_with(unit, &[text]);
    }
    let owned_text: Vec<NodeId> = doc
        .descendants(root)
        .filter(|&id| doc.is_text(id) && doc.flags(id).contains(NodeFlags::ENGINE_OWNED))
        .collect();
    for id in owned_text {
        doc.remove_flags(id, NodeFlags::ENGINE_OWNED);
    }
    merge_adjacent_text(doc, root);
    units.len()
}

/// Coalesce every run of adjacent text siblings under `root` into its first node.
pub fn merge_adjacent_text(doc: &mut Document, root: NodeId) {
    let mut parents: Vec<NodeId> = doc.descendants(root).filter(|&id| !doc.is_text(id)).collect();
    if !doc.is_text(root) {
        parents.push(root);
    }
    for parent in parents {
        let children = doc.children(parent).to_vec();
        let mut head: Option<NodeId> = None;
        for child in children {
            let Some(text) = doc.text(child).map(str::to_owned) else {
                head = None;
                continue;
            };
            match head {
                Some(h) => {
                    doc.push_text(h, &text);
                    doc.remove(child);
                }
                None => head = Some(child),
            }
        }
    }
}
