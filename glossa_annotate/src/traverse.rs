// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal and eligibility filtering of text runs.

use glossa_doc::{Document, NodeFlags, NodeId};

use crate::script::contains_target_script;

/// Parent tags whose text is never annotated. Traversal does not descend into them.
pub const EXCLUDED_TAGS: [&str; 6] = ["script", "style", "textarea", "input", "ruby", "rt"];

/// Returns true if nothing under `element` may be annotated: excluded tags, engine-owned
/// structure and editable regions.
pub fn is_opaque(doc: &Document, element: NodeId) -> bool {
    doc.flags(element).contains(NodeFlags::ENGINE_OWNED)
        || doc.tag(element).is_some_and(|t| EXCLUDED_TAGS.contains(&t))
        || doc.is_content_editable(element)
}

/// Returns true if `node` or any of its ancestors is opaque.
pub fn inside_opaque(doc: &Document, node: NodeId) -> bool {
    let mut cur = Some(node);
    while let Some(id) = cur {
        if !doc.is_text(id) && is_opaque(doc, id) {
            return true;
        }
        cur = doc.parent(id);
    }
    false
}

/// Returns true if `run` is a live, plain text node with an annotatable parent and
/// target-script content.
pub fn is_eligible(doc: &Document, run: NodeId) -> bool {
    let Some(text) = doc.text(run) else {
        return false;
    };
    if doc.flags(run).contains(NodeFlags::ENGINE_OWNED) {
        return false;
    }
    let Some(parent) = doc.parent(run) else {
        return false;
    };
    !is_opaque(doc, parent) && contains_target_script(text)
}

/// Lazy depth-first iterator over the eligible text runs under a root, in document order.
///
/// Opaque subtrees are skipped without being entered.
#[derive(Debug)]
pub struct TextRuns<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for TextRuns<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            if self.doc.is_text(id) {
                if is_eligible(self.doc, id) {
                    return Some(id);
                }
            } else if self.doc.is_alive(id) && !is_opaque(self.doc, id) {
                self.stack
                    .extend(self.doc.children(id).iter().rev().copied());
            }
        }
        None
    }
}

/// Eligible text runs under `root` (inclusive).
pub fn text_runs(doc: &Document, root: NodeId) -> TextRuns<'_> {
    TextRuns {
        doc,
        stack: vec![root],
    }
}

/// Character data under `root` in document order, leaving out subtrees of excluded tags.
///
/// This is the text a reader sees, used to sample a page's script.
pub fn visible_text(doc: &Document, root: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if let Some(text) = doc.text(id) {
            out.push_str(text);
        } else if !doc.tag(id).is_some_and(|t| EXCLUDED_TAGS.contains(&t)) {
            stack.extend(doc.children(id).iter().rev().copied());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_order_and_exclusions() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_text(root, "甲");
        let div = doc.append_element(root, "div");
        let b = doc.append_text(div, "乙 text");
        doc.append_text(div, "latin only");
        let script = doc.append_element(div, "script");
        doc.append_text(script, "var 丙;");
        let area = doc.append_element(root, "TEXTAREA");
        doc.append_text(area, "丁");
        let c = doc.append_text(root, "戊");
        let runs: Vec<_> = text_runs(&doc, root).collect();
        assert_eq!(runs, vec![a, b, c]);
    }

    #[test]
    fn editable_regions_are_skipped() {
        let mut doc = Document::new();
        let root = doc.root();
        let editor = doc.append_element(root, "div");
        doc.insert_flags(editor, NodeFlags::CONTENT_EDITABLE);
        let inner = doc.append_element(editor, "p");
        let hidden = doc.append_text(inner, "中文");
        let plain = doc.append_element(root, "div");
        let shown = doc.append_text(plain, "中文");
        assert_eq!(text_runs(&doc, root).collect::<Vec<_>>(), vec![shown]);
        assert!(!is_eligible(&doc, hidden));
        assert!(inside_opaque(&doc, hidden));
        assert!(!inside_opaque(&doc, shown));
    }

    #[test]
    fn engine_owned_structure_is_skipped() {
        let mut doc = Document::new();
        let root = doc.root();
        let owned_text = doc.append_text(root, "中");
        doc.insert_flags(owned_text, NodeFlags::ENGINE_OWNED);
        let span = doc.append_element(root, "span");
        doc.insert_flags(span, NodeFlags::ENGINE_OWNED);
        doc.append_text(span, "文");
        assert_eq!(text_runs(&doc, root).count(), 0);
    }

    #[test]
    fn text_root_and_stale_root() {
        let mut doc = Document::new();
        let root = doc.root();
        let t = doc.append_text(root, "字");
        assert_eq!(text_runs(&doc, t).collect::<Vec<_>>(), vec![t]);
        doc.remove(t);
        assert_eq!(text_runs(&doc, t).count(), 0);
    }

    #[test]
    fn visible_text_leaves_out_scripts_and_styles() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, "p");
        doc.append_text(p, "可见");
        let script = doc.append_element(root, "script");
        doc.append_text(script, "var 脚本;");
        let style = doc.append_element(p, "style");
        doc.append_text(style, "样式");
        doc.append_text(root, " end");
        assert_eq!(visible_text(&doc, root), "可见 end");
    }
}
