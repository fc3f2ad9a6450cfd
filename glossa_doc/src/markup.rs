// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic markup serialization, for debugging and structural comparisons.

use alloc::string::String;

use crate::tree::Document;
use crate::types::{NodeId, NodeKind};

impl Document {
    /// Serialize the subtree at `id` as markup.
    ///
    /// Classes are emitted first as a `class` attribute, then the remaining attributes in
    /// insertion order. Text is escaped. Flags and font declarations are not emitted.
    /// Stale ids serialize to an empty string.
    pub fn markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            None => {}
            Some(NodeKind::Text(text)) => escape_into(text, out),
            Some(NodeKind::Element(e)) => {
                out.push('<');
                out.push_str(&e.tag);
                if !e.classes.is_empty() {
                    out.push_str(" class=\"");
                    for (i, class) in e.classes.iter().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        escape_into(class, out);
                    }
                    out.push('"');
                }
                for (name, value) in &e.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');
                for &child in self.children(id) {
                    self.write_markup(child, out);
                }
                out.push_str("</");
                out.push_str(&e.tag);
                out.push('>');
            }
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
