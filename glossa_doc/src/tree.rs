// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::observe::ObserverSlot;
use crate::types::{ElementData, NodeFlags, NodeId, NodeKind, StyleError};

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A mutable document made of element and text nodes.
///
/// A fresh document owns a single root element (`body`). Nodes created with
/// [`Document::create_element`] or [`Document::create_text`] start detached and
/// can be assembled off-tree before being attached; mutations of detached
/// subtrees are never reported to observers.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    pub(crate) observers: Vec<ObserverSlot>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let observers = self
            .observers
            .iter()
            .filter(|slot| slot.observer.is_some())
            .count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("observers", &observers)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
    flags: NodeFlags,
}

impl Node {
    fn new(generation: u32, kind: NodeKind) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            kind,
            flags: NodeFlags::empty(),
        }
    }
}

impl Document {
    /// Create a document holding only its root element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            observers: Vec::new(),
        };
        doc.root = doc.alloc(NodeKind::Element(ElementData::new("body")));
        doc
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(String::from(text)))
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    /// Append `child` as the last child of `parent`, moving it if it is attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` into `parent` before `reference` (or last when `reference` is `None`
    /// or not a child of `parent`).
    ///
    /// Ignored if either id is stale, `parent` is not an element, or the insertion would
    /// create a cycle.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if !self.can_adopt(parent, child) {
            return;
        }
        // Inserting a node before itself keeps it where it is.
        let reference = if reference == Some(child) {
            self.next_sibling(child)
        } else {
            reference
        };
        self.detach(child);
        let pos = reference.and_then(|r| self.node(parent).children.iter().position(|c| *c == r));
        let p = self.node_mut(parent);
        match pos {
            Some(i) => p.children.insert(i, child),
            None => p.children.push(child),
        }
        self.node_mut(child).parent = Some(parent);
        self.record(parent, vec![child], Vec::new());
    }

    /// Detach `id` from its parent, keeping the node (and its subtree) alive.
    pub fn detach(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
            self.record(parent, Vec::new(), vec![id]);
        }
    }

    /// Remove a node (and its subtree) from the document. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        self.detach(id);
        self.free_subtree(id);
    }

    /// Replace `old` with `replacements`, in order, as one structural change.
    ///
    /// `old` and its subtree are freed. Exactly one mutation record is emitted for the
    /// parent, listing every inserted node and the removed one, so no observer ever sees
    /// a partially substituted state. Returns `false` (and changes nothing) when `old` is
    /// stale or has no parent.
    pub fn replace_with(&mut self, old: NodeId, replacements: &[NodeId]) -> bool {
        if !self.is_alive(old) {
            return false;
        }
        let Some(parent) = self.node(old).parent else {
            return false;
        };
        let mut added = Vec::with_capacity(replacements.len());
        for &r in replacements {
            if r != old && self.can_adopt(parent, r) && !added.contains(&r) {
                self.detach(r);
                added.push(r);
            }
        }
        let Some(pos) = self.node(parent).children.iter().position(|c| *c == old) else {
            return false;
        };
        self.node_mut(parent)
            .children
            .splice(pos..=pos, added.iter().copied());
        for &r in &added {
            self.node_mut(r).parent = Some(parent);
        }
        self.node_mut(old).parent = None;
        self.free_subtree(old);
        self.record(parent, added, vec![old]);
        true
    }

    /// Replace the character data of a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(NodeKind::Text(data)) = self.node_opt_mut(id).map(|n| &mut n.kind) {
            data.clear();
            data.push_str(text);
        }
    }

    /// Append to the character data of a text node.
    pub fn push_text(&mut self, id: NodeId, text: &str) {
        if let Some(NodeKind::Text(data)) = self.node_opt_mut(id).map(|n| &mut n.kind) {
            data.push_str(text);
        }
    }

    // --- queries ---

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// The node payload, if the identifier is live.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node_opt(id).map(|n| &n.kind)
    }

    /// Character data of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(data) => Some(data),
            NodeKind::Element(_) => None,
        }
    }

    /// Returns true if `id` is a live text node.
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Text(_)))
    }

    /// Element payload of an element node.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_opt_mut(id)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a live node; empty for stale ids and text nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The sibling immediately following `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) {
            return false;
        }
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Returns true if `id` is connected to the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Flags of a live node; empty for stale ids.
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node_opt(id).map(|n| n.flags).unwrap_or_default()
    }

    /// Set flags on a node.
    pub fn insert_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags.insert(flags);
        }
    }

    /// Clear flags on a node.
    pub fn remove_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags.remove(flags);
        }
    }

    /// Returns true if `id` or any ancestor is marked [`NodeFlags::CONTENT_EDITABLE`].
    pub fn is_content_editable(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self.flags(n).contains(NodeFlags::CONTENT_EDITABLE) {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Add a class to an element. No-op if already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            if !e.classes.iter().any(|c| c == class) {
                e.classes.push(String::from(class));
            }
        }
    }

    /// Remove a class from an element.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Set (or overwrite) an attribute on an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            match e.attributes.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => {
                    v.clear();
                    v.push_str(value);
                }
                None => e
                    .attributes
                    .push((String::from(name), String::from(value))),
            }
        }
    }

    /// Read an attribute of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Declare the `font-family` of an element.
    pub fn set_font_family(&mut self, id: NodeId, family: Option<&str>) {
        if let Some(e) = self.element_mut(id) {
            e.font_family = family.map(String::from);
        }
    }

    /// The `font-family` in effect for an element: its own declaration, or the nearest
    /// ancestor's. Empty when nothing in the chain declares one.
    pub fn computed_font_family(&self, id: NodeId) -> Result<&str, StyleError> {
        match self.kind(id) {
            None => return Err(StyleError::Stale(id)),
            Some(NodeKind::Text(_)) => return Err(StyleError::NotAnElement(id)),
            Some(NodeKind::Element(_)) => {}
        }
        let mut cur = Some(id);
        while let Some(n) = cur {
            if let Some(family) = self.element(n).and_then(|e| e.font_family.as_deref()) {
                return Ok(family);
            }
            cur = self.parent(n);
        }
        Ok("")
    }

    /// Concatenated character data of every text node under `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text(id) {
            out.push_str(text);
        }
        for n in self.descendants(id) {
            if let Some(text) = self.text(n) {
                out.push_str(text);
            }
        }
        out
    }

    /// Pre-order iterator over the descendants of `id` (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        self.is_alive(child)
            && matches!(self.kind(parent), Some(NodeKind::Element(_)))
            && !self.contains(child, parent)
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes[n.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(n.idx());
            }
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
