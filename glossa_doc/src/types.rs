// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document tree: node identifiers, flags, node payloads and errors.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a node in the document.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the node is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Work queues holding ids across mutations rely on this to skip nodes that were replaced in the meantime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The element is user-editable. Inherited by every descendant.
        const CONTENT_EDITABLE = 0b0000_0001;
        /// The node was produced by the annotation engine.
        ///
        /// Watchers use this bit to recognize and skip structure they generated themselves.
        const ENGINE_OWNED     = 0b0000_0010;
    }
}

/// Payload of an element node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    /// Class list, in insertion order and without duplicates.
    pub classes: Vec<String>,
    /// Attributes, in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Declared `font-family`, if any. Descendants inherit it.
    pub font_family: Option<String>,
}

impl ElementData {
    /// Create element data for `tag` (lowercased).
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }
}

/// What a node carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A structural node with children.
    Element(ElementData),
    /// A leaf carrying character data.
    Text(String),
}

/// Failure to inspect the computed style of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleError {
    /// The identifier no longer refers to a live node.
    Stale(NodeId),
    /// Style is only computed for elements.
    NotAnElement(NodeId),
}

impl core::fmt::Display for StyleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Stale(id) => write!(f, "node {id:?} is no longer alive"),
            Self::NotAnElement(id) => write!(f, "node {id:?} is not an element"),
        }
    }
}

impl core::error::Error for StyleError {}
