// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=glossa_doc --heading-base-level=0

//! Glossa Doc: a small generational document tree for text overlays.
//!
//! Glossa Doc models the slice of a live document that a text-annotation layer needs:
//! elements with tags, classes, attributes and a declared font family; text nodes carrying
//! character data; and a way to watch structural changes made by anyone.
//!
//! - Nodes are addressed by [`NodeId`], a generational handle that goes stale when the
//!   node is removed, so work queues can hold ids across arbitrary mutations.
//! - [`Document::replace_with`] swaps one node for a pre-built sequence of nodes as a
//!   single structural change.
//! - [`Document::observe`] registers an observer; structural changes under its root are
//!   batched as [`MutationRecord`]s until the host drains them with
//!   [`Document::take_records`].
//! - [`NodeFlags`] carries per-node bits: [`NodeFlags::CONTENT_EDITABLE`] (inherited) and
//!   [`NodeFlags::ENGINE_OWNED`], the ownership marker used by overlay engines to
//!   recognize their own output.
//!
//! ## Not a browser
//!
//! There is no parser, no style cascade beyond `font-family` inheritance, and no layout.
//! Hosts mirror whatever tree they have into a [`Document`] (or implement the overlay
//! directly on top of this one).
//!
//! ## Minimal usage
//!
//! ```
//! use glossa_doc::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let observer = doc.observe(root);
//!
//! let p = doc.append_element(root, "p");
//! let text = doc.append_text(p, "你好");
//!
//! // Build a replacement off-tree, then swap it in.
//! let b = doc.create_element("b");
//! doc.append_text(b, "你好");
//! assert!(doc.replace_with(text, &[b]));
//! assert!(!doc.is_alive(text));
//!
//! let records = doc.take_records(observer);
//! assert_eq!(records.len(), 3);
//! assert_eq!(doc.markup(p), "<p><b>你好</b></p>");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod markup;
mod observe;
mod tree;
mod types;

pub use observe::{MutationRecord, ObserverId};
pub use tree::{Descendants, Document};
pub use types::{ElementData, NodeFlags, NodeId, NodeKind, StyleError};
