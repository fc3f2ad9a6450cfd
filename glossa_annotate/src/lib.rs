// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=glossa_annotate --heading-base-level=0

//! Glossa Annotate: incremental phonetic annotation over a live document.
//!
//! The engine keeps a derived layer of ruby annotations consistent with a [`Document`] that
//! anyone may mutate at any time:
//!
//! - [`traverse`] finds eligible text runs, skipping scripts, form fields, editable regions
//!   and the engine's own output.
//! - [`WorkQueue`] holds discovered runs; the host drains it one bounded batch per idle
//!   callback, so huge pages never block.
//! - [`SegmentationAdapter`] cuts each run into words (through an injected segmenter) or
//!   characters, and the [`Renderer`] swaps the run for annotation units in a single
//!   structural change.
//! - [`feedback`] turns observer records into new work while ignoring everything the
//!   engine inserted itself.
//! - [`revert`] restores the original text exactly and merges the fragments back into
//!   whole runs.
//!
//! [`Engine`] ties these together and reacts to configuration [`Message`]s. Transliteration
//! and word segmentation are injected through [`Capabilities`]; the [`builtin`] module has
//! small table-driven versions. Selections can be looked up in a dictionary through
//! [`glossa_lookup`].
//!
//! ## Example
//!
//! ```rust
//! use glossa_annotate::builtin::{LexiconSegmenter, SyllableTable};
//! use glossa_annotate::{
//!     Capabilities, Document, Engine, EngineConfig, ManualScheduler, MemoryStore,
//! };
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let p = doc.append_element(root, "p");
//! doc.append_text(p, "我爱你!");
//!
//! let capabilities = Capabilities::none()
//!     .with_transliterator(SyllableTable::new([('我', "wǒ"), ('爱', "ài"), ('你', "nǐ")]))
//!     .with_segmenter(LexiconSegmenter::new(["我爱你"]));
//! let mut engine = Engine::new(
//!     capabilities,
//!     EngineConfig::default(),
//!     ManualScheduler::new(),
//!     MemoryStore::default(),
//! );
//!
//! engine.enable(&mut doc);
//! while engine.scheduler_mut().take_request() {
//!     engine.on_idle(&mut doc);
//!     engine.on_mutations(&mut doc);
//! }
//! assert_eq!(
//!     doc.markup(p),
//!     "<p><ruby class=\"glossa-word\" data-segment=\"我爱你\">我爱你<rt class=\"is-sans\">wǒàinǐ</rt></ruby>!</p>"
//! );
//!
//! engine.revert(&mut doc);
//! assert_eq!(doc.markup(p), "<p>我爱你!</p>");
//! ```

pub mod builtin;
mod capability;
mod controller;
mod error;
pub mod feedback;
mod presentation;
mod queue;
mod render;
pub mod revert;
pub mod script;
mod segment;
pub mod selection;
mod settings;
pub mod traverse;

pub use capability::{
    Capabilities, SegmenterFactory, ToneStyle, TransliterationOptions, Transliterator,
    WordSegment, WordSegmenter,
};
pub use controller::{
    AutoDetect, Engine, EngineConfig, EngineState, EngineStats, Phase, PendingLookup,
    VISIBLE_CLASS,
};
pub use error::{SegmenterError, SettingsError, TransliterationError};
pub use presentation::{PresentationClass, classify_font_family};
pub use queue::{DEFAULT_BATCH_SIZE, IdleScheduler, ManualScheduler, WorkQueue};
pub use render::{
    Renderer, SEGMENT_ATTR, TRANSCRIPTION_TAG, UNIT_CLASS, UNIT_TAG, is_annotation_unit,
    presentation_for, transcribe,
};
pub use segment::{Segment, SegmentationAdapter, SegmentationMode, segment_characters};
pub use settings::{JsonStore, MemoryStore, Message, Settings, SettingsStore};

pub use glossa_doc::Document;
