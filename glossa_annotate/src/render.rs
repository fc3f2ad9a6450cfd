// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotation rendering: segments in, atomic replacement out.
//!
//! ## Unit shape
//!
//! Each annotatable segment becomes
//!
//! ```text
//! <ruby class="glossa-word" data-segment="我爱你">我爱你<rt class="is-sans">wǒàinǐ</rt></ruby>
//! ```
//!
//! with [`NodeFlags::ENGINE_OWNED`] set on the `ruby`. Verbatim segments become plain text
//! nodes, also flagged. The whole replacement is built detached and swapped in with
//! [`Document::replace_with`], so observers see one change per run.

use glossa_doc::{Document, NodeFlags, NodeId};

use crate::capability::{TransliterationOptions, Transliterator};
use crate::presentation::{PresentationClass, classify_font_family};
use crate::segment::Segment;

/// Tag of an annotation unit.
pub const UNIT_TAG: &str = "ruby";
/// Tag of the transcription inside a unit.
pub const TRANSCRIPTION_TAG: &str = "rt";
/// Class carried by every annotation unit.
pub const UNIT_CLASS: &str = "glossa-word";
/// Attribute holding a unit's original segment text.
pub const SEGMENT_ATTR: &str = "data-segment";

/// Transcribe one segment.
///
/// Multi-character input has all whitespace removed from the transcription; a single
/// character is passed through untouched. A missing or failing transliterator yields an
/// empty string.
pub fn transcribe(
    text: &str,
    transliterator: Option<&dyn Transliterator>,
    options: &TransliterationOptions,
) -> String {
    let Some(transliterator) = transliterator else {
        return String::new();
    };
    match transliterator.transliterate(text, options) {
        Ok(raw) if text.chars().nth(1).is_some() => {
            raw.chars().filter(|c| !c.is_whitespace()).collect()
        }
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!("transliteration of {text:?} failed: {err}");
            String::new()
        }
    }
}

/// Returns true if `id` is an annotation unit produced by a [`Renderer`].
pub fn is_annotation_unit(doc: &Document, id: NodeId) -> bool {
    doc.flags(id).contains(NodeFlags::ENGINE_OWNED) && doc.tag(id) == Some(UNIT_TAG)
}

/// Presentation class for text under `parent`. Style lookup failures fall back to sans.
pub fn presentation_for(doc: &Document, parent: NodeId) -> PresentationClass {
    match doc.computed_font_family(parent) {
        Ok(family) => classify_font_family(family),
        Err(err) => {
            tracing::debug!("style inspection failed, using sans: {err}");
            PresentationClass::Sans
        }
    }
}

/// Builds and substitutes annotation structure for text runs.
#[derive(Clone, Copy)]
pub struct Renderer<'a> {
    transliterator: Option<&'a dyn Transliterator>,
    options: TransliterationOptions,
}

impl core::fmt::Debug for Renderer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Renderer")
            .field("transliterator", &self.transliterator.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl<'a> Renderer<'a> {
    /// Create a renderer.
    pub fn new(
        transliterator: Option<&'a dyn Transliterator>,
        options: TransliterationOptions,
    ) -> Self {
        Self {
            transliterator,
            options,
        }
    }

    /// Replace `run` with the rendering of `segments`.
    ///
    /// Returns the inserted nodes, or `None` if `run` had no parent (nothing changes).
    pub fn render_run(
        &self,
        doc: &mut Document,
        run: NodeId,
        segments: &[Segment],
    ) -> Option<Vec<NodeId>> {
        let parent = doc.parent(run)?;
        let class = presentation_for(doc, parent);
        let nodes: Vec<NodeId> = segments
            .iter()
            .map(|segment| {
                if segment.annotatable {
                    self.build_unit(doc, segment, class)
                } else {
                    let text = doc.create_text(&segment.text);
                    doc.insert_flags(text, NodeFlags::ENGINE_OWNED);
                    text
                }
            })
            .collect();
        if doc.replace_with(run, &nodes) {
            Some(nodes)
        } else {
            for node in nodes {
                doc.remove(node);
            }
            None
        }
    }

    fn build_unit(&self, doc: &mut Document, segment: &Segment, class: PresentationClass) -> NodeId {
        let ruby = doc.create_element(UNIT_TAG);
        doc.add_class(ruby, UNIT_CLASS);
        doc.set_attribute(ruby, SEGMENT_ATTR, &segment.text);
        doc.insert_flags(ruby, NodeFlags::ENGINE_OWNED);
        doc.append_text(ruby, &segment.text);
        let rt = doc.append_element(ruby, TRANSCRIPTION_TAG);
        doc.add_class(rt, class.class_name());
        let transcription = transcribe(&segment.text, self.transliterator, &self.options);
        doc.append_text(rt, &transcription);
        ruby
    }
}
