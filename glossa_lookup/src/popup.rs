// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup content and placement for a dictionary lookup.
//!
//! A [`Popup`] is a plain description of what to draw: a title, content blocks, an optional
//! link to the full page, a theme and an origin in page coordinates. Hosts render it however
//! they like; this module only decides what it says and where it goes.

use kurbo::{Point, Rect, Vec2};

use crate::client::LookupOutcome;
use crate::wiktionary::{self, DefinitionItem};

/// Vertical gap between the selection and the popup.
pub const OFFSET_Y: f64 = 10.0;
/// Maximum popup width.
pub const MAX_WIDTH: f64 = 300.0;
/// Distance from the viewport's right edge when the popup would overflow.
pub const SAFE_MARGIN: f64 = 310.0;

/// Small header line shown above every popup.
pub const SUBTITLE: &str = "Chinese dictionary · Wiktionary";
/// Shown while a lookup is in flight.
pub const LOADING_MESSAGE: &str = "Loading definition...";
/// Label of the link to the full page.
pub const LINK_LABEL: &str = "Open page on Wiktionary";

/// Note under the link when definitions were found.
pub const FOUND_NOTE: &str =
    "This definition was retrieved from the public Wiktionary API. Click to see the full entry.";
/// Body when the service has no entry for the term.
pub const NOT_FOUND_MESSAGE: &str =
    "The public Wiktionary API does not have a definition entry for this exact term.";
/// Note under the link when the service has no entry.
pub const NOT_FOUND_NOTE: &str =
    "The entry may still exist on the main site; click to open the full page on Wiktionary.";
/// Body when the entry has no Chinese definition.
pub const NO_TARGET_MESSAGE: &str =
    "No Chinese definition is exposed by the public Wiktionary API for this term.";
/// Note under the link when the entry has no Chinese definition.
pub const NO_TARGET_NOTE: &str = "The entry almost certainly exists on the main site; click to open the full page on Wiktionary.";
/// Body when the lookup failed.
pub const FAILURE_MESSAGE: &str = "The public Wiktionary API did not return a definition.";
/// Note under the link when the lookup failed.
pub const FAILURE_NOTE: &str =
    "The entry very likely exists on the website; click to open the Wiktionary page directly.";

/// One block of popup content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// A plain status message.
    Message(&'static str),
    /// Definitions in display order.
    Definitions(Vec<DefinitionItem>),
}

/// A link to the full dictionary page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Target URL.
    pub url: String,
    /// Link text.
    pub label: &'static str,
    /// Explanatory note shown under the link.
    pub note: &'static str,
}

/// Geometry needed to place a popup under a selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Bounding box of the selection in viewport coordinates.
    pub selection: Rect,
    /// Current scroll offset of the page.
    pub scroll: Vec2,
    /// Width of the viewport.
    pub viewport_width: f64,
}

/// Everything needed to draw a lookup popup.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// The looked-up term.
    pub title: String,
    /// Content blocks, top to bottom.
    pub blocks: Vec<Block>,
    /// Link to the full page, absent while loading.
    pub link: Option<Link>,
    /// Use the dark theme.
    pub dark: bool,
    /// Top-left corner in page coordinates.
    pub origin: Point,
}

impl Popup {
    /// The placeholder shown while a lookup is in flight.
    pub fn loading(term: &str) -> Self {
        Self {
            title: term.to_owned(),
            blocks: vec![Block::Message(LOADING_MESSAGE)],
            link: None,
            dark: false,
            origin: Point::ZERO,
        }
    }

    /// The final popup for a lookup result.
    pub fn for_outcome(term: &str, outcome: &LookupOutcome) -> Self {
        let (blocks, note) = match outcome {
            LookupOutcome::Definitions(items) => {
                (vec![Block::Definitions(items.clone())], FOUND_NOTE)
            }
            LookupOutcome::NoTargetDefinition => {
                (vec![Block::Message(NO_TARGET_MESSAGE)], NO_TARGET_NOTE)
            }
            LookupOutcome::NotFound => (vec![Block::Message(NOT_FOUND_MESSAGE)], NOT_FOUND_NOTE),
            LookupOutcome::Failed(_) => (vec![Block::Message(FAILURE_MESSAGE)], FAILURE_NOTE),
        };
        Self {
            title: term.to_owned(),
            blocks,
            link: Some(Link {
                url: wiktionary::page_url(term),
                label: LINK_LABEL,
                note,
            }),
            dark: false,
            origin: Point::ZERO,
        }
    }

    /// Set the theme from the page's computed background color.
    #[must_use]
    pub fn themed_for(mut self, background: &str) -> Self {
        self.dark = is_dark_background(background);
        self
    }

    /// Position the popup under `anchor`.
    #[must_use]
    pub fn placed(mut self, anchor: &Anchor) -> Self {
        self.origin = place(anchor);
        self
    }
}

/// Top-left corner for a popup under the selection, kept inside the viewport horizontally.
pub fn place(anchor: &Anchor) -> Point {
    let mut origin = Point::new(
        anchor.selection.x0 + anchor.scroll.x,
        anchor.selection.y1 + anchor.scroll.y + OFFSET_Y,
    );
    if origin.x + MAX_WIDTH > anchor.viewport_width {
        origin.x = anchor.viewport_width - SAFE_MARGIN;
    }
    origin
}

/// Whether a CSS `rgb(...)`/`rgba(...)` background reads as dark.
///
/// Uses perceived luminance `(0.299 r + 0.587 g + 0.114 b) / 255 < 0.4`. Anything that does
/// not parse is treated as light.
pub fn is_dark_background(color: &str) -> bool {
    let Some([r, g, b]) = parse_rgb(color) else {
        return false;
    };
    (0.299 * r + 0.587 * g + 0.114 * b) / 255.0 < 0.4
}

fn parse_rgb(color: &str) -> Option<[f64; 3]> {
    let color = color.trim();
    let inner = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<f64>().ok());
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    Some([r, g, b])
}
