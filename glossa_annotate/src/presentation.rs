// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation class selection from a font-family declaration.

/// Stylistic variant for transcriptions, matched to the surrounding text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresentationClass {
    /// Serif text.
    Serif,
    /// Sans-serif text; the fallback.
    #[default]
    Sans,
}

impl PresentationClass {
    /// Class name applied to the transcription element.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Serif => "is-serif",
            Self::Sans => "is-sans",
        }
    }
}

const SERIF_FAMILIES: [&str; 11] = [
    "noto serif sc",
    "noto serif",
    "songti sc",
    "simsun",
    "pmingliu",
    "times new roman",
    "times",
    "georgia",
    "garamond",
    "palatino",
    "mincho",
];

/// Classify a CSS `font-family` declaration.
///
/// Serif when the first family names a known serif face, or when the declaration uses the
/// generic `serif` without `sans-serif`. Everything else, including an empty declaration,
/// is sans.
pub fn classify_font_family(declaration: &str) -> PresentationClass {
    let lower = declaration.to_lowercase();
    let first = lower
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|f| !f.is_empty())
        .unwrap_or("");
    if SERIF_FAMILIES.iter().any(|name| first.contains(name)) {
        return PresentationClass::Serif;
    }
    if lower.contains("serif") && !lower.contains("sans-serif") {
        return PresentationClass::Serif;
    }
    PresentationClass::Sans
}
