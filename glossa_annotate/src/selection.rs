// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalization of user selections into dictionary terms.

use crate::script::{contains_target_script, extract_target_runs};

/// Longest term (in characters) sent to the dictionary.
pub const SELECTION_MAX_CHARS: usize = 20;

/// Keep only target-script runs of the trimmed selection, concatenated.
///
/// A selection without any target-script character is returned trimmed but otherwise as is.
pub fn normalize_selection(raw: &str) -> String {
    let trimmed = raw.trim();
    let runs = extract_target_runs(trimmed);
    if runs.is_empty() {
        trimmed.to_owned()
    } else {
        runs.concat()
    }
}

/// The term to look up for a raw selection, if it qualifies.
pub fn lookup_term(raw: &str) -> Option<String> {
    let term = normalize_selection(raw);
    (contains_target_script(&term) && term.chars().count() <= SELECTION_MAX_CHARS).then_some(term)
}
