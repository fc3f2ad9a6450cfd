// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wiktionary REST definition documents: URLs, parsing, filtering and formatting.
//!
//! The definitions endpoint answers with a JSON object keyed by language code, each value a
//! list of entries (`partOfSpeech`, `language`, `definitions`). Entries are parsed one by one
//! so a single odd entry does not discard the rest of the document.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Base of the definitions endpoint; the encoded term is appended.
pub const API_BASE: &str = "https://en.wiktionary.org/api/rest_v1/page/definition/";
/// Base of the human-readable pages.
pub const PAGE_BASE: &str = "https://en.wiktionary.org/wiki/";
/// At most this many definitions are shown.
pub const MAX_DEFINITIONS: usize = 8;
/// At most this many examples are shown per definition.
pub const MAX_EXAMPLES_PER_DEFINITION: usize = 2;

/// Characters left unescaped in a URI component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The definitions endpoint URL for `term`.
pub fn definition_url(term: &str) -> String {
    format!("{API_BASE}{}", utf8_percent_encode(term, COMPONENT))
}

/// The Chinese section of the page for `term`.
pub fn page_url(term: &str) -> String {
    format!("{PAGE_BASE}{}#Chinese", utf8_percent_encode(term, COMPONENT))
}

/// One language entry of a definition document.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    /// Part of speech, e.g. `Verb`.
    pub part_of_speech: String,
    /// Language label, e.g. `Chinese`.
    pub language: String,
    /// Senses of this entry.
    pub definitions: Vec<Definition>,
}

/// One sense of an [`Entry`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Definition {
    /// Definition markup.
    pub definition: String,
    /// Example markup.
    pub examples: Vec<Value>,
    /// Structured examples with optional translations.
    pub parsed_examples: Vec<ParsedExample>,
    /// Usage tags.
    pub tags: Vec<Value>,
    /// Short glosses.
    pub glosses: Vec<Value>,
    /// Free-form note.
    pub note: Option<Value>,
    /// Sense identifier.
    pub senseid: Option<Value>,
}

/// A structured example.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParsedExample {
    /// Example markup.
    pub example: Option<String>,
    /// Translation of the example.
    pub translation: Option<String>,
}

/// A definition ready to be shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefinitionItem {
    /// Part of speech of the owning entry (may be empty).
    pub part_of_speech: String,
    /// Language of the owning entry (may be empty).
    pub language: String,
    /// Definition markup, as returned by the API.
    pub definition_html: String,
    /// Up to [`MAX_EXAMPLES_PER_DEFINITION`] examples, as markup.
    pub examples: Vec<String>,
    /// Tags, glosses, note and sense id joined for display.
    pub meta: Option<String>,
}

/// Parse a response body into a definition document.
///
/// A body that is valid JSON but not an object yields an empty document.
pub fn parse_document(body: &str) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Entries labelled Chinese, Mandarin or Cantonese; Translingual entries when none are.
pub fn target_entries(doc: &Map<String, Value>) -> Vec<Entry> {
    let chinese = entries_matching(doc, |lang| {
        ["chinese", "mandarin", "cantonese"]
            .iter()
            .any(|name| lang.contains(name))
    });
    if !chinese.is_empty() {
        return chinese;
    }
    entries_matching(doc, |lang| lang.contains("translingual"))
}

fn entries_matching(doc: &Map<String, Value>, matches: impl Fn(&str) -> bool) -> Vec<Entry> {
    let mut out = Vec::new();
    for entries in doc.values() {
        let Value::Array(entries) = entries else {
            continue;
        };
        for raw in entries {
            if !raw.is_object() {
                continue;
            }
            match Entry::deserialize(raw) {
                Ok(entry) if matches(&entry.language.to_lowercase()) => out.push(entry),
                Ok(_) => {}
                Err(err) => tracing::debug!("skipping malformed definition entry: {err}"),
            }
        }
    }
    out
}

/// Flatten entries into at most [`MAX_DEFINITIONS`] display items.
pub fn format_definitions(entries: &[Entry]) -> Vec<DefinitionItem> {
    entries
        .iter()
        .flat_map(|entry| entry.definitions.iter().map(move |def| (entry, def)))
        .take(MAX_DEFINITIONS)
        .map(|(entry, def)| DefinitionItem {
            part_of_speech: entry.part_of_speech.clone(),
            language: entry.language.clone(),
            definition_html: def.definition.clone(),
            examples: examples_of(def),
            meta: meta_of(def),
        })
        .collect()
}

fn examples_of(def: &Definition) -> Vec<String> {
    let plain = def.examples.iter().filter_map(Value::as_str).map(String::from);
    let parsed = def.parsed_examples.iter().filter_map(|ex| {
        let example = ex.example.as_deref().filter(|e| !e.is_empty())?;
        Some(match ex.translation.as_deref().filter(|t| !t.is_empty()) {
            Some(translation) => format!("{example} — {translation}"),
            None => String::from(example),
        })
    });
    plain
        .chain(parsed)
        .take(MAX_EXAMPLES_PER_DEFINITION)
        .collect()
}

fn meta_of(def: &Definition) -> Option<String> {
    let mut parts = Vec::new();
    let tags = join_strings(&def.tags, ", ");
    if !tags.is_empty() {
        parts.push(tags);
    }
    let glosses = join_strings(&def.glosses, "; ");
    if !glosses.is_empty() {
        parts.push(glosses);
    }
    if let Some(note) = def.note.as_ref().and_then(Value::as_str) {
        if !note.is_empty() {
            parts.push(String::from(note));
        }
    }
    if let Some(id) = def.senseid.as_ref().and_then(Value::as_str) {
        if !id.is_empty() {
            parts.push(format!("#{id}"));
        }
    }
    (!parts.is_empty()).then(|| parts.join(" • "))
}

fn join_strings(values: &[Value], sep: &str) -> String {
    values
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}
