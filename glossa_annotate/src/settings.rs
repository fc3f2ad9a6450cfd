// Copyright 2025 the Glossa Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration channel: settings, live update messages and persistence.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::segment::SegmentationMode;

/// Settings in effect for the current site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Segmentation policy.
    pub segmentation_mode: SegmentationMode,
    /// Activate automatically on pages that look like target-script content.
    pub auto_detect: bool,
    /// Look up selections in the dictionary.
    pub dictionary_enabled: bool,
    /// Global switch; when off nothing runs.
    pub master_enabled: bool,
    /// Stored annotation state for this site, if the user ever chose one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_state: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            segmentation_mode: SegmentationMode::Word,
            auto_detect: true,
            dictionary_enabled: true,
            master_enabled: true,
            site_state: None,
        }
    }
}

/// Live configuration updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Message {
    /// Flip annotations on the current page and remember the choice for this site.
    TogglePinyin,
    /// `true` selects word segmentation, `false` per-character.
    SetSegmentation(bool),
    /// Enable or disable dictionary lookups.
    SetDictionaryEnabled(bool),
    /// Global on/off.
    SetMasterEnabled(bool),
}

/// Where settings live.
pub trait SettingsStore {
    /// Settings for the current site.
    fn load(&self) -> Result<Settings, SettingsError>;
    /// Remember the annotation state for the current site.
    fn save_site_state(&mut self, enabled: bool) -> Result<(), SettingsError>;
    /// Persist the global flags of `settings` (everything except the site state).
    fn save_flags(&mut self, settings: &Settings) -> Result<(), SettingsError>;
}

/// In-memory store, for tests and hosts that persist elsewhere.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    settings: Settings,
}

impl MemoryStore {
    /// A store holding `settings`.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// What has been stored so far.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(self.settings.clone())
    }

    fn save_site_state(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.settings.site_state = Some(enabled);
        Ok(())
    }

    fn save_flags(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        self.settings = Settings {
            site_state: self.settings.site_state,
            ..settings.clone()
        };
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    #[serde(flatten)]
    flags: Settings,
    #[serde(default)]
    sites: BTreeMap<String, bool>,
}

/// A JSON file holding global flags and per-site states:
///
/// ```json
/// { "segmentationMode": "word", "autoDetect": true, "dictionaryEnabled": true,
///   "masterEnabled": true, "sites": { "example.com": true } }
/// ```
///
/// A missing file reads as defaults.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
    site: String,
}

impl JsonStore {
    /// A store at `path` scoped to `site` (usually a host name).
    pub fn new(path: impl Into<PathBuf>, site: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            site: site.into(),
        }
    }

    fn read(&self) -> Result<StoredDocument, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(StoredDocument::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, doc: &StoredDocument) -> Result<(), SettingsError> {
        std::fs::write(&self.path, serde_json::to_string_pretty(doc)?)?;
        Ok(())
    }
}

impl SettingsStore for JsonStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        let doc = self.read()?;
        Ok(Settings {
            site_state: doc.sites.get(&self.site).copied(),
            ..doc.flags
        })
    }

    fn save_site_state(&mut self, enabled: bool) -> Result<(), SettingsError> {
        let mut doc = self.read()?;
        doc.sites.insert(self.site.clone(), enabled);
        self.write(&doc)
    }

    fn save_flags(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let mut doc = self.read()?;
        doc.flags = Settings {
            site_state: None,
            ..settings.clone()
        };
        self.write(&doc)
    }
}
