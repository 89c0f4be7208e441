//! JSON-shaped join configuration (§6 "Configuration", §10.3).
//!
//! Mirrors the teacher workspace's `UnusedFinderJSONConfig` ->
//! `UnusedFinderConfig` split: a `#[derive(Deserialize)]` struct that matches
//! the on-disk shape, normalized via `TryFrom` into the runtime form the
//! loader actually consumes (`toc_model::JoinConfig`).

use serde::Deserialize;
use thiserror::Error;
use toc_model::{JoinConfig, JoinEntry};
use toc_path::FilePath;

/// One join entry as authored in the build tool's config file.
///
/// `reference_toc: null` entries are dropped during normalization (§6:
/// "entries with null `referenceToc` are ignored").
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEntryJson {
    pub reference_toc: Option<String>,
    pub top_level_toc: Option<String>,
}

/// The join configuration as a whole: a bare JSON array of entries.
pub type JoinConfigJson = Vec<JoinEntryJson>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("join config entry has an empty referenceToc path")]
    EmptyReferenceToc,
    #[error("join config entry has an empty topLevelToc path")]
    EmptyTopLevelToc,
}

/// Parses `json` (the raw text of a join-config file) into a normalized
/// [`JoinConfig`].
pub fn parse_join_config(json: &str) -> Result<JoinConfig, ParseConfigError> {
    let entries: JoinConfigJson = serde_json::from_str(json)?;
    Ok(normalize(entries)?)
}

#[derive(Debug, Error)]
pub enum ParseConfigError {
    #[error("invalid join config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Normalizes already-deserialized JSON entries into a [`JoinConfig`],
/// dropping entries with no `referenceToc` and rejecting entries whose
/// present paths are empty strings.
pub fn normalize(entries: JoinConfigJson) -> Result<JoinConfig, ConfigError> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(reference_toc) = entry.reference_toc else {
            continue;
        };
        if reference_toc.is_empty() {
            return Err(ConfigError::EmptyReferenceToc);
        }
        let top_level_toc = match entry.top_level_toc {
            Some(path) if path.is_empty() => return Err(ConfigError::EmptyTopLevelToc),
            Some(path) => Some(FilePath::working_tree(path)),
            None => None,
        };
        out.push(JoinEntry {
            reference_toc: FilePath::working_tree(reference_toc),
            top_level_toc,
        });
    }
    Ok(JoinConfig::new(out))
}
