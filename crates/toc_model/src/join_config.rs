use std::collections::HashMap;
use toc_path::FilePath;

/// A single join entry: graft `reference_toc`'s items into `top_level_toc`,
/// keyed by the normalized `reference_toc` path (§6 Configuration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinEntry {
    pub reference_toc: FilePath,
    pub top_level_toc: Option<FilePath>,
}

/// Indexed join configuration: normalized `referenceToc` path -> entry.
///
/// Entries whose `referenceToc` is null are dropped during construction
/// (§6); this type only ever holds entries with a concrete `reference_toc`.
#[derive(Debug, Clone, Default)]
pub struct JoinConfig {
    by_reference_toc: HashMap<FilePath, Option<FilePath>>,
}

impl JoinConfig {
    pub fn new(entries: impl IntoIterator<Item = JoinEntry>) -> Self {
        let mut by_reference_toc = HashMap::new();
        for entry in entries {
            by_reference_toc.insert(entry.reference_toc, entry.top_level_toc);
        }
        Self { by_reference_toc }
    }

    /// Returns the configured `topLevelToc`, if `file` is a `referenceToc`
    /// with a join target (§4.9 step 2).
    pub fn top_level_toc_for(&self, file: &FilePath) -> Option<&FilePath> {
        self.by_reference_toc.get(file).and_then(|v| v.as_ref())
    }
}
