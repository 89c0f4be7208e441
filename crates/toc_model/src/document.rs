use toc_path::FilePath;

/// The kind of content a resolved [`Document`] backs, as reported by the
/// external document registry (§6 `DocumentProvider`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Toc,
    Markdown,
    Yaml,
    Json,
    Other(String),
}

/// Opaque handle returned by the external document registry (§3).
///
/// The loader never inspects document contents; it only carries the handle
/// around for moniker lookups and dependency-map bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    pub file_path: FilePath,
    pub content_type: ContentType,
}

impl Document {
    pub fn new(file_path: FilePath, content_type: ContentType) -> Self {
        Self {
            file_path,
            content_type,
        }
    }
}
