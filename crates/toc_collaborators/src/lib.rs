//! Trait contracts for the loader's external collaborators (§6).
//!
//! The loader core (`toc_file_loader`, `toc_loader`) is generic over these
//! traits. Production hosts wire in their own parser/link-resolver/etc;
//! tests wire in fakes (see `toc_test_support`).

use thiserror::Error;
use toc_diagnostics::{Diagnostic, ErrorSink};
use toc_model::{ContentType, Document, MonikerList, TocNode};
use toc_path::FilePath;

/// Fatal error produced while parsing a single TOC file.
#[derive(Debug, Clone, Error)]
#[error("failed to parse {file}: {message}")]
pub struct ParseError {
    pub file: FilePath,
    pub message: String,
}

/// Produces the unresolved (input-form) node tree for one TOC file (§6 Parser).
pub trait Parser: Send + Sync {
    fn parse(&self, file: &FilePath, sink: &dyn ErrorSink) -> Result<TocNode, ParseError>;
}

/// Result of resolving a raw href against the doc set (§6 LinkResolver).
#[derive(Debug, Clone, Default)]
pub struct LinkResolution {
    pub error: Option<Diagnostic>,
    pub resolved_href: String,
    pub document: Option<Document>,
}

/// Result of resolving raw content (a TOC file, typically) (§6 LinkResolver).
#[derive(Debug, Clone, Default)]
pub struct ContentResolution {
    pub error: Option<Diagnostic>,
    pub document: Option<Document>,
}

pub trait LinkResolver: Send + Sync {
    fn resolve_link(&self, href: &str, current_file: &FilePath, root_file: &FilePath) -> LinkResolution;

    fn resolve_content(&self, href: &str, current_file: &FilePath) -> ContentResolution;
}

/// Result of a UID cross-reference lookup (§6 XrefResolver).
#[derive(Debug, Clone, Default)]
pub struct XrefResolution {
    pub error: Option<Diagnostic>,
    pub link: Option<String>,
    pub display_name: Option<String>,
    pub declaring_file: Option<Document>,
}

pub trait XrefResolver: Send + Sync {
    fn resolve_xref_by_uid(
        &self,
        uid: &str,
        current_file: &FilePath,
        root_file: &FilePath,
        monikers: &MonikerList,
    ) -> XrefResolution;
}

pub trait MonikerProvider: Send + Sync {
    fn get_file_level_monikers(&self, sink: &dyn ErrorSink, file_path: &FilePath) -> MonikerList;
}

pub trait ContentValidator: Send + Sync {
    fn validate_toc_breadcrumb_link_external(&self, file_path: &FilePath, node: &TocNode);

    fn validate_toc_entry_duplicated(&self, file_path: &FilePath, referenced_files: &[Document]);
}

/// The kind of dependency edge recorded by `addDependencyItem` (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Toc,
    Topic,
    Uid,
    Folder,
}

pub trait DependencyMapBuilder: Send + Sync {
    fn add_dependency_item(
        &self,
        from: &FilePath,
        to: &FilePath,
        kind: DependencyKind,
        from_content_type: ContentType,
    );
}

pub trait DocumentProvider: Send + Sync {
    fn get_document(&self, file_path: &FilePath) -> Option<Document>;
}

/// The external URL-classification utility consulted by the href classifier
/// (§4.1 step 2).
pub trait UrlClassifier: Send + Sync {
    fn classify_url(&self, href: &str) -> toc_model::UrlKind;
}

/// Bundles every collaborator the loader core needs, so call sites thread a
/// single value instead of six separate trait objects.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub parser: &'a dyn Parser,
    pub link_resolver: &'a dyn LinkResolver,
    pub xref_resolver: &'a dyn XrefResolver,
    pub moniker_provider: &'a dyn MonikerProvider,
    pub content_validator: &'a dyn ContentValidator,
    pub dependency_map: &'a dyn DependencyMapBuilder,
    pub url_classifier: &'a dyn UrlClassifier,
    pub error_sink: &'a dyn ErrorSink,
}
