//! Minimal collaborator implementations used only by the CLI demo (§10.4).
//!
//! These are intentionally not a TOC-syntax parser: fixture files are a tiny
//! JSON shape describing a node tree directly, not any of the production
//! formats the real parser would handle. Everything else here does real
//! filesystem probing so the loader's href-resolution logic runs against an
//! actual fixture tree instead of canned fakes.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Deserialize;
use toc_collaborators::{
    ContentResolution, ContentValidator, DependencyKind, DependencyMapBuilder, LinkResolution, LinkResolver,
    MonikerProvider, ParseError, Parser, UrlClassifier, XrefResolution, XrefResolver,
};
use toc_diagnostics::ErrorSink;
use toc_model::{ContentType, Document, MonikerList, SourceLocation, TocNode, UrlKind, RESERVED_TOC_NAMES};
use toc_path::FilePath;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoNode {
    #[serde(default)]
    name: String,
    #[serde(default)]
    href: String,
    #[serde(default)]
    toc_href: String,
    #[serde(default)]
    topic_href: String,
    #[serde(default)]
    uid: String,
    #[serde(default)]
    children: Vec<String>,
    #[serde(default)]
    items: Vec<DemoNode>,
}

impl DemoNode {
    fn into_toc_node(self, file: &FilePath) -> TocNode {
        let source = SourceLocation::new(file.clone(), 0, 0);
        TocNode {
            name: self.name,
            href: self.href,
            toc_href: self.toc_href,
            topic_href: self.topic_href,
            uid: self.uid,
            homepage: String::new(),
            document: None,
            monikers: MonikerList::default(),
            items: self.items.into_iter().map(|child| child.into_toc_node(file)).collect(),
            children: self.children,
            source,
        }
    }
}

/// Reads the demo JSON shape from disk and converts it into an (unresolved)
/// [`TocNode`] tree.
pub struct DemoParser {
    pub root: PathBuf,
}

impl Parser for DemoParser {
    fn parse(&self, file: &FilePath, _sink: &dyn ErrorSink) -> Result<TocNode, ParseError> {
        let path = self.root.join(file.as_str());
        let content = fs::read_to_string(&path).map_err(|err| ParseError {
            file: file.clone(),
            message: format!("reading {}: {err}", path.display()),
        })?;
        let demo: DemoNode = serde_json::from_str(&content).map_err(|err| ParseError {
            file: file.clone(),
            message: format!("parsing {}: {err}", path.display()),
        })?;
        Ok(demo.into_toc_node(file))
    }
}

fn content_type_for(file: &FilePath) -> ContentType {
    let name = file.file_name().unwrap_or_default();
    if RESERVED_TOC_NAMES.iter().any(|reserved| reserved.eq_ignore_ascii_case(name)) {
        return ContentType::Toc;
    }
    match name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "md" => ContentType::Markdown,
        Some(ext) if ext == "yml" || ext == "yaml" => ContentType::Yaml,
        Some(ext) if ext == "json" => ContentType::Json,
        Some(ext) => ContentType::Other(ext),
        None => ContentType::Other(String::new()),
    }
}

/// Resolves hrefs against real files under `root`. Every file it finds is a
/// working-tree file; this demo never consults git history.
pub struct FsLinkResolver {
    pub root: PathBuf,
}

impl FsLinkResolver {
    fn probe(&self, current_file: &FilePath, href: &str) -> Option<Document> {
        let candidate = current_file.resolve_sibling(href);
        self.root
            .join(candidate.as_str())
            .is_file()
            .then(|| Document::new(candidate.clone(), content_type_for(&candidate)))
    }
}

impl LinkResolver for FsLinkResolver {
    fn resolve_link(&self, href: &str, current_file: &FilePath, _root_file: &FilePath) -> LinkResolution {
        match self.probe(current_file, href) {
            Some(document) => LinkResolution {
                error: None,
                resolved_href: document.file_path.as_str().to_owned(),
                document: Some(document),
            },
            None => LinkResolution::default(),
        }
    }

    fn resolve_content(&self, href: &str, current_file: &FilePath) -> ContentResolution {
        ContentResolution {
            error: None,
            document: self.probe(current_file, href),
        }
    }
}

/// Always empty: the demo fixture tree has no UID registry to consult.
pub struct NoopXrefResolver;

impl XrefResolver for NoopXrefResolver {
    fn resolve_xref_by_uid(
        &self,
        _uid: &str,
        _current_file: &FilePath,
        _root_file: &FilePath,
        _monikers: &MonikerList,
    ) -> XrefResolution {
        XrefResolution::default()
    }
}

/// Reads an optional `<file>.monikers.json` sidecar (a JSON array of
/// strings) next to each fixture file.
pub struct SidecarMonikerProvider {
    pub root: PathBuf,
}

impl MonikerProvider for SidecarMonikerProvider {
    fn get_file_level_monikers(&self, _sink: &dyn ErrorSink, file_path: &FilePath) -> MonikerList {
        let sidecar = self.root.join(format!("{}.monikers.json", file_path.as_str()));
        let Ok(raw) = fs::read_to_string(sidecar) else {
            return MonikerList::default();
        };
        serde_json::from_str::<Vec<String>>(&raw)
            .map(MonikerList::new)
            .unwrap_or_default()
    }
}

/// Traces validation calls instead of enforcing any real rule; the demo has
/// no breadcrumb/duplicate-entry policy of its own.
pub struct TracingContentValidator;

impl ContentValidator for TracingContentValidator {
    fn validate_toc_breadcrumb_link_external(&self, file_path: &FilePath, node: &TocNode) {
        tracing::trace!(file = %file_path, node = %node.name, "breadcrumb validation (no-op)");
    }

    fn validate_toc_entry_duplicated(&self, file_path: &FilePath, referenced_files: &[Document]) {
        tracing::trace!(file = %file_path, count = referenced_files.len(), "duplicate-entry validation (no-op)");
    }
}

#[derive(Default)]
pub struct RecordingDependencyMap {
    edges: Mutex<Vec<(FilePath, FilePath, DependencyKind)>>,
}

impl RecordingDependencyMap {
    pub fn drain(&self) -> Vec<(FilePath, FilePath, DependencyKind)> {
        self.edges.lock().expect("dependency map mutex poisoned").drain(..).collect()
    }
}

impl DependencyMapBuilder for RecordingDependencyMap {
    fn add_dependency_item(&self, from: &FilePath, to: &FilePath, kind: DependencyKind, _from_content_type: ContentType) {
        self.edges
            .lock()
            .expect("dependency map mutex poisoned")
            .push((from.clone(), to.clone(), kind));
    }
}

/// Classifies by string prefix: `http(s)://` and protocol-relative `//` are
/// external, a leading `/` is an absolute path, everything else is relative.
pub struct SimpleUrlClassifier;

impl UrlClassifier for SimpleUrlClassifier {
    fn classify_url(&self, href: &str) -> UrlKind {
        if href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//") {
            UrlKind::External
        } else if href.starts_with('/') {
            UrlKind::AbsolutePath
        } else {
            UrlKind::RelativePath
        }
    }
}
