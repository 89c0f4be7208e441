//! Public entry point of the TOC loader (§4.9).
//!
//! `TocLoader::load` is the only thing a host calls: it consults the memo
//! cache, falls through to `toc_file_loader::load_toc_file` on a miss, grafts
//! a configured join partner in if one applies, and publishes the result.

use std::sync::Arc;

use memo_cache::MemoCache;
use toc_collaborators::Collaborators;
use toc_diagnostics::ErrorSink;
use toc_file_loader::{load_toc_file, LoadError, RecursionGuard};
use toc_model::{Document, JoinConfig, TocNode};
use toc_path::FilePath;

pub use toc_file_loader::LoadError as Error;

/// The triple a `Load` publishes: the resolved tree plus the two
/// dependency side-tables (§3, §4.9).
///
/// Each component is `Arc`-wrapped so that repeated `load()` calls for the
/// same key return the *same* allocation (§3-I5: "reference equality of the
/// triple components"), not merely an equal clone.
pub type LoadResult = (Arc<TocNode>, Arc<Vec<Document>>, Arc<Vec<Document>>);

/// Caches `Load` results per `FilePath` and applies the join configuration
/// on a cache miss (§4.9).
pub struct TocLoader<'a> {
    cache: MemoCache<Result<LoadResult, LoadError>>,
    join_config: &'a JoinConfig,
}

impl<'a> TocLoader<'a> {
    pub fn new(join_config: &'a JoinConfig) -> Self {
        Self {
            cache: MemoCache::new(),
            join_config,
        }
    }

    /// `Load(file)` (§4.9): memoized, single-flight per `file`.
    pub fn load(&self, file: &FilePath, collaborators: Collaborators<'_>) -> Result<LoadResult, LoadError> {
        self.cache.get_or_compute(file.clone(), || {
            tracing::debug!(file = %file, "toc_loader: cache miss, computing");
            let result = self.compute(file, collaborators);
            match &result {
                Ok(_) => tracing::debug!(file = %file, "toc_loader: computed and cached"),
                Err(err) => tracing::debug!(file = %file, error = %err, "toc_loader: load failed"),
            }
            result
        })
    }

    fn compute(&self, file: &FilePath, collaborators: Collaborators<'_>) -> Result<LoadResult, LoadError> {
        let mut referenced_files = Vec::new();
        let mut referenced_tocs = Vec::new();
        let guard = RecursionGuard::new();

        let resolved = load_toc_file(
            file,
            file,
            &mut referenced_files,
            &mut referenced_tocs,
            collaborators,
            &guard,
        )?;

        let node = match self.join_config.top_level_toc_for(file).cloned() {
            Some(top_level_toc) => {
                tracing::debug!(
                    reference_toc = %file,
                    top_level_toc = %top_level_toc,
                    "toc_loader: join configured, loading top-level toc"
                );
                let (top_level_node, _, _) = self.load(&top_level_toc, collaborators)?;
                join_toc_merger::merge((*top_level_node).clone(), resolved.items)
            }
            None => resolved,
        };

        Ok((Arc::new(node), Arc::new(referenced_files), Arc::new(referenced_tocs)))
    }

    /// Reports a fatal [`LoadError`] through `sink` the way every other
    /// recoverable diagnostic is reported, for hosts that want one uniform
    /// reporting path even for the branch-aborting case.
    pub fn report_failure(sink: &dyn ErrorSink, file: &FilePath, error: &LoadError) {
        if let LoadError::Circular(diagnostic) = error {
            sink.report(toc_diagnostics::DiagnosticEntry {
                diagnostic: diagnostic.clone(),
                source: toc_model::SourceLocation::new(file.clone(), 0, 0),
            });
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use toc_collaborators::{
        ContentResolution, ContentValidator, DependencyKind, DependencyMapBuilder, LinkResolution, LinkResolver,
        MonikerProvider, ParseError, Parser, UrlClassifier, XrefResolution, XrefResolver,
    };
    use toc_diagnostics::VecErrorSink;
    use toc_model::{ContentType, JoinEntry, MonikerList, SourceLocation, UrlKind};

    struct FakeParser {
        files: HashMap<String, TocNode>,
    }
    impl Parser for FakeParser {
        fn parse(&self, file: &FilePath, _sink: &dyn ErrorSink) -> Result<TocNode, ParseError> {
            self.files.get(file.as_str()).cloned().ok_or_else(|| ParseError {
                file: file.clone(),
                message: "no such fixture file".to_owned(),
            })
        }
    }

    #[derive(Default)]
    struct FakeLinkResolver {
        topics: HashMap<String, Document>,
        content: HashMap<String, Document>,
    }
    impl LinkResolver for FakeLinkResolver {
        fn resolve_link(&self, href: &str, _current_file: &FilePath, _root_file: &FilePath) -> LinkResolution {
            match self.topics.get(href) {
                Some(doc) => LinkResolution {
                    error: None,
                    resolved_href: href.to_owned(),
                    document: Some(doc.clone()),
                },
                None => LinkResolution::default(),
            }
        }
        fn resolve_content(&self, href: &str, _current_file: &FilePath) -> ContentResolution {
            ContentResolution {
                error: None,
                document: self.content.get(href).cloned(),
            }
        }
    }

    struct NoopXrefResolver;
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

    struct NoopMonikerProvider;
    impl MonikerProvider for NoopMonikerProvider {
        fn get_file_level_monikers(&self, _sink: &dyn ErrorSink, _file_path: &FilePath) -> MonikerList {
            MonikerList::default()
        }
    }

    struct NoopContentValidator;
    impl ContentValidator for NoopContentValidator {
        fn validate_toc_breadcrumb_link_external(&self, _file_path: &FilePath, _node: &TocNode) {}
        fn validate_toc_entry_duplicated(&self, _file_path: &FilePath, _referenced_files: &[Document]) {}
    }

    #[derive(Default)]
    struct RecordingDependencyMap {
        edges: Mutex<Vec<(FilePath, FilePath, DependencyKind)>>,
    }
    impl DependencyMapBuilder for RecordingDependencyMap {
        fn add_dependency_item(&self, from: &FilePath, to: &FilePath, kind: DependencyKind, _from_content_type: ContentType) {
            self.edges.lock().push((from.clone(), to.clone(), kind));
        }
    }

    struct RelativeUrlClassifier;
    impl UrlClassifier for RelativeUrlClassifier {
        fn classify_url(&self, _href: &str) -> UrlKind {
            UrlKind::RelativePath
        }
    }

    fn leaf(name: &str, href: &str) -> TocNode {
        TocNode {
            href: href.to_owned(),
            ..TocNode::input(name, SourceLocation::default())
        }
    }

    fn named(name: &str) -> TocNode {
        TocNode::input(name, SourceLocation::default())
    }

    struct Harness {
        parser: FakeParser,
        link_resolver: FakeLinkResolver,
        xref_resolver: NoopXrefResolver,
        moniker_provider: NoopMonikerProvider,
        content_validator: NoopContentValidator,
        dependency_map: RecordingDependencyMap,
        url_classifier: RelativeUrlClassifier,
        sink: VecErrorSink,
    }

    impl Harness {
        fn new(files: HashMap<String, TocNode>, content: HashMap<String, Document>) -> Self {
            Self {
                parser: FakeParser { files },
                link_resolver: FakeLinkResolver {
                    topics: HashMap::new(),
                    content,
                },
                xref_resolver: NoopXrefResolver,
                moniker_provider: NoopMonikerProvider,
                content_validator: NoopContentValidator,
                dependency_map: RecordingDependencyMap::default(),
                url_classifier: RelativeUrlClassifier,
                sink: VecErrorSink::new(),
            }
        }

        fn collaborators(&self) -> Collaborators<'_> {
            Collaborators {
                parser: &self.parser,
                link_resolver: &self.link_resolver,
                xref_resolver: &self.xref_resolver,
                moniker_provider: &self.moniker_provider,
                content_validator: &self.content_validator,
                dependency_map: &self.dependency_map,
                url_classifier: &self.url_classifier,
                error_sink: &self.sink,
            }
        }
    }

    #[test]
    fn repeated_loads_are_reference_identical_not_merely_equal() {
        let mut root = named("root");
        root.items.push(leaf("A", "a.md"));
        let mut files = HashMap::new();
        files.insert("root.yml".to_owned(), root);
        let mut content = HashMap::new();
        content.insert(
            "a.md".to_owned(),
            Document::new(FilePath::working_tree("a.md"), ContentType::Markdown),
        );
        let harness = Harness::new(files, content);

        let join_config = JoinConfig::default();
        let loader = TocLoader::new(&join_config);
        let file = FilePath::working_tree("root.yml");

        let (node_a, files_a, tocs_a) = loader.load(&file, harness.collaborators()).unwrap();
        let (node_b, files_b, tocs_b) = loader.load(&file, harness.collaborators()).unwrap();

        assert!(Arc::ptr_eq(&node_a, &node_b));
        assert!(Arc::ptr_eq(&files_a, &files_b));
        assert!(Arc::ptr_eq(&tocs_a, &tocs_b));
    }

    #[test]
    fn join_config_grafts_reference_items_into_the_top_level_tree() {
        let mut top = named("top");
        let mut guide = named("Guide");
        guide.children = vec!["Guide/*".to_owned()];
        top.items.push(guide);

        let mut reference = named("reference-root");
        reference.items.push(named("Guide/Intro"));
        reference.items.push(named("Guide/Setup"));
        reference.items.push(named("Other"));

        let mut files = HashMap::new();
        files.insert("top.yml".to_owned(), top);
        files.insert("ref.yml".to_owned(), reference);
        let harness = Harness::new(files, HashMap::new());

        let join_config = JoinConfig::new([JoinEntry {
            reference_toc: FilePath::working_tree("ref.yml"),
            top_level_toc: Some(FilePath::working_tree("top.yml")),
        }]);
        let loader = TocLoader::new(&join_config);

        let (merged, _, _) = loader
            .load(&FilePath::working_tree("ref.yml"), harness.collaborators())
            .unwrap();

        assert_eq!(merged.name, "top");
        let grafted: Vec<&str> = merged.items[0].items.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(grafted, vec!["Guide/Intro", "Guide/Setup"]);
    }

    #[test]
    fn circular_reference_surfaces_as_a_load_error() {
        let mut a = named("A");
        a.items.push(TocNode {
            toc_href: "b/TOC.yml".to_owned(),
            ..named("toB")
        });
        let mut b = named("B");
        b.items.push(TocNode {
            toc_href: "a/TOC.yml".to_owned(),
            ..named("toA")
        });

        let mut files = HashMap::new();
        files.insert("a/TOC.yml".to_owned(), a);
        files.insert("b/TOC.yml".to_owned(), b);

        let mut content = HashMap::new();
        content.insert(
            "a/TOC.yml".to_owned(),
            Document::new(FilePath::working_tree("a/TOC.yml"), ContentType::Toc),
        );
        content.insert(
            "b/TOC.yml".to_owned(),
            Document::new(FilePath::working_tree("b/TOC.yml"), ContentType::Toc),
        );
        let harness = Harness::new(files, content);

        let join_config = JoinConfig::default();
        let loader = TocLoader::new(&join_config);

        let result = loader.load(&FilePath::working_tree("a/TOC.yml"), harness.collaborators());
        assert!(matches!(result, Err(LoadError::Circular(_))));
    }
}
