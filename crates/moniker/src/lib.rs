use toc_collaborators::{MonikerProvider, UrlClassifier};
use toc_diagnostics::ErrorSink;
use toc_model::{MonikerList, TocNode, UrlKind};

/// Aggregates `node`'s moniker scope from its own link (if any) and its
/// already-resolved children, then compresses children whose scope doesn't
/// narrow the aggregate back to [`MonikerList::default`] (§4.7).
///
/// Must be called once the node's `items` already carry their own final
/// `monikers` (bottom-up, during node assembly).
pub fn aggregate(
    node: &mut TocNode,
    url_classifier: &dyn UrlClassifier,
    moniker_provider: &dyn MonikerProvider,
    sink: &dyn ErrorSink,
) -> MonikerList {
    let mut contributions: Vec<MonikerList> = Vec::new();

    if !node.href.is_empty() {
        match url_classifier.classify_url(&node.href) {
            UrlKind::External | UrlKind::AbsolutePath => contributions.push(MonikerList::default()),
            UrlKind::RelativePath => {
                if let Some(document) = &node.document {
                    contributions.push(moniker_provider.get_file_level_monikers(sink, &document.file_path));
                }
            }
        }
    }

    for child in &node.items {
        contributions.push(child.monikers.clone());
    }

    let union = MonikerList::union_all(contributions.iter());

    for child in &mut node.items {
        if child.monikers == union {
            child.monikers = MonikerList::default();
        }
    }

    union
}
