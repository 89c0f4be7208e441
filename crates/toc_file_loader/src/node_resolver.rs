use toc_collaborators::Collaborators;
use toc_diagnostics::{Diagnostic, DiagnosticEntry};
use toc_model::{ContentType, Document, MonikerList, SourceLocation, TocHrefKind, TocNode};
use toc_path::FilePath;

use crate::recursion_guard::RecursionGuard;
use crate::LoadError;

/// Resolves one author-supplied node into its final form (§4.3).
///
/// `referenced_files`/`referenced_tocs` are this node's own scratch
/// accumulators; the caller (`load_toc_nodes`) merges them into its own
/// lists once every sibling has finished.
pub fn resolve_node(
    input: TocNode,
    current_file: &FilePath,
    root_file: &FilePath,
    collaborators: Collaborators<'_>,
    guard: &RecursionGuard,
    referenced_files: &mut Vec<Document>,
    referenced_tocs: &mut Vec<Document>,
) -> Result<TocNode, LoadError> {
    let source = input.source.clone();

    let toc_href = derive_toc_href(&input, collaborators, &source);
    let topic_href = derive_topic_href(&input, collaborators, &source);

    collaborators
        .content_validator
        .validate_toc_breadcrumb_link_external(current_file, &input);

    let toc_kind = href_classifier::classify(&toc_href, collaborators.url_classifier);

    let mut resolved_toc_href = String::new();
    // Only a `TocFile` include replaces this node's own `items` (§4.3 step 6
    // restricts that to "TocFile inclusion"). A `RelativeFolder` include
    // keeps the node's own authored children; the probed folder TOC
    // contributes only its first item, used below to derive this node's
    // `href`/`document` and the dependency-map edge (§4.3 step 4).
    let mut toc_file_items: Option<Vec<TocNode>> = None;
    let mut sub_children_first: Option<TocNode> = None;

    match toc_kind {
        TocHrefKind::None | TocHrefKind::RelativeFile => {}
        TocHrefKind::AbsolutePath => resolved_toc_href = toc_href.clone(),
        TocHrefKind::TocFile => {
            let resolved_doc = toc_href_resolver::resolve(
                current_file,
                &toc_href,
                toc_kind,
                collaborators.link_resolver,
                collaborators.error_sink,
                source.clone(),
                referenced_tocs,
            );
            if let Some(doc) = resolved_doc {
                let sub_root = crate::file_loader::load_toc_file(
                    &doc.file_path,
                    root_file,
                    referenced_files,
                    referenced_tocs,
                    collaborators,
                    guard,
                )?;
                sub_children_first = get_first_item(&sub_root.items).cloned();
                toc_file_items = Some(sub_root.items);
            }
        }
        TocHrefKind::RelativeFolder => {
            let resolved_doc = toc_href_resolver::resolve(
                current_file,
                &toc_href,
                toc_kind,
                collaborators.link_resolver,
                collaborators.error_sink,
                source.clone(),
                referenced_tocs,
            );
            if let Some(doc) = resolved_doc {
                // Folder-referenced TOCs don't propagate their referenced
                // files to the parent load (§4.3 step 4).
                let mut scoped_out_files = Vec::new();
                let sub_root = crate::file_loader::load_toc_file(
                    &doc.file_path,
                    root_file,
                    &mut scoped_out_files,
                    referenced_tocs,
                    collaborators,
                    guard,
                )?;
                if let Some(first) = get_first_item(&sub_root.items) {
                    if let Some(first_document) = &first.document {
                        collaborators.dependency_map.add_dependency_item(
                            current_file,
                            &first_document.file_path,
                            toc_collaborators::DependencyKind::Folder,
                            ContentType::Toc,
                        );
                    }
                    sub_children_first = Some(first.clone());
                }
                // This node keeps its own `items` — the probed folder TOC's
                // tree is not grafted in, only its first item is consulted
                // above.
            }
        }
    }

    let add_to_referenced_files = !toc_kind.is_toc_include_href();
    let mut resolved_topic_href = String::new();
    let mut display_name: Option<String> = None;
    let mut topic_document: Option<Document> = None;

    if !topic_href.is_empty() {
        let resolution = collaborators
            .link_resolver
            .resolve_link(&topic_href, current_file, root_file);
        if let Some(diagnostic) = resolution.error {
            collaborators.error_sink.report(DiagnosticEntry {
                diagnostic,
                source: source.clone(),
            });
        }
        resolved_topic_href = resolution.resolved_href;
        if add_to_referenced_files {
            if let Some(document) = &resolution.document {
                referenced_files.push(document.clone());
            }
        }
        topic_document = resolution.document;
    } else if !input.uid.is_empty() {
        let monikers = collaborators
            .moniker_provider
            .get_file_level_monikers(collaborators.error_sink, current_file);
        let xref = collaborators
            .xref_resolver
            .resolve_xref_by_uid(&input.uid, current_file, root_file, &monikers);
        if let Some(diagnostic) = xref.error {
            collaborators.error_sink.report(DiagnosticEntry {
                diagnostic,
                source: source.clone(),
            });
        }
        resolved_topic_href = xref.link.unwrap_or_default();
        display_name = xref.display_name;
        if let Some(document) = &xref.declaring_file {
            referenced_files.push(document.clone());
        }
        topic_document = xref.declaring_file;
    }

    let input_href_empty = input.href.is_empty();
    let input_topic_href_nonempty = !input.topic_href.is_empty();

    let TocNode {
        name: input_name,
        uid: input_uid,
        items: input_items,
        children: input_children,
        ..
    } = input;

    let resolved_items = match toc_file_items {
        Some(items) => items,
        None => crate::file_loader::load_toc_nodes(
            input_items,
            current_file,
            root_file,
            collaborators,
            guard,
            referenced_files,
            referenced_tocs,
        )?,
    };

    let sub_children_first_href = sub_children_first.as_ref().map(|n| n.href.clone()).unwrap_or_default();

    let final_href = first_non_empty([
        resolved_toc_href.as_str(),
        resolved_topic_href.as_str(),
        sub_children_first_href.as_str(),
    ]);

    let homepage = if input_href_empty && input_topic_href_nonempty {
        resolved_topic_href.clone()
    } else {
        String::new()
    };

    let final_name = if !input_name.is_empty() {
        input_name
    } else {
        display_name.unwrap_or_default()
    };

    let document = topic_document.or_else(|| sub_children_first.and_then(|n| n.document));

    let mut resolved_node = TocNode {
        name: final_name,
        href: final_href,
        toc_href: String::new(),
        topic_href: String::new(),
        uid: input_uid,
        homepage,
        document,
        monikers: MonikerList::default(),
        items: resolved_items,
        children: input_children,
        source,
    };

    resolved_node.monikers = moniker::aggregate(
        &mut resolved_node,
        collaborators.url_classifier,
        collaborators.moniker_provider,
        collaborators.error_sink,
    );

    if resolved_node.name.is_empty() {
        collaborators.error_sink.report(DiagnosticEntry {
            diagnostic: Diagnostic::MissingAttribute { attribute: "name" },
            source: resolved_node.source.clone(),
        });
    }

    Ok(resolved_node)
}

fn derive_toc_href(input: &TocNode, collaborators: Collaborators<'_>, source: &SourceLocation) -> String {
    if !input.toc_href.is_empty() {
        let kind = href_classifier::classify(&input.toc_href, collaborators.url_classifier);
        if kind.is_toc_include_href() || kind == TocHrefKind::AbsolutePath {
            return input.toc_href.clone();
        }
        collaborators.error_sink.report(DiagnosticEntry {
            diagnostic: Diagnostic::InvalidTocHref {
                href: input.toc_href.clone(),
            },
            source: source.clone(),
        });
    }

    if !input.href.is_empty() {
        let kind = href_classifier::classify(&input.href, collaborators.url_classifier);
        if kind.is_toc_include_href() {
            return input.href.clone();
        }
    }

    String::new()
}

fn derive_topic_href(input: &TocNode, collaborators: Collaborators<'_>, source: &SourceLocation) -> String {
    if !input.topic_href.is_empty() {
        let kind = href_classifier::classify(&input.topic_href, collaborators.url_classifier);
        if kind.is_toc_include_href() {
            collaborators.error_sink.report(DiagnosticEntry {
                diagnostic: Diagnostic::InvalidTopicHref {
                    href: input.topic_href.clone(),
                },
                source: source.clone(),
            });
        } else {
            return input.topic_href.clone();
        }
    }

    let href_kind = href_classifier::classify(&input.href, collaborators.url_classifier);
    if input.href.is_empty() || !href_kind.is_toc_include_href() {
        input.href.clone()
    } else {
        String::new()
    }
}

/// First item with a non-empty `href` (§4.3 `getFirstItem`).
///
/// Deliberately asymmetric (§9 Open Question 2, preserved verbatim): each
/// sibling is checked only for its own `href`, never recursed into; only if
/// none of them has one does the search descend into the *first* sibling's
/// subtree, ignoring the others' children entirely.
fn get_first_item(items: &[TocNode]) -> Option<&TocNode> {
    for item in items {
        if !item.href.is_empty() {
            return Some(item);
        }
    }
    get_first_item(&items.first()?.items)
}

fn first_non_empty<const N: usize>(candidates: [&str; N]) -> String {
    candidates
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_owned()
}
