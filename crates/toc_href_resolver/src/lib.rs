use toc_collaborators::LinkResolver;
use toc_diagnostics::{Diagnostic, DiagnosticEntry, ErrorSink};
use toc_model::{ContentType, Document, SourceLocation, TocHrefKind};
use toc_path::FilePath;

/// Folder-probe order for `RelativeFolder` resolution (§4.2). Experimental
/// variants are reachable only via an explicit `TocFile` href, never probed.
const FOLDER_PROBE_NAMES: [&str; 3] = ["TOC.md", "TOC.json", "TOC.yml"];

/// Resolves a classified href to its backing [`Document`] (§4.2).
///
/// `referenced_tocs` receives the resolved document when `kind` is
/// `TocFile` (§4.2 "append the returned document to referencedTocs").
pub fn resolve(
    current_file: &FilePath,
    href: &str,
    kind: TocHrefKind,
    link_resolver: &dyn LinkResolver,
    sink: &dyn ErrorSink,
    source: SourceLocation,
    referenced_tocs: &mut Vec<Document>,
) -> Option<Document> {
    match kind {
        TocHrefKind::RelativeFolder => resolve_folder(current_file, href, link_resolver, sink, source),
        TocHrefKind::TocFile => resolve_toc_file(current_file, href, link_resolver, sink, source, referenced_tocs),
        TocHrefKind::AbsolutePath | TocHrefKind::RelativeFile | TocHrefKind::None => None,
    }
}

fn resolve_folder(
    current_file: &FilePath,
    href: &str,
    link_resolver: &dyn LinkResolver,
    sink: &dyn ErrorSink,
    source: SourceLocation,
) -> Option<Document> {
    let mut first_git_commit_hit: Option<Document> = None;

    for name in FOLDER_PROBE_NAMES {
        let candidate = join_folder_path(href, name);
        let resolution = link_resolver.resolve_content(&candidate, current_file);
        let Some(document) = resolution.document else {
            continue;
        };

        if !document.file_path.is_git_commit() {
            return Some(document);
        }
        if first_git_commit_hit.is_none() {
            first_git_commit_hit = Some(document);
        }
    }

    if first_git_commit_hit.is_some() {
        return first_git_commit_hit;
    }

    sink.report(DiagnosticEntry {
        diagnostic: Diagnostic::FileNotFound {
            href: href.to_owned(),
        },
        source,
    });
    None
}

fn resolve_toc_file(
    current_file: &FilePath,
    href: &str,
    link_resolver: &dyn LinkResolver,
    sink: &dyn ErrorSink,
    source: SourceLocation,
    referenced_tocs: &mut Vec<Document>,
) -> Option<Document> {
    let resolution = link_resolver.resolve_content(href, current_file);
    if let Some(diagnostic) = resolution.error {
        sink.report(DiagnosticEntry {
            diagnostic,
            source,
        });
    }
    if let Some(document) = &resolution.document {
        referenced_tocs.push(document.clone());
    }
    resolution.document
}

fn join_folder_path(href: &str, name: &str) -> String {
    if href.ends_with('/') || href.ends_with('\\') {
        format!("{href}{name}")
    } else {
        format!("{href}/{name}")
    }
}
