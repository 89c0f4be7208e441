use rayon::prelude::*;
use toc_collaborators::Collaborators;
use toc_diagnostics::DiagnosticEntry;
use toc_model::{Document, SourceLocation, TocNode};
use toc_path::FilePath;

use crate::recursion_guard::RecursionGuard;
use crate::LoadError;

/// Resolves a list of sibling input nodes in parallel (§4.5 `loadTocNodes`).
///
/// Each sibling resolves against its own scratch `referenced_files` /
/// `referenced_tocs`; those are merged into the caller's lists, in input
/// order, once every sibling has finished. `rayon`'s indexed `collect`
/// keeps results positional without an explicit result buffer.
pub fn load_toc_nodes(
    inputs: Vec<TocNode>,
    current_file: &FilePath,
    root_file: &FilePath,
    collaborators: Collaborators<'_>,
    guard: &RecursionGuard,
    referenced_files: &mut Vec<Document>,
    referenced_tocs: &mut Vec<Document>,
) -> Result<Vec<TocNode>, LoadError> {
    let results: Vec<Result<(TocNode, Vec<Document>, Vec<Document>), LoadError>> = inputs
        .into_par_iter()
        .map(|input| {
            let mut local_files = Vec::new();
            let mut local_tocs = Vec::new();
            let node = crate::node_resolver::resolve_node(
                input,
                current_file,
                root_file,
                collaborators,
                guard,
                &mut local_files,
                &mut local_tocs,
            )?;
            Ok((node, local_files, local_tocs))
        })
        .collect();

    let mut resolved = Vec::with_capacity(results.len());
    for result in results {
        let (node, local_files, local_tocs) = result?;
        referenced_files.extend(local_files);
        referenced_tocs.extend(local_tocs);
        resolved.push(node);
    }
    Ok(resolved)
}

/// Loads and fully resolves one TOC file (§4.5 `loadTocFile`).
pub fn load_toc_file(
    file: &FilePath,
    root_file: &FilePath,
    referenced_files: &mut Vec<Document>,
    referenced_tocs: &mut Vec<Document>,
    collaborators: Collaborators<'_>,
    guard: &RecursionGuard,
) -> Result<TocNode, LoadError> {
    let mut guard = guard.snapshot();
    guard.push(file.clone()).map_err(|diagnostic| {
        collaborators.error_sink.report(DiagnosticEntry {
            diagnostic: diagnostic.clone(),
            source: SourceLocation::new(file.clone(), 0, 0),
        });
        LoadError::Circular(diagnostic)
    })?;

    let parsed = collaborators.parser.parse(file, collaborators.error_sink)?;

    let TocNode {
        name,
        href,
        toc_href,
        topic_href,
        uid,
        homepage,
        document,
        monikers,
        items: input_items,
        children,
        source,
    } = parsed;

    let resolved_items = load_toc_nodes(
        input_items,
        file,
        root_file,
        collaborators,
        &guard,
        referenced_files,
        referenced_tocs,
    );

    guard.pop();
    let resolved_items = resolved_items?;

    if file == root_file {
        collaborators
            .content_validator
            .validate_toc_entry_duplicated(file, referenced_files);
    }

    Ok(TocNode {
        name,
        href,
        toc_href,
        topic_href,
        uid,
        homepage,
        document,
        monikers,
        items: resolved_items,
        children,
        source,
    })
}
