use toc_model::TocNode;

/// Grafts `reference_items` into `top_level` at the nodes whose `children`
/// glob patterns accept them (§4.8).
///
/// Walks `top_level` in pre-order; for each node, each of its patterns
/// (in declaration order) claims every still-unclaimed reference item whose
/// `name` matches, appending it to that node's `items`. An item is therefore
/// grafted under the first node (in pre-order) whose pattern accepts it —
/// first-match-wins across the whole tree, not just within one node's
/// pattern list.
///
/// Grafted items are themselves walked afterward (the recursion descends
/// into `node.items` after appending to it), so a grafted item's own
/// `children` patterns can claim further pool items as its grandchildren.
/// This cascading behavior is preserved deliberately — see `DESIGN.md`.
///
/// Malformed glob patterns are skipped; they claim nothing.
pub fn merge(mut top_level: TocNode, reference_items: Vec<TocNode>) -> TocNode {
    let mut pool: Vec<Option<TocNode>> = reference_items.into_iter().map(Some).collect();
    visit(&mut top_level, &mut pool);
    top_level
}

fn visit(node: &mut TocNode, pool: &mut [Option<TocNode>]) {
    let patterns = node.children.clone();
    for pattern in &patterns {
        let Ok(glob_pattern) = glob::Pattern::new(pattern) else {
            continue;
        };
        for slot in pool.iter_mut() {
            let matched = slot.as_ref().is_some_and(|item| glob_pattern.matches(&item.name));
            if matched {
                node.items.push(slot.take().expect("just checked is_some"));
            }
        }
    }

    let mut idx = 0;
    while idx < node.items.len() {
        visit(&mut node.items[idx], pool);
        idx += 1;
    }
}
