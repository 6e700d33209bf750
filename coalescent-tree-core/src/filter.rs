use crate::metadata::read_is_null;
use crate::subset::{subset_nodes, RetainOptions};
use crate::CoalescentTreeError;
use tskit::{NodeId, TableCollection, TreeSequence, TreeSequenceFlags};

/// Return the ids of all nodes whose metadata is not flagged `is_null`,
/// in table order.
///
/// # Errors
///
/// [`CoalescentTreeError::MalformedInput`] if a node has no metadata
/// or its metadata is too short to hold the flag.
pub fn non_null_nodes(tables: &TableCollection) -> Result<Vec<NodeId>, CoalescentTreeError> {
    let mut rv = vec![];
    for (row, node) in tables.nodes().iter().enumerate() {
        let md = node
            .metadata
            .as_deref()
            .ok_or_else(|| CoalescentTreeError::MalformedInput {
                node: row,
                reason: "no metadata".to_string(),
            })?;
        let is_null = read_is_null(md).map_err(|e| CoalescentTreeError::MalformedInput {
            node: row,
            reason: e.to_string(),
        })?;
        if !is_null {
            rv.push(node.id);
        }
    }
    Ok(rv)
}

/// Remove placeholder genomes from a tree sequence.
///
/// Every node whose SLiM metadata has `is_null` set is dropped and
/// the remaining tables are relabeled with [`subset_nodes`].  Retained
/// nodes keep their relative order.  The input is not modified.
///
/// # Errors
///
/// * [`CoalescentTreeError::MalformedInput`], see [`non_null_nodes`].
/// * [`CoalescentTreeError::TskitError`] if the filtered tables do
///   not form a valid tree sequence.
pub fn filter_null_nodes(ts: &TreeSequence) -> Result<TreeSequence, CoalescentTreeError> {
    let tables = ts.dump_tables()?;
    let retained = non_null_nodes(&tables)?;
    let num_input = tables.nodes().iter().count();
    log::debug!(
        "dropping {} of {} nodes flagged is_null",
        num_input - retained.len(),
        num_input
    );
    let filtered = subset_nodes(&tables, &retained, RetainOptions::default())?;
    Ok(filtered.tree_sequence(TreeSequenceFlags::BUILD_INDEXES)?)
}
