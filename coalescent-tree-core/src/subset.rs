use crate::metadata::RawMetadata;
use crate::CoalescentTreeError;
use tskit::{IndividualId, MutationId, NodeId, SiteId, TableCollection, TableSortOptions};
use tskit::{IndividualTableRow, NodeTableRow};

/// Options for [`subset_nodes`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RetainOptions {
    /// Carry sites and mutations over to the output tables.
    pub keep_mutations: bool,
}

impl Default for RetainOptions {
    fn default() -> Self {
        Self {
            keep_mutations: true,
        }
    }
}

impl RetainOptions {
    /// Discard all sites and mutations.
    pub fn drop_mutations(mut self) -> Self {
        self.keep_mutations = false;
        self
    }
}

// Maps an input id onto the output id space.
// Ids that were not retained map to NULL.
fn remap(map: &[NodeId], u: NodeId) -> Result<NodeId, CoalescentTreeError> {
    if u == NodeId::NULL {
        return Ok(NodeId::NULL);
    }
    let index = usize::try_from(u)?;
    Ok(map.get(index).copied().unwrap_or(NodeId::NULL))
}

/// Restrict a table collection to a subset of its nodes.
///
/// The output node table contains the rows of `retained`, in the
/// order given, so that `retained[i]` becomes node `i`.  All other
/// tables are relabeled to the new id space:
///
/// * edges are kept only if both parent and child are retained,
/// * mutations are kept only if their node is retained, and a
///   mutation whose parent mutation was removed gets a null parent,
/// * sites with no retained mutation are removed,
/// * individuals are kept if a retained node refers to them, in the
///   order they are first referred to, and a parent individual that
///   was removed becomes null,
/// * populations are copied unchanged.
///
/// Migrations and provenances are not copied.
///
/// The returned tables are sorted but not indexed.
///
/// # Parameters
///
/// * `tables`: the input tables, which are not modified.
/// * `retained`: the nodes to keep.
/// * `options`: see [`RetainOptions`].
///
/// # Errors
///
/// * [`CoalescentTreeError::InvalidNode`] if an id in `retained` is
///   out of range or listed twice.
/// * [`CoalescentTreeError::TskitError`] if adding rows or sorting fails.
pub fn subset_nodes(
    tables: &TableCollection,
    retained: &[NodeId],
    options: RetainOptions,
) -> Result<TableCollection, CoalescentTreeError> {
    let nodes: Vec<_> = tables.nodes().iter().collect();
    let mut node_map = vec![NodeId::NULL; nodes.len()];

    let mut rv = TableCollection::new(tables.sequence_length())?;

    for pop in tables.populations().iter() {
        match pop.metadata {
            Some(md) => rv.add_population_with_metadata(&RawMetadata(md))?,
            None => rv.add_population()?,
        };
    }

    let mut rows: Vec<&NodeTableRow> = Vec::with_capacity(retained.len());
    let mut seen = vec![false; nodes.len()];
    for &u in retained {
        let index = usize::try_from(u).ok();
        match index.and_then(|i| nodes.get(i).map(|row| (i, row))) {
            Some((i, row)) if !seen[i] => {
                seen[i] = true;
                rows.push(row);
            }
            _ => return Err(CoalescentTreeError::InvalidNode { node: u }),
        }
    }

    let individual_map = copy_individuals(tables, &rows, &mut rv)?;

    for row in rows {
        let individual = remap_individual(&individual_map, row.individual)?;
        node_map[usize::try_from(row.id)?] = match &row.metadata {
            Some(md) => rv.add_node_with_metadata(
                row.flags,
                row.time,
                row.population,
                individual,
                &RawMetadata(md.clone()),
            )?,
            None => rv.add_node(row.flags, row.time, row.population, individual)?,
        };
    }

    for edge in tables.edges().iter() {
        let parent = remap(&node_map, edge.parent)?;
        let child = remap(&node_map, edge.child)?;
        if parent == NodeId::NULL || child == NodeId::NULL {
            continue;
        }
        match edge.metadata {
            Some(md) => {
                rv.add_edge_with_metadata(edge.left, edge.right, parent, child, &RawMetadata(md))?
            }
            None => rv.add_edge(edge.left, edge.right, parent, child)?,
        };
    }

    if options.keep_mutations {
        copy_mutations(tables, &node_map, &mut rv)?;
    }

    rv.full_sort(TableSortOptions::default())?;
    Ok(rv)
}

fn remap_individual(
    map: &[IndividualId],
    i: IndividualId,
) -> Result<IndividualId, CoalescentTreeError> {
    if i == IndividualId::NULL {
        return Ok(IndividualId::NULL);
    }
    let index = usize::try_from(i)?;
    Ok(map.get(index).copied().unwrap_or(IndividualId::NULL))
}

// Individuals referred to by `rows`, numbered by first reference.
fn copy_individuals(
    tables: &TableCollection,
    rows: &[&NodeTableRow],
    rv: &mut TableCollection,
) -> Result<Vec<IndividualId>, CoalescentTreeError> {
    let individuals: Vec<IndividualTableRow> = tables.individuals().iter().collect();
    let mut individual_map = vec![IndividualId::NULL; individuals.len()];
    let mut order = vec![];
    for row in rows {
        if row.individual == IndividualId::NULL {
            continue;
        }
        let index = usize::try_from(row.individual)?;
        match individual_map.get(index) {
            Some(&i) if i == IndividualId::NULL => {
                let id = i32::try_from(order.len())
                    .map_err(|_| CoalescentTreeError::IdOverflow(order.len()))?;
                individual_map[index] = IndividualId::from(id);
                order.push(index);
            }
            Some(_) => (),
            None => {
                return Err(CoalescentTreeError::MalformedInput {
                    node: usize::try_from(row.id)?,
                    reason: format!("individual {} out of range", row.individual),
                })
            }
        }
    }

    for index in order {
        let ind = &individuals[index];
        let location = ind.location.as_deref().unwrap_or(&[]);
        let parents = ind
            .parents
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|&p| remap_individual(&individual_map, p))
            .collect::<Result<Vec<_>, _>>()?;
        match &ind.metadata {
            Some(md) => rv.add_individual_with_metadata(
                ind.flags,
                location,
                parents.as_slice(),
                &RawMetadata(md.clone()),
            )?,
            None => rv.add_individual(ind.flags, location, parents.as_slice())?,
        };
    }
    Ok(individual_map)
}

fn copy_mutations(
    tables: &TableCollection,
    node_map: &[NodeId],
    rv: &mut TableCollection,
) -> Result<(), CoalescentTreeError> {
    let sites: Vec<_> = tables.sites().iter().collect();
    let mutations: Vec<_> = tables.mutations().iter().collect();

    let mut mutation_nodes = Vec::with_capacity(mutations.len());
    let mut site_referenced = vec![false; sites.len()];
    for m in &mutations {
        let node = remap(node_map, m.node)?;
        if node != NodeId::NULL {
            site_referenced[usize::try_from(m.site)?] = true;
        }
        mutation_nodes.push(node);
    }

    let mut site_map = vec![SiteId::NULL; sites.len()];
    for (site, keep) in sites.iter().zip(site_referenced) {
        if !keep {
            continue;
        }
        let ancestral_state = site.ancestral_state.as_deref();
        site_map[usize::try_from(site.id)?] = match &site.metadata {
            Some(md) => rv.add_site_with_metadata(
                site.position,
                ancestral_state,
                &RawMetadata(md.clone()),
            )?,
            None => rv.add_site(site.position, ancestral_state)?,
        };
    }

    let mut mutation_map = vec![MutationId::NULL; mutations.len()];
    for (m, node) in mutations.iter().zip(mutation_nodes) {
        if node == NodeId::NULL {
            continue;
        }
        let parent = if m.parent == MutationId::NULL {
            MutationId::NULL
        } else {
            mutation_map
                .get(usize::try_from(m.parent)?)
                .copied()
                .unwrap_or(MutationId::NULL)
        };
        let site = site_map[usize::try_from(m.site)?];
        let derived_state = m.derived_state.as_deref();
        mutation_map[usize::try_from(m.id)?] = match &m.metadata {
            Some(md) => rv.add_mutation_with_metadata(
                site,
                node,
                parent,
                m.time,
                derived_state,
                &RawMetadata(md.clone()),
            )?,
            None => rv.add_mutation(site, node, parent, m.time, derived_state)?,
        };
    }
    Ok(())
}
