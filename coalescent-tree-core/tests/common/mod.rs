#![allow(dead_code)]

use coalescent_tree_core::metadata::SlimNodeMetadata;
use coalescent_tree_core::NodeFlags;
use tskit::{
    IndividualId, MutationId, NodeId, PopulationId, TableCollection, TableSortOptions,
    TreeSequence, TreeSequenceFlags,
};

pub const SEQUENCE_LENGTH: f64 = 100.0;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn slim_node(
    tables: &mut TableCollection,
    time: f64,
    sample: bool,
    genome_id: i64,
    is_null: bool,
) -> NodeId {
    slim_genome(tables, time, sample, genome_id, is_null, IndividualId::NULL)
}

pub fn slim_genome(
    tables: &mut TableCollection,
    time: f64,
    sample: bool,
    genome_id: i64,
    is_null: bool,
    individual: IndividualId,
) -> NodeId {
    let flags = if sample {
        NodeFlags::IS_SAMPLE
    } else {
        NodeFlags::default()
    };
    tables
        .add_node_with_metadata(
            flags,
            time,
            PopulationId::NULL,
            individual,
            &SlimNodeMetadata::new(genome_id, is_null),
        )
        .unwrap()
}

pub fn finish(mut tables: TableCollection) -> TreeSequence {
    tables.full_sort(TableSortOptions::default()).unwrap();
    tables
        .tree_sequence(TreeSequenceFlags::BUILD_INDEXES)
        .unwrap()
}

/// Four haploid individuals and three ancestors, each with a
/// placeholder second genome.
///
/// Even rows are real genomes, odd rows are null.  Real genomes form
/// ((0,2)8,(4,6)10)12.  A mutation sits on node 0 at position 10
/// and another on the null sample 1 at position 20.
///
/// Nodes `2i` and `2i + 1` belong to individual `i + 1`.  Individual 0
/// has no nodes.  Individual parents follow the real genomes' tree:
/// 1 and 2 descend from 5, 3 and 4 from 6, 5 and 6 from 7.
pub fn haploid_tables() -> TableCollection {
    let mut tables = TableCollection::new(SEQUENCE_LENGTH).unwrap();
    tables.add_individual(0, None, None).unwrap();
    for parent in [5, 5, 6, 6, 7, 7] {
        tables
            .add_individual(0, None, &[IndividualId::from(parent)])
            .unwrap();
    }
    tables.add_individual(0, None, None).unwrap();
    for i in 0..7 {
        let time = [0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0][i as usize];
        let individual = IndividualId::from(i as i32 + 1);
        let sample = time == 0.0;
        slim_genome(&mut tables, time, sample, 2 * i, false, individual);
        slim_genome(&mut tables, time, sample, 2 * i + 1, true, individual);
    }
    for (parent, child) in [(8, 0), (8, 2), (10, 4), (10, 6), (12, 8), (12, 10)] {
        tables
            .add_edge(0.0, SEQUENCE_LENGTH, parent, child)
            .unwrap();
    }
    let site = tables.add_site(10.0, Some(b"A".as_slice())).unwrap();
    tables
        .add_mutation(site, 0, MutationId::NULL, 0.5, Some(b"T".as_slice()))
        .unwrap();
    let site = tables.add_site(20.0, Some(b"A".as_slice())).unwrap();
    tables
        .add_mutation(site, 1, MutationId::NULL, 0.5, Some(b"G".as_slice()))
        .unwrap();
    tables
}

pub fn haploid_ts() -> TreeSequence {
    finish(haploid_tables())
}

/// Four samples, fully coalesced, no placeholder genomes.
pub fn coalesced_ts() -> TreeSequence {
    let mut tables = TableCollection::new(SEQUENCE_LENGTH).unwrap();
    for i in 0..4 {
        slim_node(&mut tables, 0.0, true, i, false);
    }
    slim_node(&mut tables, 1.0, false, 4, false);
    slim_node(&mut tables, 2.0, false, 5, false);
    slim_node(&mut tables, 3.0, false, 6, false);
    for (parent, child) in [(4, 0), (4, 1), (5, 2), (5, 3), (6, 4), (6, 5)] {
        tables
            .add_edge(0.0, SEQUENCE_LENGTH, parent, child)
            .unwrap();
    }
    finish(tables)
}

/// Two trees.  Over [0, 50) all three samples coalesce in node 4,
/// over [50, 100) sample 2 is a separate root.
pub fn two_tree_ts() -> TreeSequence {
    let mut tables = TableCollection::new(SEQUENCE_LENGTH).unwrap();
    for i in 0..3 {
        slim_node(&mut tables, 0.0, true, i, false);
    }
    slim_node(&mut tables, 1.0, false, 3, false);
    slim_node(&mut tables, 2.0, false, 4, false);
    tables.add_edge(0.0, SEQUENCE_LENGTH, 3, 0).unwrap();
    tables.add_edge(0.0, SEQUENCE_LENGTH, 3, 1).unwrap();
    tables.add_edge(0.0, 50.0, 4, 3).unwrap();
    tables.add_edge(0.0, 50.0, 4, 2).unwrap();
    finish(tables)
}

pub fn genome_ids(ts: &TreeSequence) -> Vec<i64> {
    ts.dump_tables()
        .unwrap()
        .nodes()
        .iter()
        .map(|n| {
            SlimNodeMetadata::from_bytes(&n.metadata.unwrap())
                .unwrap()
                .genome_id
        })
        .collect()
}

/// Individual of every node, as a raw id.
pub fn node_individuals(ts: &TreeSequence) -> Vec<i32> {
    ts.dump_tables()
        .unwrap()
        .nodes()
        .iter()
        .map(|n| i32::from(n.individual))
        .collect()
}

/// Parents of every individual, as raw ids.
pub fn individual_parents(ts: &TreeSequence) -> Vec<Vec<i32>> {
    ts.dump_tables()
        .unwrap()
        .individuals()
        .iter()
        .map(|i| {
            i.parents
                .unwrap_or_default()
                .into_iter()
                .map(i32::from)
                .collect()
        })
        .collect()
}

pub fn num_nodes(ts: &TreeSequence) -> usize {
    ts.dump_tables().unwrap().nodes().iter().count()
}

pub fn num_mutations(ts: &TreeSequence) -> usize {
    ts.dump_tables().unwrap().mutations().iter().count()
}

pub fn site_positions(ts: &TreeSequence) -> Vec<f64> {
    ts.dump_tables()
        .unwrap()
        .sites()
        .iter()
        .map(|s| f64::from(s.position))
        .collect()
}

/// (position, node, time) for every mutation, in table order.
pub fn mutation_records(ts: &TreeSequence) -> Vec<(f64, usize, f64)> {
    let tables = ts.dump_tables().unwrap();
    let positions = site_positions(ts);
    tables
        .mutations()
        .iter()
        .map(|m| {
            (
                positions[usize::try_from(m.site).unwrap()],
                usize::try_from(m.node).unwrap(),
                f64::from(m.time),
            )
        })
        .collect()
}
