#![allow(dead_code)]

use coalescent_tree::metadata::SlimNodeMetadata;
use coalescent_tree::NodeFlags;
use tskit::{
    IndividualId, PopulationId, TableCollection, TableSortOptions, TreeSequence,
    TreeSequenceFlags,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn add_genome(tables: &mut TableCollection, time: f64, sample: bool, id: i64, is_null: bool) {
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
            IndividualId::NULL,
            &SlimNodeMetadata::new(id, is_null),
        )
        .unwrap();
}

fn finish(mut tables: TableCollection) -> TreeSequence {
    tables.full_sort(TableSortOptions::default()).unwrap();
    tables
        .tree_sequence(TreeSequenceFlags::BUILD_INDEXES)
        .unwrap()
}

/// `num_samples` haploids on a caterpillar tree over [0, 1000),
/// each followed by its placeholder genome when `with_null` is set.
pub fn caterpillar(num_samples: usize, with_null: bool) -> TreeSequence {
    let mut tables = TableCollection::new(1000.0).unwrap();
    let stride = if with_null { 2 } else { 1 };
    let mut id = 0;
    for _ in 0..num_samples {
        add_genome(&mut tables, 0.0, true, id, false);
        id += 1;
        if with_null {
            add_genome(&mut tables, 0.0, true, id, true);
            id += 1;
        }
    }
    for i in 1..num_samples {
        add_genome(&mut tables, i as f64, false, id, false);
        id += 1;
        if with_null {
            add_genome(&mut tables, i as f64, false, id, true);
            id += 1;
        }
    }
    // ancestor i (1-based) joins sample i with ancestor i - 1, or sample 0
    let ancestor = |i: usize| ((num_samples + i - 1) * stride) as i32;
    for i in 1..num_samples {
        let left_child = if i == 1 { 0 } else { ancestor(i - 1) };
        let right_child = (i * stride) as i32;
        tables
            .add_edge(0.0, 1000.0, ancestor(i), left_child)
            .unwrap();
        tables
            .add_edge(0.0, 1000.0, ancestor(i), right_child)
            .unwrap();
    }
    finish(tables)
}

/// Three samples where sample 2 only joins the others over [0, 400).
pub fn partly_coalesced() -> TreeSequence {
    let mut tables = TableCollection::new(1000.0).unwrap();
    for i in 0..3 {
        add_genome(&mut tables, 0.0, true, i, false);
    }
    add_genome(&mut tables, 1.0, false, 3, false);
    add_genome(&mut tables, 2.0, false, 4, false);
    tables.add_edge(0.0, 1000.0, 3, 0).unwrap();
    tables.add_edge(0.0, 1000.0, 3, 1).unwrap();
    tables.add_edge(0.0, 400.0, 4, 3).unwrap();
    tables.add_edge(0.0, 400.0, 4, 2).unwrap();
    finish(tables)
}

pub fn num_nodes(ts: &TreeSequence) -> usize {
    ts.dump_tables().unwrap().nodes().iter().count()
}

pub fn num_mutations(ts: &TreeSequence) -> usize {
    ts.dump_tables().unwrap().mutations().iter().count()
}

/// Everything needed to tell two outputs apart.
#[derive(Debug, PartialEq)]
pub struct Snapshot {
    nodes: Vec<(u64, Option<Vec<u8>>)>,
    edges: Vec<(u64, u64, usize, usize)>,
    sites: Vec<u64>,
    mutations: Vec<(usize, usize, u64)>,
}

pub fn snapshot(ts: &TreeSequence) -> Snapshot {
    let tables = ts.dump_tables().unwrap();
    Snapshot {
        nodes: tables
            .nodes()
            .iter()
            .map(|n| (f64::from(n.time).to_bits(), n.metadata))
            .collect(),
        edges: tables
            .edges()
            .iter()
            .map(|e| {
                (
                    f64::from(e.left).to_bits(),
                    f64::from(e.right).to_bits(),
                    usize::try_from(e.parent).unwrap(),
                    usize::try_from(e.child).unwrap(),
                )
            })
            .collect(),
        sites: tables
            .sites()
            .iter()
            .map(|s| f64::from(s.position).to_bits())
            .collect(),
        mutations: tables
            .mutations()
            .iter()
            .map(|m| {
                (
                    usize::try_from(m.site).unwrap(),
                    usize::try_from(m.node).unwrap(),
                    f64::from(m.time).to_bits(),
                )
            })
            .collect(),
    }
}
