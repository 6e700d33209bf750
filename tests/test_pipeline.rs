mod common;

use coalescent_tree::prelude::*;
use coalescent_tree::{dump, first_uncoalesced_interval, validate_coalescence};
use common::*;
use proptest::prelude::*;

#[test]
fn test_default_only_filters() {
    init_logger();
    let ts = caterpillar(5, true);
    assert_eq!(num_nodes(&ts), 18);
    let out = handle_haploid(ts, &HaploidConfig::new()).unwrap();
    assert_eq!(num_nodes(&out), 9);
    assert_eq!(out.sample_nodes().len(), 5);
    assert_eq!(num_mutations(&out), 0);
}

#[test]
fn test_end_to_end_zero_rate_two_samples() {
    init_logger();
    let ts = caterpillar(4, false);
    let config = HaploidConfig::new()
        .with_mutation_rate(0.0)
        .with_mutation_seed(1)
        .with_sample_size(2)
        .with_sampling_seed(2);
    let out = handle_haploid(ts, &config).unwrap();
    assert_eq!(out.sample_nodes().len(), 2);
    assert_eq!(num_mutations(&out), 0);
    assert_eq!(first_uncoalesced_interval(&out).unwrap(), None);
    assert!(validate_coalescence(out).is_ok());
}

#[test]
fn test_not_coalesced_with_check() {
    init_logger();
    let config = HaploidConfig::new().check_coalescence();
    match handle_haploid(partly_coalesced(), &config) {
        Err(CoalescentTreeError::NotCoalesced {
            left,
            right,
            num_roots,
        }) => {
            assert_eq!((left, right, num_roots), (400.0, 1000.0, 2));
        }
        _ => panic!(),
    }
}

#[test]
fn test_not_coalesced_with_mutations() {
    let config = HaploidConfig::new().with_mutation_rate(0.0);
    assert!(matches!(
        handle_haploid(partly_coalesced(), &config),
        Err(CoalescentTreeError::NotCoalesced { .. })
    ));
}

#[test]
fn test_sample_size_checked_before_coalescence() {
    let config = HaploidConfig::new()
        .check_coalescence()
        .with_mutation_rate(1e-3)
        .with_sample_size(5);
    match handle_haploid(partly_coalesced(), &config) {
        Err(CoalescentTreeError::InvalidSampleSize {
            requested,
            available,
        }) => assert_eq!((requested, available), (5, 3)),
        _ => panic!(),
    }
}

#[test]
fn test_not_coalesced_without_check_passes() {
    let out = handle_haploid(partly_coalesced(), &HaploidConfig::new()).unwrap();
    assert_eq!(num_nodes(&out), 5);
}

#[test]
fn test_too_many_samples_writes_nothing() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.trees");
    let config = HaploidConfig::new().with_sample_size(5).with_output(&output);
    match handle_haploid(caterpillar(4, true), &config) {
        Err(CoalescentTreeError::InvalidSampleSize {
            requested,
            available,
        }) => {
            assert_eq!(requested, 5);
            assert_eq!(available, 4);
        }
        _ => panic!(),
    }
    assert!(!output.exists());
}

#[test]
fn test_fixed_seeds_are_deterministic() {
    init_logger();
    let config = HaploidConfig::new()
        .with_mutation_rate(5e-3)
        .with_mutation_seed(1234)
        .with_sample_size(6)
        .with_sampling_seed(99);
    let a = handle_haploid(caterpillar(10, true), &config).unwrap();
    let b = handle_haploid(caterpillar(10, true), &config).unwrap();
    assert_eq!(snapshot(&a), snapshot(&b));
    assert!(num_mutations(&a) > 0);
    assert_eq!(a.sample_nodes().len(), 6);
}

#[test]
fn test_file_round_trip() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let names = TreeFileNames::new(dir.path().join("tree_coalesced"));
    dump(&caterpillar(6, true), names.input()).unwrap();

    let config = HaploidConfig::new()
        .with_mutation_rate(1e-3)
        .with_mutation_seed(7)
        .with_output(names.mutated());
    let out = handle_haploid(names.input(), &config).unwrap();
    assert!(names.mutated().exists());

    let reloaded = coalescent_tree::load(names.mutated()).unwrap();
    assert_eq!(snapshot(&reloaded), snapshot(&out));
    assert_eq!(reloaded.sample_nodes().len(), 6);
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let names = TreeFileNames::new(dir.path().join("missing"));
    assert!(matches!(
        handle_haploid(names.input(), &HaploidConfig::new()),
        Err(CoalescentTreeError::TskitError { .. })
    ));
}

#[test]
fn test_spectra_report() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let names = TreeFileNames::new(dir.path().join("run"));
    let ts = handle_haploid(caterpillar(4, true), &HaploidConfig::new()).unwrap();
    dump(&ts, names.input()).unwrap();

    let report = SpectraReport::from_file(&names, None, true).unwrap();
    assert_eq!(report.title, names.name().display().to_string());
    // caterpillar ((((0,1)1,2)2,3)3): lengths by descendant count
    // one sample: 1 + 1 + 2 + 3, two: 1, three: 1, over 1000 units
    assert_eq!(
        report.bfs.as_slice(),
        &[0.0, 7000.0, 1000.0, 1000.0, 0.0]
    );
    assert!(report.sfs.as_slice().iter().all(|&x| x == 0.0));

    let titled = SpectraReport::from_file(&names, Some("caterpillar"), true).unwrap();
    assert_eq!(titled.title, "caterpillar");

    let comparison = report.compare(ComparisonOptions::default()).unwrap();
    assert_eq!(comparison.abscissa, vec![1, 2, 3]);
    assert!(comparison.kingman_error.unwrap() > 0.0);
    assert!(comparison.beta_error.is_none());
}

#[test]
fn test_version() {
    assert_eq!(coalescent_tree::version(), env!("CARGO_PKG_VERSION"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]
    #[test]
    fn test_sampled_output_is_coalesced(
        k in 1..=8_usize,
        seed in 0..u64::MAX,
        rate in 0.0..1e-3_f64,
    ) {
        let config = HaploidConfig::new()
            .with_mutation_rate(rate)
            .with_mutation_seed(seed)
            .with_sample_size(k)
            .with_sampling_seed(seed);
        let out = handle_haploid(caterpillar(8, true), &config).unwrap();
        prop_assert_eq!(out.sample_nodes().len(), k);
        prop_assert!(first_uncoalesced_interval(&out).unwrap().is_none());
    }
}
