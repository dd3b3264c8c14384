//! Tests for count realization: exact totals, labels, consistency

use rstest::rstest;

use simpson_tree::{count_table, FixedPolicy, RealizeError, SiblingPair, SimpsonTree};

fn classic_tree() -> SimpsonTree<FixedPolicy> {
    let root = SiblingPair::from_parts(0.6, 0.5, 0.4, 0.5).expect("valid root");
    SimpsonTree::new(root, FixedPolicy::default())
}

#[rstest]
#[case(0, 100)]
#[case(1, 100)]
#[case(3, 997)]
#[case(5, 12_345)]
fn given_layer_when_realized_then_totals_sum_to_sample_size(
    #[case] depth: usize,
    #[case] n: u64,
) {
    let mut tree = classic_tree();
    let layer = tree.layer(depth).unwrap();
    let rows = count_table(layer, depth, n).unwrap();

    assert_eq!(rows.len(), 1 << depth);
    let total: u64 = rows
        .iter()
        .map(|r| r.treatment_total + r.control_total)
        .sum();
    assert_eq!(total, n, "depth {depth}, n {n}");
}

#[test]
fn given_layer_one_with_round_sample_then_exact_counts() {
    // Layer 1 of the classic scenario has widths 0.35/0.15 (treatment) and
    // 0.15/0.35 (control) at heights 0.78/0.18 and 0.82/0.22.
    let mut tree = classic_tree();
    let layer = tree.layer(1).unwrap();
    let rows = count_table(layer, 1, 100).unwrap();

    assert_eq!(rows[0].label, "0");
    assert_eq!(rows[0].treatment_total, 35);
    assert_eq!(rows[0].treatment_recovered, 27); // 0.78 · 35 = 27.3
    assert_eq!(rows[0].control_total, 15);
    assert_eq!(rows[0].control_recovered, 12); // 0.82 · 15 = 12.3

    assert_eq!(rows[1].label, "1");
    assert_eq!(rows[1].treatment_total, 15);
    assert_eq!(rows[1].treatment_recovered, 3); // 0.18 · 15 = 2.7
    assert_eq!(rows[1].control_total, 35);
    assert_eq!(rows[1].control_recovered, 8); // 0.22 · 35 = 7.7
}

#[test]
fn given_rows_then_recovered_never_exceeds_group_size() {
    let mut tree = classic_tree();
    let layer = tree.layer(4).unwrap();
    for row in count_table(layer, 4, 83).unwrap() {
        assert!(row.treatment_recovered <= row.treatment_total);
        assert!(row.control_recovered <= row.control_total);
        // Not-recovered is the complement, never underflows.
        let _ = row.treatment_not_recovered();
        let _ = row.control_not_recovered();
    }
}

#[test]
fn given_depth_two_then_labels_are_binary_paths() {
    let mut tree = classic_tree();
    let layer = tree.layer(2).unwrap();
    let labels: Vec<String> = count_table(layer, 2, 1000)
        .unwrap()
        .into_iter()
        .map(|r| r.label)
        .collect();
    assert_eq!(labels, vec!["00", "01", "10", "11"]);
}

#[test]
fn given_zero_sample_then_rejected() {
    let mut tree = classic_tree();
    let layer = tree.layer(1).unwrap();
    assert_eq!(
        count_table(layer, 1, 0),
        Err(RealizeError::ZeroSample)
    );
}
