//! Tests for the split algorithm: conservation laws, orientation, feasibility

use rstest::rstest;

use simpson_tree::{split_pair, DomainError, SiblingPair, Side, SplitParameters, TOLERANCE};

fn pair(th: f64, tw: f64, ch: f64, cw: f64) -> SiblingPair {
    SiblingPair::from_parts(th, tw, ch, cw).expect("valid pair")
}

fn nearly(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

// ============================================================
// Conservation Laws
// ============================================================

#[rstest]
#[case::balanced(pair(0.6, 0.5, 0.4, 0.5), SplitParameters::default())]
#[case::skewed_widths(pair(0.8, 0.1, 0.7, 0.4), SplitParameters::default())]
#[case::low_rates(pair(0.2, 0.4, 0.1, 0.1), SplitParameters::default())]
#[case::wide_parameters(pair(0.6, 0.5, 0.4, 0.5), SplitParameters::new(0.1, 0.9, 0.2, 0.8).unwrap())]
#[case::narrow_parameters(pair(0.5, 0.3, 0.3, 0.7), SplitParameters::new(0.49, 0.51, 0.49, 0.51).unwrap())]
fn given_valid_pair_when_splitting_then_width_and_area_conserved(
    #[case] parent: SiblingPair,
    #[case] params: SplitParameters,
) {
    let children = split_pair(parent, params).expect("feasible split");
    let (left, right) = (children.left, children.right);

    // Widths of each parent's children sum to the parent's width.
    assert!(nearly(
        left.treatment().width() + right.treatment().width(),
        parent.treatment().width()
    ));
    assert!(nearly(
        left.control().width() + right.control().width(),
        parent.control().width()
    ));

    // Areas likewise.
    assert!(nearly(
        left.treatment().area() + right.treatment().area(),
        parent.treatment().area()
    ));
    assert!(nearly(
        left.control().area() + right.control().area(),
        parent.control().area()
    ));
}

#[rstest]
#[case(pair(0.6, 0.5, 0.4, 0.5))]
#[case(pair(0.9, 0.2, 0.15, 0.8))]
fn given_split_when_merging_children_then_parents_reconstructed(#[case] parent: SiblingPair) {
    let children = split_pair(parent, SplitParameters::default()).expect("feasible split");

    let t = simpson_tree::Column::merge(children.left.treatment(), children.right.treatment());
    let c = simpson_tree::Column::merge(children.left.control(), children.right.control());

    assert!(t.approx_eq(&parent.treatment()));
    assert!(c.approx_eq(&parent.control()));
}

// ============================================================
// Known Values
// ============================================================

#[test]
fn given_classic_root_when_splitting_then_exact_children() {
    // (0.6, 0.5) vs (0.4, 0.5) with the default 9/20, 11/20 parameters:
    // z_t = 0.7 and z_s = 0.3 by hand.
    let children = split_pair(pair(0.6, 0.5, 0.4, 0.5), SplitParameters::default()).unwrap();

    let (th, tw, ch, cw) = children.left.as_tuple();
    assert!(nearly(th, 0.78) && nearly(tw, 0.35));
    assert!(nearly(ch, 0.82) && nearly(cw, 0.15));

    let (th, tw, ch, cw) = children.right.as_tuple();
    assert!(nearly(th, 0.18) && nearly(tw, 0.15));
    assert!(nearly(ch, 0.22) && nearly(cw, 0.35));
}

#[test]
fn given_identical_inputs_when_splitting_twice_then_identical_outputs() {
    let parent = pair(0.37, 0.21, 0.33, 0.79);
    let params = SplitParameters::new(0.2, 0.6, 0.3, 0.7).unwrap();
    assert_eq!(
        split_pair(parent, params).unwrap(),
        split_pair(parent, params).unwrap()
    );
}

// ============================================================
// Orientation
// ============================================================

#[test]
fn given_taller_control_when_splitting_then_same_result_with_swapped_labels() {
    let parent = pair(0.6, 0.5, 0.4, 0.5);
    let forward = split_pair(parent, SplitParameters::default()).unwrap();
    let reversed = split_pair(parent.swapped(), SplitParameters::default()).unwrap();

    assert_eq!(forward.taller, Side::Treatment);
    assert_eq!(reversed.taller, Side::Control);
    assert_eq!(reversed.left, forward.left.swapped());
    assert_eq!(reversed.right, forward.right.swapped());
}

#[test]
fn given_equal_heights_when_splitting_then_treatment_treated_as_taller() {
    let children = split_pair(pair(0.5, 0.5, 0.5, 0.5), SplitParameters::default()).unwrap();
    assert_eq!(children.taller, Side::Treatment);
}

// ============================================================
// Reversal Scenario (drug trial)
// ============================================================

#[test]
fn given_men_and_women_pairs_when_merged_then_overall_ordering_flips() {
    // Treatment beats control among men and among women, yet loses overall.
    let men = pair(0.8, 0.1, 0.7, 0.4);
    let women = pair(0.2, 0.4, 0.1, 0.1);

    let t = simpson_tree::Column::merge(men.treatment(), women.treatment());
    let c = simpson_tree::Column::merge(men.control(), women.control());

    assert!(men.treatment().height() > men.control().height());
    assert!(women.treatment().height() > women.control().height());
    assert!(nearly(t.height(), 0.32) && nearly(t.width(), 0.5));
    assert!(nearly(c.height(), 0.58) && nearly(c.width(), 0.5));
    assert!(t.height() < c.height());
}

// ============================================================
// Infeasibility
// ============================================================

#[test]
fn given_full_height_column_when_splitting_then_infeasible_not_clamped() {
    // height 1.0 is a valid column but drives the tall break fraction to
    // exactly 1, so the right child would have zero width.
    let result = split_pair(pair(1.0, 0.5, 0.4, 0.5), SplitParameters::default());
    match result {
        Err(DomainError::InfeasibleSplit { side, z }) => {
            assert_eq!(side, "tall");
            assert!((z - 1.0).abs() < 1e-12);
        }
        other => panic!("expected InfeasibleSplit, got {other:?}"),
    }
}

#[test]
fn given_both_columns_full_height_then_infeasible() {
    let result = split_pair(pair(1.0, 0.5, 1.0, 0.5), SplitParameters::default());
    assert!(matches!(result, Err(DomainError::InfeasibleSplit { .. })));
}

// ============================================================
// Parameter Validation
// ============================================================

#[rstest]
#[case(0.0, 0.5, 0.45, 0.55)]
#[case(0.45, 0.55, 0.45, 1.0)]
#[case(0.55, 0.45, 0.45, 0.55)]
#[case(0.45, 0.55, 0.55, 0.45)]
#[case(0.5, 0.5, 0.45, 0.55)]
fn given_invalid_parameters_when_constructing_then_rejected(
    #[case] a: f64,
    #[case] b: f64,
    #[case] c: f64,
    #[case] d: f64,
) {
    assert!(matches!(
        SplitParameters::new(a, b, c, d),
        Err(DomainError::InvalidParameters { .. })
    ));
}
