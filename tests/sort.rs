//! Sort ADT integration tests: insertion sort runs end to end with the
//! no-op pacer, observed through the returned trace and the cell marks.

use std::sync::Arc;

use test_case::test_case;

use stepvis::{insertion_sort, Action, Attribute, CodeCursor, CompareState, Pacer, SortAdt};

fn adt(values: &[i64]) -> SortAdt<i64> {
    SortAdt::new(values.to_vec(), Arc::new(Pacer::instant()), CodeCursor::new())
}

#[test_case(&[5, 3, 4, 1, 2], &[1, 2, 3, 4, 5]; "spec scenario")]
#[test_case(&[2, 1], &[1, 2]; "pair")]
#[test_case(&[1, 2, 3], &[1, 2, 3]; "already sorted")]
#[test_case(&[3, 3, 1, 3], &[1, 3, 3, 3]; "duplicates")]
#[test_case(&[9, 8, 7, 6, 5], &[5, 6, 7, 8, 9]; "reversed")]
#[tokio::test]
async fn insertion_sort_orders_the_array(input: &[i64], expected: &[i64]) {
    let mut adt = adt(input);
    let run = insertion_sort(&mut adt).await;

    assert_eq!(adt.values(), expected);
    for &(from, to) in &run.moves {
        assert!(to < from, "move ({from}, {to}) went rightward");
    }
}

#[tokio::test]
async fn finished_run_leaves_no_display_residue() {
    let mut adt = adt(&[5, 3, 4, 1, 2]);
    let _ = insertion_sort(&mut adt).await;

    for index in 0..adt.len() {
        let cell = adt.cell(index);
        assert_eq!(cell.action, Action::None);
        assert_eq!(cell.state, CompareState::None);
        assert_eq!(cell.attribute, Attribute::None);
    }
    assert!(adt.actives().is_empty());
}

#[tokio::test]
async fn trace_counts_every_comparison() {
    let mut adt = adt(&[3, 2, 1]);
    let run = insertion_sort(&mut adt).await;

    // i = 1 compares once and moves; i = 2 finds its slot at j = 0.
    assert_eq!(run.comparisons, 2);
    assert_eq!(run.moves, vec![(1, 0), (2, 0)]);
}

#[tokio::test]
async fn cursor_is_driven_through_the_block() {
    let mut adt = adt(&[2, 1]);
    let _ = insertion_sort(&mut adt).await;

    let pos = adt.cursor().position().expect("cursor is lit");
    assert_eq!(pos.block, stepvis::INSERTION_SORT_BLOCK);
}

#[tokio::test]
async fn version_advances_across_a_run() {
    let mut adt = adt(&[4, 2, 3, 1]);
    let before = adt.core().version();
    let _ = insertion_sort(&mut adt).await;
    assert!(adt.core().version() > before);
}
