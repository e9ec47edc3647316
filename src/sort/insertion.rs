//! Insertion sort
//!
//! The canonical sort realization of the animated ADT contract,
//! expressed as "find the first larger element, insert before it"
//! rather than adjacent-swap shifting: for each index `i` from 1
//! upward, scan `j` across the sorted prefix and move `i` before the
//! first `j` that compares greater.

use std::cmp::Ordering;

use crate::pseudocode::CodeCursor;

use super::SortAdt;

/// Block name for [`insertion_sort`].
pub const INSERTION_SORT_BLOCK: &str = "insertion-sort";

const INSERTION_SORT_PSEUDO: &str = "
insertionSort(A):
  for i ∈ (0, A.size):
    for j ∈ [0, i):
      if A[i] ≺ A[j]:
        move(i, j)
        break
";

pub(crate) fn register_blocks(cursor: &CodeCursor) {
    cursor.register(INSERTION_SORT_BLOCK, INSERTION_SORT_PSEUDO);
}

/// Trace of one completed sort run, for inspection and replay.
#[derive(Debug, Clone, Default)]
pub struct SortRun {
    /// Every relocation, as `(from, to)` position pairs in call order.
    /// Insertion sort only ever moves an element leftward.
    pub moves: Vec<(usize, usize)>,

    /// Number of element comparisons performed.
    pub comparisons: usize,
}

/// Animated insertion sort over `adt`, driving the `insertion-sort`
/// pseudocode block. Leaves the array sorted ascending in the ADT's
/// comparator and all display state reset.
pub async fn insertion_sort<T: Clone>(adt: &mut SortAdt<T>) -> SortRun {
    let mut run = SortRun::default();

    adt.cursor().enter(INSERTION_SORT_BLOCK);
    adt.cursor().run_at(1);
    for i in 1..adt.len() {
        adt.partition(i);
        adt.cursor().run_at(2);
        for j in 0..i {
            adt.cursor().run_at(3);
            run.comparisons += 1;
            if adt.compare(i, j).await == Ordering::Less {
                adt.cursor().run_at(4);
                adt.move_before(i, j).await;
                run.moves.push((i, j));
                break;
            }
        }
    }
    adt.reset();

    run
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pacing::Pacer;

    async fn sorted(values: &[i64]) -> (Vec<i64>, SortRun) {
        let mut adt = SortAdt::new(
            values.to_vec(),
            Arc::new(Pacer::instant()),
            CodeCursor::new(),
        );
        let run = insertion_sort(&mut adt).await;
        (adt.values(), run)
    }

    #[tokio::test]
    async fn test_insertion_sort_scenario() {
        let (values, run) = sorted(&[5, 3, 4, 1, 2]).await;
        assert_eq!(values, vec![1, 2, 3, 4, 5]);

        // Elements only ever move leftward.
        for &(from, to) in &run.moves {
            assert!(to < from, "move ({from}, {to}) went rightward");
        }
        assert!(run.comparisons > 0);
    }

    #[tokio::test]
    async fn test_sorted_input_never_moves() {
        let (values, run) = sorted(&[1, 2, 3, 4]).await;
        assert_eq!(values, vec![1, 2, 3, 4]);
        assert!(run.moves.is_empty());
    }

    #[tokio::test]
    async fn test_single_element_and_empty() {
        let (values, run) = sorted(&[7]).await;
        assert_eq!(values, vec![7]);
        assert_eq!(run.comparisons, 0);

        let (values, _) = sorted(&[]).await;
        assert!(values.is_empty());
    }
}
