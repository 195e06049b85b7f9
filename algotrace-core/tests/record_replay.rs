//! Integration tests for the record-once / replay-many contract.
//!
//! These exercise the full flow a consumer sees: run an algorithm, then
//! iterate, verify, replay, and summarize the captured trace without ever
//! re-running the algorithm.

use algotrace_core::{
    ActionKind, BubbleSort, ReplayEngine, SelectionSort, SortAction, SortRun, SortStrategy, Trace,
    TraceVerifier, Value,
};

fn record<S, T>(strategy: S, input: &[T]) -> algotrace_core::CompletedSort<S, T>
where
    S: SortStrategy<T>,
    T: Value,
{
    SortRun::new(strategy, input)
        .expect("non-empty input")
        .run()
        .expect("run succeeds")
}

#[test]
fn replaying_swaps_reproduces_the_sorted_buffer() {
    let inputs: Vec<Vec<i64>> = vec![
        vec![1],
        vec![2, 1],
        vec![5, 4, 3, 2, 1],
        vec![1, 2, 3, 4, 5],
        vec![3, 7, 1, 9, 2, 8, 5, 6, 4],
        vec![2, 2, 1, 3, 1],
    ];

    for input in inputs {
        let completed = record(BubbleSort, &input);
        let outcome = ReplayEngine::new()
            .replay(completed.trace(), &input)
            .expect("trace replays");

        let mut expected = input.clone();
        expected.sort();
        assert_eq!(outcome.buffer, expected, "input {:?}", input);
    }
}

#[test]
fn event_ids_are_exactly_one_through_len() {
    let completed = record(BubbleSort, &[9i64, 7, 5, 3, 1, 2, 4, 6, 8]);
    let trace = completed.trace();

    let ids: Vec<u64> = trace.iter().map(|e| e.id).collect();
    let expected: Vec<u64> = (1..=trace.len() as u64).collect();
    assert_eq!(ids, expected);
}

#[test]
fn every_swap_is_an_exchange_at_exactly_two_positions() {
    let completed = record(BubbleSort, &[4i64, 3, 2, 1]);

    for event in completed.trace() {
        if let SortAction::Swap {
            indices,
            before,
            after,
            ..
        } = &event.action
        {
            let differing: Vec<usize> = (0..before.len())
                .filter(|&i| before[i] != after[i])
                .collect();
            assert_eq!(differing, vec![indices.first, indices.second]);
            assert_eq!(after[indices.first], before[indices.second]);
            assert_eq!(after[indices.second], before[indices.first]);
        }
    }
}

#[test]
fn summary_totals_equal_trace_counts() {
    for input in [vec![5i64, 4, 3, 2, 1], vec![1i64, 3, 2], vec![8i64]] {
        let completed = record(BubbleSort, &input);
        let summary = completed.summary();
        let trace = completed.trace();

        assert_eq!(
            summary.total_comparisons,
            trace.count_kind(ActionKind::Compare) as u64
        );
        assert_eq!(summary.total_swaps, trace.count_kind(ActionKind::Swap) as u64);
    }
}

#[test]
fn sorted_input_has_presortedness_one() {
    let summary = record(BubbleSort, &[1i64, 2, 3, 4, 5]).summary();
    assert_eq!(summary.presortedness, 1.0);
    assert_eq!(summary.total_swaps, 0);
}

#[test]
fn reversed_input_matches_the_reference_counts() {
    let completed = record(BubbleSort, &[5i64, 4, 3, 2, 1]);
    let summary = completed.summary();

    // Only index 2 (value 3) already sits in its final slot
    assert_eq!(summary.presortedness, 0.2);
    // 4 + 3 + 2 + 1 comparisons, each one out of order
    assert_eq!(summary.total_comparisons, 10);
    assert_eq!(summary.total_swaps, 10);
    // Pass-scoped iterations: n - 1 completed outer passes
    assert_eq!(summary.total_iterations, 4);
}

#[test]
fn short_sorted_input_compares_without_swapping() {
    let completed = record(BubbleSort, &[1i64, 2, 3]);
    assert_eq!(completed.trace().count_kind(ActionKind::Compare), 3);
    assert_eq!(completed.trace().count_kind(ActionKind::Swap), 0);
}

#[test]
fn reset_and_rerun_records_the_identical_trace() {
    let input = vec![6i64, 2, 5, 1, 4, 3];

    let first = record(BubbleSort, &input);
    let first_digest = first.trace().digest();

    let rerun = first.reset().run().expect("rerun succeeds");
    let fresh = record(BubbleSort, &input);

    assert_eq!(rerun.trace().digest(), first_digest);

    let diff = ReplayEngine::new().diff(rerun.trace(), fresh.trace());
    assert!(diff.identical);
    assert!(diff.summary.divergence_point.is_none());
}

#[test]
fn traces_survive_a_serialization_boundary() {
    let input = vec![3i64, 1, 4, 1, 5];
    let completed = record(BubbleSort, &input);

    let jsonl = completed.trace().to_jsonl().expect("export succeeds");
    let imported: Trace<i64> =
        Trace::from_jsonl(completed.algorithm(), &jsonl).expect("import succeeds");

    assert!(imported.is_sealed());
    assert_eq!(imported.digest(), completed.trace().digest());
    assert!(TraceVerifier::verify(&imported).is_valid);

    let outcome = ReplayEngine::new()
        .replay(&imported, &input)
        .expect("imported trace replays");
    assert_eq!(outcome.buffer, completed.sorted());
}

#[test]
fn selection_sort_uses_the_full_vocabulary() {
    let input = vec![5i64, 3, 4, 1, 2];
    let completed = record(SelectionSort, &input);
    let trace = completed.trace();

    assert!(trace.count_kind(ActionKind::Highlight) > 0);
    assert!(trace.count_kind(ActionKind::Compare) > 0);
    assert!(trace.count_kind(ActionKind::Swap) <= input.len() - 1);

    let outcome = ReplayEngine::new()
        .replay(trace, &input)
        .expect("trace replays");
    assert_eq!(outcome.buffer, &[1, 2, 3, 4, 5]);
}

#[test]
fn every_recorded_trace_passes_verification() {
    let inputs: Vec<Vec<i64>> = vec![
        vec![1],
        vec![2, 1, 3],
        vec![5, 4, 3, 2, 1],
        vec![1, 1, 1, 1],
    ];

    for input in inputs {
        let bubble = record(BubbleSort, &input);
        assert!(TraceVerifier::verify(bubble.trace()).is_valid);

        let selection = record(SelectionSort, &input);
        assert!(TraceVerifier::verify(selection.trace()).is_valid);
    }
}
