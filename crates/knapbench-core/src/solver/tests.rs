//! Behavior shared by both solvers.

use proptest::prelude::*;

use super::*;

fn exact(instance: &Instance) -> Solution {
    DynamicProgrammingSolver
        .solve(instance, &SolveBudget::unlimited())
        .unwrap()
}

fn greedy(instance: &Instance) -> Solution {
    GreedySolver
        .solve(instance, &SolveBudget::unlimited())
        .unwrap()
}

/// Optimum by enumerating every subset.
fn brute_force(instance: &Instance) -> u64 {
    let n = instance.len();
    (0u32..1 << n)
        .filter_map(|mask| {
            let (value, weight) = instance
                .items()
                .iter()
                .filter(|item| mask & (1 << item.index) != 0)
                .fold((0u64, 0u64), |(v, w), item| (v + item.value, w + item.weight));
            (weight <= instance.capacity()).then_some(value)
        })
        .max()
        .unwrap_or(0)
}

#[test]
fn test_classic_scenario() {
    let instance = Instance::from_pairs(50, &[(60, 10), (100, 20), (120, 30)]);

    let dp = exact(&instance);
    assert_eq!(dp.value, 220);
    assert_eq!(dp.selected, vec![1, 2]);

    let gr = greedy(&instance);
    assert_eq!(gr.value, 160);
    assert_eq!(gr.selected, vec![0, 1]);
}

#[test]
fn test_capacity_zero() {
    let instance = Instance::from_pairs(0, &[(60, 10), (100, 20), (1, 1)]);
    for solution in [exact(&instance), greedy(&instance)] {
        assert_eq!(solution.value, 0);
        assert!(solution.selected.is_empty());
    }
}

#[test]
fn test_empty_instance() {
    for capacity in [0, 1, 1_000_000, u64::MAX] {
        let instance = Instance::from_pairs(capacity, &[]);
        for solution in [exact(&instance), greedy(&instance)] {
            assert_eq!(solution.value, 0);
            assert!(solution.selected.is_empty());
        }
    }
}

#[test]
fn test_all_items_too_heavy() {
    let instance = Instance::from_pairs(9, &[(5, 10), (8, 12), (100, 50)]);
    for solution in [exact(&instance), greedy(&instance)] {
        assert_eq!(solution.value, 0);
        assert!(solution.selected.is_empty());
    }
}

#[test]
fn test_single_zero_weight_item_at_zero_capacity() {
    let instance = Instance::from_pairs(0, &[(5, 0)]);
    let solution = exact(&instance);
    assert_eq!(solution.value, 5);
    assert_eq!(solution.selected, vec![0]);
}

#[test]
fn test_value_overflow_is_reported() {
    let instance = Instance::from_pairs(2, &[(u64::MAX, 1), (u64::MAX, 1)]);
    assert_eq!(instance.total_value(), None);

    let expected = KnapsackError::ResourceExceeded(ResourceExceeded::ValueOverflow { items: 2 });
    let budget = SolveBudget::unlimited();
    assert_eq!(
        DynamicProgrammingSolver.solve(&instance, &budget),
        Err(expected.clone())
    );
    assert_eq!(
        DynamicProgrammingSolver.optimal_value(&instance, &budget),
        Err(expected.clone())
    );
    assert_eq!(GreedySolver.solve(&instance, &budget), Err(expected));
}

#[test]
fn test_values_up_to_the_limit_are_exact() {
    let instance = Instance::from_pairs(2, &[(u64::MAX - 1, 1), (1, 1)]);
    for solution in [exact(&instance), greedy(&instance)] {
        assert_eq!(solution.value, u64::MAX);
        assert_eq!(solution.selected, vec![0, 1]);
    }
}

#[test]
fn test_verify_rejects_overflowing_selection() {
    let instance = Instance::from_pairs(2, &[(u64::MAX, 1), (u64::MAX, 1)]);
    let claimed = Solution::new("manual", u64::MAX, vec![0, 1]);
    let err = claimed.verify(&instance).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_solve_timed_records_duration() {
    let instance = Instance::from_pairs(1000, &[(3, 7); 200]);
    let solution =
        solve_timed(&DynamicProgrammingSolver, &instance, &SolveBudget::unlimited()).unwrap();
    assert_eq!(solution.solver, "dynamic");
    assert!(solution.duration > Duration::ZERO);
}

#[test]
fn test_solvers_as_trait_objects() {
    let solvers: [&dyn KnapsackSolver; 2] = [&DynamicProgrammingSolver, &GreedySolver];
    let names: Vec<&str> = solvers.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["dynamic", "greedy"]);
}

#[test]
fn test_deadline_not_yet_expired() {
    let budget = SolveBudget::unlimited().with_time_limit(Duration::from_secs(3600));
    assert!(budget.check_deadline().is_ok());
    assert_eq!(
        budget.deadline().map(|d| d.limit()),
        Some(Duration::from_secs(3600))
    );
}

fn arb_instance() -> impl Strategy<Value = Instance> {
    (
        0u64..60,
        prop::collection::vec((0u64..50, 0u64..25), 0..12),
    )
        .prop_map(|(capacity, pairs)| Instance::from_pairs(capacity, &pairs))
}

proptest! {
    #[test]
    fn prop_exact_dominates_greedy(instance in arb_instance()) {
        prop_assert!(exact(&instance).value >= greedy(&instance).value);
    }

    #[test]
    fn prop_exact_is_optimal(instance in arb_instance()) {
        prop_assert_eq!(exact(&instance).value, brute_force(&instance));
    }

    #[test]
    fn prop_selections_are_feasible_and_consistent(instance in arb_instance()) {
        for solution in [exact(&instance), greedy(&instance)] {
            prop_assert!(solution.verify(&instance).is_ok(), "{:?}", solution);
        }
    }

    #[test]
    fn prop_solvers_are_deterministic(instance in arb_instance()) {
        prop_assert_eq!(exact(&instance), exact(&instance));
        prop_assert_eq!(greedy(&instance), greedy(&instance));
    }

    #[test]
    fn prop_value_only_matches_full_solve(instance in arb_instance()) {
        let value = DynamicProgrammingSolver
            .optimal_value(&instance, &SolveBudget::unlimited())
            .unwrap();
        prop_assert_eq!(value, exact(&instance).value);
    }

    #[test]
    fn prop_capacity_zero_positive_weights(
        pairs in prop::collection::vec((0u64..50, 1u64..25), 0..12)
    ) {
        let instance = Instance::from_pairs(0, &pairs);
        for solution in [exact(&instance), greedy(&instance)] {
            prop_assert_eq!(solution.value, 0);
            prop_assert!(solution.selected.is_empty());
        }
    }
}
