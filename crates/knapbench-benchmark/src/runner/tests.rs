//! Tests for the benchmark runner.

use super::*;
use crate::error::SourceError;
use crate::record::{FailureKind, Outcome};
use crate::source::{DirectorySource, MemorySource};
use knapbench_core::Solution;

const CLASSIC: &str = "3 50\n60 10\n100 20\n120 30\n";

fn classic_source() -> MemorySource {
    MemorySource::new()
        .with_instance("classic", CLASSIC)
        .with_instance("empty", "0 10")
        .with_instance("heavy", "2 5\n10 6\n20 9")
        .with_instance("free", "1 0\n5 0")
}

/// Returns a fixed solution regardless of the instance.
struct FixedSolver(Solution);

impl KnapsackSolver for FixedSolver {
    fn name(&self) -> &'static str {
        self.0.solver
    }

    fn solve(&self, _: &Instance, _: &SolveBudget) -> Result<Solution, KnapsackError> {
        Ok(self.0.clone())
    }
}

/// Fails to read one specific instance.
struct FlakySource {
    inner: MemorySource,
    unreadable: &'static str,
}

impl InstanceSource for FlakySource {
    fn identifiers(&self) -> Result<Vec<String>, SourceError> {
        self.inner.identifiers()
    }

    fn read(&self, identifier: &str) -> Result<String, SourceError> {
        if identifier == self.unreadable {
            return Err(SourceError::UnknownInstance(identifier.to_string()));
        }
        self.inner.read(identifier)
    }
}

#[test]
fn test_run_produces_one_record_per_instance_in_order() {
    let report = BenchmarkRunner::new("test").run(&classic_source()).unwrap();

    let ids: Vec<&str> = report.records.iter().map(|r| r.instance.as_str()).collect();
    assert_eq!(ids, vec!["classic", "empty", "heavy", "free"]);
    assert_eq!(report.name, "test");
    assert_eq!(report.failed_count(), 0);

    let classic = report.records[0].comparison().unwrap();
    assert_eq!(classic.item_count, 3);
    assert_eq!(classic.capacity, 50);
    assert_eq!(classic.exact.selected, vec![1, 2]);
    assert_eq!(classic.heuristic.selected, vec![0, 1]);
    assert_eq!(classic.value_gap(), 60);

    let heavy = report.records[2].comparison().unwrap();
    assert_eq!(heavy.exact.value, 0);
    assert_eq!(heavy.heuristic.value, 0);

    let free = report.records[3].comparison().unwrap();
    assert_eq!(free.exact.value, 5);
    assert_eq!(free.exact.selected, vec![0]);
}

#[test]
fn test_time_difference_is_heuristic_minus_exact() {
    let report = BenchmarkRunner::new("test").run(&classic_source()).unwrap();
    let classic = report.records[0].comparison().unwrap();
    let expected = classic.heuristic.duration_seconds() - classic.exact.duration_seconds();
    assert_eq!(classic.time_difference_seconds(), expected);
}

#[test]
fn test_parse_failure_does_not_abort_batch() {
    let source = MemorySource::new()
        .with_instance("bad-count", "3 10\n1 1")
        .with_instance("negative", "1 10\n-1 2")
        .with_instance("classic", CLASSIC);

    let report = BenchmarkRunner::new("test").run(&source).unwrap();
    assert_eq!(report.len(), 3);

    let failure = report.records[0].failure().unwrap();
    assert_eq!(failure.kind, FailureKind::Parse);
    assert!(failure.message.contains("declared 3 items but found 1"));

    assert_eq!(report.records[1].failure().unwrap().kind, FailureKind::Parse);
    assert_eq!(report.records[2].comparison().unwrap().exact.value, 220);
}

#[test]
fn test_overflowing_values_become_parse_record() {
    let overflowing = format!("2 5\n{} 1\n1 1\n", u64::MAX);
    let source = MemorySource::new()
        .with_instance("overflow", &overflowing)
        .with_instance("classic", CLASSIC);

    let report = BenchmarkRunner::new("test").run(&source).unwrap();
    let failure = report.records[0].failure().unwrap();
    assert_eq!(failure.kind, FailureKind::Parse);
    assert!(failure.message.contains("total item value exceeds"));
    assert_eq!(report.records[1].comparison().unwrap().exact.value, 220);
}

#[test]
fn test_read_failure_becomes_source_record() {
    let source = FlakySource {
        inner: classic_source(),
        unreadable: "empty",
    };
    let report = BenchmarkRunner::new("test").run(&source).unwrap();

    assert_eq!(report.len(), 4);
    assert_eq!(report.records[1].failure().unwrap().kind, FailureKind::Source);
    assert!(report.records[2].comparison().is_some());
}

#[test]
fn test_table_limit_becomes_resource_record() {
    let source = MemorySource::new()
        .with_instance("big", "2 1000\n1 600\n1 600")
        .with_instance("classic", CLASSIC);

    let report = BenchmarkRunner::new("test")
        .with_max_table_cells(500)
        .run(&source)
        .unwrap();

    let failure = report.records[0].failure().unwrap();
    assert_eq!(failure.kind, FailureKind::ResourceExceeded);
    assert!(failure.message.contains("exceeds the limit of 500 cells"));
    assert!(report.records[1].comparison().is_some());
}

#[test]
fn test_expired_time_limit_becomes_resource_record() {
    let report = BenchmarkRunner::new("test")
        .with_time_limit(Duration::ZERO)
        .run(&MemorySource::new().with_instance("classic", CLASSIC))
        .unwrap();

    let failure = report.records[0].failure().unwrap();
    assert_eq!(failure.kind, FailureKind::ResourceExceeded);
}

#[test]
fn test_parallel_matches_sequential() {
    let mut source = MemorySource::new();
    for n in 0..24u64 {
        let items: String = (0..n).map(|i| format!("{} {}\n", (i * 37) % 50 + 1, (i * 13) % 20 + 1)).collect();
        source.push(format!("gen{n}"), format!("{n} {}\n{items}", n * 3));
    }
    source.push("broken", "x y");

    let sequential = BenchmarkRunner::new("seq").run(&source).unwrap();
    let parallel = BenchmarkRunner::new("par")
        .with_parallel(true)
        .run(&source)
        .unwrap();

    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.records.iter().zip(&parallel.records) {
        assert_eq!(a.instance, b.instance);
        match (&a.outcome, &b.outcome) {
            (Outcome::Compared(x), Outcome::Compared(y)) => {
                assert_eq!(x.exact.value, y.exact.value);
                assert_eq!(x.exact.selected, y.exact.selected);
                assert_eq!(x.heuristic.selected, y.heuristic.selected);
            }
            (Outcome::Failed(x), Outcome::Failed(y)) => assert_eq!(x, y),
            _ => panic!("outcomes differ for {}", a.instance),
        }
    }
}

#[test]
fn test_warmup_does_not_change_results() {
    let report = BenchmarkRunner::new("test")
        .with_warmup_count(3)
        .run(&classic_source())
        .unwrap();
    assert_eq!(report.records[0].comparison().unwrap().exact.value, 220);
}

#[test]
fn test_inconsistent_solution_is_fatal() {
    let liar = FixedSolver(Solution::new("liar", 999, vec![0]));
    let runner = BenchmarkRunner::new("test").with_solvers(DynamicProgrammingSolver, liar);

    let err = runner.run(&classic_source()).unwrap_err();
    match err {
        BenchmarkError::Fatal { instance, source } => {
            assert_eq!(instance, "classic");
            assert!(source.is_fatal());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_heuristic_beating_exact_is_fatal() {
    // Claims optimum 0 with an empty selection: consistent but not optimal.
    let weak_exact = FixedSolver(Solution::empty("weak"));
    let runner = BenchmarkRunner::new("test").with_solvers(weak_exact, GreedySolver);

    let err = runner
        .run(&MemorySource::new().with_instance("classic", CLASSIC))
        .unwrap_err();
    assert!(matches!(err, BenchmarkError::Fatal { .. }));
}

#[test]
fn test_unlistable_source_aborts() {
    let err = BenchmarkRunner::new("test")
        .run(&DirectorySource::new("/nonexistent/knapbench"))
        .unwrap_err();
    assert!(matches!(err, BenchmarkError::Source(_)));
}

#[test]
fn test_directory_run_in_natural_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("inst10.txt"), CLASSIC).unwrap();
    std::fs::write(dir.path().join("inst2.txt"), "1 0\n5 0").unwrap();
    std::fs::write(dir.path().join("inst1.txt"), "bad").unwrap();

    let report = BenchmarkRunner::new("dir")
        .run(&DirectorySource::new(dir.path()))
        .unwrap();

    let ids: Vec<&str> = report.records.iter().map(|r| r.instance.as_str()).collect();
    assert_eq!(ids, vec!["inst1.txt", "inst2.txt", "inst10.txt"]);
    assert!(report.records[0].is_failed());
    assert_eq!(report.heuristic_optimal_count(), 1);
}

#[test]
fn test_from_config() {
    let config = BenchmarkConfig::new("configured")
        .with_max_table_cells(10)
        .with_parallel(true);
    let runner = BenchmarkRunner::from_config(&config);
    assert_eq!(runner.name(), "configured");

    let report = runner
        .run(&MemorySource::new().with_instance("classic", CLASSIC))
        .unwrap();
    assert_eq!(
        report.records[0].failure().unwrap().kind,
        FailureKind::ResourceExceeded
    );
}

#[test]
fn test_compare_instance_directly() {
    let instance = Instance::from_pairs(50, &[(60, 10), (100, 20), (120, 30)]);
    let comparison = BenchmarkRunner::new("direct").compare(&instance).unwrap();
    assert_eq!(comparison.exact.value, 220);
    assert!(!comparison.heuristic_is_optimal());
}

#[test]
fn test_report_aggregates() {
    let report = BenchmarkRunner::new("test")
        .run(&classic_source().with_instance("broken", ""))
        .unwrap();

    assert_eq!(report.compared_count(), 4);
    assert_eq!(report.failed_count(), 1);
    // empty, heavy and free are solved optimally by the heuristic.
    assert_eq!(report.heuristic_optimal_count(), 3);

    let mean = report.mean_approximation_ratio().unwrap();
    let expected = (160.0 / 220.0 + 3.0) / 4.0;
    assert!((mean - expected).abs() < 1e-12);
    assert_eq!(report.min_approximation_ratio(), Some(160.0 / 220.0));
    assert!(report.total_exact_time() >= report.records[0].comparison().unwrap().exact.duration);
}
