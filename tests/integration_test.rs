use partition_stats::prelude::*;
use partition_stats::{arithmetic_average, geometric_average, root_of_sum_of_squares, TaskHook};
use rand::Rng;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

fn write_integers(path: &Path, values: impl IntoIterator<Item = i32>) {
    let contents: String = values.into_iter().map(|v| format!("{v}\n")).collect();
    std::fs::write(path, contents).expect("Failed to write input file");
}

fn expected_row(dataset: &Dataset, partition: &Partition) -> PartitionResult {
    let view = dataset.partition(partition);
    PartitionResult {
        root_sum_squares: root_of_sum_of_squares(view),
        geometric_average: geometric_average(view),
        arithmetic_average: arithmetic_average(view),
    }
}

/// Counts every statistic task that starts
#[derive(Default)]
struct CountingHook {
    calls: AtomicUsize,
}

impl TaskHook for CountingHook {
    fn before_reduce(&self, _partition: usize, _statistic: Statistic) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sleeps a random few milliseconds so workers finish in arbitrary order,
/// recording which partitions reached their arithmetic-average task
#[derive(Default)]
struct JitterHook {
    arithmetic_started: Mutex<Vec<usize>>,
}

impl TaskHook for JitterHook {
    fn before_reduce(&self, partition: usize, statistic: Statistic) {
        let delay = rand::thread_rng().gen_range(0..8);
        std::thread::sleep(Duration::from_millis(delay));
        if statistic == Statistic::ArithmeticAverage {
            self.arithmetic_started.lock().unwrap().push(partition);
        }
    }
}

/// Tracks how many tasks run at the same time
#[derive(Default)]
struct ConcurrencyHook {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl TaskHook for ConcurrencyHook {
    fn before_reduce(&self, _partition: usize, _statistic: Statistic) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(10));
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Fails one specific statistic task
struct FailingHook {
    partition: usize,
    statistic: Statistic,
}

impl TaskHook for FailingHook {
    fn before_reduce(&self, partition: usize, statistic: Statistic) {
        if partition == self.partition && statistic == self.statistic {
            panic!("injected failure in partition {partition}");
        }
    }
}

#[tokio::test]
async fn test_end_to_end_consecutive_integers() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("input.txt");
    let output_path = temp_dir.path().join("output.txt");
    write_integers(&input_path, 1..=14_000);

    let loader = TextFileLoader::new(&input_path);
    let sink = TextReportSink::new(&output_path);
    let report = Coordinator::new(ParallelConfig::with_threads(4))
        .run_with(&loader, &sink)
        .await?;

    assert_eq!(report.table.row(0).arithmetic_average, 500.5);
    assert_eq!(report.table.row(13).arithmetic_average, 13_500.5);
    assert_eq!(report.aggregate.min_arithmetic_average, 500.5);

    // Every statistic increases with the partition index for ascending data
    assert_eq!(
        report.aggregate.min_root_sum_squares,
        report.table.row(0).root_sum_squares
    );
    assert_eq!(
        report.aggregate.min_geometric_average,
        report.table.row(0).geometric_average
    );

    // sqrt(1^2 + ... + 1000^2) = sqrt(333_833_500)
    assert!((report.table.row(0).root_sum_squares - 333_833_500f64.sqrt()).abs() < 1e-6);

    let written = std::fs::read_to_string(&output_path).expect("Report should exist");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "From Main Program Thread:");
    assert!(lines[1].starts_with("Worker Child Pthread Number = 0 : \t Root of the Sum of Squares = 18271.111 : "));
    assert!(lines[1].ends_with("Arithmetic Average = 500.500"));
    assert!(lines[14].ends_with("Arithmetic Average = 13500.500"));
    assert!(written.contains("Main program thread:\tMin of the Arithmetic Averages =\t500.500"));

    Ok(())
}

#[tokio::test]
async fn test_json_sink_writes_document() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("report.json");
    let dataset = Dataset::from_values((1..=14_000).collect())?;

    let sink = JsonReportSink::new(&output_path);
    Coordinator::default().run_with(&dataset, &sink).await?;

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path)?)?;
    assert_eq!(document["partitions"][13]["arithmetic_average"], 13_500.5);
    assert_eq!(document["minimums"]["arithmetic_average"], 500.5);

    Ok(())
}

#[tokio::test]
async fn test_short_input_fails_before_spawning_workers() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("short.txt");
    let output_path = temp_dir.path().join("output.txt");
    write_integers(&input_path, 1..=13_999);

    let hook = Arc::new(CountingHook::default());
    let result = Coordinator::default()
        .with_hook(hook.clone())
        .run_with(&TextFileLoader::new(&input_path), &TextReportSink::new(&output_path))
        .await;

    match result {
        Err(StatsError::MalformedInput { message }) => assert!(message.contains("13999")),
        other => panic!("Expected MalformedInput, got {other:?}"),
    }
    assert_eq!(hook.calls.load(Ordering::SeqCst), 0);
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_missing_input_is_unavailable() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let loader = TextFileLoader::new(temp_dir.path().join("does_not_exist.txt"));

    match loader.load_dataset().await {
        Err(StatsError::InputUnavailable { path, .. }) => {
            assert!(path.ends_with("does_not_exist.txt"));
        }
        other => panic!("Expected InputUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_integer_line_is_malformed() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("bad.txt");
    let mut contents: String = (1..=14_000).map(|v| format!("{v}\n")).collect();
    contents.push_str("oops\n");
    std::fs::write(&input_path, contents).unwrap();

    let result = TextFileLoader::new(&input_path).load_dataset().await;
    assert!(matches!(result, Err(StatsError::MalformedInput { .. })));
}

#[tokio::test]
async fn test_invalid_utf8_is_malformed() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("bad.txt");
    let mut contents: Vec<u8> = (1..=13_999)
        .map(|v| format!("{v}\n"))
        .collect::<String>()
        .into_bytes();
    let offset = contents.len();
    contents.extend_from_slice(b"\xff\xfe\n");
    std::fs::write(&input_path, contents).unwrap();

    match TextFileLoader::new(&input_path).load_dataset().await {
        Err(StatsError::MalformedInput { message }) => {
            assert!(message.contains("UTF-8"));
            assert!(message.contains(&offset.to_string()));
        }
        other => panic!("Expected MalformedInput, got {other:?}"),
    }
}

#[test]
fn test_row_order_survives_random_completion_order() -> Result<()> {
    let values: Vec<i32> = {
        let mut rng = rand::thread_rng();
        (0..14_000).map(|_| rng.gen_range(1..100_000)).collect()
    };
    let dataset = Dataset::from_values(values)?;

    for threads in [2, 5, 14] {
        let hook = Arc::new(JitterHook::default());
        let table = Coordinator::new(ParallelConfig::with_threads(threads))
            .with_hook(hook.clone())
            .compute(&dataset)?;

        for partition in Partition::all() {
            assert_eq!(table.row(partition.index), expected_row(&dataset, &partition));
        }
        assert_eq!(hook.arithmetic_started.lock().unwrap().len(), PARTITION_COUNT);
    }

    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    let dataset = Dataset::from_values((0..14_000).map(|v| v % 977 + 1).collect())?;
    let baseline = Coordinator::new(ParallelConfig::with_threads(1)).run(&dataset)?;

    for _ in 0..20 {
        let report = Coordinator::new(ParallelConfig::with_threads(8)).run(&dataset)?;
        assert_eq!(report, baseline);
    }

    Ok(())
}

#[test]
fn test_tasks_run_concurrently() -> Result<()> {
    let dataset = Dataset::from_values(vec![3; 14_000])?;
    let hook = Arc::new(ConcurrencyHook::default());

    let table = Coordinator::new(ParallelConfig::with_threads(4))
        .with_hook(hook.clone())
        .compute(&dataset)?;

    assert!(hook.peak.load(Ordering::SeqCst) >= 2);
    assert!(table.rows().all(|row| row.arithmetic_average == 3.0));

    Ok(())
}

#[test]
fn test_each_task_runs_once() -> Result<()> {
    let dataset = Dataset::from_values(vec![1; 14_000])?;
    let hook = Arc::new(CountingHook::default());

    Coordinator::default().with_hook(hook.clone()).compute(&dataset)?;

    assert_eq!(hook.calls.load(Ordering::SeqCst), PARTITION_COUNT * 3);
    Ok(())
}

#[test]
fn test_failed_task_fails_the_barrier() -> Result<()> {
    let dataset = Dataset::from_values(vec![2; 14_000])?;
    let hook = Arc::new(FailingHook {
        partition: 7,
        statistic: Statistic::GeometricAverage,
    });

    match Coordinator::default().with_hook(hook).compute(&dataset) {
        Err(StatsError::TaskFailed {
            partition,
            statistic,
            message,
        }) => {
            assert_eq!(partition, 7);
            assert_eq!(statistic, Statistic::GeometricAverage);
            assert!(message.contains("injected failure"));
        }
        other => panic!("Expected TaskFailed, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_failed_run_writes_no_output() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("output.txt");
    let dataset = Dataset::from_values(vec![2; 14_000])?;
    let hook = Arc::new(FailingHook {
        partition: 0,
        statistic: Statistic::RootSumSquares,
    });

    let result = Coordinator::default()
        .with_hook(hook)
        .run_with(&dataset, &TextReportSink::new(&output_path))
        .await;

    assert!(matches!(result, Err(StatsError::TaskFailed { partition: 0, .. })));
    assert!(!output_path.exists());
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);

    Ok(())
}

#[test]
fn test_negative_values_produce_nan_not_errors() -> Result<()> {
    let mut values = vec![4; 14_000];
    values[2_500] = -1;
    let dataset = Dataset::from_values(values)?;

    let report = Coordinator::default().run(&dataset)?;
    assert!(report.table.row(2).geometric_average.is_nan());
    assert!((report.aggregate.min_geometric_average - 4.0).abs() < 1e-9);

    let rendered = ReportFormat::Text.render(&report.table, &report.aggregate)?;
    assert!(rendered.contains("Geometric Average = NAN"));

    Ok(())
}
