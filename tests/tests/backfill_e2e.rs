//! End-to-end backfill runs against a fake warehouse and an in-memory
//! snapshot store.

use backfill::{BackfillConfig, BackfillRunner, DayOutcome};
use chrono::NaiveDate;
use integration_tests::fakes::{tool_row, FakeWarehouse};
use std::sync::Arc;
use store::SnapshotStore;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn open_store() -> Arc<SnapshotStore> {
    let store = Arc::new(SnapshotStore::open_in_memory().unwrap());
    store.initialize().unwrap();
    store
}

fn runner(fake: FakeWarehouse, store: Arc<SnapshotStore>) -> BackfillRunner {
    BackfillRunner::new(Arc::new(fake), store, BackfillConfig::default())
}

#[tokio::test]
async fn attempts_every_day_in_range() {
    let store = open_store();
    let report = runner(FakeWarehouse::new(), store.clone())
        .run(d("2024-01-01"), d("2024-01-05"))
        .await
        .unwrap();

    assert_eq!(report.attempted(), 5);
    assert_eq!(report.empty(), 5);
    assert!(report.is_clean());
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn single_day_range_attempts_one_day() {
    let fake = FakeWarehouse::new().with_day(d("2024-03-01"), vec![tool_row("a[bot]", 4, 2.0)], 200);
    let store = open_store();

    let report = runner(fake, store.clone())
        .run(d("2024-03-01"), d("2024-03-01"))
        .await
        .unwrap();

    assert_eq!(report.attempted(), 1);
    assert_eq!(report.completed(), 1);
    assert_eq!(store.count().unwrap(), 1);
}

#[tokio::test]
async fn inverted_range_is_rejected_before_any_work() {
    let store = open_store();
    let result = runner(FakeWarehouse::new(), store)
        .run(d("2024-01-05"), d("2024-01-01"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn failure_on_one_day_does_not_abort_the_range() {
    let days = ["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"];
    let mut fake = FakeWarehouse::new();
    for day in days {
        fake = fake.with_day(d(day), vec![tool_row("renovate[bot]", 10, 1.0)], 1000);
    }
    let fake = fake.fail_on(d("2024-01-02"));
    let store = open_store();

    let report = runner(fake, store.clone())
        .run(d("2024-01-01"), d("2024-01-05"))
        .await
        .unwrap();

    assert_eq!(report.attempted(), 5);
    assert_eq!(report.completed(), 4);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.days[1].outcome,
        DayOutcome::Failed { .. }
    ));

    // Snapshots exist for every day except the failed one.
    let snapshots = store.query_range(d("2024-01-01"), d("2024-01-05")).unwrap();
    let mut stored_days: Vec<String> = snapshots.iter().map(|s| s.date.to_string()).collect();
    stored_days.sort();
    assert_eq!(
        stored_days,
        vec!["2024-01-01", "2024-01-03", "2024-01-04", "2024-01-05"]
    );
}

#[tokio::test]
async fn zero_row_day_skips_denominator_and_writes_nothing() {
    // Denominator is scripted, but the breakdown returns no rows, so the
    // runner must never ask for it.
    let fake = FakeWarehouse::new().with_day(d("2024-02-01"), vec![], 9999);
    let store = open_store();

    let report = runner(fake, store.clone())
        .run(d("2024-02-01"), d("2024-02-01"))
        .await
        .unwrap();

    assert_eq!(report.attempted(), 1);
    assert_eq!(report.empty(), 1);
    assert!(report.is_clean());
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn denominator_query_only_runs_for_days_with_rows() {
    let fake = Arc::new(
        FakeWarehouse::new()
            .with_day(d("2024-02-01"), vec![], 9999)
            .with_day(d("2024-02-02"), vec![tool_row("a[bot]", 1, 0.1)], 500),
    );
    let store = open_store();
    let runner = BackfillRunner::new(fake.clone(), store, BackfillConfig::default());

    runner.run(d("2024-02-01"), d("2024-02-02")).await.unwrap();

    let queries = fake.executed_queries();
    // Day 1: breakdown only. Day 2: breakdown + denominator.
    assert_eq!(queries.len(), 3);
    assert_eq!(
        queries
            .iter()
            .filter(|q| q.contains("total_active_repos"))
            .count(),
        1
    );
}

#[tokio::test]
async fn rerunning_a_day_overwrites_rather_than_duplicates() {
    let store = open_store();
    let day = d("2024-04-01");

    let first = FakeWarehouse::new().with_day(day, vec![tool_row("x[bot]", 10, 1.0)], 100);
    runner(first, store.clone()).run(day, day).await.unwrap();

    let second = FakeWarehouse::new().with_day(day, vec![tool_row("x[bot]", 12, 1.2)], 110);
    runner(second, store.clone()).run(day, day).await.unwrap();

    let snapshots = store.query_range(day, day).unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].repo_count, 12);
    assert_eq!(snapshots[0].total_active_repos, 110);
}

#[tokio::test]
async fn all_tool_rows_of_a_day_share_the_denominator() {
    let day = d("2024-05-01");
    let fake = FakeWarehouse::new().with_day(
        day,
        vec![
            tool_row("a[bot]", 30, 6.0),
            tool_row("b[bot]", 20, 4.0),
            tool_row("c[bot]", 10, 2.0),
        ],
        500,
    );
    let store = open_store();

    runner(fake, store.clone()).run(day, day).await.unwrap();

    let snapshots = store.query_range(day, day).unwrap();
    assert_eq!(snapshots.len(), 3);
    assert!(snapshots.iter().all(|s| s.total_active_repos == 500));
}

#[tokio::test]
async fn missing_denominator_rows_store_zero() {
    // Breakdown has rows but the denominator query returns zero rows: the
    // denominator degrades to 0 instead of failing the day.
    let day = d("2024-06-01");
    let fake = FakeWarehouse::new().with_breakdown_only(day, vec![tool_row("a[bot]", 3, 0.0)]);
    let store = open_store();

    runner(fake, store.clone()).run(day, day).await.unwrap();

    let snapshots = store.query_range(day, day).unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].total_active_repos, 0);
}
