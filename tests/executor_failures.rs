use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use balancedag::dag::TaskGraph;
use balancedag::errors::{BalanceError, ErrorKind};
use balancedag::exec::execute;
use balancedag_test_utils::task_log::TaskLog;
use balancedag_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn test_single_failure_is_returned_after_siblings_drain() {
    init_tracing();
    with_timeout(async {
        let log = TaskLog::new();
        let mut graph: TaskGraph<i64> = TaskGraph::new();

        // `slow` is already running when `broken` fails; it must be allowed
        // to finish, but its result is never surfaced.
        {
            let log = log.clone();
            graph.add_task("slow", move |_| {
                let log = log.clone();
                async move {
                    log.started("slow");
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    log.finished("slow");
                    Ok(1)
                }
            });
        }
        graph.add_task("broken", |_| async { Err(anyhow!("connection refused")) });
        {
            let log = log.clone();
            graph.add_task_after("after_broken", &["broken"], move |_| {
                let log = log.clone();
                async move {
                    log.started("after_broken");
                    Ok(2)
                }
            });
        }
        graph.add_task_after("out", &["slow", "after_broken"], |_| async { Ok(3) });

        let err = execute(graph, "out").await.unwrap_err();

        match &err {
            BalanceError::Task { task, cause } => {
                assert_eq!(task, "broken");
                assert!(cause.to_string().contains("connection refused"));
            }
            other => panic!("Expected Task error, got: {:?}", other),
        }
        assert_eq!(err.kind(), ErrorKind::Task);
        assert_eq!(err.task_name(), Some("broken"));

        // The in-flight sibling finished before the error was reported.
        assert_eq!(log.count("end:slow"), 1);
        // The failed task's dependent never started.
        assert_eq!(log.count("start:after_broken"), 0);
    })
    .await;
}

#[tokio::test]
async fn test_no_new_tasks_start_while_draining() {
    init_tracing();
    with_timeout(async {
        let started_after_drain = Arc::new(AtomicUsize::new(0));
        let mut graph: TaskGraph<i64> = TaskGraph::new();

        // `slow` finishes after `broken` failed, so its dependent must not run.
        graph.add_task("slow", |_| async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(1)
        });
        graph.add_task("broken", |_| async { Err(anyhow!("boom")) });
        {
            let started = started_after_drain.clone();
            graph.add_task_after("after_slow", &["slow"], move |_| {
                let started = started.clone();
                async move {
                    started.fetch_add(1, Ordering::SeqCst);
                    Ok(2)
                }
            });
        }

        let err = execute(graph, "after_slow").await.unwrap_err();
        assert_eq!(err.task_name(), Some("broken"));
        assert_eq!(started_after_drain.load(Ordering::SeqCst), 0);
    })
    .await;
}

#[tokio::test]
async fn test_failure_in_non_target_task_still_fails_invocation() {
    init_tracing();
    with_timeout(async {
        let mut graph: TaskGraph<i64> = TaskGraph::new();
        graph.add_task("wanted", |_| async { Ok(42) });
        graph.add_task("unrelated", |_| async { Err(anyhow!("side effect failed")) });

        let err = execute(graph, "wanted").await.unwrap_err();
        assert_eq!(err.task_name(), Some("unrelated"));
    })
    .await;
}

#[tokio::test]
async fn test_first_failure_in_completion_order_wins() {
    init_tracing();
    with_timeout(async {
        let mut graph: TaskGraph<i64> = TaskGraph::new();
        graph.add_task("late_failure", |_| async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            Err(anyhow!("late"))
        });
        graph.add_task("early_failure", |_| async { Err(anyhow!("early")) });
        graph.add_task_after("out", &["late_failure", "early_failure"], |_| async { Ok(0) });

        let err = execute(graph, "out").await.unwrap_err();
        assert_eq!(err.task_name(), Some("early_failure"));
        assert!(err.to_string().contains("early"));
    })
    .await;
}

#[tokio::test]
async fn test_panicking_task_is_reported_by_name() {
    init_tracing();
    with_timeout(async {
        let mut graph: TaskGraph<i64> = TaskGraph::new();
        graph.add_task("fine", |_| async { Ok(1) });
        graph.add_task("explodes", |_| async {
            if true {
                panic!("task blew up");
            }
            Ok(0)
        });
        graph.add_task_after("out", &["fine", "explodes"], |_| async { Ok(2) });

        let err = execute(graph, "out").await.unwrap_err();
        assert_eq!(err.task_name(), Some("explodes"));
    })
    .await;
}

#[tokio::test]
async fn test_typed_error_inside_task_keeps_its_kind() {
    init_tracing();
    with_timeout(async {
        let mut graph: TaskGraph<i64> = TaskGraph::new();
        graph.add_task("check", |_| async {
            let total = balancedag::calc::compute_balance(&[10], Some(50), None)?;
            Ok(total)
        });

        let err = execute(graph, "check").await.unwrap_err();
        assert_eq!(err.task_name(), Some("check"));
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.kind().exit_code(), 2);
    })
    .await;
}
