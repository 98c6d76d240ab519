use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use balancedag::dag::TaskGraph;
use balancedag::exec::execute;
use balancedag_test_utils::task_log::TaskLog;
use balancedag_test_utils::{init_tracing, with_timeout};
use tokio::sync::Barrier;

/// Register a task that logs its start/end and returns `value` plus the sum
/// of its inputs.
fn logged_task(graph: &mut TaskGraph<i64>, log: &TaskLog, name: &str, after: &[&str], value: i64) {
    let log = log.clone();
    let task = name.to_string();
    graph.add_task_after(name, after, move |inputs| {
        let log = log.clone();
        let task = task.clone();
        async move {
            log.started(&task);
            tokio::task::yield_now().await;
            let sum: i64 = inputs.iter().map(|(_, v)| *v).sum();
            log.finished(&task);
            Ok(value + sum)
        }
    });
}

#[tokio::test]
async fn test_diamond_respects_dependencies() {
    init_tracing();
    with_timeout(async {
        // a -> b, a -> c, (b, c) -> d
        let log = TaskLog::new();
        let mut graph = TaskGraph::new();
        logged_task(&mut graph, &log, "a", &[], 1);
        logged_task(&mut graph, &log, "b", &["a"], 10);
        logged_task(&mut graph, &log, "c", &["a"], 100);
        logged_task(&mut graph, &log, "d", &["b", "c"], 1000);

        let result = execute(graph, "d").await.unwrap();

        // d = 1000 + (10 + 1) + (100 + 1)
        assert_eq!(result, 1112);

        let pos = |e: &str| log.position(e).unwrap();
        assert!(pos("end:a") < pos("start:b"));
        assert!(pos("end:a") < pos("start:c"));
        assert!(pos("end:b") < pos("start:d"));
        assert!(pos("end:c") < pos("start:d"));
        assert_eq!(log.starts(), 4);
    })
    .await;
}

#[tokio::test]
async fn test_independent_tasks_run_concurrently() {
    init_tracing();
    with_timeout(async {
        // Both tasks wait on the same barrier: if the executor serialised
        // them, neither could get past it and the test would time out.
        let barrier = Arc::new(Barrier::new(2));
        let mut graph: TaskGraph<i64> = TaskGraph::new();

        for (name, value) in [("left", 1), ("right", 2)] {
            let barrier = barrier.clone();
            graph.add_task(name, move |_| {
                let barrier = barrier.clone();
                async move {
                    barrier.wait().await;
                    Ok(value)
                }
            });
        }
        graph.add_task_after("join", &["left", "right"], |inputs| async move {
            Ok(inputs.get("left")? + inputs.get("right")?)
        });

        assert_eq!(execute(graph, "join").await.unwrap(), 3);
    })
    .await;
}

#[tokio::test]
async fn test_every_task_runs_exactly_once_including_non_target() {
    init_tracing();
    with_timeout(async {
        let counter = Arc::new(AtomicUsize::new(0));
        let side_ran = Arc::new(AtomicUsize::new(0));
        let mut graph: TaskGraph<i64> = TaskGraph::new();

        for name in ["root", "mid", "out"] {
            let counter = counter.clone();
            let after: &[&str] = match name {
                "root" => &[],
                "mid" => &["root"],
                _ => &["mid"],
            };
            graph.add_task_after(name, after, move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                }
            });
        }

        // Not a dependency of the output task, but still executed.
        {
            let side_ran = side_ran.clone();
            graph.add_task_after("side", &["root"], move |_| {
                let side_ran = side_ran.clone();
                async move {
                    side_ran.fetch_add(1, Ordering::SeqCst);
                    Ok(0)
                }
            });
        }

        assert_eq!(execute(graph, "out").await.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(side_ran.load(Ordering::SeqCst), 1);
    })
    .await;
}

#[tokio::test]
async fn test_task_sees_only_declared_dependencies() {
    init_tracing();
    with_timeout(async {
        let mut graph: TaskGraph<i64> = TaskGraph::new();
        graph.add_task("a", |_| async { Ok(1) });
        graph.add_task("b", |_| async { Ok(2) });
        graph.add_task_after("c", &["a"], |inputs| async move {
            assert_eq!(inputs.task(), "c");
            assert_eq!(inputs.len(), 1);
            assert!(inputs.get("b").is_err());
            Ok(*inputs.get("a")? * 5)
        });
        graph.add_task_after("out", &["b", "c"], |inputs| async move {
            Ok(inputs.get("b")? + inputs.get("c")?)
        });

        assert_eq!(execute(graph, "out").await.unwrap(), 7);
    })
    .await;
}

#[tokio::test]
async fn test_dependents_observe_final_values() {
    init_tracing();
    with_timeout(async {
        // The slow producer only sets its value at the very end; the consumer
        // must see exactly that value.
        let mut graph: TaskGraph<String> = TaskGraph::new();
        graph.add_task("producer", |_| async {
            let mut value = String::from("partial");
            tokio::time::sleep(Duration::from_millis(20)).await;
            value.push_str("+final");
            Ok(value)
        });
        graph.add_task_after("consumer", &["producer"], |inputs| async move {
            Ok(format!("seen {}", inputs.get("producer")?))
        });

        let result = execute(graph, "consumer").await.unwrap();
        assert_eq!(result, "seen partial+final");
    })
    .await;
}

#[tokio::test]
async fn test_edges_declared_separately() {
    init_tracing();
    with_timeout(async {
        let log = TaskLog::new();
        let mut graph = TaskGraph::new();
        logged_task(&mut graph, &log, "second", &[], 2);
        logged_task(&mut graph, &log, "first", &[], 1);
        graph.add_edge("first", "second");

        assert_eq!(execute(graph, "second").await.unwrap(), 3);
        assert!(log.position("end:first").unwrap() < log.position("start:second").unwrap());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_wide_fan_out_on_multi_thread_runtime() {
    init_tracing();
    with_timeout(async {
        let mut graph: TaskGraph<i64> = TaskGraph::new();
        let mut names = Vec::new();

        for i in 0..32 {
            let name = format!("leaf_{i}");
            graph.add_task(name.clone(), move |_| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(i)
            });
            names.push(name);
        }

        let after: Vec<&str> = names.iter().map(String::as_str).collect();
        graph.add_task_after("sum", &after, |inputs| async move {
            Ok(inputs.iter().map(|(_, v)| *v).sum())
        });

        assert_eq!(execute(graph, "sum").await.unwrap(), (0..32).sum::<i64>());
    })
    .await;
}
