// src/exec/mod.rs

//! Task execution layer.
//!
//! [`executor`] is the async shell around the pure [`crate::dag::Scheduler`]:
//! it validates the graph, spawns ready task functions onto the tokio
//! runtime, and feeds their completions back into the scheduler until the
//! invocation finishes or the first failure has drained.

pub mod executor;

pub use executor::{Executor, execute};
