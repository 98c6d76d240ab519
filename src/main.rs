// src/main.rs

use balancedag::errors::BalanceError;
use balancedag::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("balancedag error: {err:?}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        report(&err);
        std::process::exit(err.kind().exit_code());
    }
}

fn report(err: &BalanceError) {
    let kind = err.kind();
    match err.task_name() {
        Some(task) => eprintln!("balancedag error [{}] in task '{task}': {err}", kind.code()),
        None => eprintln!("balancedag error [{}]: {err}", kind.code()),
    }
}
