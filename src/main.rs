//! notification-facade CLI entry point

use std::process::ExitCode;

use clap::Parser;

use notification_facade::cli::{run, Cli};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    run(Cli::parse()).await
}
