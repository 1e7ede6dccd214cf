use renamr_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Stdout may carry native-messaging frames; logs go to a file or stderr.
    let sink = logging::init_logging();
    tracing::debug!(?sink, "logging ready");

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("renamr error: {:#}", err);
        std::process::exit(1);
    }
}
