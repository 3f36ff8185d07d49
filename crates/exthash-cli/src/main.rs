use exthash_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let cli = Cli::parse_or_exit();
    if let Err(err) = cli.run() {
        tracing::error!("run failed: {:#}", err);
        eprintln!("exthash error: {:#}", err);
        std::process::exit(1);
    }
}
