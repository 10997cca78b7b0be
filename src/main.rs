use metagrab::{parse_args, setup_logging, CliRunner, ExitStatus};
use tracing::{debug, error};

#[tokio::main]
async fn main() {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(status) => std::process::exit(status.code()),
    };

    if let Err(e) = setup_logging(args.verbose) {
        eprintln!("Warning: {e:#}");
    }

    debug!("Starting metagrab v{}", env!("CARGO_PKG_VERSION"));

    let runner = match CliRunner::new(&args) {
        Ok(runner) => runner,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            eprintln!("Error: {e:#}");
            std::process::exit(ExitStatus::FetchFailed.code());
        }
    };

    let stdout = std::io::stdout();
    let status = runner.run(&args, &mut stdout.lock()).await;

    std::process::exit(status.code());
}
