use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use subnet_toolkit::cli::{report_error, run, Cli};
use subnet_toolkit::config;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    config::load_env();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    if let Err(e) = config::init_logging(cli.verbose) {
        eprintln!("Error initializing log4rs: {e}");
    }
    log::info!("#Start main()");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run(&cli, &mut out).and_then(|()| Ok(out.flush()?));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_error(&e, &mut std::io::stderr())),
    }
}
