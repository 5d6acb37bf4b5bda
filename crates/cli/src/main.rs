use clap::Parser;
use semver_stats_cli::args::Args;
use semver_stats_cli::config::RunConfig;
use semver_stats_cli::error::{AppError, Result};
use semver_stats_cli::options::LogLevel;
use semver_stats_cli::presentation;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn init_logging(base: LogLevel, verbose: u8, quiet: u8) {
    env_logger::Builder::from_default_env()
        .format_target(false)
        .filter_level(base.adjusted(verbose, quiet))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = RunConfig::from(args);
    let result = semver_stats_engine::run(&config)?;

    for (path, err) in &result.errors {
        eprintln!("Error processing {}: {err}", path.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    presentation::write_results(&mut out, &result, args.format)?;
    out.flush()?;

    if result.errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::FilesFailed(result.errors.len()))
    }
}

fn pause() {
    print!("Press Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level, args.verbose, args.quiet);

    let code = match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Application Error: {e}");
            ExitCode::FAILURE
        }
    };

    if args.pause {
        pause();
    }
    code
}
