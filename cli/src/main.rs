//! `fetch` — GET a URL with `Accept: application/json` and print the body.
//!
//! Body lines go to stdout as they arrive; logs and failures go to stderr.
//! Any failure ends the run with a non-zero exit status.

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use fetch_core::HttpFetcher;
use log::info;

/// Endpoint fetched when neither an argument nor `FETCH_URL` is given.
const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/todos/1";

#[derive(Debug, Parser)]
#[command(name = "fetch", version, about = "GET a URL and print its body line by line")]
struct Cli {
    /// Absolute URL to fetch.
    #[arg(env = "FETCH_URL", default_value = DEFAULT_URL)]
    url: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut stdout = io::stdout().lock();
    match HttpFetcher::new().fetch_to(&cli.url, &mut stdout) {
        Ok(report) => {
            info!(
                "{}: {} lines ({} malformed)",
                cli.url, report.lines, report.malformed
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

/// `error: <err>` followed by one `caused by:` line per source.
fn describe(err: &dyn Error) -> String {
    let mut message = format!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    message
}
