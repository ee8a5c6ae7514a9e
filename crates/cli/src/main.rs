#![warn(clippy::pedantic)]

use std::{path::PathBuf, process::ExitCode};

use chrono_tz::Tz;
use clap::Parser;
use murphy2ics_core::{Config, Crawler, Report, Result, OUTPUT_DIR, SOURCE_URL, TZ};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Turn the Murphy Institute event listing into one .ics file per event.
#[derive(Parser)]
#[clap(version, about)]
struct Args {
	/// First page of the event listing
	#[clap(long, default_value = SOURCE_URL, value_hint = clap::ValueHint::Url)]
	url: String,
	/// Timezone the listing's times are actually in
	#[clap(long, default_value_t = TZ, value_parser = parse_tz)]
	timezone: Tz,
	/// Directory the calendar files are written to
	#[clap(short, long, default_value = OUTPUT_DIR, value_hint = clap::ValueHint::DirPath)]
	output: PathBuf,
	/// Log extraction details
	#[clap(short, long)]
	verbose: bool,
}

fn parse_tz(s: &str) -> std::result::Result<Tz, String> {
	s.parse::<Tz>().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
	let args = Args::parse();

	let default_level = if args.verbose { "debug" } else { "info" };
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.init();

	let config = Config {
		source_url: args.url,
		timezone: args.timezone,
		output_dir: args.output,
	};

	ExitCode::from(exit_status(&Crawler::new(config).and_then(|crawler| crawler.run())))
}

/// Only an invalid source URL or an unreachable first page fails the run; skipped pages,
/// events and files still count as success.
fn exit_status(result: &Result<Report>) -> u8 {
	match result {
		Ok(_) => 0,
		Err(err) => {
			error!("{err}; exiting");
			1
		}
	}
}
