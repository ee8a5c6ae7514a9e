use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the scraper.
///
/// Only [`Error::Fetch`] on the listing's first page and [`Error::InvalidUrl`]
/// end a run; every other variant is logged by the crawler and the offending
/// page, event or file is skipped.
#[derive(Error, Debug)]
pub enum Error {
	#[error("could not fetch {url}: {source}")]
	Fetch {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("could not parse date-time string {raw:?}")]
	DateParse { raw: String },

	#[error("could not write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid source url {url:?}: {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
