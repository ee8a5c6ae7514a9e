#![warn(clippy::pedantic)]

use std::path::PathBuf;

use chrono_tz::Tz;
use url::Url;

pub mod calendar;
pub mod crawl;
pub mod error;
pub mod event;
pub mod fetch;
pub mod page;
pub mod time;

pub use crawl::{Crawler, Report};
pub use error::{Error, Result};
pub use event::EventRecord;

pub const SOURCE_URL: &str = "https://murphy.tulane.edu/events/upcoming-events";
pub const OUTPUT_DIR: &str = "events";
/// The listing publishes Central time, whatever its markup claims.
pub const TZ: Tz = chrono_tz::America::Chicago;

#[derive(Debug, Clone)]
pub struct Config {
	/// First page of the event listing; pager links are appended to it.
	pub source_url: String,
	pub timezone: Tz,
	pub output_dir: PathBuf,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			source_url: SOURCE_URL.to_string(),
			timezone: TZ,
			output_dir: PathBuf::from(OUTPUT_DIR),
		}
	}
}

impl Config {
	/// Scheme, host and port of the source URL, used to resolve root-relative
	/// links.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidUrl`] if the source URL is not absolute.
	pub fn origin(&self) -> Result<String> {
		let url = Url::parse(&self.source_url).map_err(|source| Error::InvalidUrl {
			url: self.source_url.clone(),
			source,
		})?;

		Ok(url.origin().ascii_serialization())
	}
}
