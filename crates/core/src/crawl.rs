use tracing::{info, warn};

use crate::{
	calendar::Emitter, event::EventRecord, fetch::Fetcher, page::PageParser, Config, Result,
};

/// Counters describing how a run went.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
	pub pages_fetched: usize,
	pub pages_failed: usize,
	pub events: usize,
	pub files_written: usize,
	pub files_failed: usize,
}

/// Drives a whole run: first page, then every page its pager links to, then
/// one calendar file per collected event.
#[derive(Debug)]
pub struct Crawler {
	config: Config,
	fetcher: Fetcher,
	parser: PageParser,
}

impl Crawler {
	/// # Errors
	///
	/// Returns [`crate::Error::InvalidUrl`] if the source URL is not absolute.
	pub fn new(config: Config) -> Result<Self> {
		Self::with_fetcher(config, Fetcher::default())
	}

	/// # Errors
	///
	/// Returns [`crate::Error::InvalidUrl`] if the source URL is not absolute.
	pub fn with_fetcher(config: Config, fetcher: Fetcher) -> Result<Self> {
		Ok(Self {
			parser: PageParser::new(&config)?,
			config,
			fetcher,
		})
	}

	/// # Errors
	///
	/// Returns [`crate::Error::Fetch`] if the first listing page cannot be
	/// fetched. Failures on later pages, events or files are logged and
	/// counted in the [`Report`] instead.
	pub fn run(&self) -> Result<Report> {
		let mut report = Report::default();
		let events = self.collect(&mut report)?;

		report.events = events.len();
		info!(count = events.len(), "found events");

		if events.is_empty() {
			info!("no events were found to process");
			return Ok(report);
		}

		self.emit(&events, &mut report);

		info!(
			written = report.files_written,
			failed = report.files_failed,
			dir = %self.config.output_dir.display(),
			"processing complete"
		);

		Ok(report)
	}

	fn collect(&self, report: &mut Report) -> Result<Vec<EventRecord>> {
		let base_url = &self.config.source_url;

		info!(url = %base_url, "fetching base page");
		let html = self.fetcher.fetch(base_url)?;
		report.pages_fetched += 1;

		let first = self.parser.parse(&html);
		let mut events = first.events;

		if first.pages.is_empty() {
			info!("no additional pages found");
			return Ok(events);
		}

		let total = first.pages.len() + 1;
		info!(count = first.pages.len(), "found additional pages to scrape");

		for (i, url) in first.pages.iter().enumerate() {
			info!(url = %url, "scraping page {}/{total}", i + 2);

			match self.fetcher.fetch(url) {
				Ok(html) => {
					report.pages_fetched += 1;
					events.extend(self.parser.parse(&html).events);
				}
				Err(err) => {
					report.pages_failed += 1;
					warn!("{err}; skipping page");
				}
			}
		}

		Ok(events)
	}

	fn emit(&self, events: &[EventRecord], report: &mut Report) {
		let mut emitter = Emitter::new(&self.config.output_dir);

		info!(dir = %emitter.output_dir().display(), "generating calendar files");

		for event in events {
			match emitter.emit(event) {
				Ok(_) => report.files_written += 1,
				Err(err) => {
					report.files_failed += 1;
					warn!(title = %event.title, "{err}");
				}
			}
		}
	}
}
