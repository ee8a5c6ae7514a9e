use std::{
	collections::HashSet,
	fs,
	path::{Path, PathBuf},
	sync::LazyLock,
};

use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};
use regex::Regex;
use tracing::{info, warn};

use crate::{event::EventRecord, Error, Result};

const MAX_STEM_LEN: usize = 50;
const UNTITLED: &str = "untitled-event";

static DISALLOWED: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}\s-]").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// A standalone calendar holding a single event.
#[must_use]
pub fn create_calendar(record: &EventRecord) -> Calendar {
	let tz = record.start.timezone();
	let mut calendar = Calendar::new();

	calendar.timezone(tz.name());

	let mut event = Event::new();

	event
		.summary(&record.title)
		.starts(CalendarDateTime::WithTimezone {
			date_time: record.start.naive_local(),
			tzid: tz.name().to_string(),
		})
		.location(&record.location);

	if !record.link.is_empty() {
		event.description(&format!("For more details, visit: {}", record.link));
	}

	calendar.push(event);
	calendar
}

/// Derive a filesystem-safe `.ics` file name from an event title.
///
/// Characters other than letters, digits, whitespace and hyphens are dropped,
/// runs of whitespace and hyphens become one hyphen, hyphens at either end are
/// dropped and the stem is cut to 50 characters.
#[must_use]
pub fn file_name(title: &str) -> String {
	let kept = DISALLOWED.replace_all(title, "");
	let stem = SEPARATORS.replace_all(kept.trim(), "-");
	let stem = stem
		.trim_matches('-')
		.chars().take(MAX_STEM_LEN).collect::<String>();

	if stem.is_empty() {
		format!("{UNTITLED}.ics")
	} else {
		format!("{stem}.ics")
	}
}

/// Writes one `.ics` file per event into an output directory.
#[derive(Debug)]
pub struct Emitter {
	output_dir: PathBuf,
	written: HashSet<String>,
}

impl Emitter {
	#[must_use]
	pub fn new(output_dir: impl Into<PathBuf>) -> Self {
		Self {
			output_dir: output_dir.into(),
			written: HashSet::new(),
		}
	}

	#[must_use]
	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	/// Write `record` to `<output_dir>/<file_name(title)>`, creating the
	/// directory if needed. An earlier file with the same name is replaced.
	///
	/// # Errors
	///
	/// Returns [`Error::Write`] if the directory or the file cannot be written.
	pub fn emit(&mut self, record: &EventRecord) -> Result<PathBuf> {
		fs::create_dir_all(&self.output_dir).map_err(|source| Error::Write {
			path: self.output_dir.clone(),
			source,
		})?;

		let name = file_name(&record.title);
		let path = self.output_dir.join(&name);

		if self.written.contains(&name) {
			warn!(
				title = %record.title,
				path = %path.display(),
				"another event already wrote this file; overwriting"
			);
		}

		fs::write(&path, create_calendar(record).to_string()).map_err(|source| Error::Write {
			path: path.clone(),
			source,
		})?;

		info!(path = %path.display(), "created calendar file");
		self.written.insert(name);

		Ok(path)
	}
}
