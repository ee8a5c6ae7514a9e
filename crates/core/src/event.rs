use chrono::DateTime;
use chrono_tz::Tz;

pub const NO_TITLE: &str = "No Title Found";
pub const NO_LOCATION: &str = "No Location Found";

/// One entry of the event listing.
///
/// A record only exists once its start time has been parsed; containers
/// without a usable timestamp never become records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
	pub title: String,
	/// Absolute URL of the event page, empty when the entry had no link.
	pub link: String,
	pub start: DateTime<Tz>,
	pub location: String,
}

impl EventRecord {
	/// Build a record from best-effort field values, substituting the
	/// placeholders for anything that could not be extracted.
	#[must_use]
	pub fn new(
		title: Option<String>,
		link: Option<String>,
		start: DateTime<Tz>,
		location: Option<String>,
	) -> Self {
		Self {
			title: title.unwrap_or_else(|| NO_TITLE.to_string()),
			link: link.unwrap_or_default(),
			start,
			location: location.unwrap_or_else(|| NO_LOCATION.to_string()),
		}
	}
}
